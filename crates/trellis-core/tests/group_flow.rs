//! End-to-end flow: a host that keeps its own child list and answers every
//! unmount notification with the follow-up update pass, the way an
//! embedding UI would.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::{
    TransitionCapabilities, TransitionConfig, TransitionCoordinator, TransitionHost,
};
use trellis_testing::TestRuntime;

type Key = &'static str;
type Coordinator = TransitionCoordinator<Key, ListHost>;

/// Host owning the child list. Notifications arrive after the coordinator
/// has released its internal state, so calling straight back into
/// `update` from the callback is fine.
#[derive(Clone)]
struct ListHost {
    children: Rc<RefCell<Vec<Key>>>,
    coordinator: Rc<RefCell<Option<Coordinator>>>,
    unmounted: Rc<RefCell<Vec<Key>>>,
}

impl ListHost {
    fn new(children: Vec<Key>) -> Self {
        Self {
            children: Rc::new(RefCell::new(children)),
            coordinator: Rc::new(RefCell::new(None)),
            unmounted: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl TransitionHost<Key> for ListHost {
    fn on_decoration_change(&self, _key: &Key, _classes: &[String]) {}

    fn on_safe_to_unmount(&self, key: &Key) {
        self.unmounted.borrow_mut().push(*key);
        self.children.borrow_mut().retain(|child| child != key);
        let next = self.children.borrow().clone();
        if let Some(coordinator) = self.coordinator.borrow().as_ref() {
            coordinator.update(&next).expect("re-entrant update");
        }
    }
}

#[test]
fn host_driven_removal_settles_the_whole_group() {
    let runtime = TestRuntime::new();
    let host = ListHost::new(vec!["a", "b", "c"]);
    let coordinator = TransitionCoordinator::new(
        TransitionConfig {
            enter_enabled: false,
            leave_enabled: true,
            enter_timeout_ms: 300,
            leave_timeout_ms: 300,
            name_prefix: "fade".into(),
        },
        TransitionCapabilities::timeout_only(),
        runtime.handle(),
        host.clone(),
    )
    .expect("valid configuration");
    *host.coordinator.borrow_mut() = Some(coordinator.clone());

    coordinator
        .update(&host.children.borrow().clone())
        .expect("initial pass");
    assert_eq!(coordinator.tracked_keys(), vec!["a", "b", "c"]);

    // The host drops two children at once; both leave concurrently.
    host.children.borrow_mut().retain(|child| *child == "a");
    coordinator
        .update(&host.children.borrow().clone())
        .expect("removal pass");

    runtime.advance(400);
    assert_eq!(*host.unmounted.borrow(), vec!["b", "c"]);
    assert_eq!(coordinator.tracked_keys(), vec!["a"]);
    assert_eq!(*host.children.borrow(), vec!["a"]);
}
