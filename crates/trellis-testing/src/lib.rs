//! Testing utilities and harness for trellis.
//!
//! [`TestRuntime`] drives the core runtime from a manual logical clock so
//! tests can step time deterministically, and [`RecordingHost`] captures
//! every outbound coordinator notification together with the logical
//! timestamp at which it fired.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trellis_core::{Runtime, RuntimeHandle, RuntimeScheduler, TransitionHost};

/// Scheduler that records wake requests instead of waking anything.
#[derive(Default)]
pub struct TestScheduler {
    wake_requests: AtomicUsize,
}

impl TestScheduler {
    pub fn wake_requests(&self) -> usize {
        self.wake_requests.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for TestScheduler {
    fn schedule_tick(&self) {
        self.wake_requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// A trellis runtime driven by a manual clock.
pub struct TestRuntime {
    scheduler: Arc<TestScheduler>,
    runtime: Runtime,
}

impl TestRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(TestScheduler::default());
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn scheduler(&self) -> Arc<TestScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn now_millis(&self) -> u64 {
        self.runtime.now_millis()
    }

    /// Advances the logical clock by `millis`, firing every timer due in
    /// the window in deadline order.
    pub fn advance(&self, millis: u64) {
        let target = self.runtime.now_millis().saturating_add(millis);
        self.runtime.handle().advance_to(target);
    }

    /// Advances by exactly one shared tick.
    pub fn tick(&self) {
        self.advance(self.runtime.tick_millis());
    }
}

impl Default for TestRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// One captured outbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent<K> {
    Decoration {
        key: K,
        classes: Vec<String>,
        at_ms: u64,
    },
    Unmount {
        key: K,
        at_ms: u64,
    },
}

/// A [`TransitionHost`] that records everything it is told.
///
/// Clones share the same event log, so a test can hand one clone to the
/// coordinator and keep another for assertions.
pub struct RecordingHost<K> {
    runtime: RuntimeHandle,
    events: Rc<RefCell<Vec<HostEvent<K>>>>,
}

impl<K> Clone for RecordingHost<K> {
    fn clone(&self) -> Self {
        Self {
            runtime: self.runtime.clone(),
            events: Rc::clone(&self.events),
        }
    }
}

impl<K: Clone> RecordingHost<K> {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            runtime,
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<HostEvent<K>> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn unmount_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, HostEvent::Unmount { .. }))
            .count()
    }
}

impl<K: Clone + PartialEq> RecordingHost<K> {
    /// Decoration class lists recorded for `key`, oldest first, with the
    /// logical time each was observed.
    pub fn decorations_of(&self, key: &K) -> Vec<(Vec<String>, u64)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HostEvent::Decoration {
                    key: k,
                    classes,
                    at_ms,
                } if k == key => Some((classes.clone(), *at_ms)),
                _ => None,
            })
            .collect()
    }

    /// Logical times at which `key` was reported safe to unmount.
    pub fn unmounts_of(&self, key: &K) -> Vec<u64> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HostEvent::Unmount { key: k, at_ms } if k == key => Some(*at_ms),
                _ => None,
            })
            .collect()
    }
}

impl<K: Clone> TransitionHost<K> for RecordingHost<K> {
    fn on_decoration_change(&self, key: &K, classes: &[String]) {
        let at_ms = self.runtime.now_millis();
        self.events.borrow_mut().push(HostEvent::Decoration {
            key: key.clone(),
            classes: classes.to_vec(),
            at_ms,
        });
    }

    fn on_safe_to_unmount(&self, key: &K) {
        let at_ms = self.runtime.now_millis();
        self.events.borrow_mut().push(HostEvent::Unmount {
            key: key.clone(),
            at_ms,
        });
    }
}
