use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingScheduler {
    wakes: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_tick(&self) {
        self.wakes.fetch_add(1, Ordering::SeqCst);
    }
}

fn runtime() -> Runtime {
    Runtime::new(Arc::new(NoopScheduler))
}

#[test]
fn timers_fire_in_deadline_order() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    for (delay, label) in [(300u64, "slow"), (17, "tick"), (50, "event")] {
        let fired = Rc::clone(&fired);
        let _ = handle.set_timeout(delay, move || fired.borrow_mut().push(label));
    }

    handle.advance_to(400);
    assert_eq!(*fired.borrow(), ["tick", "event", "slow"]);
}

#[test]
fn equal_deadlines_fire_in_registration_order() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    for label in ["first", "second", "third"] {
        let fired = Rc::clone(&fired);
        let _ = handle.set_timeout(10, move || fired.borrow_mut().push(label));
    }

    handle.advance_to(10);
    assert_eq!(*fired.borrow(), ["first", "second", "third"]);
}

#[test]
fn logical_clock_tracks_fired_deadlines() {
    let runtime = runtime();
    let handle = runtime.handle();
    let seen_at = Rc::new(Cell::new(0u64));

    {
        let handle = handle.clone();
        let seen_at = Rc::clone(&seen_at);
        let _ = handle.clone().set_timeout(25, move || {
            seen_at.set(handle.now_millis());
        });
    }

    handle.advance_to(100);
    assert_eq!(seen_at.get(), 25);
    assert_eq!(runtime.now_millis(), 100);
}

#[test]
fn cancelled_timers_do_not_fire() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(Cell::new(false));

    let id = {
        let fired = Rc::clone(&fired);
        handle
            .set_timeout(10, move || fired.set(true))
            .expect("runtime alive")
    };
    handle.cancel_timer(id);
    handle.advance_to(100);
    assert!(!fired.get());
}

#[test]
fn timers_registered_while_draining_fire_in_window() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    {
        let inner_handle = handle.clone();
        let fired = Rc::clone(&fired);
        let _ = handle.set_timeout(10, move || {
            fired.borrow_mut().push("outer");
            let fired = Rc::clone(&fired);
            let _ = inner_handle.set_timeout(10, move || fired.borrow_mut().push("inner"));
        });
    }

    handle.advance_to(30);
    assert_eq!(*fired.borrow(), ["outer", "inner"]);
}

#[test]
fn registering_a_timer_requests_a_wake() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();

    let _ = handle.set_timeout(5, || {});
    assert!(runtime.needs_wake());
    assert_eq!(scheduler.wakes.load(Ordering::SeqCst), 1);

    handle.advance_to(5);
    assert!(!runtime.needs_wake());
}

#[test]
fn registration_guard_cancels_on_drop() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(Cell::new(false));

    {
        let fired = Rc::clone(&fired);
        let id = handle
            .set_timeout(10, move || fired.set(true))
            .expect("runtime alive");
        let _registration = TimerRegistration::new(handle.clone(), id);
    }

    handle.advance_to(100);
    assert!(!fired.get());
}

#[test]
fn interval_rearms_until_dropped() {
    let runtime = runtime();
    let handle = runtime.handle();
    let count = Rc::new(Cell::new(0u32));

    let registration = {
        let count = Rc::clone(&count);
        set_interval(&handle, 10, move || count.set(count.get() + 1))
    };

    handle.advance_to(35);
    assert_eq!(count.get(), 3);

    drop(registration);
    handle.advance_to(100);
    assert_eq!(count.get(), 3);
}

#[test]
fn next_deadline_reports_earliest_timer() {
    let runtime = runtime();
    let handle = runtime.handle();
    assert_eq!(handle.next_deadline_millis(), None);

    let _ = handle.set_timeout(40, || {});
    let _ = handle.set_timeout(20, || {});
    assert_eq!(handle.next_deadline_millis(), Some(20));
}
