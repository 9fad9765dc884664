use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::platform::RuntimeScheduler;

pub type TimerId = u64;

/// Default forced yield between queued decoration updates, in milliseconds.
///
/// Short and fixed; deliberately not tied to any animation duration.
pub const DEFAULT_TICK_MILLIS: u64 = 17;

struct TimerEntry {
    id: TimerId,
    deadline_ms: u64,
    callback: Box<dyn FnOnce() + 'static>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_wake: Cell<bool>,
    now_ms: Cell<u64>,
    tick_millis: Cell<u64>,
    timers: RefCell<Vec<TimerEntry>>,
    next_timer_id: Cell<u64>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_wake: Cell::new(false),
            now_ms: Cell::new(0),
            tick_millis: Cell::new(DEFAULT_TICK_MILLIS),
            timers: RefCell::new(Vec::new()),
            next_timer_id: Cell::new(1),
        }
    }

    fn schedule(&self) {
        self.needs_wake.set(true);
        self.scheduler.schedule_tick();
    }

    fn set_timeout(&self, delay_ms: u64, callback: Box<dyn FnOnce() + 'static>) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        self.timers.borrow_mut().push(TimerEntry {
            id,
            deadline_ms: self.now_ms.get().saturating_add(delay_ms),
            callback,
        });
        self.schedule();
        id
    }

    fn cancel_timer(&self, id: TimerId) {
        let mut timers = self.timers.borrow_mut();
        if let Some(index) = timers.iter().position(|entry| entry.id == id) {
            timers.remove(index);
        }
        if timers.is_empty() {
            self.needs_wake.set(false);
        }
    }

    fn next_deadline_millis(&self) -> Option<u64> {
        self.timers
            .borrow()
            .iter()
            .map(|entry| entry.deadline_ms)
            .min()
    }

    /// Runs every timer due at or before `target_ms`, in deadline order
    /// (registration order among equal deadlines), advancing the logical
    /// clock to each deadline as it fires. Timers registered by a firing
    /// callback are honored within the same drain when they fall inside the
    /// target window.
    fn advance_to(&self, target_ms: u64) {
        loop {
            let entry = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.deadline_ms <= target_ms)
                    .min_by_key(|(_, entry)| (entry.deadline_ms, entry.id))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => timers.remove(index),
                    None => break,
                }
            };
            if entry.deadline_ms > self.now_ms.get() {
                self.now_ms.set(entry.deadline_ms);
            }
            (entry.callback)();
        }
        if target_ms > self.now_ms.get() {
            self.now_ms.set(target_ms);
        }
        if self.timers.borrow().is_empty() {
            self.needs_wake.set(false);
        }
    }
}

/// Single-threaded timer runtime driving the transition coordinator.
///
/// All suspension in trellis is callback registration against this runtime:
/// the shared decoration tick, per-child completion timeouts, and the
/// component-level interval helper. The host platform drives it by calling
/// [`RuntimeHandle::advance_to`] with the current time.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    /// Current logical time, i.e. the latest `advance_to` target reached.
    pub fn now_millis(&self) -> u64 {
        self.inner.now_ms.get()
    }

    pub fn needs_wake(&self) -> bool {
        self.inner.needs_wake.get()
    }

    /// Overrides the shared decoration tick length.
    pub fn set_tick_millis(&self, tick_millis: u64) {
        self.inner.tick_millis.set(tick_millis.max(1));
    }

    pub fn tick_millis(&self) -> u64 {
        self.inner.tick_millis.get()
    }
}

/// Weak handle onto a [`Runtime`], safe to capture in scheduled callbacks.
#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    /// Arms a one-shot timer. Returns `None` when the runtime is gone.
    pub fn set_timeout(
        &self,
        delay_ms: u64,
        callback: impl FnOnce() + 'static,
    ) -> Option<TimerId> {
        self.0
            .upgrade()
            .map(|inner| inner.set_timeout(delay_ms, Box::new(callback)))
    }

    /// Arms a callback for the next shared tick.
    pub fn on_next_tick(&self, callback: impl FnOnce() + 'static) -> Option<TimerId> {
        let inner = self.0.upgrade()?;
        Some(inner.set_timeout(inner.tick_millis.get(), Box::new(callback)))
    }

    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(inner) = self.0.upgrade() {
            inner.cancel_timer(id);
        }
    }

    /// Drives the runtime forward to `target_ms`, firing due timers in
    /// deadline order.
    pub fn advance_to(&self, target_ms: u64) {
        if let Some(inner) = self.0.upgrade() {
            inner.advance_to(target_ms);
        }
    }

    pub fn now_millis(&self) -> u64 {
        self.0
            .upgrade()
            .map(|inner| inner.now_ms.get())
            .unwrap_or(0)
    }

    pub fn tick_millis(&self) -> u64 {
        self.0
            .upgrade()
            .map(|inner| inner.tick_millis.get())
            .unwrap_or(DEFAULT_TICK_MILLIS)
    }

    /// Earliest pending deadline, for platform drivers that sleep.
    pub fn next_deadline_millis(&self) -> Option<u64> {
        self.0.upgrade().and_then(|inner| inner.next_deadline_millis())
    }

    pub fn has_pending_timers(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| !inner.timers.borrow().is_empty())
            .unwrap_or(false)
    }
}

/// Guard for an armed one-shot timer; dropping it cancels the timer.
pub struct TimerRegistration {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl TimerRegistration {
    pub fn new(runtime: RuntimeHandle, id: TimerId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    pub fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

/// Guard for a repeating timer armed with [`set_interval`]; dropping it
/// stops the repetition.
pub struct IntervalRegistration {
    runtime: RuntimeHandle,
    slot: Rc<Cell<Option<TimerId>>>,
}

impl IntervalRegistration {
    pub fn cancel(mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        if let Some(id) = self.slot.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl Drop for IntervalRegistration {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Invokes `callback` every `period_ms` until the returned registration is
/// dropped. The timer rearms itself after each firing; cancellation clears
/// the shared slot so a pending rearm stops cleanly.
pub fn set_interval(
    runtime: &RuntimeHandle,
    period_ms: u64,
    callback: impl FnMut() + 'static,
) -> IntervalRegistration {
    let slot: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));
    let callback: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(callback));
    arm_interval(runtime, period_ms, &slot, &callback);
    IntervalRegistration {
        runtime: runtime.clone(),
        slot,
    }
}

fn arm_interval(
    runtime: &RuntimeHandle,
    period_ms: u64,
    slot: &Rc<Cell<Option<TimerId>>>,
    callback: &Rc<RefCell<dyn FnMut()>>,
) {
    let id = runtime.set_timeout(period_ms, {
        let runtime = runtime.clone();
        let slot = Rc::clone(slot);
        let callback = Rc::clone(callback);
        move || {
            (callback.borrow_mut())();
            // A cancelled interval has an empty slot; stop rearming.
            if slot.get().is_some() {
                arm_interval(&runtime, period_ms, &slot, &callback);
            }
        }
    });
    slot.set(id);
}

#[derive(Default)]
pub struct NoopScheduler;

impl RuntimeScheduler for NoopScheduler {
    fn schedule_tick(&self) {}
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
