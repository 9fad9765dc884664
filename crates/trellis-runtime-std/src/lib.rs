//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform
//! abstraction traits defined in `trellis-core`. Applications construct a
//! [`StdRuntime`] and hand its handle to the transition coordinator; the
//! embedding event loop then calls [`StdRuntime::pump`] whenever the
//! scheduler requests a wake (or on its own cadence) to fire due timers.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use trellis_core::{
    Clock, Runtime, RuntimeHandle, RuntimeScheduler, TransitionCapabilities,
};

/// Scheduler that records wake requests and forwards them to an optional
/// waker installed by the embedding event loop.
pub struct StdScheduler {
    wake_requested: AtomicBool,
    waker: RwLock<Option<Arc<dyn Fn() + Send + Sync + 'static>>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            wake_requested: AtomicBool::new(false),
            waker: RwLock::new(None),
        }
    }

    /// Returns whether a wake has been requested since the last call.
    pub fn take_wake_request(&self) -> bool {
        self.wake_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker invoked whenever new runtime work is armed.
    pub fn set_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.waker.write() {
            *slot = Some(Arc::new(waker));
        }
    }

    /// Clears any registered waker.
    pub fn clear_waker(&self) {
        if let Ok(mut slot) = self.waker.write() {
            *slot = None;
        }
    }

    fn wake(&self) {
        let waker = self.waker.read().ok().and_then(|slot| slot.clone());
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "wake_requested",
                &self.wake_requested.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_tick(&self) {
        self.wake_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Clock implementation backed by [`std::time`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

impl StdClock {
    /// Returns the elapsed time as a [`Duration`] for convenience.
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

/// Detects what the current platform can report about finished transitions.
///
/// The `std` runtime has no compositor event stream, so completion events
/// are never available here; the coordinator falls back to its timeouts.
/// Embedders that do receive end-of-transition events from their windowing
/// or rendering layer should construct [`TransitionCapabilities::native`]
/// themselves and forward each event through
/// `TransitionCoordinator::notify_completion`.
pub fn detect_capabilities() -> TransitionCapabilities {
    TransitionCapabilities::timeout_only()
}

/// Convenience container bundling the standard scheduler and clock.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: Arc<StdClock>,
    runtime: Runtime,
    origin: Instant,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        Self {
            scheduler,
            clock: Arc::new(StdClock),
            runtime,
            origin: Instant::now(),
        }
    }

    /// Returns a handle to the runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Returns the scheduler implementation.
    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Returns the clock implementation.
    pub fn clock(&self) -> Arc<StdClock> {
        Arc::clone(&self.clock)
    }

    /// Returns whether a wake was requested since the last poll.
    pub fn take_wake_request(&self) -> bool {
        self.scheduler.take_wake_request()
    }

    /// Registers a waker called when the runtime arms new work.
    pub fn set_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_waker(waker);
    }

    /// Clears any previously registered waker.
    pub fn clear_waker(&self) {
        self.scheduler.clear_waker();
    }

    /// Milliseconds of wall time since this runtime was created.
    pub fn wall_millis(&self) -> u64 {
        self.clock.elapsed_millis(self.origin)
    }

    /// Fires every timer that has come due, advancing the runtime's logical
    /// clock to the current wall time.
    pub fn pump(&self) {
        self.runtime.handle().advance_to(self.wall_millis());
    }

    /// How long the embedding loop may sleep before the next timer is due,
    /// or `None` when nothing is armed.
    pub fn time_until_next_deadline(&self) -> Option<Duration> {
        let deadline = self.runtime.handle().next_deadline_millis()?;
        Some(Duration::from_millis(
            deadline.saturating_sub(self.wall_millis()),
        ))
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}
