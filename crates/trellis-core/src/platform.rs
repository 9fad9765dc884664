//! Platform abstraction traits for the trellis runtime.
//!
//! These traits let trellis delegate scheduling and clock responsibilities
//! to the host platform, enabling integration with different environments
//! without depending directly on `std` APIs.

/// Schedules work for the trellis runtime.
///
/// Implementations are responsible for waking the thread that drives the
/// runtime whenever new timers or tick callbacks are armed. They must be
/// safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host drive the runtime again soon.
    fn schedule_tick(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}

/// What the platform can tell us about finished transitions.
///
/// Computed once at startup by the platform adapter and injected into the
/// [`TransitionCoordinator`](crate::TransitionCoordinator). When completion
/// events are supported the coordinator races the host-delivered end event
/// against its timeout; otherwise only the timeout path is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionCapabilities {
    /// Whether the host delivers reliable end-of-transition notifications
    /// via [`TransitionCoordinator::notify_completion`](crate::TransitionCoordinator::notify_completion).
    pub supports_completion_events: bool,
}

impl TransitionCapabilities {
    /// Capabilities of a platform with a native end-of-transition event.
    pub fn native() -> Self {
        Self {
            supports_completion_events: true,
        }
    }

    /// Capabilities of a platform where only the timeout fallback works.
    pub fn timeout_only() -> Self {
        Self {
            supports_completion_events: false,
        }
    }
}

impl Default for TransitionCapabilities {
    fn default() -> Self {
        Self::timeout_only()
    }
}
