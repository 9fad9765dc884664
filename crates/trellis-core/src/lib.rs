//! Core runtime pieces for the trellis component toolkit.
//!
//! The centerpiece is the [`TransitionCoordinator`]: it manages enter/leave
//! decoration for a dynamically changing, keyed collection of visual
//! children on platforms where the native "animation finished" signal
//! cannot be trusted to ever fire. Everything it suspends on is a callback
//! registered against the single-threaded [`Runtime`], which the host
//! platform drives with its own clock.

pub mod classes;
pub mod collections;
pub mod coordinator;
pub mod diff;
pub mod error;
pub mod platform;
pub mod runtime;

pub use classes::{ClassList, TransitionKind};
pub use coordinator::{Phase, TransitionConfig, TransitionCoordinator, TransitionHost};
pub use diff::{diff, KeyedDiff};
pub use error::TransitionError;
pub use platform::{Clock, RuntimeScheduler, TransitionCapabilities};
pub use runtime::{
    set_interval, IntervalRegistration, NoopScheduler, Runtime, RuntimeHandle, TimerId,
    TimerRegistration, DEFAULT_TICK_MILLIS,
};
