//! Error taxonomy for the transition coordinator.
//!
//! Construction-time errors are fatal to the coordinator instance being
//! built. Per-pass errors abort only that update pass and leave the child
//! registry in its last consistent state. Unknown-key errors are logged and
//! swallowed by the coordinator itself; the variant exists so internal
//! lookups can report the miss uniformly.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Invalid configuration handed to the coordinator at construction.
    #[error("invalid transition configuration: {reason}")]
    Configuration { reason: String },

    /// A key appeared more than once within a single child list.
    #[error("duplicate child key {key}")]
    DuplicateKey { key: String },

    /// An operation referenced a key the coordinator is not tracking.
    #[error("unknown child key {key}")]
    UnknownKey { key: String },
}

impl TransitionError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        TransitionError::Configuration {
            reason: reason.into(),
        }
    }

    pub(crate) fn duplicate_key(key: impl std::fmt::Debug) -> Self {
        TransitionError::DuplicateKey {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn unknown_key(key: impl std::fmt::Debug) -> Self {
        TransitionError::UnknownKey {
            key: format!("{key:?}"),
        }
    }
}
