//! Error types for event execution and dispatch.
//!
//! Event failures never abort a batch. They are captured per event as
//! [`DispatchFailure`] values and surfaced through a [`DispatchReport`]
//! (see [`crate::report`]) instead of a shared global.
//!
//! [`DispatchReport`]: crate::report::DispatchReport

use std::fmt;

use thiserror::Error;

/// Failure produced while executing a single event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event ran and reported a failure
    #[error("Event failed: {0}")]
    Failed(String),

    /// The event panicked; the message is taken from the panic payload
    #[error("Event panicked: {0}")]
    Panicked(String),

    /// The context did not hold what the event needed
    #[error("Invalid context: {0}")]
    InvalidContext(String),
}

/// Specialized Result type for event execution
pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    /// Create a failure error
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Create a panic error
    pub fn panicked(msg: impl Into<String>) -> Self {
        Self::Panicked(msg.into())
    }

    /// Create an invalid-context error
    pub fn invalid_context(msg: impl Into<String>) -> Self {
        Self::InvalidContext(msg.into())
    }

    /// Get error category for logs
    pub fn category(&self) -> &'static str {
        match self {
            Self::Failed(_) => "failed",
            Self::Panicked(_) => "panicked",
            Self::InvalidContext(_) => "invalid_context",
        }
    }
}

/// Position of an event within the batch it was dispatched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchSlot {
    /// Keyed dispatch: the map key the event was registered under
    Key(i64),
    /// Collection dispatch: position in the current order and the item's priority
    Index { index: usize, priority: i64 },
    /// Single-event dispatch
    Single,
}

impl fmt::Display for DispatchSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key {}", key),
            Self::Index { index, priority } => {
                write!(f, "index {} (priority {})", index, priority)
            }
            Self::Single => write!(f, "single"),
        }
    }
}

/// A contained failure of one event in a dispatch batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{event} at {slot}: {error}")]
pub struct DispatchFailure {
    /// Where the event sat in the batch
    pub slot: DispatchSlot,
    /// Name of the event that failed
    pub event: String,
    /// What went wrong
    pub error: EventError,
}

impl DispatchFailure {
    /// Record that the event named `event` at `slot` failed with `error`.
    pub fn new(slot: DispatchSlot, event: impl Into<String>, error: EventError) -> Self {
        Self {
            slot,
            event: event.into(),
            error,
        }
    }
}

/// Errors surfaced to callers that opt out of fail-open handling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// One or more events in a batch failed
    #[error("{failed} of {total} events failed; last: {last}")]
    Batch {
        /// Number of failed events
        failed: usize,
        /// Number of events dispatched
        total: usize,
        /// The most recent failure in the batch
        last: DispatchFailure,
    },

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

impl DispatchError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_error_display() {
        assert_eq!(
            EventError::failed("disk full").to_string(),
            "Event failed: disk full"
        );
        assert_eq!(
            EventError::panicked("boom").to_string(),
            "Event panicked: boom"
        );
        assert_eq!(
            EventError::invalid_context("no user").to_string(),
            "Invalid context: no user"
        );
    }

    #[test]
    fn test_event_error_category() {
        assert_eq!(EventError::failed("x").category(), "failed");
        assert_eq!(EventError::panicked("x").category(), "panicked");
        assert_eq!(EventError::invalid_context("x").category(), "invalid_context");
    }

    #[test]
    fn test_dispatch_failure_display() {
        let failure = DispatchFailure::new(
            DispatchSlot::Index {
                index: 2,
                priority: 30,
            },
            "audit",
            EventError::failed("denied"),
        );
        assert_eq!(
            failure.to_string(),
            "audit at index 2 (priority 30): Event failed: denied"
        );

        let keyed = DispatchFailure::new(DispatchSlot::Key(-4), "audit", EventError::failed("x"));
        assert_eq!(keyed.to_string(), "audit at key -4: Event failed: x");
    }

    #[test]
    fn test_batch_error_display() {
        let err = DispatchError::Batch {
            failed: 1,
            total: 3,
            last: DispatchFailure::new(DispatchSlot::Single, "solo", EventError::failed("nope")),
        };
        assert_eq!(
            err.to_string(),
            "1 of 3 events failed; last: solo at single: Event failed: nope"
        );
    }
}
