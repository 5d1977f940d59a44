//! Caller-owned "last error" slot.
//!
//! Holds the most recent dispatch failure across calls. The slot belongs to
//! whoever dispatches (usually a [`Dispatcher`](crate::Dispatcher)), so
//! concurrent dispatchers never race on it.

use crate::config::LastErrorPolicy;
use crate::error::DispatchFailure;
use crate::report::DispatchReport;

/// The most recent contained dispatch failure, kept between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastError {
    policy: LastErrorPolicy,
    failure: Option<DispatchFailure>,
}

impl LastError {
    /// Create an empty slot governed by `policy`.
    pub fn new(policy: LastErrorPolicy) -> Self {
        Self {
            policy,
            failure: None,
        }
    }

    /// The reset policy this slot follows.
    pub fn policy(&self) -> LastErrorPolicy {
        self.policy
    }

    /// Fold a finished batch into the slot.
    ///
    /// A batch with failures always overwrites the slot with its latest
    /// failure. Under [`LastErrorPolicy::ClearOnSuccess`] the slot is then
    /// cleared if the batch's final invocation succeeded.
    pub fn absorb(&mut self, report: &DispatchReport) {
        if let Some(last) = report.last_error() {
            self.failure = Some(last.clone());
        }
        if self.policy == LastErrorPolicy::ClearOnSuccess && report.last_succeeded() {
            self.failure = None;
        }
    }

    /// The recorded failure, if any.
    pub fn get(&self) -> Option<&DispatchFailure> {
        self.failure.as_ref()
    }

    /// The recorded failure as text; empty when there is none.
    pub fn message(&self) -> String {
        self.failure
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Whether a failure is recorded.
    pub fn is_set(&self) -> bool {
        self.failure.is_some()
    }

    /// Reset the slot explicitly.
    pub fn clear(&mut self) -> Option<DispatchFailure> {
        self.failure.take()
    }
}
