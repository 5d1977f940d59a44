//! Per-call dispatch reports.

use crate::error::{DispatchError, DispatchFailure, DispatchResult};

/// Outcome of one dispatch call.
///
/// Failures are listed in dispatch order, so the last entry is the most
/// recent failure of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    dispatched: usize,
    callbacks: usize,
    failures: Vec<DispatchFailure>,
    last_succeeded: bool,
}

impl DispatchReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_success(&mut self, invoked_callback: bool) {
        self.dispatched += 1;
        if invoked_callback {
            self.callbacks += 1;
        }
        self.last_succeeded = true;
    }

    pub(crate) fn record_failure(&mut self, failure: DispatchFailure) {
        self.dispatched += 1;
        self.failures.push(failure);
        self.last_succeeded = false;
    }

    /// Number of events invoked.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Number of times a caller-supplied callback ran.
    ///
    /// Always 0 for the dispatch forms that take no callback.
    pub fn callbacks(&self) -> usize {
        self.callbacks
    }

    /// Number of events that succeeded.
    pub fn succeeded(&self) -> usize {
        self.dispatched - self.failures.len()
    }

    /// Every contained failure, in dispatch order.
    pub fn failures(&self) -> &[DispatchFailure] {
        &self.failures
    }

    /// The most recent failure of this batch.
    pub fn last_error(&self) -> Option<&DispatchFailure> {
        self.failures.last()
    }

    /// Whether the final invocation of the batch succeeded.
    ///
    /// `false` for an empty batch.
    pub fn last_succeeded(&self) -> bool {
        self.last_succeeded
    }

    /// True when no event failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Convert into a `Result` for callers that want `?` on any failure.
    pub fn into_result(self) -> DispatchResult<Self> {
        match self.failures.last() {
            None => Ok(self),
            Some(last) => Err(DispatchError::Batch {
                failed: self.failures.len(),
                total: self.dispatched,
                last: last.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DispatchSlot, EventError};

    fn failure(key: i64) -> DispatchFailure {
        DispatchFailure::new(DispatchSlot::Key(key), "ev", EventError::failed("x"))
    }

    #[test]
    fn test_empty_report() {
        let report = DispatchReport::new();
        assert_eq!(report.dispatched(), 0);
        assert_eq!(report.callbacks(), 0);
        assert!(report.is_clean());
        assert!(report.last_error().is_none());
        assert!(!report.last_succeeded());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_counts() {
        let mut report = DispatchReport::new();
        report.record_success(true);
        report.record_failure(failure(2));
        report.record_success(false);

        assert_eq!(report.dispatched(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.callbacks(), 1);
        assert!(report.last_succeeded());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_last_error_is_most_recent() {
        let mut report = DispatchReport::new();
        report.record_failure(failure(1));
        report.record_failure(failure(9));

        assert_eq!(report.last_error().map(|f| f.slot), Some(DispatchSlot::Key(9)));
    }

    #[test]
    fn test_into_result_err() {
        let mut report = DispatchReport::new();
        report.record_success(false);
        report.record_failure(failure(4));

        match report.into_result() {
            Err(DispatchError::Batch {
                failed,
                total,
                last,
            }) => {
                assert_eq!(failed, 1);
                assert_eq!(total, 2);
                assert_eq!(last.slot, DispatchSlot::Key(4));
            }
            other => panic!("expected batch error, got {:?}", other),
        }
    }
}
