//! Configured dispatcher with a caller-owned last-error slot.
//!
//! The free functions in [`crate::dispatch`] and the methods on
//! [`EventCollection`] use [`DispatchConfig::default`] and hand back a
//! report. A [`Dispatcher`] carries its own configuration and folds every
//! report into a [`LastError`] that callers can poll between calls.
//!
//! ```rust
//! use cadence_events::{
//!     event_fn, DispatchConfig, Dispatcher, EventError, EventResult, LastErrorPolicy,
//! };
//!
//! let mut dispatcher = Dispatcher::new(
//!     DispatchConfig::default().with_last_error(LastErrorPolicy::ClearOnSuccess),
//! );
//! let broken = event_fn("broken", |_: &mut ()| -> EventResult<Vec<()>> {
//!     Err(EventError::failed("nope"))
//! });
//! let fine = event_fn("fine", |_: &mut ()| -> EventResult<Vec<()>> { Ok(vec![]) });
//!
//! dispatcher.dispatch_event(&broken, &mut ());
//! assert!(dispatcher.last_error().is_set());
//!
//! dispatcher.dispatch_event(&fine, &mut ());
//! assert_eq!(dispatcher.last_error().message(), "");
//! ```

use crate::collection::EventCollection;
use crate::config::DispatchConfig;
use crate::dispatch::{dispatch_keyed, dispatch_single};
use crate::event::Event;
use crate::last_error::LastError;
use crate::report::DispatchReport;

/// Dispatches with a fixed configuration and remembers the last failure.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
    last_error: LastError,
}

impl Dispatcher {
    /// Create a dispatcher with an empty last-error slot.
    pub fn new(config: DispatchConfig) -> Self {
        let last_error = LastError::new(config.last_error);
        Self { config, last_error }
    }

    /// The configuration every call uses.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// The most recent contained failure, per the configured policy.
    pub fn last_error(&self) -> &LastError {
        &self.last_error
    }

    /// Reset the last-error slot.
    pub fn clear_last_error(&mut self) {
        self.last_error.clear();
    }

    fn settle(&mut self, report: DispatchReport) -> DispatchReport {
        self.last_error.absorb(&report);
        report
    }

    /// Keyed dispatch in ascending key order, discarding results.
    pub fn dispatch_events<'a, C, R, E, M>(&mut self, events: M, ctx: &mut C) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R> + ?Sized + 'a,
        M: IntoIterator<Item = (&'a i64, &'a E)>,
    {
        let report = dispatch_keyed(events, ctx, &self.config, None::<fn(Vec<R>)>);
        self.settle(report)
    }

    /// Keyed dispatch in ascending key order with a result callback.
    pub fn dispatch_events_callback<'a, C, R, E, M, F>(
        &mut self,
        events: M,
        ctx: &mut C,
        callback: F,
    ) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R> + ?Sized + 'a,
        M: IntoIterator<Item = (&'a i64, &'a E)>,
        F: FnMut(Vec<R>),
    {
        let report = dispatch_keyed(events, ctx, &self.config, Some(callback));
        self.settle(report)
    }

    /// Dispatch one event, discarding its results.
    pub fn dispatch_event<C, R, E>(&mut self, event: &E, ctx: &mut C) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R> + ?Sized,
    {
        let report = dispatch_single(event, ctx, &self.config, None::<fn(Vec<R>)>);
        self.settle(report)
    }

    /// Dispatch one event; `callback` runs once if it returned any values.
    pub fn dispatch_event_callback<C, R, E, F>(
        &mut self,
        event: &E,
        ctx: &mut C,
        callback: F,
    ) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R> + ?Sized,
        F: FnMut(Vec<R>),
    {
        let report = dispatch_single(event, ctx, &self.config, Some(callback));
        self.settle(report)
    }

    /// Dispatch a collection in its current order.
    pub fn dispatch_collection<C, R, E>(
        &mut self,
        collection: &EventCollection<E>,
        ctx: &mut C,
    ) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R>,
    {
        let report = collection.dispatch_with(ctx, &self.config, None::<fn(Vec<R>)>);
        self.settle(report)
    }

    /// Dispatch a collection in its current order with a result callback.
    pub fn dispatch_collection_callback<C, R, E, F>(
        &mut self,
        collection: &EventCollection<E>,
        ctx: &mut C,
        callback: F,
    ) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R>,
        F: FnMut(Vec<R>),
    {
        let report = collection.dispatch_with(ctx, &self.config, Some(callback));
        self.settle(report)
    }
}
