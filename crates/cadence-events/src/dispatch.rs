//! Keyed and single-event dispatch.
//!
//! Keyed dispatch takes any map from `i64` to event (`&HashMap`, `&BTreeMap`,
//! or anything yielding `(&i64, &E)`) and always runs events in ascending key
//! order, independent of the map's iteration order.
//!
//! ```rust
//! use std::collections::HashMap;
//! use cadence_events::{dispatch_events, Event, EventResult};
//!
//! struct Push(&'static str);
//!
//! impl Event<Vec<&'static str>> for Push {
//!     fn execute(&self, log: &mut Vec<&'static str>) -> EventResult<Vec<()>> {
//!         log.push(self.0);
//!         Ok(vec![])
//!     }
//! }
//!
//! let mut events = HashMap::new();
//! events.insert(5, Push("second"));
//! events.insert(1, Push("first"));
//!
//! let mut log = Vec::new();
//! let report = dispatch_events(&events, &mut log);
//!
//! assert!(report.is_clean());
//! assert_eq!(log, vec!["first", "second"]);
//! ```

use crate::config::DispatchConfig;
use crate::error::{DispatchFailure, DispatchSlot};
use crate::event::Event;
use crate::invoke::invoke;
use crate::report::DispatchReport;

/// Invoke each event in the given order, routing non-empty results to `on_values`.
///
/// With `on_values` set to `None` results are dropped and no callback is
/// counted. A failing event is recorded in the report and the loop moves on.
pub(crate) fn run_sequence<'a, C, R, E, I, F>(
    items: I,
    ctx: &mut C,
    config: &DispatchConfig,
    mut on_values: Option<F>,
) -> DispatchReport
where
    C: ?Sized,
    E: Event<C, R> + ?Sized + 'a,
    I: IntoIterator<Item = (DispatchSlot, &'a E)>,
    F: FnMut(Vec<R>),
{
    let mut report = DispatchReport::new();

    for (slot, event) in items {
        match invoke(event, ctx, config) {
            Ok(values) if values.is_empty() => report.record_success(false),
            Ok(values) => match on_values.as_mut() {
                Some(callback) => {
                    callback(values);
                    report.record_success(true);
                }
                None => report.record_success(false),
            },
            Err(error) => {
                report.record_failure(DispatchFailure::new(slot, event.name(), error));
            }
        }
    }

    if !report.is_clean() {
        tracing::debug!(
            dispatched = report.dispatched(),
            failed = report.failures().len(),
            "Dispatch finished with contained failures"
        );
    }

    report
}

/// Snapshot a keyed map in ascending key order.
pub(crate) fn ascending_keys<'a, E, M>(events: M) -> Vec<(i64, &'a E)>
where
    E: ?Sized + 'a,
    M: IntoIterator<Item = (&'a i64, &'a E)>,
{
    let mut ordered: Vec<(i64, &'a E)> = events.into_iter().map(|(k, e)| (*k, e)).collect();
    ordered.sort_by_key(|(key, _)| *key);
    ordered
}

pub(crate) fn dispatch_keyed<'a, C, R, E, M, F>(
    events: M,
    ctx: &mut C,
    config: &DispatchConfig,
    callback: Option<F>,
) -> DispatchReport
where
    C: ?Sized,
    E: Event<C, R> + ?Sized + 'a,
    M: IntoIterator<Item = (&'a i64, &'a E)>,
    F: FnMut(Vec<R>),
{
    let ordered = ascending_keys(events);
    run_sequence(
        ordered
            .into_iter()
            .map(|(key, event)| (DispatchSlot::Key(key), event)),
        ctx,
        config,
        callback,
    )
}

/// Dispatch a keyed map of events in ascending key order, discarding results.
pub fn dispatch_events<'a, C, R, E, M>(events: M, ctx: &mut C) -> DispatchReport
where
    C: ?Sized,
    E: Event<C, R> + ?Sized + 'a,
    M: IntoIterator<Item = (&'a i64, &'a E)>,
{
    dispatch_keyed(events, ctx, &DispatchConfig::default(), None::<fn(Vec<R>)>)
}

/// Dispatch a keyed map of events in ascending key order.
///
/// `callback` runs once for every event that returned at least one value.
pub fn dispatch_events_callback<'a, C, R, E, M, F>(
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
    dispatch_keyed(events, ctx, &DispatchConfig::default(), Some(callback))
}

pub(crate) fn dispatch_single<C, R, E, F>(
    event: &E,
    ctx: &mut C,
    config: &DispatchConfig,
    callback: Option<F>,
) -> DispatchReport
where
    C: ?Sized,
    E: Event<C, R> + ?Sized,
    F: FnMut(Vec<R>),
{
    run_sequence(
        std::iter::once((DispatchSlot::Single, event)),
        ctx,
        config,
        callback,
    )
}

/// Dispatch one event, discarding its results.
pub fn dispatch_event<C, R, E>(event: &E, ctx: &mut C) -> DispatchReport
where
    C: ?Sized,
    E: Event<C, R> + ?Sized,
{
    dispatch_single(event, ctx, &DispatchConfig::default(), None::<fn(Vec<R>)>)
}

/// Dispatch one event; `callback` runs once if it returned any values.
pub fn dispatch_event_callback<C, R, E, F>(event: &E, ctx: &mut C, callback: F) -> DispatchReport
where
    C: ?Sized,
    E: Event<C, R> + ?Sized,
    F: FnMut(Vec<R>),
{
    dispatch_single(event, ctx, &DispatchConfig::default(), Some(callback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EventError, EventResult};
    use crate::event::{event_fn, BoxedEvent};
    use std::collections::{BTreeMap, HashMap};

    fn recorder(tag: &'static str) -> BoxedEvent<Vec<&'static str>, &'static str> {
        Box::new(event_fn(
            tag,
            move |log: &mut Vec<&'static str>| -> EventResult<Vec<&'static str>> {
                log.push(tag);
                Ok(vec![tag])
            },
        ))
    }

    fn silent(tag: &'static str) -> BoxedEvent<Vec<&'static str>, &'static str> {
        Box::new(event_fn(
            tag,
            move |log: &mut Vec<&'static str>| -> EventResult<Vec<&'static str>> {
                log.push(tag);
                Ok(vec![])
            },
        ))
    }

    fn failing(tag: &'static str) -> BoxedEvent<Vec<&'static str>, &'static str> {
        Box::new(event_fn(
            tag,
            move |_: &mut Vec<&'static str>| -> EventResult<Vec<&'static str>> {
                Err(EventError::failed(tag))
            },
        ))
    }

    #[test]
    fn test_keyed_dispatch_ascending_order() {
        let mut events = HashMap::new();
        for (key, tag) in [
            (40_i64, "40"),
            (-3, "-3"),
            (7, "7"),
            (0, "0"),
            (1000, "1000"),
            (12, "12"),
        ] {
            events.insert(key, recorder(tag));
        }
        let mut log = Vec::new();

        let report = dispatch_events(&events, &mut log);

        assert_eq!(log, vec!["-3", "0", "7", "12", "40", "1000"]);
        assert_eq!(report.dispatched(), 6);
        assert!(report.is_clean());
    }

    #[test]
    fn test_keyed_dispatch_accepts_btree_map() {
        let mut events = BTreeMap::new();
        events.insert(5, recorder("a"));
        events.insert(1, recorder("b"));
        let mut log = Vec::new();

        dispatch_events(&events, &mut log);

        assert_eq!(log, vec!["b", "a"]);
    }

    #[test]
    fn test_keyed_callback_skips_empty_results() {
        let mut events = HashMap::new();
        events.insert(1, recorder("one"));
        events.insert(2, silent("two"));
        events.insert(3, recorder("three"));
        let mut log = Vec::new();
        let mut seen = Vec::new();

        let report = dispatch_events_callback(&events, &mut log, |values| seen.extend(values));

        assert_eq!(seen, vec!["one", "three"]);
        assert_eq!(log, vec!["one", "two", "three"]);
        assert_eq!(report.callbacks(), 2);
    }

    #[test]
    fn test_keyed_dispatch_without_callback_counts_no_callbacks() {
        let mut events = HashMap::new();
        events.insert(1, recorder("one"));
        events.insert(2, silent("two"));
        events.insert(3, recorder("three"));
        let mut log = Vec::new();

        let report = dispatch_events(&events, &mut log);

        assert_eq!(log, vec!["one", "two", "three"]);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.callbacks(), 0);
    }

    #[test]
    fn test_keyed_failure_does_not_halt_batch() {
        let mut events = HashMap::new();
        events.insert(1, recorder("before"));
        events.insert(2, failing("broken"));
        events.insert(3, recorder("after"));
        let mut log = Vec::new();

        let report = dispatch_events(&events, &mut log);

        assert_eq!(log, vec!["before", "after"]);
        assert_eq!(report.dispatched(), 3);
        assert_eq!(report.failures().len(), 1);
        let failure = report.last_error().unwrap();
        assert_eq!(failure.slot, DispatchSlot::Key(2));
        assert_eq!(failure.event, "broken");
        assert_eq!(failure.error, EventError::failed("broken"));
    }

    #[test]
    fn test_keyed_empty_map() {
        let events: HashMap<i64, BoxedEvent<Vec<&'static str>, &'static str>> = HashMap::new();
        let mut log = Vec::new();

        let report = dispatch_events(&events, &mut log);

        assert_eq!(report.dispatched(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_single_dispatch() {
        let mut log = Vec::new();
        let report = dispatch_event(&recorder("solo"), &mut log);

        assert_eq!(log, vec!["solo"]);
        assert_eq!(report.dispatched(), 1);
        assert_eq!(report.callbacks(), 0);
    }

    #[test]
    fn test_single_callback_exactly_once() {
        let mut log = Vec::new();
        let mut calls = 0;

        dispatch_event_callback(&recorder("solo"), &mut log, |values| {
            assert_eq!(values, vec!["solo"]);
            calls += 1;
        });

        assert_eq!(calls, 1);
    }

    #[test]
    fn test_single_callback_skipped_without_results() {
        let mut log = Vec::new();
        let mut calls = 0;

        dispatch_event_callback(&silent("quiet"), &mut log, |_| calls += 1);

        assert_eq!(calls, 0);
        assert_eq!(log, vec!["quiet"]);
    }

    #[test]
    fn test_single_failure_reported() {
        let mut log = Vec::new();
        let report = dispatch_event(&failing("nope"), &mut log);

        assert_eq!(
            report.last_error().map(|f| f.slot),
            Some(DispatchSlot::Single)
        );
    }

    #[test]
    fn test_ascending_keys_snapshot() {
        let mut events = HashMap::new();
        events.insert(3_i64, "c");
        events.insert(-1, "a");
        events.insert(2, "b");

        let ordered: Vec<_> = ascending_keys(&events)
            .into_iter()
            .map(|(k, v)| (k, *v))
            .collect();

        assert_eq!(ordered, vec![(-1, "a"), (2, "b"), (3, "c")]);
    }
}
