//! Explicitly ordered, priority-tagged event collections.
//!
//! An [`EventCollection`] keeps events in insertion order until [`sort`] is
//! called. Dispatch walks the *current* order and never sorts on its own,
//! so callers that want priority order sort first:
//!
//! ```rust
//! use cadence_events::{Event, EventCollection, EventResult};
//!
//! struct Record(&'static str);
//!
//! impl Event<Vec<&'static str>> for Record {
//!     fn execute(&self, log: &mut Vec<&'static str>) -> EventResult<Vec<()>> {
//!         log.push(self.0);
//!         Ok(vec![])
//!     }
//! }
//!
//! let mut collection = EventCollection::new();
//! collection.add_event(Record("late"), 50);
//! collection.add_event(Record("early"), 30);
//!
//! let mut log = Vec::new();
//! collection.dispatch(&mut log);
//! assert_eq!(log, vec!["late", "early"]);
//!
//! collection.sort();
//! let mut log = Vec::new();
//! collection.dispatch(&mut log);
//! assert_eq!(log, vec!["early", "late"]);
//! ```
//!
//! Heterogeneous events go in an `EventCollection<BoxedEvent<C, R>>`
//! (see [`BoxedEvent`]).
//!
//! [`sort`]: EventCollection::sort
//! [`BoxedEvent`]: crate::event::BoxedEvent

use std::fmt;
use std::slice;

use crate::config::DispatchConfig;
use crate::dispatch::run_sequence;
use crate::error::DispatchSlot;
use crate::event::Event;
use crate::report::DispatchReport;

/// One event and the priority it was registered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCollectionItem<E> {
    event: E,
    priority: i64,
}

impl<E> EventCollectionItem<E> {
    /// The registered event.
    pub fn event(&self) -> &E {
        &self.event
    }

    /// The priority the event was registered with.
    pub fn priority(&self) -> i64 {
        self.priority
    }
}

/// Ordered sequence of events tagged with integer priorities.
///
/// Lower priorities sort earlier. `highest_priority` is the running maximum
/// of every priority the collection has seen and never decreases.
#[derive(Clone)]
pub struct EventCollection<E> {
    items: Vec<EventCollectionItem<E>>,
    highest_priority: i64,
}

impl<E> Default for EventCollection<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            highest_priority: 0,
        }
    }
}

impl<E> EventCollection<E> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            highest_priority: 0,
        }
    }

    /// Append `event` with an explicit priority.
    ///
    /// The event goes to the end of the sequence regardless of `priority`.
    pub fn add_event(&mut self, event: E, priority: i64) {
        self.items.push(EventCollectionItem { event, priority });
        if priority > self.highest_priority {
            self.highest_priority = priority;
        }
    }

    /// Append `event` with the next free priority, `highest_priority + 1`.
    ///
    /// Saturates at `i64::MAX`.
    pub fn append_event(&mut self, event: E) {
        let priority = self.highest_priority.saturating_add(1);
        self.add_event(event, priority);
    }

    /// Stable-sort the sequence by ascending priority.
    ///
    /// Items with equal priority keep their relative order.
    pub fn sort(&mut self) {
        self.items.sort_by_key(|item| item.priority);
    }

    /// Whether the current order is ascending by priority.
    pub fn is_sorted(&self) -> bool {
        self.items
            .windows(2)
            .all(|pair| pair[0].priority <= pair[1].priority)
    }

    /// Largest priority seen so far, starting at 0.
    pub fn highest_priority(&self) -> i64 {
        self.highest_priority
    }

    /// Number of registered events.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no event is registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in their current order.
    pub fn iter(&self) -> slice::Iter<'_, EventCollectionItem<E>> {
        self.items.iter()
    }

    /// Priorities in the current order.
    pub fn priorities(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.priority).collect()
    }

    pub(crate) fn dispatch_with<C, R, F>(
        &self,
        ctx: &mut C,
        config: &DispatchConfig,
        callback: Option<F>,
    ) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R>,
        F: FnMut(Vec<R>),
    {
        tracing::trace!(
            events = self.items.len(),
            sorted = self.is_sorted(),
            "Dispatching collection"
        );

        run_sequence(
            self.items.iter().enumerate().map(|(index, item)| {
                (
                    DispatchSlot::Index {
                        index,
                        priority: item.priority,
                    },
                    &item.event,
                )
            }),
            ctx,
            config,
            callback,
        )
    }

    /// Dispatch every event in the current order, discarding results.
    pub fn dispatch<C, R>(&self, ctx: &mut C) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R>,
    {
        self.dispatch_with(ctx, &DispatchConfig::default(), None::<fn(Vec<R>)>)
    }

    /// Dispatch every event in the current order.
    ///
    /// `callback` runs once for every event that returned at least one value.
    pub fn dispatch_callback<C, R, F>(&self, ctx: &mut C, callback: F) -> DispatchReport
    where
        C: ?Sized,
        E: Event<C, R>,
        F: FnMut(Vec<R>),
    {
        self.dispatch_with(ctx, &DispatchConfig::default(), Some(callback))
    }
}

/// Free-function form of [`EventCollection::dispatch_callback`].
pub fn dispatch_collection_callback<C, R, E, F>(
    collection: &EventCollection<E>,
    ctx: &mut C,
    callback: F,
) -> DispatchReport
where
    C: ?Sized,
    E: Event<C, R>,
    F: FnMut(Vec<R>),
{
    collection.dispatch_callback(ctx, callback)
}

impl<E> Extend<(E, i64)> for EventCollection<E> {
    fn extend<T: IntoIterator<Item = (E, i64)>>(&mut self, iter: T) {
        for (event, priority) in iter {
            self.add_event(event, priority);
        }
    }
}

impl<'a, E> IntoIterator for &'a EventCollection<E> {
    type Item = &'a EventCollectionItem<E>;
    type IntoIter = slice::Iter<'a, EventCollectionItem<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> fmt::Debug for EventCollection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCollection")
            .field("len", &self.items.len())
            .field("priorities", &self.priorities())
            .field("highest_priority", &self.highest_priority)
            .finish()
    }
}
