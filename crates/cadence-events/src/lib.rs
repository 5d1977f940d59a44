//! Priority-ordered, synchronous event dispatch.
//!
//! Callers register [`Event`]s against integer priorities or map keys and
//! dispatch them, in a deterministic order, against a shared context. Values
//! returned by an event can be forwarded to a callback.
//!
//! # Key Components
//!
//! - [`Event`]: capability trait every event implements
//! - [`EventCollection`]: explicitly ordered `(event, priority)` sequence with
//!   explicit and auto-incrementing insertion and a stable [`sort`]
//! - [`dispatch_events`] / [`dispatch_events_callback`]: keyed dispatch in
//!   ascending key order
//! - [`dispatch_event`] / [`dispatch_event_callback`]: single-event dispatch
//! - [`Dispatcher`]: configured dispatch with a [`LastError`] slot
//!
//! # Failure Containment
//!
//! A failing or panicking event never aborts a batch. Each dispatch call
//! returns a [`DispatchReport`] listing the contained failures; a
//! [`Dispatcher`] additionally keeps the most recent one in its
//! [`LastError`].
//!
//! Dispatch is single-threaded and runs to completion. An `EventCollection`
//! has no internal locking; wrap it in a mutex if it is shared.
//!
//! [`sort`]: EventCollection::sort

pub mod collection;
pub mod config;
pub mod dispatch;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod invoke;
pub mod last_error;
pub mod report;

pub use collection::{dispatch_collection_callback, EventCollection, EventCollectionItem};
pub use config::{DispatchConfig, LastErrorPolicy};
pub use dispatch::{
    dispatch_event, dispatch_event_callback, dispatch_events, dispatch_events_callback,
};
pub use dispatcher::Dispatcher;
pub use error::{
    DispatchError, DispatchFailure, DispatchResult, DispatchSlot, EventError, EventResult,
};
pub use event::{event_fn, BoxedEvent, Event, FnEvent};
pub use invoke::invoke;
pub use last_error::LastError;
pub use report::DispatchReport;
