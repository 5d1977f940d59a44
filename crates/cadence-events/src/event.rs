//! The [`Event`] capability trait and closure-backed events.
//!
//! An event is a unit of deferred behavior executed against a caller-owned
//! context. Every event of one dispatch call sees the same `&mut C`, so
//! events communicate with the caller by mutating it. Returned values are
//! handed to the dispatch callback, if any.
//!
//! # Example
//!
//! ```rust
//! use cadence_events::{Event, EventResult};
//!
//! struct Counter {
//!     hits: u32,
//! }
//!
//! struct Bump;
//!
//! impl Event<Counter, u32> for Bump {
//!     fn execute(&self, ctx: &mut Counter) -> EventResult<Vec<u32>> {
//!         ctx.hits += 1;
//!         Ok(vec![ctx.hits])
//!     }
//! }
//!
//! let mut ctx = Counter { hits: 0 };
//! assert_eq!(Bump.execute(&mut ctx), Ok(vec![1]));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::EventResult;

/// Behavior dispatched against a context of type `C`, yielding zero or more `R`.
pub trait Event<C: ?Sized, R = ()> {
    /// Name used in logs and failure reports.
    ///
    /// Defaults to the concrete type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Run the event against the shared context.
    ///
    /// An empty vector means the event produced no values and no callback
    /// is invoked for it.
    fn execute(&self, ctx: &mut C) -> EventResult<Vec<R>>;
}

impl<C: ?Sized, R, T: Event<C, R> + ?Sized> Event<C, R> for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&self, ctx: &mut C) -> EventResult<Vec<R>> {
        (**self).execute(ctx)
    }
}

impl<C: ?Sized, R, T: Event<C, R> + ?Sized> Event<C, R> for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&self, ctx: &mut C) -> EventResult<Vec<R>> {
        (**self).execute(ctx)
    }
}

impl<C: ?Sized, R, T: Event<C, R> + ?Sized> Event<C, R> for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&self, ctx: &mut C) -> EventResult<Vec<R>> {
        (**self).execute(ctx)
    }
}

/// Boxed event, for collections mixing concrete event types.
pub type BoxedEvent<C, R = ()> = Box<dyn Event<C, R>>;

/// An event backed by a named closure.
pub struct FnEvent<F> {
    name: String,
    func: F,
}

impl<F> FnEvent<F> {
    /// Wrap a closure as an event.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<C: ?Sized, R, F> Event<C, R> for FnEvent<F>
where
    F: Fn(&mut C) -> EventResult<Vec<R>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &mut C) -> EventResult<Vec<R>> {
        (self.func)(ctx)
    }
}

impl<F> fmt::Debug for FnEvent<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEvent").field("name", &self.name).finish()
    }
}

/// Shorthand for [`FnEvent::new`].
pub fn event_fn<C, R, F>(name: impl Into<String>, func: F) -> FnEvent<F>
where
    C: ?Sized,
    F: Fn(&mut C) -> EventResult<Vec<R>>,
{
    FnEvent::new(name, func)
}
