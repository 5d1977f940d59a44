//! Single-event invocation with failure containment.
//!
//! Every dispatch path funnels through [`invoke`]. It runs the event once,
//! turns a panic into [`EventError::Panicked`] when panic trapping is on,
//! and logs failures. It never propagates a failure past its return value.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::config::DispatchConfig;
use crate::error::{EventError, EventResult};
use crate::event::Event;

/// Invoke `event` against `ctx` once and return whatever it produced.
pub fn invoke<C, R, E>(event: &E, ctx: &mut C, config: &DispatchConfig) -> EventResult<Vec<R>>
where
    C: ?Sized,
    E: Event<C, R> + ?Sized,
{
    tracing::debug!(event = %event.name(), "Invoking event");

    let outcome = if config.catch_panics {
        panic::catch_unwind(AssertUnwindSafe(|| event.execute(ctx)))
            .unwrap_or_else(|payload| Err(EventError::panicked(panic_message(&*payload))))
    } else {
        event.execute(ctx)
    };

    match &outcome {
        Ok(values) => {
            if config.trace_results {
                tracing::trace!(event = %event.name(), values = values.len(), "Event returned");
            }
        }
        Err(e) => {
            tracing::warn!(
                event = %event.name(),
                category = e.category(),
                error = %e,
                "Event invocation failed"
            );
        }
    }

    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
