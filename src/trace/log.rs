//! Tracer that reports transitions through `tracing`.

use crate::core::{Event, State};
use crate::trace::tracer::Tracer;

/// Logs every notification, tagged with the supervised entity's name.
///
/// Triggers and ignored events go to `debug`, transitions to `info`, and
/// entering an error state to `warn`.
#[derive(Clone, Debug)]
pub struct LoggingTracer {
    entity: String,
}

impl LoggingTracer {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }
}

impl<S: State, E: Event> Tracer<S, E> for LoggingTracer {
    fn trigger(&self, state: &S, event: &E) {
        tracing::debug!(
            entity = %self.entity,
            state = state.name(),
            event = event.name(),
            "process event received"
        );
    }

    fn transition(&self, from: &S, event: &E, to: &S) {
        if to.is_error() && from != to {
            tracing::warn!(
                entity = %self.entity,
                from = from.name(),
                event = event.name(),
                to = to.name(),
                "process entered error state"
            );
        } else {
            tracing::info!(
                entity = %self.entity,
                from = from.name(),
                event = event.name(),
                to = to.name(),
                "process state transition"
            );
        }
    }

    fn ignored(&self, state: &S, event: &E) {
        tracing::debug!(
            entity = %self.entity,
            state = state.name(),
            event = event.name(),
            "process event ignored"
        );
    }
}
