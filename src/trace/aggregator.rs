//! Fan-out over the tracers registered on one machine.

use crate::core::{Event, State};
use crate::trace::tracer::Tracer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Handle returned by [`TracerAggregator::register`], used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TracerId(Uuid);

impl TracerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TracerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered list of tracers behind the machine's single tracer slot.
///
/// Every call is forwarded to each registered tracer in registration
/// order. Registration changes are only expected between `fire` calls.
pub struct TracerAggregator<S: State, E: Event> {
    tracers: Vec<(TracerId, Arc<dyn Tracer<S, E>>)>,
}

impl<S: State, E: Event> TracerAggregator<S, E> {
    pub fn new() -> Self {
        Self {
            tracers: Vec::new(),
        }
    }

    /// Append a tracer; it receives every notification from now on.
    pub fn register(&mut self, tracer: Arc<dyn Tracer<S, E>>) -> TracerId {
        let id = TracerId::new();
        self.tracers.push((id, tracer));
        id
    }

    /// Remove a tracer. Returns `false` if the id is not registered.
    pub fn unregister(&mut self, id: TracerId) -> bool {
        let before = self.tracers.len();
        self.tracers.retain(|(registered, _)| *registered != id);
        self.tracers.len() != before
    }

    pub fn len(&self) -> usize {
        self.tracers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracers.is_empty()
    }
}

impl<S: State, E: Event> Default for TracerAggregator<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> Tracer<S, E> for TracerAggregator<S, E> {
    fn trigger(&self, state: &S, event: &E) {
        for (_, tracer) in &self.tracers {
            tracer.trigger(state, event);
        }
    }

    fn transition(&self, from: &S, event: &E, to: &S) {
        for (_, tracer) in &self.tracers {
            tracer.transition(from, event, to);
        }
    }

    fn ignored(&self, state: &S, event: &E) {
        for (_, tracer) in &self.tracers {
            tracer.ignored(state, event);
        }
    }
}
