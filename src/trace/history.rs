//! Tracer that keeps a bounded transition history.

use crate::core::{Event, State, StateTransition, TransitionHistory};
use crate::trace::tracer::Tracer;
use std::sync::{Mutex, PoisonError};

/// Default number of transitions kept by [`HistoryTracer::new`].
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Records every transition, reentries included, keeping the most recent
/// `capacity` entries. Ignored events are not recorded.
///
/// Register it through an `Arc` and keep a clone to read the history:
///
/// ```rust
/// use nodewatch::lifecycle::{LifecycleConfig, ProcessEvent, ProcessLifecycle, ProcessState};
/// use nodewatch::trace::HistoryTracer;
/// use std::sync::Arc;
///
/// let mut lifecycle = ProcessLifecycle::new(LifecycleConfig::opensearch()).unwrap();
/// let history = Arc::new(HistoryTracer::<ProcessState, ProcessEvent>::new());
/// lifecycle.tracers_mut().register(history.clone());
///
/// lifecycle.fire(ProcessEvent::ProcessStarted).unwrap();
/// assert_eq!(history.history().len(), 1);
/// ```
pub struct HistoryTracer<S: State, E: Event> {
    capacity: usize,
    history: Mutex<TransitionHistory<S, E>>,
}

impl<S: State, E: Event> HistoryTracer<S, E> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            history: Mutex::new(TransitionHistory::new()),
        }
    }

    /// Snapshot of the recorded transitions.
    pub fn history(&self) -> TransitionHistory<S, E> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<S: State, E: Event> Default for HistoryTracer<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> Tracer<S, E> for HistoryTracer<S, E> {
    fn trigger(&self, _state: &S, _event: &E) {}

    fn transition(&self, from: &S, event: &E, to: &S) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        let record = StateTransition::now(from.clone(), event.clone(), to.clone());
        *history = history.record(record).retain_last(self.capacity);
    }
}
