//! The observer contract the engine notifies around each fire.

use crate::core::{Event, State};

/// Listener notified before and after each transition.
///
/// Tracers are for logging and metrics. They must not fire events on the
/// machine that calls them.
///
/// # Example
///
/// ```rust
/// use nodewatch::lifecycle::{ProcessEvent, ProcessState};
/// use nodewatch::trace::Tracer;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct FailureMetric {
///     failed: AtomicUsize,
/// }
///
/// impl Tracer<ProcessState, ProcessEvent> for FailureMetric {
///     fn trigger(&self, _state: &ProcessState, _event: &ProcessEvent) {}
///
///     fn transition(&self, _from: &ProcessState, _event: &ProcessEvent, to: &ProcessState) {
///         if *to == ProcessState::Failed {
///             self.failed.fetch_add(1, Ordering::Relaxed);
///         }
///     }
/// }
/// ```
pub trait Tracer<S: State, E: Event>: Send + Sync {
    /// Called before a permit, dynamic or reentry rule runs.
    fn trigger(&self, state: &S, event: &E);

    /// Called after the state changed and entry actions ran.
    fn transition(&self, from: &S, event: &E, to: &S);

    /// Called when an event was received but declared as ignored.
    fn ignored(&self, _state: &S, _event: &E) {}
}
