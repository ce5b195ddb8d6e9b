//! Transition history tracking.
//!
//! Provides immutable tracking of fired transitions over time, following
//! the same functional style as the rest of the core: recording returns a
//! new history instead of mutating the old one.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single fired transition.
///
/// Reentry transitions are recorded with `from == to`.
///
/// # Example
///
/// ```rust
/// use nodewatch::core::StateTransition;
/// use nodewatch::lifecycle::{ProcessEvent, ProcessState};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: ProcessState::Starting,
///     event: ProcessEvent::HealthCheckOk,
///     to: ProcessState::Available,
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_reentry());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Event> {
    /// The state being transitioned from
    pub from: S,
    /// The event that caused the transition
    pub event: E,
    /// The state being transitioned to
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl<S: State, E: Event> StateTransition<S, E> {
    /// Create a record stamped with the current time.
    pub fn now(from: S, event: E, to: S) -> Self {
        Self {
            from,
            event,
            to,
            timestamp: Utc::now(),
        }
    }

    /// Whether the transition re-entered its source state.
    pub fn is_reentry(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of fired transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added.
///
/// # Example
///
/// ```rust
/// use nodewatch::core::{StateTransition, TransitionHistory};
/// use nodewatch::lifecycle::{ProcessEvent, ProcessState};
///
/// let history = TransitionHistory::new()
///     .record(StateTransition::now(
///         ProcessState::WaitingForConfiguration,
///         ProcessEvent::ProcessPrepared,
///         ProcessState::Prepared,
///     ))
///     .record(StateTransition::now(
///         ProcessState::Prepared,
///         ProcessEvent::ProcessStarted,
///         ProcessState::Starting,
///     ));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], &ProcessState::Starting);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<S: State, E: Event> {
    transitions: Vec<StateTransition<S, E>>,
}

impl<S: State, E: Event> Default for TransitionHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> TransitionHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S, E>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Keep only the most recent `capacity` transitions.
    pub fn retain_last(&self, capacity: usize) -> Self {
        let skip = self.transitions.len().saturating_sub(capacity);
        Self {
            transitions: self.transitions[skip..].to_vec(),
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the
    /// `to` state of every transition, reentries included.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration from the first to the last recorded transition.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.last()
    }

    /// Get all transitions in the order they were recorded.
    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
