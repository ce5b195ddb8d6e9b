//! Errors returned by [`StateMachine::fire`](crate::engine::StateMachine::fire).

use thiserror::Error;

/// Errors that can occur when firing an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireError {
    /// The current state declares no rule for the event. This is a driver
    /// bug or a gap in the transition table, never a transient condition.
    #[error("No transition for event '{event}' in state '{state}'")]
    InvalidTransition { state: String, event: String },
}
