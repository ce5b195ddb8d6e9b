//! Core state machine types.
//!
//! This module contains the vocabulary shared by every lifecycle machine:
//! - `State` and `Event` traits for the table keys
//! - `FailureCounter` for counting discrete failure events
//! - Immutable transition history records
//!
//! Nothing in here knows about transition tables or tracers.

mod counter;
mod history;
mod state;

pub use counter::FailureCounter;
pub use history::{StateTransition, TransitionHistory};
pub use state::{Event, State};
