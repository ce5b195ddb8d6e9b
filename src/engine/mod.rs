//! Generic transition-table engine.
//!
//! A [`StateMachine`] holds its current state, an immutable table of
//! [`StateConfig`]s keyed by state and a single [`TracerAggregator`]
//! slot. Each state config maps events to a [`TransitionRule`]:
//!
//! - **Permit**: move to a fixed destination
//! - **PermitDynamic**: run an optional action, then resolve the destination
//! - **PermitReentry**: stay, but run the state's entry actions again
//! - **Ignore**: accept the event with no effect
//!
//! A missing rule is an error, surfaced as [`FireError::InvalidTransition`].
//!
//! [`TracerAggregator`]: crate::trace::TracerAggregator

mod error;
mod machine;
mod rule;

pub use error::FireError;
pub use machine::{FireOutcome, StateMachine};
pub use rule::{Action, Resolver, StateConfig, TransitionRule};
