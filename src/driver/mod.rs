//! The edge between the outside world and a lifecycle.
//!
//! Collaborators report [`Observation`]s; a [`ProcessSupervisor`] turns each
//! into a [`ProcessEvent`](crate::lifecycle::ProcessEvent) and fires it.

mod observation;
mod supervisor;

pub use observation::Observation;
pub use supervisor::ProcessSupervisor;
