//! Nodewatch: lifecycle state machines for supervised node processes
//!
//! A data node runs and watches a search-engine process. Both processes are
//! tracked by the same reactive state machine: collaborators report
//! discrete events (process started, health check failed, removal
//! requested, ...) and the machine moves between lifecycle states, using
//! failure counters to tolerate transient errors before declaring a process
//! `FAILED`.
//!
//! # Core Concepts
//!
//! - **Transition table**: per-state rules (`Permit`, `PermitDynamic`,
//!   `PermitReentry`, `Ignore`) built once and never mutated
//! - **Failure counters**: thresholded counters consulted by dynamic rules
//! - **Tracers**: observers notified around every transition through a
//!   per-machine aggregator
//!
//! # Example
//!
//! ```rust
//! use nodewatch::lifecycle::{ProcessEvent, ProcessLifecycle, ProcessState};
//!
//! let mut datanode = ProcessLifecycle::datanode().unwrap();
//!
//! datanode.fire(ProcessEvent::ProcessPrepared).unwrap();
//! datanode.fire(ProcessEvent::ProcessStarted).unwrap();
//! datanode.fire(ProcessEvent::HealthCheckOk).unwrap();
//! assert_eq!(datanode.current_state(), &ProcessState::Available);
//!
//! // Three failed checks are tolerated, the fourth one is not.
//! for _ in 0..3 {
//!     datanode.fire(ProcessEvent::HealthCheckFailed).unwrap();
//! }
//! assert_eq!(datanode.current_state(), &ProcessState::NotResponding);
//! datanode.fire(ProcessEvent::HealthCheckFailed).unwrap();
//! assert_eq!(datanode.current_state(), &ProcessState::Failed);
//! ```

pub mod builder;
pub mod core;
pub mod driver;
pub mod engine;
pub mod lifecycle;
pub mod trace;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use core::{Event, FailureCounter, State};
pub use driver::{Observation, ProcessSupervisor};
pub use engine::{FireError, FireOutcome, StateMachine};
pub use lifecycle::{LifecycleConfig, ProcessEvent, ProcessLifecycle, ProcessState};
pub use trace::{Tracer, TracerAggregator};
