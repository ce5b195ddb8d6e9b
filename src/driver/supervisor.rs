//! Serialized event delivery for one supervised process.

use crate::driver::observation::Observation;
use crate::engine::{FireError, FireOutcome};
use crate::lifecycle::{ProcessLifecycle, ProcessState, ProcessStatus};

/// Feeds observations about one entity into its lifecycle.
///
/// `observe` takes `&mut self`, so sharing a supervisor across tasks means
/// wrapping it in a lock such as `tokio::sync::Mutex`.
///
/// # Example
///
/// ```rust
/// use nodewatch::driver::{Observation, ProcessSupervisor};
/// use nodewatch::lifecycle::{ProcessLifecycle, ProcessState};
///
/// let mut supervisor = ProcessSupervisor::new(ProcessLifecycle::datanode().unwrap());
/// supervisor.observe(Observation::ProcessStarted).unwrap();
/// supervisor.observe(Observation::HealthCheckOk).unwrap();
/// assert_eq!(supervisor.current_state(), ProcessState::Available);
///
/// // Out of protocol: the caller decides how to carry on.
/// assert!(supervisor.observe(Observation::Reset).is_err());
/// assert_eq!(supervisor.current_state(), ProcessState::Available);
/// ```
#[derive(Debug)]
pub struct ProcessSupervisor {
    lifecycle: ProcessLifecycle,
}

impl ProcessSupervisor {
    pub fn new(lifecycle: ProcessLifecycle) -> Self {
        Self { lifecycle }
    }

    /// Classify `observation` and fire the resulting event.
    ///
    /// A rejected event is logged at `error` and returned; the lifecycle
    /// stays where it was.
    pub fn observe(
        &mut self,
        observation: Observation,
    ) -> Result<FireOutcome<ProcessState>, FireError> {
        let event = observation.to_event();
        tracing::debug!(
            entity = %self.lifecycle.name(),
            state = %self.lifecycle.current_state(),
            %observation,
            %event,
            "observation received"
        );

        self.lifecycle.fire(event).inspect_err(|err| {
            tracing::error!(
                entity = %self.lifecycle.name(),
                %observation,
                error = %err,
                "observation rejected by lifecycle"
            );
        })
    }

    pub fn current_state(&self) -> ProcessState {
        *self.lifecycle.current_state()
    }

    pub fn status(&self) -> ProcessStatus {
        self.lifecycle.status()
    }

    pub fn lifecycle(&self) -> &ProcessLifecycle {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut ProcessLifecycle {
        &mut self.lifecycle
    }

    pub fn into_lifecycle(self) -> ProcessLifecycle {
        self.lifecycle
    }
}
