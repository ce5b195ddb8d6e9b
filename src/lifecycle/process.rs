//! The process lifecycle machine and its failure counters.

use crate::builder::{BuildError, StateMachineBuilder};
use crate::core::{FailureCounter, State};
use crate::engine::{FireError, FireOutcome, StateMachine};
use crate::lifecycle::config::{ConfigError, LifecycleConfig};
use crate::lifecycle::{ProcessEvent, ProcessState};
use crate::trace::{LoggingTracer, TracerAggregator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when creating a [`ProcessLifecycle`].
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Failure counters owned by one lifecycle and shared with its table.
#[derive(Clone, Debug)]
pub struct LifecycleCounters {
    /// Failed health checks while `STARTING`.
    pub startup_failures: Arc<FailureCounter>,

    /// Failed health checks while `NOT_RESPONDING`.
    pub rest_failures: Arc<FailureCounter>,

    /// Restarts out of `TERMINATED`. Counted, but no rule consults it yet.
    pub reboot_failures: Option<Arc<FailureCounter>>,
}

impl LifecycleCounters {
    fn from_config(config: &LifecycleConfig) -> Self {
        Self {
            startup_failures: Arc::new(FailureCounter::one_based(
                config.startup_failure_threshold,
            )),
            rest_failures: Arc::new(FailureCounter::one_based(config.rest_failure_threshold)),
            reboot_failures: config
                .reboot_failure_threshold
                .map(|threshold| Arc::new(FailureCounter::one_based(threshold))),
        }
    }
}

/// Serializable snapshot reported to status consumers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStatus {
    pub name: String,
    pub state: ProcessState,
    pub startup_failures: u32,
    pub rest_failures: u32,
    pub reboot_failures: Option<u32>,
}

/// Lifecycle machine of one supervised process.
///
/// # Example
///
/// ```rust
/// use nodewatch::lifecycle::{ProcessEvent, ProcessLifecycle, ProcessState};
///
/// let mut opensearch = ProcessLifecycle::opensearch().unwrap();
/// assert_eq!(opensearch.current_state(), &ProcessState::WaitingForConfiguration);
///
/// opensearch.fire(ProcessEvent::ProcessStarted).unwrap();
/// for _ in 0..4 {
///     opensearch.fire(ProcessEvent::HealthCheckFailed).unwrap();
/// }
/// assert_eq!(opensearch.current_state(), &ProcessState::Starting);
///
/// opensearch.fire(ProcessEvent::HealthCheckOk).unwrap();
/// assert_eq!(opensearch.current_state(), &ProcessState::Available);
/// ```
pub struct ProcessLifecycle {
    name: String,
    machine: StateMachine<ProcessState, ProcessEvent>,
    counters: LifecycleCounters,
}

impl ProcessLifecycle {
    /// Build the lifecycle table for `config`.
    ///
    /// A [`LoggingTracer`] named after the config is registered up front.
    pub fn new(config: LifecycleConfig) -> Result<Self, LifecycleError> {
        config.validate()?;

        let counters = LifecycleCounters::from_config(&config);
        let mut machine = transition_table(&counters).build()?;
        machine
            .tracers_mut()
            .register(Arc::new(LoggingTracer::new(config.name.clone())));

        Ok(Self {
            name: config.name,
            machine,
            counters,
        })
    }

    /// Lifecycle of the data-node process.
    pub fn datanode() -> Result<Self, LifecycleError> {
        Self::new(LifecycleConfig::datanode())
    }

    /// Lifecycle of the search-engine process.
    pub fn opensearch() -> Result<Self, LifecycleError> {
        Self::new(LifecycleConfig::opensearch())
    }

    pub fn fire(&mut self, event: ProcessEvent) -> Result<FireOutcome<ProcessState>, FireError> {
        self.machine.fire(event)
    }

    pub fn current_state(&self) -> &ProcessState {
        self.machine.current_state()
    }

    pub fn is_in_state(&self, state: ProcessState) -> bool {
        self.machine.is_in_state(&state)
    }

    pub fn can_fire(&self, event: ProcessEvent) -> bool {
        self.machine.can_fire(&event)
    }

    pub fn permitted_events(&self) -> Vec<ProcessEvent> {
        self.machine.permitted_events().into_iter().copied().collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counters(&self) -> &LifecycleCounters {
        &self.counters
    }

    pub fn machine(&self) -> &StateMachine<ProcessState, ProcessEvent> {
        &self.machine
    }

    pub fn tracers(&self) -> &TracerAggregator<ProcessState, ProcessEvent> {
        self.machine.tracers()
    }

    pub fn tracers_mut(&mut self) -> &mut TracerAggregator<ProcessState, ProcessEvent> {
        self.machine.tracers_mut()
    }

    pub fn status(&self) -> ProcessStatus {
        ProcessStatus {
            name: self.name.clone(),
            state: *self.current_state(),
            startup_failures: self.counters.startup_failures.count(),
            rest_failures: self.counters.rest_failures.count(),
            reboot_failures: self
                .counters
                .reboot_failures
                .as_ref()
                .map(|counter| counter.count()),
        }
    }
}

fn failure_guarded(
    counter: &Arc<FailureCounter>,
    tolerated: ProcessState,
) -> impl Fn() -> ProcessState + Send + Sync + 'static {
    let counter = Arc::clone(counter);
    move || {
        if counter.failed_too_many_times() {
            ProcessState::Failed
        } else {
            tolerated
        }
    }
}

fn incrementing(counter: &Arc<FailureCounter>) -> impl Fn() + Send + Sync + 'static {
    let counter = Arc::clone(counter);
    move || counter.increment()
}

fn transition_table(
    counters: &LifecycleCounters,
) -> StateMachineBuilder<ProcessState, ProcessEvent> {
    use ProcessEvent::*;
    use ProcessState::*;

    let rest_on_entry = Arc::clone(&counters.rest_failures);
    let reboot_on_entry = counters.reboot_failures.clone();

    StateMachineBuilder::new()
        .initial(WaitingForConfiguration)
        .states(ProcessState::ALL)
        .events(ProcessEvent::ALL)
        .configure(WaitingForConfiguration, |state| {
            state
                .permit(ProcessPrepared, Prepared)
                .permit(ProcessStarted, Starting)
                .ignore(ProcessStopped)
                .ignore(HealthCheckFailed)
        })
        .configure(Prepared, |state| {
            state
                .permit(ProcessStarted, Starting)
                .permit(ProcessTerminated, Terminated)
                .permit(ProcessStopped, Terminated)
                .ignore(HealthCheckFailed)
        })
        .configure(Starting, |state| {
            state
                .permit_dynamic_with(
                    HealthCheckFailed,
                    failure_guarded(&counters.startup_failures, Starting),
                    incrementing(&counters.startup_failures),
                )
                .permit(HealthCheckOk, Available)
                .permit(ProcessStopped, Terminated)
                .permit(ProcessTerminated, Terminated)
        })
        .configure(Available, |state| {
            state
                .on_entry(move || {
                    rest_on_entry.reset();
                    if let Some(reboots) = &reboot_on_entry {
                        reboots.reset();
                    }
                })
                .permit_reentry(HealthCheckOk)
                .permit(HealthCheckFailed, NotResponding)
                .permit(ProcessStopped, Terminated)
                .permit(ProcessTerminated, Terminated)
                .permit(ProcessRemove, Removing)
                .ignore(ProcessStarted)
        })
        .configure(NotResponding, |state| {
            state
                .permit_dynamic_with(
                    HealthCheckFailed,
                    failure_guarded(&counters.rest_failures, NotResponding),
                    incrementing(&counters.rest_failures),
                )
                .permit(HealthCheckOk, Available)
                .permit(ProcessStopped, Terminated)
                .permit(ProcessTerminated, Terminated)
        })
        .configure(Failed, |state| {
            state
                .ignore(HealthCheckFailed)
                .permit(HealthCheckOk, Available)
                .permit(ProcessStopped, Terminated)
                .permit(ProcessTerminated, Terminated)
        })
        .configure(Terminated, |state| {
            let state = match &counters.reboot_failures {
                Some(reboots) => {
                    state.permit_dynamic_with(ProcessStarted, || Starting, incrementing(reboots))
                }
                None => state.permit(ProcessStarted, Starting),
            };
            state
                .ignore(HealthCheckFailed)
                .ignore(ProcessStopped)
                .ignore(ProcessTerminated)
        })
        .configure(Removing, |state| {
            state
                .ignore(HealthCheckOk)
                .permit(HealthCheckFailed, Failed)
                .permit(ProcessStopped, Removed)
        })
        .configure(Removed, |state| {
            state
                .permit(Reset, WaitingForConfiguration)
                .ignore(ProcessStopped)
        })
}

impl std::fmt::Debug for ProcessLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessLifecycle")
            .field("name", &self.name)
            .field("state", &self.current_state().name())
            .field("counters", &self.counters)
            .finish()
    }
}
