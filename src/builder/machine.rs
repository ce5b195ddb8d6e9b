//! Builder for constructing state machines.

use crate::builder::error::{BuildError, TableViolation};
use crate::core::{Event, State};
use crate::engine::{StateConfig, StateMachine};
use std::collections::HashMap;
use stillwater::validation::Validation;

type Check = Validation<(), Vec<TableViolation>>;

/// Builder for constructing state machines with a fluent API.
///
/// The table is built once and validated as a whole: [`build`](Self::build)
/// reports every violation it finds rather than stopping at the first.
///
/// # Example
///
/// ```rust
/// use nodewatch::builder::StateMachineBuilder;
/// use nodewatch::lifecycle::{ProcessEvent, ProcessState};
///
/// let mut machine = StateMachineBuilder::new()
///     .initial(ProcessState::Terminated)
///     .states(ProcessState::ALL)
///     .events(ProcessEvent::ALL)
///     .configure(ProcessState::Terminated, |state| {
///         state
///             .permit(ProcessEvent::ProcessStarted, ProcessState::Starting)
///             .ignore(ProcessEvent::ProcessStopped)
///     })
///     .configure(ProcessState::Starting, |state| {
///         state.permit(ProcessEvent::HealthCheckOk, ProcessState::Available)
///     })
///     .build()
///     .unwrap();
///
/// machine.fire(ProcessEvent::ProcessStarted).unwrap();
/// assert_eq!(machine.current_state(), &ProcessState::Starting);
/// ```
pub struct StateMachineBuilder<S: State, E: Event> {
    initial: Option<S>,
    states: Option<Vec<S>>,
    events: Option<Vec<E>>,
    configs: HashMap<S, StateConfig<S, E>>,
    strict: bool,
}

impl<S: State, E: Event> StateMachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: None,
            events: None,
            configs: HashMap::new(),
            strict: false,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare the closed set of states.
    pub fn states(mut self, states: &[S]) -> Self {
        self.states = Some(states.to_vec());
        self
    }

    /// Declare the closed set of events.
    pub fn events(mut self, events: &[E]) -> Self {
        self.events = Some(events.to_vec());
        self
    }

    /// Add rules and entry actions to `state`. Configuring the same state
    /// twice extends its existing config.
    pub fn configure<F>(mut self, state: S, configure: F) -> Self
    where
        F: FnOnce(StateConfig<S, E>) -> StateConfig<S, E>,
    {
        let existing = self.configs.remove(&state).unwrap_or_default();
        self.configs.insert(state, configure(existing));
        self
    }

    /// Require a rule for every declared `(state, event)` pair.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Build the state machine.
    ///
    /// Missing required fields fail fast; table problems are accumulated
    /// into [`BuildError::InvalidTable`].
    pub fn build(self) -> Result<StateMachine<S, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.configs.is_empty() {
            return Err(BuildError::NoStates);
        }

        if self.strict && (self.states.is_none() || self.events.is_none()) {
            return Err(BuildError::UndeclaredSets);
        }

        let mut checks: Vec<Check> = Vec::new();

        if let Some(states) = &self.states {
            checks.push(declared_state(states, &initial));
            for state in self.configs.keys() {
                checks.push(declared_state(states, state));
            }
        }

        for (state, config) in &self.configs {
            for event in config.duplicate_events() {
                checks.push(violation(TableViolation::DuplicateRule {
                    state: state.name().to_string(),
                    event: event.name().to_string(),
                }));
            }

            for (event, rule) in config.rules() {
                if let Some(events) = &self.events {
                    if !events.contains(event) {
                        checks.push(violation(TableViolation::UndeclaredEvent {
                            state: state.name().to_string(),
                            event: event.name().to_string(),
                        }));
                    }
                }
                if let (Some(states), Some(to)) = (&self.states, rule.static_destination()) {
                    checks.push(declared_state(states, to));
                }
            }
        }

        if self.strict {
            if let (Some(states), Some(events)) = (&self.states, &self.events) {
                for state in states {
                    for event in events {
                        let covered = self
                            .configs
                            .get(state)
                            .is_some_and(|config| config.rule_for(event).is_some());
                        if !covered {
                            checks.push(violation(TableViolation::MissingRule {
                                state: state.name().to_string(),
                                event: event.name().to_string(),
                            }));
                        }
                    }
                }
            }
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(StateMachine::new(initial, self.configs)),
            Validation::Failure(violations) => {
                let mut unique: Vec<TableViolation> = Vec::with_capacity(violations.len());
                for violation in violations {
                    if !unique.contains(&violation) {
                        unique.push(violation);
                    }
                }
                Err(BuildError::InvalidTable(unique))
            }
        }
    }
}

impl<S: State, E: Event> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

fn declared_state<S: State>(states: &[S], state: &S) -> Check {
    if states.contains(state) {
        Validation::success(())
    } else {
        violation(TableViolation::UndeclaredState {
            state: state.name().to_string(),
        })
    }
}

fn violation(violation: TableViolation) -> Check {
    Validation::failure(vec![violation])
}
