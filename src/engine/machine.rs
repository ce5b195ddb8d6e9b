//! Reactive state machine driven by `fire`.

use crate::core::{Event, State};
use crate::engine::error::FireError;
use crate::engine::rule::{StateConfig, TransitionRule};
use crate::trace::{Tracer, TracerAggregator};
use std::collections::HashMap;

/// Result of a successful `fire` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FireOutcome<S: State> {
    /// A permit, dynamic or reentry rule ran. `from == to` for reentry.
    Transitioned { from: S, to: S },

    /// The event was declared as ignored in the current state.
    Ignored,
}

impl<S: State> FireOutcome<S> {
    /// Whether the current state differs from the one before the fire.
    pub fn changed_state(&self) -> bool {
        match self {
            Self::Transitioned { from, to } => from != to,
            Self::Ignored => false,
        }
    }
}

/// State machine over an immutable transition table.
///
/// The machine never polls, blocks or schedules anything: every change goes
/// through [`StateMachine::fire`]. It is not safe to fire concurrently on
/// one instance; the owning driver serializes calls.
pub struct StateMachine<S: State, E: Event> {
    initial: S,
    current: S,
    configs: HashMap<S, StateConfig<S, E>>,
    tracers: TracerAggregator<S, E>,
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Create a machine in `initial` over the given table.
    ///
    /// The table is not validated here; use
    /// [`StateMachineBuilder`](crate::builder::StateMachineBuilder) for that.
    pub fn new(initial: S, configs: HashMap<S, StateConfig<S, E>>) -> Self {
        Self {
            current: initial.clone(),
            initial,
            configs,
            tracers: TracerAggregator::new(),
        }
    }

    /// Feed one event into the machine.
    ///
    /// For permit, dynamic and reentry rules the order is fixed: tracer
    /// trigger, rule action, destination resolution, state update, entry
    /// actions of the destination, tracer transition. Ignored events only
    /// reach [`Tracer::ignored`]. Undeclared events leave the machine
    /// untouched and return [`FireError::InvalidTransition`].
    pub fn fire(&mut self, event: E) -> Result<FireOutcome<S>, FireError> {
        let Some(rule) = self
            .configs
            .get(&self.current)
            .and_then(|config| config.rule_for(&event))
        else {
            return Err(FireError::InvalidTransition {
                state: self.current.name().to_string(),
                event: event.name().to_string(),
            });
        };

        let destination = match rule {
            TransitionRule::Ignore => {
                self.tracers.ignored(&self.current, &event);
                return Ok(FireOutcome::Ignored);
            }
            TransitionRule::Permit(to) => {
                self.tracers.trigger(&self.current, &event);
                to.clone()
            }
            TransitionRule::PermitReentry => {
                self.tracers.trigger(&self.current, &event);
                self.current.clone()
            }
            TransitionRule::PermitDynamic { resolver, action } => {
                self.tracers.trigger(&self.current, &event);
                if let Some(action) = action {
                    action();
                }
                resolver()
            }
        };

        let from = std::mem::replace(&mut self.current, destination);

        if let Some(config) = self.configs.get(&self.current) {
            for entry in config.entry_actions() {
                entry();
            }
        }

        self.tracers.transition(&from, &event, &self.current);

        Ok(FireOutcome::Transitioned {
            from,
            to: self.current.clone(),
        })
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn is_in_state(&self, state: &S) -> bool {
        self.current == *state
    }

    /// Whether `event` has any rule, ignore included, in the current state.
    pub fn can_fire(&self, event: &E) -> bool {
        self.configs
            .get(&self.current)
            .is_some_and(|config| config.rule_for(event).is_some())
    }

    /// Events accepted in the current state, in declaration order.
    pub fn permitted_events(&self) -> Vec<&E> {
        let mut events: Vec<&E> = Vec::new();
        if let Some(config) = self.configs.get(&self.current) {
            for (event, _) in config.rules() {
                if !events.contains(&event) {
                    events.push(event);
                }
            }
        }
        events
    }

    /// `(state, event)` pairs from the given sets that have no rule.
    pub fn coverage_gaps(&self, states: &[S], events: &[E]) -> Vec<(S, E)> {
        let mut gaps = Vec::new();
        for state in states {
            for event in events {
                let covered = self
                    .configs
                    .get(state)
                    .is_some_and(|config| config.rule_for(event).is_some());
                if !covered {
                    gaps.push((state.clone(), event.clone()));
                }
            }
        }
        gaps
    }

    pub fn tracers(&self) -> &TracerAggregator<S, E> {
        &self.tracers
    }

    /// Tracers may be registered or removed between `fire` calls.
    pub fn tracers_mut(&mut self) -> &mut TracerAggregator<S, E> {
        &mut self.tracers
    }
}
