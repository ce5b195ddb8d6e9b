//! Declarative transition rules and per-state configuration.

use crate::core::{Event, State};
use std::fmt;

/// Side effect run when a rule fires or a state is entered.
pub type Action = Box<dyn Fn() + Send + Sync>;

/// Computes the destination of a dynamic rule at fire time.
pub type Resolver<S> = Box<dyn Fn() -> S + Send + Sync>;

/// How a `(state, event)` pair is handled.
pub enum TransitionRule<S: State> {
    /// Unconditional move to a fixed destination.
    Permit(S),

    /// Destination computed by `resolver` at fire time. The optional
    /// `action` runs before the resolver, exactly once per fire.
    PermitDynamic {
        resolver: Resolver<S>,
        action: Option<Action>,
    },

    /// Stay in the current state but run its entry actions again.
    PermitReentry,

    /// Accept the event without changing state or running entry actions.
    Ignore,
}

impl<S: State> TransitionRule<S> {
    /// The destination when it is known without firing.
    pub fn static_destination(&self) -> Option<&S> {
        match self {
            Self::Permit(to) => Some(to),
            _ => None,
        }
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignore)
    }
}

impl<S: State> fmt::Debug for TransitionRule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permit(to) => f.debug_tuple("Permit").field(to).finish(),
            Self::PermitDynamic { action, .. } => f
                .debug_struct("PermitDynamic")
                .field("has_action", &action.is_some())
                .finish(),
            Self::PermitReentry => f.write_str("PermitReentry"),
            Self::Ignore => f.write_str("Ignore"),
        }
    }
}

/// Rules and entry actions for a single state.
///
/// Rules keep their declaration order, which is also the order reported
/// by [`StateMachine::permitted_events`](crate::engine::StateMachine::permitted_events).
pub struct StateConfig<S: State, E: Event> {
    rules: Vec<(E, TransitionRule<S>)>,
    entry_actions: Vec<Action>,
}

impl<S: State, E: Event> StateConfig<S, E> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            entry_actions: Vec::new(),
        }
    }

    /// Move to `to` on `event`.
    pub fn permit(self, event: E, to: S) -> Self {
        self.rule(event, TransitionRule::Permit(to))
    }

    /// Resolve the destination at fire time.
    pub fn permit_dynamic<R>(self, event: E, resolver: R) -> Self
    where
        R: Fn() -> S + Send + Sync + 'static,
    {
        self.rule(
            event,
            TransitionRule::PermitDynamic {
                resolver: Box::new(resolver),
                action: None,
            },
        )
    }

    /// Resolve the destination at fire time after running `action`.
    pub fn permit_dynamic_with<R, A>(self, event: E, resolver: R, action: A) -> Self
    where
        R: Fn() -> S + Send + Sync + 'static,
        A: Fn() + Send + Sync + 'static,
    {
        self.rule(
            event,
            TransitionRule::PermitDynamic {
                resolver: Box::new(resolver),
                action: Some(Box::new(action)),
            },
        )
    }

    /// Re-enter the current state on `event`.
    pub fn permit_reentry(self, event: E) -> Self {
        self.rule(event, TransitionRule::PermitReentry)
    }

    /// Accept `event` with no effect.
    pub fn ignore(self, event: E) -> Self {
        self.rule(event, TransitionRule::Ignore)
    }

    /// Run `action` whenever this state becomes current, reentry included.
    pub fn on_entry<A>(mut self, action: A) -> Self
    where
        A: Fn() + Send + Sync + 'static,
    {
        self.entry_actions.push(Box::new(action));
        self
    }

    /// Add a rule. A second rule for the same event is kept so that the
    /// builder can report it; lookups always use the first one.
    pub fn rule(mut self, event: E, rule: TransitionRule<S>) -> Self {
        self.rules.push((event, rule));
        self
    }

    pub fn rule_for(&self, event: &E) -> Option<&TransitionRule<S>> {
        self.rules
            .iter()
            .find(|(declared, _)| declared == event)
            .map(|(_, rule)| rule)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&E, &TransitionRule<S>)> {
        self.rules.iter().map(|(event, rule)| (event, rule))
    }

    pub fn entry_actions(&self) -> &[Action] {
        &self.entry_actions
    }

    /// Events that have more than one rule in this state.
    pub fn duplicate_events(&self) -> Vec<&E> {
        let mut duplicates: Vec<&E> = Vec::new();
        for (index, (event, _)) in self.rules.iter().enumerate() {
            let seen_before = self.rules[..index].iter().any(|(e, _)| e == event);
            if seen_before && !duplicates.contains(&event) {
                duplicates.push(event);
            }
        }
        duplicates
    }
}

impl<S: State, E: Event> Default for StateConfig<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
