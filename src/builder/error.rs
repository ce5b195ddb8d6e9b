//! Build errors for state machine construction.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states configured. Call .configure(state, ..) at least once")]
    NoStates,

    #[error("Strict mode needs declared sets. Call .states(..) and .events(..)")]
    UndeclaredSets,

    #[error("Transition table has {} violation(s): {}", .0.len(), summarize(.0))]
    InvalidTable(Vec<TableViolation>),
}

impl BuildError {
    /// The accumulated violations, empty for the other variants.
    pub fn violations(&self) -> &[TableViolation] {
        match self {
            Self::InvalidTable(violations) => violations,
            _ => &[],
        }
    }
}

/// A single problem found while validating a transition table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableViolation {
    #[error("state '{state}' declares more than one rule for event '{event}'")]
    DuplicateRule { state: String, event: String },

    #[error("state '{state}' is not in the declared state set")]
    UndeclaredState { state: String },

    #[error("state '{state}' has a rule for undeclared event '{event}'")]
    UndeclaredEvent { state: String, event: String },

    #[error("state '{state}' has no rule for event '{event}'")]
    MissingRule { state: String, event: String },
}

fn summarize(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
