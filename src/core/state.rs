//! Core `State` and `Event` traits for lifecycle state machines.
//!
//! States describe the externally observable condition of a supervised
//! entity. Events are the already-classified occurrences a driver feeds
//! into the machine. Neither carries a payload.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States are small comparable
/// tokens from a closed set, used as keys of the transition table.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history records and tracer calls
/// - `Eq` + `Hash`: States key the transition table
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States are reported to status consumers
///
/// # Example
///
/// ```rust
/// use nodewatch::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum PumpState {
///     Idle,
///     Running,
///     Broken,
/// }
///
/// impl State for PumpState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Running => "Running",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states may still accept a reset-style event; the flag is
    /// informational and never consulted by the engine.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Trait for events fed into a state machine.
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
