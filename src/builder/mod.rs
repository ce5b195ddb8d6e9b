//! Builder API for declaring transition tables.
//!
//! This module provides the fluent [`StateMachineBuilder`], the validation
//! errors it reports, and macros for declaring state and event enums with
//! minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::{BuildError, TableViolation};
pub use machine::StateMachineBuilder;
