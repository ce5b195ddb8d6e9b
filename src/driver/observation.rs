//! Raw observations reported by the collaborators around a process.

use crate::lifecycle::ProcessEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something the process manager, health checker or REST layer saw.
///
/// Each observation classifies into exactly one [`ProcessEvent`]. Normal
/// completion and abnormal failure of the OS process both count as
/// termination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    ConfigurationPrepared,
    ProcessStarted,
    ProcessCompleted { exit_code: i32 },
    ProcessFailed { reason: String },
    ProcessStopped,
    HealthCheckOk,
    HealthCheckFailed { reason: String },
    RemoveRequested,
    Reset,
}

impl Observation {
    pub fn to_event(&self) -> ProcessEvent {
        match self {
            Self::ConfigurationPrepared => ProcessEvent::ProcessPrepared,
            Self::ProcessStarted => ProcessEvent::ProcessStarted,
            Self::ProcessCompleted { .. } | Self::ProcessFailed { .. } => {
                ProcessEvent::ProcessTerminated
            }
            Self::ProcessStopped => ProcessEvent::ProcessStopped,
            Self::HealthCheckOk => ProcessEvent::HealthCheckOk,
            Self::HealthCheckFailed { .. } => ProcessEvent::HealthCheckFailed,
            Self::RemoveRequested => ProcessEvent::ProcessRemove,
            Self::Reset => ProcessEvent::Reset,
        }
    }
}

impl From<&Observation> for ProcessEvent {
    fn from(observation: &Observation) -> Self {
        observation.to_event()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationPrepared => f.write_str("configuration prepared"),
            Self::ProcessStarted => f.write_str("process started"),
            Self::ProcessCompleted { exit_code } => {
                write!(f, "process completed with exit code {exit_code}")
            }
            Self::ProcessFailed { reason } => write!(f, "process failed: {reason}"),
            Self::ProcessStopped => f.write_str("process stopped"),
            Self::HealthCheckOk => f.write_str("health check ok"),
            Self::HealthCheckFailed { reason } => write!(f, "health check failed: {reason}"),
            Self::RemoveRequested => f.write_str("remove requested"),
            Self::Reset => f.write_str("reset"),
        }
    }
}
