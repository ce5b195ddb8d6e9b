//! Supervised-process lifecycles.
//!
//! The data-node process and the search-engine process it manages share
//! one state set, one event set and one transition table. They differ only
//! in their [`LifecycleConfig`]:
//!
//! ```text
//! WAITING_FOR_CONFIGURATION ─prepared─► PREPARED ─started─► STARTING ─ok─► AVAILABLE
//!                                                              │ failed × startup   │ failed
//!                                                              ▼                    ▼
//!                                 AVAILABLE ◄─ok─ FAILED ◄─failed × rest─ NOT_RESPONDING
//!
//! AVAILABLE ─remove─► REMOVING ─stopped─► REMOVED ─reset─► WAITING_FOR_CONFIGURATION
//! stopped / terminated while running ─► TERMINATED ─started─► STARTING
//! ```

mod config;
mod process;

pub use config::{
    ConfigError, LifecycleConfig, DEFAULT_REBOOT_FAILURE_THRESHOLD, DEFAULT_REST_FAILURE_THRESHOLD,
    DEFAULT_STARTUP_FAILURE_THRESHOLD,
};
pub use process::{LifecycleCounters, LifecycleError, ProcessLifecycle, ProcessStatus};

use crate::{event_enum, state_enum};

state_enum! {
    /// Externally observable condition of a supervised process.
    pub enum ProcessState {
        WaitingForConfiguration => "WAITING_FOR_CONFIGURATION",
        Prepared => "PREPARED",
        Starting => "STARTING",
        Available => "AVAILABLE",
        NotResponding => "NOT_RESPONDING",
        Failed => "FAILED",
        Terminated => "TERMINATED",
        Removing => "REMOVING",
        Removed => "REMOVED",
    }
    final: [Removed]
    error: [Failed]
}

event_enum! {
    /// Classified observation about a supervised process.
    pub enum ProcessEvent {
        ProcessPrepared => "PROCESS_PREPARED",
        ProcessStarted => "PROCESS_STARTED",
        HealthCheckOk => "HEALTH_CHECK_OK",
        HealthCheckFailed => "HEALTH_CHECK_FAILED",
        ProcessStopped => "PROCESS_STOPPED",
        ProcessTerminated => "PROCESS_TERMINATED",
        ProcessRemove => "PROCESS_REMOVE",
        Reset => "RESET",
    }
}
