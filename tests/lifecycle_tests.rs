//! End-to-end scenarios for the data-node and search-engine lifecycles.

use nodewatch::core::State;
use nodewatch::driver::{Observation, ProcessSupervisor};
use nodewatch::engine::{FireError, FireOutcome};
use nodewatch::lifecycle::{ProcessEvent, ProcessLifecycle, ProcessState};
use nodewatch::trace::{HistoryTracer, Tracer};
use std::sync::{Arc, Mutex};

use ProcessEvent::*;

fn presets() -> Vec<ProcessLifecycle> {
    vec![
        ProcessLifecycle::datanode().unwrap(),
        ProcessLifecycle::opensearch().unwrap(),
    ]
}

fn fire_all(lifecycle: &mut ProcessLifecycle, events: &[ProcessEvent]) {
    for event in events {
        lifecycle
            .fire(*event)
            .unwrap_or_else(|err| panic!("{} rejected {event}: {err}", lifecycle.name()));
    }
}

fn available() -> ProcessLifecycle {
    let mut lifecycle = ProcessLifecycle::opensearch().unwrap();
    fire_all(&mut lifecycle, &[ProcessStarted, HealthCheckOk]);
    lifecycle
}

#[test]
fn fresh_machines_wait_for_configuration() {
    for lifecycle in presets() {
        assert_eq!(
            lifecycle.current_state(),
            &ProcessState::WaitingForConfiguration
        );
        assert_eq!(
            lifecycle.machine().initial_state(),
            &ProcessState::WaitingForConfiguration
        );
    }
}

#[test]
fn happy_path() {
    for mut lifecycle in presets() {
        lifecycle.fire(ProcessPrepared).unwrap();
        assert_eq!(lifecycle.current_state(), &ProcessState::Prepared);
        lifecycle.fire(ProcessStarted).unwrap();
        assert_eq!(lifecycle.current_state(), &ProcessState::Starting);
        lifecycle.fire(HealthCheckOk).unwrap();
        assert_eq!(lifecycle.current_state(), &ProcessState::Available);
        lifecycle.fire(ProcessTerminated).unwrap();
        assert_eq!(lifecycle.current_state(), &ProcessState::Terminated);
    }
}

#[test]
fn rest_failures_are_tolerated_up_to_threshold() {
    let mut lifecycle = available();

    fire_all(
        &mut lifecycle,
        &[HealthCheckFailed, HealthCheckFailed, HealthCheckFailed],
    );
    assert_eq!(lifecycle.current_state(), &ProcessState::NotResponding);

    lifecycle.fire(HealthCheckFailed).unwrap();
    assert_eq!(lifecycle.current_state(), &ProcessState::Failed);
    assert!(lifecycle.current_state().is_error());

    lifecycle.fire(HealthCheckOk).unwrap();
    assert_eq!(lifecycle.current_state(), &ProcessState::Available);
    assert_eq!(lifecycle.counters().rest_failures.count(), 0);

    // Counter starts over after recovery.
    fire_all(
        &mut lifecycle,
        &[HealthCheckFailed, HealthCheckFailed, HealthCheckFailed],
    );
    assert_eq!(lifecycle.current_state(), &ProcessState::NotResponding);
}

#[test]
fn startup_failures_are_tolerated_up_to_threshold() {
    let mut lifecycle = ProcessLifecycle::datanode().unwrap();
    lifecycle.fire(ProcessStarted).unwrap();

    fire_all(
        &mut lifecycle,
        &[HealthCheckFailed, HealthCheckFailed, HealthCheckFailed],
    );
    assert_eq!(lifecycle.current_state(), &ProcessState::Starting);

    fire_all(&mut lifecycle, &[HealthCheckFailed, HealthCheckFailed]);
    assert_eq!(lifecycle.current_state(), &ProcessState::Failed);
}

#[test]
fn startup_recovers_before_the_last_tolerated_failure() {
    let mut lifecycle = ProcessLifecycle::datanode().unwrap();
    lifecycle.fire(ProcessStarted).unwrap();

    for _ in 0..4 {
        lifecycle.fire(HealthCheckFailed).unwrap();
    }
    lifecycle.fire(HealthCheckOk).unwrap();

    assert_eq!(lifecycle.current_state(), &ProcessState::Available);
}

#[test]
fn removal_succeeds_when_process_stops() {
    let mut lifecycle = available();

    lifecycle.fire(ProcessRemove).unwrap();
    assert_eq!(lifecycle.current_state(), &ProcessState::Removing);
    lifecycle.fire(ProcessStopped).unwrap();
    assert_eq!(lifecycle.current_state(), &ProcessState::Removed);
    assert!(lifecycle.current_state().is_final());

    lifecycle.fire(Reset).unwrap();
    assert_eq!(
        lifecycle.current_state(),
        &ProcessState::WaitingForConfiguration
    );
}

#[test]
fn removal_fails_on_failed_health_check() {
    let mut lifecycle = available();
    fire_all(&mut lifecycle, &[ProcessRemove, HealthCheckOk]);
    assert_eq!(lifecycle.current_state(), &ProcessState::Removing);

    lifecycle.fire(HealthCheckFailed).unwrap();
    assert_eq!(lifecycle.current_state(), &ProcessState::Failed);
}

#[test]
fn ignored_events_do_not_run_entry_actions() {
    let mut lifecycle = available();
    lifecycle.fire(HealthCheckFailed).unwrap();
    lifecycle.fire(HealthCheckOk).unwrap();

    // Entering AVAILABLE resets the rest counter; bump it by hand so a
    // stray entry action would be visible.
    let rest = Arc::clone(&lifecycle.counters().rest_failures);
    rest.increment();

    let outcome = lifecycle.fire(ProcessStarted).unwrap();

    assert_eq!(outcome, FireOutcome::Ignored);
    assert_eq!(lifecycle.current_state(), &ProcessState::Available);
    assert_eq!(rest.count(), 1);

    // Reentry on the other hand runs them.
    lifecycle.fire(HealthCheckOk).unwrap();
    assert_eq!(rest.count(), 0);
}

#[test]
fn dynamic_rules_increment_once_per_fire() {
    let mut lifecycle = available();
    lifecycle.fire(HealthCheckFailed).unwrap();
    let rest = Arc::clone(&lifecycle.counters().rest_failures);

    for expected in 1..=5 {
        lifecycle.fire(HealthCheckFailed).unwrap();
        if lifecycle.is_in_state(ProcessState::Failed) {
            break;
        }
        assert_eq!(rest.count(), expected);
    }

    let mut lifecycle = ProcessLifecycle::opensearch().unwrap();
    lifecycle.fire(ProcessStarted).unwrap();
    let startup = Arc::clone(&lifecycle.counters().startup_failures);
    for expected in 1..=4 {
        let outcome = lifecycle.fire(HealthCheckFailed).unwrap();
        assert!(!outcome.changed_state());
        assert_eq!(startup.count(), expected);
    }
}

#[test]
fn undeclared_events_are_rejected_without_change() {
    for mut lifecycle in presets() {
        let err = lifecycle.fire(HealthCheckOk).unwrap_err();
        assert_eq!(
            err,
            FireError::InvalidTransition {
                state: "WAITING_FOR_CONFIGURATION".to_string(),
                event: "HEALTH_CHECK_OK".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "No transition for event 'HEALTH_CHECK_OK' in state 'WAITING_FOR_CONFIGURATION'"
        );
        assert_eq!(
            lifecycle.current_state(),
            &ProcessState::WaitingForConfiguration
        );
    }
}

#[test]
fn rejected_pairs_are_exactly_the_intended_ones() {
    use ProcessState::*;

    let lifecycle = ProcessLifecycle::datanode().unwrap();
    let gaps = lifecycle
        .machine()
        .coverage_gaps(ProcessState::ALL, ProcessEvent::ALL);

    let expected: Vec<(ProcessState, ProcessEvent)> = vec![
        (WaitingForConfiguration, HealthCheckOk),
        (WaitingForConfiguration, ProcessTerminated),
        (WaitingForConfiguration, ProcessRemove),
        (WaitingForConfiguration, Reset),
        (Prepared, ProcessPrepared),
        (Prepared, HealthCheckOk),
        (Prepared, ProcessRemove),
        (Prepared, Reset),
        (Starting, ProcessPrepared),
        (Starting, ProcessStarted),
        (Starting, ProcessRemove),
        (Starting, Reset),
        (Available, ProcessPrepared),
        (Available, Reset),
        (NotResponding, ProcessPrepared),
        (NotResponding, ProcessStarted),
        (NotResponding, ProcessRemove),
        (NotResponding, Reset),
        (Failed, ProcessPrepared),
        (Failed, ProcessStarted),
        (Failed, ProcessRemove),
        (Failed, Reset),
        (Terminated, ProcessPrepared),
        (Terminated, HealthCheckOk),
        (Terminated, ProcessRemove),
        (Terminated, Reset),
        (Removing, ProcessPrepared),
        (Removing, ProcessStarted),
        (Removing, ProcessTerminated),
        (Removing, ProcessRemove),
        (Removing, Reset),
        (Removed, ProcessPrepared),
        (Removed, ProcessStarted),
        (Removed, HealthCheckOk),
        (Removed, HealthCheckFailed),
        (Removed, ProcessTerminated),
        (Removed, ProcessRemove),
    ];

    assert_eq!(gaps, expected);
}

#[derive(Default)]
struct EventLog {
    lines: Mutex<Vec<String>>,
}

impl Tracer<ProcessState, ProcessEvent> for EventLog {
    fn trigger(&self, state: &ProcessState, event: &ProcessEvent) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("trigger {state} {event}"));
    }

    fn transition(&self, from: &ProcessState, event: &ProcessEvent, to: &ProcessState) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{from} -{event}-> {to}"));
    }

    fn ignored(&self, state: &ProcessState, event: &ProcessEvent) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("ignored {state} {event}"));
    }
}

#[test]
fn tracers_can_be_registered_and_removed() {
    let mut lifecycle = ProcessLifecycle::opensearch().unwrap();
    let log = Arc::new(EventLog::default());
    let id = lifecycle.tracers_mut().register(log.clone());
    assert_eq!(lifecycle.tracers().len(), 2);

    fire_all(&mut lifecycle, &[ProcessStopped, ProcessStarted]);
    assert!(lifecycle.tracers_mut().unregister(id));
    lifecycle.fire(HealthCheckOk).unwrap();

    assert_eq!(
        *log.lines.lock().unwrap(),
        vec![
            "ignored WAITING_FOR_CONFIGURATION PROCESS_STOPPED",
            "trigger WAITING_FOR_CONFIGURATION PROCESS_STARTED",
            "WAITING_FOR_CONFIGURATION -PROCESS_STARTED-> STARTING",
        ]
    );
    assert!(!lifecycle.tracers_mut().unregister(id));
}

#[test]
fn history_tracer_follows_the_path() {
    let mut lifecycle = ProcessLifecycle::datanode().unwrap();
    let history: Arc<HistoryTracer<ProcessState, ProcessEvent>> = Arc::new(HistoryTracer::new());
    lifecycle.tracers_mut().register(history.clone());

    fire_all(
        &mut lifecycle,
        &[
            ProcessPrepared,
            ProcessStarted,
            HealthCheckFailed,
            HealthCheckOk,
            HealthCheckOk,
        ],
    );

    let recorded = history.history();
    assert_eq!(
        recorded.get_path(),
        vec![
            &ProcessState::WaitingForConfiguration,
            &ProcessState::Prepared,
            &ProcessState::Starting,
            &ProcessState::Starting,
            &ProcessState::Available,
            &ProcessState::Available,
        ]
    );
    assert!(recorded.last().is_some_and(|last| last.is_reentry()));
}

#[tokio::test]
async fn supervisors_keep_running_after_a_rejected_observation() {
    let datanode = Arc::new(tokio::sync::Mutex::new(ProcessSupervisor::new(
        ProcessLifecycle::datanode().unwrap(),
    )));
    let opensearch = Arc::new(tokio::sync::Mutex::new(ProcessSupervisor::new(
        ProcessLifecycle::opensearch().unwrap(),
    )));

    let rejected = {
        let opensearch = Arc::clone(&opensearch);
        tokio::spawn(async move {
            let mut supervisor = opensearch.lock().await;
            supervisor.observe(Observation::Reset)
        })
    };
    let accepted = {
        let datanode = Arc::clone(&datanode);
        tokio::spawn(async move {
            let mut supervisor = datanode.lock().await;
            supervisor
                .observe(Observation::ConfigurationPrepared)
                .unwrap();
            supervisor.observe(Observation::ProcessStarted).unwrap();
            supervisor.observe(Observation::HealthCheckOk)
        })
    };

    assert!(rejected.await.unwrap().is_err());
    assert!(accepted.await.unwrap().is_ok());

    assert_eq!(
        opensearch.lock().await.current_state(),
        ProcessState::WaitingForConfiguration
    );
    assert_eq!(
        datanode.lock().await.current_state(),
        ProcessState::Available
    );

    let status = datanode.lock().await.status();
    let json = serde_json::to_string(&status).unwrap();
    assert!(json.contains("\"state\":\"AVAILABLE\""));
    assert!(json.contains("\"name\":\"datanode\""));
}
