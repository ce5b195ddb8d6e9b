//! Data Node Supervision
//!
//! This example walks a data node and the search engine it manages through
//! a typical life: configuration, startup hiccups, a flaky REST endpoint,
//! a crash and restart, and finally removal.
//!
//! Key concepts:
//! - Observations classified into lifecycle events
//! - Failure counters tolerating transient health-check failures
//! - Rejected events surfaced to the caller without changing state
//! - Transition history through a registered tracer
//!
//! Run with: cargo run --example datanode_supervision

use nodewatch::driver::{Observation, ProcessSupervisor};
use nodewatch::lifecycle::{LifecycleConfig, ProcessEvent, ProcessLifecycle, ProcessState};
use nodewatch::trace::HistoryTracer;
use std::sync::Arc;

fn report(supervisor: &ProcessSupervisor) {
    let status = supervisor.status();
    println!(
        "  {:<10} {:<26} startup={} rest={} reboot={:?}",
        status.name,
        status.state.to_string(),
        status.startup_failures,
        status.rest_failures,
        status.reboot_failures
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    println!("=== Data Node Supervision ===\n");

    let datanode = ProcessLifecycle::datanode().unwrap();
    let opensearch = ProcessLifecycle::new(
        LifecycleConfig::from_json(r#"{"name": "opensearch", "rest_failure_threshold": 2}"#)
            .unwrap(),
    )
    .unwrap();

    let mut datanode = ProcessSupervisor::new(datanode);
    let mut opensearch = ProcessSupervisor::new(opensearch);

    let history: Arc<HistoryTracer<ProcessState, ProcessEvent>> = Arc::new(HistoryTracer::new());
    opensearch
        .lifecycle_mut()
        .tracers_mut()
        .register(history.clone());

    println!("Data node comes up:");
    for observation in [
        Observation::ConfigurationPrepared,
        Observation::ProcessStarted,
        Observation::HealthCheckOk,
    ] {
        datanode.observe(observation).unwrap();
    }
    report(&datanode);

    println!("\nSearch engine starts slowly (two failed checks, then ok):");
    opensearch.observe(Observation::ConfigurationPrepared).unwrap();
    opensearch.observe(Observation::ProcessStarted).unwrap();
    for _ in 0..2 {
        opensearch
            .observe(Observation::HealthCheckFailed {
                reason: "connection refused".to_string(),
            })
            .unwrap();
    }
    report(&opensearch);
    opensearch.observe(Observation::HealthCheckOk).unwrap();
    report(&opensearch);

    println!("\nREST endpoint stops answering:");
    for _ in 0..3 {
        opensearch
            .observe(Observation::HealthCheckFailed {
                reason: "timeout".to_string(),
            })
            .unwrap();
        report(&opensearch);
    }

    println!("\nProcess crashes and is restarted:");
    opensearch
        .observe(Observation::ProcessFailed {
            reason: "killed by signal 9".to_string(),
        })
        .unwrap();
    report(&opensearch);
    opensearch.observe(Observation::ProcessStarted).unwrap();
    opensearch.observe(Observation::HealthCheckOk).unwrap();
    report(&opensearch);

    println!("\nOut-of-protocol observation is rejected, state is kept:");
    if let Err(err) = opensearch.observe(Observation::Reset) {
        println!("  rejected: {err}");
    }
    report(&opensearch);

    println!("\nSearch engine is removed:");
    opensearch.observe(Observation::RemoveRequested).unwrap();
    opensearch.observe(Observation::ProcessStopped).unwrap();
    report(&opensearch);

    println!("\nRecorded path of the search engine:");
    let path: Vec<String> = history
        .history()
        .get_path()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    println!("  {}", path.join(" -> "));

    println!("\nStatus as JSON:");
    println!("  {}", serde_json::to_string(&opensearch.status()).unwrap());

    println!("\n=== Example Complete ===");
}
