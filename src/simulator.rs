//! Single-run simulator.
//!
//! Runs one algorithm over one process list and packages the compacted
//! timeline, per-process metrics and aggregates into a
//! [`SimulationReport`].
//!
//! # Pipeline
//! 1. Validate the processes (fails before anything runs)
//! 2. Resolve the algorithm name and its options
//! 3. Run the policy loop
//! 4. Compact the timeline
//! 5. Derive and check metrics
//!
//! # Example
//!
//! ```
//! use u_cpusched::config::SimulationOptions;
//! use u_cpusched::models::Process;
//! use u_cpusched::simulator::simulate;
//!
//! let processes = vec![
//!     Process::new("P1", 0, 5),
//!     Process::new("P2", 1, 3),
//!     Process::new("P3", 2, 8),
//! ];
//! let report = simulate(&processes, "fcfs", &SimulationOptions::default()).unwrap();
//!
//! assert_eq!(report.algorithm, "FCFS");
//! assert_eq!(report.gantt.len(), 3);
//! assert!((report.metrics.avg_waiting_time - 10.0 / 3.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::algorithms::Scheduler;
use crate::config::SimulationOptions;
use crate::error::{Error, Result, SimulationError};
use crate::metrics::{AggregateMetrics, ProcessMetrics};
use crate::models::{GanttEvent, Process, ProcessRecord};
use crate::registry;
use crate::timeline;
use crate::validation::{validate_processes, validate_records};

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// Canonical algorithm name.
    pub algorithm: String,
    /// Compacted timeline.
    pub gantt: Vec<GanttEvent>,
    /// Per-process metrics, sorted by id.
    pub processes: Vec<ProcessMetrics>,
    /// Run-level aggregates.
    pub metrics: AggregateMetrics,
}

/// Validates `processes` and runs `algorithm` over them.
///
/// # Errors
/// - [`Error::Validation`] for malformed processes
/// - [`Error::UnknownAlgorithm`] for an unregistered name
/// - [`Error::InvalidOptions`] for out-of-range options
/// - [`Error::Simulation`] if the policy breaks an invariant
pub fn simulate(
    processes: &[Process],
    algorithm: &str,
    options: &SimulationOptions,
) -> Result<SimulationReport> {
    validate_processes(processes)?;
    simulate_validated(processes, algorithm, options)
}

/// Resolves and runs `algorithm` over processes already known to be valid.
pub(crate) fn simulate_validated(
    processes: &[Process],
    algorithm: &str,
    options: &SimulationOptions,
) -> Result<SimulationReport> {
    let kind = registry::resolve(algorithm)?;
    let scheduler = registry::build(kind, options)?;
    execute(kind.name(), scheduler.as_ref(), processes)
}

/// Like [`simulate`], but starting from loosely-typed records.
pub fn simulate_records(
    records: &[ProcessRecord],
    algorithm: &str,
    options: &SimulationOptions,
) -> Result<SimulationReport> {
    let processes = validate_records(records)?;
    simulate(&processes, algorithm, options)
}

/// Runs an already-built scheduler over validated processes.
///
/// Skips validation; the caller guarantees unique ids, non-negative
/// arrivals, positive bursts and a latest arrival plus total burst that
/// fits in `i64`.
pub fn run_scheduler(scheduler: &dyn Scheduler, processes: &[Process]) -> Result<SimulationReport> {
    execute(scheduler.name(), scheduler, processes)
}

fn execute(
    algorithm: &str,
    scheduler: &dyn Scheduler,
    processes: &[Process],
) -> Result<SimulationReport> {
    debug!(algorithm, processes = processes.len(), "simulation started");

    let fail = |source: SimulationError| {
        error!(algorithm, error = %source, "simulation invariant violated");
        Error::Simulation {
            algorithm: algorithm.to_string(),
            source,
        }
    };

    let run = scheduler.run(processes).map_err(fail)?;
    let gantt = timeline::compact(&run.events);

    let metrics: Vec<ProcessMetrics> = run.outcomes.iter().map(ProcessMetrics::from_outcome).collect();
    for m in &metrics {
        m.check().map_err(fail)?;
    }

    let busy = timeline::busy_time(&gantt);
    let demand = processes
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.burst_time));
    if busy != demand {
        return Err(fail(SimulationError::TimelineMismatch { busy, demand }));
    }

    let aggregate = AggregateMetrics::calculate(&metrics, &gantt);
    debug!(
        algorithm,
        events = gantt.len(),
        avg_waiting = aggregate.avg_waiting_time,
        "simulation finished"
    );

    Ok(SimulationReport {
        algorithm: algorithm.to_string(),
        gantt,
        processes: metrics,
        metrics: aggregate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{RawRun, RoundRobin};
    use crate::models::{ProcessOutcome, Slot};
    use crate::registry::AlgorithmKind;
    use crate::validation::ValidationErrorKind;
    use crate::workload::WorkloadSpec;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn textbook() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 8),
        ]
    }

    #[test]
    fn test_simulate_fcfs_metrics() {
        let report = simulate(&textbook(), "FCFS", &SimulationOptions::default()).unwrap();
        let waits: Vec<_> = report.processes.iter().map(|p| p.waiting_time).collect();
        assert_eq!(waits, vec![0, 4, 6]);
        assert!((report.metrics.throughput - 3.0 / 16.0).abs() < 1e-9);
        assert_eq!(report.metrics.idle_time, 0);
        assert_eq!(report.metrics.context_switches, 2);
    }

    #[test]
    fn test_simulate_rejects_invalid_before_running() {
        let processes = vec![Process::new("P1", 0, 0)];
        match simulate(&processes, "NOT_REAL", &SimulationOptions::default()) {
            Err(Error::Validation(errors)) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidBurstTime);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_simulate_rejects_times_beyond_i64() {
        let options = SimulationOptions::default();
        let late = vec![Process::new("P1", i64::MAX - 1, 5)];
        let huge = vec![
            Process::new("P1", 0, i64::MAX / 2 + 1),
            Process::new("P2", 1, i64::MAX / 2 + 1),
        ];
        for processes in [late, huge] {
            match simulate(&processes, "FCFS", &options) {
                Err(Error::Validation(errors)) => {
                    assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
                }
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[test]
    fn test_simulate_at_time_limit() {
        let processes = vec![Process::new("P1", i64::MAX - 3, 3)];
        let report = simulate(&processes, "SJF", &SimulationOptions::default()).unwrap();
        assert_eq!(report.metrics.last_completion, i64::MAX);
        assert_eq!(report.processes[0].waiting_time, 0);
    }

    #[test]
    fn test_simulate_unknown_algorithm() {
        let err = simulate(&textbook(), "LOTTERY", &SimulationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownAlgorithm { .. }));
    }

    #[test]
    fn test_simulate_round_robin_options() {
        let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)];
        let report = simulate(&processes, "rr", &SimulationOptions::new().with_quantum(2)).unwrap();
        let ids: Vec<_> = report.gantt.iter().map(|e| e.slot.to_string()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P1", "P2", "P1"]);
        assert_eq!(report.metrics.context_switches, 4);

        let err = simulate(&processes, "RR", &SimulationOptions::new().with_quantum(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidOptions { .. }));
    }

    #[test]
    fn test_priority_preemptive_override_keeps_requested_name() {
        let options = SimulationOptions::new().with_preemptive(false);
        let report = simulate(&textbook(), "PRIORITY_PREEMPTIVE", &options).unwrap();
        assert_eq!(report.algorithm, "PRIORITY_PREEMPTIVE");
    }

    #[test]
    fn test_simulate_records_reports_bad_values() {
        let records = vec![
            ProcessRecord::from_fields("P1", "0", "3", None),
            ProcessRecord::from_fields("P2", "x", "3", None),
        ];
        let err = simulate_records(&records, "FCFS", &SimulationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn test_leading_idle_counts_as_idle_time() {
        let processes = vec![Process::new("P1", 3, 2)];
        let report = simulate(&processes, "SJF", &SimulationOptions::default()).unwrap();
        assert_eq!(report.gantt[0].slot, Slot::Idle);
        assert_eq!(report.metrics.idle_time, 3);
        // Utilization is measured from the first arrival.
        assert!((report.metrics.cpu_utilization - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_json_shape_and_round_trip() {
        let report = simulate(&textbook(), "HRRN", &SimulationOptions::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["gantt"][0]["processId"], "P1");
        assert!(json["processes"][0]["responseRatio"].is_number());
        assert!(json["metrics"]["avgWaitingTime"].is_number());

        let back: SimulationReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[derive(Debug)]
    struct Broken;

    impl Scheduler for Broken {
        fn kind(&self) -> AlgorithmKind {
            AlgorithmKind::Fcfs
        }

        fn run(&self, processes: &[Process]) -> std::result::Result<RawRun, SimulationError> {
            // Claims completion without emitting any CPU time.
            let outcomes = processes
                .iter()
                .map(|p| ProcessOutcome {
                    id: p.id.clone(),
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    priority: p.priority,
                    start_time: p.arrival_time,
                    completion_time: p.arrival_time + p.burst_time,
                    annotations: Default::default(),
                })
                .collect();
            Ok(RawRun {
                events: Vec::new(),
                outcomes,
            })
        }
    }

    #[test]
    fn test_run_scheduler_catches_timeline_mismatch() {
        let err = run_scheduler(&Broken, &textbook()).unwrap_err();
        assert_eq!(
            err,
            Error::Simulation {
                algorithm: "FCFS".into(),
                source: SimulationError::TimelineMismatch { busy: 0, demand: 16 },
            }
        );
    }

    #[test]
    fn test_run_scheduler_direct() {
        let report = run_scheduler(&RoundRobin::new(3), &textbook()).unwrap();
        assert_eq!(report.algorithm, "RR");
    }

    #[test]
    fn test_random_workloads_hold_invariants() {
        let mut rng = SmallRng::seed_from_u64(42);
        let spec = WorkloadSpec::default().with_count(8).with_max_arrival(12);
        let options = SimulationOptions::default();

        for _ in 0..25 {
            let processes = spec.generate(&mut rng);
            let demand: i64 = processes.iter().map(|p| p.burst_time).sum();

            for kind in AlgorithmKind::ALL {
                let report = simulate(&processes, kind.name(), &options).unwrap();
                let again = simulate(&processes, kind.name(), &options).unwrap();
                assert_eq!(report, again, "{kind} is not deterministic");

                assert_eq!(timeline::busy_time(&report.gantt), demand, "{kind}");
                assert_eq!(timeline::compact(&report.gantt), report.gantt);
                assert_eq!(report.processes.len(), processes.len());
                for p in &report.processes {
                    assert!(p.waiting_time >= 0 && p.response_time >= 0, "{kind} {}", p.id);
                    assert!(p.turnaround_time >= p.burst_time);
                }
                if let Some(first) = report.gantt.first() {
                    assert_eq!(first.start, 0);
                }
            }
        }
    }
}
