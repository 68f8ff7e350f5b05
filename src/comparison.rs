//! Multi-algorithm comparison.
//!
//! Runs several algorithms over the same process list and ranks them.
//! Each algorithm runs in isolation: an unknown name, bad options or an
//! internal failure is recorded as an [`AlgorithmFailure`] and the others
//! still complete.
//!
//! Runs are spread over a scoped worker pool of at most
//! `available_parallelism` threads. Workers pull job indices from a shared
//! counter and send results over a channel; every worker is joined before
//! ranking, and results are reported in request order.
//!
//! # Example
//!
//! ```
//! use u_cpusched::comparison::{compare, ComparisonRequest};
//! use u_cpusched::models::Process;
//!
//! let processes = vec![Process::new("P1", 0, 8), Process::new("P2", 1, 1)];
//! let request = ComparisonRequest::new(["FCFS", "SRT", "NOT_REAL"]);
//! let report = compare(&processes, &request).unwrap();
//!
//! assert_eq!(report.results.len(), 2);
//! assert_eq!(report.errors.len(), 1);
//! assert_eq!(report.ranking.best_waiting_time.unwrap().algorithm, "SRT");
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SimulationOptions;
use crate::error::{Error, Result};
use crate::metrics::AggregateMetrics;
use crate::models::Process;
use crate::simulator::{simulate_validated, SimulationReport};
use crate::validation::validate_processes;

/// Options for a comparison: a default plus per-algorithm overrides.
///
/// Serialized as `{"default": {...}, "RR": {...}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOptions {
    /// Options for algorithms without an override.
    #[serde(default)]
    pub default: SimulationOptions,
    /// Overrides keyed by algorithm name (case-insensitive).
    #[serde(flatten)]
    pub per_algorithm: BTreeMap<String, SimulationOptions>,
}

impl ComparisonOptions {
    /// Options that apply to `algorithm`.
    pub fn options_for(&self, algorithm: &str) -> &SimulationOptions {
        let wanted = algorithm.trim();
        self.per_algorithm
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, options)| options)
            .unwrap_or(&self.default)
    }
}

/// Algorithms to compare and their options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// Algorithm names, in reporting order.
    pub algorithms: Vec<String>,
    /// Option set.
    #[serde(default)]
    pub options: ComparisonOptions,
}

impl ComparisonRequest {
    /// Creates a request with default options.
    pub fn new<I, S>(algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            algorithms: algorithms.into_iter().map(Into::into).collect(),
            options: ComparisonOptions::default(),
        }
    }

    /// Sets the default options.
    pub fn with_default_options(mut self, options: SimulationOptions) -> Self {
        self.options.default = options;
        self
    }

    /// Sets options for one algorithm.
    pub fn with_options_for(mut self, algorithm: impl Into<String>, options: SimulationOptions) -> Self {
        self.options.per_algorithm.insert(algorithm.into(), options);
        self
    }
}

/// An algorithm that could not be run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmFailure {
    /// Name as requested.
    pub algorithm: String,
    /// What went wrong.
    pub error: String,
}

/// Best algorithm for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Best {
    /// Canonical algorithm name.
    pub algorithm: String,
    /// Metric value.
    pub value: f64,
}

/// Winner per metric; `None` when nothing ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    /// Lowest average waiting time.
    pub best_waiting_time: Option<Best>,
    /// Lowest average turnaround time.
    pub best_turnaround_time: Option<Best>,
    /// Lowest average response time.
    pub best_response_time: Option<Best>,
    /// Highest CPU utilization.
    pub best_cpu_utilization: Option<Best>,
    /// Highest throughput.
    pub best_throughput: Option<Best>,
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmSummary {
    /// Canonical algorithm name.
    pub algorithm: String,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// CPU utilization, in percent.
    pub cpu_utilization: f64,
    /// Processes per time unit.
    pub throughput: f64,
    /// Context switches.
    pub context_switches: usize,
}

impl From<&SimulationReport> for AlgorithmSummary {
    fn from(report: &SimulationReport) -> Self {
        let m = &report.metrics;
        Self {
            algorithm: report.algorithm.clone(),
            avg_waiting_time: m.avg_waiting_time,
            avg_turnaround_time: m.avg_turnaround_time,
            avg_response_time: m.avg_response_time,
            cpu_utilization: m.cpu_utilization,
            throughput: m.throughput,
            context_switches: m.context_switches,
        }
    }
}

/// Outcome of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Successful runs, in request order.
    pub results: Vec<SimulationReport>,
    /// Failed runs, in request order.
    pub errors: Vec<AlgorithmFailure>,
    /// Winner per metric.
    pub ranking: Ranking,
    /// Metric table, in request order.
    pub summary: Vec<AlgorithmSummary>,
}

/// Runs every requested algorithm over `processes`.
///
/// # Errors
/// - [`Error::Validation`] if the processes are malformed (nothing runs)
/// - [`Error::InvalidRequest`] if no algorithm is requested
///
/// Per-algorithm problems do not fail the call; they are listed in
/// [`ComparisonReport::errors`].
pub fn compare(processes: &[Process], request: &ComparisonRequest) -> Result<ComparisonReport> {
    validate_processes(processes)?;
    if request.algorithms.is_empty() {
        return Err(Error::InvalidRequest(
            "at least one algorithm is required".to_string(),
        ));
    }

    let mut results = Vec::new();
    let mut errors = Vec::new();
    for (name, outcome) in request.algorithms.iter().zip(run_all(processes, request)) {
        match outcome {
            Ok(report) => results.push(report),
            Err(e) => {
                warn!(algorithm = %name, error = %e, "algorithm failed during comparison");
                errors.push(AlgorithmFailure {
                    algorithm: name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let ranking = rank(&results);
    let summary: Vec<AlgorithmSummary> = results.iter().map(AlgorithmSummary::from).collect();
    info!(
        requested = request.algorithms.len(),
        succeeded = results.len(),
        failed = errors.len(),
        best_waiting = ranking.best_waiting_time.as_ref().map(|b| b.algorithm.as_str()),
        "comparison finished"
    );

    Ok(ComparisonReport {
        results,
        errors,
        ranking,
        summary,
    })
}

/// Runs each algorithm once, returning outcomes in request order.
fn run_all(processes: &[Process], request: &ComparisonRequest) -> Vec<Result<SimulationReport>> {
    let jobs = &request.algorithms;
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(jobs.len());
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(name) = jobs.get(index) else {
                    break;
                };
                let options = request.options.options_for(name);
                let outcome = simulate_validated(processes, name, options);
                if tx.send((index, outcome)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut outcomes: Vec<(usize, Result<SimulationReport>)> = rx.into_iter().collect();
    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

fn rank(results: &[SimulationReport]) -> Ranking {
    Ranking {
        best_waiting_time: best_by(results, |m| m.avg_waiting_time, Goal::Min),
        best_turnaround_time: best_by(results, |m| m.avg_turnaround_time, Goal::Min),
        best_response_time: best_by(results, |m| m.avg_response_time, Goal::Min),
        best_cpu_utilization: best_by(results, |m| m.cpu_utilization, Goal::Max),
        best_throughput: best_by(results, |m| m.throughput, Goal::Max),
    }
}

#[derive(Clone, Copy)]
enum Goal {
    Min,
    Max,
}

/// First result with the best value; later equal values do not replace it.
fn best_by(
    results: &[SimulationReport],
    metric: impl Fn(&AggregateMetrics) -> f64,
    goal: Goal,
) -> Option<Best> {
    let mut best: Option<Best> = None;
    for report in results {
        let value = metric(&report.metrics);
        let better = match &best {
            None => true,
            Some(b) => match goal {
                Goal::Min => value < b.value,
                Goal::Max => value > b.value,
            },
        };
        if better {
            best = Some(Best {
                algorithm: report.algorithm.clone(),
                value,
            });
        }
    }
    best
}
