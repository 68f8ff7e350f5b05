//! Schedule quality metrics.
//!
//! Derives per-process timing (turnaround, waiting, response) from the
//! final state of a run and aggregates them together with timeline-level
//! figures (utilization, throughput, idle time, context switches).
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2:
//! Scheduling Criteria

mod aggregate;
mod process;

pub use aggregate::AggregateMetrics;
pub use process::ProcessMetrics;
