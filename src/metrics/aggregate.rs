//! Run-level aggregate metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg waiting / turnaround / response | Arithmetic mean over processes |
//! | CPU utilization | total burst / (last completion - first arrival) x 100 |
//! | Throughput | processes / (last completion - first arrival) |
//! | Idle time | Sum of IDLE interval lengths |
//! | Context switches | Non-IDLE intervals - 1, clamped at 0 |
//!
//! Idle time and context switches must be computed from a compacted
//! timeline; raw preemption fragments would inflate both.

use serde::{Deserialize, Serialize};

use super::ProcessMetrics;
use crate::models::GanttEvent;
use crate::timeline;

/// Aggregate performance indicators of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Busy share of the observed window, in percent.
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Idle time inside the timeline.
    pub idle_time: i64,
    /// Switches between distinct non-idle intervals.
    pub context_switches: usize,
    /// Number of processes.
    pub total_processes: usize,
    /// Sum of burst times.
    pub total_burst_time: i64,
    /// `last_completion - first_arrival`.
    pub total_time: i64,
    /// Earliest arrival.
    pub first_arrival: i64,
    /// Latest completion.
    pub last_completion: i64,
}

impl AggregateMetrics {
    /// Computes aggregates from per-process metrics and a compacted timeline.
    ///
    /// An empty process list yields all-zero aggregates.
    ///
    /// # Arguments
    /// * `processes` - Metrics of every process in the run.
    /// * `gantt` - The compacted timeline of the same run.
    pub fn calculate(processes: &[ProcessMetrics], gantt: &[GanttEvent]) -> Self {
        let idle_time = timeline::idle_time(gantt);
        let context_switches = gantt
            .iter()
            .filter(|e| !e.slot.is_idle())
            .count()
            .saturating_sub(1);

        if processes.is_empty() {
            return Self {
                idle_time,
                context_switches,
                ..Self::default()
            };
        }

        let n = processes.len() as f64;
        // Per-process times fit in i64; their sums may not.
        let mut total_waiting: i128 = 0;
        let mut total_turnaround: i128 = 0;
        let mut total_response: i128 = 0;
        let mut total_burst_time: i64 = 0;
        let mut first_arrival = i64::MAX;
        let mut last_completion = i64::MIN;

        for p in processes {
            total_waiting += i128::from(p.waiting_time);
            total_turnaround += i128::from(p.turnaround_time);
            total_response += i128::from(p.response_time);
            total_burst_time = total_burst_time.saturating_add(p.burst_time);
            first_arrival = first_arrival.min(p.arrival_time);
            last_completion = last_completion.max(p.completion_time);
        }

        let total_time = last_completion - first_arrival;
        let (cpu_utilization, throughput) = if total_time > 0 {
            (
                total_burst_time as f64 / total_time as f64 * 100.0,
                n / total_time as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            avg_waiting_time: total_waiting as f64 / n,
            avg_turnaround_time: total_turnaround as f64 / n,
            avg_response_time: total_response as f64 / n,
            cpu_utilization,
            throughput,
            idle_time,
            context_switches,
            total_processes: processes.len(),
            total_burst_time,
            total_time,
            first_arrival,
            last_completion,
        }
    }
}
