//! Final per-process state of a finished simulation.

use serde::{Deserialize, Serialize};

/// Algorithm-specific detail attached to a process outcome.
///
/// Only the policy that tracks a value fills it in; everything else stays
/// `None` and is omitted from serialized output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotations {
    /// Effective priority when the process completed (aging).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_priority: Option<i32>,
    /// Queue level the process finished in (feedback).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_level: Option<usize>,
    /// Response ratio at the moment of dispatch (HRRN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_ratio: Option<f64>,
}

/// Snapshot of one process after its simulation completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    /// Process identifier.
    pub id: String,
    /// Arrival time.
    pub arrival_time: i64,
    /// CPU demand.
    pub burst_time: i64,
    /// Static priority from the input.
    pub priority: i32,
    /// First dispatch time.
    pub start_time: i64,
    /// Time the last unit of work finished.
    pub completion_time: i64,
    /// Policy-specific detail.
    #[serde(flatten)]
    pub annotations: Annotations,
}
