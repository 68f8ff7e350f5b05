//! Process model.
//!
//! A process is the unit of CPU demand fed to every scheduling policy:
//! it becomes ready at its arrival time and needs `burst_time` units of
//! CPU before it completes.
//!
//! # Time Representation
//! All times are integer simulation units relative to t=0. There is no
//! wall clock anywhere in the crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier reserved for idle CPU slots in a timeline.
pub const IDLE_ID: &str = "IDLE";

/// A process to be scheduled.
///
/// Immutable input: simulations copy the fields they need into their own
/// run state and never write back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    /// Unique process identifier.
    pub id: String,
    /// Time at which the process becomes ready.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
    /// Static priority (lower = more urgent).
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    /// Creates a process with priority 0.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the static priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// An unvalidated process record as handed over by an input collaborator.
///
/// Numeric fields are kept as raw JSON values so malformed input (a
/// non-numeric burst time, a fractional arrival) reaches
/// [`validate_records`](crate::validation::validate_records) intact and can be
/// reported per record instead of failing the whole decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    /// Process identifier (`name` is accepted as an alias).
    #[serde(default, alias = "name")]
    pub id: Option<String>,
    /// Arrival time (`arrival` is accepted as an alias).
    #[serde(default, alias = "arrival")]
    pub arrival_time: Option<Value>,
    /// Burst time (`burst` and `executionTime` are accepted as aliases).
    #[serde(default, alias = "burst", alias = "executionTime")]
    pub burst_time: Option<Value>,
    /// Optional priority.
    #[serde(default)]
    pub priority: Option<Value>,
}

impl ProcessRecord {
    /// Creates a record from textual fields, as produced by line-based parsers.
    pub fn from_fields(
        id: impl Into<String>,
        arrival_time: &str,
        burst_time: &str,
        priority: Option<&str>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            arrival_time: Some(Value::String(arrival_time.to_string())),
            burst_time: Some(Value::String(burst_time.to_string())),
            priority: priority.map(|p| Value::String(p.to_string())),
        }
    }
}

impl From<&Process> for ProcessRecord {
    fn from(process: &Process) -> Self {
        Self {
            id: Some(process.id.clone()),
            arrival_time: Some(Value::from(process.arrival_time)),
            burst_time: Some(Value::from(process.burst_time)),
            priority: Some(Value::from(process.priority)),
        }
    }
}
