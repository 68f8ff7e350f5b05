//! Per-process timing metrics.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::{Annotations, ProcessOutcome};

/// Timing metrics of one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    /// Process identifier.
    pub id: String,
    /// Arrival time.
    pub arrival_time: i64,
    /// CPU demand.
    pub burst_time: i64,
    /// Static priority from the input.
    pub priority: i32,
    /// First dispatch.
    pub start_time: i64,
    /// Completion.
    pub completion_time: i64,
    /// `completion_time - arrival_time`.
    pub turnaround_time: i64,
    /// `turnaround_time - burst_time`.
    pub waiting_time: i64,
    /// `start_time - arrival_time`.
    pub response_time: i64,
    /// Policy-specific detail.
    #[serde(flatten)]
    pub annotations: Annotations,
}

impl ProcessMetrics {
    /// Derives metrics from a finished process.
    pub fn from_outcome(outcome: &ProcessOutcome) -> Self {
        let turnaround_time = outcome.completion_time - outcome.arrival_time;
        Self {
            id: outcome.id.clone(),
            arrival_time: outcome.arrival_time,
            burst_time: outcome.burst_time,
            priority: outcome.priority,
            start_time: outcome.start_time,
            completion_time: outcome.completion_time,
            turnaround_time,
            waiting_time: turnaround_time - outcome.burst_time,
            response_time: outcome.start_time - outcome.arrival_time,
            annotations: outcome.annotations,
        }
    }

    /// Checks the non-negativity invariants.
    ///
    /// A correct simulation never dispatches a process before it arrives
    /// nor completes it faster than its burst, so any failure here is a
    /// scheduler defect.
    pub fn check(&self) -> Result<(), SimulationError> {
        let reason = if self.response_time < 0 {
            Some(format!("negative response time {}", self.response_time))
        } else if self.waiting_time < 0 {
            Some(format!("negative waiting time {}", self.waiting_time))
        } else if self.response_time > self.waiting_time {
            Some(format!(
                "response time {} exceeds waiting time {}",
                self.response_time, self.waiting_time
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SimulationError::Inconsistent {
                id: self.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, arrival: i64, burst: i64, start: i64, completion: i64) -> ProcessOutcome {
        ProcessOutcome {
            id: id.into(),
            arrival_time: arrival,
            burst_time: burst,
            priority: 0,
            start_time: start,
            completion_time: completion,
            annotations: Annotations::default(),
        }
    }

    #[test]
    fn test_from_outcome() {
        let m = ProcessMetrics::from_outcome(&outcome("P2", 1, 3, 5, 8));
        assert_eq!(m.turnaround_time, 7);
        assert_eq!(m.waiting_time, 4);
        assert_eq!(m.response_time, 4);
        assert!(m.check().is_ok());
    }

    #[test]
    fn test_check_rejects_early_start() {
        let m = ProcessMetrics::from_outcome(&outcome("P1", 4, 2, 3, 6));
        let err = m.check().unwrap_err();
        assert!(matches!(err, SimulationError::Inconsistent { ref id, .. } if id == "P1"));
    }

    #[test]
    fn test_check_rejects_short_turnaround() {
        // Completed after 2 units although it needs 5.
        let m = ProcessMetrics::from_outcome(&outcome("P1", 0, 5, 0, 2));
        assert!(m.check().is_err());
    }

    #[test]
    fn test_annotations_flattened() {
        let mut o = outcome("P1", 0, 2, 0, 2);
        o.annotations.final_level = Some(1);
        let json = serde_json::to_value(ProcessMetrics::from_outcome(&o)).unwrap();
        assert_eq!(json["finalLevel"], 1);
        assert_eq!(json["waitingTime"], 0);
        assert!(json.get("finalPriority").is_none());
    }
}
