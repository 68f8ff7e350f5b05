//! Static priority scheduling.
//!
//! The ready process with the lowest priority value runs. In preemptive
//! mode the choice is revisited every time unit, so a more urgent arrival
//! displaces the running process; in non-preemptive mode the dispatched
//! process keeps the CPU until it completes. Priorities never change, so
//! low-priority work can starve (see [`Aging`](super::Aging)).

use super::criteria::StaticPriority;
use super::{Dispatch, RawRun, Scheduler, Simulation};
use crate::error::SimulationError;
use crate::models::Process;
use crate::registry::AlgorithmKind;

/// Static priority scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityScheduling {
    /// Re-evaluate every time unit instead of at completions.
    pub preemptive: bool,
}

impl PriorityScheduling {
    /// Preemptive variant.
    pub fn preemptive() -> Self {
        Self { preemptive: true }
    }

    /// Non-preemptive variant.
    pub fn non_preemptive() -> Self {
        Self { preemptive: false }
    }
}

impl Default for PriorityScheduling {
    fn default() -> Self {
        Self::preemptive()
    }
}

impl Scheduler for PriorityScheduling {
    fn kind(&self) -> AlgorithmKind {
        if self.preemptive {
            AlgorithmKind::PriorityPreemptive
        } else {
            AlgorithmKind::PriorityNonPreemptive
        }
    }

    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError> {
        let dispatch = if self.preemptive {
            Dispatch::Preemptive
        } else {
            Dispatch::ToCompletion
        };
        let mut sim: Simulation = Simulation::new(processes);
        sim.drive(&StaticPriority, dispatch)?;
        sim.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{bar, bars, run_checked, waiting};

    fn workload() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5).with_priority(3),
            Process::new("P2", 1, 3).with_priority(1),
            Process::new("P3", 2, 1).with_priority(4),
            Process::new("P4", 3, 2).with_priority(2),
        ]
    }

    #[test]
    fn test_preemptive_priority() {
        let run = run_checked(&PriorityScheduling::preemptive(), &workload());
        assert_eq!(
            bars(&run),
            vec![
                bar("P1", 0, 1),
                bar("P2", 1, 4),
                bar("P4", 4, 6),
                bar("P1", 6, 10),
                bar("P3", 10, 11),
            ]
        );
        assert_eq!(waiting(&run, "P1"), 5);
    }

    #[test]
    fn test_non_preemptive_priority() {
        let run = run_checked(&PriorityScheduling::non_preemptive(), &workload());
        assert_eq!(
            bars(&run),
            vec![
                bar("P1", 0, 5),
                bar("P2", 5, 8),
                bar("P4", 8, 10),
                bar("P3", 10, 11),
            ]
        );
        assert_eq!(waiting(&run, "P3"), 8);
    }

    #[test]
    fn test_kind_follows_mode() {
        assert_eq!(
            PriorityScheduling::preemptive().kind(),
            AlgorithmKind::PriorityPreemptive
        );
        assert_eq!(
            PriorityScheduling::non_preemptive().name(),
            "PRIORITY_NON_PREEMPTIVE"
        );
    }
}
