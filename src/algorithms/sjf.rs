//! Shortest Job First.
//!
//! Non-preemptive. At every completion the ready process with the smallest
//! burst time is dispatched and runs to completion. Long jobs can starve
//! while shorter ones keep arriving.

use super::criteria::ShortestBurst;
use super::{Dispatch, RawRun, Scheduler, Simulation};
use crate::error::SimulationError;
use crate::models::Process;
use crate::registry::AlgorithmKind;

/// Shortest Job First.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Scheduler for Sjf {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Sjf
    }

    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError> {
        let mut sim: Simulation = Simulation::new(processes);
        sim.drive(&ShortestBurst, Dispatch::ToCompletion)?;
        sim.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{bar, bars, run_checked, waiting};

    #[test]
    fn test_sjf_picks_shortest_at_each_completion() {
        let processes = vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 2, 4),
            Process::new("P3", 4, 1),
            Process::new("P4", 5, 4),
        ];
        let run = run_checked(&Sjf, &processes);

        // P1 runs first (only one ready), then P3 (1), then P2/P4 tie on
        // burst 4 and P2 arrived earlier.
        assert_eq!(
            bars(&run),
            vec![
                bar("P1", 0, 7),
                bar("P3", 7, 8),
                bar("P2", 8, 12),
                bar("P4", 12, 16),
            ]
        );
        assert_eq!(waiting(&run, "P3"), 3);
        assert_eq!(waiting(&run, "P4"), 7);
    }

    #[test]
    fn test_sjf_does_not_preempt() {
        let processes = vec![Process::new("LONG", 0, 10), Process::new("SHORT", 1, 1)];
        let run = run_checked(&Sjf, &processes);
        assert_eq!(
            bars(&run),
            vec![bar("LONG", 0, 10), bar("SHORT", 10, 11)]
        );
    }
}
