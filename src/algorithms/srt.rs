//! Shortest Remaining Time.
//!
//! Preemptive SJF: the selection is re-evaluated after every time unit, so
//! a newly arrived process with less remaining work takes the CPU at once.

use super::criteria::ShortestRemaining;
use super::{Dispatch, RawRun, Scheduler, Simulation};
use crate::error::SimulationError;
use crate::models::Process;
use crate::registry::AlgorithmKind;

/// Shortest Remaining Time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Srt;

impl Scheduler for Srt {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Srt
    }

    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError> {
        let mut sim: Simulation = Simulation::new(processes);
        sim.drive(&ShortestRemaining, Dispatch::Preemptive)?;
        sim.finish()
    }
}
