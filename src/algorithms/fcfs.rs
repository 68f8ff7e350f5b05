//! First Come, First Served.
//!
//! Non-preemptive. Processes run to completion in arrival order; equal
//! arrivals run in id order.

use super::criteria::FirstCome;
use super::{Dispatch, RawRun, Scheduler, Simulation};
use crate::error::SimulationError;
use crate::models::Process;
use crate::registry::AlgorithmKind;

/// First Come, First Served.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Fcfs
    }

    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError> {
        let mut sim: Simulation = Simulation::new(processes);
        sim.drive(&FirstCome, Dispatch::ToCompletion)?;
        sim.finish()
    }
}
