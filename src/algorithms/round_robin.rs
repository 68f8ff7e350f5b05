//! Round Robin.
//!
//! Ready processes share the CPU in FIFO order, each for at most one time
//! quantum. A process that exhausts its quantum goes to the tail of the
//! queue, **after** every process that arrived during its slice.
//!
//! # Algorithm
//! ```text
//! queue <- arrivals at t
//! loop:
//!   if queue empty: idle to next arrival, enqueue arrivals
//!   p <- pop front; run p for min(quantum, remaining)
//!   enqueue arrivals up to now
//!   if p unfinished: push p to back
//! ```

use std::collections::VecDeque;

use super::{RawRun, Scheduler, Simulation};
use crate::error::SimulationError;
use crate::models::Process;
use crate::registry::AlgorithmKind;

/// Round Robin with a fixed time quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    /// Maximum slice length. Must be positive.
    pub quantum: i64,
}

impl RoundRobin {
    /// Creates a Round Robin scheduler.
    pub fn new(quantum: i64) -> Self {
        Self { quantum }
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Scheduler for RoundRobin {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::RoundRobin
    }

    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError> {
        let mut sim: Simulation = Simulation::new(processes);
        let mut queue: VecDeque<usize> = sim.admit().collect();

        while !sim.is_finished() {
            sim.step()?;
            let Some(idx) = queue.pop_front() else {
                sim.idle_until_next_arrival()?;
                queue.extend(sim.admit());
                continue;
            };

            sim.execute(idx, self.quantum);
            queue.extend(sim.admit());
            if !sim.state(idx).is_completed() {
                queue.push_back(idx);
            }
        }

        sim.finish()
    }
}
