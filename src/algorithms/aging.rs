//! Priority scheduling with aging.
//!
//! Like [`PriorityScheduling`](super::PriorityScheduling), but a process
//! that keeps waiting has its effective priority lowered (made more
//! urgent) by `amount` after every `interval` units of waiting. Dispatch
//! resets the wait counter but keeps the aged priority.
//!
//! Aging never pushes a priority below 0; a process whose base priority is
//! already negative is not aged at all.
//!
//! # Example
//! H (burst 10, priority 1) and L (burst 2, priority 5), both at t=0,
//! interval 1, amount 1, preemptive: L reaches priority 0 at t=5 and takes
//! the CPU, where static priority would make it wait until t=10.

use super::criteria::EffectivePriority;
use super::{RawRun, RunState, Scheduler, Simulation, StateExt};
use crate::error::SimulationError;
use crate::models::{Annotations, Process};
use crate::registry::AlgorithmKind;

/// Aging bookkeeping for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgingState {
    /// Priority used for selection.
    pub effective_priority: i32,
    /// Units waited since the last dispatch or the last aging step.
    pub waited: i64,
}

impl StateExt for AgingState {
    fn init(process: &Process) -> Self {
        Self {
            effective_priority: process.priority,
            waited: 0,
        }
    }

    fn annotate(&self, annotations: &mut Annotations) {
        annotations.final_priority = Some(self.effective_priority);
    }
}

/// Priority scheduling with aging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aging {
    /// Waiting units per aging step. 0 disables aging.
    pub interval: i64,
    /// Priority decrease per aging step. 0 disables aging.
    pub amount: i64,
    /// Re-evaluate every time unit instead of at completions.
    pub preemptive: bool,
}

impl Aging {
    /// Creates an aging scheduler.
    pub fn new(interval: i64, amount: i64, preemptive: bool) -> Self {
        Self {
            interval,
            amount,
            preemptive,
        }
    }

    fn enabled(&self) -> bool {
        self.interval > 0 && self.amount > 0
    }

    /// Credits `units` of waiting to `state`, applying any aging steps.
    fn age(&self, state: &mut RunState<AgingState>, units: i64) {
        if !self.enabled() || units <= 0 {
            return;
        }

        let floor = state.priority.min(0);
        let ext = &mut state.ext;
        ext.waited += units;
        let steps = ext.waited / self.interval;
        ext.waited %= self.interval;

        let lowered = i64::from(ext.effective_priority)
            .saturating_sub(steps.saturating_mul(self.amount))
            .max(i64::from(floor));
        ext.effective_priority = i32::try_from(lowered).unwrap_or(floor);
    }
}

impl Default for Aging {
    fn default() -> Self {
        Self::new(1, 1, true)
    }
}

impl Scheduler for Aging {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Aging
    }

    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError> {
        let mut sim: Simulation<AgingState> = Simulation::new(processes);

        while !sim.is_finished() {
            sim.step()?;
            let Some(idx) = sim.select(&EffectivePriority) else {
                sim.idle_until_next_arrival()?;
                continue;
            };

            let start = sim.now();
            sim.state_mut(idx).ext.waited = 0;
            let units = if self.preemptive {
                1
            } else {
                sim.state(idx).remaining
            };
            sim.execute(idx, units);
            let end = sim.now();

            // Everyone else who was in the system during the slice waited.
            for other in 0..sim.states().len() {
                if other == idx {
                    continue;
                }
                let state = sim.state_mut(other);
                if state.is_completed() {
                    continue;
                }
                let waited = end - state.arrival_time.max(start);
                self.age(state, waited);
            }
        }

        sim.finish()
    }
}
