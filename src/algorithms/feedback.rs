//! Multilevel feedback queue.
//!
//! Several FIFO queues, ordered by level priority (lower value served
//! first), each with its own quantum. New arrivals enter the top level. A
//! process that uses its whole quantum without finishing is demoted one
//! level; the bottom level keeps it. Processes are never promoted.
//!
//! A dispatched slice is never cut short: an arrival at a higher level
//! waits until the running slice ends, then goes ahead of the demoted
//! process in the queue order.

use std::collections::VecDeque;

use super::{RawRun, Scheduler, Simulation, StateExt};
use crate::config::QueueLevel;
use crate::error::SimulationError;
use crate::models::{Annotations, Process};
use crate::registry::AlgorithmKind;

/// Queue level a process currently sits in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackState {
    /// Index into the sorted level list.
    pub level: usize,
}

impl StateExt for FeedbackState {
    fn init(_process: &Process) -> Self {
        Self::default()
    }

    fn annotate(&self, annotations: &mut Annotations) {
        annotations.final_level = Some(self.level);
    }
}

/// Multilevel feedback queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    levels: Vec<QueueLevel>,
}

impl Feedback {
    /// Creates a feedback queue over `levels`.
    ///
    /// Levels are served in ascending `priority` order; equal priorities
    /// keep their given order. An empty list falls back to the default
    /// three levels.
    pub fn new(mut levels: Vec<QueueLevel>) -> Self {
        if levels.is_empty() {
            levels = QueueLevel::defaults();
        }
        levels.sort_by_key(|l| l.priority);
        Self { levels }
    }

    /// Levels in service order.
    pub fn levels(&self) -> &[QueueLevel] {
        &self.levels
    }
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(QueueLevel::defaults())
    }
}

impl Scheduler for Feedback {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Feedback
    }

    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError> {
        let bottom = self.levels.len() - 1;
        let mut sim: Simulation<FeedbackState> = Simulation::new(processes);
        let mut queues: Vec<VecDeque<usize>> = vec![VecDeque::new(); self.levels.len()];
        queues[0].extend(sim.admit());

        while !sim.is_finished() {
            sim.step()?;
            let next = queues
                .iter_mut()
                .enumerate()
                .find_map(|(level, q)| q.pop_front().map(|idx| (level, idx)));

            let Some((level, idx)) = next else {
                sim.idle_until_next_arrival()?;
                queues[0].extend(sim.admit());
                continue;
            };

            let quantum = self.levels[level].quantum;
            sim.execute(idx, quantum);
            queues[0].extend(sim.admit());

            if !sim.state(idx).is_completed() {
                let demoted = (level + 1).min(bottom);
                sim.state_mut(idx).ext.level = demoted;
                queues[demoted].push_back(idx);
            }
        }

        sim.finish()
    }
}
