//! CPU scheduling policies.
//!
//! Each policy is a discrete-event loop over a shared [`Simulation`] core
//! and implements [`Scheduler`]. Policies emit raw events (possibly one per
//! time unit); callers compact them with [`crate::timeline::compact`].
//!
//! # Policies
//!
//! | Policy | Preemption | Selection |
//! |--------|-----------|-----------|
//! | [`Fcfs`] | none | arrival |
//! | [`Sjf`] | none | burst |
//! | [`Srt`] | every unit | remaining |
//! | [`RoundRobin`] | quantum | FIFO queue |
//! | [`Hrrn`] | none | response ratio |
//! | [`Feedback`] | per-level quantum | queue level |
//! | [`Aging`] | configurable | aged priority |
//! | [`PriorityScheduling`] | configurable | static priority |
//!
//! All selections share the tie-break chain described in [`criteria`].
//!
//! # Usage
//!
//! ```
//! use u_cpusched::algorithms::{Scheduler, Srt};
//! use u_cpusched::models::{GanttEvent, Process};
//! use u_cpusched::timeline::compact;
//!
//! let processes = vec![Process::new("P1", 0, 4), Process::new("P2", 1, 1)];
//! let run = Srt.run(&processes).unwrap();
//! assert_eq!(
//!     compact(&run.events),
//!     vec![
//!         GanttEvent::process("P1", 0, 1),
//!         GanttEvent::process("P2", 1, 2),
//!         GanttEvent::process("P1", 2, 5),
//!     ]
//! );
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9

mod aging;
pub mod criteria;
mod fcfs;
mod feedback;
mod hrrn;
mod priority;
mod round_robin;
mod simulation;
mod sjf;
mod srt;
mod state;

pub use aging::{Aging, AgingState};
pub use fcfs::Fcfs;
pub use feedback::{Feedback, FeedbackState};
pub use hrrn::{Hrrn, HrrnState};
pub use priority::PriorityScheduling;
pub use round_robin::RoundRobin;
pub use simulation::{Dispatch, Simulation};
pub use sjf::Sjf;
pub use srt::Srt;
pub use state::{RunState, StateExt};

use std::fmt::Debug;

use crate::error::SimulationError;
use crate::models::{GanttEvent, Process, ProcessOutcome};
use crate::registry::AlgorithmKind;
use crate::timeline;

/// Output of one policy run, before compaction and metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRun {
    /// Execution events in time order, possibly fragmented.
    pub events: Vec<GanttEvent>,
    /// Final state of every process, sorted by id.
    pub outcomes: Vec<ProcessOutcome>,
}

impl RawRun {
    /// Compacted timeline.
    pub fn timeline(&self) -> Vec<GanttEvent> {
        timeline::compact(&self.events)
    }
}

/// A CPU scheduling policy.
///
/// Implementations are stateless between runs: all per-run state lives
/// inside [`Scheduler::run`], so one instance may serve concurrent runs.
pub trait Scheduler: Send + Sync + Debug {
    /// Registry entry this scheduler implements.
    fn kind(&self) -> AlgorithmKind;

    /// Simulates `processes` to completion.
    ///
    /// Input is assumed validated (unique ids, `burst_time > 0`,
    /// `arrival_time >= 0`). An error means the policy broke an internal
    /// invariant.
    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError>;

    /// Registry name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared assertions for policy tests.

    use super::*;

    /// Runs a policy and checks invariants every correct run satisfies.
    pub fn run_checked(scheduler: &dyn Scheduler, processes: &[Process]) -> RawRun {
        let run = scheduler.run(processes).unwrap();
        let compacted = run.timeline();

        let demand: i64 = processes.iter().map(|p| p.burst_time).sum();
        assert_eq!(timeline::busy_time(&compacted), demand, "{}", scheduler.name());
        assert_eq!(run.outcomes.len(), processes.len());
        for o in &run.outcomes {
            assert!(o.start_time >= o.arrival_time, "{} started early", o.id);
            assert!(
                o.completion_time - o.arrival_time >= o.burst_time,
                "{} finished too fast",
                o.id
            );
        }
        for pair in compacted.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "timeline has a gap");
        }
        run
    }

    /// Compacted timeline as `(slot, start, end)` triples.
    pub fn bars(run: &RawRun) -> Vec<(String, i64, i64)> {
        run.timeline()
            .into_iter()
            .map(|e| (e.slot.to_string(), e.start, e.end))
            .collect()
    }

    /// `(start, completion)` of a process.
    pub fn times(run: &RawRun, id: &str) -> (i64, i64) {
        let o = run.outcomes.iter().find(|o| o.id == id).unwrap();
        (o.start_time, o.completion_time)
    }

    /// Waiting time of a process.
    pub fn waiting(run: &RawRun, id: &str) -> i64 {
        let o = run.outcomes.iter().find(|o| o.id == id).unwrap();
        o.completion_time - o.arrival_time - o.burst_time
    }

    /// Shorthand for building owned bar tuples.
    pub fn bar(slot: &str, start: i64, end: i64) -> (String, i64, i64) {
        (slot.to_string(), start, end)
    }
}
