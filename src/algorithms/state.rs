//! Per-run process state.

use std::fmt::Debug;

use crate::error::SimulationError;
use crate::models::{Annotations, Process, ProcessOutcome};

/// Policy-specific state carried alongside each process.
///
/// Policies that need extra bookkeeping (aging counters, queue levels)
/// declare it as a type implementing this trait; the rest use `()`.
pub trait StateExt: Clone + Debug {
    /// Initial state for a freshly admitted process.
    fn init(process: &Process) -> Self;

    /// Copies tracked values into the final outcome.
    fn annotate(&self, _annotations: &mut Annotations) {}
}

impl StateExt for () {
    fn init(_process: &Process) -> Self {}
}

/// Mutable state of one process during one simulation.
///
/// Created from the input [`Process`], mutated only by the owning
/// simulation loop and turned into a [`ProcessOutcome`] at the end.
///
/// # Invariants
/// - `0 <= remaining <= burst_time`
/// - `start_time` is set once, at first dispatch
/// - `completion_time` is set once, when `remaining` reaches 0
#[derive(Debug, Clone)]
pub struct RunState<X = ()> {
    /// Process identifier.
    pub id: String,
    /// Arrival time.
    pub arrival_time: i64,
    /// Total CPU demand.
    pub burst_time: i64,
    /// Static priority.
    pub priority: i32,
    /// CPU time still needed.
    pub remaining: i64,
    /// First dispatch, once dispatched.
    pub start_time: Option<i64>,
    /// Completion, once completed.
    pub completion_time: Option<i64>,
    /// Policy-specific state.
    pub ext: X,
}

impl<X: StateExt> RunState<X> {
    /// Creates the initial state for a process.
    pub fn new(process: &Process) -> Self {
        Self {
            id: process.id.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            remaining: process.burst_time,
            start_time: None,
            completion_time: None,
            ext: X::init(process),
        }
    }

    /// Final snapshot.
    ///
    /// Fails if the process was never dispatched or never completed.
    pub fn outcome(&self) -> Result<ProcessOutcome, SimulationError> {
        match (self.start_time, self.completion_time) {
            (Some(start_time), Some(completion_time)) => {
                let mut annotations = Annotations::default();
                self.ext.annotate(&mut annotations);
                Ok(ProcessOutcome {
                    id: self.id.clone(),
                    arrival_time: self.arrival_time,
                    burst_time: self.burst_time,
                    priority: self.priority,
                    start_time,
                    completion_time,
                    annotations,
                })
            }
            _ => Err(SimulationError::Incomplete {
                id: self.id.clone(),
            }),
        }
    }
}

impl<X> RunState<X> {
    /// Whether all CPU demand has been served.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Whether the process has arrived and still needs CPU at `now`.
    #[inline]
    pub fn is_ready(&self, now: i64) -> bool {
        self.arrival_time <= now && !self.is_completed()
    }

    /// Time spent in the system without running, as of `now`.
    #[inline]
    pub fn waited(&self, now: i64) -> i64 {
        now - self.arrival_time - (self.burst_time - self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let s: RunState = RunState::new(&Process::new("P1", 2, 5).with_priority(3));
        assert_eq!(s.remaining, 5);
        assert_eq!(s.priority, 3);
        assert!(!s.is_completed());
        assert!(!s.is_ready(1));
        assert!(s.is_ready(2));
        assert_eq!(s.waited(6), 4);
    }

    #[test]
    fn test_outcome_requires_completion() {
        let mut s: RunState = RunState::new(&Process::new("P1", 0, 2));
        assert_eq!(
            s.outcome().unwrap_err(),
            SimulationError::Incomplete { id: "P1".into() }
        );

        s.start_time = Some(1);
        s.remaining = 0;
        s.completion_time = Some(3);
        let o = s.outcome().unwrap();
        assert_eq!(o.start_time, 1);
        assert_eq!(o.completion_time, 3);
        assert_eq!(o.annotations, Annotations::default());
    }
}
