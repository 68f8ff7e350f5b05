//! Discrete-event simulation core shared by every policy.
//!
//! [`Simulation`] owns the clock, the run state of every process and the
//! raw event log. Policies only decide *which* process runs and for how
//! long; the core keeps the bookkeeping (first dispatch, completion, idle
//! gaps) identical across them.
//!
//! # Progress Guarantee
//! Every loop iteration must call [`Simulation::step`]. The step budget is
//! `total burst + 2n + 1`: each iteration either executes at least one time
//! unit or idles up to an arrival, so a correct policy can never exhaust it.
//! Exhaustion (or idling with nothing left to arrive) is reported as
//! [`SimulationError::Stalled`] instead of looping forever or returning a
//! partial timeline.

use std::ops::Range;

use tracing::error;

use super::criteria::{select_best, Criterion};
use super::state::{RunState, StateExt};
use super::RawRun;
use crate::error::SimulationError;
use crate::models::{GanttEvent, Process};

/// How long a selected process keeps the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Until it completes.
    ToCompletion,
    /// One time unit, then re-evaluate.
    Preemptive,
}

/// Simulation state of one run.
#[derive(Debug)]
pub struct Simulation<X = ()> {
    states: Vec<RunState<X>>,
    clock: i64,
    events: Vec<GanttEvent>,
    completed: usize,
    admitted: usize,
    steps: usize,
    step_budget: usize,
}

impl<X: StateExt> Simulation<X> {
    /// Creates a run over `processes`.
    ///
    /// States are ordered by arrival time, then id, so index order is the
    /// canonical admission order regardless of input order.
    pub fn new(processes: &[Process]) -> Self {
        let mut states: Vec<RunState<X>> = processes.iter().map(RunState::new).collect();
        states.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total_burst = states
            .iter()
            .fold(0i64, |acc, s| acc.saturating_add(s.burst_time.max(0)));
        let step_budget = usize::try_from(total_burst)
            .unwrap_or(usize::MAX)
            .saturating_add(2 * states.len() + 1);

        Self {
            states,
            clock: 0,
            events: Vec::new(),
            completed: 0,
            admitted: 0,
            steps: 0,
            step_budget,
        }
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> i64 {
        self.clock
    }

    /// All run states, in admission order.
    pub fn states(&self) -> &[RunState<X>] {
        &self.states
    }

    /// Run state at `idx`.
    pub fn state(&self, idx: usize) -> &RunState<X> {
        &self.states[idx]
    }

    /// Mutable run state at `idx`.
    pub fn state_mut(&mut self, idx: usize) -> &mut RunState<X> {
        &mut self.states[idx]
    }

    /// Whether every process has completed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.completed == self.states.len()
    }

    /// Indices of processes that have arrived and are not completed.
    pub fn ready(&self) -> impl Iterator<Item = usize> + '_ {
        let now = self.clock;
        self.states
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.is_ready(now))
            .map(|(i, _)| i)
    }

    /// Earliest arrival strictly after the current time.
    pub fn next_arrival(&self) -> Option<i64> {
        self.states
            .iter()
            .filter(|s| !s.is_completed() && s.arrival_time > self.clock)
            .map(|s| s.arrival_time)
            .min()
    }

    /// Admits every process that has arrived since the previous call.
    ///
    /// Returns the newly admitted indices, in arrival-then-id order. Used
    /// by queue-based policies to enqueue arrivals exactly once.
    pub fn admit(&mut self) -> Range<usize> {
        let start = self.admitted;
        while self.admitted < self.states.len()
            && self.states[self.admitted].arrival_time <= self.clock
        {
            self.admitted += 1;
        }
        start..self.admitted
    }

    /// Counts one loop iteration against the step budget.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        self.steps += 1;
        if self.steps > self.step_budget {
            return Err(self.stalled());
        }
        Ok(())
    }

    /// Selects the best ready process under `criterion`.
    pub fn select<C: Criterion<X>>(&self, criterion: &C) -> Option<usize> {
        select_best(criterion, &self.states, self.ready(), self.clock)
    }

    /// Records an idle interval up to the next arrival and advances the clock.
    pub fn idle_until_next_arrival(&mut self) -> Result<(), SimulationError> {
        let next = self.next_arrival().ok_or_else(|| self.stalled())?;
        self.events.push(GanttEvent::idle(self.clock, next));
        self.clock = next;
        Ok(())
    }

    /// Runs process `idx` for up to `units`, returning the units consumed.
    ///
    /// Sets the start time on first dispatch and the completion time when
    /// the remaining demand reaches zero.
    pub fn execute(&mut self, idx: usize, units: i64) -> i64 {
        let clock = self.clock;
        let state = &mut self.states[idx];
        let run = units.min(state.remaining).max(0);
        if run == 0 {
            return 0;
        }

        state.start_time.get_or_insert(clock);
        state.remaining -= run;
        self.clock += run;
        self.events
            .push(GanttEvent::process(state.id.clone(), clock, self.clock));

        if state.remaining == 0 {
            state.completion_time = Some(self.clock);
            self.completed += 1;
        }
        run
    }

    /// Standard decision-point loop: select, dispatch, repeat.
    ///
    /// Idles whenever nothing is ready. With [`Dispatch::Preemptive`] the
    /// selection is re-evaluated after every time unit.
    pub fn drive<C: Criterion<X>>(
        &mut self,
        criterion: &C,
        dispatch: Dispatch,
    ) -> Result<(), SimulationError> {
        while !self.is_finished() {
            self.step()?;
            match self.select(criterion) {
                Some(idx) => {
                    let units = match dispatch {
                        Dispatch::ToCompletion => self.states[idx].remaining,
                        Dispatch::Preemptive => 1,
                    };
                    self.execute(idx, units);
                }
                None => self.idle_until_next_arrival()?,
            }
        }
        Ok(())
    }

    /// Consumes the run, returning raw events and outcomes sorted by id.
    pub fn finish(self) -> Result<RawRun, SimulationError> {
        if !self.is_finished() {
            return Err(self.stalled());
        }

        let mut outcomes = self
            .states
            .iter()
            .map(RunState::outcome)
            .collect::<Result<Vec<_>, _>>()?;
        outcomes.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(RawRun {
            events: self.events,
            outcomes,
        })
    }

    fn stalled(&self) -> SimulationError {
        let remaining = self.states.len() - self.completed;
        error!(
            time = self.clock,
            remaining,
            steps = self.steps,
            "simulation cannot make progress"
        );
        SimulationError::Stalled {
            time: self.clock,
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::criteria::FirstCome;
    use crate::timeline::compact;

    #[test]
    fn test_new_orders_by_arrival_then_id() {
        let sim: Simulation = Simulation::new(&[
            Process::new("B", 3, 1),
            Process::new("C", 0, 1),
            Process::new("A", 3, 1),
        ]);
        let ids: Vec<_> = sim.states().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_execute_sets_times_once() {
        let mut sim: Simulation = Simulation::new(&[Process::new("P1", 0, 3)]);
        assert_eq!(sim.execute(0, 2), 2);
        assert_eq!(sim.state(0).start_time, Some(0));
        assert!(!sim.is_finished());

        // Asking for more than remains runs only what is left.
        assert_eq!(sim.execute(0, 5), 1);
        assert_eq!(sim.state(0).start_time, Some(0));
        assert_eq!(sim.state(0).completion_time, Some(3));
        assert!(sim.is_finished());
        assert_eq!(sim.execute(0, 1), 0);
    }

    #[test]
    fn test_idle_until_next_arrival() {
        let mut sim: Simulation = Simulation::new(&[Process::new("P1", 4, 1)]);
        assert_eq!(sim.ready().count(), 0);
        sim.idle_until_next_arrival().unwrap();
        assert_eq!(sim.now(), 4);
        assert_eq!(sim.ready().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_idle_without_future_arrival_stalls() {
        let mut sim: Simulation = Simulation::new(&[Process::new("P1", 0, 1)]);
        sim.execute(0, 1);
        let err = sim.idle_until_next_arrival().unwrap_err();
        assert_eq!(
            err,
            SimulationError::Stalled {
                time: 1,
                remaining: 0
            }
        );
    }

    #[test]
    fn test_step_budget_exhaustion() {
        let mut sim: Simulation = Simulation::new(&[Process::new("P1", 0, 1)]);
        // budget = 1 + 2*1 + 1 = 4
        for _ in 0..4 {
            sim.step().unwrap();
        }
        assert!(matches!(
            sim.step(),
            Err(SimulationError::Stalled { remaining: 1, .. })
        ));
    }

    #[test]
    fn test_admit_returns_each_arrival_once() {
        let mut sim: Simulation = Simulation::new(&[
            Process::new("P1", 0, 2),
            Process::new("P2", 1, 1),
            Process::new("P3", 5, 1),
        ]);
        assert_eq!(sim.admit(), 0..1);
        assert_eq!(sim.admit(), 1..1);
        sim.execute(0, 2);
        assert_eq!(sim.admit(), 1..2);
    }

    #[test]
    fn test_finish_rejects_unfinished_run() {
        let sim: Simulation = Simulation::new(&[Process::new("P1", 0, 1)]);
        assert!(sim.finish().is_err());
    }

    #[test]
    fn test_drive_emits_leading_idle() {
        let mut sim: Simulation = Simulation::new(&[Process::new("P1", 2, 3)]);
        sim.drive(&FirstCome, Dispatch::ToCompletion).unwrap();
        let run = sim.finish().unwrap();
        assert_eq!(
            compact(&run.events),
            vec![GanttEvent::idle(0, 2), GanttEvent::process("P1", 2, 5)]
        );
    }
}
