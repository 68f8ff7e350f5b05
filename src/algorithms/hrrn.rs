//! Highest Response Ratio Next.
//!
//! Non-preemptive. At each completion the ready process with the largest
//! `(waiting + burst) / burst` runs to completion. Waiting raises the
//! ratio, so long jobs cannot starve the way they can under SJF.

use super::criteria::{HighestResponseRatio, ResponseRatio};
use super::{RawRun, Scheduler, Simulation, StateExt};
use crate::error::SimulationError;
use crate::models::{Annotations, Process};
use crate::registry::AlgorithmKind;

/// Response ratio observed when the process was dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HrrnState {
    /// Ratio at dispatch.
    pub response_ratio: Option<f64>,
}

impl StateExt for HrrnState {
    fn init(_process: &Process) -> Self {
        Self::default()
    }

    fn annotate(&self, annotations: &mut Annotations) {
        annotations.response_ratio = self.response_ratio;
    }
}

/// Highest Response Ratio Next.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hrrn;

impl Scheduler for Hrrn {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Hrrn
    }

    fn run(&self, processes: &[Process]) -> Result<RawRun, SimulationError> {
        let mut sim: Simulation<HrrnState> = Simulation::new(processes);

        while !sim.is_finished() {
            sim.step()?;
            let Some(idx) = sim.select(&HighestResponseRatio) else {
                sim.idle_until_next_arrival()?;
                continue;
            };

            let now = sim.now();
            let state = sim.state_mut(idx);
            let ratio = ResponseRatio::new(state.waited(now), state.burst_time);
            state.ext.response_ratio = Some(ratio.value());
            let remaining = state.remaining;
            sim.execute(idx, remaining);
        }

        sim.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{bar, bars, run_checked};

    fn ratio(run: &RawRun, id: &str) -> f64 {
        run.outcomes
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| o.annotations.response_ratio)
            .unwrap()
    }

    #[test]
    fn test_hrrn_prefers_higher_ratio() {
        let processes = vec![
            Process::new("P1", 0, 3),
            Process::new("P2", 1, 5),
            Process::new("P3", 2, 2),
        ];
        let run = run_checked(&Hrrn, &processes);

        // At t=3: P2 = (2+5)/5 = 1.4, P3 = (1+2)/2 = 1.5
        assert_eq!(
            bars(&run),
            vec![bar("P1", 0, 3), bar("P3", 3, 5), bar("P2", 5, 10)]
        );
        assert!((ratio(&run, "P1") - 1.0).abs() < 1e-12);
        assert!((ratio(&run, "P3") - 1.5).abs() < 1e-12);
        assert!((ratio(&run, "P2") - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_long_job_eventually_wins() {
        // SJF would keep picking the short jobs; HRRN lets LONG in once
        // its wait dominates.
        let processes = vec![
            Process::new("A", 0, 2),
            Process::new("LONG", 0, 4),
            Process::new("S1", 1, 2),
            Process::new("S2", 3, 2),
        ];
        let run = run_checked(&Hrrn, &processes);
        // t=2: LONG (2+4)/4 = 1.5, S1 (1+2)/2 = 1.5 -> tie, LONG arrived first.
        assert_eq!(bars(&run)[1], bar("LONG", 2, 6));
    }
}
