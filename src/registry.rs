//! Algorithm registry.
//!
//! Maps the nine public algorithm names to scheduler instances. Names are
//! matched case-insensitively, with surrounding whitespace ignored and `-`
//! or spaces accepted in place of `_`.
//!
//! | Name | Scheduler |
//! |------|-----------|
//! | FCFS | [`Fcfs`] |
//! | SJF | [`Sjf`] |
//! | SRT | [`Srt`] |
//! | RR | [`RoundRobin`] |
//! | HRRN | [`Hrrn`] |
//! | FEEDBACK | [`Feedback`] |
//! | AGING | [`Aging`] |
//! | PRIORITY_PREEMPTIVE | [`PriorityScheduling`] |
//! | PRIORITY_NON_PREEMPTIVE | [`PriorityScheduling`] |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithms::{
    Aging, Fcfs, Feedback, Hrrn, PriorityScheduling, RoundRobin, Scheduler, Sjf, Srt,
};
use crate::config::{AgingConfig, FeedbackConfig, RoundRobinConfig, SimulationOptions};
use crate::error::{Error, Result};

/// Registered algorithms, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlgorithmKind {
    /// First Come, First Served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First.
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest Remaining Time.
    #[serde(rename = "SRT")]
    Srt,
    /// Round Robin.
    #[serde(rename = "RR")]
    RoundRobin,
    /// Highest Response Ratio Next.
    #[serde(rename = "HRRN")]
    Hrrn,
    /// Multilevel feedback queue.
    #[serde(rename = "FEEDBACK")]
    Feedback,
    /// Priority with aging.
    #[serde(rename = "AGING")]
    Aging,
    /// Static priority, preemptive.
    #[serde(rename = "PRIORITY_PREEMPTIVE")]
    PriorityPreemptive,
    /// Static priority, non-preemptive.
    #[serde(rename = "PRIORITY_NON_PREEMPTIVE")]
    PriorityNonPreemptive,
}

impl AlgorithmKind {
    /// Every registered algorithm.
    pub const ALL: [AlgorithmKind; 9] = [
        AlgorithmKind::Fcfs,
        AlgorithmKind::Sjf,
        AlgorithmKind::Srt,
        AlgorithmKind::RoundRobin,
        AlgorithmKind::Hrrn,
        AlgorithmKind::Feedback,
        AlgorithmKind::Aging,
        AlgorithmKind::PriorityPreemptive,
        AlgorithmKind::PriorityNonPreemptive,
    ];

    /// Canonical upper-case name.
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::Fcfs => "FCFS",
            AlgorithmKind::Sjf => "SJF",
            AlgorithmKind::Srt => "SRT",
            AlgorithmKind::RoundRobin => "RR",
            AlgorithmKind::Hrrn => "HRRN",
            AlgorithmKind::Feedback => "FEEDBACK",
            AlgorithmKind::Aging => "AGING",
            AlgorithmKind::PriorityPreemptive => "PRIORITY_PREEMPTIVE",
            AlgorithmKind::PriorityNonPreemptive => "PRIORITY_NON_PREEMPTIVE",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            AlgorithmKind::Fcfs => {
                "First Come First Serve - Non-preemptive, executes in arrival order"
            }
            AlgorithmKind::Sjf => "Shortest Job First - Non-preemptive, selects shortest burst time",
            AlgorithmKind::Srt => "Shortest Remaining Time - Preemptive SJF",
            AlgorithmKind::RoundRobin => "Round Robin - Preemptive with time quantum",
            AlgorithmKind::Hrrn => {
                "Highest Response Ratio Next - Non-preemptive, considers waiting time"
            }
            AlgorithmKind::Feedback => "Multilevel Feedback Queue - Multiple priority queues",
            AlgorithmKind::Aging => "Priority with Aging - Prevents starvation",
            AlgorithmKind::PriorityPreemptive => "Priority Scheduling - Preemptive by priority",
            AlgorithmKind::PriorityNonPreemptive => {
                "Priority Scheduling - Non-preemptive by priority"
            }
        }
    }

    /// Whether the algorithm can take the CPU from a running process
    /// under default options.
    pub fn is_preemptive(&self) -> bool {
        !matches!(
            self,
            AlgorithmKind::Fcfs
                | AlgorithmKind::Sjf
                | AlgorithmKind::Hrrn
                | AlgorithmKind::PriorityNonPreemptive
        )
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| Error::UnknownAlgorithm {
                name: s.to_string(),
                available: list_names().into_iter().map(String::from).collect(),
            })
    }
}

/// Registry entry, as listed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmInfo {
    /// Canonical name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Preemptive under default options.
    pub preemptive: bool,
}

/// Looks up an algorithm by name.
///
/// # Example
/// ```
/// use u_cpusched::registry::{resolve, AlgorithmKind};
///
/// assert!(resolve("round-robin").is_err());
/// assert_eq!(resolve(" rr ").unwrap(), AlgorithmKind::RoundRobin);
/// assert_eq!(resolve("priority-preemptive").unwrap(), AlgorithmKind::PriorityPreemptive);
/// ```
pub fn resolve(name: &str) -> Result<AlgorithmKind> {
    name.parse()
}

/// Canonical names of every registered algorithm.
pub fn list_names() -> Vec<&'static str> {
    AlgorithmKind::ALL.iter().map(AlgorithmKind::name).collect()
}

/// Every registered algorithm with its description.
pub fn list_algorithms() -> Vec<AlgorithmInfo> {
    AlgorithmKind::ALL
        .iter()
        .map(|kind| AlgorithmInfo {
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            preemptive: kind.is_preemptive(),
        })
        .collect()
}

/// Builds a scheduler for `kind`, resolving the options it uses.
///
/// Options that do not apply to `kind` are ignored.
pub fn build(kind: AlgorithmKind, options: &SimulationOptions) -> Result<Box<dyn Scheduler>> {
    let scheduler: Box<dyn Scheduler> = match kind {
        AlgorithmKind::Fcfs => Box::new(Fcfs),
        AlgorithmKind::Sjf => Box::new(Sjf),
        AlgorithmKind::Srt => Box::new(Srt),
        AlgorithmKind::RoundRobin => {
            let config = RoundRobinConfig::resolve(options)?;
            Box::new(RoundRobin::new(config.quantum))
        }
        AlgorithmKind::Hrrn => Box::new(Hrrn),
        AlgorithmKind::Feedback => {
            let config = FeedbackConfig::resolve(options)?;
            Box::new(Feedback::new(config.levels))
        }
        AlgorithmKind::Aging => {
            let config = AgingConfig::resolve(options)?;
            Box::new(Aging::new(config.interval, config.amount, config.preemptive))
        }
        AlgorithmKind::PriorityPreemptive => Box::new(PriorityScheduling {
            preemptive: options.preemptive_or_default(),
        }),
        AlgorithmKind::PriorityNonPreemptive => Box::new(PriorityScheduling::non_preemptive()),
    };
    Ok(scheduler)
}
