//! Simulation options.
//!
//! [`SimulationOptions`] is the loose, wire-level option bag: every field
//! is optional and only some apply to a given algorithm. It is resolved
//! once per run into a typed config ([`RoundRobinConfig`],
//! [`FeedbackConfig`], [`AgingConfig`]) that has defaults filled in and
//! ranges checked.
//!
//! # Defaults
//!
//! | Option | Applies to | Default | Range |
//! |--------|-----------|---------|-------|
//! | `quantum` | RR | 2 | > 0 |
//! | `levels` | FEEDBACK | q=1, q=2, q=4 | non-empty, each quantum > 0 |
//! | `agingInterval` | AGING | 1 | >= 0 (0 disables) |
//! | `agingAmount` | AGING | 1 | >= 0 (0 disables) |
//! | `preemptive` | AGING, PRIORITY_PREEMPTIVE | true | |

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::AlgorithmKind;

/// Default Round Robin quantum.
pub const DEFAULT_QUANTUM: i64 = 2;
/// Default waiting units per aging step.
pub const DEFAULT_AGING_INTERVAL: i64 = 1;
/// Default priority decrease per aging step.
pub const DEFAULT_AGING_AMOUNT: i64 = 1;

/// One queue of a multilevel feedback scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueLevel {
    /// Time slice granted at this level.
    pub quantum: i64,
    /// Service order; lower is served first.
    #[serde(default)]
    pub priority: i32,
}

impl QueueLevel {
    /// Creates a level.
    pub fn new(quantum: i64, priority: i32) -> Self {
        Self { quantum, priority }
    }

    /// Three levels with quanta 1, 2 and 4.
    pub fn defaults() -> Vec<Self> {
        vec![Self::new(1, 0), Self::new(2, 1), Self::new(4, 2)]
    }
}

/// Caller-supplied options. Unset fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOptions {
    /// Round Robin quantum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<i64>,
    /// Feedback queue levels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<QueueLevel>>,
    /// Waiting units per aging step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aging_interval: Option<i64>,
    /// Priority decrease per aging step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aging_amount: Option<i64>,
    /// Preemption for AGING and PRIORITY_PREEMPTIVE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preemptive: Option<bool>,
}

impl SimulationOptions {
    /// Creates an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the feedback levels.
    pub fn with_levels(mut self, levels: Vec<QueueLevel>) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Sets aging interval and amount.
    pub fn with_aging(mut self, interval: i64, amount: i64) -> Self {
        self.aging_interval = Some(interval);
        self.aging_amount = Some(amount);
        self
    }

    /// Sets preemption.
    pub fn with_preemptive(mut self, preemptive: bool) -> Self {
        self.preemptive = Some(preemptive);
        self
    }

    /// Effective preemption flag.
    pub fn preemptive_or_default(&self) -> bool {
        self.preemptive.unwrap_or(true)
    }
}

/// Resolved Round Robin options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinConfig {
    /// Time slice, > 0.
    pub quantum: i64,
}

impl RoundRobinConfig {
    /// Resolves and checks the quantum.
    pub fn resolve(options: &SimulationOptions) -> Result<Self> {
        let quantum = options.quantum.unwrap_or(DEFAULT_QUANTUM);
        if quantum <= 0 {
            return Err(invalid(
                AlgorithmKind::RoundRobin,
                format!("quantum must be > 0, got {quantum}"),
            ));
        }
        Ok(Self { quantum })
    }
}

impl Default for RoundRobinConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

/// Resolved feedback options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackConfig {
    /// Levels in service order (ascending priority, stable).
    pub levels: Vec<QueueLevel>,
}

impl FeedbackConfig {
    /// Resolves, checks and orders the levels.
    pub fn resolve(options: &SimulationOptions) -> Result<Self> {
        let mut levels = options.levels.clone().unwrap_or_else(QueueLevel::defaults);
        if levels.is_empty() {
            return Err(invalid(
                AlgorithmKind::Feedback,
                "levels must not be empty".to_string(),
            ));
        }
        if let Some((i, level)) = levels.iter().enumerate().find(|(_, l)| l.quantum <= 0) {
            return Err(invalid(
                AlgorithmKind::Feedback,
                format!("level {i} quantum must be > 0, got {}", level.quantum),
            ));
        }
        levels.sort_by_key(|l| l.priority);
        Ok(Self { levels })
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            levels: QueueLevel::defaults(),
        }
    }
}

/// Resolved aging options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgingConfig {
    /// Waiting units per aging step.
    pub interval: i64,
    /// Priority decrease per aging step.
    pub amount: i64,
    /// Re-evaluate every unit.
    pub preemptive: bool,
}

impl AgingConfig {
    /// Resolves and checks the aging parameters.
    pub fn resolve(options: &SimulationOptions) -> Result<Self> {
        let interval = options.aging_interval.unwrap_or(DEFAULT_AGING_INTERVAL);
        let amount = options.aging_amount.unwrap_or(DEFAULT_AGING_AMOUNT);
        if interval < 0 {
            return Err(invalid(
                AlgorithmKind::Aging,
                format!("agingInterval must be >= 0, got {interval}"),
            ));
        }
        if amount < 0 {
            return Err(invalid(
                AlgorithmKind::Aging,
                format!("agingAmount must be >= 0, got {amount}"),
            ));
        }
        Ok(Self {
            interval,
            amount,
            preemptive: options.preemptive_or_default(),
        })
    }
}

impl Default for AgingConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_AGING_INTERVAL,
            amount: DEFAULT_AGING_AMOUNT,
            preemptive: true,
        }
    }
}

fn invalid(kind: AlgorithmKind, reason: String) -> Error {
    Error::InvalidOptions {
        algorithm: kind.name().to_string(),
        reason,
    }
}
