//! Selection criteria for decision-point policies.
//!
//! A criterion maps a ready process to an ordered key; the process with the
//! smallest key is dispatched. Ties on the key always fall through the same
//! chain: **arrival time ascending**, then **id ascending**. Ids are unique,
//! so every selection is a total order and repeated runs are identical.
//!
//! # Criteria
//!
//! | Criterion | Key | Used by |
//! |-----------|-----|---------|
//! | [`FirstCome`] | arrival time | FCFS |
//! | [`ShortestBurst`] | burst time | SJF |
//! | [`ShortestRemaining`] | remaining time | SRT |
//! | [`HighestResponseRatio`] | (wait + burst) / burst, descending | HRRN |
//! | [`StaticPriority`] | priority | PRIORITY_* |
//! | [`EffectivePriority`] | aged priority | AGING |

use std::cmp::{Ordering, Reverse};
use std::fmt::Debug;

use super::aging::AgingState;
use super::state::RunState;

/// A primary selection key.
///
/// # Key Convention
/// **Lower key = dispatched first.** Criteria that favour large values
/// wrap them in [`Reverse`].
pub trait Criterion<X>: Debug {
    /// Ordered key type.
    type Key: Ord;

    /// Criterion name (e.g., "SRT").
    fn name(&self) -> &'static str;

    /// Key of a ready process at time `now`.
    fn key(&self, state: &RunState<X>, now: i64) -> Self::Key;
}

/// Full ordering: criterion key, then arrival, then id.
pub fn compare<X, C: Criterion<X>>(
    criterion: &C,
    a: &RunState<X>,
    b: &RunState<X>,
    now: i64,
) -> Ordering {
    criterion
        .key(a, now)
        .cmp(&criterion.key(b, now))
        .then(a.arrival_time.cmp(&b.arrival_time))
        .then_with(|| a.id.cmp(&b.id))
}

/// Returns the index of the candidate that sorts first.
pub fn select_best<X, C: Criterion<X>>(
    criterion: &C,
    states: &[RunState<X>],
    candidates: impl IntoIterator<Item = usize>,
    now: i64,
) -> Option<usize> {
    candidates
        .into_iter()
        .min_by(|&a, &b| compare(criterion, &states[a], &states[b], now))
}

/// First come, first served.
#[derive(Debug, Clone, Copy)]
pub struct FirstCome;

impl<X> Criterion<X> for FirstCome {
    type Key = i64;

    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn key(&self, state: &RunState<X>, _now: i64) -> i64 {
        state.arrival_time
    }
}

/// Shortest total burst.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl<X> Criterion<X> for ShortestBurst {
    type Key = i64;

    fn name(&self) -> &'static str {
        "SJF"
    }

    fn key(&self, state: &RunState<X>, _now: i64) -> i64 {
        state.burst_time
    }
}

/// Shortest remaining time.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl<X> Criterion<X> for ShortestRemaining {
    type Key = i64;

    fn name(&self) -> &'static str {
        "SRT"
    }

    fn key(&self, state: &RunState<X>, _now: i64) -> i64 {
        state.remaining
    }
}

/// Lowest static priority value.
#[derive(Debug, Clone, Copy)]
pub struct StaticPriority;

impl<X> Criterion<X> for StaticPriority {
    type Key = i32;

    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn key(&self, state: &RunState<X>, _now: i64) -> i32 {
        state.priority
    }
}

/// Lowest aged (effective) priority value.
#[derive(Debug, Clone, Copy)]
pub struct EffectivePriority;

impl Criterion<AgingState> for EffectivePriority {
    type Key = i32;

    fn name(&self) -> &'static str {
        "AGING"
    }

    fn key(&self, state: &RunState<AgingState>, _now: i64) -> i32 {
        state.ext.effective_priority
    }
}

/// Highest response ratio next.
#[derive(Debug, Clone, Copy)]
pub struct HighestResponseRatio;

impl<X> Criterion<X> for HighestResponseRatio {
    type Key = Reverse<ResponseRatio>;

    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn key(&self, state: &RunState<X>, now: i64) -> Reverse<ResponseRatio> {
        Reverse(ResponseRatio::new(state.waited(now), state.burst_time))
    }
}

/// Response ratio `(waiting + burst) / burst`, compared exactly.
///
/// Ratios are ordered by cross-multiplication, so two processes with the
/// same ratio tie exactly instead of differing in the last float bit.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRatio {
    waiting: i64,
    burst: i64,
}

impl ResponseRatio {
    /// Creates a ratio. `burst` must be positive.
    pub fn new(waiting: i64, burst: i64) -> Self {
        Self { waiting, burst }
    }

    /// Floating-point value, for reporting.
    pub fn value(&self) -> f64 {
        (self.waiting + self.burst) as f64 / self.burst as f64
    }

    fn numerator(&self) -> i128 {
        i128::from(self.waiting) + i128::from(self.burst)
    }
}

impl PartialEq for ResponseRatio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ResponseRatio {}

impl PartialOrd for ResponseRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResponseRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numerator() * i128::from(other.burst))
            .cmp(&(other.numerator() * i128::from(self.burst)))
    }
}
