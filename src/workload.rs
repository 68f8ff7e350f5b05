//! Random workload generation.
//!
//! Produces valid process lists for experiments and property tests. The
//! caller supplies the RNG, so a seeded generator gives reproducible
//! workloads.
//!
//! # Example
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use u_cpusched::workload::WorkloadSpec;
//!
//! let spec = WorkloadSpec::default().with_count(4).with_burst_range(2, 6);
//! let a = spec.generate(&mut SmallRng::seed_from_u64(7));
//! let b = spec.generate(&mut SmallRng::seed_from_u64(7));
//!
//! assert_eq!(a, b);
//! assert_eq!(a[3].id, "P4");
//! assert!(a.iter().all(|p| (2..=6).contains(&p.burst_time)));
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Process;

/// Parameters of a random workload.
///
/// Ranges are inclusive. Bounds given in the wrong order are swapped, and
/// burst times are kept at least 1 so every generated list is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSpec {
    /// Number of processes.
    pub count: usize,
    /// Latest arrival time.
    pub max_arrival: i64,
    /// Shortest burst.
    pub min_burst: i64,
    /// Longest burst.
    pub max_burst: i64,
    /// Most urgent priority.
    pub min_priority: i32,
    /// Least urgent priority.
    pub max_priority: i32,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            min_priority: 0,
            max_priority: 5,
        }
    }
}

impl WorkloadSpec {
    /// Sets the number of processes.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the latest arrival time.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.min_burst = min;
        self.max_burst = max;
        self
    }

    /// Sets the priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.min_priority = min;
        self.max_priority = max;
        self
    }

    /// Generates processes `P1..Pn`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Process> {
        let max_arrival = self.max_arrival.max(0);
        let (lo, hi) = ordered(self.min_burst.max(1), self.max_burst.max(1));
        let (plo, phi) = ordered(self.min_priority, self.max_priority);

        (1..=self.count)
            .map(|i| {
                Process::new(
                    format!("P{i}"),
                    rng.random_range(0..=max_arrival),
                    rng.random_range(lo..=hi),
                )
                .with_priority(rng.random_range(plo..=phi))
            })
            .collect()
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
