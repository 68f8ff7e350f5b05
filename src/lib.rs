//! CPU scheduling simulator.
//!
//! Simulates classic uniprocessor scheduling policies over a list of
//! processes (arrival time, burst time, priority) and reports the Gantt
//! timeline, per-process timing and aggregate performance metrics. Several
//! policies can be compared side by side on the same workload.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessRecord`, `GanttEvent`,
//!   `Slot`, `ProcessOutcome`
//! - **`validation`**: Input integrity checks (empty input, duplicate or
//!   reserved IDs, negative arrivals, non-positive bursts)
//! - **`algorithms`**: The eight scheduling policies on a shared
//!   discrete-event core, plus selection criteria
//! - **`timeline`**: Gantt compaction
//! - **`metrics`**: Per-process and aggregate metrics
//! - **`config`**: Simulation options and their typed resolution
//! - **`registry`**: Algorithm names, descriptions and construction
//! - **`simulator`**: Single-run pipeline producing a `SimulationReport`
//! - **`comparison`**: Parallel multi-algorithm comparison and ranking
//! - **`parser`**: Test-case text formats (JSON, CSV, counted, line-based)
//! - **`workload`**: Random workload generation
//!
//! # Quick Start
//!
//! ```
//! use u_cpusched::{simulate, Process, SimulationOptions};
//!
//! let processes = vec![
//!     Process::new("P1", 0, 8),
//!     Process::new("P2", 1, 4),
//!     Process::new("P3", 2, 9),
//!     Process::new("P4", 3, 5),
//! ];
//! let report = simulate(&processes, "SRT", &SimulationOptions::default()).unwrap();
//!
//! let order: Vec<_> = report.gantt.iter().map(|e| e.slot.to_string()).collect();
//! assert_eq!(order, vec!["P1", "P2", "P4", "P1", "P3"]);
//! assert_eq!(report.metrics.total_time, 26);
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events (simulation start/finish at `debug`,
//! comparison summaries at `info`, per-algorithm failures at `warn`,
//! invariant violations at `error`). No subscriber is installed.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod algorithms;
pub mod comparison;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod registry;
pub mod simulator;
pub mod timeline;
pub mod validation;
pub mod workload;

pub use algorithms::Scheduler;
pub use comparison::{compare, ComparisonReport, ComparisonRequest};
pub use config::SimulationOptions;
pub use error::{Error, Result};
pub use models::{GanttEvent, Process, ProcessRecord, Slot};
pub use registry::AlgorithmKind;
pub use simulator::{simulate, SimulationReport};
