//! Crate-wide error types.
//!
//! Input problems ([`Error::Validation`], [`Error::UnknownAlgorithm`],
//! [`Error::InvalidOptions`]) are detected before any simulation runs.
//! [`SimulationError`] marks a broken internal invariant: valid input can
//! never produce one.

use thiserror::Error;

use crate::parser::ParseError;
use crate::validation::ValidationError;

/// Convenience alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the public API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The process list is malformed.
    #[error("invalid processes: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// The algorithm name is not registered.
    #[error("algorithm '{name}' not found. Available: {}", .available.join(", "))]
    UnknownAlgorithm {
        /// Name as supplied by the caller.
        name: String,
        /// Every registered name.
        available: Vec<String>,
    },

    /// An option value is out of range for the chosen algorithm.
    #[error("invalid options for {algorithm}: {reason}")]
    InvalidOptions {
        /// Canonical algorithm name.
        algorithm: String,
        /// What is wrong.
        reason: String,
    },

    /// The request itself is unusable (e.g. nothing to compare).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A simulation broke one of its own invariants.
    #[error("{algorithm} simulation failed: {source}")]
    Simulation {
        /// Canonical algorithm name.
        algorithm: String,
        /// The violated invariant.
        #[source]
        source: SimulationError,
    },

    /// Raw input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Whether the error is caused by caller input rather than a defect.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::Simulation { .. })
    }
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Validation(errors)
    }
}

/// Internal invariant violations raised by a simulation loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Processes remain but nothing is ready and nothing else will arrive,
    /// or the loop exceeded its step budget.
    #[error("no progress possible at t={time} with {remaining} process(es) unfinished")]
    Stalled {
        /// Simulation clock when the loop gave up.
        time: i64,
        /// Processes still unfinished.
        remaining: usize,
    },

    /// A process finished the run without a start or completion time.
    #[error("process '{id}' never completed")]
    Incomplete {
        /// Offending process.
        id: String,
    },

    /// Derived metrics contradict the timeline (negative wait, etc.).
    #[error("process '{id}' has inconsistent metrics: {reason}")]
    Inconsistent {
        /// Offending process.
        id: String,
        /// Which metric is wrong.
        reason: String,
    },

    /// Busy time in the timeline differs from the total CPU demand.
    #[error("timeline busy time {busy} does not match total burst {demand}")]
    TimelineMismatch {
        /// Sum of non-idle event durations.
        busy: i64,
        /// Sum of burst times.
        demand: i64,
    },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
