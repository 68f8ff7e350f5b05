//! Input validation for process lists.
//!
//! Checks structural integrity of the processes before any simulation
//! runs. Detects:
//! - Empty input
//! - Missing, reserved, or duplicate IDs
//! - Negative or non-integer arrival times
//! - Non-positive or non-integer burst times
//! - Non-numeric priorities
//!
//! Every problem is reported, not just the first one. Messages are
//! qualified with the 1-based record position and the id when known.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Process, ProcessRecord, IDLE_ID};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// 0-based position of the offending record, if record-specific.
    pub index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyInput,
    /// A record has no id (or an empty one).
    MissingId,
    /// A record uses the id reserved for idle timeline slots.
    ReservedId,
    /// Two records share the same id.
    DuplicateId,
    /// Arrival time is missing, negative, or not an integer.
    InvalidArrivalTime,
    /// Burst time is missing, non-positive, or not an integer.
    InvalidBurstTime,
    /// Priority is present but not an integer.
    InvalidPriority,
    /// The latest arrival plus the total burst does not fit in `i64`.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        index: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            index,
            message: message.into(),
        }
    }
}

/// Validates an already typed process list.
///
/// Checks:
/// 1. The list is non-empty
/// 2. Every id is non-empty and not `"IDLE"`
/// 3. No duplicate ids
/// 4. `arrival_time >= 0`
/// 5. `burst_time > 0`
/// 6. The latest arrival plus the total burst fits in `i64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    if processes.is_empty() {
        return Err(vec![empty_input()]);
    }

    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for (index, p) in processes.iter().enumerate() {
        check_id(Some(p.id.as_str()), index, &mut ids, &mut errors);

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidArrivalTime,
                Some(index),
                format!("{}: Invalid arrival time", label(index, Some(&p.id))),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBurstTime,
                Some(index),
                format!(
                    "{}: Invalid burst time (must be > 0)",
                    label(index, Some(&p.id))
                ),
            ));
        }
    }

    if errors.is_empty() {
        errors.extend(check_horizon(processes));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates raw records and converts them into typed processes.
///
/// Integer fields may arrive as JSON numbers or as numeric strings
/// (`"12"`, as produced by text parsers). A missing priority defaults to 0.
///
/// # Returns
/// The typed processes in input order, or every detected issue.
pub fn validate_records(records: &[ProcessRecord]) -> Result<Vec<Process>, Vec<ValidationError>> {
    if records.is_empty() {
        return Err(vec![empty_input()]);
    }

    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    let mut processes = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let id = record.id.as_deref();
        check_id(id, index, &mut ids, &mut errors);
        let name = label(index, id.filter(|s| !s.trim().is_empty()));

        let arrival = record
            .arrival_time
            .as_ref()
            .and_then(integer_value)
            .filter(|&t| t >= 0);
        if arrival.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidArrivalTime,
                Some(index),
                format!("{name}: Invalid arrival time"),
            ));
        }

        let burst = record
            .burst_time
            .as_ref()
            .and_then(integer_value)
            .filter(|&t| t > 0);
        if burst.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBurstTime,
                Some(index),
                format!("{name}: Invalid burst time (must be > 0)"),
            ));
        }

        let priority = match &record.priority {
            None | Some(Value::Null) => Some(0),
            Some(v) => integer_value(v).and_then(|p| i32::try_from(p).ok()),
        };
        if priority.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPriority,
                Some(index),
                format!("{name}: Invalid priority"),
            ));
        }

        if let (Some(id), Some(arrival), Some(burst), Some(priority)) = (id, arrival, burst, priority)
        {
            processes.push(Process::new(id.trim(), arrival, burst).with_priority(priority));
        }
    }

    if errors.is_empty() {
        errors.extend(check_horizon(&processes));
    }

    if errors.is_empty() {
        Ok(processes)
    } else {
        Err(errors)
    }
}

/// Every simulated time lies in `0..=max arrival + total burst`.
fn check_horizon(processes: &[Process]) -> Option<ValidationError> {
    let latest = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .try_fold(latest, |acc, p| acc.checked_add(p.burst_time));
    horizon.is_none().then(|| {
        ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            None,
            "Arrival and burst times are too large to simulate",
        )
    })
}

fn empty_input() -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::EmptyInput,
        None,
        "No valid processes found",
    )
}

fn check_id<'a>(
    id: Option<&'a str>,
    index: usize,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let id = match id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                Some(index),
                format!("{}: Missing id", label(index, None)),
            ));
            return;
        }
    };

    if id == IDLE_ID {
        errors.push(ValidationError::new(
            ValidationErrorKind::ReservedId,
            Some(index),
            format!("{}: Id '{IDLE_ID}' is reserved", label(index, Some(id))),
        ));
    } else if !seen.insert(id) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            Some(index),
            format!("{}: Duplicate id", label(index, Some(id))),
        ));
    }
}

fn label(index: usize, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("Process {} ('{}')", index + 1, id),
        None => format!("Process {}", index + 1),
    }
}

/// Reads an integer from a JSON number or a numeric string.
///
/// Fractional values are rejected rather than truncated.
fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
