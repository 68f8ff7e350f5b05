//! Timeline (Gantt) model.
//!
//! A timeline is an ordered sequence of half-open intervals `[start, end)`,
//! each attributed either to one process or to the idle CPU.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::process::IDLE_ID;

/// Who holds the CPU during an interval.
///
/// Serialized as a bare string: the process id, or `"IDLE"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Slot {
    /// The CPU runs the named process.
    Process(String),
    /// Nothing is ready.
    Idle,
}

impl Slot {
    /// Whether this is an idle slot.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Slot::Idle)
    }

    /// Process id, or `None` for idle slots.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            Slot::Process(id) => Some(id),
            Slot::Idle => None,
        }
    }

    /// Wire representation (`"IDLE"` for idle slots).
    pub fn as_str(&self) -> &str {
        match self {
            Slot::Process(id) => id,
            Slot::Idle => IDLE_ID,
        }
    }
}

impl From<String> for Slot {
    fn from(value: String) -> Self {
        if value == IDLE_ID {
            Slot::Idle
        } else {
            Slot::Process(value)
        }
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Process(id) => id,
            Slot::Idle => IDLE_ID.to_string(),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interval of a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttEvent {
    /// CPU holder (`processId` on the wire).
    #[serde(rename = "processId")]
    pub slot: Slot,
    /// Interval start (inclusive).
    pub start: i64,
    /// Interval end (exclusive).
    pub end: i64,
}

impl GanttEvent {
    /// Creates an event for a process.
    pub fn process(id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            slot: Slot::Process(id.into()),
            start,
            end,
        }
    }

    /// Creates an idle event.
    pub fn idle(start: i64, end: i64) -> Self {
        Self {
            slot: Slot::Idle,
            start,
            end,
        }
    }

    /// Interval length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether the interval is non-empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
