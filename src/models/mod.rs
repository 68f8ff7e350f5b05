//! CPU scheduling domain models.
//!
//! Provides the data types shared by every scheduling policy: the input
//! process, the raw record accepted from input collaborators, timeline
//! events and the final per-process snapshot.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Textbook term | Output field |
//! |------------|---------------|--------------|
//! | Process | Job / PCB | `processes[]` |
//! | GanttEvent | Gantt chart bar | `gantt[]` |
//! | Slot::Idle | Idle CPU | `"IDLE"` |
//! | ProcessOutcome | Completed PCB | per-process metrics |

mod gantt;
mod outcome;
mod process;

pub use gantt::{GanttEvent, Slot};
pub use outcome::{Annotations, ProcessOutcome};
pub use process::{Process, ProcessRecord, IDLE_ID};
