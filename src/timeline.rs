//! Timeline compaction.
//!
//! Preemptive policies record one event per executed time unit; the
//! compactor folds those fragments into maximal runs so every consumer
//! (metrics, serialization, charts) sees the minimal interval sequence.
//!
//! # Algorithm
//! Single pass with a running accumulator. An event extends the
//! accumulator when it has the same slot and starts exactly where the
//! accumulator ends; otherwise the accumulator is emitted. Empty intervals
//! (`start >= end`) are discarded before merging.
//!
//! # Complexity
//! O(n) time, O(n) output.

use crate::models::GanttEvent;

/// Merges adjacent same-slot intervals and drops empty ones.
///
/// The result has no empty events and no two consecutive events with the
/// same slot and touching boundaries. Applying it twice yields the same
/// output as applying it once.
///
/// # Example
///
/// ```
/// use u_cpusched::models::GanttEvent;
/// use u_cpusched::timeline::compact;
///
/// let raw = vec![
///     GanttEvent::process("P1", 0, 1),
///     GanttEvent::process("P1", 1, 2),
///     GanttEvent::idle(2, 2),
///     GanttEvent::process("P2", 2, 3),
/// ];
/// assert_eq!(
///     compact(&raw),
///     vec![GanttEvent::process("P1", 0, 2), GanttEvent::process("P2", 2, 3)]
/// );
/// ```
pub fn compact(events: &[GanttEvent]) -> Vec<GanttEvent> {
    let mut merged: Vec<GanttEvent> = Vec::with_capacity(events.len());
    let mut current: Option<GanttEvent> = None;

    for event in events.iter().filter(|e| !e.is_empty()) {
        if let Some(acc) = current.as_mut() {
            if acc.slot == event.slot && acc.end == event.start {
                acc.end = event.end;
                continue;
            }
        }
        if let Some(done) = current.replace(event.clone()) {
            merged.push(done);
        }
    }

    if let Some(done) = current {
        merged.push(done);
    }
    merged
}

/// Total time spent running processes.
pub fn busy_time(events: &[GanttEvent]) -> i64 {
    events
        .iter()
        .filter(|e| !e.slot.is_idle())
        .map(GanttEvent::duration)
        .sum()
}

/// Total time the CPU sat idle.
pub fn idle_time(events: &[GanttEvent]) -> i64 {
    events
        .iter()
        .filter(|e| e.slot.is_idle())
        .map(GanttEvent::duration)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_empty() {
        assert!(compact(&[]).is_empty());
    }

    #[test]
    fn test_compact_merges_unit_fragments() {
        let raw: Vec<GanttEvent> = (0..4).map(|t| GanttEvent::process("P1", t, t + 1)).collect();
        assert_eq!(compact(&raw), vec![GanttEvent::process("P1", 0, 4)]);
    }

    #[test]
    fn test_compact_keeps_gaps_and_switches() {
        let raw = vec![
            GanttEvent::process("P1", 0, 2),
            GanttEvent::process("P2", 2, 3),
            GanttEvent::process("P1", 3, 4),
            // Same process but not touching: stays separate.
            GanttEvent::process("P1", 5, 6),
        ];
        assert_eq!(compact(&raw), raw);
    }

    #[test]
    fn test_compact_drops_zero_length_between_runs() {
        // A zero-length artifact between two fragments of the same process
        // must not block the merge.
        let raw = vec![
            GanttEvent::process("P1", 0, 2),
            GanttEvent::process("P2", 2, 2),
            GanttEvent::process("P1", 2, 3),
        ];
        assert_eq!(compact(&raw), vec![GanttEvent::process("P1", 0, 3)]);
    }

    #[test]
    fn test_compact_merges_idle() {
        let raw = vec![
            GanttEvent::idle(0, 1),
            GanttEvent::idle(1, 3),
            GanttEvent::process("P1", 3, 4),
        ];
        assert_eq!(
            compact(&raw),
            vec![GanttEvent::idle(0, 3), GanttEvent::process("P1", 3, 4)]
        );
    }

    #[test]
    fn test_compact_idempotent() {
        let raw = vec![
            GanttEvent::process("A", 0, 1),
            GanttEvent::process("A", 1, 2),
            GanttEvent::process("B", 2, 3),
            GanttEvent::idle(3, 3),
            GanttEvent::idle(3, 5),
            GanttEvent::process("B", 5, 6),
            GanttEvent::process("B", 6, 7),
        ];
        let once = compact(&raw);
        assert_eq!(compact(&once), once);
        assert_eq!(once.len(), 4);
    }

    #[test]
    fn test_busy_and_idle_time() {
        let events = vec![
            GanttEvent::idle(0, 2),
            GanttEvent::process("P1", 2, 5),
            GanttEvent::idle(5, 6),
            GanttEvent::process("P2", 6, 10),
        ];
        assert_eq!(busy_time(&events), 7);
        assert_eq!(idle_time(&events), 3);
    }
}
