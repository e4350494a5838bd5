//! Append-only session event log.
//!
//! Events record pedagogically meaningful occurrences. The log has exactly
//! one mutator, [`EventLog::append`]; nothing is ever removed or reordered,
//! so within a session the log length is monotonically non-decreasing and
//! insertion order is chronological order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grading::Verdict;

/// One pedagogical occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A diagnostic answer was classified.
    DiagnosticAnalyzed {
        question_id: String,
        misconception_id: String,
    },
    /// Practice questions were assigned for a detected misconception.
    PracticeGenerated {
        question_id: String,
        misconception_id: String,
    },
    /// A practice submission was graded.
    PracticeAttempted {
        question_id: String,
        practice_id: String,
        misconception_id: String,
        verdict: Verdict,
    },
}

/// Event tag, for counting by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DiagnosticAnalyzed,
    PracticeGenerated,
    PracticeAttempted,
}

impl Event {
    /// The tag for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::DiagnosticAnalyzed { .. } => EventKind::DiagnosticAnalyzed,
            Event::PracticeGenerated { .. } => EventKind::PracticeGenerated,
            Event::PracticeAttempted { .. } => EventKind::PracticeAttempted,
        }
    }

    /// The misconception id this event carries. Every current variant
    /// carries one; aggregation goes through this accessor so a future
    /// variant without one tallies correctly.
    pub fn misconception_id(&self) -> Option<&str> {
        match self {
            Event::DiagnosticAnalyzed {
                misconception_id, ..
            }
            | Event::PracticeGenerated {
                misconception_id, ..
            }
            | Event::PracticeAttempted {
                misconception_id, ..
            } => Some(misconception_id),
        }
    }
}

/// An event plus its log envelope: sequence number and wall-clock timestamp.
///
/// Ordering semantics come from `seq` (insertion order); `recorded_at` is
/// informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub seq: u64,
    pub recorded_at: DateTime<Utc>,
    pub event: Event,
}

/// Append-only record of session events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. The only mutator.
    pub fn append(&mut self, event: Event) {
        let seq = self.entries.len() as u64;
        tracing::debug!(seq, ?event, "event appended");
        self.entries.push(LoggedEvent {
            seq,
            recorded_at: Utc::now(),
            event,
        });
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[LoggedEvent] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of events matching a tag.
    pub fn total_of(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|e| e.event.kind() == kind).count()
    }

    /// The last `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&LoggedEvent> {
        self.entries.iter().rev().take(n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzed(question_id: &str, misconception_id: &str) -> Event {
        Event::DiagnosticAnalyzed {
            question_id: question_id.into(),
            misconception_id: misconception_id.into(),
        }
    }

    #[test]
    fn append_assigns_monotonic_sequence() {
        let mut log = EventLog::new();
        log.append(analyzed("q1", "M1"));
        log.append(analyzed("q2", "M2"));

        let seqs: Vec<u64> = log.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn total_of_counts_by_kind() {
        let mut log = EventLog::new();
        log.append(analyzed("q1", "M1"));
        log.append(Event::PracticeGenerated {
            question_id: "q1".into(),
            misconception_id: "M1".into(),
        });
        log.append(Event::PracticeAttempted {
            question_id: "q1".into(),
            practice_id: "p1".into(),
            misconception_id: "M1".into(),
            verdict: Verdict::Correct,
        });
        log.append(analyzed("q2", "M2"));

        assert_eq!(log.total_of(EventKind::DiagnosticAnalyzed), 2);
        assert_eq!(log.total_of(EventKind::PracticeGenerated), 1);
        assert_eq!(log.total_of(EventKind::PracticeAttempted), 1);
    }

    #[test]
    fn recent_is_most_recent_first() {
        let mut log = EventLog::new();
        log.append(analyzed("q1", "M1"));
        log.append(analyzed("q2", "M2"));
        log.append(analyzed("q3", "M3"));

        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].seq, 2);
        assert_eq!(recent[1].seq, 1);

        // Asking for more than exists returns everything.
        assert_eq!(log.recent(10).len(), 3);
    }

    #[test]
    fn event_serde_is_tagged() {
        let event = Event::PracticeAttempted {
            question_id: "q1".into(),
            practice_id: "p1".into(),
            misconception_id: "M1".into(),
            verdict: Verdict::Almost,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"practice_attempted\""));
        assert!(json.contains("\"verdict\":\"almost\""));
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
