//! Dashboard aggregation over the event log.
//!
//! Reduces the append-only [`EventLog`] into the counts and recency views the
//! tutor-facing dashboard renders. Aggregation is a pure read; it never
//! touches the log.

use serde::Serialize;

use crate::events::{Event, EventKind, EventLog};
use crate::grading::Verdict;

/// Tally for one misconception id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisconceptionCount {
    pub misconception_id: String,
    pub count: usize,
}

/// How often each misconception id appears across all events that carry one.
///
/// Sorted by descending count; ties keep first-seen order, so the output is
/// deterministic for a given log.
pub fn misconception_frequency(log: &EventLog) -> Vec<MisconceptionCount> {
    let mut counts: Vec<MisconceptionCount> = Vec::new();
    for entry in log.entries() {
        if let Some(id) = entry.event.misconception_id() {
            match counts.iter_mut().find(|c| c.misconception_id == id) {
                Some(c) => c.count += 1,
                None => counts.push(MisconceptionCount {
                    misconception_id: id.to_string(),
                    count: 1,
                }),
            }
        }
    }
    // Stable sort preserves first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// A rendered view of one recent event.
#[derive(Debug, Clone, Serialize)]
pub struct RecentEvent {
    pub seq: u64,
    pub description: String,
}

/// The tutor-facing summary of one session's activity.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Diagnostic answers analyzed.
    pub diagnostics_analyzed: usize,
    /// Practice sets generated.
    pub practice_generated: usize,
    /// Practice submissions graded.
    pub practice_attempted: usize,
    /// Practice submissions graded `Correct`.
    pub practice_correct: usize,
    /// Misconception tallies, most frequent first.
    pub misconception_frequency: Vec<MisconceptionCount>,
    /// The most recent events, newest first.
    pub recent: Vec<RecentEvent>,
}

impl DashboardSummary {
    /// Build the summary from the event log, keeping the last `recent_limit`
    /// events in the recency view.
    pub fn from_log(log: &EventLog, recent_limit: usize) -> Self {
        let practice_correct = log
            .entries()
            .iter()
            .filter(|e| {
                matches!(
                    e.event,
                    Event::PracticeAttempted {
                        verdict: Verdict::Correct,
                        ..
                    }
                )
            })
            .count();

        Self {
            diagnostics_analyzed: log.total_of(EventKind::DiagnosticAnalyzed),
            practice_generated: log.total_of(EventKind::PracticeGenerated),
            practice_attempted: log.total_of(EventKind::PracticeAttempted),
            practice_correct,
            misconception_frequency: misconception_frequency(log),
            recent: log
                .recent(recent_limit)
                .into_iter()
                .map(|entry| RecentEvent {
                    seq: entry.seq,
                    description: describe(&entry.event),
                })
                .collect(),
        }
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::DiagnosticAnalyzed {
            question_id,
            misconception_id,
        } => format!("analyzed {question_id}: {misconception_id}"),
        Event::PracticeGenerated {
            question_id,
            misconception_id,
        } => format!("practice generated for {question_id} ({misconception_id})"),
        Event::PracticeAttempted {
            question_id,
            practice_id,
            verdict,
            ..
        } => format!("practice {practice_id} for {question_id}: {verdict}"),
    }
}
