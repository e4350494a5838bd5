//! Core data model types for studycoach.
//!
//! These are the fundamental types that the entire studycoach system uses
//! to represent diagnostic questions, misconceptions, and coaching content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Synthetic misconception id for an answer the rule ladder places as correct.
pub const CORRECT_ID: &str = "CORRECT";

/// Synthetic misconception id for an answer too thin to classify.
pub const NEEDS_MORE_INPUT_ID: &str = "NEEDS_MORE_INPUT";

/// An open-ended prompt used to surface a learner's current understanding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticQuestion {
    /// Unique identifier for this question.
    pub id: String,
    /// The question text shown to the learner.
    pub question: String,
}

/// A catalogued, named incorrect mental model a learner may hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Misconception {
    /// Unique identifier (e.g. "M1").
    pub id: String,
    /// Short human-readable name.
    pub name: String,
    /// Longer description of the faulty mental model.
    pub description: String,
}

/// Coaching content shown for one classification outcome.
///
/// Keyed by misconception id, including the synthetic [`CORRECT_ID`] and
/// [`NEEDS_MORE_INPUT_ID`] entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpEntry {
    /// Explanation of the concept (or of what went wrong).
    pub explanation: String,
    /// Ordered hints, most general first.
    #[serde(default)]
    pub hints: Vec<String>,
}

/// A targeted practice question with a known expected answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeQuestion {
    /// Unique identifier within its practice set.
    pub id: String,
    /// The practice prompt.
    pub prompt: String,
    /// The answer the grader checks submissions against.
    pub expected_answer: String,
}

/// The learner's current free-text answers, keyed by question id.
///
/// One per session; entries are overwritten on resubmission. Once a session
/// exists there is an entry for every diagnostic question; the empty string
/// is a valid "no answer" state, distinct from absence.
pub type AnswerRecord = BTreeMap<String, String>;

/// The outcome of classifying one diagnostic answer.
///
/// Produced fresh each time analysis runs; previous results are replaced
/// wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The diagnostic question this verdict belongs to.
    pub question_id: String,
    /// A catalog misconception id, [`CORRECT_ID`], or [`NEEDS_MORE_INPUT_ID`].
    pub misconception_id: String,
    /// Resolved display name for the misconception.
    pub misconception_name: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Fixed human-readable rationale for the verdict.
    pub reason: String,
}

impl ClassificationResult {
    /// True if this result names a real catalog misconception rather than
    /// one of the two synthetic outcomes.
    pub fn is_misconception(&self) -> bool {
        self.misconception_id != CORRECT_ID && self.misconception_id != NEEDS_MORE_INPUT_ID
    }
}

/// Practice questions selected per diagnostic question, keyed by question id.
///
/// Regenerated wholesale on each "generate practice" action. A question id is
/// absent when no practice set exists for its detected misconception.
pub type PracticeAssignment = BTreeMap<String, Vec<PracticeQuestion>>;
