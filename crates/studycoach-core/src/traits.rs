//! Core trait definition for answer classifiers.
//!
//! The rule-based backend lives in `studycoach-classifiers`; the async trait
//! is the seam where a networked inference backend can slot in later without
//! touching callers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{ClassificationResult, Misconception, NEEDS_MORE_INPUT_ID};

// ---------------------------------------------------------------------------
// Classifier trait
// ---------------------------------------------------------------------------

/// Trait for backends that place a free-text answer into the misconception
/// catalog.
///
/// Implementations must be deterministic over their inputs: classifying the
/// same request twice yields an identical [`ClassificationResult`].
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Human-readable backend name (e.g. "rules").
    fn name(&self) -> &str;

    /// Classify one diagnostic answer.
    async fn classify(&self, request: &ClassifyRequest) -> anyhow::Result<ClassificationResult>;
}

/// Request to classify one diagnostic answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Id of the diagnostic question being answered.
    pub question_id: String,
    /// The question text, used by question-sensitive rules.
    pub question: String,
    /// The learner's raw free-text answer.
    pub answer: String,
    /// The misconception catalog used to resolve display names.
    pub catalog: Vec<Misconception>,
}

// ---------------------------------------------------------------------------
// Non-answer gate
// ---------------------------------------------------------------------------

/// Fixed set of strings that count as "no real answer" after normalization.
const NON_ANSWERS: &[&str] = &[
    "",
    "idk",
    "i dont know",
    "i don't know",
    "dont know",
    "no idea",
    "not sure",
    "?",
    "??",
    "???",
];

/// Fixed prompt attached to every [`NEEDS_MORE_INPUT_ID`] result.
pub const NEEDS_MORE_INPUT_REASON: &str =
    "Your answer is too short to analyze. Try describing what the algorithm does step by step.";

/// True if the answer belongs to the fixed non-answer set.
///
/// The check runs on the trimmed, lower-cased answer. Callers must apply this
/// gate before invoking any [`Classifier`]; a non-answer never reaches the
/// keyword rules.
pub fn is_non_answer(raw_answer: &str) -> bool {
    let normalized = raw_answer.trim().to_lowercase();
    NON_ANSWERS.contains(&normalized.as_str())
}

/// Synthesize the result for an answer rejected by the non-answer gate.
pub fn needs_more_input_result(question_id: &str) -> ClassificationResult {
    ClassificationResult {
        question_id: question_id.to_string(),
        misconception_id: NEEDS_MORE_INPUT_ID.to_string(),
        misconception_name: "Needs more input".to_string(),
        confidence: 0.0,
        reason: NEEDS_MORE_INPUT_REASON.to_string(),
    }
}
