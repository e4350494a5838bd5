//! Scripted classifier for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use studycoach_core::model::{ClassificationResult, CORRECT_ID};
use studycoach_core::traits::{Classifier, ClassifyRequest};

/// A scripted classifier for testing session flows without the rule ladder.
///
/// Returns configurable verdicts based on answer substring matching.
pub struct ScriptedClassifier {
    /// Map of answer substring → misconception id.
    verdicts: HashMap<String, String>,
    /// Misconception id returned when no substring matches.
    default_verdict: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<ClassifyRequest>>,
}

impl ScriptedClassifier {
    /// Create a scripted classifier with the given substring→verdict mappings.
    pub fn new(verdicts: HashMap<String, String>) -> Self {
        Self {
            verdicts,
            default_verdict: CORRECT_ID.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a scripted classifier that always returns the same verdict.
    pub fn with_fixed_verdict(misconception_id: &str) -> Self {
        Self {
            verdicts: HashMap::new(),
            default_verdict: misconception_id.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of classify calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last request received, if any.
    pub fn last_request(&self) -> Option<ClassifyRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn classify(&self, request: &ClassifyRequest) -> anyhow::Result<ClassificationResult> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let misconception_id = self
            .verdicts
            .iter()
            .find(|(key, _)| request.answer.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_verdict.clone());

        let misconception_name = request
            .catalog
            .iter()
            .find(|m| m.id == misconception_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "Correct".to_string());

        Ok(ClassificationResult {
            question_id: request.question_id.clone(),
            misconception_id,
            misconception_name,
            confidence: 1.0,
            reason: "scripted verdict".to_string(),
        })
    }
}
