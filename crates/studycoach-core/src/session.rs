//! Per-session mutable context and the action handlers that drive it.
//!
//! One [`Session`] holds everything a learner's visit mutates: the answer
//! record, the latest classification results, the current practice
//! assignment, and the event log. It is constructed explicitly at session
//! start and threaded through every handler call, never a process-wide
//! singleton. All mutation goes through `&mut self`, so one action completes
//! before the next begins.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::ContentCatalog;
use crate::events::{Event, EventLog};
use crate::grading::{grade, Graded};
use crate::model::{AnswerRecord, ClassificationResult, PracticeAssignment};
use crate::traits::{is_non_answer, needs_more_input_result, Classifier, ClassifyRequest};

/// One learner's session over a loaded content catalog.
pub struct Session {
    id: Uuid,
    catalog: Arc<ContentCatalog>,
    answers: AnswerRecord,
    results: Vec<ClassificationResult>,
    practice: PracticeAssignment,
    events: EventLog,
}

impl Session {
    /// Start a session. The answer record is seeded with an empty string for
    /// every diagnostic question, so an entry exists for each one from the
    /// start.
    pub fn new(catalog: Arc<ContentCatalog>) -> Self {
        let id = Uuid::new_v4();
        let answers = catalog
            .questions()
            .iter()
            .map(|q| (q.id.clone(), String::new()))
            .collect();
        tracing::info!(session = %id, topic = catalog.topic(), "session started");
        Self {
            id,
            catalog,
            answers,
            results: Vec::new(),
            practice: PracticeAssignment::new(),
            events: EventLog::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Overwrite the stored answer for a diagnostic question. Unknown ids
    /// are ignored; the answer record only ever holds catalog questions.
    pub fn record_answer(&mut self, question_id: &str, text: &str) {
        match self.answers.get_mut(question_id) {
            Some(slot) => *slot = text.to_string(),
            None => {
                tracing::warn!(question_id, "answer for unknown question ignored");
            }
        }
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    /// Classify every diagnostic answer, replacing prior results wholesale.
    ///
    /// For each question (in catalog order) the non-answer gate runs first;
    /// only answers that pass it reach the classifier. A classifier failure
    /// is recovered into the needs-more-input outcome; no error reaches the
    /// presentation layer. One `DiagnosticAnalyzed` event is appended per
    /// question.
    pub async fn analyze(&mut self, classifier: &dyn Classifier) -> &[ClassificationResult] {
        let mut results = Vec::with_capacity(self.catalog.questions().len());

        for question in self.catalog.questions() {
            let answer = self
                .answers
                .get(&question.id)
                .map(String::as_str)
                .unwrap_or("");

            let result = if is_non_answer(answer) {
                needs_more_input_result(&question.id)
            } else {
                let request = ClassifyRequest {
                    question_id: question.id.clone(),
                    question: question.question.clone(),
                    answer: answer.to_string(),
                    catalog: self.catalog.misconceptions().to_vec(),
                };
                match classifier.classify(&request).await {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!(
                            question_id = %question.id,
                            backend = classifier.name(),
                            error = %e,
                            "classifier failed, treating answer as needs-more-input"
                        );
                        needs_more_input_result(&question.id)
                    }
                }
            };

            tracing::debug!(
                question_id = %result.question_id,
                misconception = %result.misconception_id,
                confidence = result.confidence,
                "diagnostic analyzed"
            );
            self.events.append(Event::DiagnosticAnalyzed {
                question_id: result.question_id.clone(),
                misconception_id: result.misconception_id.clone(),
            });
            results.push(result);
        }

        self.results = results;
        &self.results
    }

    /// Latest classification results, empty before the first analyze.
    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    /// Regenerate the practice assignment wholesale from the latest results.
    ///
    /// A question is assigned the practice set for its detected misconception
    /// id iff the catalog has one; outcomes without a practice set (notably
    /// the synthetic ids, unless the pack maps them) get no entry. One
    /// `PracticeGenerated` event is appended per assigned question.
    pub fn generate_practice(&mut self) -> &PracticeAssignment {
        self.practice = PracticeAssignment::new();

        for result in &self.results {
            if let Some(set) = self.catalog.practice_for(&result.misconception_id) {
                self.practice
                    .insert(result.question_id.clone(), set.to_vec());
                self.events.append(Event::PracticeGenerated {
                    question_id: result.question_id.clone(),
                    misconception_id: result.misconception_id.clone(),
                });
            }
        }

        tracing::info!(
            assigned = self.practice.len(),
            "practice assignment regenerated"
        );
        &self.practice
    }

    pub fn practice(&self) -> &PracticeAssignment {
        &self.practice
    }

    /// Grade one practice submission and record the attempt.
    ///
    /// Returns `None` when the (question, practice) pair is not part of the
    /// current assignment; grading itself never fails.
    pub fn check_practice(
        &mut self,
        question_id: &str,
        practice_id: &str,
        submitted: &str,
    ) -> Option<Graded> {
        let practice_question = self
            .practice
            .get(question_id)?
            .iter()
            .find(|q| q.id == practice_id)?;

        let graded = grade(submitted, &practice_question.expected_answer);

        let misconception_id = self
            .results
            .iter()
            .find(|r| r.question_id == question_id)
            .map(|r| r.misconception_id.clone())
            .unwrap_or_default();

        self.events.append(Event::PracticeAttempted {
            question_id: question_id.to_string(),
            practice_id: practice_id.to_string(),
            misconception_id,
            verdict: graded.verdict,
        });

        Some(graded)
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_content_pack_str;
    use crate::events::EventKind;
    use crate::grading::Verdict;
    use crate::model::{CORRECT_ID, NEEDS_MORE_INPUT_ID};
    use async_trait::async_trait;

    const PACK: &str = r#"{
        "topic": "Big-O Basics",
        "diagnostic": [
            {"id": "Q1", "question": "What does Big-O measure?"},
            {"id": "Q2", "question": "Does complexity depend on the stored values?"}
        ],
        "misconceptions": [
            {"id": "M1", "name": "Values, not size", "description": ""},
            {"id": "M2", "name": "Constant factors matter", "description": ""}
        ],
        "help": {},
        "practice": {
            "M1": [
                {"id": "p1", "prompt": "One pass over n items?", "expected_answer": "O(n)"}
            ]
        }
    }"#;

    /// Classifies by answer substring; errors on demand.
    struct StubClassifier {
        fail: bool,
    }

    #[async_trait]
    impl Classifier for StubClassifier {
        fn name(&self) -> &str {
            "stub"
        }

        async fn classify(
            &self,
            request: &ClassifyRequest,
        ) -> anyhow::Result<ClassificationResult> {
            if self.fail {
                anyhow::bail!("backend unavailable");
            }
            let misconception_id = if request.answer.contains("value") {
                "M1"
            } else {
                CORRECT_ID
            };
            Ok(ClassificationResult {
                question_id: request.question_id.clone(),
                misconception_id: misconception_id.into(),
                misconception_name: "stubbed".into(),
                confidence: 0.75,
                reason: "stub".into(),
            })
        }
    }

    fn session() -> Session {
        let catalog = Arc::new(parse_content_pack_str(PACK, "test.json").unwrap());
        Session::new(catalog)
    }

    #[test]
    fn new_session_seeds_every_answer() {
        let session = session();
        assert_eq!(session.answers().len(), 2);
        assert_eq!(session.answers().get("Q1").map(String::as_str), Some(""));
        assert!(session.events().is_empty());
        assert!(session.results().is_empty());
    }

    #[test]
    fn record_answer_overwrites_and_ignores_unknown() {
        let mut session = session();
        session.record_answer("Q1", "first try");
        session.record_answer("Q1", "second try");
        assert_eq!(
            session.answers().get("Q1").map(String::as_str),
            Some("second try")
        );

        session.record_answer("Q9", "stray");
        assert_eq!(session.answers().len(), 2);
    }

    #[tokio::test]
    async fn analyze_gates_non_answers_and_classifies_the_rest() {
        let mut session = session();
        session.record_answer("Q1", "idk");
        session.record_answer("Q2", "the answer depends on the values");

        let results = session.analyze(&StubClassifier { fail: false }).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].misconception_id, NEEDS_MORE_INPUT_ID);
        assert_eq!(results[0].confidence, 0.0);
        assert_eq!(results[1].misconception_id, "M1");

        assert_eq!(session.events().total_of(EventKind::DiagnosticAnalyzed), 2);
    }

    #[tokio::test]
    async fn analyze_replaces_results_wholesale() {
        let mut session = session();
        session.record_answer("Q1", "the values are what matter");
        session.record_answer("Q2", "the values are what matter");
        session.analyze(&StubClassifier { fail: false }).await;
        assert!(session.results().iter().all(|r| r.misconception_id == "M1"));

        session.record_answer("Q1", "it grows with input size");
        session.record_answer("Q2", "it grows with input size");
        session.analyze(&StubClassifier { fail: false }).await;
        assert_eq!(session.results().len(), 2);
        assert!(session
            .results()
            .iter()
            .all(|r| r.misconception_id == CORRECT_ID));

        // Both passes appended events; nothing was removed.
        assert_eq!(session.events().len(), 4);
    }

    #[tokio::test]
    async fn classifier_failure_recovers_to_needs_more_input() {
        let mut session = session();
        session.record_answer("Q1", "a perfectly reasonable answer");
        session.record_answer("Q2", "another answer");

        let results = session.analyze(&StubClassifier { fail: true }).await;
        assert!(results
            .iter()
            .all(|r| r.misconception_id == NEEDS_MORE_INPUT_ID));
    }

    #[tokio::test]
    async fn practice_assigned_only_where_a_set_exists() {
        let mut session = session();
        session.record_answer("Q1", "idk");
        session.record_answer("Q2", "the answer depends on the values");
        session.analyze(&StubClassifier { fail: false }).await;

        let practice = session.generate_practice();
        assert!(practice.get("Q1").is_none());
        let q2_set = practice.get("Q2").expect("Q2 should get the M1 set");
        assert_eq!(q2_set.len(), 1);
        assert_eq!(q2_set[0].id, "p1");

        assert_eq!(session.events().total_of(EventKind::PracticeGenerated), 1);
    }

    #[tokio::test]
    async fn check_practice_grades_and_records() {
        let mut session = session();
        session.record_answer("Q2", "the values are big");
        session.analyze(&StubClassifier { fail: false }).await;
        session.generate_practice();

        let graded = session.check_practice("Q2", "p1", "O(n)").unwrap();
        assert_eq!(graded.verdict, Verdict::Correct);

        let graded = session.check_practice("Q2", "p1", "O(n^2)").unwrap();
        assert_eq!(graded.verdict, Verdict::Almost);

        assert!(session.check_practice("Q2", "no-such", "x").is_none());
        assert!(session.check_practice("Q1", "p1", "x").is_none());

        assert_eq!(session.events().total_of(EventKind::PracticeAttempted), 2);
    }
}
