//! Content pack loading and validation.
//!
//! Loads the study content (topic, diagnostic questions, misconception
//! catalog, help content, practice banks) from a JSON content pack and
//! validates it at the boundary. The diagnostic set and misconception
//! catalog are required; `help` and `practice` fall back to built-in
//! defaults when the pack omits them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::ContentError;
use crate::model::{
    DiagnosticQuestion, HelpEntry, Misconception, PracticeQuestion, CORRECT_ID,
    NEEDS_MORE_INPUT_ID,
};

/// Intermediate JSON structure for parsing content pack files.
#[derive(Debug, Deserialize)]
struct RawContentPack {
    topic: String,
    #[serde(default)]
    diagnostic: Vec<RawDiagnosticQuestion>,
    #[serde(default)]
    misconceptions: Vec<RawMisconception>,
    #[serde(default)]
    help: Option<BTreeMap<String, RawHelpEntry>>,
    #[serde(default)]
    practice: Option<BTreeMap<String, Vec<RawPracticeQuestion>>>,
}

#[derive(Debug, Deserialize)]
struct RawDiagnosticQuestion {
    id: String,
    question: String,
}

#[derive(Debug, Deserialize)]
struct RawMisconception {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawHelpEntry {
    explanation: String,
    #[serde(default)]
    hints: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawPracticeQuestion {
    id: String,
    prompt: String,
    expected_answer: String,
}

/// The validated, read-only study content for one topic.
///
/// Loaded once at startup and never mutated; safe to share across readers.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    topic: String,
    questions: Vec<DiagnosticQuestion>,
    misconceptions: Vec<Misconception>,
    help: BTreeMap<String, HelpEntry>,
    practice: BTreeMap<String, Vec<PracticeQuestion>>,
    fallback_help: HelpEntry,
}

impl ContentCatalog {
    /// Topic label for this content pack.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Diagnostic questions in presentation order.
    pub fn questions(&self) -> &[DiagnosticQuestion] {
        &self.questions
    }

    /// The misconception catalog.
    pub fn misconceptions(&self) -> &[Misconception] {
        &self.misconceptions
    }

    /// Look up a misconception by id.
    pub fn misconception(&self, id: &str) -> Option<&Misconception> {
        self.misconceptions.iter().find(|m| m.id == id)
    }

    /// Help content for a misconception id.
    ///
    /// Total: unknown ids resolve to a generic fallback entry rather than
    /// failing downstream.
    pub fn help_for(&self, misconception_id: &str) -> &HelpEntry {
        self.help
            .get(misconception_id)
            .unwrap_or(&self.fallback_help)
    }

    /// Practice set for a misconception id, if one exists.
    pub fn practice_for(&self, misconception_id: &str) -> Option<&[PracticeQuestion]> {
        self.practice
            .get(misconception_id)
            .map(|qs| qs.as_slice())
    }
}

/// Load and validate a content pack from a JSON file.
pub fn load_content_pack(path: &Path) -> Result<ContentCatalog, ContentError> {
    if !path.exists() {
        return Err(ContentError::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_content_pack_str(&content, &path.display().to_string())
}

/// Parse a JSON string into a validated [`ContentCatalog`].
pub fn parse_content_pack_str(
    content: &str,
    source_label: &str,
) -> Result<ContentCatalog, ContentError> {
    let raw: RawContentPack =
        serde_json::from_str(content).map_err(|source| ContentError::Malformed {
            path: source_label.to_string(),
            source,
        })?;

    if raw.topic.trim().is_empty() {
        return Err(ContentError::Invalid("topic is empty".into()));
    }
    if raw.diagnostic.is_empty() {
        return Err(ContentError::Invalid("diagnostic question list is empty".into()));
    }

    let mut seen_questions = HashSet::new();
    let questions = raw
        .diagnostic
        .into_iter()
        .map(|q| {
            if q.id.trim().is_empty() {
                return Err(ContentError::Invalid("diagnostic question with blank id".into()));
            }
            if q.question.trim().is_empty() {
                return Err(ContentError::Invalid(format!(
                    "diagnostic question '{}' has no text",
                    q.id
                )));
            }
            if !seen_questions.insert(q.id.clone()) {
                return Err(ContentError::Invalid(format!(
                    "duplicate diagnostic question id: {}",
                    q.id
                )));
            }
            Ok(DiagnosticQuestion {
                id: q.id,
                question: q.question,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen_misconceptions = HashSet::new();
    let misconceptions = raw
        .misconceptions
        .into_iter()
        .map(|m| {
            if m.id.trim().is_empty() {
                return Err(ContentError::Invalid("misconception with blank id".into()));
            }
            if !seen_misconceptions.insert(m.id.clone()) {
                return Err(ContentError::Invalid(format!(
                    "duplicate misconception id: {}",
                    m.id
                )));
            }
            Ok(Misconception {
                id: m.id,
                name: m.name,
                description: m.description,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let known_id = |id: &str| {
        id == CORRECT_ID
            || id == NEEDS_MORE_INPUT_ID
            || misconceptions.iter().any(|m| m.id == id)
    };

    let help = match raw.help {
        Some(entries) => {
            for id in entries.keys() {
                if !known_id(id) {
                    return Err(ContentError::Invalid(format!(
                        "help entry for unknown misconception id: {id}"
                    )));
                }
            }
            entries
                .into_iter()
                .map(|(id, h)| {
                    (
                        id,
                        HelpEntry {
                            explanation: h.explanation,
                            hints: h.hints,
                        },
                    )
                })
                .collect()
        }
        None => default_help(),
    };

    let practice = match raw.practice {
        Some(sets) => {
            for (id, set) in &sets {
                if !known_id(id) {
                    return Err(ContentError::Invalid(format!(
                        "practice set for unknown misconception id: {id}"
                    )));
                }
                let mut seen = HashSet::new();
                for q in set {
                    if !seen.insert(q.id.as_str()) {
                        return Err(ContentError::Invalid(format!(
                            "duplicate practice question id '{}' in set '{}'",
                            q.id, id
                        )));
                    }
                }
            }
            sets.into_iter()
                .map(|(id, set)| {
                    (
                        id,
                        set.into_iter()
                            .map(|q| PracticeQuestion {
                                id: q.id,
                                prompt: q.prompt,
                                expected_answer: q.expected_answer,
                            })
                            .collect(),
                    )
                })
                .collect()
        }
        None => default_practice(),
    };

    Ok(ContentCatalog {
        topic: raw.topic,
        questions,
        misconceptions,
        help,
        practice,
        fallback_help: generic_help_entry(),
    })
}

/// A warning from content pack linting. Non-fatal, surfaced by `validate`.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The misconception or question id the warning refers to, if any.
    pub entry_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint a loaded catalog for issues that don't block a session.
pub fn validate_catalog(catalog: &ContentCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for m in catalog.misconceptions() {
        if !catalog.help.contains_key(&m.id) {
            warnings.push(ValidationWarning {
                entry_id: Some(m.id.clone()),
                message: format!("misconception '{}' has no help entry", m.id),
            });
        }
        if catalog.practice_for(&m.id).is_none() {
            warnings.push(ValidationWarning {
                entry_id: Some(m.id.clone()),
                message: format!("misconception '{}' has no practice set", m.id),
            });
        }
    }

    for (id, set) in &catalog.practice {
        if set.is_empty() {
            warnings.push(ValidationWarning {
                entry_id: Some(id.clone()),
                message: format!("practice set '{id}' is empty"),
            });
        }
        for q in set {
            if q.expected_answer.trim().is_empty() {
                warnings.push(ValidationWarning {
                    entry_id: Some(q.id.clone()),
                    message: format!("practice question '{}' has a blank expected answer", q.id),
                });
            }
        }
    }

    warnings
}

fn generic_help_entry() -> HelpEntry {
    HelpEntry {
        explanation: "Review the concept and try explaining it in your own words.".to_string(),
        hints: vec!["Work through a small example by hand.".to_string()],
    }
}

/// Built-in help content used when the pack omits the `help` section.
fn default_help() -> BTreeMap<String, HelpEntry> {
    let mut help = BTreeMap::new();
    help.insert(
        CORRECT_ID.to_string(),
        HelpEntry {
            explanation: "Your answer shows a solid grasp of the concept.".to_string(),
            hints: vec!["Try the practice questions to consolidate it.".to_string()],
        },
    );
    help.insert(
        NEEDS_MORE_INPUT_ID.to_string(),
        HelpEntry {
            explanation: "There wasn't enough in your answer to analyze.".to_string(),
            hints: vec![
                "Describe what the algorithm does step by step.".to_string(),
                "Even a rough guess gives the coach something to work with.".to_string(),
            ],
        },
    );
    help.insert(
        "M1".to_string(),
        HelpEntry {
            explanation: "Complexity is measured against the input size n, not against the \
                          particular values stored in the input."
                .to_string(),
            hints: vec![
                "Ask: how does the work grow when the list gets longer?".to_string(),
                "Doubling every value in a list doesn't change how many elements a scan visits."
                    .to_string(),
            ],
        },
    );
    help.insert(
        "M2".to_string(),
        HelpEntry {
            explanation: "Big-O ignores constant factors: an algorithm doing 2n steps and one \
                          doing n steps are both O(n)."
                .to_string(),
            hints: vec![
                "Only the growth rate matters as n gets large.".to_string(),
                "Compare n, 2n and n^2 for n = 1000.".to_string(),
            ],
        },
    );
    help.insert(
        "M3".to_string(),
        HelpEntry {
            explanation: "Repeatedly halving the input reaches 1 after about log2(n) steps, not \
                          after n steps."
                .to_string(),
            hints: vec![
                "Count the halvings for n = 16: 16, 8, 4, 2, 1.".to_string(),
                "How many times can you halve a million before hitting 1?".to_string(),
            ],
        },
    );
    help.insert(
        "M4".to_string(),
        HelpEntry {
            explanation: "Unless stated otherwise, Big-O describes the worst case, not the best \
                          or average case."
                .to_string(),
            hints: vec![
                "Ask what input would make the algorithm do the most work.".to_string(),
            ],
        },
    );
    help
}

/// Built-in practice banks used when the pack omits the `practice` section.
fn default_practice() -> BTreeMap<String, Vec<PracticeQuestion>> {
    let mut practice = BTreeMap::new();
    practice.insert(
        "M1".to_string(),
        vec![
            PracticeQuestion {
                id: "m1-scan".to_string(),
                prompt: "A loop visits each of the n elements once. What is its complexity?"
                    .to_string(),
                expected_answer: "O(n)".to_string(),
            },
            PracticeQuestion {
                id: "m1-values".to_string(),
                prompt: "You double every number in a list of n elements. What is the complexity \
                         of one full pass?"
                    .to_string(),
                expected_answer: "O(n)".to_string(),
            },
        ],
    );
    practice.insert(
        "M2".to_string(),
        vec![
            PracticeQuestion {
                id: "m2-two-passes".to_string(),
                prompt: "An algorithm makes two full passes over n elements (2n steps). What is \
                         its Big-O complexity?"
                    .to_string(),
                expected_answer: "O(n)".to_string(),
            },
            PracticeQuestion {
                id: "m2-lookup".to_string(),
                prompt: "Indexing into an array takes the same time regardless of n. What is its \
                         complexity?"
                    .to_string(),
                expected_answer: "O(1)".to_string(),
            },
        ],
    );
    practice.insert(
        "M3".to_string(),
        vec![
            PracticeQuestion {
                id: "m3-binary-search".to_string(),
                prompt: "Binary search halves the remaining range each step. What is its \
                         complexity?"
                    .to_string(),
                expected_answer: "O(log n)".to_string(),
            },
            PracticeQuestion {
                id: "m3-halving".to_string(),
                prompt: "A loop sets n = n / 2 until n reaches 1. How many iterations does it \
                         run, in Big-O terms?"
                    .to_string(),
                expected_answer: "O(log n)".to_string(),
            },
        ],
    );
    practice.insert(
        "M4".to_string(),
        vec![PracticeQuestion {
            id: "m4-worst-case".to_string(),
            prompt: "Linear search finds the target in the first position on a lucky input. What \
                     complexity does Big-O report for it?"
                .to_string(),
            expected_answer: "O(n)".to_string(),
        }],
    );
    practice
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_PACK: &str = r#"{
        "topic": "Big-O Basics",
        "diagnostic": [
            {"id": "q1", "question": "What does O(n) describe?"},
            {"id": "q2", "question": "How many times can you halve n before reaching 1?"}
        ],
        "misconceptions": [
            {"id": "M1", "name": "Values, not size", "description": "Focuses on element values instead of input size."},
            {"id": "M3", "name": "Halving is linear", "description": "Thinks repeated halving takes n steps."}
        ],
        "help": {
            "M1": {"explanation": "Complexity grows with n.", "hints": ["Think about list length."]}
        },
        "practice": {
            "M1": [
                {"id": "p1", "prompt": "Complexity of one pass over n items?", "expected_answer": "O(n)"}
            ]
        }
    }"#;

    #[test]
    fn parse_valid_pack() {
        let catalog = parse_content_pack_str(VALID_PACK, "test.json").unwrap();
        assert_eq!(catalog.topic(), "Big-O Basics");
        assert_eq!(catalog.questions().len(), 2);
        assert_eq!(catalog.misconceptions().len(), 2);
        assert_eq!(catalog.misconception("M1").unwrap().name, "Values, not size");
        assert_eq!(catalog.practice_for("M1").unwrap().len(), 1);
        assert!(catalog.practice_for("M3").is_none());
    }

    #[test]
    fn omitted_help_and_practice_fall_back_to_defaults() {
        let pack = r#"{
            "topic": "Big-O",
            "diagnostic": [{"id": "q1", "question": "What is O(n)?"}],
            "misconceptions": [{"id": "M1", "name": "Values", "description": ""}]
        }"#;
        let catalog = parse_content_pack_str(pack, "test.json").unwrap();
        assert!(!catalog.help_for("M1").explanation.is_empty());
        assert!(!catalog.help_for(CORRECT_ID).explanation.is_empty());
        assert!(catalog.practice_for("M3").is_some());
        // Synthetic ids get no default practice.
        assert!(catalog.practice_for(NEEDS_MORE_INPUT_ID).is_none());
        assert!(catalog.practice_for(CORRECT_ID).is_none());
    }

    #[test]
    fn help_lookup_is_total() {
        let catalog = parse_content_pack_str(VALID_PACK, "test.json").unwrap();
        let entry = catalog.help_for("no-such-id");
        assert!(!entry.explanation.is_empty());
    }

    #[test]
    fn empty_diagnostic_list_is_invalid() {
        let pack = r#"{"topic": "Big-O", "diagnostic": [], "misconceptions": []}"#;
        let err = parse_content_pack_str(pack, "test.json").unwrap_err();
        assert!(matches!(err, ContentError::Invalid(_)));
    }

    #[test]
    fn duplicate_question_id_is_invalid() {
        let pack = r#"{
            "topic": "Big-O",
            "diagnostic": [
                {"id": "q1", "question": "First?"},
                {"id": "q1", "question": "Second?"}
            ],
            "misconceptions": []
        }"#;
        let err = parse_content_pack_str(pack, "test.json").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn help_for_unknown_id_is_invalid() {
        let pack = r#"{
            "topic": "Big-O",
            "diagnostic": [{"id": "q1", "question": "What is O(n)?"}],
            "misconceptions": [],
            "help": {"M9": {"explanation": "nope"}}
        }"#;
        let err = parse_content_pack_str(pack, "test.json").unwrap_err();
        assert!(err.to_string().contains("unknown misconception"));
    }

    #[test]
    fn synthetic_ids_are_valid_help_keys() {
        let pack = r#"{
            "topic": "Big-O",
            "diagnostic": [{"id": "q1", "question": "What is O(n)?"}],
            "misconceptions": [],
            "help": {
                "CORRECT": {"explanation": "Well done."},
                "NEEDS_MORE_INPUT": {"explanation": "Say more."}
            }
        }"#;
        let catalog = parse_content_pack_str(pack, "test.json").unwrap();
        assert_eq!(catalog.help_for(CORRECT_ID).explanation, "Well done.");
    }

    #[test]
    fn malformed_json_is_malformed_error() {
        let err = parse_content_pack_str("{not json", "bad.json").unwrap_err();
        assert!(matches!(err, ContentError::Malformed { .. }));
        assert!(err.is_content_defect());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_content_pack(&PathBuf::from("definitely-missing.json")).unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
        assert!(!err.is_content_defect());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content_pack.json");
        std::fs::write(&path, VALID_PACK).unwrap();

        let catalog = load_content_pack(&path).unwrap();
        assert_eq!(catalog.topic(), "Big-O Basics");
    }

    #[test]
    fn lint_reports_missing_help_and_blank_answers() {
        let pack = r#"{
            "topic": "Big-O",
            "diagnostic": [{"id": "q1", "question": "What is O(n)?"}],
            "misconceptions": [{"id": "M9", "name": "Mystery", "description": ""}],
            "help": {},
            "practice": {"M9": [{"id": "p1", "prompt": "?", "expected_answer": "  "}]}
        }"#;
        let catalog = parse_content_pack_str(pack, "test.json").unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("no help entry")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("blank expected answer")));
    }
}
