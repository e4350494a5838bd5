//! Practice answer grading.
//!
//! A normalization step, an equivalence table for common textual variants of
//! the same complexity class, and a fixed verdict ladder. The ladder order is
//! load-bearing: empty-after-normalization precedes equality, equality
//! precedes the equivalence table, and the table precedes the structural
//! "Almost" check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The grading outcome for one practice submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The submission was empty after normalization.
    NoAnswer,
    /// Exact or equivalent match with the expected answer.
    Correct,
    /// Big-O-shaped but not matching the expected class.
    Almost,
    /// Everything else.
    Incorrect,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::NoAnswer => write!(f, "no answer"),
            Verdict::Correct => write!(f, "correct"),
            Verdict::Almost => write!(f, "almost"),
            Verdict::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// A graded practice submission: the verdict plus learner-facing feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graded {
    pub verdict: Verdict,
    pub feedback: String,
}

/// Accepted textual variants per canonical complexity class.
///
/// Both sides of a comparison must normalize into the same group for the
/// table to grant a `Correct`; the table is a fallback behind exact equality.
const EQUIVALENCE_GROUPS: &[(&str, &[&str])] = &[
    ("o(logn)", &["ologn", "o(logn)", "logn"]),
    ("o(n)", &["on", "o(n)", "n", "linear"]),
    ("o(1)", &["o(1)", "o1", "constant"]),
];

/// Trim, lower-case, and strip all whitespace.
fn normalize(answer: &str) -> String {
    answer
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Canonical complexity class for a normalized answer, if the equivalence
/// table knows it.
fn canonical_form(normalized: &str) -> Option<&'static str> {
    EQUIVALENCE_GROUPS
        .iter()
        .find(|(_, variants)| variants.contains(&normalized))
        .map(|(canonical, _)| *canonical)
}

/// Grade a practice submission against the expected answer.
///
/// Total over all string inputs; never fails. `Incorrect`, `Almost`, and
/// `NoAnswer` are normal verdicts, not errors.
pub fn grade(submitted: &str, expected: &str) -> Graded {
    let sub = normalize(submitted);
    let exp = normalize(expected);

    if sub.is_empty() {
        return Graded {
            verdict: Verdict::NoAnswer,
            feedback: "You didn't enter an answer. Give it a try!".to_string(),
        };
    }

    if sub == exp {
        return Graded {
            verdict: Verdict::Correct,
            feedback: "Correct, nice work!".to_string(),
        };
    }

    if let (Some(sub_canonical), Some(exp_canonical)) = (canonical_form(&sub), canonical_form(&exp))
    {
        if sub_canonical == exp_canonical {
            return Graded {
                verdict: Verdict::Correct,
                feedback: "Correct, nice work!".to_string(),
            };
        }
    }

    // Structurally Big-O-shaped but the wrong class. Deliberately loose:
    // any submission containing "o(" lands here when the expected answer is
    // a Big-O expression.
    if exp.starts_with("o(") && sub.contains("o(") {
        return Graded {
            verdict: Verdict::Almost,
            feedback: format!(
                "Close: you're thinking in Big-O terms, but the expected answer is {expected}."
            ),
        };
    }

    Graded {
        verdict: Verdict::Incorrect,
        feedback: format!("Not quite. The expected answer is {expected}."),
    }
}
