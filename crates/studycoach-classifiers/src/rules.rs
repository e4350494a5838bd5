//! Rule-based keyword classifier.
//!
//! An explicit, ordered, first-match-wins rule list over the lower-cased
//! answer and question. The order is a documented invariant, not an
//! accident: earlier rules carry the more specific cues, so an answer
//! mentioning both "value" and "log" is placed by the values rule, never by
//! the halving rule's correct branch.

use async_trait::async_trait;

use studycoach_core::model::{ClassificationResult, Misconception, CORRECT_ID};
use studycoach_core::traits::{Classifier, ClassifyRequest};

/// What a matched rule places the answer as.
#[derive(Debug, Clone, Copy)]
struct RuleOutcome {
    misconception_id: &'static str,
    confidence: f64,
    reason: &'static str,
}

/// Lower-cased views of the question and answer a rule inspects.
struct RuleInput<'a> {
    question: &'a str,
    answer: &'a str,
}

type Rule = (&'static str, fn(&RuleInput<'_>) -> Option<RuleOutcome>);

/// The rule ladder, evaluated top to bottom; the first `Some` wins.
const RULES: &[Rule] = &[
    ("values-not-size", |input| {
        ["value", "number", "digits"]
            .iter()
            .any(|cue| input.answer.contains(cue))
            .then_some(RuleOutcome {
                misconception_id: "M1",
                confidence: 0.75,
                reason: "Your answer focuses on the stored values; Big-O grows with the input \
                         size n, not with what the elements hold.",
            })
    }),
    ("constant-factors", |input| {
        ["2n", "double", "twice", "constant"]
            .iter()
            .any(|cue| input.answer.contains(cue))
            .then_some(RuleOutcome {
                misconception_id: "M2",
                confidence: 0.75,
                reason: "Constant factors like 2n drop out of Big-O; only the growth rate \
                         counts.",
            })
    }),
    ("halving", |input| {
        let halving_context = input.question.contains("halve")
            || input.answer.contains("/2")
            || input.answer.contains("log");
        if !halving_context {
            return None;
        }
        if input.answer.contains("log") {
            Some(RuleOutcome {
                misconception_id: CORRECT_ID,
                confidence: 0.85,
                reason: "You connected repeated halving with logarithmic growth.",
            })
        } else {
            Some(RuleOutcome {
                misconception_id: "M3",
                confidence: 0.75,
                reason: "Repeated halving reaches 1 in logarithmically many steps, not in n \
                         steps.",
            })
        }
    }),
    ("best-vs-worst", |input| {
        (input.answer.contains("best") || input.answer.contains("average")).then_some(
            RuleOutcome {
                misconception_id: "M4",
                confidence: 0.75,
                reason: "Big-O describes the worst case unless stated otherwise, not the best \
                         or average case.",
            },
        )
    }),
];

/// Outcome when no rule matches.
const FALLBACK: RuleOutcome = RuleOutcome {
    misconception_id: CORRECT_ID,
    confidence: 0.85,
    reason: "No known misconception cues found in your answer.",
};

/// Classify one answer with the rule ladder. Pure function of its inputs.
pub fn classify_with_rules(
    question_id: &str,
    question: &str,
    answer: &str,
    catalog: &[Misconception],
) -> ClassificationResult {
    let question_lower = question.to_lowercase();
    let answer_lower = answer.to_lowercase();
    let input = RuleInput {
        question: &question_lower,
        answer: &answer_lower,
    };

    let (rule_name, outcome) = RULES
        .iter()
        .find_map(|(name, rule)| rule(&input).map(|outcome| (*name, outcome)))
        .unwrap_or(("fallback", FALLBACK));

    tracing::debug!(question_id, rule = rule_name, misconception = outcome.misconception_id, "rule matched");

    let misconception_name = catalog
        .iter()
        .find(|m| m.id == outcome.misconception_id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "Correct".to_string());

    ClassificationResult {
        question_id: question_id.to_string(),
        misconception_id: outcome.misconception_id.to_string(),
        misconception_name,
        confidence: outcome.confidence,
        reason: outcome.reason.to_string(),
    }
}

/// The production classifier backend.
#[derive(Debug, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Classifier for RuleClassifier {
    fn name(&self) -> &str {
        "rules"
    }

    async fn classify(&self, request: &ClassifyRequest) -> anyhow::Result<ClassificationResult> {
        Ok(classify_with_rules(
            &request.question_id,
            &request.question,
            &request.answer,
            &request.catalog,
        ))
    }
}
