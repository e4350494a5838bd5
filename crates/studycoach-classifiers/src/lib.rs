//! studycoach-classifiers — Classifier backends and configuration.
//!
//! Implements the `Classifier` trait from `studycoach-core`: the rule-based
//! keyword classifier used in production and a scripted classifier for
//! tests, plus the configuration layer that selects a backend.

pub mod config;
pub mod rules;
pub mod scripted;

pub use config::{create_classifier, load_config, load_config_from, StudycoachConfig};
pub use rules::RuleClassifier;
pub use scripted::ScriptedClassifier;
