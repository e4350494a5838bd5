//! Application configuration and classifier factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studycoach_core::traits::Classifier;

use crate::rules::RuleClassifier;

/// Which classifier backend to use.
///
/// `rules` is the only shipping backend; the tagged representation leaves
/// room for a networked backend to be added without a config format change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClassifierBackend {
    Rules,
}

impl Default for ClassifierBackend {
    fn default() -> Self {
        ClassifierBackend::Rules
    }
}

/// Top-level studycoach configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudycoachConfig {
    /// Path to the content pack JSON file.
    #[serde(default = "default_content_pack")]
    pub content_pack: PathBuf,
    /// Classifier backend selection.
    #[serde(default)]
    pub classifier: ClassifierBackend,
    /// How many events the dashboard's recency view shows.
    #[serde(default = "default_recent_events")]
    pub recent_events: usize,
}

fn default_content_pack() -> PathBuf {
    PathBuf::from("content_pack.json")
}

fn default_recent_events() -> usize {
    10
}

impl Default for StudycoachConfig {
    fn default() -> Self {
        Self {
            content_pack: default_content_pack(),
            classifier: ClassifierBackend::default(),
            recent_events: default_recent_events(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studycoach.toml` in the current directory
/// 2. `~/.config/studycoach/config.toml`
///
/// Environment variable override: `STUDYCOACH_CONTENT_PACK`.
pub fn load_config() -> Result<StudycoachConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudycoachConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studycoach.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StudycoachConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudycoachConfig::default(),
    };

    if let Ok(pack) = std::env::var("STUDYCOACH_CONTENT_PACK") {
        config.content_pack = PathBuf::from(pack);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studycoach"))
}

/// Create the classifier backend the configuration selects.
pub fn create_classifier(config: &StudycoachConfig) -> Box<dyn Classifier> {
    match config.classifier {
        ClassifierBackend::Rules => Box::new(RuleClassifier::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StudycoachConfig::default();
        assert_eq!(config.content_pack, PathBuf::from("content_pack.json"));
        assert_eq!(config.recent_events, 10);
        assert!(matches!(config.classifier, ClassifierBackend::Rules));
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
content_pack = "packs/big-o.json"
recent_events = 25

[classifier]
type = "rules"
"#;
        let config: StudycoachConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.content_pack, PathBuf::from("packs/big-o.json"));
        assert_eq!(config.recent_events, 25);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: StudycoachConfig = toml::from_str("").unwrap();
        assert_eq!(config.content_pack, PathBuf::from("content_pack.json"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studycoach.toml");
        std::fs::write(&path, "recent_events = 3\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.recent_events, 3);
    }

    #[test]
    fn explicit_path_must_exist() {
        let result = load_config_from(Some(Path::new("no-such-config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn factory_builds_rules_backend() {
        let classifier = create_classifier(&StudycoachConfig::default());
        assert_eq!(classifier.name(), "rules");
    }
}
