//! Content catalog error types.
//!
//! These errors represent failures while loading or validating the content
//! pack. Defined in `studycoach-core` so callers can classify load failures
//! without string matching. Content errors are the only fatal failure class:
//! classification and grading always produce in-band result values.

use thiserror::Error;

/// Errors that can occur when loading the content pack.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content pack file does not exist.
    #[error("content pack not found: {0}")]
    NotFound(String),

    /// The content pack could not be read.
    #[error("failed to read content pack {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The content pack is not valid JSON.
    #[error("malformed content pack {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The content pack parsed but fails a structural invariant.
    #[error("invalid content pack: {0}")]
    Invalid(String),
}

impl ContentError {
    /// True when the failure is in the file itself (fixable by editing it)
    /// rather than in locating or reading it.
    pub fn is_content_defect(&self) -> bool {
        matches!(self, ContentError::Malformed { .. } | ContentError::Invalid(_))
    }
}
