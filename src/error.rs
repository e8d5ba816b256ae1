//! Error taxonomy for the extraction pipeline
//!
//! Only scanner-level failures abort a run. Everything else is collected as a
//! [`Diagnostic`] on the run outcome so callers can report all problems in one
//! pass instead of stopping at the first bad class.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort the whole extraction call
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A source root does not exist or cannot be read
    #[error("Source root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Source root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("Failed to read {path}: {source}")]
    FileReadError { path: PathBuf, source: io::Error },

    #[error("Failed to walk {root}: {message}")]
    WalkError { root: PathBuf, message: String },

    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),
}

/// Non-fatal problems attached to an extraction outcome
///
/// Each diagnostic isolates to one file or one class; the rest of the run is
/// unaffected by it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Unparseable comment or declaration structure in one source file
    MalformedSource {
        path: String,
        line: usize,
        reason: String,
    },
    /// A required tag is present but empty or invalid
    MalformedTag {
        class: String,
        tag: String,
        reason: String,
    },
    /// Two classes declared the same goal name; the later one was dropped
    DuplicateGoal {
        goal: String,
        class: String,
        previous: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MalformedSource { path, line, reason } => {
                write!(f, "{}:{}: malformed source: {}", path, line, reason)
            }
            Diagnostic::MalformedTag { class, tag, reason } => {
                write!(f, "{}: malformed @{} tag: {}", class, tag, reason)
            }
            Diagnostic::DuplicateGoal {
                goal,
                class,
                previous,
            } => {
                write!(
                    f,
                    "{}: goal '{}' already declared by {}",
                    class, goal, previous
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::MalformedTag {
            class: "org.example.CompileMojo".to_string(),
            tag: "goal".to_string(),
            reason: "empty value".to_string(),
        };
        let text = diag.to_string();
        assert!(text.contains("CompileMojo"));
        assert!(text.contains("@goal"));
    }

    #[test]
    fn test_duplicate_goal_display_names_both_classes() {
        let diag = Diagnostic::DuplicateGoal {
            goal: "compile".to_string(),
            class: "b.Second".to_string(),
            previous: "a.First".to_string(),
        };
        let text = diag.to_string();
        assert!(text.contains("a.First"));
        assert!(text.contains("b.Second"));
    }

    #[test]
    fn test_extract_error_display() {
        let err = ExtractError::RootNotFound(PathBuf::from("/missing"));
        assert!(err.to_string().contains("/missing"));
    }
}
