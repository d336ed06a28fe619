//! Error types for loading, linking, and filtering near-Earth object data.
//!
//! Everything fallible in this crate returns [`NeoResult<T>`]. Lookup misses
//! and empty query results are not errors; they surface as `None` and as an
//! empty iterator respectively.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`UnknownCriterion`](NeoError::UnknownCriterion) | filter construction from a key string |
//! | [`InvalidThreshold`](NeoError::InvalidThreshold) | filter construction with a mistyped threshold |
//! | [`DuplicateDesignation`](NeoError::DuplicateDesignation) | database construction |
//! | [`DuplicateName`](NeoError::DuplicateName) | database construction |
//! | [`UnmatchedDesignation`](NeoError::UnmatchedDesignation) | database construction under [`LinkPolicy::Strict`](crate::LinkPolicy::Strict) |
//! | [`MissingField`](NeoError::MissingField), [`Parse`](NeoError::Parse) | loaders |
//! | [`Io`](NeoError::Io), [`Json`](NeoError::Json) | loaders and writers |

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type NeoResult<T> = Result<T, NeoError>;

#[derive(Debug, Error)]
pub enum NeoError {
    #[error("Unknown filter criterion: '{key}'")]
    UnknownCriterion { key: String },

    #[error("Invalid threshold for '{key}': expected {expected}")]
    InvalidThreshold { key: String, expected: &'static str },

    #[error("Duplicate designation: '{designation}'")]
    DuplicateDesignation { designation: String },

    #[error("Duplicate name: '{name}' is used by more than one object")]
    DuplicateName { name: String },

    #[error("Close approach references unknown designation '{designation}'")]
    UnmatchedDesignation { designation: String },

    #[error("Missing field '{field}' in {source_kind} data")]
    MissingField {
        field: String,
        source_kind: &'static str,
    },

    #[error("Parse error ({source_kind}, record {record}): {message}")]
    Parse {
        source_kind: &'static str,
        record: usize,
        message: String,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NeoError {
    pub fn unknown_criterion(key: impl Into<String>) -> Self {
        Self::UnknownCriterion { key: key.into() }
    }

    pub fn invalid_threshold(key: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidThreshold {
            key: key.into(),
            expected,
        }
    }

    pub fn duplicate_designation(designation: impl Into<String>) -> Self {
        Self::DuplicateDesignation {
            designation: designation.into(),
        }
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn unmatched_designation(designation: impl Into<String>) -> Self {
        Self::UnmatchedDesignation {
            designation: designation.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>, source_kind: &'static str) -> Self {
        Self::MissingField {
            field: field.into(),
            source_kind,
        }
    }

    pub fn parse(source_kind: &'static str, record: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            source_kind,
            record,
            message: message.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for errors raised while turning user-supplied criteria into filters.
    pub fn is_criterion_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCriterion { .. } | Self::InvalidThreshold { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_criterion_message() {
        let err = NeoError::unknown_criterion("colour");
        assert!(err.to_string().contains("colour"));
        assert!(err.is_criterion_error());
    }

    #[test]
    fn test_parse_error_carries_record() {
        let err = NeoError::parse("neo csv", 7, "bad diameter");
        let msg = err.to_string();
        assert!(msg.contains("record 7"), "unexpected message: {}", msg);
        assert!(msg.contains("bad diameter"));
        assert!(!err.is_criterion_error());
    }

    #[test]
    fn test_io_error_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = NeoError::io(Path::new("data/neos.csv"), source);
        assert!(err.to_string().contains("neos.csv"));
    }
}
