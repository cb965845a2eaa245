//! Store error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a configuration store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a configuration or transaction file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document could not be parsed.
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration document could not be serialised.
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Transaction base version differs from the committed version.
    #[error("Version mismatch: transaction based on {base}, committed version is {current}")]
    VersionMismatch { base: i64, current: i64 },

    #[error("Transaction {0} does not exist")]
    TransactionNotFound(String),

    #[error("{kind} {name} not found")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} {name} already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// The candidate configuration was rejected on commit.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn already_exists(kind: &'static str, name: impl Into<String>) -> Self {
        StoreError::AlreadyExists {
            kind,
            name: name.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::VersionMismatch { base: 3, current: 4 };
        assert_eq!(
            err.to_string(),
            "Version mismatch: transaction based on 3, committed version is 4"
        );

        let err = StoreError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed: a, b");

        let err = StoreError::not_found("backend", "web");
        assert_eq!(err.to_string(), "backend web not found");
    }
}
