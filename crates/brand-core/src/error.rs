//! Error types for brand-core

use thiserror::Error;

/// Result type alias for brand-core operations
pub type Result<T> = std::result::Result<T, BrandError>;

/// Main error type for brand-core operations
#[derive(Error, Debug)]
pub enum BrandError {
    /// A relation record is missing its primary or secondaries field.
    /// Only raised under [`MalformedRecordPolicy::FailFast`](crate::MalformedRecordPolicy).
    #[error("Malformed relation record at index {index}: {reason}")]
    MalformedRelation { index: usize, reason: String },

    /// A brand name could not be turned into a whole-word pattern
    #[error("Invalid pattern for brand {brand:?}: {message}")]
    InvalidPattern { brand: String, message: String },

    /// A source or sink file could not be read or written
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    /// File content did not deserialize
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BrandError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        BrandError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: impl AsRef<std::path::Path>, err: impl std::fmt::Display) -> Self {
        BrandError::Parse {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_names_index() {
        let err = BrandError::MalformedRelation {
            index: 3,
            reason: "missing primary".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed relation record at index 3: missing primary"
        );
    }

    #[test]
    fn io_helper_keeps_path() {
        let err = BrandError::io(
            "/tmp/out.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out.json"));
        assert!(err.to_string().contains("denied"));
    }
}
