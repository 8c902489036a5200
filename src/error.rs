//! Error types for usenet-nzb
//!
//! This module provides the error taxonomy for the library:
//! - Decode failures for malformed NZB documents (XML or JSON)
//! - I/O failures with the offending path attached
//! - Precondition violations for aggregates that are undefined on a document
//!
//! Absence (no filename, no extension, unrecognized metadata key) is never an error;
//! those are modeled with `Option` and `bool` return values.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for usenet-nzb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for usenet-nzb
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "encode.indent")
        key: Option<String>,
    },

    /// Invalid NZB document (malformed XML/JSON, missing root, bad attribute)
    #[error("invalid NZB: {0}")]
    InvalidNzb(String),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file that could not be read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Destination exists and the collision policy refuses to replace it
    #[error("refusing to write {}: file exists and overwriting is disabled", .path.display())]
    AlreadyExists {
        /// The destination that already exists
        path: PathBuf,
    },

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// XML serialization error
    #[error("XML serialization error: {0}")]
    Xml(String),

    /// An aggregate was requested on a document for which it is undefined
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),
}

/// Aggregates that are undefined on some documents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// Total size is zero, so a size ratio cannot be computed
    #[error("NZB contains no bytes; size ratio is undefined")]
    EmptyNzb,

    /// No non-repair file exists to be selected as the main file
    #[error("no main file: {files} file(s), {par2_files} of them PAR2")]
    NoMainFile {
        /// Number of files in the document
        files: usize,
        /// Number of those files that are PAR2 repair files
        par2_files: usize,
    },
}

impl Error {
    /// Build an [`Error::Io`] for `path`
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true when the error came from decoding a malformed document
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::InvalidNzb(_))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages() {
        let err: Error = PreconditionError::EmptyNzb.into();
        assert_eq!(
            err.to_string(),
            "precondition failed: NZB contains no bytes; size ratio is undefined"
        );

        let err: Error = PreconditionError::NoMainFile {
            files: 2,
            par2_files: 2,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "precondition failed: no main file: 2 file(s), 2 of them PAR2"
        );
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = Error::io(
            "/tmp/missing.nzb",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("/tmp/missing.nzb"));
        assert!(!err.is_decode_failure());
    }

    #[test]
    fn test_decode_failure_classification() {
        assert!(Error::InvalidNzb("missing <nzb> root".to_string()).is_decode_failure());
        assert!(!Error::Xml("boom".to_string()).is_decode_failure());
    }
}
