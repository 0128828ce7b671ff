//! Error types for codebook.
//!
//! This module defines all error types used throughout the codebook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for codebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Seed Errors ===
    /// The seed file could not be read.
    #[error("failed to load data from {path}: {source}")]
    SeedRead {
        /// Path to the seed file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a valid seed document.
    #[error("failed to parse data in {path}: {source}")]
    SeedParse {
        /// Path to the seed file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Record Errors ===
    /// No record carries the requested code.
    #[error("no record with code '{code}'")]
    RecordNotFound {
        /// The code that was looked up.
        code: String,
    },

    /// A request body could not be bound to a record.
    #[error("invalid record body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    // === Server Errors ===
    /// The listener could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// The address that was requested.
        address: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for codebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a record not found error.
    #[must_use]
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::RecordNotFound { code: code.into() }
    }

    /// Check if this error means the requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Check if this error was caused by client input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidBody(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<i32>("not valid json").unwrap_err()
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("A-1");
        assert_eq!(err.to_string(), "no record with code 'A-1'");
        assert!(err.is_not_found());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_invalid_body_is_client_error() {
        let err = Error::InvalidBody(json_error());
        assert!(err.is_client_error());
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("invalid record body"));
    }

    #[test]
    fn test_seed_read_error_display() {
        let err = Error::SeedRead {
            path: PathBuf::from("/missing/data.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/data.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_seed_parse_error_display() {
        let err = Error::SeedParse {
            path: PathBuf::from("data.txt"),
            source: json_error(),
        };
        assert!(err.to_string().starts_with("failed to parse data in data.txt"));
    }

    #[test]
    fn test_bind_error_display() {
        let err = Error::Bind {
            address: "0.0.0.0:80".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.0.0.0:80"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "address must not be empty".to_string(),
        };
        assert!(err.to_string().contains("address must not be empty"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
