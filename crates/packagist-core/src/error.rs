//! Error types for core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON error.
    #[error("json error: {0}")]
    Json(#[from] sonic_rs::Error),

    /// IO error.
    #[error("io error at {path}: {message}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Create an IO error with context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_keeps_path() {
        let err = Error::io(
            "/tmp/index.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/index.json"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn json_error_converts() {
        let parse: std::result::Result<u64, sonic_rs::Error> = sonic_rs::from_str("{bad");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("json error"));
    }
}
