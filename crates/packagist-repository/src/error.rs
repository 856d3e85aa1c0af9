//! Repository-specific error types.

use std::error::Error as StdError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Repository-specific errors.
///
/// Transport failures (`Network`, `Timeout`, `Cancelled`, `InvalidUrl`) and
/// decode failures (`Parse`) reach the caller unchanged; nothing is retried.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The request could not be completed.
    #[error("network error fetching {url}: {message}")]
    Network {
        /// URL that failed.
        url: String,
        /// Error message.
        message: String,
    },

    /// The request exceeded its deadline.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// URL that timed out.
        url: String,
        /// Limit that was exceeded: the connect timeout when the connection
        /// never came up, otherwise the whole-request deadline.
        timeout: Duration,
    },

    /// The request was cancelled by the caller.
    #[error("request to {url} was cancelled")]
    Cancelled {
        /// URL of the aborted request.
        url: String,
    },

    /// The request URL could not be built.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The invalid URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Response body is not valid JSON for the expected shape.
    #[error("failed to parse response from {url}: {message}")]
    Parse {
        /// URL the body came from.
        url: String,
        /// Error message.
        message: String,
    },

    /// Local file could not be written.
    #[error("io error at {path}: {message}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Invalid client configuration.
    #[error("invalid repository configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },
}

impl RepositoryError {
    /// Map a reqwest failure for `url`. `timeout` is the limit that applies
    /// to this failure if it turns out to be a timeout.
    pub(crate) fn from_reqwest(url: &Url, err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                url: url.to_string(),
                timeout,
            };
        }
        if err.is_builder() {
            return Self::InvalidUrl {
                url: url.to_string(),
                message: error_chain(err),
            };
        }
        Self::Network {
            url: url.to_string(),
            message: error_chain(err),
        }
    }

    /// Map a decode failure for the body fetched from `url`.
    pub(crate) fn parse(url: &Url, err: &packagist_core::Error) -> Self {
        Self::Parse {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Map a file write failure.
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Whether the failure happened below the JSON layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::Timeout { .. }
                | Self::Cancelled { .. }
                | Self::InvalidUrl { .. }
        )
    }

    /// Whether the response body failed to decode.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Join an error with its sources, since reqwest keeps the useful detail
/// (DNS, connection refused) in the chain.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
