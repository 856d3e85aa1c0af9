//! HTTP transport.
//!
//! One GET per call, body returned as raw bytes. Status codes are not
//! inspected: whatever body the server sends is handed to the caller, and only
//! failures of the request itself (connection, DNS, deadline, cancellation)
//! become errors.

use crate::error::{RepositoryError, Result};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// Transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Forward proxy URL. `None` or empty disables proxying.
    pub proxy: Option<String>,
    /// User-Agent header value.
    pub user_agent: String,
    /// Connection timeout, in whole seconds when serialized.
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    /// Whole-request deadline, in whole seconds when serialized.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpClientConfig {
    /// Proxy URL, if proxying is enabled.
    #[must_use]
    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy
            .as_deref()
            .map(str::trim)
            .filter(|proxy| !proxy.is_empty())
    }
}

/// HTTP client used by every repository operation.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    connect_timeout: Duration,
    timeout: Duration,
    proxied: bool,
    cancel: CancellationToken,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("client", &"reqwest::Client")
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("proxied", &self.proxied)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the proxy URL is unusable or the client cannot be built.
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .gzip(true);

        // Without an explicit proxy, ignore HTTP_PROXY and friends.
        builder = match config.proxy_url() {
            Some(proxy_url) => {
                let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                    RepositoryError::InvalidConfig {
                        message: format!("invalid proxy '{proxy_url}': {e}"),
                    }
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| RepositoryError::InvalidConfig {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            connect_timeout: config.connect_timeout,
            timeout: config.timeout,
            proxied: config.proxy_url().is_some(),
            cancel: CancellationToken::new(),
        })
    }

    /// Create a client with default configuration.
    ///
    /// # Errors
    /// Returns error if client cannot be built.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&HttpClientConfig::default())
    }

    /// Clone bound to `token`: requests abort with
    /// [`RepositoryError::Cancelled`] once it fires.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self.clone()
        }
    }

    /// Clone with a different whole-request deadline.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    /// Whole-request deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Limit that applies to a failure: the connect timeout while the
    /// connection is being established, the whole-request deadline otherwise.
    const fn expired_limit(&self, connecting: bool) -> Duration {
        if connecting {
            self.connect_timeout
        } else {
            self.timeout
        }
    }

    fn transport_error(&self, url: &Url, err: &reqwest::Error) -> RepositoryError {
        RepositoryError::from_reqwest(url, err, self.expired_limit(err.is_connect()))
    }

    /// Whether requests go through a forward proxy.
    #[must_use]
    pub const fn is_proxied(&self) -> bool {
        self.proxied
    }

    /// GET `url` and return the complete response body.
    ///
    /// # Errors
    /// Returns a transport error if the request cannot be completed, times
    /// out, or is cancelled.
    pub async fn get_bytes(&self, url: &Url) -> Result<Bytes> {
        debug!(url = %url, "GET request starting");

        let fetch = async {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| self.transport_error(url, &e))?;

            let status = response.status();
            if !status.is_success() {
                warn!(url = %url, status = %status, "non-success status, returning body as-is");
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| self.transport_error(url, &e))?;

            debug!(url = %url, status = %status, bytes = body.len(), "GET request finished");
            Ok::<_, RepositoryError>(body)
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!(url = %url, "GET request cancelled");
                Err(RepositoryError::Cancelled { url: url.to_string() })
            }
            result = tokio::time::timeout(self.timeout, fetch) => {
                result.unwrap_or_else(|_| {
                    debug!(url = %url, "GET request timed out");
                    Err(RepositoryError::Timeout {
                        url: url.to_string(),
                        timeout: self.timeout,
                    })
                })
            }
        }
    }
}

/// Serialize a `Duration` as whole seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
