//! Packagist API client.

use super::types::{
    PackageListResponse, SecurityAdvisoriesResponse, SecurityAdvisory, StatisticsResponse,
};
use crate::client::{HttpClient, HttpClientConfig};
use crate::error::{RepositoryError, Result};
use chrono::{DateTime, Utc};
use packagist_core::{Package, from_json_slice};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Default Packagist server.
pub const PACKAGIST_URL: &str = "https://packagist.org";

/// Packagist client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagistConfig {
    /// Base server URL; endpoint paths are appended to it.
    pub server_url: String,
    /// Transport settings.
    pub http: HttpClientConfig,
}

impl Default for PackagistConfig {
    fn default() -> Self {
        Self {
            server_url: PACKAGIST_URL.to_string(),
            http: HttpClientConfig::default(),
        }
    }
}

impl PackagistConfig {
    /// Configuration for a Packagist-compatible server at `server_url`.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Route requests through a forward proxy. An empty string disables it.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.http.proxy = Some(proxy.into());
        self
    }

    /// Set the whole-request deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = user_agent.into();
        self
    }

    /// Load configuration from a JSON document. Missing fields keep defaults.
    ///
    /// # Errors
    /// Returns error if the document is not a valid configuration.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        from_json_slice(bytes).map_err(|e| RepositoryError::InvalidConfig {
            message: e.to_string(),
        })
    }
}

/// Optional filters for the package name index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only packages from this vendor.
    pub vendor: Option<String>,
    /// Only packages of this type (`library`, `symfony-bundle`, ...).
    pub package_type: Option<String>,
}

impl ListFilter {
    /// Empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a vendor.
    #[must_use]
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Restrict to a package type.
    #[must_use]
    pub fn package_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }
}

/// Read-only client for the Packagist API.
///
/// Every operation is one GET followed by a JSON decode. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct PackagistClient {
    config: Arc<PackagistConfig>,
    http: HttpClient,
}

impl PackagistClient {
    /// Create client for packagist.org.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(PackagistConfig::default())
    }

    /// Create client with custom configuration.
    ///
    /// # Errors
    /// Returns error if the proxy is unusable or the HTTP client cannot be built.
    pub fn with_config(config: PackagistConfig) -> Result<Self> {
        let http = HttpClient::new(&config.http)?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &PackagistConfig {
        &self.config
    }

    /// Get the base server URL.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    /// Clone whose requests abort once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            config: Arc::clone(&self.config),
            http: self.http.with_cancellation(token),
        }
    }

    /// Clone with a different whole-request deadline.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            config: Arc::clone(&self.config),
            http: self.http.with_timeout(timeout),
        }
    }

    /// List every package name in the registry.
    ///
    /// # Errors
    /// Returns error if the request or decoding fails.
    pub async fn list_packages(&self) -> Result<Vec<Package>> {
        self.list_packages_filtered(&ListFilter::default()).await
    }

    /// List package names matching `filter`.
    ///
    /// # Errors
    /// Returns error if the request or decoding fails.
    pub async fn list_packages_filtered(&self, filter: &ListFilter) -> Result<Vec<Package>> {
        let mut url = self.endpoint("packages/list.json")?;
        if filter.vendor.is_some() || filter.package_type.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(vendor) = &filter.vendor {
                query.append_pair("vendor", vendor);
            }
            if let Some(package_type) = &filter.package_type {
                query.append_pair("type", package_type);
            }
        }

        let response: PackageListResponse = self.get_json(&url).await?;
        debug!(count = response.package_names.len(), "listed packages");

        Ok(response
            .package_names
            .into_iter()
            .map(Package::from)
            .collect())
    }

    /// Fetch registry-wide download and package totals.
    ///
    /// # Errors
    /// Returns error if the request or decoding fails.
    pub async fn statistics(&self) -> Result<StatisticsResponse> {
        let url = self.endpoint("statistics.json")?;
        self.get_json(&url).await
    }

    /// List advisories reported or updated after `updated_since`.
    ///
    /// # Errors
    /// Returns error if the request or decoding fails.
    pub async fn list_security_advisories(
        &self,
        updated_since: DateTime<Utc>,
    ) -> Result<SecurityAdvisoriesResponse> {
        let mut url = self.endpoint("api/security-advisories/")?;
        url.query_pairs_mut()
            .append_pair("updatedSince", &updated_since.timestamp_millis().to_string());
        self.get_json(&url).await
    }

    /// List advisories for one package.
    ///
    /// A package the server reports nothing for yields an empty list, not an
    /// error.
    ///
    /// # Errors
    /// Returns error if the request or decoding fails.
    pub async fn list_advisories(&self, package: &str) -> Result<Vec<SecurityAdvisory>> {
        let mut url = self.endpoint("api/security-advisories/")?;
        url.query_pairs_mut().append_pair("packages", package);

        let mut response: SecurityAdvisoriesResponse = self.get_json(&url).await?;
        let advisories = response.advisories.shift_remove(package).unwrap_or_default();
        debug!(package, count = advisories.len(), "fetched advisories");
        Ok(advisories)
    }

    /// List advisories for several packages in one request.
    ///
    /// No request is sent for an empty slice.
    ///
    /// # Errors
    /// Returns error if the request or decoding fails.
    pub async fn list_advisories_for_packages(
        &self,
        packages: &[&str],
    ) -> Result<SecurityAdvisoriesResponse> {
        if packages.is_empty() {
            return Ok(SecurityAdvisoriesResponse::default());
        }

        let mut url = self.endpoint("api/security-advisories/")?;
        {
            let mut query = url.query_pairs_mut();
            for package in packages {
                query.append_pair("packages[]", package);
            }
        }
        self.get_json(&url).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{path}", self.config.server_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|e| RepositoryError::InvalidUrl {
            url: raw,
            message: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let body = self.http.get_bytes(url).await?;
        from_json_slice(&body).map_err(|e| RepositoryError::parse(url, &e))
    }
}
