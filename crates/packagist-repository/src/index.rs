//! Standalone download of the full package name index.
//!
//! Independent of any client configuration: the index always comes from
//! [`INDEX_URL`] unless a downloader is explicitly pointed elsewhere.

use crate::client::HttpClient;
use crate::error::{RepositoryError, Result};
use bytes::Bytes;
use std::path::Path;
use tracing::info;
use url::Url;

/// Well-known location of the package name index.
pub const INDEX_URL: &str = "https://packagist.org/packages/list.json";

/// Downloads the raw index JSON.
#[derive(Debug, Clone)]
pub struct IndexDownloader {
    client: HttpClient,
    url: Url,
}

impl IndexDownloader {
    /// Create downloader for [`INDEX_URL`] with a default transport.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let url = Url::parse(INDEX_URL).map_err(|e| RepositoryError::InvalidUrl {
            url: INDEX_URL.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            client: HttpClient::with_defaults()?,
            url,
        })
    }

    /// Use a different transport, e.g. one bound to a cancellation token.
    #[must_use]
    pub fn with_client(mut self, client: HttpClient) -> Self {
        self.client = client;
        self
    }

    /// Download from a different location.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    /// Index location.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Download the index bytes, undecoded.
    ///
    /// # Errors
    /// Returns a transport error if the download fails.
    pub async fn fetch(&self) -> Result<Bytes> {
        self.client.get_bytes(&self.url).await
    }

    /// Download the index and write it verbatim to `path`.
    ///
    /// An existing file is overwritten. Parent directories are not created.
    ///
    /// # Errors
    /// Returns a transport error if the download fails, or an IO error if
    /// the file cannot be written.
    pub async fn fetch_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.fetch().await?;

        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| RepositoryError::io(path, &e))?;

        info!(url = %self.url, path = %path.display(), bytes = bytes.len(), "index downloaded");
        Ok(())
    }
}

/// Download the full package name index from [`INDEX_URL`].
///
/// # Errors
/// Returns a transport error if the download fails.
pub async fn download_index() -> Result<Bytes> {
    IndexDownloader::new()?.fetch().await
}

/// Download the full package name index from [`INDEX_URL`] into `path`.
///
/// # Errors
/// Returns a transport error if the download fails, or an IO error if the
/// file cannot be written.
pub async fn download_index_to_file(path: impl AsRef<Path>) -> Result<()> {
    IndexDownloader::new()?.fetch_to_file(path).await
}
