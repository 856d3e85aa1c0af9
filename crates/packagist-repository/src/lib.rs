//! Read-only client for the Packagist registry API.
//!
//! Each operation builds an endpoint URL from the configured server, issues
//! one GET and decodes the JSON body into a typed response:
//!
//! - **Package index**: every package name known to the registry.
//! - **Statistics**: registry-wide download, package and version totals.
//! - **Security advisories**: by update time, by package, or for a batch of
//!   packages.
//!
//! There are no retries, no caching and no pagination. Transport and decode
//! failures reach the caller unchanged; a package without advisories is an
//! empty result, not an error.
//!
//! ## Example
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use packagist_repository::PackagistClient;
//!
//! # async fn example() -> packagist_repository::Result<()> {
//! let client = PackagistClient::new()?;
//!
//! let packages = client.list_packages().await?;
//! println!("{} packages", packages.len());
//!
//! let recent = client
//!     .list_security_advisories(Utc::now() - Duration::days(7))
//!     .await?;
//! println!(
//!     "{} advisories across {} packages",
//!     recent.advisory_count(),
//!     recent.len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Saving the index
//!
//! ```no_run
//! # async fn example() -> packagist_repository::Result<()> {
//! packagist_repository::download_index_to_file("index.json").await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod index;
pub mod packagist;

pub use client::{HttpClient, HttpClientConfig};
pub use error::{RepositoryError, Result};
pub use index::{INDEX_URL, IndexDownloader, download_index, download_index_to_file};
pub use packagist::{
    AdvisorySource, ListFilter, PACKAGIST_URL, PackageListResponse, PackagistClient,
    PackagistConfig, SecurityAdvisoriesResponse, SecurityAdvisory, StatisticsResponse, Totals,
};
pub use packagist_core::Package;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a Packagist client for packagist.org.
///
/// # Errors
/// Returns error if client cannot be created.
pub fn packagist() -> Result<PackagistClient> {
    PackagistClient::new()
}
