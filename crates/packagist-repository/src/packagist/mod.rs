//! Packagist repository integration.
//!
//! Read-only access to the public Packagist API:
//!
//! - Package name index (`/packages/list.json`)
//! - Registry statistics (`/statistics.json`)
//! - Security advisories (`/api/security-advisories/`)
//!
//! # Example
//!
//! ```no_run
//! use packagist_repository::packagist::{PackagistClient, PackagistConfig};
//!
//! # async fn example() -> packagist_repository::Result<()> {
//! let client = PackagistClient::with_config(
//!     PackagistConfig::default().with_proxy("http://proxy.internal:3128"),
//! )?;
//!
//! let stats = client.statistics().await?;
//! println!("{} downloads", stats.totals.downloads);
//!
//! for advisory in client.list_advisories("symfony/http-kernel").await? {
//!     println!("{}: {}", advisory.cve, advisory.title);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod types;

pub use client::{ListFilter, PACKAGIST_URL, PackagistClient, PackagistConfig};
pub use types::{
    AdvisorySource, PackageListResponse, SecurityAdvisoriesResponse, SecurityAdvisory,
    StatisticsResponse, Totals,
};
