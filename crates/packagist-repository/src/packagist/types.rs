//! Packagist API response types.
//!
//! Every field tolerates being absent or `null` and falls back to its zero
//! value. `null` entries inside lists are dropped. Unknown fields are ignored.

use indexmap::IndexMap;
use packagist_core::json::{list_skip_nulls, map_or_empty_array, null_as_default};
use serde::{Deserialize, Serialize};

/// Package name index (`/packages/list.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageListResponse {
    /// Package names.
    #[serde(default, rename = "packageNames", deserialize_with = "list_skip_nulls")]
    pub package_names: Vec<String>,
}

/// Statistics response (`/statistics.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatisticsResponse {
    /// Registry-wide totals.
    #[serde(default, deserialize_with = "null_as_default")]
    pub totals: Totals,
}

/// Registry-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Totals {
    /// Total downloads.
    #[serde(default, deserialize_with = "null_as_default")]
    pub downloads: u64,
    /// Number of packages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub packages: u64,
    /// Number of versions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: u64,
}

/// Security advisories response, keyed by package name in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SecurityAdvisoriesResponse {
    /// Advisories by package name.
    #[serde(default, deserialize_with = "map_or_empty_array")]
    pub advisories: IndexMap<String, Vec<SecurityAdvisory>>,
}

impl SecurityAdvisoriesResponse {
    /// Advisories reported for `package`, if any.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&[SecurityAdvisory]> {
        self.advisories.get(package).map(Vec::as_slice)
    }

    /// Number of packages with advisories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.advisories.len()
    }

    /// Whether no package has advisories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }

    /// Total number of advisories across all packages.
    #[must_use]
    pub fn advisory_count(&self) -> usize {
        self.advisories.values().map(Vec::len).sum()
    }
}

/// Individual security advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SecurityAdvisory {
    /// Advisory ID.
    #[serde(default, rename = "advisoryId", deserialize_with = "null_as_default")]
    pub advisory_id: String,
    /// Package name.
    #[serde(default, rename = "packageName", deserialize_with = "null_as_default")]
    pub package_name: String,
    /// Identifier at the reporting source.
    #[serde(default, rename = "remoteId", deserialize_with = "null_as_default")]
    pub remote_id: String,
    /// Title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Link to advisory.
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    /// CVE ID, empty if none was assigned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cve: String,
    /// Affected versions (Composer constraint, kept verbatim).
    #[serde(default, rename = "affectedVersions", deserialize_with = "null_as_default")]
    pub affected_versions: String,
    /// Source label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    /// When reported, as sent by the server.
    #[serde(default, rename = "reportedAt", deserialize_with = "null_as_default")]
    pub reported_at: String,
    /// Composer repository the package comes from.
    #[serde(default, rename = "composerRepository", deserialize_with = "null_as_default")]
    pub composer_repository: String,
    /// Cross-references at other sources.
    #[serde(default, deserialize_with = "list_skip_nulls")]
    pub sources: Vec<AdvisorySource>,
}

/// Advisory source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdvisorySource {
    /// Source name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Remote ID.
    #[serde(default, rename = "remoteId", deserialize_with = "null_as_default")]
    pub remote_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADVISORIES: &str = r#"{
        "advisories": {
            "vendor/package1": [
                {
                    "advisoryId": "GHSA-1234-5678-9012",
                    "packageName": "vendor/package1",
                    "remoteId": "GHSA-1234-5678-9012",
                    "title": "Critical vulnerability in package1",
                    "link": "https://example.com/advisory/123",
                    "cve": "CVE-2023-1234",
                    "affectedVersions": "<2.0.0",
                    "source": "GitHub",
                    "reportedAt": "2023-01-15",
                    "composerRepository": "https://packagist.org",
                    "sources": [
                        {"name": "GitHub", "remoteId": "GHSA-1234-5678-9012"}
                    ],
                    "severity": "high"
                }
            ],
            "acme/tool": [
                {"advisoryId": "PKSA-a", "packageName": "acme/tool", "cve": null},
                {"advisoryId": "PKSA-b", "packageName": "acme/tool", "sources": null}
            ]
        }
    }"#;

    #[test]
    fn test_advisories_decode() {
        let response: SecurityAdvisoriesResponse = sonic_rs::from_str(ADVISORIES).unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response.advisory_count(), 3);

        let advisory = &response.get("vendor/package1").unwrap()[0];
        assert_eq!(advisory.advisory_id, "GHSA-1234-5678-9012");
        assert_eq!(advisory.remote_id, "GHSA-1234-5678-9012");
        assert_eq!(advisory.cve, "CVE-2023-1234");
        assert_eq!(advisory.affected_versions, "<2.0.0");
        assert_eq!(advisory.reported_at, "2023-01-15");
        assert_eq!(advisory.composer_repository, "https://packagist.org");
        assert_eq!(
            advisory.sources,
            vec![AdvisorySource {
                name: "GitHub".into(),
                remote_id: "GHSA-1234-5678-9012".into(),
            }]
        );
    }

    #[test]
    fn test_advisory_nulls_are_empty() {
        let response: SecurityAdvisoriesResponse = sonic_rs::from_str(ADVISORIES).unwrap();
        let tool = response.get("acme/tool").unwrap();
        assert_eq!(tool[0].cve, "");
        assert_eq!(tool[0].title, "");
        assert!(tool[1].sources.is_empty());
    }

    #[test]
    fn test_null_advisory_list_is_empty() {
        let response: SecurityAdvisoriesResponse =
            sonic_rs::from_str(r#"{"advisories": {"a/b": null, "c/d": [null]}}"#).unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response.get("a/b"), Some(&[][..]));
        assert_eq!(response.get("c/d"), Some(&[][..]));
        assert_eq!(response.advisory_count(), 0);
    }

    #[test]
    fn test_null_sources_are_dropped() {
        let advisory: SecurityAdvisory = sonic_rs::from_str(
            r#"{"advisoryId": "PKSA-x", "sources": [null, {"name": "GitHub", "remoteId": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(advisory.advisory_id, "PKSA-x");
        assert_eq!(advisory.sources.len(), 1);
        assert_eq!(advisory.sources[0].remote_id, "x");

        let only_null: SecurityAdvisory = sonic_rs::from_str(r#"{"sources": [null]}"#).unwrap();
        assert!(only_null.sources.is_empty());
    }

    #[test]
    fn test_advisories_keep_response_order() {
        let response: SecurityAdvisoriesResponse = sonic_rs::from_str(ADVISORIES).unwrap();
        let keys: Vec<_> = response.advisories.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["vendor/package1", "acme/tool"]);
    }

    #[test]
    fn test_advisories_empty_shapes() {
        let bodies = [
            "{}",
            r#"{"advisories": {}}"#,
            r#"{"advisories": []}"#,
            r#"{"advisories": null}"#,
        ];
        for body in bodies {
            let response: SecurityAdvisoriesResponse = sonic_rs::from_str(body).unwrap();
            assert!(response.is_empty(), "{body}");
            assert_eq!(response.advisory_count(), 0);
        }
    }

    #[test]
    fn test_advisory_roundtrip() {
        let response: SecurityAdvisoriesResponse = sonic_rs::from_str(ADVISORIES).unwrap();
        let encoded = packagist_core::to_json(&response).unwrap();
        assert!(encoded.contains(r#""advisoryId":"GHSA-1234-5678-9012""#));
        assert!(!encoded.contains("severity"));

        let decoded: SecurityAdvisoriesResponse = sonic_rs::from_str(&encoded).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_statistics_decode() {
        let stats: StatisticsResponse = sonic_rs::from_str(
            r#"{"totals": {"downloads": 1000000, "packages": 500, "versions": 2000}}"#,
        )
        .unwrap();
        assert_eq!(
            stats.totals,
            Totals {
                downloads: 1_000_000,
                packages: 500,
                versions: 2000,
            }
        );
    }

    #[test]
    fn test_statistics_partial() {
        let stats: StatisticsResponse =
            sonic_rs::from_str(r#"{"totals": {"downloads": 7}}"#).unwrap();
        assert_eq!(stats.totals.downloads, 7);
        assert_eq!(stats.totals.packages, 0);
        assert_eq!(stats.totals.versions, 0);

        let empty: StatisticsResponse = sonic_rs::from_str("{}").unwrap();
        assert_eq!(empty.totals, Totals::default());

        let null: StatisticsResponse = sonic_rs::from_str(r#"{"totals": null}"#).unwrap();
        assert_eq!(null.totals, Totals::default());
    }

    #[test]
    fn test_statistics_large_downloads() {
        let stats: StatisticsResponse =
            sonic_rs::from_str(r#"{"totals": {"downloads": 98765432101234}}"#).unwrap();
        assert_eq!(stats.totals.downloads, 98_765_432_101_234);
    }

    #[test]
    fn test_statistics_wrong_type() {
        let result: Result<StatisticsResponse, _> =
            sonic_rs::from_str(r#"{"totals": {"downloads": "many"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_package_list() {
        let list: PackageListResponse =
            sonic_rs::from_str(r#"{"packageNames": ["a/b", "c/d"]}"#).unwrap();
        assert_eq!(list.package_names, vec!["a/b", "c/d"]);

        let missing: PackageListResponse = sonic_rs::from_str("{}").unwrap();
        assert!(missing.package_names.is_empty());
    }

    #[test]
    fn test_package_list_null_names_dropped() {
        let list: PackageListResponse =
            sonic_rs::from_str(r#"{"packageNames": ["a/b", null, "c/d"]}"#).unwrap();
        assert_eq!(list.package_names, vec!["a/b", "c/d"]);

        let null: PackageListResponse =
            sonic_rs::from_str(r#"{"packageNames": null}"#).unwrap();
        assert!(null.package_names.is_empty());
    }
}
