//! Package references.

use serde::{Deserialize, Serialize};

/// A package as it appears in the registry index: just its name.
///
/// Names are normally `vendor/name`, but the index is trusted as-is, so
/// no format is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    /// Full package name.
    pub name: String,
}

impl Package {
    /// Create new package reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get vendor part of a `vendor/name` package name.
    #[must_use]
    pub fn vendor(&self) -> Option<&str> {
        self.split().map(|(vendor, _)| vendor)
    }

    /// Get name part of a `vendor/name` package name.
    #[must_use]
    pub fn short_name(&self) -> Option<&str> {
        self.split().map(|(_, name)| name)
    }

    fn split(&self) -> Option<(&str, &str)> {
        let (vendor, name) = self.name.split_once('/')?;
        if vendor.is_empty() || name.is_empty() {
            return None;
        }
        Some((vendor, name))
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<String> for Package {
    fn from(name: String) -> Self {
        Self { name }
    }
}

impl From<&str> for Package {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
