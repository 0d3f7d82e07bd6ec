//! Dotted version strings as they appear in API change ledgers.
//!
//! Ledger versions are not always semver (`1.4`, `1.4.21`, `2.0.1`), so they
//! are ordered by their numeric components rather than by string comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

mod error;
pub use error::{Result, VersionError};

/// A version string split into its numeric `.`-separated components.
///
/// Equality and ordering only look at the components, so `1.04` and `1.4`
/// compare equal while keeping their original spelling for display.
#[derive(Debug, Clone)]
pub struct DottedVersion {
    raw: String,
    components: Vec<u64>,
}

impl DottedVersion {
    /// Parse a version string such as `1.4.21`
    pub fn parse(version: &str) -> Result<Self> {
        if version.is_empty() {
            return Err(VersionError::Empty);
        }

        let components = version
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| VersionError::InvalidComponent {
                        version: version.to_string(),
                        component: part.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: version.to_string(),
            components,
        })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl FromStr for DottedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for DottedVersion {}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Vec ordering is lexicographic with a shorter prefix first: 2.0 < 2.0.1
        self.components.cmp(&other.components)
    }
}

/// An (old, new) version pair identifying one chapter of the change report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionPair {
    pub old: String,
    pub new: String,
}

impl VersionPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Display key in the ledger's `old-new` form
    pub fn key(&self) -> String {
        format!("{}-{}", self.old, self.new)
    }
}

impl fmt::Display for VersionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old, self.new)
    }
}
