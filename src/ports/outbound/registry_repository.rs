use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Registry metadata for a single package, as returned by the
/// `package_metadata` lookup.
///
/// Every field is optional: the analysis core treats missing data as a
/// signal of its own and never fails on an incomplete document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryMetadata {
    /// Deprecation message when the registry marks the package deprecated.
    pub deprecated: Option<String>,
    /// Dist-tag name to version string (e.g. "latest" -> "1.6.0").
    pub dist_tags: HashMap<String, String>,
    /// Publish timestamps keyed by version (the npm `time` map, including
    /// the "created"/"modified" entries when present).
    pub time: HashMap<String, DateTime<Utc>>,
    /// Weekly download count when the registry exposes one.
    pub weekly_downloads: Option<u64>,
}

impl RegistryMetadata {
    /// The most recent publish instant: the `modified` entry when present,
    /// otherwise the maximum timestamp across all versions.
    pub fn last_publish(&self) -> Option<DateTime<Utc>> {
        if let Some(modified) = self.time.get("modified") {
            return Some(*modified);
        }
        self.time.values().max().copied()
    }
}

/// RegistryRepository port for resolving package registry data
///
/// This port abstracts the two external lookups the analysis engine
/// depends on: the latest published version of a package and its
/// registry metadata (deprecation, publish times, dist-tags).
///
/// # Async Support
/// Both lookups are async so the enrichment step can fan out over many
/// packages concurrently. Implementations must be `Send + Sync`.
#[async_trait]
pub trait RegistryRepository: Send + Sync {
    /// Resolves the latest published version of a package.
    ///
    /// # Returns
    /// `Ok(None)` when the registry has no usable latest version for the
    /// package; the caller treats that the same as a rejected lookup.
    ///
    /// # Errors
    /// Returns an error if the lookup transport fails. Callers must treat
    /// the error as "no data" for this package, never as a batch failure.
    async fn latest_version(&self, package_name: &str) -> Result<Option<String>>;

    /// Fetches registry metadata for a package.
    ///
    /// # Errors
    /// Returns an error if the lookup transport fails; per-package errors
    /// must not abort the surrounding batch.
    async fn package_metadata(&self, package_name: &str) -> Result<RegistryMetadata>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_last_publish_prefers_modified() {
        let mut metadata = RegistryMetadata::default();
        metadata.time.insert("1.0.0".to_string(), ts(2024, 6, 1));
        metadata.time.insert("modified".to_string(), ts(2023, 1, 1));

        assert_eq!(metadata.last_publish(), Some(ts(2023, 1, 1)));
    }

    #[test]
    fn test_last_publish_falls_back_to_max_version_time() {
        let mut metadata = RegistryMetadata::default();
        metadata.time.insert("1.0.0".to_string(), ts(2021, 3, 1));
        metadata.time.insert("2.0.0".to_string(), ts(2024, 6, 1));

        assert_eq!(metadata.last_publish(), Some(ts(2024, 6, 1)));
    }

    #[test]
    fn test_last_publish_empty_time_map() {
        let metadata = RegistryMetadata::default();
        assert_eq!(metadata.last_publish(), None);
    }
}
