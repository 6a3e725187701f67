use crate::ports::outbound::{RegistryMetadata, RegistryRepository};
use crate::risk_analysis::domain::LockedPackage;
use futures::stream::{self, StreamExt};

/// Default bound on concurrent registry lookups. A tunable, not a
/// correctness requirement: it keeps a large `limit` from overwhelming
/// the injected lookup transport.
const MAX_CONCURRENT_LOOKUPS: usize = 10;

/// A candidate package joined with what the registry knows about it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedDependency {
    pub package: LockedPackage,
    pub latest_version: Option<String>,
    pub metadata: RegistryMetadata,
    /// At least one of the two lookups rejected; the package is analyzed
    /// with unknown data instead of being dropped.
    pub lookup_failed: bool,
}

/// MetadataEnricher resolves latest versions and registry metadata for a
/// bounded slice of the candidate list.
///
/// Lookups fan out concurrently up to the configured bound; one
/// package's failure never aborts the others, and results come back in
/// candidate order. Memoization lives in the caching repository the
/// caller passes in, so the enricher itself stays stateless.
pub struct MetadataEnricher {
    max_concurrent: usize,
}

impl MetadataEnricher {
    pub fn new() -> Self {
        Self {
            max_concurrent: MAX_CONCURRENT_LOOKUPS,
        }
    }

    pub fn with_concurrency(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Enriches at most `limit` candidates, in candidate order.
    ///
    /// The cap is explicit input: names beyond it are excluded from the
    /// run entirely, not silently truncated mid-pipeline.
    pub async fn enrich<R>(
        &self,
        candidates: &[LockedPackage],
        limit: usize,
        registry: &R,
    ) -> Vec<EnrichedDependency>
    where
        R: RegistryRepository + ?Sized,
    {
        let slice = &candidates[..candidates.len().min(limit)];

        let mut indexed: Vec<(usize, EnrichedDependency)> =
            stream::iter(slice.iter().cloned().enumerate())
                .map(|(index, package)| async move {
                    let enriched = Self::lookup_one(package, registry).await;
                    (index, enriched)
                })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;

        // buffer_unordered yields in completion order; restore input order.
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, enriched)| enriched).collect()
    }

    async fn lookup_one<R>(package: LockedPackage, registry: &R) -> EnrichedDependency
    where
        R: RegistryRepository + ?Sized,
    {
        let (latest_version, latest_failed) = match registry.latest_version(&package.name).await {
            Ok(latest) => (latest, false),
            Err(_) => (None, true),
        };

        let (metadata, metadata_failed) = match registry.package_metadata(&package.name).await {
            Ok(metadata) => (metadata, false),
            Err(_) => (RegistryMetadata::default(), true),
        };

        EnrichedDependency {
            package,
            latest_version,
            metadata,
            lookup_failed: latest_failed || metadata_failed,
        }
    }
}

impl Default for MetadataEnricher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Result;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubRegistry {
        failing: HashSet<String>,
        calls: AtomicUsize,
    }

    impl StubRegistry {
        fn new() -> Self {
            Self {
                failing: HashSet::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing_for(names: &[&str]) -> Self {
            Self {
                failing: names.iter().map(|n| n.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RegistryRepository for StubRegistry {
        async fn latest_version(&self, package_name: &str) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(package_name) {
                anyhow::bail!("lookup rejected");
            }
            Ok(Some("9.9.9".to_string()))
        }

        async fn package_metadata(&self, package_name: &str) -> Result<RegistryMetadata> {
            if self.failing.contains(package_name) {
                anyhow::bail!("lookup rejected");
            }
            Ok(RegistryMetadata::default())
        }
    }

    fn candidates(names: &[&str]) -> Vec<LockedPackage> {
        names
            .iter()
            .map(|name| LockedPackage {
                name: name.to_string(),
                version: "1.0.0".to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_enrich_preserves_candidate_order() {
        let registry = StubRegistry::new();
        let enricher = MetadataEnricher::new();
        let list = candidates(&["zeta", "alpha", "mid"]);

        let enriched = enricher.enrich(&list, 10, &registry).await;
        let names: Vec<&str> = enriched
            .iter()
            .map(|e| e.package.name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn test_enrich_honors_limit() {
        let registry = StubRegistry::new();
        let enricher = MetadataEnricher::new();
        let list = candidates(&["a", "b", "c", "d"]);

        let enriched = enricher.enrich(&list, 2, &registry).await;
        assert_eq!(enriched.len(), 2);
        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_enrich_limit_larger_than_list() {
        let registry = StubRegistry::new();
        let enricher = MetadataEnricher::new();
        let list = candidates(&["a", "b"]);

        let enriched = enricher.enrich(&list, 50, &registry).await;
        assert_eq!(enriched.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_lookup_does_not_abort_batch() {
        let registry = StubRegistry::failing_for(&["broken"]);
        let enricher = MetadataEnricher::new();
        let list = candidates(&["good", "broken", "also-good"]);

        let enriched = enricher.enrich(&list, 10, &registry).await;
        assert_eq!(enriched.len(), 3);

        assert!(!enriched[0].lookup_failed);
        assert_eq!(enriched[0].latest_version.as_deref(), Some("9.9.9"));

        assert!(enriched[1].lookup_failed);
        assert_eq!(enriched[1].latest_version, None);
        assert_eq!(enriched[1].metadata, RegistryMetadata::default());

        assert!(!enriched[2].lookup_failed);
    }

    #[tokio::test]
    async fn test_enrich_empty_candidates() {
        let registry = StubRegistry::new();
        let enricher = MetadataEnricher::with_concurrency(4);

        let enriched = enricher.enrich(&[], 10, &registry).await;
        assert!(enriched.is_empty());
    }
}
