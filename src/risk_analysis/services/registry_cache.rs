use crate::ports::outbound::{RegistryMetadata, RegistryRepository};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Per-run memoizing decorator around a `RegistryRepository`.
///
/// One instance is owned by a single analysis run and dropped with it, so
/// cache lifetime is explicit: no cross-run reuse, no hidden module
/// state. Successful lookups are cached and replayed for duplicate
/// requests within the run; failed lookups are NOT cached, so a later
/// duplicate request retries the call instead of replaying the failure.
pub struct CachingRegistryRepository<'a, R: RegistryRepository + ?Sized> {
    inner: &'a R,
    latest_cache: DashMap<String, Option<String>>,
    metadata_cache: DashMap<String, RegistryMetadata>,
}

impl<'a, R: RegistryRepository + ?Sized> CachingRegistryRepository<'a, R> {
    pub fn new(inner: &'a R) -> Self {
        Self {
            inner,
            latest_cache: DashMap::new(),
            metadata_cache: DashMap::new(),
        }
    }

    #[cfg(test)]
    fn cached_entries(&self) -> (usize, usize) {
        (self.latest_cache.len(), self.metadata_cache.len())
    }
}

#[async_trait]
impl<'a, R: RegistryRepository + ?Sized> RegistryRepository for CachingRegistryRepository<'a, R> {
    async fn latest_version(&self, package_name: &str) -> Result<Option<String>> {
        if let Some(cached) = self.latest_cache.get(package_name) {
            return Ok(cached.clone());
        }

        // Errors propagate uncached so duplicates within the run retry.
        let latest = self.inner.latest_version(package_name).await?;
        self.latest_cache
            .insert(package_name.to_string(), latest.clone());

        Ok(latest)
    }

    async fn package_metadata(&self, package_name: &str) -> Result<RegistryMetadata> {
        if let Some(cached) = self.metadata_cache.get(package_name) {
            return Ok(cached.clone());
        }

        let metadata = self.inner.package_metadata(package_name).await?;
        self.metadata_cache
            .insert(package_name.to_string(), metadata.clone());

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Inner repository that counts calls and can fail its first call.
    struct CountingRegistry {
        latest_calls: AtomicUsize,
        metadata_calls: AtomicUsize,
        fail_next_latest: AtomicBool,
    }

    impl CountingRegistry {
        fn new() -> Self {
            Self {
                latest_calls: AtomicUsize::new(0),
                metadata_calls: AtomicUsize::new(0),
                fail_next_latest: AtomicBool::new(false),
            }
        }

        fn failing_once() -> Self {
            let registry = Self::new();
            registry.fail_next_latest.store(true, Ordering::SeqCst);
            registry
        }
    }

    #[async_trait]
    impl RegistryRepository for CountingRegistry {
        async fn latest_version(&self, package_name: &str) -> Result<Option<String>> {
            self.latest_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_next_latest.swap(false, Ordering::SeqCst) {
                anyhow::bail!("registry unavailable");
            }
            Ok(Some(format!("{}-latest", package_name)))
        }

        async fn package_metadata(&self, _package_name: &str) -> Result<RegistryMetadata> {
            self.metadata_calls.fetch_add(1, Ordering::SeqCst);
            Ok(RegistryMetadata::default())
        }
    }

    #[tokio::test]
    async fn test_successful_lookup_is_cached() {
        let inner = CountingRegistry::new();
        let cache = CachingRegistryRepository::new(&inner);

        let first = cache.latest_version("axios").await.unwrap();
        let second = cache.latest_version("axios").await.unwrap();

        assert_eq!(first.as_deref(), Some("axios-latest"));
        assert_eq!(first, second);
        assert_eq!(inner.latest_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_retried() {
        let inner = CountingRegistry::failing_once();
        let cache = CachingRegistryRepository::new(&inner);

        assert!(cache.latest_version("axios").await.is_err());
        assert_eq!(cache.cached_entries().0, 0);

        // The failure was not cached: the second call reaches the inner
        // repository and succeeds.
        let retried = cache.latest_version("axios").await.unwrap();
        assert_eq!(retried.as_deref(), Some("axios-latest"));
        assert_eq!(inner.latest_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_distinct_packages_cached_separately() {
        let inner = CountingRegistry::new();
        let cache = CachingRegistryRepository::new(&inner);

        cache.latest_version("react").await.unwrap();
        cache.latest_version("lodash").await.unwrap();
        cache.package_metadata("react").await.unwrap();

        assert_eq!(inner.latest_calls.load(Ordering::SeqCst), 2);
        assert_eq!(inner.metadata_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached_entries(), (2, 1));
    }

    #[tokio::test]
    async fn test_metadata_cache_is_independent_of_latest_cache() {
        let inner = CountingRegistry::new();
        let cache = CachingRegistryRepository::new(&inner);

        cache.package_metadata("react").await.unwrap();
        cache.package_metadata("react").await.unwrap();
        assert_eq!(inner.metadata_calls.load(Ordering::SeqCst), 1);
        assert_eq!(inner.latest_calls.load(Ordering::SeqCst), 0);
    }
}
