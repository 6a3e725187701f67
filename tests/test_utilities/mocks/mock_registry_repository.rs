use async_trait::async_trait;
use deprisk::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock RegistryRepository with configurable fixtures, failure
/// injection, and call counting
pub struct MockRegistryRepository {
    latest: HashMap<String, String>,
    metadata: HashMap<String, RegistryMetadata>,
    failing: HashSet<String>,
    latest_calls: Arc<AtomicUsize>,
    metadata_calls: Arc<AtomicUsize>,
}

impl MockRegistryRepository {
    pub fn new() -> Self {
        Self {
            latest: HashMap::new(),
            metadata: HashMap::new(),
            failing: HashSet::new(),
            latest_calls: Arc::new(AtomicUsize::new(0)),
            metadata_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_latest(mut self, package: &str, version: &str) -> Self {
        self.latest.insert(package.to_string(), version.to_string());
        self
    }

    pub fn with_metadata(mut self, package: &str, metadata: RegistryMetadata) -> Self {
        self.metadata.insert(package.to_string(), metadata);
        self
    }

    /// Every lookup for this package rejects.
    pub fn with_failure_for(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    /// Call-count handles that survive moving the mock into a use case.
    pub fn call_counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (self.latest_calls.clone(), self.metadata_calls.clone())
    }
}

impl Default for MockRegistryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryRepository for MockRegistryRepository {
    async fn latest_version(&self, package_name: &str) -> Result<Option<String>> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(package_name) {
            anyhow::bail!("Mock registry failure for {}", package_name);
        }
        Ok(self.latest.get(package_name).cloned())
    }

    async fn package_metadata(&self, package_name: &str) -> Result<RegistryMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(package_name) {
            anyhow::bail!("Mock registry failure for {}", package_name);
        }
        Ok(self.metadata.get(package_name).cloned().unwrap_or_default())
    }
}
