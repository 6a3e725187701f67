/// Mock implementations for testing
mod mock_lockfile_reader;
mod mock_manifest_reader;
mod mock_progress_reporter;
mod mock_registry_repository;

pub use mock_lockfile_reader::MockLockfileReader;
pub use mock_manifest_reader::MockManifestReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_registry_repository::MockRegistryRepository;
