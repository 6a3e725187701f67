use deprisk::prelude::*;
use std::path::Path;

/// Mock LockfileReader serving in-memory content
pub struct MockLockfileReader {
    content: Option<String>,
}

impl MockLockfileReader {
    pub fn new(content: String) -> Self {
        Self {
            content: Some(content),
        }
    }

    pub fn with_failure() -> Self {
        Self { content: None }
    }
}

impl LockfileReader for MockLockfileReader {
    fn read_lockfile(&self, _project_path: &Path) -> Result<String> {
        match &self.content {
            Some(content) => Ok(content.clone()),
            None => anyhow::bail!("Mock lockfile read failure"),
        }
    }
}
