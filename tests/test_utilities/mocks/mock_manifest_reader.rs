use deprisk::prelude::*;
use std::path::Path;

/// Mock ManifestReader serving optional in-memory content
pub struct MockManifestReader {
    content: Option<String>,
}

impl MockManifestReader {
    pub fn new(content: String) -> Self {
        Self {
            content: Some(content),
        }
    }

    pub fn absent() -> Self {
        Self { content: None }
    }
}

impl ManifestReader for MockManifestReader {
    fn read_manifest(&self, _project_path: &Path) -> Result<Option<String>> {
        Ok(self.content.clone())
    }
}
