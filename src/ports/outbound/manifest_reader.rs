use crate::shared::Result;
use std::path::Path;

/// ManifestReader port for reading the project manifest
///
/// The manifest (package.json) is only a fallback source of direct
/// dependency declarations, so a missing file is `Ok(None)`, not an error.
pub trait ManifestReader {
    /// Reads package.json from the project directory when it exists.
    ///
    /// # Errors
    /// Returns an error only for a manifest that exists but cannot be read.
    fn read_manifest(&self, project_path: &Path) -> Result<Option<String>>;
}
