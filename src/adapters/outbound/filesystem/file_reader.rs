use crate::ports::outbound::{LockfileReader, ManifestReader};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum file size for security (50 MB); lockfiles of real projects
/// stay far below this.
const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

const LOCKFILE_NAME: &str = "package-lock.json";
const MANIFEST_NAME: &str = "package.json";

/// FileSystemReader adapter for reading project files
///
/// This adapter implements both LockfileReader and ManifestReader ports,
/// providing file system access for package-lock.json and package.json.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Safely read a file:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        let metadata = fs::symlink_metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_type, e))?;

        if metadata.is_symlink() {
            return Err(AnalysisError::SecurityError {
                path: path.to_path_buf(),
                reason: format!("{} is a symbolic link", file_type),
                hint: "Symbolic links are not followed; point at the real file".to_string(),
            }
            .into());
        }

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let file_size = metadata.len();
        if file_size > MAX_FILE_SIZE {
            return Err(AnalysisError::SecurityError {
                path: path.to_path_buf(),
                reason: format!(
                    "{} is too large ({} bytes, limit {} bytes)",
                    file_type, file_size, MAX_FILE_SIZE
                ),
                hint: "Oversized lockfiles are rejected to bound memory use".to_string(),
            }
            .into());
        }

        fs::read_to_string(path).map_err(|e| {
            AnalysisError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileReader for FileSystemReader {
    fn read_lockfile(&self, project_path: &Path) -> Result<String> {
        let lockfile_path = project_path.join(LOCKFILE_NAME);

        if !lockfile_path.exists() {
            return Err(AnalysisError::LockfileNotFound {
                path: lockfile_path,
                suggestion: format!(
                    "Run `npm install` in {} to generate a lockfile",
                    project_path.display()
                ),
            }
            .into());
        }

        self.safe_read_file(&lockfile_path, LOCKFILE_NAME)
    }
}

impl ManifestReader for FileSystemReader {
    fn read_manifest(&self, project_path: &Path) -> Result<Option<String>> {
        let manifest_path = project_path.join(MANIFEST_NAME);

        // The manifest is only a fallback source; absence is not an error.
        if !manifest_path.exists() {
            return Ok(None);
        }

        self.safe_read_file(&manifest_path, MANIFEST_NAME).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_lockfile_success() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "{\"packages\":{}}").unwrap();

        let reader = FileSystemReader::new();
        let content = reader.read_lockfile(dir.path()).unwrap();
        assert_eq!(content, "{\"packages\":{}}");
    }

    #[test]
    fn test_read_lockfile_not_found() {
        let dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_lockfile(dir.path());
        assert!(result.is_err());
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("package-lock.json not found"));
        assert!(message.contains("npm install"));
    }

    #[test]
    fn test_read_manifest_missing_is_none() {
        let dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let manifest = reader.read_manifest(dir.path()).unwrap();
        assert!(manifest.is_none());
    }

    #[test]
    fn test_read_manifest_present() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{\"name\":\"demo\"}").unwrap();

        let reader = FileSystemReader::new();
        let manifest = reader.read_manifest(dir.path()).unwrap();
        assert_eq!(manifest.as_deref(), Some("{\"name\":\"demo\"}"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_lockfile_rejects_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.json");
        fs::write(&real, "{}").unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("package-lock.json")).unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_lockfile(dir.path());
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Security violation"));
    }
}
