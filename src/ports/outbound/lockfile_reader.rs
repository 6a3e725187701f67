use crate::shared::Result;
use std::path::Path;

/// LockfileReader port for reading lockfile contents
///
/// This port abstracts the file system operations needed to read
/// the package-lock.json file from a project directory.
pub trait LockfileReader {
    /// Reads the package-lock.json file from the specified project directory
    ///
    /// # Arguments
    /// * `project_path` - Path to the project directory containing package-lock.json
    ///
    /// # Returns
    /// The raw content of the lockfile as a string
    ///
    /// # Errors
    /// Returns an error if:
    /// - The package-lock.json file does not exist
    /// - The file cannot be read due to permissions or I/O errors
    fn read_lockfile(&self, project_path: &Path) -> Result<String>;
}
