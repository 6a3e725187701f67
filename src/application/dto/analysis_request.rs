use crate::risk_analysis::services::AnalysisOptions;
use std::path::PathBuf;

/// AnalysisRequest - Internal request DTO for the analysis use case
///
/// This DTO represents the internal request structure used within the
/// application layer; the CLI maps its arguments onto it.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Path to the project directory containing package-lock.json
    pub project_path: PathBuf,
    /// Numeric controls and provenance for the run
    pub options: AnalysisOptions,
}

impl AnalysisRequest {
    pub fn new(project_path: PathBuf, options: AnalysisOptions) -> Self {
        Self {
            project_path,
            options,
        }
    }
}
