use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::ports::outbound::{
    LockfileReader, ManifestReader, ProgressReporter, RegistryRepository,
};
use crate::risk_analysis::domain::{LockfileSnapshot, ManifestFallback};
use crate::risk_analysis::services::{CachingRegistryRepository, RiskAnalyzer};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use chrono::Utc;


/// AnalyzeDependenciesUseCase - Core use case for dependency risk analysis
///
/// Orchestrates one analysis run using generic dependency injection for
/// all infrastructure dependencies: read the lockfile, decode a
/// snapshot, build the per-run registry cache, and hand the run to the
/// analyzer.
///
/// # Type Parameters
/// * `LR` - LockfileReader implementation
/// * `MR` - ManifestReader implementation
/// * `RR` - RegistryRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeDependenciesUseCase<LR, MR, RR, PR> {
    lockfile_reader: LR,
    manifest_reader: MR,
    registry_repository: RR,
    progress_reporter: PR,
    analyzer: RiskAnalyzer,
}

impl<LR, MR, RR, PR> AnalyzeDependenciesUseCase<LR, MR, RR, PR>
where
    LR: LockfileReader,
    MR: ManifestReader,
    RR: RegistryRepository,
    PR: ProgressReporter,
{
    /// Creates a new use case with injected dependencies
    pub fn new(
        lockfile_reader: LR,
        manifest_reader: MR,
        registry_repository: RR,
        progress_reporter: PR,
    ) -> Self {
        Self {
            lockfile_reader,
            manifest_reader,
            registry_repository,
            progress_reporter,
            analyzer: RiskAnalyzer::new(),
        }
    }

    /// Executes the analysis use case
    ///
    /// # Errors
    /// Only top-level problems fail the call: an unreadable lockfile or
    /// one whose content is not a JSON object. Per-package problems
    /// degrade that package's verdict inside the report.
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let snapshot = self.read_snapshot(&request)?;
        let manifest_fallback = self.read_manifest_fallback(&request);

        self.progress_reporter
            .report("🔍 Fetching registry metadata...");

        // The cache lives exactly as long as this run; duplicates within
        // the run hit it, the next run starts cold.
        let run_cache = CachingRegistryRepository::new(&self.registry_repository);
        let report = self
            .analyzer
            .analyze(
                &snapshot,
                manifest_fallback.as_ref(),
                &run_cache,
                &request.options,
                Utc::now(),
            )
            .await;

        let summary = &report.executive_summary;
        self.progress_reporter.report_completion(&format!(
            "✅ Analysis complete: {} package(s) - {} critical, {} high, {} medium, {} low",
            summary.stats.total,
            summary.risk_distribution.critical,
            summary.risk_distribution.high,
            summary.risk_distribution.medium,
            summary.risk_distribution.low,
        ));

        Ok(AnalysisResponse::new(report))
    }

    fn read_snapshot(&self, request: &AnalysisRequest) -> Result<LockfileSnapshot> {
        self.progress_reporter.report(&format!(
            "📖 Loading package-lock.json from: {}",
            request.project_path.display()
        ));

        let raw = self.lockfile_reader.read_lockfile(&request.project_path)?;

        let json: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| AnalysisError::LockfileParseError {
                path: request.project_path.join("package-lock.json"),
                details: e.to_string(),
            })?;

        let snapshot = LockfileSnapshot::from_json(&json)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} locked package(s)",
            snapshot.candidates().len()
        ));

        Ok(snapshot)
    }

    /// The manifest is a fallback source only; unreadable or malformed
    /// content degrades to "no fallback" with a warning instead of
    /// failing the run.
    fn read_manifest_fallback(&self, request: &AnalysisRequest) -> Option<ManifestFallback> {
        let content = match self.manifest_reader.read_manifest(&request.project_path) {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                self.progress_reporter
                    .report_error(&format!("⚠️  Warning: could not read package.json: {}", e));
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: package.json is not valid JSON and was ignored: {}",
                    e
                ));
                None
            }
        }
    }
}
