use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Provenance metadata attached to every analysis report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub generated_at: String,
    pub tool_name: String,
    pub tool_version: String,
    pub run_id: String,
    /// Commit of the analyzed repository, passed through untouched; it
    /// never influences scoring.
    pub repo_commit: Option<String>,
}

impl AnalysisMetadata {
    pub fn generate(repo_commit: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now.to_rfc3339(),
            tool_name: "deprisk".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            run_id: format!("urn:uuid:{}", Uuid::new_v4()),
            repo_commit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_carries_commit_through() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let metadata = AnalysisMetadata::generate(Some("abc123".to_string()), now);

        assert_eq!(metadata.repo_commit.as_deref(), Some("abc123"));
        assert_eq!(metadata.tool_name, "deprisk");
        assert!(metadata.generated_at.starts_with("2025-03-01T09:30:00"));
        assert!(metadata.run_id.starts_with("urn:uuid:"));
    }

    #[test]
    fn test_generate_without_commit() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let metadata = AnalysisMetadata::generate(None, now);
        assert!(metadata.repo_commit.is_none());
    }
}
