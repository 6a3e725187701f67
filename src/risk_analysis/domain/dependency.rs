use crate::ports::outbound::RegistryMetadata;
use crate::risk_analysis::domain::action::RecommendedAction;
use crate::risk_analysis::domain::origin::OriginClassification;
use crate::risk_analysis::domain::risk::{RiskLevel, RiskScoreBreakdown, Tag};
use crate::risk_analysis::domain::summary::ExecutiveSummary;
use crate::risk_analysis::domain::version::{VersionGap, VersionGapReport, VersionParseStatus};
use crate::risk_analysis::domain::AnalysisMetadata;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// One package occurrence: locked version plus what the registry knows
/// about the latest release. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    pub package_name: String,
    pub current_version: String,
    pub latest_version: Option<String>,
    pub is_outdated: bool,
}

/// Vulnerability counts per severity. No feed is wired up in the current
/// scope, so this is always absent; the shape is kept so the reserved
/// security dimension has somewhere to land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityTotals {
    pub critical: u32,
    pub high: u32,
    pub moderate: u32,
    pub low: u32,
    pub total: u32,
}

/// Maintenance signals derived from registry publish timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceInfo {
    #[serde(rename = "lastPublishDate")]
    pub last_publish: Option<DateTime<Utc>>,
    pub age_in_months: Option<u32>,
    pub weekly_downloads: Option<u64>,
}

impl MaintenanceInfo {
    /// Derives maintenance signals from registry metadata relative to the
    /// run's reference instant.
    pub fn from_registry(metadata: &RegistryMetadata, now: DateTime<Utc>) -> Self {
        let last_publish = metadata.last_publish();
        let age_in_months = last_publish.map(|published| {
            let days = (now - published).num_days();
            (days.max(0) / 30) as u32
        });

        Self {
            last_publish,
            age_in_months,
            weekly_downloads: metadata.weekly_downloads,
        }
    }

    /// Whether any maintenance signal exists for this package.
    pub fn has_signal(&self) -> bool {
        self.last_publish.is_some()
    }
}

/// The full risk-relevant profile of one package, assembled before
/// scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetail {
    pub version_gap: VersionGap,
    pub version_parse_status: VersionParseStatus,
    pub is_deprecated: bool,
    pub deprecation_message: Option<String>,
    pub vulnerabilities: Option<VulnerabilityTotals>,
    #[serde(flatten)]
    pub origin: OriginClassification,
    pub maintenance: MaintenanceInfo,
}

impl AnalysisDetail {
    /// Folds a gap report into the detail's flat gap + status fields.
    /// A report without a numeric gap contributes all-zero gap values.
    pub fn gap_fields(report: &VersionGapReport) -> (VersionGap, VersionParseStatus) {
        (report.gap_or_zero(), report.status)
    }
}

/// Final immutable verdict for one package.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysis {
    #[serde(flatten)]
    pub record: DependencyRecord,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub tags: BTreeSet<Tag>,
    pub recommended_action: RecommendedAction,
    pub analysis: AnalysisDetail,
    pub score_breakdown: RiskScoreBreakdown,
}

impl DependencyAnalysis {
    pub fn package_name(&self) -> &str {
        &self.record.package_name
    }
}

/// Everything one analysis run produces: the per-package verdicts, the
/// aggregate summary, and run provenance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub executive_summary: ExecutiveSummary,
    pub dependencies: Vec<DependencyAnalysis>,
    pub metadata: AnalysisMetadata,
}
