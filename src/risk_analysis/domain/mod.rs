/// Domain model for dependency risk analysis
pub mod action;
pub mod dependency;
pub mod lockfile;
pub mod metadata;
pub mod origin;
pub mod risk;
pub mod summary;
pub mod version;

pub use action::{ActionType, RecommendedAction};
pub use dependency::{
    AnalysisDetail, AnalysisReport, DependencyAnalysis, DependencyRecord, MaintenanceInfo,
    VulnerabilityTotals,
};
pub use lockfile::{LockedPackage, LockfileSnapshot, ManifestFallback};
pub use metadata::AnalysisMetadata;
pub use origin::{
    classify_dependency, extract_direct_dependencies, DirectDependencies, Directness,
    OriginClassification, Usage,
};
pub use risk::{RiskLevel, RiskScoreBreakdown, Tag};
pub use summary::{ExecutiveSummary, RiskDistribution, SummaryStats};
pub use version::{
    calculate_version_gap, detect_version_type, GapLevel, VersionGap, VersionGapReport,
    VersionParseStatus,
};
