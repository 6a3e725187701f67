use crate::ports::outbound::RegistryRepository;
use crate::risk_analysis::domain::{
    calculate_version_gap, classify_dependency, extract_direct_dependencies, AnalysisDetail,
    AnalysisMetadata, AnalysisReport, DependencyAnalysis, DependencyRecord, DirectDependencies,
    ExecutiveSummary, LockfileSnapshot, MaintenanceInfo, ManifestFallback, VersionGapReport,
    VersionParseStatus,
};
use crate::risk_analysis::policies::ScoringPolicy;
use crate::risk_analysis::services::{
    ActionRecommender, EnrichedDependency, MetadataEnricher, RiskScorer,
};
use chrono::{DateTime, Utc};

/// Numeric controls for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Maximum number of packages processed; candidates beyond the cap
    /// are excluded from the run.
    pub limit: usize,
    /// Maximum entries in the summary's top-priority list.
    pub top_n: usize,
    /// Provenance only; never influences scoring.
    pub repo_commit: Option<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            limit: 15,
            top_n: 10,
            repo_commit: None,
        }
    }
}

/// RiskAnalyzer drives one analysis run end to end: origin resolution,
/// registry enrichment, per-package scoring, and summary assembly.
///
/// Inputs are never mutated; per-package problems (failed lookups,
/// unparseable versions, missing origin data) degrade that package's
/// verdict instead of failing the run.
pub struct RiskAnalyzer {
    policy: ScoringPolicy,
    enricher: MetadataEnricher,
}

impl RiskAnalyzer {
    pub fn new() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            enricher: MetadataEnricher::new(),
        }
    }

    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            enricher: MetadataEnricher::new(),
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Analyzes the snapshot's candidate list against the registry.
    ///
    /// `now` is the run's reference instant for staleness ages and the
    /// report timestamp; injecting it keeps scoring deterministic in
    /// tests.
    pub async fn analyze<R>(
        &self,
        snapshot: &LockfileSnapshot,
        manifest_fallback: Option<&ManifestFallback>,
        registry: &R,
        options: &AnalysisOptions,
        now: DateTime<Utc>,
    ) -> AnalysisReport
    where
        R: RegistryRepository + ?Sized,
    {
        let direct = extract_direct_dependencies(snapshot, manifest_fallback);

        let enriched = self
            .enricher
            .enrich(snapshot.candidates(), options.limit, registry)
            .await;

        let dependencies: Vec<DependencyAnalysis> = enriched
            .into_iter()
            .map(|entry| self.analyze_one(entry, &direct, now))
            .collect();

        let executive_summary = ExecutiveSummary::build(&dependencies, options.top_n);

        AnalysisReport {
            executive_summary,
            dependencies,
            metadata: AnalysisMetadata::generate(options.repo_commit.clone(), now),
        }
    }

    fn analyze_one(
        &self,
        enriched: EnrichedDependency,
        direct: &DirectDependencies,
        now: DateTime<Utc>,
    ) -> DependencyAnalysis {
        let current_version = enriched.package.version.trim().to_string();
        let latest_version = enriched
            .latest_version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        // An unknown latest version is not diffable; the uncertainty
        // flows into the non-semver tag and the manual-review action.
        let gap_report = match latest_version.as_deref() {
            Some(latest) => calculate_version_gap(&current_version, latest),
            None => VersionGapReport::unmeasurable(VersionParseStatus::NonSemver),
        };
        let (version_gap, version_parse_status) = AnalysisDetail::gap_fields(&gap_report);

        let is_outdated = latest_version
            .as_deref()
            .map_or(false, |latest| latest != current_version);

        let detail = AnalysisDetail {
            version_gap,
            version_parse_status,
            is_deprecated: enriched.metadata.deprecated.is_some(),
            deprecation_message: enriched.metadata.deprecated.clone(),
            vulnerabilities: None,
            origin: classify_dependency(&enriched.package.name, direct),
            maintenance: MaintenanceInfo::from_registry(&enriched.metadata, now),
        };

        let assessment = RiskScorer::compute(&detail, &self.policy);
        let recommended_action = ActionRecommender::recommend(&detail, &self.policy);

        DependencyAnalysis {
            record: DependencyRecord {
                package_name: enriched.package.name,
                current_version,
                latest_version,
                is_outdated,
            },
            risk_score: assessment.score,
            risk_level: assessment.level,
            tags: assessment.tags,
            recommended_action,
            analysis: detail,
            score_breakdown: assessment.breakdown,
        }
    }
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
