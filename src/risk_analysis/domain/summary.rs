use crate::risk_analysis::domain::dependency::DependencyAnalysis;
use crate::risk_analysis::domain::risk::{RiskLevel, Tag};
use crate::risk_analysis::domain::version::VersionParseStatus;
use serde::Serialize;

/// Count of analyses per risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskDistribution {
    fn tally(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Critical => self.critical += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::Low => self.low += 1,
        }
    }
}

/// Headline totals over the analyzed dependency set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total: usize,
    /// Stays 0 until a vulnerability feed is integrated.
    pub with_vulnerabilities: usize,
    pub deprecated: usize,
    /// Minor/patch-only gaps: updatable without breaking-change review.
    pub safe_updates: usize,
    pub up_to_date: usize,
    pub non_semver: usize,
}

/// Aggregate rollup over all analyses, built once at the end of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub risk_distribution: RiskDistribution,
    pub stats: SummaryStats,
    pub top_priority: Vec<DependencyAnalysis>,
}

impl ExecutiveSummary {
    /// Aggregates the per-package analyses.
    ///
    /// `top_priority` is ordered by descending risk score with ties broken
    /// by ascending package name, then truncated to `top_n`.
    pub fn build(analyses: &[DependencyAnalysis], top_n: usize) -> Self {
        let mut risk_distribution = RiskDistribution::default();
        let mut stats = SummaryStats {
            total: analyses.len(),
            ..SummaryStats::default()
        };

        for analysis in analyses {
            risk_distribution.tally(analysis.risk_level);

            if analysis.analysis.is_deprecated {
                stats.deprecated += 1;
            }
            if analysis.tags.contains(&Tag::MinorUpdate) {
                stats.safe_updates += 1;
            }
            if analysis.tags.contains(&Tag::UpToDate) {
                stats.up_to_date += 1;
            }
            if analysis.analysis.version_parse_status == VersionParseStatus::NonSemver {
                stats.non_semver += 1;
            }
        }

        let mut ranked: Vec<DependencyAnalysis> = analyses.to_vec();
        ranked.sort_by(|a, b| {
            b.risk_score
                .cmp(&a.risk_score)
                .then_with(|| a.package_name().cmp(b.package_name()))
        });
        ranked.truncate(top_n);

        Self {
            risk_distribution,
            stats,
            top_priority: ranked,
        }
    }

}
