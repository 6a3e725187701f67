use crate::risk_analysis::domain::{
    AnalysisDetail, Directness, GapLevel, RiskLevel, RiskScoreBreakdown, Tag, Usage,
    VersionParseStatus,
};
use crate::risk_analysis::policies::ScoringPolicy;
use std::collections::BTreeSet;

/// The scorer's verdict: total, level, per-dimension composition, and
/// the categorization tag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: u32,
    pub level: RiskLevel,
    pub breakdown: RiskScoreBreakdown,
    pub tags: BTreeSet<Tag>,
}

/// RiskScorer combines version gap, deprecation, and maintenance
/// staleness into a weighted additive score.
///
/// Pure domain logic: no I/O, works only on an assembled
/// `AnalysisDetail` plus the tunable `ScoringPolicy`.
pub struct RiskScorer;

impl RiskScorer {
    pub fn compute(detail: &AnalysisDetail, policy: &ScoringPolicy) -> RiskAssessment {
        let breakdown = RiskScoreBreakdown {
            // No vulnerability feed is wired up; the dimension is reserved.
            security: 0,
            version_gap: Self::version_gap_score(detail, policy),
            deprecated: if detail.is_deprecated {
                policy.deprecated_penalty
            } else {
                0
            },
            maintenance: Self::maintenance_score(detail, policy),
        };

        let score = breakdown.total();

        RiskAssessment {
            score,
            level: policy.level_for(score),
            breakdown,
            tags: Self::tags_for(detail, policy),
        }
    }

    /// Penalty for lagging behind the latest version. The level that
    /// differs picks the band; the numeric gap scales within it, capped.
    fn version_gap_score(detail: &AnalysisDetail, policy: &ScoringPolicy) -> u32 {
        if detail.version_parse_status != VersionParseStatus::Ok {
            return 0;
        }

        let magnitude = detail.version_gap.magnitude();
        match detail.version_gap.dominant_level() {
            Some(GapLevel::Major) => Self::band_score(
                policy.major_gap_base,
                policy.major_gap_step,
                policy.major_gap_cap,
                magnitude,
            ),
            Some(GapLevel::Minor) => Self::band_score(
                policy.minor_gap_base,
                policy.minor_gap_step,
                policy.minor_gap_cap,
                magnitude,
            ),
            Some(GapLevel::Patch) => Self::band_score(
                policy.patch_gap_base,
                policy.patch_gap_step,
                policy.patch_gap_cap,
                magnitude,
            ),
            None => 0,
        }
    }

    fn band_score(base: u32, step: u32, cap: u32, magnitude: u64) -> u32 {
        let extra = magnitude.saturating_sub(1).min(u64::from(u32::MAX)) as u32;
        base.saturating_add(step.saturating_mul(extra)).min(cap)
    }

    /// Staleness penalty. Unlike origin classification, missing data is
    /// scored here: an unknown publish date costs a fixed moderate amount.
    fn maintenance_score(detail: &AnalysisDetail, policy: &ScoringPolicy) -> u32 {
        match detail.maintenance.age_in_months {
            None => policy.unknown_publish_penalty.min(policy.maintenance_cap),
            Some(age) if age > policy.staleness_threshold_months => policy
                .staleness_step
                .saturating_mul(age - policy.staleness_threshold_months)
                .min(policy.maintenance_cap),
            Some(_) => 0,
        }
    }

    fn tags_for(detail: &AnalysisDetail, policy: &ScoringPolicy) -> BTreeSet<Tag> {
        let mut tags = BTreeSet::new();

        if detail.vulnerabilities.map_or(false, |v| v.total > 0) {
            tags.insert(Tag::Security);
        }

        if detail.version_parse_status == VersionParseStatus::Ok {
            match detail.version_gap.dominant_level() {
                Some(GapLevel::Major) => {
                    tags.insert(Tag::BreakingChange);
                }
                Some(GapLevel::Minor) | Some(GapLevel::Patch) => {
                    tags.insert(Tag::MinorUpdate);
                }
                None => {
                    tags.insert(Tag::UpToDate);
                }
            }
        }

        if detail.version_parse_status == VersionParseStatus::NonSemver {
            tags.insert(Tag::NonSemver);
        }

        let stale = detail
            .maintenance
            .age_in_months
            .map_or(false, |age| age > policy.staleness_threshold_months);
        if detail.is_deprecated || stale {
            tags.insert(Tag::EolUnmaintained);
        }

        if detail.origin.usage == Usage::Runtime {
            tags.insert(Tag::Runtime);
        }
        if detail.origin.directness == Directness::Transitive {
            tags.insert(Tag::Transitive);
        }

        // Low activity needs a maintenance signal to exist at all;
        // unknown downloads then count as low, not as missing.
        if detail.maintenance.has_signal()
            && detail
                .maintenance
                .weekly_downloads
                .map_or(true, |downloads| downloads < policy.low_activity_downloads)
        {
            tags.insert(Tag::LowActivity);
        }

        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk_analysis::domain::{MaintenanceInfo, OriginClassification, VersionGap};
    use chrono::{TimeZone, Utc};

    fn detail() -> AnalysisDetail {
        AnalysisDetail {
            version_gap: VersionGap::default(),
            version_parse_status: VersionParseStatus::Ok,
            is_deprecated: false,
            deprecation_message: None,
            vulnerabilities: None,
            origin: OriginClassification::unknown(),
            maintenance: MaintenanceInfo::default(),
        }
    }

    fn with_publish_age(months: u32) -> MaintenanceInfo {
        MaintenanceInfo {
            last_publish: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            age_in_months: Some(months),
            weekly_downloads: None,
        }
    }

    #[test]
    fn test_breakdown_sums_to_score() {
        let policy = ScoringPolicy::default();
        let mut d = detail();
        d.version_gap = VersionGap {
            major: 3,
            minor: 0,
            patch: 0,
        };
        d.is_deprecated = true;
        d.maintenance = with_publish_age(30);

        let assessment = RiskScorer::compute(&d, &policy);
        assert_eq!(assessment.score, assessment.breakdown.total());
        assert!(assessment.score <= policy.max_score());
    }

    #[test]
    fn test_security_dimension_is_stubbed_to_zero() {
        let policy = ScoringPolicy::default();
        let assessment = RiskScorer::compute(&detail(), &policy);
        assert_eq!(assessment.breakdown.security, 0);
    }

    #[test]
    fn test_major_gap_scores_higher_than_minor() {
        let policy = ScoringPolicy::default();

        let mut major = detail();
        major.version_gap = VersionGap {
            major: 1,
            minor: 0,
            patch: 0,
        };
        let mut minor = detail();
        minor.version_gap = VersionGap {
            major: 0,
            minor: 1,
            patch: 0,
        };

        let major_score = RiskScorer::compute(&major, &policy).breakdown.version_gap;
        let minor_score = RiskScorer::compute(&minor, &policy).breakdown.version_gap;
        assert!(major_score > minor_score);
        assert_eq!(major_score, policy.major_gap_base);
        assert_eq!(minor_score, policy.minor_gap_base);
    }

    #[test]
    fn test_gap_magnitude_scales_within_band_and_caps() {
        let policy = ScoringPolicy::default();

        let mut d = detail();
        d.version_gap = VersionGap {
            major: 2,
            minor: 0,
            patch: 0,
        };
        let two = RiskScorer::compute(&d, &policy).breakdown.version_gap;
        assert_eq!(two, policy.major_gap_base + policy.major_gap_step);

        d.version_gap.major = 100;
        let capped = RiskScorer::compute(&d, &policy).breakdown.version_gap;
        assert_eq!(capped, policy.major_gap_cap);
    }

    #[test]
    fn test_range_status_contributes_no_gap_score() {
        let policy = ScoringPolicy::default();
        let mut d = detail();
        d.version_parse_status = VersionParseStatus::Range;

        let assessment = RiskScorer::compute(&d, &policy);
        assert_eq!(assessment.breakdown.version_gap, 0);
    }

    #[test]
    fn test_deprecated_penalty() {
        let policy = ScoringPolicy::default();
        let mut d = detail();
        d.is_deprecated = true;

        let assessment = RiskScorer::compute(&d, &policy);
        assert_eq!(assessment.breakdown.deprecated, policy.deprecated_penalty);
        assert!(assessment.tags.contains(&Tag::EolUnmaintained));
    }

    #[test]
    fn test_staleness_penalty_grows_and_caps() {
        let policy = ScoringPolicy::default();

        let mut d = detail();
        d.maintenance = with_publish_age(policy.staleness_threshold_months + 3);
        let mild = RiskScorer::compute(&d, &policy).breakdown.maintenance;
        assert_eq!(mild, policy.staleness_step * 3);

        d.maintenance = with_publish_age(600);
        let capped = RiskScorer::compute(&d, &policy).breakdown.maintenance;
        assert_eq!(capped, policy.maintenance_cap);
    }

    #[test]
    fn test_fresh_publish_scores_zero_maintenance() {
        let policy = ScoringPolicy::default();
        let mut d = detail();
        d.maintenance = with_publish_age(2);

        let assessment = RiskScorer::compute(&d, &policy);
        assert_eq!(assessment.breakdown.maintenance, 0);
    }

    #[test]
    fn test_unknown_publish_date_scores_moderate_penalty() {
        let policy = ScoringPolicy::default();
        let assessment = RiskScorer::compute(&detail(), &policy);
        assert_eq!(
            assessment.breakdown.maintenance,
            policy.unknown_publish_penalty
        );
    }

    #[test]
    fn test_tags_breaking_change() {
        let policy = ScoringPolicy::default();
        let mut d = detail();
        d.version_gap = VersionGap {
            major: 1,
            minor: 0,
            patch: 0,
        };

        let tags = RiskScorer::compute(&d, &policy).tags;
        assert!(tags.contains(&Tag::BreakingChange));
        assert!(!tags.contains(&Tag::MinorUpdate));
        assert!(!tags.contains(&Tag::UpToDate));
    }

    #[test]
    fn test_tags_up_to_date() {
        let policy = ScoringPolicy::default();
        let tags = RiskScorer::compute(&detail(), &policy).tags;
        assert!(tags.contains(&Tag::UpToDate));
    }

    #[test]
    fn test_tags_non_semver() {
        let policy = ScoringPolicy::default();
        let mut d = detail();
        d.version_parse_status = VersionParseStatus::NonSemver;

        let tags = RiskScorer::compute(&d, &policy).tags;
        assert!(tags.contains(&Tag::NonSemver));
        assert!(!tags.contains(&Tag::UpToDate));
    }

    #[test]
    fn test_tags_runtime_and_transitive() {
        let policy = ScoringPolicy::default();

        let mut d = detail();
        d.origin = OriginClassification {
            directness: Directness::Direct,
            usage: Usage::Runtime,
        };
        assert!(RiskScorer::compute(&d, &policy)
            .tags
            .contains(&Tag::Runtime));

        d.origin = OriginClassification {
            directness: Directness::Transitive,
            usage: Usage::Unknown,
        };
        assert!(RiskScorer::compute(&d, &policy)
            .tags
            .contains(&Tag::Transitive));
    }

    #[test]
    fn test_low_activity_requires_maintenance_signal() {
        let policy = ScoringPolicy::default();

        // No signal at all: no tag
        let tags = RiskScorer::compute(&detail(), &policy).tags;
        assert!(!tags.contains(&Tag::LowActivity));

        // Signal with unknown downloads: tagged
        let mut d = detail();
        d.maintenance = with_publish_age(1);
        assert!(RiskScorer::compute(&d, &policy)
            .tags
            .contains(&Tag::LowActivity));

        // Signal with healthy downloads: not tagged
        d.maintenance.weekly_downloads = Some(policy.low_activity_downloads * 10);
        assert!(!RiskScorer::compute(&d, &policy)
            .tags
            .contains(&Tag::LowActivity));
    }

    #[test]
    fn test_level_follows_policy_cutoffs() {
        let policy = ScoringPolicy::default();
        let mut d = detail();
        d.version_gap = VersionGap {
            major: 3,
            minor: 0,
            patch: 0,
        };
        d.is_deprecated = true;
        d.maintenance = with_publish_age(60);

        let assessment = RiskScorer::compute(&d, &policy);
        assert_eq!(assessment.level, policy.level_for(assessment.score));
        assert_eq!(assessment.level, RiskLevel::Critical);
    }
}
