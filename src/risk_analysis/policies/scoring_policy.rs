use crate::risk_analysis::domain::risk::RiskLevel;

/// Calibration constants for risk scoring.
///
/// Every number here is policy, not structure: the four per-dimension
/// caps sum to the 110-point ceiling, and the level cutoffs partition
/// that range, but the exact values are expected to be re-tuned as real
/// project data accumulates. Tests read them from the policy instead of
/// hard-coding copies.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    /// Reserved headroom for a future vulnerability feed; the dimension
    /// currently always contributes 0.
    pub security_cap: u32,

    /// Major-level gap: base penalty plus a step per additional major.
    pub major_gap_base: u32,
    pub major_gap_step: u32,
    pub major_gap_cap: u32,

    /// Minor-level gap band.
    pub minor_gap_base: u32,
    pub minor_gap_step: u32,
    pub minor_gap_cap: u32,

    /// Patch-level gap band.
    pub patch_gap_base: u32,
    pub patch_gap_step: u32,
    pub patch_gap_cap: u32,

    /// Flat penalty for a registry-deprecated package.
    pub deprecated_penalty: u32,

    /// Months since last publish before staleness starts to cost.
    pub staleness_threshold_months: u32,
    /// Penalty per month past the threshold.
    pub staleness_step: u32,
    pub maintenance_cap: u32,
    /// A package without any publish date gets this instead of 0:
    /// absence of data is itself a maintenance signal.
    pub unknown_publish_penalty: u32,

    /// Weekly download floor below which a package counts as low-activity.
    pub low_activity_downloads: u64,

    /// Major-version distance from which an update stops being a plain
    /// major bump and becomes a planned migration.
    pub large_jump_majors: u64,

    /// Score cutoffs partitioning [0, 110] into the four levels.
    pub critical_cutoff: u32,
    pub high_cutoff: u32,
    pub medium_cutoff: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            security_cap: 30,

            major_gap_base: 20,
            major_gap_step: 5,
            major_gap_cap: 30,

            minor_gap_base: 8,
            minor_gap_step: 2,
            minor_gap_cap: 15,

            patch_gap_base: 3,
            patch_gap_step: 1,
            patch_gap_cap: 8,

            deprecated_penalty: 25,

            staleness_threshold_months: 12,
            staleness_step: 2,
            maintenance_cap: 25,
            unknown_publish_penalty: 10,

            low_activity_downloads: 1_000,

            large_jump_majors: 2,

            critical_cutoff: 70,
            high_cutoff: 45,
            medium_cutoff: 20,
        }
    }
}

impl ScoringPolicy {
    /// Ceiling of the additive score: the sum of the four dimension caps.
    pub fn max_score(&self) -> u32 {
        self.security_cap + self.major_gap_cap + self.deprecated_penalty + self.maintenance_cap
    }

    /// Maps a numeric score onto the four ordered levels.
    pub fn level_for(&self, score: u32) -> RiskLevel {
        if score >= self.critical_cutoff {
            RiskLevel::Critical
        } else if score >= self.high_cutoff {
            RiskLevel::High
        } else if score >= self.medium_cutoff {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps_sum_to_documented_ceiling() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.max_score(), 110);
    }

    #[test]
    fn test_level_cutoffs_partition_the_range() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.level_for(0), RiskLevel::Low);
        assert_eq!(policy.level_for(policy.medium_cutoff - 1), RiskLevel::Low);
        assert_eq!(policy.level_for(policy.medium_cutoff), RiskLevel::Medium);
        assert_eq!(policy.level_for(policy.high_cutoff), RiskLevel::High);
        assert_eq!(policy.level_for(policy.critical_cutoff), RiskLevel::Critical);
        assert_eq!(policy.level_for(policy.max_score()), RiskLevel::Critical);
    }

    #[test]
    fn test_cutoffs_are_ordered() {
        let policy = ScoringPolicy::default();
        assert!(policy.medium_cutoff < policy.high_cutoff);
        assert!(policy.high_cutoff < policy.critical_cutoff);
        assert!(policy.critical_cutoff <= policy.max_score());
    }
}
