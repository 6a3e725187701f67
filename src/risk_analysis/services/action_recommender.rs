use crate::risk_analysis::domain::{
    ActionType, AnalysisDetail, GapLevel, RecommendedAction, VersionParseStatus,
};
use crate::risk_analysis::policies::ScoringPolicy;

/// ActionRecommender maps a dependency's risk profile to one prioritized
/// remediation action. First match in the decision order wins.
pub struct ActionRecommender;

impl ActionRecommender {
    pub fn recommend(detail: &AnalysisDetail, policy: &ScoringPolicy) -> RecommendedAction {
        // 1. Known security finding. Unreachable until a vulnerability
        //    feed is integrated; kept so the decision order stays whole.
        if detail.vulnerabilities.map_or(false, |v| v.total > 0) {
            return RecommendedAction::new(
                ActionType::UpdateSecurity,
                "Apply the security update immediately",
            );
        }

        // 2. Deprecated upstream.
        if detail.is_deprecated {
            return RecommendedAction::new(
                ActionType::Replace,
                "Package is deprecated upstream; find a maintained replacement",
            );
        }

        if detail.version_parse_status == VersionParseStatus::Ok {
            match detail.version_gap.dominant_level() {
                // 3. Major-level gap: large jumps become planned migrations.
                Some(GapLevel::Major) => {
                    let majors = detail.version_gap.major;
                    if majors >= policy.large_jump_majors {
                        return RecommendedAction::new(
                            ActionType::PlanMigration,
                            format!("Plan a staged migration; {} major versions behind", majors),
                        );
                    }
                    return RecommendedAction::new(
                        ActionType::UpdateMajor,
                        "Update across one major version; review the changelog first",
                    );
                }
                // 4. Minor/patch-only gap.
                Some(GapLevel::Minor) | Some(GapLevel::Patch) => {
                    return RecommendedAction::new(
                        ActionType::UpdateSafe,
                        "Apply the minor/patch update; low risk of breakage",
                    );
                }
                None => {}
            }
        }

        // 5. Unparseable version or nothing known about the package's origin.
        if detail.version_parse_status == VersionParseStatus::NonSemver
            || detail.origin.is_fully_unknown()
        {
            return RecommendedAction::new(
                ActionType::ReviewManual,
                "Automatic comparison unavailable; review this dependency manually",
            );
        }

        // 6. Nothing to do.
        RecommendedAction::new(ActionType::Monitor, "Up to date; keep monitoring")
    }
}
