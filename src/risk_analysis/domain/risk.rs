use serde::Serialize;

/// Categorical urgency of a dependency, derived from the numeric score
/// through the cutoffs in `ScoringPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Critical => "critical",
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Non-exclusive categorization tags attached to an analysis.
///
/// A closed enum keeps the tagging rules in the scorer exhaustive and
/// statically checkable; the wire form is the kebab-case string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    /// Reserved for a future vulnerability feed.
    Security,
    BreakingChange,
    MinorUpdate,
    UpToDate,
    NonSemver,
    EolUnmaintained,
    Runtime,
    Transitive,
    LowActivity,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Security => "security",
            Tag::BreakingChange => "breaking-change",
            Tag::MinorUpdate => "minor-update",
            Tag::UpToDate => "up-to-date",
            Tag::NonSemver => "non-semver",
            Tag::EolUnmaintained => "eol-unmaintained",
            Tag::Runtime => "runtime",
            Tag::Transitive => "transitive",
            Tag::LowActivity => "low-activity",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-dimension composition of a risk score. Components are already
/// clamped to their caps and sum exactly to the reported total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreBreakdown {
    pub security: u32,
    pub version_gap: u32,
    pub deprecated: u32,
    pub maintenance: u32,
}

impl RiskScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.security + self.version_gap + self.deprecated + self.maintenance
    }
}
