use serde::Serialize;

/// Parse status of a version string.
///
/// `Ok` covers anything coercible to a `major.minor.patch` triple,
/// including a leading `v` and a pre-release suffix. `Range` covers range
/// syntax that cannot be diffed against a point version. `NonSemver`
/// covers non-registry resolution schemes and dist-tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionParseStatus {
    Ok,
    Range,
    NonSemver,
}

/// Numeric distance between two versions, reported only at the
/// most-significant level where they differ. At most one field is
/// non-zero: a major bump dominates any minor/patch drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VersionGap {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// The semantic-version level at which a gap exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapLevel {
    Major,
    Minor,
    Patch,
}

impl VersionGap {
    pub fn is_zero(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.patch == 0
    }

    /// The level carrying the gap, or `None` when fully up to date.
    pub fn dominant_level(&self) -> Option<GapLevel> {
        if self.major > 0 {
            Some(GapLevel::Major)
        } else if self.minor > 0 {
            Some(GapLevel::Minor)
        } else if self.patch > 0 {
            Some(GapLevel::Patch)
        } else {
            None
        }
    }

    /// The numeric gap value at the dominant level.
    pub fn magnitude(&self) -> u64 {
        self.major.max(self.minor).max(self.patch)
    }
}

/// Outcome of comparing a current version against a latest version.
///
/// `gap` is `Some` only for `status == Ok`; ranges and unparseable
/// versions carry no numeric gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionGapReport {
    pub status: VersionParseStatus,
    pub gap: Option<VersionGap>,
}

impl VersionGapReport {
    pub fn unmeasurable(status: VersionParseStatus) -> Self {
        Self { status, gap: None }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.status == VersionParseStatus::Ok && self.gap.map_or(false, |g| g.is_zero())
    }

    /// The gap with zeroes substituted when no numeric gap exists.
    pub fn gap_or_zero(&self) -> VersionGap {
        self.gap.unwrap_or_default()
    }
}

/// Coerced `major.minor.patch` triple; pre-release and `v` prefix are
/// stripped for numeric comparison only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SemverTriple {
    major: u64,
    minor: u64,
    patch: u64,
}

/// Version strings resolved outside the registry; never diffable.
const NON_REGISTRY_SCHEMES: [&str; 5] = ["file:", "git:", "git+", "github:", "workspace:"];

/// Classifies a version string as `Ok`, `Range`, or `NonSemver`.
pub fn detect_version_type(raw: &str) -> VersionParseStatus {
    let value = raw.trim();
    if value.is_empty() {
        return VersionParseStatus::NonSemver;
    }

    let lowered = value.to_ascii_lowercase();
    if NON_REGISTRY_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return VersionParseStatus::NonSemver;
    }

    // Compound expressions: "||" alternatives, ">=1.0.0 <2.0.0", "1.0.0 - 2.0.0"
    if value.contains("||") || value.split_whitespace().nth(1).is_some() {
        return VersionParseStatus::Range;
    }

    if value.starts_with('^')
        || value.starts_with('~')
        || value.starts_with('>')
        || value.starts_with('<')
    {
        return VersionParseStatus::Range;
    }

    if has_wildcard_segment(value) {
        return VersionParseStatus::Range;
    }

    if coerce_triple(value).is_some() {
        VersionParseStatus::Ok
    } else {
        // Dist-tags ("latest", "next") and anything else unrecognized
        VersionParseStatus::NonSemver
    }
}

/// Computes the gap between a current and a latest version.
///
/// Ranges are not diffable against a point version; for parseable pairs
/// the absolute difference is reported only at the most-significant level
/// where the two differ.
pub fn calculate_version_gap(current: &str, latest: &str) -> VersionGapReport {
    if detect_version_type(current) == VersionParseStatus::Range
        || detect_version_type(latest) == VersionParseStatus::Range
    {
        return VersionGapReport::unmeasurable(VersionParseStatus::Range);
    }

    let (current, latest) = match (coerce_triple(current), coerce_triple(latest)) {
        (Some(c), Some(l)) => (c, l),
        _ => return VersionGapReport::unmeasurable(VersionParseStatus::NonSemver),
    };

    let gap = if current.major != latest.major {
        VersionGap {
            major: current.major.abs_diff(latest.major),
            minor: 0,
            patch: 0,
        }
    } else if current.minor != latest.minor {
        VersionGap {
            major: 0,
            minor: current.minor.abs_diff(latest.minor),
            patch: 0,
        }
    } else {
        VersionGap {
            major: 0,
            minor: 0,
            patch: current.patch.abs_diff(latest.patch),
        }
    };

    VersionGapReport {
        status: VersionParseStatus::Ok,
        gap: Some(gap),
    }
}

/// A dotted segment of `x`, `X`, or `*` makes the string a range
/// (`1.2.x`, `1.*`, bare `*`).
fn has_wildcard_segment(value: &str) -> bool {
    value
        .split('.')
        .any(|segment| matches!(segment, "x" | "X" | "*"))
}

/// Coerces a version string to a numeric triple. Missing minor/patch
/// segments default to zero; any non-numeric segment fails the coercion.
fn coerce_triple(raw: &str) -> Option<SemverTriple> {
    let value = raw.trim();
    let value = value
        .strip_prefix('v')
        .or_else(|| value.strip_prefix('V'))
        .unwrap_or(value);

    // Pre-release ("-alpha.1") and build ("+build.5") suffixes do not
    // participate in the numeric comparison.
    let numeric = value.split(['-', '+']).next()?;
    if numeric.is_empty() {
        return None;
    }

    let segments: Vec<&str> = numeric.split('.').collect();
    if segments.len() > 3 {
        return None;
    }

    let mut parts = [0u64; 3];
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return None;
        }
        parts[i] = segment.parse().ok()?;
    }

    Some(SemverTriple {
        major: parts[0],
        minor: parts[1],
        patch: parts[2],
    })
}
