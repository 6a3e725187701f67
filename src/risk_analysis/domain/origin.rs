use crate::risk_analysis::domain::lockfile::{LockfileSnapshot, ManifestFallback};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Whether a package is declared directly by the project.
///
/// `Unknown` is only produced when no origin data exists at all for the
/// run; it is never a stand-in for "not direct". The three-state enum
/// makes that distinction structural instead of a nullable-boolean
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directness {
    Direct,
    Transitive,
    Unknown,
}

/// Whether a direct package is a runtime or a development dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Runtime,
    Development,
    Unknown,
}

/// Origin verdict for one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginClassification {
    pub directness: Directness,
    pub usage: Usage,
}

impl OriginClassification {
    pub fn unknown() -> Self {
        Self {
            directness: Directness::Unknown,
            usage: Usage::Unknown,
        }
    }

    /// True when neither axis could be judged.
    pub fn is_fully_unknown(&self) -> bool {
        self.directness == Directness::Unknown && self.usage == Usage::Unknown
    }

    pub fn is_direct(&self) -> Option<bool> {
        match self.directness {
            Directness::Direct => Some(true),
            Directness::Transitive => Some(false),
            Directness::Unknown => None,
        }
    }

    pub fn is_runtime(&self) -> Option<bool> {
        match self.usage {
            Usage::Runtime => Some(true),
            Usage::Development => Some(false),
            Usage::Unknown => None,
        }
    }
}

// Wire shape expected by report consumers: missing data is null, never
// false.
impl Serialize for OriginClassification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OriginClassification", 2)?;
        state.serialize_field("isDirect", &self.is_direct())?;
        state.serialize_field("isRuntime", &self.is_runtime())?;
        state.end()
    }
}

/// Direct-dependency name sets extracted from the lockfile root manifest
/// (or the fallback manifest).
#[derive(Debug, Clone, Default)]
pub struct DirectDependencies {
    pub runtime: HashSet<String>,
    pub dev: HashSet<String>,
}

impl DirectDependencies {
    /// No origin data exists for the run.
    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.dev.is_empty()
    }
}

/// Extracts the direct runtime/dev dependency sets.
///
/// The lockfile's own root manifest entry is the primary source; the
/// externally supplied manifest is consulted only when the root entry
/// yields nothing. Both being absent is not an error - the sets stay
/// empty and classification degrades to `Unknown`.
pub fn extract_direct_dependencies(
    snapshot: &LockfileSnapshot,
    manifest_fallback: Option<&ManifestFallback>,
) -> DirectDependencies {
    let root = snapshot.root_manifest();
    if !root.is_empty() {
        return DirectDependencies {
            runtime: root.dependency_names(),
            dev: root.dev_dependency_names(),
        };
    }

    if let Some(manifest) = manifest_fallback {
        return DirectDependencies {
            runtime: manifest.dependency_names(),
            dev: manifest.dev_dependency_names(),
        };
    }

    DirectDependencies::default()
}

/// Classifies one package against the direct-dependency sets.
///
/// When both sets are empty there is no data to judge against and both
/// axes are `Unknown`; absence from non-empty sets is the only thing
/// that proves a package transitive.
pub fn classify_dependency(package_name: &str, direct: &DirectDependencies) -> OriginClassification {
    if direct.is_empty() {
        return OriginClassification::unknown();
    }

    let in_runtime = direct.runtime.contains(package_name);
    let in_dev = direct.dev.contains(package_name);

    let directness = if in_runtime || in_dev {
        Directness::Direct
    } else {
        Directness::Transitive
    };

    let usage = if in_runtime {
        Usage::Runtime
    } else if in_dev {
        Usage::Development
    } else {
        Usage::Unknown
    };

    OriginClassification { directness, usage }
}
