use crate::shared::error::AnalysisError;
use crate::shared::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// One resolved package occurrence from the lockfile: the candidate unit
/// the analysis pipeline iterates over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedPackage {
    pub name: String,
    pub version: String,
}

/// The root manifest entry recorded inside the lockfile (`packages[""]`).
#[derive(Debug, Clone, Default)]
pub struct RootManifest {
    dependencies: Vec<(String, String)>,
    dev_dependencies: Vec<(String, String)>,
}

impl RootManifest {
    fn from_entry(entry: &Map<String, Value>) -> Self {
        Self {
            dependencies: declared_entries(entry.get("dependencies")),
            dev_dependencies: declared_entries(entry.get("devDependencies")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    pub fn dependency_names(&self) -> HashSet<String> {
        self.dependencies.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn dev_dependency_names(&self) -> HashSet<String> {
        self.dev_dependencies
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// Declared entries in manifest order, runtime before dev.
    fn declared_packages(&self) -> impl Iterator<Item = &(String, String)> {
        self.dependencies.iter().chain(self.dev_dependencies.iter())
    }
}

/// Externally supplied package.json content, used only when the lockfile
/// root entry is missing or empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManifestFallback {
    pub dependencies: Map<String, Value>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Map<String, Value>,
}

impl ManifestFallback {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    pub fn dependency_names(&self) -> HashSet<String> {
        self.dependencies.keys().cloned().collect()
    }

    pub fn dev_dependency_names(&self) -> HashSet<String> {
        self.dev_dependencies.keys().cloned().collect()
    }
}

/// Decoded lockfile content for one analysis run.
///
/// Holds the root manifest entry and the ordered, deduplicated candidate
/// list of resolved packages. Immutable once built; discarded after the
/// run.
#[derive(Debug, Clone, Default)]
pub struct LockfileSnapshot {
    root: RootManifest,
    candidates: Vec<LockedPackage>,
}

impl LockfileSnapshot {
    /// Builds a snapshot from decoded lockfile JSON.
    ///
    /// Candidate sources, in order:
    /// 1. the v2/v3 `packages` table (install-path keyed),
    /// 2. the v1 top-level `dependencies` resolved tree (name keyed),
    /// 3. the root manifest's declared versions.
    ///
    /// Missing or empty sources yield an empty candidate list, which is a
    /// valid (empty) analysis. Only a top level that is not a JSON object
    /// is an error.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(top) = value.as_object() else {
            return Err(AnalysisError::MalformedLockfile {
                details: format!("top level is {}", json_kind(value)),
            }
            .into());
        };

        let packages = top.get("packages").and_then(Value::as_object);

        let root = packages
            .and_then(|table| table.get(""))
            .and_then(Value::as_object)
            .map(RootManifest::from_entry)
            .unwrap_or_default();

        let mut candidates = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if let Some(table) = packages {
            for (install_path, entry) in table {
                if install_path.is_empty() {
                    continue;
                }
                let Some(name) = package_name_from_entry(install_path, entry) else {
                    continue;
                };
                let Some(version) = entry.get("version").and_then(Value::as_str) else {
                    continue;
                };
                if seen.insert(name.to_string()) {
                    candidates.push(LockedPackage {
                        name: name.to_string(),
                        version: version.trim().to_string(),
                    });
                }
            }
        }

        if candidates.is_empty() {
            if let Some(tree) = top.get("dependencies").and_then(Value::as_object) {
                for (name, entry) in tree {
                    let Some(version) = entry.get("version").and_then(Value::as_str) else {
                        continue;
                    };
                    if seen.insert(name.clone()) {
                        candidates.push(LockedPackage {
                            name: name.clone(),
                            version: version.trim().to_string(),
                        });
                    }
                }
            }
        }

        if candidates.is_empty() {
            for (name, version) in root.declared_packages() {
                if seen.insert(name.clone()) {
                    candidates.push(LockedPackage {
                        name: name.clone(),
                        version: version.clone(),
                    });
                }
            }
        }

        Ok(Self { root, candidates })
    }

    pub fn root_manifest(&self) -> &RootManifest {
        &self.root
    }

    /// Resolved packages in lockfile insertion order, first occurrence of
    /// a name wins.
    pub fn candidates(&self) -> &[LockedPackage] {
        &self.candidates
    }
}

/// Package name for a resolved entry: the install path after the last
/// `node_modules/` segment, or the entry's own `name` field for
/// workspace-member paths.
fn package_name_from_entry<'a>(install_path: &'a str, entry: &'a Value) -> Option<&'a str> {
    if let Some(idx) = install_path.rfind("node_modules/") {
        let name = &install_path[idx + "node_modules/".len()..];
        if name.is_empty() {
            return None;
        }
        return Some(name);
    }
    entry.get("name").and_then(Value::as_str)
}

fn declared_entries(value: Option<&Value>) -> Vec<(String, String)> {
    let Some(map) = value.and_then(Value::as_object) else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(name, version)| {
            version
                .as_str()
                .map(|v| (name.clone(), v.trim().to_string()))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
