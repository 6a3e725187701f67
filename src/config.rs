//! Configuration file support for deprisk.
//!
//! Provides YAML-based configuration through `deprisk.config.yml` files,
//! including data structures, file loading, and validation. CLI
//! arguments always win over config values.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "deprisk.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub limit: Option<usize>,
    pub top_priority: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(limit) = config.limit {
        if limit == 0 {
            bail!(
                "Invalid config: limit must be at least 1.\n\n\
                 💡 Hint: The limit bounds how many packages are analyzed per run."
            );
        }
    }

    if let Some(top_priority) = config.top_priority {
        if top_priority == 0 {
            bail!(
                "Invalid config: top_priority must be at least 1.\n\n\
                 💡 Hint: top_priority bounds the executive summary's priority list."
            );
        }
    }

    if let Some(ref format) = config.format {
        let normalized = format.to_lowercase();
        if !matches!(normalized.as_str(), "json" | "markdown" | "md") {
            bail!(
                "Invalid config: unknown format '{}'.\n\n\
                 💡 Hint: Supported formats are 'json' and 'markdown'.",
                format
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
