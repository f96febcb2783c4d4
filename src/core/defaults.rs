use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::validation;

/// Looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "hmm-update.json";

/// Root configuration structure for hmm-update.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via hmm-update.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Defaults {
    /// File name suffixes processed when walking a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// File names that are never rewritten.
    #[serde(default = "default_protected_files")]
    pub protected_files: Vec<String>,

    /// Glob patterns (relative to the walked directory) to leave out.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory names never descended into.
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            protected_files: default_protected_files(),
            exclude: Vec::new(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

impl Defaults {
    pub fn validate(&self) -> crate::Result<()> {
        for ext in &self.extensions {
            validation::require_non_empty(ext, "extensions", "Extension must not be empty")
                .map_err(|_| {
                    crate::Error::config_invalid_value(
                        "extensions",
                        Some(ext.clone()),
                        "extensions must be non-empty suffixes such as .c",
                    )
                })?;
        }
        Ok(())
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_extensions() -> Vec<String> {
    [".c", ".cpp", ".h", ".hpp"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_protected_files() -> Vec<String> {
    vec!["HandmadeMath.h".to_string()]
}

fn default_skip_dirs() -> Vec<String> {
    [".git", ".svn", ".hg"].iter().map(|d| d.to_string()).collect()
}

// =============================================================================
// Loading
// =============================================================================

/// Load the hmm-update.json config from the working directory, falling back to
/// defaults if it is missing or invalid.
pub fn load_config() -> UpdateConfig {
    load_config_from_path(Path::new(CONFIG_FILE_NAME)).unwrap_or_default()
}

/// Load config from an explicit file. Errors propagate.
pub fn load_config_from_path(path: &Path) -> crate::Result<UpdateConfig> {
    if !path.exists() {
        return Err(crate::Error::path_not_found(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: UpdateConfig = serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))?;

    config.defaults.validate()?;
    Ok(config)
}
