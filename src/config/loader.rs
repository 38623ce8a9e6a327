//! Configuration file discovery and loading.
//!
//! Layers, lowest priority first:
//! 1. User global config (`~/.vskit/config.yml`)
//! 2. Project config (`.vskit/config.yml`)
//! 3. Local overrides (`.vskit/config.local.yml`)
//! 4. Environment (`VSKIT_PYTHON`, `VSKIT_FFMPEG`)
//!
//! Every file is optional.

use crate::config::merger::merge_configs;
use crate::config::schema::VskitConfig;
use crate::config::validator::validate;
use crate::error::{Result, VskitError};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding config files, under home or the project root.
pub const CONFIG_DIR: &str = ".vskit";

/// Overrides the `python` key.
pub const ENV_PYTHON: &str = "VSKIT_PYTHON";

/// Overrides the `ffmpeg` key.
pub const ENV_FFMPEG: &str = "VSKIT_FFMPEG";

/// Paths to configuration files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.vskit/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .vskit/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .vskit/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: dirs::home_dir()
                .and_then(|home| existing(home.join(CONFIG_DIR).join("config.yml"))),
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// All existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Parse YAML content into a config. Empty content yields the default.
pub fn parse_config(content: &str, source_path: &Path) -> Result<VskitConfig> {
    if content.trim().is_empty() {
        return Ok(VskitConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| VskitError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<VskitConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Load a config file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| VskitError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every discovered layer for a project.
pub fn load_merged_config(project_root: &Path) -> Result<VskitConfig> {
    let paths = ConfigPaths::discover(project_root);

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config layer {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);
    serde_yaml::from_value(merged).map_err(|e| VskitError::ConfigParseError {
        path: project_root.join(CONFIG_DIR).join("config.yml"),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: VskitConfig, lookup: F) -> VskitConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(python) = lookup(ENV_PYTHON).filter(|v| !v.is_empty()) {
        config.python = Some(python);
    }
    if let Some(ffmpeg) = lookup(ENV_FFMPEG).filter(|v| !v.is_empty()) {
        config.ffmpeg = Some(ffmpeg);
    }
    config
}

/// Load, apply environment overrides and validate.
///
/// If `config_override` is provided, only that file is read. Otherwise all
/// layers are discovered and merged.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<VskitConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => load_merged_config(project_root)?,
    };
    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}
