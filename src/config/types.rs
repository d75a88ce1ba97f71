//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::loader::{self, ConfigWarning};

/// Version stamps written into created containers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_setting_version")]
    pub setting_version: u32,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            setting_version: default_setting_version(),
        }
    }
}

fn default_setting_version() -> u32 {
    4
}

/// Id and name conventions for containers the builder creates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    #[serde(default = "default_user_changes_suffix")]
    pub user_changes_suffix: String,

    #[serde(default = "default_definition_changes_suffix")]
    pub definition_changes_suffix: String,

    /// Substituted by `unique_name` when the candidate is blank
    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            user_changes_suffix: default_user_changes_suffix(),
            definition_changes_suffix: default_definition_changes_suffix(),
            fallback_name: default_fallback_name(),
        }
    }
}

fn default_user_changes_suffix() -> String {
    "_user".to_string()
}

fn default_definition_changes_suffix() -> String {
    "_settings".to_string()
}

fn default_fallback_name() -> String {
    "Profile".to_string()
}

/// Machine construction policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Remove everything registered by a failed `create_machine` call
    #[serde(default = "default_true")]
    pub rollback_on_error: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            rollback_on_error: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub builder: BuilderConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> anyhow::Result<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_dir: Option<&Path>) -> Self {
        loader::load_or_default(project_dir)
    }

    /// Apply environment variable overrides (PRINTSTACK_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
