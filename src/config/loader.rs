//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::EngineConfig;

const PROJECT_CONFIG_FILE: &str = "printstack.toml";

/// Non-fatal configuration warning surfaced to hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> anyhow::Result<(EngineConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: EngineConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .with_context(|| format!("Invalid config file {}", path.display()))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_dir: Option<&Path>) -> EngineConfig {
    if let Some(dir) = project_dir {
        let project_config = dir.join(PROJECT_CONFIG_FILE);
        if project_config.exists() {
            match EngineConfig::load(&project_config) {
                Ok(config) => return with_env_overrides(config),
                Err(e) => tracing::warn!(error = %e, "ignoring unreadable project config"),
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("printstack/config.toml");
        if user_config.exists() {
            match EngineConfig::load(&user_config) {
                Ok(config) => return with_env_overrides(config),
                Err(e) => tracing::warn!(error = %e, "ignoring unreadable user config"),
            }
        }
    }

    with_env_overrides(EngineConfig::default())
}

/// Apply environment variable overrides (PRINTSTACK_* prefix)
pub fn with_env_overrides(mut config: EngineConfig) -> EngineConfig {
    // PRINTSTACK_SETTING_VERSION
    if let Ok(version) = std::env::var("PRINTSTACK_SETTING_VERSION") {
        match version.trim().parse::<u32>() {
            Ok(v) => config.format.setting_version = v,
            Err(_) => tracing::warn!(value = %version, "ignoring non-numeric PRINTSTACK_SETTING_VERSION"),
        }
    }

    // PRINTSTACK_ROLLBACK_ON_ERROR
    if let Ok(val) = std::env::var("PRINTSTACK_ROLLBACK_ON_ERROR") {
        config.builder.rollback_on_error = val.to_lowercase() != "false" && val != "0";
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "format",
        "setting_version",
        "naming",
        "user_changes_suffix",
        "definition_changes_suffix",
        "fallback_name",
        "builder",
        "rollback_on_error",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
