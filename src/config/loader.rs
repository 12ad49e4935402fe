//! Configuration file loading with precedence handling.

use crate::state::Timing;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WORDPLAY_CONFIG";

/// Environment variable fixing the shuffle seed.
pub const SEED_ENV_VAR: &str = "WORDPLAY_SEED";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/wordplay/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// View fade duration in milliseconds.
    #[serde(default)]
    pub transition_ms: Option<u64>,

    /// Pause between view swap and fade in, in milliseconds.
    #[serde(default)]
    pub settle_ms: Option<u64>,

    /// Fixed shuffle seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Hover words by moving the mouse over them.
    #[serde(default)]
    pub mouse_hover: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// View fade duration in milliseconds.
    pub transition_ms: u64,
    /// Settle delay in milliseconds.
    pub settle_ms: u64,
    /// Shuffle seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Mouse hover enabled.
    pub mouse_hover: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Default tracing filter.
    pub log_level: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let timing = Timing::default();
        Self {
            transition_ms: duration_ms(timing.transition),
            settle_ms: duration_ms(timing.settle),
            seed: None,
            mouse_hover: true,
            log_file_path: default_log_path(),
            log_level: "info".to_string(),
        }
    }
}

impl ResolvedConfig {
    /// Orchestrator timing for these settings.
    pub fn timing(&self) -> Timing {
        Timing {
            transition: Duration::from_millis(self.transition_ms),
            settle: Duration::from_millis(self.settle_ms),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/wordplay/wordplay.log` on Linux, the platform
/// equivalent elsewhere, and falls back to the current directory when no
/// state directory is known.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("wordplay").join("wordplay.log")
    } else {
        PathBuf::from("wordplay.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/wordplay/config.toml` on Linux.
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wordplay").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `WORDPLAY_CONFIG` environment variable
/// 3. Default path `~/.config/wordplay/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// `WORDPLAY_SEED` overrides the seed. A value that is not an unsigned
/// integer is logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
        match raw.trim().parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid WORDPLAY_SEED"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        transition_ms: config.transition_ms.unwrap_or(defaults.transition_ms),
        settle_ms: config.settle_ms.unwrap_or(defaults.settle_ms),
        seed: config.seed.or(defaults.seed),
        mouse_hover: config.mouse_hover.unwrap_or(defaults.mouse_hover),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        log_level: config.log_level.unwrap_or(defaults.log_level),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only flags the user actually passed are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    seed_override: Option<u64>,
    transition_override: Option<u64>,
    mouse_hover_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(seed) = seed_override {
        config.seed = Some(seed);
    }

    if let Some(transition_ms) = transition_override {
        config.transition_ms = transition_ms;
    }

    if let Some(mouse_hover) = mouse_hover_override {
        config.mouse_hover = mouse_hover;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
