//! Configuration loading, validation, and management for StackSim.
//!
//! Loads configuration from `~/.stacksim/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Capacities offered by the launcher.
pub const CAPACITY_RANGE: RangeInclusive<u32> = 5..=20;

/// How many random values the launcher may seed.
pub const RANDOM_COUNT_RANGE: RangeInclusive<u32> = 1..=10;

/// Upper bound for any refresh delay.
pub const MAX_DELAY_MS: u64 = 5_000;

/// The root configuration structure.
///
/// Maps directly to `~/.stacksim/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Launcher defaults (capacity and seed data)
    #[serde(default)]
    pub launcher: LauncherConfig,

    /// Display settings for the terminal surface
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Whether a session starts empty or with random values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialDataMode {
    #[default]
    Empty,
    Random,
}

impl std::fmt::Display for InitialDataMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Random => f.write_str("random"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    #[serde(default = "default_capacity")]
    pub capacity: u32,

    #[serde(default)]
    pub initial_data: InitialDataMode,

    /// Only used when `initial_data = "random"`
    #[serde(default = "default_random_count")]
    pub random_count: u32,

    #[serde(default = "default_value_min")]
    pub value_min: i32,

    #[serde(default = "default_value_max")]
    pub value_max: i32,

    /// Fixed RNG seed for reproducible sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_capacity() -> u32 {
    10
}
fn default_random_count() -> u32 {
    5
}
fn default_value_min() -> i32 {
    -99
}
fn default_value_max() -> i32 {
    99
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            initial_data: InitialDataMode::default(),
            random_count: default_random_count(),
            value_min: default_value_min(),
            value_max: default_value_max(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Delay redraws after push and pop
    #[serde(default = "default_true")]
    pub animate: bool,

    #[serde(default = "default_push_delay_ms")]
    pub push_delay_ms: u64,

    #[serde(default = "default_pop_delay_ms")]
    pub pop_delay_ms: u64,

    /// ANSI colours in the rendered output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}
fn default_push_delay_ms() -> u64 {
    100
}
fn default_pop_delay_ms() -> u64 {
    300
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            animate: true,
            push_delay_ms: default_push_delay_ms(),
            pop_delay_ms: default_pop_delay_ms(),
            color: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.stacksim/config.toml).
    ///
    /// Environment variables override the file:
    /// - `STACKSIM_CAPACITY`
    /// - `STACKSIM_SEED`
    /// - `STACKSIM_NO_COLOR` (any value)
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup, then re-validate.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("STACKSIM_CAPACITY") {
            self.launcher.capacity = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("STACKSIM_CAPACITY is not a number: {raw}"))
            })?;
        }

        if let Some(raw) = lookup("STACKSIM_SEED") {
            let seed = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("STACKSIM_SEED is not a number: {raw}"))
            })?;
            self.launcher.seed = Some(seed);
        }

        if lookup("STACKSIM_NO_COLOR").is_some() {
            self.display.color = false;
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".stacksim")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let launcher = &self.launcher;

        if !CAPACITY_RANGE.contains(&launcher.capacity) {
            return Err(ConfigError::ValidationError(format!(
                "launcher.capacity must be between {} and {} (got {})",
                CAPACITY_RANGE.start(),
                CAPACITY_RANGE.end(),
                launcher.capacity
            )));
        }

        if !RANDOM_COUNT_RANGE.contains(&launcher.random_count) {
            return Err(ConfigError::ValidationError(format!(
                "launcher.random_count must be between {} and {} (got {})",
                RANDOM_COUNT_RANGE.start(),
                RANDOM_COUNT_RANGE.end(),
                launcher.random_count
            )));
        }

        if launcher.value_min > launcher.value_max {
            return Err(ConfigError::ValidationError(
                "launcher.value_min must not exceed launcher.value_max".into(),
            ));
        }

        if self.display.push_delay_ms > MAX_DELAY_MS || self.display.pop_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::ValidationError(format!(
                "display delays must be at most {MAX_DELAY_MS} ms"
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.launcher.capacity, 10);
        assert_eq!(config.launcher.initial_data, InitialDataMode::Empty);
        assert_eq!(config.launcher.random_count, 5);
        assert_eq!((config.launcher.value_min, config.launcher.value_max), (-99, 99));
        assert!(config.display.animate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.launcher.capacity, config.launcher.capacity);
        assert_eq!(parsed.display.pop_delay_ms, config.display.pop_delay_ms);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let toml_str = r#"
[launcher]
capacity = 15
initial_data = "random"
seed = 7
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.launcher.capacity, 15);
        assert_eq!(config.launcher.initial_data, InitialDataMode::Random);
        assert_eq!(config.launcher.seed, Some(7));
        assert_eq!(config.launcher.random_count, 5);
        assert_eq!(config.display.push_delay_ms, 100);
    }

    #[test]
    fn out_of_range_capacity_rejected() {
        for capacity in [0, 4, 21] {
            let mut config = AppConfig::default();
            config.launcher.capacity = capacity;
            assert!(config.validate().is_err(), "capacity {capacity} accepted");
        }
    }

    #[test]
    fn out_of_range_random_count_rejected() {
        let mut config = AppConfig::default();
        config.launcher.random_count = 11;
        assert!(config.validate().is_err());
        config.launcher.random_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_value_range_rejected() {
        let mut config = AppConfig::default();
        config.launcher.value_min = 10;
        config.launcher.value_max = -10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn excessive_delay_rejected() {
        let mut config = AppConfig::default();
        config.display.pop_delay_ms = MAX_DELAY_MS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        let config = result.unwrap();
        assert_eq!(config.launcher.capacity, 10);
    }

    #[test]
    fn load_from_reads_and_validates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        std::fs::write(&path, "[launcher]\ncapacity = 6\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.launcher.capacity, 6);

        std::fs::write(&path, "[launcher]\ncapacity = 50\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ValidationError(_))
        ));

        std::fs::write(&path, "[launcher\ncapacity = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[
                ("STACKSIM_CAPACITY", "12"),
                ("STACKSIM_SEED", "99"),
                ("STACKSIM_NO_COLOR", "1"),
            ]))
            .unwrap();
        assert_eq!(config.launcher.capacity, 12);
        assert_eq!(config.launcher.seed, Some(99));
        assert!(!config.display.color);
    }

    #[test]
    fn bad_env_override_rejected() {
        let mut config = AppConfig::default();
        assert!(config.apply_env_overrides(env(&[("STACKSIM_CAPACITY", "lots")])).is_err());

        let mut config = AppConfig::default();
        assert!(config.apply_env_overrides(env(&[("STACKSIM_CAPACITY", "3")])).is_err());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("capacity = 10"));
        assert!(toml_str.contains("initial_data = \"empty\""));
    }
}
