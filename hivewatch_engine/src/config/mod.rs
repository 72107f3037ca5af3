//! Engine configuration
//!
//! `EngineConfig` is read from TOML; every table and field is optional and
//! falls back to the defaults in [`defaults`]. Runtime overrides from
//! `HIVEWATCH_*` environment variables are applied by [`runtime`].

pub mod defaults;
pub mod runtime;

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub evaluation: EvaluationConfig,
    pub thresholds: ThresholdConfig,
    pub status: StatusConfig,
    pub logging: LoggingConfig,
}

/// Cell and section evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Webapp paths ignored when evaluating a Tomcat role cell
    pub built_in_webapps: Vec<String>,

    /// How many names a truncated list in a cell message shows
    pub preview_limit: usize,

    /// Docker profiles pinned to the front of the column order
    pub docker_profile_order: Vec<String>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            built_in_webapps: defaults::BUILT_IN_WEBAPPS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            preview_limit: defaults::PREVIEW_LIMIT,
            docker_profile_order: defaults::DOCKER_PROFILE_ORDER
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl EvaluationConfig {
    pub fn is_built_in(&self, path: &str) -> bool {
        self.built_in_webapps.iter().any(|p| p == path)
    }
}

/// Actuator resource thresholds used by the decision engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub cpu_warn: f64,
    pub cpu_block: f64,
    pub memory_warn_bytes: u64,
    pub memory_block_bytes: u64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_warn: defaults::CPU_WARN,
            cpu_block: defaults::CPU_BLOCK,
            memory_warn_bytes: defaults::MEMORY_WARN_BYTES,
            memory_block_bytes: defaults::MEMORY_BLOCK_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Cap on issues returned by an environment status query
    pub max_issues: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            max_issues: defaults::MAX_ISSUES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// error, warn, info or debug
    pub level: String,

    /// Emit JSON lines instead of forwarding to the `log` facade
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: false,
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unparseable values fall back to Info
    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_str(&self.level).unwrap_or(LogLevel::Info)
    }
}

impl EngineConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `HIVEWATCH_*` environment overrides, then re-validate
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup, then re-validate
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        runtime::apply_overrides(&mut self, lookup)?;
        self.validate()?;
        Ok(self)
    }

    pub fn with_max_issues(mut self, max_issues: usize) -> Self {
        self.status.max_issues = max_issues;
        self
    }

    pub fn with_preview_limit(mut self, preview_limit: usize) -> Self {
        self.evaluation.preview_limit = preview_limit;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status.max_issues == 0 {
            return Err(ConfigError::invalid(
                "status.max_issues",
                "must be greater than 0",
            ));
        }

        if self.evaluation.preview_limit == 0 {
            return Err(ConfigError::invalid(
                "evaluation.preview_limit",
                "must be greater than 0",
            ));
        }

        if let Some(path) = self
            .evaluation
            .built_in_webapps
            .iter()
            .find(|p| !p.starts_with('/'))
        {
            return Err(ConfigError::invalid(
                "evaluation.built_in_webapps",
                format!("path '{}' must start with '/'", path),
            ));
        }

        let t = &self.thresholds;
        for (key, value) in [("thresholds.cpu_warn", t.cpu_warn), ("thresholds.cpu_block", t.cpu_block)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(key, "must be a ratio between 0 and 1"));
            }
        }
        if t.cpu_warn > t.cpu_block {
            return Err(ConfigError::invalid(
                "thresholds.cpu_warn",
                "must not exceed thresholds.cpu_block",
            ));
        }
        if t.memory_warn_bytes > t.memory_block_bytes {
            return Err(ConfigError::invalid(
                "thresholds.memory_warn_bytes",
                "must not exceed thresholds.memory_block_bytes",
            ));
        }

        if LogLevel::from_str(&self.logging.level).is_none() {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("unknown level '{}'", self.logging.level),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.status.max_issues, 50);
        assert_eq!(config.evaluation.preview_limit, 6);
        assert!(config.evaluation.is_built_in("/manager"));
        assert!(!config.evaluation.is_built_in("/billing"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [status]
            max_issues = 10

            [thresholds]
            cpu_warn = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.status.max_issues, 10);
        assert_eq!(config.thresholds.cpu_warn, 0.5);
        assert_eq!(config.thresholds.cpu_block, defaults::CPU_BLOCK);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = EngineConfig::from_toml_str("[status]\nmax_issues = 0\n");
        assert_matches!(result, Err(ConfigError::Invalid { key, .. }) if key == "status.max_issues");

        let result = EngineConfig::from_toml_str("[thresholds]\ncpu_warn = 0.95\n");
        assert_matches!(result, Err(ConfigError::Invalid { key, .. }) if key == "thresholds.cpu_warn");

        let result = EngineConfig::from_toml_str("[evaluation]\nbuilt_in_webapps = [\"docs\"]\n");
        assert_matches!(result, Err(ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let result = EngineConfig::from_toml_str("[status\nmax_issues = 3");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\nstructured = true").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.logging.min_level(), LogLevel::Debug);
        assert!(config.logging.structured);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = EngineConfig::load(&dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::default()
            .with_max_issues(5)
            .with_preview_limit(2)
            .with_log_level("warn");

        assert_eq!(config.status.max_issues, 5);
        assert_eq!(config.evaluation.preview_limit, 2);
        assert_eq!(config.logging.min_level(), LogLevel::Warning);
    }
}
