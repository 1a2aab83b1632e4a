//! Dashboard configuration.
//!
//! # Responsibility
//! - Describe where data and logs live and which thresholds drive display
//!   tones.
//! - Decode from JSON with every field optional.
//!
//! # Invariants
//! - Threshold bands are ordered: `low < warning < critical`.
//! - A config that fails `validate()` is never returned by the loaders.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logging::default_log_level;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Decode(serde_json::Error),
    InvalidThresholds(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Decode(err) => write!(f, "invalid config json: {err}"),
            Self::InvalidThresholds(message) => write!(f, "invalid thresholds: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode(err) => Some(err),
            Self::InvalidThresholds(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Percent cut-offs used to pick display tones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Member utilization above this is shown red.
    pub utilization_critical: f64,
    /// Member utilization above this is shown yellow.
    pub utilization_warning: f64,
    /// Member utilization at or below this is shown as spare capacity.
    pub utilization_low: f64,
    /// Budget spend above this is shown red.
    pub budget_critical: f64,
    /// Budget spend above this is shown yellow.
    pub budget_warning: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            utilization_critical: 90.0,
            utilization_warning: 70.0,
            utilization_low: 30.0,
            budget_critical: 100.0,
            budget_warning: 85.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> ConfigResult<()> {
        let values = [
            self.utilization_critical,
            self.utilization_warning,
            self.utilization_low,
            self.budget_critical,
            self.budget_warning,
        ];
        if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(ConfigError::InvalidThresholds(
                "thresholds must be finite, non-negative percentages".to_string(),
            ));
        }
        if !(self.utilization_low < self.utilization_warning
            && self.utilization_warning < self.utilization_critical)
        {
            return Err(ConfigError::InvalidThresholds(format!(
                "utilization bands must increase: low={} warning={} critical={}",
                self.utilization_low, self.utilization_warning, self.utilization_critical
            )));
        }
        if self.budget_warning >= self.budget_critical {
            return Err(ConfigError::InvalidThresholds(format!(
                "budget warning ({}) must be below critical ({})",
                self.budget_warning, self.budget_critical
            )));
        }
        Ok(())
    }
}

/// Runtime settings for a dashboard process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub log_level: String,
    /// Absolute directory for rolling log files; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
    /// JSON snapshot to load instead of the built-in sample data.
    pub data_path: Option<PathBuf>,
    pub thresholds: Thresholds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            data_path: None,
            thresholds: Thresholds::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DashboardConfig, Thresholds};
    use std::path::PathBuf;

    #[test]
    fn empty_object_yields_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.data_path, None);
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn partial_thresholds_keep_remaining_defaults() {
        let config = DashboardConfig::from_json(
            r#"{"data_path": "/srv/rt/data.json", "thresholds": {"utilization_critical": 100}}"#,
        )
        .unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("/srv/rt/data.json")));
        assert_eq!(config.thresholds.utilization_critical, 100.0);
        assert_eq!(config.thresholds.utilization_warning, 70.0);
    }

    #[test]
    fn unordered_bands_are_rejected() {
        let err = DashboardConfig::from_json(r#"{"thresholds": {"utilization_warning": 95}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThresholds(_)));
        assert!(err.to_string().contains("utilization bands must increase"));
    }

    #[test]
    fn budget_warning_must_stay_below_critical() {
        let thresholds = Thresholds {
            budget_warning: 120.0,
            ..Thresholds::default()
        };
        assert!(thresholds.validate().is_err());
    }
}
