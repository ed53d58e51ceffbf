//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FocuslensError, FocuslensResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Attention tracking parameters.
    #[serde(default)]
    pub tracker: TrackerSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Attention tracking parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Number of face-present frames in the rolling attention window.
    pub window_size: usize,

    /// Maximum iris-to-eye-center distance (normalized units) for a
    /// "focused" eye. Both eyes must be strictly below it.
    pub offset_threshold: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "focuslens_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            window_size: 100,
            offset_threshold: 0.015,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl TrackerSettings {
    /// Reject settings the tracker cannot run with.
    pub fn validate(&self) -> FocuslensResult<()> {
        if self.window_size == 0 {
            return Err(FocuslensError::config("tracker.window_size must be at least 1"));
        }
        if !self.offset_threshold.is_finite() || self.offset_threshold <= 0.0 {
            return Err(FocuslensError::config(format!(
                "tracker.offset_threshold must be a positive number, got {}",
                self.offset_threshold
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`], any
    /// failure is returned to the caller.
    pub fn load_from(path: impl AsRef<Path>) -> FocuslensResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FocuslensError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            FocuslensError::config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> FocuslensResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> FocuslensResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> FocuslensResult<()> {
        self.tracker.validate()
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("focuslens").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tracker_settings() {
        let config = AppConfig::default();
        assert_eq!(config.tracker.window_size, 100);
        assert!((config.tracker.offset_threshold - 0.015).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig = serde_json::from_str(r#"{"tracker":{"window_size":30}}"#).unwrap();
        assert_eq!(parsed.tracker.window_size, 30);
        assert!((parsed.tracker.offset_threshold - 0.015).abs() < 1e-12);
        assert_eq!(parsed.logging, LoggingConfig::default());
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let settings = TrackerSettings {
            window_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(FocuslensError::Config { .. })
        ));
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let settings = TrackerSettings {
            offset_threshold: -0.5,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_and_load_from_roundtrip() {
        let dir = std::env::temp_dir().join("focuslens_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.tracker.window_size = 42;
        config.logging.json = true;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("focuslens_no_such_config.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(FocuslensError::FileNotFound { .. })
        ));
    }
}
