//! Configuration management for stillify.
//!
//! Configuration is loaded from a platform config directory with
//! sensible defaults. CLI flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings
    pub conversion: ConversionConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// JPEG quality, 1-100
    pub quality: u8,

    /// Worker count per batch group
    pub workers: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            quality: 90,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Platform-appropriate (e.g. ~/.config/stillify/config.toml on
    /// Linux), falling back to ~/.stillify/config.toml.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stillify", "stillify")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".stillify").join("config.toml")
            })
    }

    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conversion.quality == 0 || self.conversion.quality > 100 {
            return Err(ConfigError::ValidationError(
                "conversion.quality must be between 1 and 100".into(),
            ));
        }
        if self.conversion.workers == 0 {
            return Err(ConfigError::ValidationError(
                "conversion.workers must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_quality_out_of_range() {
        let mut config = Config::default();
        config.conversion.quality = 0;
        assert!(config.validate().is_err());
        config.conversion.quality = 101;
        assert!(config.validate().is_err());
        config.conversion.quality = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.conversion.workers = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[conversion]\nquality = 85\nworkers = 2\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.conversion.quality, 85);
        assert_eq!(config.conversion.workers, 2);
        assert_eq!(config.logging.level, "debug");
        // Unspecified fields keep their defaults
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[conversion]\nquality = 150\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
