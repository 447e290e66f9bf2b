//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LumafxError, LumafxResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default frame processing parameters.
    pub processing: ProcessingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default frame processing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingDefaults {
    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Halftone output levels.
    pub halftone: HalftoneConfig,
}

/// Halftone quantization levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalftoneConfig {
    /// Luma cutoff; working values strictly above it map to `high_value`.
    pub threshold: u8,

    pub high_value: u8,

    pub low_value: u8,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "lumafx_processing_core=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for ProcessingDefaults {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            halftone: HalftoneConfig::default(),
        }
    }
}

impl Default for HalftoneConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            high_value: 255,
            low_value: 0,
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

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> LumafxResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LumafxError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> LumafxResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> LumafxResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values no frame could be processed with.
    pub fn validate(&self) -> LumafxResult<()> {
        if self.processing.width == 0 || self.processing.height == 0 {
            return Err(LumafxError::config(format!(
                "frame dimensions must be non-zero, got {}x{}",
                self.processing.width, self.processing.height
            )));
        }
        Ok(())
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
    base.join("lumafx").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_vga_with_midpoint_threshold() {
        let config = AppConfig::default();
        assert_eq!(config.processing.width, 640);
        assert_eq!(config.processing.height, 480);
        assert_eq!(config.processing.halftone.threshold, 128);
        assert_eq!(config.processing.halftone.high_value, 255);
        assert_eq!(config.processing.halftone.low_value, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "processing": { "halftone": { "threshold": 100 } } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.processing.halftone.threshold, 100);
        assert_eq!(config.processing.halftone.high_value, 255);
        assert_eq!(config.processing.width, 640);
        assert!(!config.logging.json);
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("lumafx_test_config_roundtrip");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.processing.width = 320;
        config.processing.height = 240;
        config.logging.level = "debug".to_string();
        config.logging.file = Some(dir.join("lumafx.log"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("lumafx_definitely_missing.json");
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, LumafxError::FileNotFound { .. }));
    }

    #[test]
    fn test_zero_width_rejected() {
        let mut config = AppConfig::default();
        config.processing.width = 0;
        assert!(matches!(
            config.validate(),
            Err(LumafxError::Config { .. })
        ));
    }
}
