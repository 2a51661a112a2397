//! Kinetic configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name looked up in the working directory
pub const CONFIG_FILE: &str = "kinetic.toml";

/// Top-level configuration (kinetic.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct KineticConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub curve: CurveConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Host loop settings for `kinetic play`
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct PlaybackConfig {
    /// Virtual time between frames
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Stop after this many frames even if animations are still running
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
    /// Default preset duration
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
}

fn default_frame_ms() -> u64 {
    16
}

fn default_max_frames() -> u32 {
    600
}

fn default_duration_ms() -> u32 {
    300
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            max_frames: default_max_frames(),
            duration_ms: default_duration_ms(),
        }
    }
}

/// Settings for `kinetic curve`
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct CurveConfig {
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Width of the bar drawn for a value of 1.0
    #[serde(default = "default_width")]
    pub width: usize,
}

fn default_samples() -> usize {
    20
}

fn default_width() -> usize {
    40
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            width: default_width(),
        }
    }
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl KineticConfig {
    /// Load an explicit config file, or `kinetic.toml` from the working
    /// directory if present, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} does not exist", path.display());
                }
                Self::load_file(path)
            }
            None => {
                let local = Path::new(CONFIG_FILE);
                if local.is_file() {
                    Self::load_file(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: KineticConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.playback.frame_ms == 0 {
            anyhow::bail!("playback.frame_ms must be greater than zero");
        }
        if self.curve.samples < 2 {
            anyhow::bail!("curve.samples must be at least 2");
        }
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = KineticConfig::from_toml("").unwrap();
        assert_eq!(config, KineticConfig::default());
        assert_eq!(config.playback.frame_ms, 16);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config = KineticConfig::from_toml(
            r#"
            [playback]
            frame_ms = 33

            [log]
            filter = "kinetic_animation=trace"
            "#,
        )
        .unwrap();
        assert_eq!(config.playback.frame_ms, 33);
        assert_eq!(config.playback.max_frames, 600);
        assert_eq!(config.curve.samples, 20);
        assert_eq!(config.log.filter, "kinetic_animation=trace");
    }

    #[test]
    fn test_rejects_zero_frame_interval() {
        assert!(KineticConfig::from_toml("[playback]\nframe_ms = 0").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = KineticConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(KineticConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = KineticConfig::load(Some(Path::new("/nonexistent/kinetic.toml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
