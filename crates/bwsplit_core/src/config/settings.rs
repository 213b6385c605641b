//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field has a default so a partial (or absent) config file still
//! yields a complete, usable configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid TOML for the settings schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Input/output directory settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Segmentation parameters.
    #[serde(default)]
    pub split: SplitSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: PathSettings::default(),
            tools: ToolSettings::default(),
            split: SplitSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// A missing file is not an error: defaults are returned so the tool
    /// runs without any configuration present.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Directory configuration for input and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory scanned for `.wav` files.
    #[serde(default = "default_input_folder")]
    pub input_folder: String,

    /// Directory segment files and copies are written to.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,
}

fn default_input_folder() -> String {
    "inputFiles".to_string()
}

fn default_output_folder() -> String {
    "outputFiles".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input_folder: default_input_folder(),
            output_folder: default_output_folder(),
        }
    }
}

/// External tool locations: absolute paths or bare names found on PATH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// ffmpeg binary used to cut segments.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    /// ffprobe binary used to read stream/format metadata.
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

/// Segmentation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSettings {
    /// Maximum segment duration in seconds.
    #[serde(default = "default_max_segment_secs")]
    pub max_segment_secs: u32,

    /// Files at or above this size in bytes are split; smaller files are
    /// copied verbatim.
    #[serde(default = "default_size_threshold")]
    pub size_threshold_bytes: u64,
}

fn default_max_segment_secs() -> u32 {
    21_000
}

fn default_size_threshold() -> u64 {
    3_840_000_172
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            max_segment_secs: default_max_segment_secs(),
            size_threshold_bytes: default_size_threshold(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
