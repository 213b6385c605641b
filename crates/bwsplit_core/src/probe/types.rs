//! Typed schema for ffprobe output.
//!
//! ffprobe's JSON is loosely typed; this schema states up front which
//! fields the pipeline relies on and which are optional. Numeric fields
//! arrive as strings (ffprobe quotes them) and are parsed on access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Error type for probe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Input file is gone before probing started.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// The probe tool could not be started.
    #[error("failed to run {tool}: {message}")]
    Spawn { tool: String, message: String },

    /// The probe tool ran and exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    Failed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Probe output was not valid JSON for the report schema.
    #[error("failed to parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    /// Neither the streams nor the format section carried a usable duration.
    #[error("no usable duration in probe data for {0}")]
    MissingDuration(PathBuf),
}

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Full report from one ffprobe run: stream entries plus the format section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProbeReport {
    /// Per-stream metadata; audio-only files carry a single entry.
    #[serde(default)]
    pub streams: Vec<StreamInfo>,

    /// Container-level metadata and tags.
    pub format: FormatInfo,
}

/// One entry from the `streams` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamInfo {
    pub index: Option<u32>,
    pub codec_name: Option<String>,
    pub sample_rate: Option<String>,
    pub duration: Option<String>,
}

/// The `format` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormatInfo {
    pub filename: Option<String>,
    pub duration: Option<String>,

    /// Raw tag block as probed; absent when the file carries no tags.
    pub tags: Option<FormatTags>,

    /// Top-level attribute namespace that comment expansion merges into.
    /// Empty until `expand_tags` runs.
    #[serde(skip)]
    pub attributes: BTreeMap<String, String>,
}

/// Tags nested under `format.tags`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormatTags {
    /// BWF time reference in samples, as a decimal string.
    pub time_reference: Option<String>,

    /// CR-LF separated KEY=VALUE lines holding the a=v metadata block.
    pub comment: Option<String>,

    /// BWF coding history: a flat delimited string as probed, a mapping
    /// after expansion.
    pub coding_history: Option<CodingHistory>,

    /// Any other tags the file carries.
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

/// Coding history in its two lifecycle states.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CodingHistory {
    /// The flat string exactly as ffprobe reported it.
    Raw(String),
    /// Key/value entries after `expand_tags` restructured the string.
    Entries(BTreeMap<String, String>),
}

impl ProbeReport {
    /// Duration in seconds from the first duration-bearing stream, falling
    /// back to the format-level duration.
    pub fn duration_secs(&self) -> Option<f64> {
        self.streams
            .iter()
            .filter_map(|s| s.duration.as_deref())
            .chain(self.format.duration.as_deref())
            .find_map(|d| d.parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d >= 0.0)
    }

    /// Embedded `time_reference` in samples.
    ///
    /// An absent tag block, absent tag, or unparseable value all count as
    /// zero: a file without a timecode starts at midnight.
    pub fn initial_time_reference(&self) -> u64 {
        self.format
            .tags
            .as_ref()
            .and_then(|t| t.time_reference.as_deref())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}
