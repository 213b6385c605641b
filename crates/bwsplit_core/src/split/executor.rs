//! Segment cutting via ffmpeg stream copy.
//!
//! Each planned segment becomes one ffmpeg invocation that copies the
//! stream without re-encoding, passes the source metadata through, and
//! stamps the propagated timecode into the output's BWF extension chunk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use super::planner::Segment;
use super::timecode::SegmentTimecode;

/// Error type for segment execution.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The cut tool could not be started.
    #[error("failed to run {tool}: {message}")]
    Spawn { tool: String, message: String },

    /// The cut tool ran and exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },
}

/// Everything needed to cut one segment out of a source file.
#[derive(Debug, Clone)]
pub struct CutRequest<'a> {
    /// Source file being split.
    pub input: &'a Path,
    /// Destination segment file.
    pub output: PathBuf,
    /// Planned cut range.
    pub segment: &'a Segment,
    /// Timecode stamped into the segment's `time_reference`.
    pub timecode: SegmentTimecode,
    /// `encoded_by` override, sourced from the expanded `sTRK1` attribute.
    pub encoded_by: Option<&'a str>,
    /// `sSPEED` override, sourced from the expanded `sSPEED` attribute.
    pub speed: Option<&'a str>,
}

/// Output name for a segment: `{base}_{number}{extension}`, 1-indexed.
pub fn segment_file_name(source: &Path, number: usize) -> String {
    let base = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{}_{}{}", base, number, extension)
}

/// Build the ffmpeg argument vector for one segment cut.
///
/// The cut is a pure stream copy (`-c copy`) with source metadata passed
/// through (`-map_metadata 0`); `time_reference` is overridden with the
/// propagated timecode, the `encoded_by` and `sSPEED` tags are overridden
/// when the source carried the matching attributes, and `-write_bext 1`
/// keeps the broadcast-wave extension chunk in the output.
pub fn cut_args(request: &CutRequest<'_>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-ss".into(),
        request.segment.start_secs.to_string().into(),
        "-to".into(),
        request.segment.end_secs.to_string().into(),
        "-i".into(),
        request.input.as_os_str().to_os_string(),
        "-c".into(),
        "copy".into(),
        "-map_metadata".into(),
        "0".into(),
        "-metadata".into(),
        format!("time_reference={}", request.timecode.samples).into(),
    ];

    if let Some(encoded_by) = request.encoded_by {
        args.push("-metadata".into());
        args.push(format!("encoded_by={}", encoded_by).into());
    }
    if let Some(speed) = request.speed {
        args.push("-metadata".into());
        args.push(format!("sSPEED={}", speed).into());
    }

    args.push("-write_bext".into());
    args.push("1".into());
    args.push("-y".into());
    args.push(request.output.as_os_str().to_os_string());
    args
}

/// Cut one segment by running ffmpeg and checking its exit status.
pub fn cut_segment(ffmpeg: &Path, request: &CutRequest<'_>) -> Result<(), SplitError> {
    let args = cut_args(request);

    tracing::debug!(
        "Running: {} {}",
        ffmpeg.display(),
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let output = Command::new(ffmpeg)
        .args(&args)
        .output()
        .map_err(|e| SplitError::Spawn {
            tool: "ffmpeg".to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(SplitError::CommandFailed {
            tool: "ffmpeg".to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}
