//! Metadata probing via ffprobe.
//!
//! Invokes ffprobe with JSON output for both the format and stream
//! sections, parses stdout into the typed report, and runs BWF tag
//! expansion before handing the result to the split pipeline.

use std::path::Path;
use std::process::Command;

use super::tags::expand_tags;
use super::types::{ProbeError, ProbeReport, ProbeResult};

/// Probe a media file and expand its BWF tags.
///
/// `ffprobe` is the resolved binary location; `path` the file to inspect.
/// A non-zero exit carries the captured stderr in the error so callers can
/// surface the tool's own diagnostic.
pub fn probe_file(ffprobe: &Path, path: &Path) -> ProbeResult<ProbeReport> {
    if !path.exists() {
        return Err(ProbeError::FileNotFound(path.to_path_buf()));
    }

    tracing::debug!("Probing file: {}", path.display());

    let output = Command::new(ffprobe)
        .args(["-output_format", "json", "-show_format", "-show_streams"])
        .arg(path)
        .output()
        .map_err(|e| ProbeError::Spawn {
            tool: "ffprobe".to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(ProbeError::Failed {
            tool: "ffprobe".to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let report = parse_report(&output.stdout)?;
    Ok(expand_tags(report))
}

/// Parse raw ffprobe stdout into the typed report.
///
/// Malformed output surfaces as `ProbeError::Parse` with the underlying
/// cause attached; it is never swallowed.
pub fn parse_report(bytes: &[u8]) -> ProbeResult<ProbeReport> {
    let report = serde_json::from_slice(bytes)?;
    Ok(report)
}
