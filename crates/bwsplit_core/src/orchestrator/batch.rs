//! Batch driver: scan, classify, copy, and split.
//!
//! Small files copy and large files split concurrently, one thread per
//! file. Segments inside one file run strictly in index order because
//! each segment's timecode depends on the previous one. The whole task
//! group is joined before the report is returned.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use parking_lot::Mutex;

use crate::config::Settings;
use crate::probe::{probe_file, ProbeError};
use crate::split::{
    cut_segment, format_hms, plan_segments, propagate, segment_file_name, CutRequest,
};
use crate::tools::Tools;

use super::errors::{BatchError, FileError};
use super::report::{BatchReport, FileOutcome};

/// A scanned input file with its size.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Scan the input directory for `.wav` files (non-recursive).
///
/// Subdirectories and files with any other extension are skipped. The
/// extension match is case-sensitive: `.WAV` does not qualify.
pub fn scan_input_dir(dir: &Path) -> Result<Vec<InputFile>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::InputDirMissing(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| BatchError::ReadInputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BatchError::ReadInputDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry {}: {}", path.display(), e);
                continue;
            }
        };
        if metadata.is_dir() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("wav") {
            continue;
        }

        files.push(InputFile {
            path,
            size: metadata.len(),
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Partition scanned files at the size threshold into (large, small).
pub fn classify(files: Vec<InputFile>, threshold: u64) -> (Vec<InputFile>, Vec<InputFile>) {
    files.into_iter().partition(|f| f.size >= threshold)
}

/// Run the full batch: copy small files, split large ones, report.
///
/// Tool locations are resolved before the first split; a copy-only batch
/// never needs the external tools at all. Per-file failures land in the
/// report, top-level failures (missing input directory, unusable tools)
/// abort the run.
pub fn run_batch(
    settings: &Settings,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport, BatchError> {
    let files = scan_input_dir(input_dir)?;

    tracing::info!("Found {} file(s) in {}", files.len(), input_dir.display());
    for file in &files {
        tracing::info!("+ {}", file.path.display());
    }

    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|source| BatchError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        tracing::info!("Created output directory: {}", output_dir.display());
    }

    let (large, small) = classify(files, settings.split.size_threshold_bytes);
    tracing::info!(
        "Found {} large file(s) to process, copying {} without processing",
        large.len(),
        small.len()
    );

    let tools = if large.is_empty() {
        None
    } else {
        Some(Tools::resolve(&settings.tools)?)
    };

    let report = Mutex::new(BatchReport::default());

    thread::scope(|scope| {
        for file in &small {
            let report = &report;
            scope.spawn(move || {
                let outcome = copy_file(&file.path, output_dir);
                report.lock().record(outcome);
            });
        }

        if let Some(tools) = &tools {
            for file in &large {
                let report = &report;
                scope.spawn(move || {
                    let outcome = split_file(tools, settings, &file.path, output_dir);
                    report.lock().record(outcome);
                });
            }
        }
    });

    Ok(report.into_inner())
}

/// Copy one small file verbatim into the output directory.
///
/// A failed copy is logged and recorded; it never aborts the batch.
fn copy_file(path: &Path, output_dir: &Path) -> FileOutcome {
    let name = file_display_name(path);
    let Some(file_name) = path.file_name() else {
        return FileOutcome::Failed {
            file: name,
            error: "file has no name".to_string(),
        };
    };
    let dest = output_dir.join(file_name);

    match fs::copy(path, &dest) {
        Ok(_) => {
            tracing::info!("Copied {} -> {}", path.display(), dest.display());
            FileOutcome::Copied { file: name }
        }
        Err(e) => {
            let error = FileError::Copy(e);
            tracing::error!("Error while copying {}: {}", name, error);
            FileOutcome::Failed {
                file: name,
                error: error.to_string(),
            }
        }
    }
}

/// Probe, plan, and cut one large file.
fn split_file(tools: &Tools, settings: &Settings, path: &Path, output_dir: &Path) -> FileOutcome {
    let name = file_display_name(path);
    tracing::info!("Processing: {}", name);

    match split_file_inner(tools, settings, path, output_dir) {
        Ok(segments) => {
            tracing::info!("Split {} into {} segment(s)", name, segments);
            FileOutcome::Split {
                file: name,
                segments,
            }
        }
        Err(e) => {
            tracing::error!("Error processing {}: {}", name, e);
            FileOutcome::Failed {
                file: name,
                error: e.to_string(),
            }
        }
    }
}

fn split_file_inner(
    tools: &Tools,
    settings: &Settings,
    path: &Path,
    output_dir: &Path,
) -> Result<usize, FileError> {
    let report = probe_file(&tools.ffprobe, path)?;

    let duration = report
        .duration_secs()
        .ok_or_else(|| ProbeError::MissingDuration(path.to_path_buf()))?;

    let max_segment_secs = settings.split.max_segment_secs;
    let segments = plan_segments(duration, max_segment_secs);
    let initial = report.initial_time_reference();

    tracing::info!("File duration: {} sec", duration);
    tracing::info!("Max segment duration: {} sec", max_segment_secs);
    tracing::info!(
        "Splitting into {} segment(s), starting from time_reference {}",
        segments.len(),
        initial
    );

    let timecodes = propagate(initial, max_segment_secs, segments.len());

    let encoded_by = report.format.attributes.get("sTRK1").map(String::as_str);
    let speed = report.format.attributes.get("sSPEED").map(String::as_str);

    for (segment, timecode) in segments.iter().zip(&timecodes) {
        if timecode.wrapped {
            tracing::warn!(
                "Time reference wrapped around 24 hours at segment {}",
                segment.number
            );
        }
        tracing::info!(
            "Segment {} timecode: {}",
            segment.number,
            format_hms(timecode.samples)
        );

        let output = output_dir.join(segment_file_name(path, segment.number));
        tracing::info!("Creating segment {}: {}", segment.number, output.display());

        let request = CutRequest {
            input: path,
            output,
            segment,
            timecode: *timecode,
            encoded_by,
            speed,
        };
        cut_segment(&tools.ffmpeg, &request).map_err(|source| FileError::Segment {
            number: segment.number,
            source,
        })?;
    }

    Ok(segments.len())
}

fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn scan_rejects_missing_directory() {
        let result = scan_input_dir(Path::new("/nonexistent/input"));
        assert!(matches!(result, Err(BatchError::InputDirMissing(_))));
    }

    #[test]
    fn scan_filters_by_extension_case_sensitively() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "take.wav", b"a");
        touch(dir.path(), "upper.WAV", b"b");
        touch(dir.path(), "notes.txt", b"c");
        touch(dir.path(), "noext", b"d");
        fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let files = scan_input_dir(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("take.wav"));
    }

    #[test]
    fn scan_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("more");
        fs::create_dir(&sub).unwrap();
        touch(&sub, "inner.wav", b"inner");
        touch(dir.path(), "outer.wav", b"outer");

        let files = scan_input_dir(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("outer.wav"));
    }

    #[test]
    fn classify_splits_at_threshold() {
        let files = vec![
            InputFile {
                path: PathBuf::from("small.wav"),
                size: 99,
            },
            InputFile {
                path: PathBuf::from("exact.wav"),
                size: 100,
            },
            InputFile {
                path: PathBuf::from("big.wav"),
                size: 101,
            },
        ];

        let (large, small) = classify(files, 100);
        assert_eq!(small.len(), 1);
        assert!(small[0].path.ends_with("small.wav"));
        assert_eq!(large.len(), 2);
    }

    #[test]
    fn copy_preserves_name_and_bytes() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let content = b"RIFF....WAVEfmt ";
        let source = touch(input.path(), "session.wav", content);

        let outcome = copy_file(&source, output.path());
        assert!(matches!(outcome, FileOutcome::Copied { .. }));

        let copied = fs::read(output.path().join("session.wav")).unwrap();
        assert_eq!(copied, content);
    }

    #[test]
    fn copy_failure_is_recorded_not_fatal() {
        let output = tempfile::tempdir().unwrap();
        let outcome = copy_file(Path::new("/nonexistent/take.wav"), output.path());
        assert!(matches!(outcome, FileOutcome::Failed { .. }));
    }

    #[test]
    fn copy_only_batch_completes_and_reports() {
        let input = tempfile::tempdir().unwrap();
        let output_root = tempfile::tempdir().unwrap();
        let output = output_root.path().join("out");

        touch(input.path(), "one.wav", b"one");
        touch(input.path(), "two.wav", b"two");
        touch(input.path(), "skip.txt", b"skip");

        // Default threshold dwarfs the fixtures, so nothing splits and no
        // external tool is needed.
        let settings = Settings::default();
        let report = run_batch(&settings, input.path(), &output).unwrap();

        assert_eq!(report.copied(), 2);
        assert_eq!(report.split(), 0);
        assert_eq!(report.failed(), 0);
        assert!(output.join("one.wav").is_file());
        assert!(output.join("two.wav").is_file());
    }
}
