//! Error types for batch processing.
//!
//! `BatchError` aborts the whole run before any file is touched;
//! `FileError` is scoped to a single file's unit of work and never
//! stops the rest of the batch.

use std::path::PathBuf;

use thiserror::Error;

use crate::probe::ProbeError;
use crate::split::SplitError;
use crate::tools::ToolError;

/// Failure of one file's unit of work. Other files are unaffected.
#[derive(Debug, Error)]
pub enum FileError {
    /// Probing or probe-output parsing failed.
    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// A segment cut failed; remaining segments were abandoned.
    /// Segments already written stay on disk.
    #[error("segment {number} failed: {source}")]
    Segment {
        number: usize,
        #[source]
        source: SplitError,
    },

    /// Copying a small file failed.
    #[error("copy failed: {0}")]
    Copy(#[source] std::io::Error),
}

/// Top-level failures that abort the batch before any file runs.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Input directory is missing: fail fast.
    #[error("input directory does not exist: {0}")]
    InputDirMissing(PathBuf),

    /// Input directory exists but could not be read.
    #[error("failed to read input directory {path}: {source}")]
    ReadInputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External tool resolution failed.
    #[error(transparent)]
    Tools(#[from] ToolError),
}
