//! Batch orchestration over an input directory.
//!
//! Scans for `.wav` files, copies the ones below the size threshold,
//! and drives the probe -> plan -> propagate -> cut pipeline for the
//! rest. Every file is an independent unit of work; failures stay
//! isolated to their file and are collected into the final report.

mod batch;
mod errors;
mod report;

pub use batch::{classify, run_batch, scan_input_dir, InputFile};
pub use errors::{BatchError, FileError};
pub use report::{BatchReport, FileOutcome};
