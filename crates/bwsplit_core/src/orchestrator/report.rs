//! Per-file outcomes collected across the batch.

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Copied verbatim (below the size threshold).
    Copied { file: String },

    /// Split into `segments` segment files.
    Split { file: String, segments: usize },

    /// Failed; the rendered error is kept for the summary.
    Failed { file: String, error: String },
}

/// Summary of a batch run.
///
/// Outcomes are recorded as units of work finish; the summary is only
/// reported once every unit has been joined, so counts never run ahead
/// of the copies.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Record one finished unit of work.
    pub fn record(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    /// All recorded outcomes.
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Number of files copied verbatim.
    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Copied { .. }))
    }

    /// Number of files split successfully.
    pub fn split(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Split { .. }))
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }

    /// Log the final counts plus one line per failed file.
    pub fn log_summary(&self) {
        tracing::info!(
            "Batch complete: {} copied, {} split, {} failed",
            self.copied(),
            self.split(),
            self.failed()
        );

        for outcome in &self.outcomes {
            if let FileOutcome::Failed { file, error } = outcome {
                tracing::error!("{}: {}", file, error);
            }
        }
    }
}
