//! Progress reporting hooks.
//!
//! The library never prints. Batch operations describe what they do
//! through a [`Reporter`]; front ends decide how to present it.

use crate::convert::Conversion;
use crate::error::Error;
use std::path::{Path, PathBuf};

/// Receives progress and per-job outcomes from batch operations.
///
/// All methods default to doing nothing.
pub trait Reporter {
    /// A file is about to be converted.
    fn processing(&mut self, _input: &Path) {}

    /// A file was converted.
    fn converted(&mut self, _conversion: &Conversion) {}

    /// A job failed; the batch continues with the next file.
    fn failed(&mut self, _path: &Path, _error: &Error) {}

    /// An archive is being extracted into `scratch`.
    fn extracting(&mut self, _archive: &Path, _scratch: &Path) {}

    /// Something went wrong that did not fail a job.
    fn warning(&mut self, _message: &str) {}
}

/// A reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Totals for a batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files converted successfully
    pub converted: usize,
    /// Jobs that failed (conversions and archive extractions)
    pub failed: usize,
    /// Zip archives passed over because archive processing was off
    pub skipped_archives: Vec<PathBuf>,
}

impl BatchSummary {
    /// Fold another summary into this one.
    pub fn merge(&mut self, other: BatchSummary) {
        self.converted += other.converted;
        self.failed += other.failed;
        self.skipped_archives.extend(other.skipped_archives);
    }

    /// True when no job failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
