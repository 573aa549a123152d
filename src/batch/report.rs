//! Batch run report types.
//!
//! Mirrors what happened to every split so the CLI can print a summary or
//! emit it as JSON for scripting.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Counts and failures for one split.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SplitReport {
    pub name: String,
    /// Images letterboxed and written, together with their labels.
    pub processed: usize,
    /// Images left untouched because they have no label file.
    pub skipped_unlabeled: usize,
    /// Label lines remapped and written back.
    pub lines_kept: usize,
    /// Non-blank label lines dropped as malformed.
    pub lines_rejected: usize,
    /// Images that could not be processed; the run moved on past them.
    pub failures: Vec<ItemFailure>,
}

impl SplitReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// An image that failed on its own without aborting the run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemFailure {
    pub image: PathBuf,
    pub message: String,
}

/// Report for a whole run across every configured split.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub splits: Vec<SplitReport>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.splits.iter().map(|s| s.processed).sum()
    }

    pub fn skipped_unlabeled(&self) -> usize {
        self.splits.iter().map(|s| s.skipped_unlabeled).sum()
    }

    pub fn lines_rejected(&self) -> usize {
        self.splits.iter().map(|s| s.lines_rejected).sum()
    }

    pub fn failed(&self) -> usize {
        self.splits.iter().map(|s| s.failures.len()).sum()
    }

    /// Returns true if no image failed.
    pub fn is_ok(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for split in &self.splits {
            writeln!(
                f,
                "{}: {} processed, {} skipped (no labels), {} failed",
                split.name,
                split.processed,
                split.skipped_unlabeled,
                split.failures.len()
            )?;
            writeln!(
                f,
                "  label lines: {} kept, {} dropped",
                split.lines_kept, split.lines_rejected
            )?;
            for failure in &split.failures {
                writeln!(f, "  - {}: {}", failure.image.display(), failure.message)?;
            }
        }
        writeln!(
            f,
            "Total: {} processed, {} skipped, {} failed",
            self.processed(),
            self.skipped_unlabeled(),
            self.failed()
        )
    }
}
