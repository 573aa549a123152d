use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::Size;

/// The main error type for boxfit operations.
#[derive(Debug, Error)]
pub enum BoxfitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image {path}: {message}")]
    InvalidImage { path: PathBuf, message: String },

    #[error("Invalid image: cannot letterbox {size} into {target}")]
    EmptyImage { size: Size, target: Size },

    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read label file {path}: {source}")]
    LabelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write label file {path}: {source}")]
    LabelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image {path} shares label file {label} with {first}; leaving it untouched")]
    SharedLabel {
        path: PathBuf,
        label: PathBuf,
        first: PathBuf,
    },

    #[error("Failed to parse config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image {path} is {actual}, expected the configured original size {expected}")]
    SizeMismatch {
        path: PathBuf,
        expected: Size,
        actual: Size,
    },

    #[error("Failed to list directory {path}: {message}")]
    DirectoryWalk { path: PathBuf, message: String },

    #[error("Nothing to view: no images found in {path}")]
    EmptySplit { path: PathBuf },

    #[error("Batch finished with {failed} failed image(s)")]
    BatchFailed { failed: usize },

    #[error("Failed to serialize report: {0}")]
    ReportJson(#[from] serde_json::Error),
}

impl BoxfitError {
    /// Returns true for errors that only affect a single image/label pair.
    ///
    /// The batch runner records these and moves on to the next pair; any
    /// other error aborts the run.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            BoxfitError::InvalidImage { .. }
                | BoxfitError::EmptyImage { .. }
                | BoxfitError::SizeMismatch { .. }
                | BoxfitError::SharedLabel { .. }
        )
    }
}
