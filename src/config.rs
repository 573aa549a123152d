//! Run configuration.
//!
//! Everything the pipeline needs to know about the dataset lives here: the
//! capture size the labels are normalized against, the letterbox target, the
//! fill colour and the list of splits. A config can be loaded from YAML and is
//! then overridden field by field from the command line.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BoxfitError;
use crate::geometry::Size;
use crate::letterbox::DEFAULT_PADDING_COLOR;

pub const DEFAULT_ORIGINAL_SIZE: Size = Size::new(640, 480);
pub const DEFAULT_TARGET_SIZE: Size = Size::new(640, 640);
pub const DEFAULT_SPLITS: [&str; 2] = ["train", "val"];
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// A named pair of parallel image and label directories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitConfig {
    pub name: String,
    pub images: PathBuf,
    pub labels: PathBuf,
}

impl SplitConfig {
    /// The conventional `images/<name>` + `labels/<name>` layout.
    pub fn conventional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            images: Path::new("images").join(name),
            labels: Path::new("labels").join(name),
        }
    }
}

/// Configuration for a batch run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dataset root that relative split directories are resolved against.
    pub root: PathBuf,
    /// Size the source images were captured at; input labels are normalized
    /// against this.
    pub original_size: Size,
    pub target_size: Size,
    pub padding_color: [u8; 3],
    pub splits: Vec<SplitConfig>,
    /// Image file extensions to pick up, matched case-insensitively.
    pub extensions: Vec<String>,
    /// Write results under this directory instead of overwriting the inputs.
    pub output: Option<PathBuf>,
    /// Skip (and report) images whose size differs from `original_size`.
    pub strict_size: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            original_size: DEFAULT_ORIGINAL_SIZE,
            target_size: DEFAULT_TARGET_SIZE,
            padding_color: DEFAULT_PADDING_COLOR,
            splits: DEFAULT_SPLITS
                .iter()
                .map(|name| SplitConfig::conventional(name))
                .collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            output: None,
            strict_size: false,
        }
    }
}

impl Config {
    /// Loads a config from a YAML file. Missing fields take their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, BoxfitError> {
        let data = fs::read_to_string(path)?;
        serde_yaml::from_str(&data).map_err(|source| BoxfitError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), BoxfitError> {
        if self.original_size.is_empty() {
            return Err(BoxfitError::InvalidConfig(format!(
                "original_size must be positive, got {}",
                self.original_size
            )));
        }
        if self.target_size.is_empty() {
            return Err(BoxfitError::InvalidConfig(format!(
                "target_size must be positive, got {}",
                self.target_size
            )));
        }
        if self.splits.is_empty() {
            return Err(BoxfitError::InvalidConfig(
                "at least one split is required".to_string(),
            ));
        }
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(BoxfitError::InvalidConfig(
                "at least one image extension is required".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for split in &self.splits {
            if split.name.trim().is_empty() {
                return Err(BoxfitError::InvalidConfig(
                    "split names must not be empty".to_string(),
                ));
            }
            if !names.insert(split.name.as_str()) {
                return Err(BoxfitError::InvalidConfig(format!(
                    "duplicate split name '{}'",
                    split.name
                )));
            }
        }

        Ok(())
    }

    /// Source image and label directories of `split`.
    pub fn input_dirs(&self, split: &SplitConfig) -> (PathBuf, PathBuf) {
        (self.root.join(&split.images), self.root.join(&split.labels))
    }

    /// Where results for `split` are written: the inputs themselves, or
    /// `<output>/images/<name>` and `<output>/labels/<name>`.
    pub fn output_dirs(&self, split: &SplitConfig) -> (PathBuf, PathBuf) {
        match &self.output {
            Some(out) => (
                out.join("images").join(&split.name),
                out.join("labels").join(&split.name),
            ),
            None => self.input_dirs(split),
        }
    }

    /// Returns true if `path` has one of the configured image extensions.
    pub fn is_image(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed.trim_start_matches('.')))
    }
}
