//! Discovery of image/label pairs in a split.
//!
//! Images live directly inside the image directory (no recursion); the label
//! for `name.ext` is `name.txt` in the label directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::BoxfitError;

pub const LABEL_EXTENSION: &str = "txt";

/// An image file and its label file, if one exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    /// File name without extension; shared by the image and its label.
    pub stem: String,
    pub image: PathBuf,
    pub label: Option<PathBuf>,
    /// An earlier image with the same stem (`a.jpg` before `a.png`) that
    /// already pairs with `label`.
    pub shares_label_with: Option<PathBuf>,
}

impl ImageEntry {
    /// Returns the image file name (with extension).
    pub fn file_name(&self) -> String {
        self.image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.stem.clone())
    }
}

/// Lists images in `images_dir` accepted by `is_image`, sorted by file name,
/// each paired with its label in `labels_dir`.
///
/// Only the first image of a stem owns the label; later ones point back at
/// it through [`ImageEntry::shares_label_with`].
pub fn discover(
    images_dir: &Path,
    labels_dir: &Path,
    is_image: impl Fn(&Path) -> bool,
) -> Result<Vec<ImageEntry>, BoxfitError> {
    let mut entries = Vec::new();
    let mut first_by_stem: HashMap<String, PathBuf> = HashMap::new();

    for entry in WalkDir::new(images_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| BoxfitError::DirectoryWalk {
            path: images_dir.to_path_buf(),
            message: source.to_string(),
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !is_image(path) {
            continue;
        }

        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        let shares_label_with = match first_by_stem.get(&stem) {
            Some(first) => Some(first.clone()),
            None => {
                first_by_stem.insert(stem.clone(), path.to_path_buf());
                None
            }
        };

        let label = label_path(labels_dir, &stem);
        entries.push(ImageEntry {
            label: label.is_file().then_some(label),
            stem,
            image: path.to_path_buf(),
            shares_label_with,
        });
    }

    Ok(entries)
}

/// Path of the label file for an image with file stem `stem`.
pub fn label_path(labels_dir: &Path, stem: &str) -> PathBuf {
    labels_dir.join(format!("{stem}.{LABEL_EXTENSION}"))
}
