//! Label viewer.
//!
//! Reads letterboxed output back and draws it, as a visual check that boxes
//! and keypoints still sit on the objects they describe. Browsing state is a
//! plain [`Navigator`] so any front end can drive it; the CLI renders a single
//! item to a file.

mod render;

pub use render::{draw_annotations, load_annotations, render_entry};

use std::path::Path;

use crate::config::Config;
use crate::dataset::{self, ImageEntry};
use crate::error::BoxfitError;

/// A cursor over a non-empty list that wraps around at both ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigator<T> {
    items: Vec<T>,
    position: usize,
}

impl<T> Navigator<T> {
    /// Returns `None` for an empty list.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items, position: 0 })
        }
    }

    pub fn current(&self) -> &T {
        &self.items[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &T {
        self.position = (self.position + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> &T {
        self.position = (self.position + self.items.len() - 1) % self.items.len();
        self.current()
    }

    /// Jumps to `index`, wrapping past the end.
    pub fn seek(&mut self, index: usize) -> &T {
        self.position = index % self.items.len();
        self.current()
    }
}

impl Navigator<ImageEntry> {
    /// Browses every image of a split, labelled or not.
    pub fn for_split(
        images_dir: &Path,
        labels_dir: &Path,
        config: &Config,
    ) -> Result<Self, BoxfitError> {
        let entries = dataset::discover(images_dir, labels_dir, |path| config.is_image(path))?;
        Navigator::new(entries).ok_or_else(|| BoxfitError::EmptySplit {
            path: images_dir.to_path_buf(),
        })
    }

    /// Window title in the form `3/10 - name.png`.
    pub fn title(&self) -> String {
        format!(
            "{}/{} - {}",
            self.position + 1,
            self.len(),
            self.current().file_name()
        )
    }
}
