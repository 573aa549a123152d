#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use boxfit::{Config, Size, SplitConfig};
use image::{Rgb, RgbImage};

pub const CONTENT: [u8; 3] = [200, 30, 10];
pub const PAD: [u8; 3] = [114, 114, 114];

/// Writes a solid-colour image; the format follows the extension.
pub fn write_image(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(path)
        .expect("write image");
}

pub fn write_label(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write label");
}

pub fn read_label(path: &Path) -> String {
    fs::read_to_string(path).expect("read label")
}

pub fn image_dims(path: &Path) -> (u32, u32) {
    image::open(path).expect("open image").to_rgb8().dimensions()
}

/// A scaled-down 4:3 -> 1:1 config (64x48 into 64x64, 8 px top/bottom)
/// rooted at `root` with a single `train` split.
pub fn small_config(root: &Path) -> Config {
    Config {
        root: root.to_path_buf(),
        original_size: Size::new(64, 48),
        target_size: Size::new(64, 64),
        splits: vec![SplitConfig::conventional("train")],
        ..Default::default()
    }
}

pub fn train_image(root: &Path, name: &str) -> PathBuf {
    root.join("images/train").join(name)
}

pub fn train_label(root: &Path, stem: &str) -> PathBuf {
    root.join("labels/train").join(format!("{stem}.txt"))
}
