//! Drawing label overlays onto images.

use std::fs;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::annotation::{decode_lines, AnnotationLine};
use crate::dataset::ImageEntry;
use crate::error::BoxfitError;
use crate::geometry::Size;
use crate::letterbox::{image_size, read_image};

pub const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const KEYPOINT_COLOR: Rgb<u8> = Rgb([0, 255, 255]);
pub const BOX_THICKNESS: i64 = 2;
pub const KEYPOINT_RADIUS: i64 = 3;

/// Reads the usable lines of a label file. Malformed lines are skipped.
pub fn load_annotations(label: Option<&Path>) -> Result<Vec<AnnotationLine>, BoxfitError> {
    let Some(label) = label else {
        return Ok(Vec::new());
    };

    let content = fs::read(label).map_err(|source| BoxfitError::LabelRead {
        path: label.to_path_buf(),
        source,
    })?;
    Ok(decode_lines(&content)
        .filter_map(|line| line.and_then(AnnotationLine::parse).ok())
        .collect())
}

/// Loads `entry`, scales it to `frame` and draws its labels on top.
pub fn render_entry(entry: &ImageEntry, frame: Size) -> Result<RgbImage, BoxfitError> {
    let mut image = read_image(&entry.image)?;
    if image_size(&image) != frame {
        image = imageops::resize(&image, frame.width, frame.height, FilterType::Triangle);
    }

    let lines = load_annotations(entry.label.as_deref())?;
    draw_annotations(&mut image, &lines, frame);
    Ok(image)
}

/// Draws every box and keypoint in `lines`, denormalized against `frame`.
pub fn draw_annotations(image: &mut RgbImage, lines: &[AnnotationLine], frame: Size) {
    let fw = frame.width as f64;
    let fh = frame.height as f64;

    for line in lines {
        let cx = line.center.x * fw;
        let cy = line.center.y * fh;
        let w = line.width * fw;
        let h = line.height * fh;

        draw_rect_outline(
            image,
            (cx - w / 2.0).round() as i64,
            (cy - h / 2.0).round() as i64,
            (cx + w / 2.0).round() as i64,
            (cy + h / 2.0).round() as i64,
        );

        for kp in &line.keypoints {
            let px = kp.to_pixel(frame);
            fill_circle(image, px.x.round() as i64, px.y.round() as i64);
        }
    }
}

/// Outline with corners inclusive, grown inwards to [`BOX_THICKNESS`].
fn draw_rect_outline(image: &mut RgbImage, left: i64, top: i64, right: i64, bottom: i64) {
    for t in 0..BOX_THICKNESS {
        let (l, tp, r, b) = (left + t, top + t, right - t, bottom - t);
        if l > r || tp > b {
            break;
        }
        for x in l..=r {
            put(image, x, tp, BOX_COLOR);
            put(image, x, b, BOX_COLOR);
        }
        for y in tp..=b {
            put(image, l, y, BOX_COLOR);
            put(image, r, y, BOX_COLOR);
        }
    }
}

fn fill_circle(image: &mut RgbImage, cx: i64, cy: i64) {
    let r = KEYPOINT_RADIUS;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(image, cx + dx, cy + dy, KEYPOINT_COLOR);
            }
        }
    }
}

fn put(image: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    image.put_pixel(x as u32, y as u32, color);
}
