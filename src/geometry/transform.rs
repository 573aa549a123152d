//! Letterbox parameters: the uniform scale and padding that map an image of
//! one size into a target canvas without distorting its aspect ratio.

use serde::Serialize;

use super::{Coord, Pixel, Size};

/// Geometry of a single letterbox operation.
///
/// `scale = min(target_w / orig_w, target_h / orig_h)`. The resized image is
/// `round(orig * scale)` on each axis and the leftover space on each axis is
/// split with the floor half before the image (top/left) and the remainder
/// after it (bottom/right).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TransformParams {
    pub scale: f64,
    pub top_pad: u32,
    pub bottom_pad: u32,
    pub left_pad: u32,
    pub right_pad: u32,
    /// Size of the image content after resizing, before padding.
    pub resized_size: Size,
    /// Size the label coordinates are normalized against on input.
    pub original_size: Size,
    pub target_size: Size,
}

impl TransformParams {
    /// Computes the letterbox geometry for fitting `original` into `target`.
    ///
    /// Returns `None` if either size has a zero dimension.
    pub fn compute(original: Size, target: Size) -> Option<Self> {
        if original.is_empty() || target.is_empty() {
            return None;
        }

        let scale = f64::min(
            target.width as f64 / original.width as f64,
            target.height as f64 / original.height as f64,
        );

        let new_w = scaled_dimension(original.width, scale, target.width);
        let new_h = scaled_dimension(original.height, scale, target.height);

        let pad_w = target.width - new_w;
        let pad_h = target.height - new_h;
        let left_pad = pad_w / 2;
        let top_pad = pad_h / 2;

        Some(Self {
            scale,
            top_pad,
            bottom_pad: pad_h - top_pad,
            left_pad,
            right_pad: pad_w - left_pad,
            resized_size: Size::new(new_w, new_h),
            original_size: original,
            target_size: target,
        })
    }

    /// Returns a copy whose label frame is `original` instead of the size the
    /// scale was derived from.
    ///
    /// Label files are normalized against the configured capture size; the
    /// scale and padding always come from the pixels actually decoded.
    pub fn with_label_frame(self, original: Size) -> Self {
        Self {
            original_size: original,
            ..self
        }
    }

    /// Returns true if the operation is a pure copy (no resize, no padding).
    pub fn is_identity(&self) -> bool {
        self.resized_size == self.target_size && self.resized_size == self.original_size
    }

    /// Maps a pixel position in the original image to the padded image.
    #[inline]
    pub fn forward(&self, point: Coord<Pixel>) -> Coord<Pixel> {
        point
            .scaled(self.scale)
            .offset(self.left_pad as f64, self.top_pad as f64)
    }

    /// Maps a pixel position in the padded image back to the original image.
    #[inline]
    pub fn inverse(&self, point: Coord<Pixel>) -> Coord<Pixel> {
        point
            .offset(-(self.left_pad as f64), -(self.top_pad as f64))
            .scaled(1.0 / self.scale)
    }
}

fn scaled_dimension(original: u32, scale: f64, target: u32) -> u32 {
    let scaled = (original as f64 * scale).round() as u32;
    scaled.clamp(1, target)
}
