//! Letterboxing of image pixels.
//!
//! The image is resized with a bilinear filter by the uniform scale from
//! [`TransformParams`] and pasted onto a canvas of the target size filled with
//! a constant colour.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::error::BoxfitError;
use crate::geometry::{Size, TransformParams};

/// Fill colour used by the common YOLO training pipelines.
pub const DEFAULT_PADDING_COLOR: [u8; 3] = [114, 114, 114];

/// A padded image together with the geometry that produced it.
#[derive(Clone, Debug)]
pub struct Letterboxed {
    pub image: RgbImage,
    pub params: TransformParams,
}

/// Resizes `image` to fit inside `target` and pads the short axis with `fill`.
///
/// The returned image is always exactly `target`.
pub fn letterbox(
    image: &RgbImage,
    target: Size,
    fill: [u8; 3],
) -> Result<Letterboxed, BoxfitError> {
    let original = image_size(image);
    let params = TransformParams::compute(original, target).ok_or(BoxfitError::EmptyImage {
        size: original,
        target,
    })?;

    let resized = if params.resized_size == original {
        image.clone()
    } else {
        imageops::resize(
            image,
            params.resized_size.width,
            params.resized_size.height,
            FilterType::Triangle,
        )
    };

    if params.resized_size == target {
        return Ok(Letterboxed {
            image: resized,
            params,
        });
    }

    let mut canvas = RgbImage::from_pixel(target.width, target.height, Rgb(fill));
    imageops::replace(
        &mut canvas,
        &resized,
        params.left_pad as i64,
        params.top_pad as i64,
    );

    Ok(Letterboxed {
        image: canvas,
        params,
    })
}

/// Returns the dimensions of `image`.
pub fn image_size(image: &RgbImage) -> Size {
    let (width, height) = image.dimensions();
    Size::new(width, height)
}

/// Decodes the image at `path` into 8-bit RGB.
pub fn read_image(path: &Path) -> Result<RgbImage, BoxfitError> {
    let decoded = image::open(path).map_err(|source| BoxfitError::InvalidImage {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let rgb = decoded.to_rgb8();
    if image_size(&rgb).is_empty() {
        return Err(BoxfitError::InvalidImage {
            path: path.to_path_buf(),
            message: "image has no pixels".to_string(),
        });
    }

    Ok(rgb)
}

/// Encodes `image` to `path`, picking the format from the file extension.
pub fn write_image(path: &Path, image: &RgbImage) -> Result<(), BoxfitError> {
    image.save(path).map_err(|source| BoxfitError::ImageWrite {
        path: path.to_path_buf(),
        source,
    })
}
