//! Co-transforming label coordinates through a letterbox.

use super::{AnnotationLine, Rejected};
use crate::geometry::{Coord, Normalized, TransformParams};

impl AnnotationLine {
    /// Maps this line from the original image frame into the padded frame.
    ///
    /// Positions (the box center and every keypoint) are denormalized against
    /// `params.original_size`, scaled, shifted by the padding on their axis
    /// and renormalized against `params.target_size`. Box width and height
    /// are scaled and renormalized but never shifted.
    pub fn remap(&self, params: &TransformParams) -> AnnotationLine {
        let original = params.original_size;
        let target = params.target_size;

        let width = self.width * original.width as f64 * params.scale / target.width as f64;
        let height = self.height * original.height as f64 * params.scale / target.height as f64;

        AnnotationLine {
            class: self.class.clone(),
            center: remap_point(self.center, params),
            width,
            height,
            keypoints: self
                .keypoints
                .iter()
                .map(|kp| remap_point(*kp, params))
                .collect(),
        }
    }
}

fn remap_point(point: Coord<Normalized>, params: &TransformParams) -> Coord<Normalized> {
    params
        .forward(point.to_pixel(params.original_size))
        .to_normalized(params.target_size)
}

/// Parses, remaps and re-serializes one raw label line.
///
/// Returns [`Rejected`] for lines that must not be written back.
pub fn remap_line(line: &str, params: &TransformParams) -> Result<String, Rejected> {
    let parsed = AnnotationLine::parse(line)?;
    Ok(parsed.remap(params).to_string())
}
