//! Geometry shared by the image and label sides of the pipeline.
//!
//! The letterbox operation is described once, by [`TransformParams`], and
//! applied twice: to pixels by [`crate::letterbox`] and to label coordinates
//! by [`crate::annotation`]. Keeping both on the same parameters is what keeps
//! boxes aligned with the content they describe.

mod coord;
mod size;
mod transform;

pub use coord::{Coord, Normalized, Pixel};
pub use size::Size;
pub use transform::TransformParams;
