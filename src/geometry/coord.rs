//! Points tagged with the coordinate space they live in.
//!
//! Label files store positions as fractions of the current image size, while
//! the letterbox math works on pixels. Tagging every point with a zero-sized
//! marker keeps the two from being mixed up: the only way across is through
//! [`Coord::to_pixel`] and [`Coord::to_normalized`], which take the image size
//! the conversion is relative to.

use std::fmt;
use std::marker::PhantomData;

use super::Size;

/// Marker for absolute pixel coordinates, origin at the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker for coordinates expressed as a fraction (0.0 to 1.0) of an image
/// dimension.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

/// A 2D point in the space given by `TSpace`.
#[derive(Clone, Copy, PartialEq)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Coord<TSpace> {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Coord<Normalized> {
    /// Converts to pixels relative to an image of `size`.
    #[inline]
    pub fn to_pixel(self, size: Size) -> Coord<Pixel> {
        Coord::new(self.x * size.width as f64, self.y * size.height as f64)
    }
}

impl Coord<Pixel> {
    /// Converts to fractions of an image of `size`.
    #[inline]
    pub fn to_normalized(self, size: Size) -> Coord<Normalized> {
        Coord::new(self.x / size.width as f64, self.y / size.height as f64)
    }

    /// Multiplies both components by `factor`.
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Coord::new(self.x * factor, self.y * factor)
    }

    /// Shifts the point by `(dx, dy)` pixels.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl<TSpace> fmt::Debug for Coord<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coord")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<TSpace> Default for Coord<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
