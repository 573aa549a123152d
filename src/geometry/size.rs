//! Image dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width and height of an image in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `640x480`.
impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid width '{w}'"))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid height '{h}'"))?;

        if width == 0 || height == 0 {
            return Err(format!("size must be positive, got {width}x{height}"));
        }

        Ok(Size::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_width_by_height() {
        assert_eq!("640x480".parse::<Size>().unwrap(), Size::new(640, 480));
        assert_eq!(" 32X16 ".parse::<Size>().unwrap(), Size::new(32, 16));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!("640".parse::<Size>().is_err());
        assert!("640x".parse::<Size>().is_err());
        assert!("0x480".parse::<Size>().is_err());
        assert!("ax480".parse::<Size>().is_err());
    }

    #[test]
    fn displays_as_width_by_height() {
        assert_eq!(Size::new(640, 640).to_string(), "640x640");
    }
}
