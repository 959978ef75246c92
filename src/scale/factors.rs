//! Screen resolutions and the scale factors derived from them.

use std::fmt;
use std::str::FromStr;

use super::ScaleError;

/// Reference resolution layouts are authored for.
pub const DEFAULT_SOURCE: Resolution = Resolution {
    width: 1920,
    height: 1080,
};

/// A screen size in pixels. Both dimensions are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self, ScaleError> {
        if width == 0 || height == 0 {
            return Err(ScaleError::InvalidDimensions(format!(
                "{width}x{height} (width and height must be positive)"
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `1366x768`.
impl FromStr for Resolution {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScaleError::InvalidDimensions(format!("`{s}` (expected WIDTHxHEIGHT)"));

        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Self::new(width, height)
    }
}

/// Per-axis multipliers, computed once per transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `target / source` on each axis.
    pub fn between(target: Resolution, source: Resolution) -> Self {
        Self {
            x: f64::from(target.width) / f64::from(source.width),
            y: f64::from(target.height) / f64::from(source.height),
        }
    }
}
