//! Integer geometry primitives used for sensor and ISP resolutions

use serde::{Deserialize, Serialize};

/// Alignment required by the BDS output line width.
pub const BDS_WIDTH_ALIGNMENT: u32 = 128;

/// Largest width or height the IPU3 parameter block can carry.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Round `x` up to the next multiple of 128, `None` if that overflows.
#[inline]
pub const fn align128(x: u32) -> Option<u32> {
    match x.checked_add(BDS_WIDTH_ALIGNMENT - 1) {
        Some(v) => Some(v & !(BDS_WIDTH_ALIGNMENT - 1)),
        None => None,
    }
}

/// Width/height pair in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when both dimensions fit inside `other`.
    pub fn fits_within(&self, other: &Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    /// True when either dimension is above `max`.
    pub fn exceeds(&self, max: u32) -> bool {
        self.width > max || self.height > max
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rectangle with a signed origin, as reported for sensor analog crops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
