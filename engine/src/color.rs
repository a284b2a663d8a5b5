//! 8-bit RGBA palette colors.
//!
//! Alpha is a binary transparency key, not a blend weight: zero means the
//! sample is a hole, anything else is fully opaque.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const BLACK: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }

    /// The binary transparency key: any alpha other than zero is opaque.
    #[inline]
    pub fn is_key_transparent(&self) -> bool {
        self.a == 0
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    fn from(rgba: (u8, u8, u8, u8)) -> Rgba {
        Rgba::new(rgba.0, rgba.1, rgba.2, rgba.3)
    }
}
