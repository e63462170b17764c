//! Color type with silently clamped channels.

use bytemuck::{Pod, Zeroable};

/// An RGBA color with each channel in `[0, 1]`.
///
/// Every constructor and setter clamps out-of-range input instead of
/// rejecting it, so callers never have to handle a color error.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA channels, clamping each to `[0, 1]`.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB channels.
    #[inline]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from 8-bit RGB channels.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Return this color with its alpha multiplied by `alpha` (clamped).
    ///
    /// Used by the draw pass to apply inherited region alpha.
    #[inline]
    pub fn with_alpha_scaled(self, alpha: f32) -> Self {
        Self {
            a: (self.a * alpha).clamp(0.0, 1.0),
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_clamped() {
        let c = Color::new(1.5, -0.5, 0.25, 2.0);
        assert_eq!(c, Color::new(1.0, 0.0, 0.25, 1.0));
    }

    #[test]
    fn test_alpha_scaling() {
        let c = Color::new(1.0, 1.0, 1.0, 0.5).with_alpha_scaled(0.5);
        assert_eq!(c.a, 0.25);
        assert_eq!(Color::WHITE.with_alpha_scaled(4.0).a, 1.0);
    }
}
