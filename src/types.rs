//! Small value types shared by the renderer: colors and world-space bounds.

use glam::{DVec2, dvec2};

/// RGBA color with 8-bit straight (non-premultiplied) components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Per-channel linear blend from `self` (t = 0) to `other` (t = 1).
    ///
    /// Channels are truncated toward zero after blending and the result is
    /// always opaque. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| {
            let (a, b) = (a as f64, b as f64);
            (a + (b - a) * t) as u8
        };
        Color::rgb(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Axis-aligned bounding box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldBounds {
    /// Box used when there is nothing to measure.
    pub const FALLBACK: WorldBounds = WorldBounds {
        min: DVec2::new(-10.0, -10.0),
        max: DVec2::new(10.0, 10.0),
    };

    /// Create an empty box (will expand on first point).
    pub fn new() -> Self {
        WorldBounds {
            min: dvec2(f64::INFINITY, f64::INFINITY),
            max: dvec2(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// True until the first point is added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand to include the axis-aligned square of half-side `half` around `center`.
    pub fn expand_square(&mut self, center: DVec2, half: f64) {
        self.expand_point(center - DVec2::splat(half));
        self.expand_point(center + DVec2::splat(half));
    }

    /// Grow symmetrically by `pad` on each side of each axis.
    pub fn padded(self, pad: DVec2) -> Self {
        WorldBounds {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}
