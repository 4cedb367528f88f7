//! World bounds and the world-to-pixel transform.
//!
//! World space is y-up; pixel space is y-down. Everything drawn goes through
//! [`Transform::to_px`], which applies one uniform scale and the flip.

use glam::{DVec2, dvec2};

use super::defaults;
use super::geometry::Arc;
use crate::types::WorldBounds;

/// Uniform-scale, y-flipped affine map from world units to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Pixels per world unit, identical for both axes.
    pub scale: f64,
    pub translate: DVec2,
}

impl Transform {
    pub fn to_px(&self, p: DVec2) -> DVec2 {
        dvec2(
            self.translate.x + p.x * self.scale,
            self.translate.y - p.y * self.scale,
        )
    }

    /// Length in world units to length in pixels.
    pub fn len_px(&self, len: f64) -> f64 {
        len * self.scale
    }

    /// Inverse of [`Transform::to_px`].
    pub fn to_world(&self, px: DVec2) -> DVec2 {
        dvec2(
            (px.x - self.translate.x) / self.scale,
            (self.translate.y - px.y) / self.scale,
        )
    }
}

/// Number of segments sampled along an arc when measuring its extent.
pub fn bounds_samples(radius: f64) -> usize {
    let extra = (radius * defaults::BOUNDS_SAMPLES_PER_UNIT).round() as usize;
    extra
        .saturating_add(defaults::BOUNDS_MIN_SAMPLES)
        .min(defaults::BOUNDS_MAX_SAMPLES)
}

/// Tight world-space box around every arc curve and its circumscribing square.
///
/// Returns [`WorldBounds::FALLBACK`] when there are no arcs.
pub fn arc_bounds(arcs: &[Arc]) -> WorldBounds {
    let mut bounds = WorldBounds::new();
    for arc in arcs {
        for p in arc.sample(bounds_samples(arc.radius)) {
            bounds.expand_point(p);
        }
    }
    // The labelled squares must stay on-screen too.
    for arc in arcs {
        bounds.expand_square(arc.center, arc.radius);
    }
    if bounds.is_empty() || !bounds.is_finite() {
        return WorldBounds::FALLBACK;
    }
    bounds
}

/// Fit `arcs` into a `canvas_w` x `canvas_h` canvas.
///
/// The tight bounds are padded by 8% of each extent plus one world unit, then
/// scaled uniformly so the drawing fills at most 88% of the width and 78% of
/// the height, centered on the canvas.
pub fn compute_transform(arcs: &[Arc], canvas_w: u32, canvas_h: u32) -> (Transform, WorldBounds) {
    let tight = arc_bounds(arcs);
    let pad = dvec2(
        tight.width() * defaults::BOUNDS_PAD_RATIO + defaults::BOUNDS_PAD_UNITS,
        tight.height() * defaults::BOUNDS_PAD_RATIO + defaults::BOUNDS_PAD_UNITS,
    );
    let bounds = tight.padded(pad);

    let (w, h) = (canvas_w as f64, canvas_h as f64);
    // Padding guarantees both extents are at least 2 * BOUNDS_PAD_UNITS.
    let (world_w, world_h) = (bounds.width(), bounds.height());
    let scale = (w * defaults::FIT_WIDTH / world_w).min(h * defaults::FIT_HEIGHT / world_h);

    let translate = dvec2(
        w * 0.5 - (bounds.min.x + world_w * 0.5) * scale,
        h * 0.5 + (bounds.min.y + world_h * 0.5) * scale,
    );

    crate::log::debug!(
        scale,
        min_x = bounds.min.x,
        max_x = bounds.max.x,
        min_y = bounds.min.y,
        max_y = bounds.max.y,
        "computed projection"
    );
    (Transform { scale, translate }, bounds)
}

/// Snap an approximate step to 1, 2, 5 or 10 times a power of ten.
///
/// Non-positive (and non-finite) input returns 1.
pub fn nice_step(approx: f64) -> f64 {
    if !approx.is_finite() || approx <= 0.0 {
        return 1.0;
    }
    let exp = 10f64.powf(approx.log10().floor());
    let m = approx / exp;
    let step = if m < 1.5 {
        1.0
    } else if m < 3.5 {
        2.0
    } else if m < 7.5 {
        5.0
    } else {
        10.0
    };
    step * exp
}

/// Gridline spacing in world units for a given pixels-per-unit scale.
pub fn grid_step(scale: f64) -> f64 {
    nice_step(defaults::GRID_TARGET_PX / scale)
}

/// Multiples of `step` starting at the first one at or below `min`, up to `max`.
pub fn grid_positions(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let first = (min / step).floor();
    (0..)
        .map(|k| (first + k as f64) * step)
        .take_while(|v| *v <= max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::geometry::build_arcs;

    #[test]
    fn empty_arcs_use_fallback_box() {
        assert_eq!(arc_bounds(&[]), WorldBounds::FALLBACK);

        let (t, b) = compute_transform(&[], 600, 600);
        // 20 * 0.08 + 1 = 2.6 on every side
        assert!((b.min.x + 12.6).abs() < 1e-9);
        assert!((b.max.x - 12.6).abs() < 1e-9);
        assert!((b.min.y + 12.6).abs() < 1e-9);
        assert!((b.max.y - 12.6).abs() < 1e-9);
        assert!(t.scale.is_finite() && t.scale > 0.0);
        // World origin lands in the canvas center.
        let origin = t.to_px(DVec2::ZERO);
        assert!((origin - dvec2(300.0, 300.0)).length() < 1e-9);
    }

    #[test]
    fn single_arc_bounds() {
        let arcs = build_arcs(1);
        let tight = arc_bounds(&arcs);
        assert_eq!(tight.min, dvec2(-1.0, -1.0));
        assert_eq!(tight.max, dvec2(1.0, 1.0));

        let (t, b) = compute_transform(&arcs, 600, 600);
        // 2 * 0.08 + 1 = 1.16
        assert!((b.max.x - 2.16).abs() < 1e-9);
        // Height is the tighter fit: 600 * 0.78 / 4.32
        assert!((t.scale - 468.0 / 4.32).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_every_square() {
        let arcs = build_arcs(12);
        let b = arc_bounds(&arcs);
        for arc in &arcs {
            let (lo, hi) = arc.square();
            assert!(b.contains(lo) && b.contains(hi));
        }
    }

    #[test]
    fn drawing_fits_inside_canvas() {
        for terms in [1, 2, 8, 25, 40] {
            let arcs = build_arcs(terms);
            let (t, b) = compute_transform(&arcs, 600, 600);
            let lo = t.to_px(dvec2(b.min.x, b.max.y));
            let hi = t.to_px(dvec2(b.max.x, b.min.y));
            assert!(lo.x >= -1e-6 && lo.y >= -1e-6, "terms={terms} lo={lo:?}");
            assert!(hi.x <= 600.0 + 1e-6 && hi.y <= 600.0 + 1e-6, "terms={terms} hi={hi:?}");
            assert!((hi.x - lo.x) <= 600.0 * 0.88 + 1e-6);
            assert!((hi.y - lo.y) <= 600.0 * 0.78 + 1e-6);
        }
    }

    #[test]
    fn projection_flips_y() {
        let t = Transform { scale: 10.0, translate: dvec2(100.0, 200.0) };
        assert_eq!(t.to_px(dvec2(1.0, 1.0)), dvec2(110.0, 190.0));
        assert_eq!(t.to_px(dvec2(-2.0, -3.0)), dvec2(80.0, 230.0));
        assert_eq!(t.to_world(dvec2(110.0, 190.0)), dvec2(1.0, 1.0));
        assert_eq!(t.len_px(2.5), 25.0);
    }

    #[test]
    fn sample_count_grows_with_radius_then_caps() {
        assert_eq!(bounds_samples(0.0), 36);
        assert_eq!(bounds_samples(1.0), 42);
        assert_eq!(bounds_samples(21.0), 162);
        assert_eq!(bounds_samples(102_334_155.0), defaults::BOUNDS_MAX_SAMPLES);
    }

    #[test]
    fn nice_step_snaps() {
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(1.4), 1.0);
        assert_eq!(nice_step(1.6), 2.0);
        assert_eq!(nice_step(3.0), 2.0);
        assert_eq!(nice_step(4.0), 5.0);
        assert_eq!(nice_step(8.0), 10.0);
        assert_eq!(nice_step(42.0), 50.0);
        assert!((nice_step(0.74) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn nice_step_guards_domain() {
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(-3.0), 1.0);
        assert_eq!(nice_step(f64::NAN), 1.0);
        assert_eq!(nice_step(f64::INFINITY), 1.0);
    }

    #[test]
    fn nice_step_is_monotonic_and_125() {
        let mut prev = 0.0;
        let mut x = 1e-3;
        while x < 1e6 {
            let step = nice_step(x);
            assert!(step >= prev, "nice_step({x}) = {step} < {prev}");
            let exp = 10f64.powf(step.log10().floor());
            let mantissa = (step / exp * 1e6).round() / 1e6;
            assert!(
                [1.0, 2.0, 5.0, 10.0].contains(&mantissa),
                "nice_step({x}) = {step} has mantissa {mantissa}"
            );
            prev = step;
            x *= 1.07;
        }
    }

    #[test]
    fn grid_positions_cover_range() {
        assert_eq!(grid_positions(-2.16, 2.16, 0.5), vec![-2.5, -2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(grid_positions(0.0, 10.0, 5.0), vec![0.0, 5.0, 10.0]);
        assert!(grid_positions(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn grid_step_targets_80px() {
        // 10 px per unit -> 8 units -> 10
        assert_eq!(grid_step(10.0), 10.0);
        // 40 px per unit -> 2 units -> 2
        assert_eq!(grid_step(40.0), 2.0);
    }
}
