//! Spiral geometry: the chain of Fibonacci quarter-circle arcs.

use std::f64::consts::FRAC_PI_2;

use glam::{DVec2, dvec2};

/// Every arc sweeps exactly one right angle.
pub const QUARTER_TURN: f64 = FRAC_PI_2;

/// One quarter-circle of the spiral, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub center: DVec2,
    pub radius: f64,
    /// Radians, counter-clockwise from +x.
    pub start_angle: f64,
}

impl Arc {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + QUARTER_TURN
    }

    /// Angle halfway through the sweep.
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + QUARTER_TURN * 0.5
    }

    /// Point on the circle at `theta`.
    pub fn point_at(&self, theta: f64) -> DVec2 {
        self.center + self.radius * dvec2(theta.cos(), theta.sin())
    }

    pub fn start_point(&self) -> DVec2 {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> DVec2 {
        self.point_at(self.end_angle())
    }

    /// `segments + 1` evenly spaced points from start to end, inclusive.
    pub fn sample(&self, segments: usize) -> impl Iterator<Item = DVec2> + '_ {
        let segments = segments.max(1);
        let (start, end) = (self.start_angle, self.end_angle());
        (0..=segments).map(move |s| {
            let theta = start + (end - start) * s as f64 / segments as f64;
            self.point_at(theta)
        })
    }

    /// Opposite corners (min, max) of the circumscribing square of the full circle.
    pub fn square(&self) -> (DVec2, DVec2) {
        let half = DVec2::splat(self.radius);
        (self.center - half, self.center + half)
    }
}

/// `fib[0..=n]` with `fib[0] = 0`, `fib[1] = 1`. Saturates at `u64::MAX` from `fib[94]` on.
pub fn fibonacci(n: usize) -> Vec<u64> {
    let mut fib = Vec::with_capacity(n + 1);
    fib.push(0u64);
    if n >= 1 {
        fib.push(1);
    }
    for i in 2..=n {
        let next = fib[i - 1].saturating_add(fib[i - 2]);
        fib.push(next);
    }
    fib
}

/// Build the ordered chain of `terms` arcs.
///
/// Arc `i` (1-based) has radius `fib[i]`. Each arc starts where the previous
/// one ended; the next center is pulled back from that endpoint by the next
/// radius along the end direction, so consecutive arcs are tangent.
///
/// `terms` is clamped to `[MIN_TERMS, MAX_TERMS]`, so every radius fits in a
/// `u64`. Use [`crate::clamp_terms`] to clamp (and log) request input.
pub fn build_arcs(terms: u32) -> Vec<Arc> {
    let terms = terms.clamp(crate::MIN_TERMS, crate::MAX_TERMS) as usize;
    let fib = fibonacci(terms + 1);

    let mut arcs = Vec::with_capacity(terms);
    let mut center = DVec2::ZERO;
    let mut angle = 0.0_f64;

    for i in 1..=terms {
        let radius = fib[i] as f64;
        let arc = Arc { center, radius, start_angle: angle };
        arcs.push(arc);

        let end = arc.end_angle();
        let dir = dvec2(end.cos(), end.sin());
        center = arc.end_point() - fib[i + 1] as f64 * dir;
        angle = end;
    }

    crate::log::debug!(terms, arcs = arcs.len(), "built spiral geometry");
    arcs
}
