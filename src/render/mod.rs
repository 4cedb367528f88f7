//! Raster rendering for Fibonacci spirals
//!
//! This module is organized into submodules:
//! - `geometry`: the chain of quarter-circle arcs
//! - `projection`: world bounds, the world-to-pixel transform and grid spacing
//! - `canvas`: the pixel buffer and its drawing primitives
//! - `text`: the embedded DejaVu Sans faces and glyph layout
//! - `scene`: layer-by-layer composition
//! - `defaults`: palette and layout constants

pub mod canvas;
pub mod defaults;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod text;

pub use canvas::Canvas;
pub use geometry::{Arc, build_arcs};
pub use projection::{Transform, compute_transform, nice_step};
pub use scene::{DRAW_ORDER, Layer, compose};

use crate::errors::RenderError;

/// Build, fit and paint a spiral of `terms` arcs on a `width` x `height` canvas.
///
/// `terms` outside `[MIN_TERMS, MAX_TERMS]` is clamped.
pub fn render(terms: u32, width: u32, height: u32) -> Result<Canvas, RenderError> {
    let arcs = build_arcs(terms);
    let (transform, bounds) = compute_transform(&arcs, width, height);
    let canvas = Canvas::new(width, height)?;
    compose(canvas, &arcs, &transform, &bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_term_counts_render() {
        let canvas = render(100, 50, 50).expect("render");
        assert_eq!((canvas.width(), canvas.height()), (50, 50));
        let clamped = render(crate::MAX_TERMS, 50, 50).expect("render");
        assert_eq!(canvas.encode_png().ok(), clamped.encode_png().ok());
    }

    #[test]
    fn zero_sized_canvas_is_an_error() {
        assert!(matches!(render(8, 0, 0), Err(RenderError::CanvasAlloc { .. })));
    }
}
