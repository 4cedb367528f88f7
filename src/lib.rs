//! Fibonacci spiral renderer.
//!
//! Builds a chain of quarter-circle arcs whose radii follow the Fibonacci
//! sequence, fits it to a square canvas and paints it with a grid, axes,
//! labelled radius squares, a title and a legend.
//!
//! ```no_run
//! let params = fibspiral::SpiralParams::new(8, 600)?;
//! let png = fibspiral::render_spiral_png(&params)?;
//! # Ok::<(), fibspiral::RenderError>(())
//! ```

pub mod errors;
pub mod log;
pub mod render;
pub mod types;

pub use errors::RenderError;
pub use render::Canvas;
pub use types::{Color, WorldBounds};

pub const MIN_TERMS: u32 = 1;
pub const MAX_TERMS: u32 = 40;
pub const DEFAULT_TERMS: u32 = 8;

pub const MIN_SIZE: u32 = 1;
pub const MAX_SIZE: u32 = 4096;
pub const DEFAULT_SIZE: u32 = 600;

/// Clamp a requested term count into `[MIN_TERMS, MAX_TERMS]`.
pub fn clamp_terms(terms: i64) -> u32 {
    let clamped = terms.clamp(MIN_TERMS as i64, MAX_TERMS as i64) as u32;
    if clamped as i64 != terms {
        log::warn!(requested = terms, clamped, "term count out of range");
    }
    clamped
}

/// What to draw: how many arcs, on how large a square canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpiralParams {
    pub terms: u32,
    /// Width and height in pixels.
    pub size: u32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        SpiralParams {
            terms: DEFAULT_TERMS,
            size: DEFAULT_SIZE,
        }
    }
}

impl SpiralParams {
    /// Clamp `terms` and validate `size`.
    ///
    /// Out-of-range term counts are pulled into range; an out-of-range size is
    /// refused with [`RenderError::InvalidSize`].
    pub fn new(terms: i64, size: i64) -> Result<Self, RenderError> {
        if size < MIN_SIZE as i64 || size > MAX_SIZE as i64 {
            return Err(RenderError::InvalidSize {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(SpiralParams {
            terms: clamp_terms(terms),
            size: size as u32,
        })
    }
}

/// Render a spiral into a fresh canvas.
pub fn render_spiral(params: &SpiralParams) -> Result<Canvas, RenderError> {
    render::render(params.terms, params.size, params.size)
}

/// Render a spiral and encode it as PNG.
pub fn render_spiral_png(params: &SpiralParams) -> Result<Vec<u8>, RenderError> {
    render_spiral(params)?.encode_png()
}
