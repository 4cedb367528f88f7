//! Error types with diagnostics using miette

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can end a render request.
///
/// Rendering itself is a pure pass over request-local data. It fails only on a
/// canvas size the boundary refuses, an allocation or font load that cannot
/// complete, or PNG encoding.
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("canvas size {size} is out of range")]
    #[diagnostic(
        code(fibspiral::render::invalid_size),
        help("size must be between {min} and {max} pixels")
    )]
    InvalidSize { size: i64, min: u32, max: u32 },

    #[error("could not allocate a {width}x{height} canvas")]
    #[diagnostic(code(fibspiral::render::canvas_alloc))]
    CanvasAlloc { width: u32, height: u32 },

    #[error("embedded font could not be loaded: {message}")]
    #[diagnostic(code(fibspiral::render::font))]
    Font { message: String },

    #[error("PNG encoding failed: {message}")]
    #[diagnostic(code(fibspiral::render::encode))]
    Encode { message: String },
}
