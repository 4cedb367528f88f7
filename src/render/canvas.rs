//! Drawing context - a request-local pixel buffer and the primitives the
//! compositor paints with.
//!
//! Coordinates are pixels, y-down. All shapes are anti-aliased.

use glam::DVec2;
use tiny_skia::{
    FillRule, GradientStop, LineCap, LineJoin, LinearGradient, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Point, PremultipliedColorU8, Rect, SpreadMode, Stroke, Transform,
};

use super::text::{Faces, Font, Glyph};
use crate::errors::RenderError;
use crate::types::Color;

/// Cubic control distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Owned RGBA canvas. Created per render, painted layer by layer, then encoded.
pub struct Canvas {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

impl Canvas {
    /// Allocate a transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::CanvasAlloc { width, height })?;
        Ok(Canvas { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha color of one pixel, `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        // Pixmap::pixel indexes `y * width + x` and would wrap to the next row.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Paint the whole canvas with a vertical gradient from `top` at `y0` to
    /// `bottom` at `y1`, padded with the end colors outside that span.
    pub fn fill_vertical_gradient(&mut self, top: Color, bottom: Color, y0: f32, y1: f32) {
        let shader = LinearGradient::new(
            Point::from_xy(0.0, y0),
            Point::from_xy(0.0, y1),
            vec![
                GradientStop::new(0.0, top.to_skia()),
                GradientStop::new(1.0, bottom.to_skia()),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        );
        let mut paint = solid(top);
        if let Some(shader) = shader {
            paint.shader = shader;
        }
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32) {
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    /// Fill an axis-aligned rectangle. Empty rectangles are skipped.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.pixmap.fill_rect(rect, &solid(color), Transform::identity(), None);
        }
    }

    /// Straight line with butt caps.
    pub fn line(&mut self, from: DVec2, to: DVec2, width: f32, color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            let stroke = Stroke { width, ..Stroke::default() };
            self.pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
        }
    }

    /// Open polyline with round caps and joins.
    pub fn polyline(&mut self, points: &[DVec2], width: f32, color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            self.pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
        }
    }

    /// Fill a rectangle whose corners are rounded to `corner / 2`.
    pub fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, corner: f32, color: Color) {
        if let Some(path) = round_rect_path(x, y, w, h, corner * 0.5) {
            self.pixmap.fill_path(
                &path,
                &solid(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Outline a rounded rectangle; see [`Canvas::fill_round_rect`].
    pub fn stroke_round_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        corner: f32,
        width: f32,
        color: Color,
    ) {
        if let Some(path) = round_rect_path(x, y, w, h, corner * 0.5) {
            let stroke = Stroke { width, ..Stroke::default() };
            self.pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
        }
    }

    /// Draw `text` with its pen origin at `x` and its baseline at `baseline`.
    /// The origin snaps to whole pixels so glyph coverage lands unfiltered.
    pub fn text(
        &mut self,
        faces: &Faces,
        text: &str,
        x: f32,
        baseline: f32,
        font: Font,
        color: Color,
    ) {
        let (x0, y0) = (x.round() as i32, baseline.round() as i32);
        for glyph in faces.layout(text, font) {
            if let Some(sprite) = glyph_sprite(&glyph, color) {
                self.pixmap.draw_pixmap(
                    x0 + glyph.x,
                    y0 + glyph.y,
                    sprite.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let bytes = self
            .pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode { message: e.to_string() })?;
        crate::log::debug!(bytes = bytes.len(), "encoded png");
        Ok(bytes)
    }
}

/// A glyph's coverage tinted with `color`, premultiplied.
fn glyph_sprite(glyph: &Glyph, color: Color) -> Option<Pixmap> {
    let mut sprite = Pixmap::new(glyph.width as u32, glyph.height as u32)?;
    for (dst, &coverage) in sprite.pixels_mut().iter_mut().zip(&glyph.coverage) {
        let a = mul_div255(coverage, color.a);
        let premul = PremultipliedColorU8::from_rgba(
            mul_div255(color.r, a),
            mul_div255(color.g, a),
            mul_div255(color.b, a),
            a,
        );
        if let Some(px) = premul {
            *dst = px;
        }
    }
    Some(sprite)
}

fn mul_div255(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16 + 127) / 255) as u8
}

fn round_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    let rect = Rect::from_xywh(x, y, w, h)?;
    let r = radius.min(w * 0.5).min(h * 0.5);
    if r <= 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }
    let k = KAPPA * r;
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}
