//! Scene compositor: paints the spiral onto a canvas one layer at a time.

use glam::{DVec2, dvec2};

use super::canvas::Canvas;
use super::defaults::*;
use super::geometry::Arc;
use super::projection::{Transform, grid_positions, grid_step};
use super::text::{Faces, Font, faces};
use crate::errors::RenderError;
use crate::types::WorldBounds;

/// Back-to-front paint layers. Later layers occlude earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Sky,
    Ground,
    Grid,
    Axes,
    TickLabels,
    Squares,
    Arcs,
    Title,
    Legend,
}

/// The only order layers are ever painted in.
pub const DRAW_ORDER: [Layer; 9] = [
    Layer::Sky,
    Layer::Ground,
    Layer::Grid,
    Layer::Axes,
    Layer::TickLabels,
    Layer::Squares,
    Layer::Arcs,
    Layer::Title,
    Layer::Legend,
];

/// Everything a layer needs besides the canvas.
struct Scene<'a> {
    arcs: &'a [Arc],
    transform: &'a Transform,
    bounds: &'a WorldBounds,
    faces: &'a Faces,
    /// Gridline spacing in world units.
    step: f64,
}

/// Paint every layer of the spiral in [`DRAW_ORDER`] and hand the canvas back.
///
/// Fails only if the embedded fonts cannot be parsed.
pub fn compose(
    mut canvas: Canvas,
    arcs: &[Arc],
    transform: &Transform,
    bounds: &WorldBounds,
) -> Result<Canvas, RenderError> {
    let scene = Scene {
        arcs,
        transform,
        bounds,
        faces: faces()?,
        step: grid_step(transform.scale),
    };
    for layer in DRAW_ORDER {
        crate::log::trace!(?layer, "drawing layer");
        scene.draw(layer, &mut canvas);
    }
    Ok(canvas)
}

/// Integer tick text: rounded half away from zero, never `-0`.
pub fn format_tick(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Pen origin that centers a label in the unrounded square at `corner` with
/// side `side`. The half width and half ascent are whole pixels, truncated.
fn label_origin(corner: DVec2, side: f64, half_width: i32, half_ascent: i32) -> (f32, f32) {
    let center = corner + DVec2::splat(side * 0.5);
    let x = (center.x - half_width as f64).round();
    let baseline = (center.y + half_ascent as f64 - 2.0).round();
    (x as f32, baseline as f32)
}

/// Center of the pixel column/row a coordinate rounds to, so 1px lines stay sharp.
fn crisp(v: f64) -> f64 {
    v.round() + 0.5
}

impl Scene<'_> {
    fn draw(&self, layer: Layer, canvas: &mut Canvas) {
        match layer {
            Layer::Sky => self.sky(canvas),
            Layer::Ground => self.ground(canvas),
            Layer::Grid => self.grid(canvas),
            Layer::Axes => self.axes(canvas),
            Layer::TickLabels => self.tick_labels(canvas),
            Layer::Squares => self.squares(canvas),
            Layer::Arcs => self.arc_strokes(canvas),
            Layer::Title => self.title(canvas),
            Layer::Legend => self.legend(canvas),
        }
    }

    fn size(canvas: &Canvas) -> (f64, f64) {
        (canvas.width() as f64, canvas.height() as f64)
    }

    fn sky(&self, canvas: &mut Canvas) {
        let h = canvas.height() as f32;
        canvas.fill_vertical_gradient(SKY_TOP, SKY_MID, 0.0, h * 0.5);
    }

    fn ground(&self, canvas: &mut Canvas) {
        let (w, h) = Self::size(canvas);
        let top = (h * GROUND_TOP).floor();
        let height = (h * GROUND_HEIGHT).floor();
        canvas.fill_rect(0.0, top as f32, w as f32, height as f32, GROUND);
    }

    fn grid_xs(&self) -> Vec<f64> {
        grid_positions(self.bounds.min.x, self.bounds.max.x, self.step)
    }

    fn grid_ys(&self) -> Vec<f64> {
        grid_positions(self.bounds.min.y, self.bounds.max.y, self.step)
    }

    fn grid(&self, canvas: &mut Canvas) {
        let (w, h) = Self::size(canvas);
        for gx in self.grid_xs() {
            let x = crisp(self.transform.to_px(dvec2(gx, 0.0)).x);
            canvas.line(dvec2(x, 0.0), dvec2(x, h), GRID_WIDTH, GRID);
        }
        for gy in self.grid_ys() {
            let y = crisp(self.transform.to_px(dvec2(0.0, gy)).y);
            canvas.line(dvec2(0.0, y), dvec2(w, y), GRID_WIDTH, GRID);
        }
    }

    /// Pixel position of the world origin, rounded to whole pixels.
    fn origin_px(&self) -> DVec2 {
        self.transform.to_px(DVec2::ZERO).round()
    }

    fn axes(&self, canvas: &mut Canvas) {
        let (w, h) = Self::size(canvas);
        let origin = self.origin_px();
        canvas.line(dvec2(origin.x, 0.0), dvec2(origin.x, h), AXIS_WIDTH, AXIS);
        canvas.line(dvec2(0.0, origin.y), dvec2(w, origin.y), AXIS_WIDTH, AXIS);
    }

    fn tick_labels(&self, canvas: &mut Canvas) {
        let font = Font::plain(TICK_FONT_SIZE);
        let origin = self.origin_px();
        for gx in self.grid_xs() {
            let px = self.transform.to_px(dvec2(gx, 0.0)).x.round();
            let (x, y) = (px + 2.0, origin.y - 6.0);
            canvas.text(self.faces, &format_tick(gx), x as f32, y as f32, font, TICK_TEXT);
        }
        for gy in self.grid_ys() {
            let py = self.transform.to_px(dvec2(0.0, gy)).y.round();
            let (x, y) = (origin.x + 6.0, py - 2.0);
            canvas.text(self.faces, &format_tick(gy), x as f32, y as f32, font, TICK_TEXT);
        }
    }

    fn squares(&self, canvas: &mut Canvas) {
        let font = Font::bold(SQUARE_FONT_SIZE);
        let half_ascent = self.faces.ascent(font) / 2;
        for arc in self.arcs {
            // Top-left corner in world space is (cx - r, cy + r) because y flips.
            let corner = self
                .transform
                .to_px(dvec2(arc.center.x - arc.radius, arc.center.y + arc.radius));
            let side = self.transform.len_px(arc.radius * 2.0);
            let (left, top, w) =
                (corner.x.round() as f32, corner.y.round() as f32, side.round() as f32);

            canvas.fill_round_rect(left, top, w, w, SQUARE_CORNER, SQUARE_FILL);
            canvas.stroke_round_rect(left, top, w, w, SQUARE_CORNER, 1.0, SQUARE_BORDER);

            let label = format_tick(arc.radius);
            let (x, baseline) = label_origin(
                corner,
                side,
                self.faces.text_width(&label, font) / 2,
                half_ascent,
            );
            canvas.text(self.faces, &label, x, baseline, font, SQUARE_LABEL);
        }
    }

    fn arc_strokes(&self, canvas: &mut Canvas) {
        let font = Font::plain(ARC_FONT_SIZE);
        let last = self.arcs.len().saturating_sub(1).max(1) as f64;
        for (i, arc) in self.arcs.iter().enumerate() {
            let color = ARC_WARM.lerp(ARC_COOL, i as f64 / last);
            let segments = ((arc.radius * ARC_SEGMENTS_PER_UNIT) as usize)
                .clamp(ARC_MIN_SEGMENTS, ARC_MAX_SEGMENTS);
            let points: Vec<DVec2> = arc
                .sample(segments)
                .map(|p| self.transform.to_px(p))
                .collect();
            canvas.polyline(&points, ARC_WIDTH, color);

            let mid = arc.mid_angle();
            let anchor = arc.center + arc.radius * ARC_LABEL_RADIUS * dvec2(mid.cos(), mid.sin());
            let px = self.transform.to_px(anchor).round();
            canvas.text(
                self.faces,
                &format_tick(arc.radius),
                (px.x - 6.0) as f32,
                (px.y + 4.0) as f32,
                font,
                ARC_LABEL,
            );
        }
    }

    fn title(&self, canvas: &mut Canvas) {
        canvas.text(
            self.faces,
            TITLE,
            TITLE_X,
            TITLE_BASELINE,
            Font::bold(TITLE_FONT_SIZE),
            TITLE_COLOR,
        );
    }

    fn legend(&self, canvas: &mut Canvas) {
        let lx = canvas.width() as f32 - LEGEND_INSET_RIGHT;
        let ly = LEGEND_TOP;
        canvas.fill_round_rect(lx, ly, LEGEND_WIDTH, LEGEND_HEIGHT, SQUARE_CORNER, LEGEND_FILL);
        canvas.stroke_round_rect(
            lx,
            ly,
            LEGEND_WIDTH,
            LEGEND_HEIGHT,
            SQUARE_CORNER,
            1.0,
            LEGEND_BORDER,
        );

        let font = Font::plain(LEGEND_FONT_SIZE);
        for (row, line) in LEGEND_LINES.iter().enumerate() {
            let baseline = ly + LEGEND_LINE_HEIGHT * (row + 1) as f32;
            canvas.text(self.faces, line, lx + LEGEND_PADDING, baseline, font, LEGEND_TEXT);
        }
    }
}
