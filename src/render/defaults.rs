//! Palette, layout and sampling constants (pixels unless noted)

use crate::types::Color;

// Fit
pub const BOUNDS_PAD_RATIO: f64 = 0.08;
/// World units added to each side on top of the ratio padding.
pub const BOUNDS_PAD_UNITS: f64 = 1.0;
pub const FIT_WIDTH: f64 = 0.88;
pub const FIT_HEIGHT: f64 = 0.78;
pub const GRID_TARGET_PX: f64 = 80.0;
/// Points sampled per world unit of radius when measuring an arc, on top of the minimum.
pub const BOUNDS_SAMPLES_PER_UNIT: f64 = 6.0;
pub const BOUNDS_MIN_SAMPLES: usize = 36;
/// Large radii only add samples up to here; the circumscribing square bounds them anyway.
pub const BOUNDS_MAX_SAMPLES: usize = 4096;

// Background
pub const SKY_TOP: Color = Color::rgb(220, 235, 255);
pub const SKY_MID: Color = Color::rgb(245, 250, 255);
pub const GROUND: Color = Color::rgb(238, 250, 238);
/// Ground starts at this fraction of the canvas height.
pub const GROUND_TOP: f64 = 0.78;
pub const GROUND_HEIGHT: f64 = 0.22;

// Grid and axes
pub const GRID: Color = Color::rgb(230, 230, 230);
pub const GRID_WIDTH: f32 = 1.0;
pub const AXIS: Color = Color::rgb(90, 90, 90);
pub const AXIS_WIDTH: f32 = 2.0;
pub const TICK_TEXT: Color = Color::rgb(60, 60, 60);
pub const TICK_FONT_SIZE: f32 = 12.0;

// Radius squares
pub const SQUARE_FILL: Color = Color::rgba(255, 255, 255, 200);
pub const SQUARE_BORDER: Color = Color::rgb(200, 200, 220);
pub const SQUARE_CORNER: f32 = 8.0;
pub const SQUARE_LABEL: Color = Color::rgb(40, 40, 40);
pub const SQUARE_FONT_SIZE: f32 = 14.0;

// Arcs
pub const ARC_WARM: Color = Color::rgb(255, 120, 60);
pub const ARC_COOL: Color = Color::rgb(0, 140, 220);
pub const ARC_WIDTH: f32 = 3.0;
pub const ARC_MIN_SEGMENTS: usize = 60;
pub const ARC_SEGMENTS_PER_UNIT: f64 = 12.0;
/// Upper limit on polyline segments per arc; reached from radius 342 up.
pub const ARC_MAX_SEGMENTS: usize = 4096;
/// Arc labels sit this fraction of the radius out from the center.
pub const ARC_LABEL_RADIUS: f64 = 0.6;
pub const ARC_LABEL: Color = Color::rgb(40, 40, 40);
pub const ARC_FONT_SIZE: f32 = 12.0;

// Title
pub const TITLE: &str = "Fibonacci Spiral — Quarter arcs with radii = Fibonacci numbers";
pub const TITLE_COLOR: Color = Color::rgb(30, 30, 30);
pub const TITLE_FONT_SIZE: f32 = 16.0;
pub const TITLE_X: f32 = 12.0;
pub const TITLE_BASELINE: f32 = 22.0;

// Legend
pub const LEGEND_LINES: [&str; 2] = [
    "Orange → Blue : Arc progression",
    "Squares show each radius (labelled)",
];
/// Legend box left edge is this far in from the right edge of the canvas.
pub const LEGEND_INSET_RIGHT: f32 = 220.0;
pub const LEGEND_TOP: f32 = 16.0;
pub const LEGEND_WIDTH: f32 = 200.0;
pub const LEGEND_HEIGHT: f32 = 48.0;
pub const LEGEND_PADDING: f32 = 12.0;
pub const LEGEND_LINE_HEIGHT: f32 = 18.0;
pub const LEGEND_FILL: Color = Color::rgba(255, 255, 255, 230);
pub const LEGEND_BORDER: Color = Color::rgb(190, 190, 190);
pub const LEGEND_TEXT: Color = Color::BLACK;
pub const LEGEND_FONT_SIZE: f32 = 12.0;
