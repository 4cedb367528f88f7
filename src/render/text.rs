//! Text: the embedded DejaVu Sans faces, their metrics and glyph layout.
//!
//! Both faces are parsed once per process and shared by every render. Pen
//! advances snap to whole pixels per glyph, so measured widths are the same
//! integers the layout uses.

use std::sync::OnceLock;

use fontdue::FontSettings;

use crate::errors::RenderError;

const DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weight {
    Plain,
    Bold,
}

/// A face and pixel size to set text in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    /// Pixels per em.
    pub size: f32,
    pub weight: Weight,
}

impl Font {
    pub const fn plain(size: f32) -> Self {
        Font { size, weight: Weight::Plain }
    }

    pub const fn bold(size: f32) -> Self {
        Font { size, weight: Weight::Bold }
    }
}

/// One rasterized glyph, placed relative to the pen origin (x at the left of
/// the text, y at the baseline, y-down).
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// The parsed plain and bold faces.
pub struct Faces {
    plain: fontdue::Font,
    bold: fontdue::Font,
}

impl std::fmt::Debug for Faces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Faces")
            .field("plain", &self.plain.name())
            .field("bold", &self.bold.name())
            .finish()
    }
}

static FACES: OnceLock<Result<Faces, &'static str>> = OnceLock::new();

/// The shared faces, parsed on first use.
pub fn faces() -> Result<&'static Faces, RenderError> {
    FACES
        .get_or_init(|| {
            crate::log::debug!("parsing embedded fonts");
            Ok(Faces {
                plain: fontdue::Font::from_bytes(DEJAVU_SANS, FontSettings::default())?,
                bold: fontdue::Font::from_bytes(DEJAVU_SANS_BOLD, FontSettings::default())?,
            })
        })
        .as_ref()
        .map_err(|message| RenderError::Font { message: message.to_string() })
}

impl Faces {
    fn face(&self, weight: Weight) -> &fontdue::Font {
        match weight {
            Weight::Plain => &self.plain,
            Weight::Bold => &self.bold,
        }
    }

    /// Whole-pixel distance from the baseline to the top of the tallest glyph.
    pub fn ascent(&self, font: Font) -> i32 {
        self.face(font.weight)
            .horizontal_line_metrics(font.size)
            .map_or(font.size, |m| m.ascent)
            .round() as i32
    }

    fn advance(&self, c: char, font: Font) -> i32 {
        self.face(font.weight).metrics(c, font.size).advance_width.round() as i32
    }

    /// Sum of the snapped advances of `text`.
    pub fn text_width(&self, text: &str, font: Font) -> i32 {
        text.chars().map(|c| self.advance(c, font)).sum()
    }

    /// Rasterize `text`. Whitespace and other empty glyphs only move the pen.
    pub fn layout(&self, text: &str, font: Font) -> Vec<Glyph> {
        let face = self.face(font.weight);
        let mut pen = 0;
        let mut glyphs = Vec::with_capacity(text.len());
        for c in text.chars() {
            let (metrics, coverage) = face.rasterize(c, font.size);
            if metrics.width > 0 && metrics.height > 0 {
                glyphs.push(Glyph {
                    x: pen + metrics.xmin,
                    // ymin is the bottom edge, measured up from the baseline.
                    y: -(metrics.ymin + metrics.height as i32),
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                });
            }
            pen += metrics.advance_width.round() as i32;
        }
        glyphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::defaults::*;

    fn faces() -> &'static Faces {
        super::faces().expect("embedded fonts parse")
    }

    #[test]
    fn faces_are_shared() {
        assert!(std::ptr::eq(faces(), faces()));
    }

    #[test]
    fn space_has_no_ink() {
        let font = Font::plain(12.0);
        assert!(faces().layout("   ", font).is_empty());
        assert!(faces().text_width("   ", font) > 0);
    }

    #[test]
    fn glyphs_straddle_the_baseline_as_designed() {
        let font = Font::plain(20.0);
        let ascent = faces().ascent(font);
        for glyph in faces().layout("Hx", font) {
            assert!(glyph.y >= -ascent - 1, "{glyph:?} rises above the ascent");
            assert!(glyph.y + glyph.height as i32 <= 1, "{glyph:?} sinks below the baseline");
            assert_eq!(glyph.coverage.len(), glyph.width * glyph.height);
        }
        // 'g' has a descender.
        let g = &faces().layout("g", font)[0];
        assert!(g.y + g.height as i32 > 2);
    }

    #[test]
    fn pen_advances_by_snapped_widths() {
        let font = Font::bold(SQUARE_FONT_SIZE);
        let one = faces().text_width("1", font);
        assert_eq!(faces().text_width("13", font), one * 2, "digits are tabular");
        let glyphs = faces().layout("11", font);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[1].x - glyphs[0].x, one);
        assert_eq!(faces().text_width("", font), 0);
    }

    #[test]
    fn bold_is_wider_than_plain() {
        let text = "Squares show each radius";
        let plain = faces().text_width(text, Font::plain(14.0));
        let bold = faces().text_width(text, Font::bold(14.0));
        assert!(bold > plain, "bold {bold} vs plain {plain}");
    }

    #[test]
    fn caption_punctuation_has_glyphs() {
        let font = Font::plain(32.0);
        for c in ['\u{2014}', '\u{2192}'] {
            let glyphs = faces().layout(&c.to_string(), font);
            assert_eq!(glyphs.len(), 1, "{c:?} has no outline");
            assert!(glyphs[0].coverage.iter().any(|&a| a > 128));
        }
    }

    #[test]
    fn title_fits_the_default_canvas() {
        let width = faces().text_width(TITLE, Font::bold(TITLE_FONT_SIZE));
        assert!(width > 400, "title is only {width}px wide");
        assert!(TITLE_X as i32 + width < 600, "title is {width}px wide");
    }

    #[test]
    fn ascent_matches_face_proportions() {
        // DejaVu Sans ascends 0.928 em.
        assert_eq!(faces().ascent(Font::bold(14.0)), 13);
        assert_eq!(faces().ascent(Font::plain(12.0)), 11);
    }
}
