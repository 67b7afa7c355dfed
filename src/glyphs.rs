//! The narrow glyph capability the layout engine and the renderer are written against.
//!
//! [GlyphMetrics] answers "how wide is this line and how tall are lines", and
//! [GlyphRasterizer] additionally draws a line at a pen position. [ScaledFont] is the
//! bundled implementation, turning TrueType outlines into filled [tiny_skia] paths.

use crate::colour::Colour;
use crate::font::ScaledFont;
use crate::RenderError;
use owned_ttf_parser::OutlineBuilder;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Vertical extents of a font at a given size, in whole pixels
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VerticalMetrics {
    /// distance from the baseline up to the top of the tallest glyph
    pub ascent: u32,
    /// distance from the baseline down to the bottom of the lowest glyph
    pub descent: u32,
}

impl VerticalMetrics {
    /// Height of a single line without any extra spacing
    pub fn line_height(&self) -> u32 {
        self.ascent.saturating_add(self.descent)
    }
}

/// The baseline origin of a line of text, in pixels from the top-left of the canvas
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pen {
    pub x: i32,
    pub y: i32,
}

/// Measures text at a fixed font size
pub trait GlyphMetrics {
    /// Advance width of a whole line, in pixels
    fn advance(&self, line: &str) -> u32;

    /// Ascent and descent shared by every line
    fn vertical_metrics(&self) -> VerticalMetrics;
}

/// Measures and draws text at a fixed font size
pub trait GlyphRasterizer: GlyphMetrics {
    /// Draw `line` with its baseline origin at `pen`, clipped to the canvas
    fn draw_line(
        &self,
        canvas: &mut Pixmap,
        line: &str,
        pen: Pen,
        colour: Colour,
    ) -> Result<(), RenderError>;
}

impl GlyphMetrics for ScaledFont<'_> {
    fn advance(&self, line: &str) -> u32 {
        line.chars()
            .filter_map(|ch| self.font.glyph_id(ch))
            .map(|gid| self.glyph_advance(gid))
            .fold(0u32, u32::saturating_add)
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        VerticalMetrics {
            ascent: self.ascent(),
            descent: self.descent(),
        }
    }
}

impl GlyphRasterizer for ScaledFont<'_> {
    fn draw_line(
        &self,
        canvas: &mut Pixmap,
        line: &str,
        pen: Pen,
        colour: Colour,
    ) -> Result<(), RenderError> {
        let mut paint = Paint::default();
        paint.set_color(colour.to_skia());
        paint.anti_alias = true;

        let face = self.font.face();
        let mut x = pen.x as f32;
        let y = pen.y as f32;
        for ch in line.chars() {
            let gid = self.font.glyph_id(ch).ok_or_else(|| RenderError::DrawFailure {
                line: 0,
                reason: format!("font has no glyph for {ch:?}"),
            })?;

            let mut builder = GlyphPathBuilder::new(x, y, self.scale);
            // glyphs without an outline (spaces) only advance the pen
            if face.outline_glyph(gid, &mut builder).is_some() {
                if let Some(path) = builder.finish() {
                    canvas.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }

            x += self.glyph_advance(gid) as f32;
        }

        Ok(())
    }
}

/// Converts font-unit outlines (y up) into a pixel-space path (y down) anchored at a
/// baseline origin
struct GlyphPathBuilder {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(origin_x: f32, origin_y: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x,
            origin_y,
            scale,
        }
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
