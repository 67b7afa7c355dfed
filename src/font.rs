use crate::RenderError;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};

/// The monospace font bundled with the crate and used when no other font is given
static DEFAULT_MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// A parsed font object. Fonts can be TTF or OTF fonts; the whole font is kept in memory
/// for as long as the [Font] lives.
///
/// A [Font] has no size of its own: call [Font::scaled] to obtain a [ScaledFont] that
/// measures and draws text at a given point size and resolution.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, RenderError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        if face.as_face_ref().units_per_em() == 0 {
            return Err(RenderError::RenderingUnavailable(
                "font reports zero units per em".into(),
            ));
        }

        Ok(Font { face })
    }

    /// Load the bundled DejaVu Sans Mono font
    pub fn default_mono() -> Result<Font, RenderError> {
        Font::load(DEFAULT_MONO.to_vec())
    }

    /// Obtain the full name of the font, if the font has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if the font has one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Bind the font to a point size and a resolution in dots per inch. Both must be
    /// positive and finite.
    pub fn scaled(&self, size: f64, dpi: f64) -> Result<ScaledFont<'_>, RenderError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(RenderError::RenderingUnavailable(format!(
                "invalid font size {size}"
            )));
        }
        if !(dpi.is_finite() && dpi > 0.0) {
            return Err(RenderError::RenderingUnavailable(format!("invalid DPI {dpi}")));
        }

        let pixels_per_em = size * dpi / 72.0;
        let scale = (pixels_per_em / self.face.as_face_ref().units_per_em() as f64) as f32;
        Ok(ScaledFont {
            font: self,
            size,
            dpi,
            scale,
        })
    }

    pub(crate) fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// Look up the glyph for a character, falling back to the replacement character and
    /// then to a question mark
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        resolve_glyph(|c| self.face().glyph_index(c), ch)
    }
}

/// Resolve `ch` through `lookup`, trying the replacement character and then a question
/// mark when the font has no glyph for it. [None] means the font has none of the three.
pub(crate) fn resolve_glyph<F>(lookup: F, ch: char) -> Option<GlyphId>
where
    F: Fn(char) -> Option<GlyphId>,
{
    lookup(ch)
        .or_else(|| lookup('\u{FFFD}'))
        .or_else(|| lookup('?'))
}

/// A [Font] at a fixed point size and DPI. All measurements are in whole pixels.
#[derive(Clone, Copy)]
pub struct ScaledFont<'f> {
    pub font: &'f Font,
    pub size: f64,
    pub dpi: f64,
    /// pixels per font unit
    pub(crate) scale: f32,
}

impl ScaledFont<'_> {
    /// Distance from the baseline to the top of the font, rounded up to a whole pixel
    pub fn ascent(&self) -> u32 {
        let ascender = self.font.face().ascender() as f32 * self.scale;
        ascender.max(0.0).ceil() as u32
    }

    /// Distance from the baseline to the bottom of the font, rounded up to a whole pixel.
    /// Unlike the raw font value this is positive below the baseline.
    pub fn descent(&self) -> u32 {
        let descender = -(self.font.face().descender() as f32) * self.scale;
        descender.max(0.0).ceil() as u32
    }

    /// Horizontal advance of a single glyph, snapped to the pixel grid the way fully
    /// hinted text is
    pub fn glyph_advance(&self, gid: GlyphId) -> u32 {
        let advance = self.font.face().glyph_hor_advance(gid).unwrap_or_default();
        (advance as f32 * self.scale).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_font_loads_and_has_names() {
        let font = Font::default_mono().unwrap();
        assert_eq!(font.family().as_deref(), Some("DejaVu Sans Mono"));
        assert!(font.name().is_some());
    }

    #[test]
    fn garbage_bytes_are_rendering_unavailable() {
        let err = Font::load(b"definitely not a font".to_vec()).err().unwrap();
        assert!(matches!(err, RenderError::RenderingUnavailable(_)));
    }

    #[test]
    fn scaled_rejects_non_positive_sizes() {
        let font = Font::default_mono().unwrap();
        assert!(font.scaled(0.0, 120.0).is_err());
        assert!(font.scaled(12.0, -1.0).is_err());
        assert!(font.scaled(f64::NAN, 120.0).is_err());
        assert!(font.scaled(12.0, 120.0).is_ok());
    }

    #[test]
    fn metrics_grow_with_size() {
        let font = Font::default_mono().unwrap();
        let small = font.scaled(12.0, 72.0).unwrap();
        let large = font.scaled(24.0, 72.0).unwrap();
        assert!(small.ascent() > 0);
        assert!(small.descent() > 0);
        assert!(large.ascent() > small.ascent());
        assert!(large.descent() >= small.descent());
    }

    #[test]
    fn dpi_scales_like_point_size() {
        let font = Font::default_mono().unwrap();
        let a = font.scaled(12.0, 144.0).unwrap();
        let b = font.scaled(24.0, 72.0).unwrap();
        assert_eq!(a.ascent(), b.ascent());
        assert_eq!(a.descent(), b.descent());
    }

    /// The bundled font with the `unitsPerEm` field of its `head` table zeroed
    fn font_with_zero_units_per_em() -> Vec<u8> {
        let mut bytes = DEFAULT_MONO.to_vec();
        let be16 = |b: &[u8], at: usize| u16::from_be_bytes([b[at], b[at + 1]]) as usize;
        let be32 = |b: &[u8], at: usize| {
            u32::from_be_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]]) as usize
        };

        let num_tables = be16(&bytes, 4);
        let head = (0..num_tables)
            .map(|i| 12 + i * 16)
            .find(|&record| &bytes[record..record + 4] == b"head")
            .map(|record| be32(&bytes, record + 8))
            .expect("font has a head table");
        bytes[head + 18] = 0;
        bytes[head + 19] = 0;
        bytes
    }

    #[test]
    fn zero_units_per_em_is_rendering_unavailable() {
        let err = Font::load(font_with_zero_units_per_em()).err().unwrap();
        assert!(matches!(err, RenderError::RenderingUnavailable(_)));
    }

    #[test]
    fn fallback_prefers_the_character_then_replacement_then_question_mark() {
        let all = |c: char| match c {
            'a' => Some(GlyphId(1)),
            '\u{FFFD}' => Some(GlyphId(2)),
            '?' => Some(GlyphId(3)),
            _ => None,
        };
        assert_eq!(resolve_glyph(all, 'a'), Some(GlyphId(1)));
        assert_eq!(resolve_glyph(all, 'z'), Some(GlyphId(2)));

        let no_replacement = |c: char| (c == '?').then_some(GlyphId(3));
        assert_eq!(resolve_glyph(no_replacement, 'z'), Some(GlyphId(3)));

        let empty = |_: char| None;
        assert_eq!(resolve_glyph(empty, 'z'), None);
    }

    #[test]
    fn unknown_characters_fall_back_to_a_glyph() {
        let font = Font::default_mono().unwrap();
        assert!(font.glyph_id('A').is_some());
        assert!(font.glyph_id('\u{10FFFD}').is_some());
    }
}
