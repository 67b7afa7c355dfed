use crate::glyphs::GlyphMetrics;

/// Replace every tab with `tab_size` spaces. A tab size of 0 removes tabs entirely.
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    text.replace('\t', &" ".repeat(tab_size))
}

/// Split text into the lines that will be drawn, top to bottom.
///
/// Lines end at `\n` (a preceding `\r` is dropped as well). Text after the final
/// newline forms a last line only if it is non-empty, so `"a\n"` is one line and
/// `""` is none, while blank lines in the middle are kept.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n')
        .map(|line| {
            let line = line.strip_suffix('\n').unwrap_or(line);
            line.strip_suffix('\r').unwrap_or(line)
        })
        .collect()
}

/// The tight bounding box of a block of text, excluding any margin
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MeasuredBlock {
    pub width: u32,
    pub height: u32,
}

/// Measure a block of lines: the width is that of the widest line, the height runs
/// from the top of the first line to the baseline of the last one.
///
/// The descent of the last line is not counted; pen positions are computed from the
/// same ascent-plus-spacing formula so the two agree.
pub fn measure_block<M>(lines: &[&str], line_spacing: f64, metrics: &M) -> MeasuredBlock
where
    M: GlyphMetrics + ?Sized,
{
    if lines.is_empty() {
        return MeasuredBlock::default();
    }

    let width = lines
        .iter()
        .map(|line| metrics.advance(line))
        .max()
        .unwrap_or_default();

    let vertical = metrics.vertical_metrics();
    let ascent = vertical.ascent as f64;
    let line_height = vertical.line_height() as f64;
    let height = ascent + (lines.len() - 1) as f64 * line_height * line_spacing;

    MeasuredBlock {
        width,
        height: height as u32,
    }
}
