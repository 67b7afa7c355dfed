use super::text::{measure_block, split_lines, MeasuredBlock};
use crate::config::RenderConfig;
use crate::glyphs::{GlyphMetrics, Pen, VerticalMetrics};
use log::debug;

/// Square canvases have sides rounded up to a multiple of this many pixels
pub const SQUARE_GRANULARITY: u32 = 24;

/// The final canvas and everything needed to place lines on it. Computed once per
/// render from a [RenderConfig] and the font metrics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CanvasPlan {
    /// the text block the canvas was derived from (explicit or measured)
    pub measured: MeasuredBlock,
    pub width: u32,
    pub height: u32,
    /// extra horizontal offset, on top of the margin, that keeps the block centred
    /// when squaring widened the canvas
    pub offset_x: u32,
    /// extra vertical offset, on top of the margin, that keeps the block centred
    /// when squaring heightened the canvas
    pub offset_y: u32,
    pub margin: u32,
    pub ascent: u32,
    /// distance between successive baselines
    pub line_advance: u32,
}

impl CanvasPlan {
    /// The baseline origin of the 0-based `line`. Lines are left-aligned.
    pub fn pen_position(&self, line: usize) -> Pen {
        let x = self.margin as i64 + self.offset_x as i64;
        let y = self.margin as i64
            + self.offset_y as i64
            + self.ascent as i64
            + line as i64 * self.line_advance as i64;
        Pen {
            x: saturate(x),
            y: saturate(y),
        }
    }
}

fn saturate(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Lay out `text` according to `config`:
///
/// 1. the text block is measured when `auto_size` is set, otherwise taken from the
///    configured width and height (0 if unset)
/// 2. the margin is added on every side
/// 3. with `square`, both sides become the larger one rounded up to a multiple of
///    [SQUARE_GRANULARITY]
/// 4. whatever squaring added is split evenly either side of the block, with any odd
///    pixel going to the right or bottom
pub fn plan<M>(text: &str, config: &RenderConfig, metrics: &M) -> CanvasPlan
where
    M: GlyphMetrics + ?Sized,
{
    let measured = if config.auto_size {
        measure_block(&split_lines(text), config.line_spacing, metrics)
    } else {
        MeasuredBlock {
            width: config.width,
            height: config.height,
        }
    };

    let margin = config.margin;
    let base_width = measured.width.saturating_add(margin.saturating_mul(2));
    let base_height = measured.height.saturating_add(margin.saturating_mul(2));

    let (width, height) = if config.square {
        let side = square_side(base_width.max(base_height));
        (side, side)
    } else {
        (base_width, base_height)
    };

    let vertical = metrics.vertical_metrics();
    let plan = CanvasPlan {
        measured,
        width,
        height,
        offset_x: (width - base_width) / 2,
        offset_y: (height - base_height) / 2,
        margin,
        ascent: vertical.ascent,
        line_advance: line_advance(vertical, config.line_spacing),
    };
    debug!(
        "measured {}x{}, canvas {}x{}, offset ({}, {})",
        measured.width, measured.height, plan.width, plan.height, plan.offset_x, plan.offset_y
    );

    plan
}

/// Smallest multiple of [SQUARE_GRANULARITY] that is at least `size`
pub fn square_side(size: u32) -> u32 {
    size.div_ceil(SQUARE_GRANULARITY)
        .saturating_mul(SQUARE_GRANULARITY)
}

fn line_advance(metrics: VerticalMetrics, line_spacing: f64) -> u32 {
    (metrics.line_height() as f64 * line_spacing).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "Hi" is 20px wide, "You" 24px, ascent 10, descent 4
    struct Scenario;

    impl GlyphMetrics for Scenario {
        fn advance(&self, line: &str) -> u32 {
            match line {
                "Hi" => 20,
                "You" => 24,
                other => other.chars().count() as u32 * 8,
            }
        }

        fn vertical_metrics(&self) -> VerticalMetrics {
            VerticalMetrics {
                ascent: 10,
                descent: 4,
            }
        }
    }

    fn auto() -> RenderConfig {
        RenderConfig::default()
            .with_auto_size(true)
            .with_margin(24)
            .with_line_spacing(1.3)
    }

    #[test]
    fn auto_size_adds_margin_around_measured_block() {
        let plan = plan("Hi\nYou", &auto(), &Scenario);
        assert_eq!(plan.measured, MeasuredBlock { width: 24, height: 28 });
        assert_eq!((plan.width, plan.height), (72, 76));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 0));
    }

    #[test]
    fn square_rounds_up_and_centres_both_axes() {
        let plan = plan("Hi\nYou", &auto().with_square(true), &Scenario);
        assert_eq!((plan.width, plan.height), (96, 96));
        assert_eq!((plan.offset_x, plan.offset_y), (12, 10));
        assert_eq!(plan.pen_position(0), Pen { x: 36, y: 44 });
    }

    #[test]
    fn square_only_offsets_the_enlarged_axis() {
        // base 48 + 24 wide, 48 + 48 tall: already a multiple of 24 vertically
        let config = RenderConfig::default().with_size(24, 48).with_square(true);
        let plan = plan("", &config, &Scenario);
        assert_eq!((plan.width, plan.height), (96, 96));
        assert_eq!(plan.offset_y, 0);
        assert_eq!(plan.offset_x, 12);
        assert_eq!(plan.pen_position(0).y, 24 + 10);
    }

    #[test]
    fn odd_extra_pixel_goes_right() {
        // base 49x48 -> 72x72, 23 spare columns
        let config = RenderConfig::default().with_size(1, 0).with_square(true);
        let plan = plan("", &config, &Scenario);
        assert_eq!((plan.width, plan.height), (72, 72));
        assert_eq!(plan.offset_x, 11);
        assert_eq!(plan.offset_y, 12);
    }

    #[test]
    fn square_side_is_the_smallest_multiple_of_granularity() {
        assert_eq!(square_side(0), 0);
        assert_eq!(square_side(1), 24);
        assert_eq!(square_side(24), 24);
        assert_eq!(square_side(25), 48);
        assert_eq!(square_side(76), 96);
        for size in 0..500 {
            let side = square_side(size);
            assert_eq!(side % SQUARE_GRANULARITY, 0);
            assert!(side >= size && side < size + SQUARE_GRANULARITY);
        }
    }

    #[test]
    fn explicit_size_ignores_the_text() {
        let config = RenderConfig::default().with_size(100, 40).with_margin(10);
        let plan = plan("a much longer line than the block", &config, &Scenario);
        assert_eq!(plan.measured, MeasuredBlock { width: 100, height: 40 });
        assert_eq!((plan.width, plan.height), (120, 60));
    }

    #[test]
    fn empty_text_is_just_the_margins() {
        let plan = plan("", &auto(), &Scenario);
        assert_eq!(plan.measured, MeasuredBlock::default());
        assert_eq!((plan.width, plan.height), (48, 48));

        let plan = super::plan("", &auto().with_square(true), &Scenario);
        assert_eq!((plan.width, plan.height), (48, 48));
    }

    #[test]
    fn pens_step_by_rounded_line_advance() {
        let plan = plan("Hi\nYou\nHi", &auto(), &Scenario);
        // 14 * 1.3 = 18.2
        assert_eq!(plan.line_advance, 18);
        assert_eq!(plan.pen_position(0), Pen { x: 24, y: 34 });
        assert_eq!(plan.pen_position(1), Pen { x: 24, y: 52 });
        assert_eq!(plan.pen_position(2), Pen { x: 24, y: 70 });

        let plan = super::plan("Hi", &auto().with_line_spacing(1.25), &Scenario);
        // 14 * 1.25 = 17.5
        assert_eq!(plan.line_advance, 18);
    }

    #[test]
    fn planning_is_deterministic() {
        let config = auto().with_square(true);
        assert_eq!(
            plan("Hi\nYou", &config, &Scenario),
            plan("Hi\nYou", &config, &Scenario)
        );
    }
}
