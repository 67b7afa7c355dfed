use crate::colour::{colours, Colour};

/// Options controlling how text is laid out and rendered.
///
/// The [Default] profile is the library one (12pt, explicit sizing); see
/// [RenderConfig::cli_profile] for the command-line profile. Sizes are in pixels
/// unless stated otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Width of the text block when `auto_size` is off; 0 leaves it unset
    pub width: u32,
    /// Height of the text block when `auto_size` is off; 0 leaves it unset
    pub height: u32,
    /// Padding applied equally on all four sides of the text block
    pub margin: u32,
    /// Font size, in points
    pub font_size: f64,
    /// Resolution used to convert points into pixels
    pub dpi: f64,
    /// Derive the canvas from the measured text instead of `width`/`height`
    pub auto_size: bool,
    /// Force a square canvas, rounded up to a multiple of
    /// [SQUARE_GRANULARITY](crate::layout::SQUARE_GRANULARITY)
    pub square: bool,
    /// Multiplier applied to the line height between successive baselines
    pub line_spacing: f64,
    pub text_colour: Option<Colour>,
    pub background_colour: Option<Colour>,
    /// Only consulted when `background_colour` is unset
    pub transparent_background: bool,
}

pub const DEFAULT_MARGIN: u32 = 24;
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_CLI_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_DPI: f64 = 120.0;
pub const DEFAULT_LINE_SPACING: f64 = 1.3;

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 0,
            height: 0,
            margin: DEFAULT_MARGIN,
            font_size: DEFAULT_FONT_SIZE,
            dpi: DEFAULT_DPI,
            auto_size: false,
            square: false,
            line_spacing: DEFAULT_LINE_SPACING,
            text_colour: None,
            background_colour: None,
            transparent_background: false,
        }
    }
}

impl RenderConfig {
    /// The profile used by the `t2i` command: slightly larger text, sized to fit
    pub fn cli_profile() -> RenderConfig {
        RenderConfig {
            font_size: DEFAULT_CLI_FONT_SIZE,
            auto_size: true,
            ..RenderConfig::default()
        }
    }

    /// Replace any font size, DPI or line spacing that is not a positive, finite number
    /// with its default, leaving everything else untouched
    pub fn normalized(&self) -> RenderConfig {
        fn positive_or(value: f64, default: f64) -> f64 {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                default
            }
        }

        RenderConfig {
            font_size: positive_or(self.font_size, DEFAULT_FONT_SIZE),
            dpi: positive_or(self.dpi, DEFAULT_DPI),
            line_spacing: positive_or(self.line_spacing, DEFAULT_LINE_SPACING),
            ..self.clone()
        }
    }

    /// The colour text is drawn in; black unless set
    pub fn text_colour(&self) -> Colour {
        self.text_colour.unwrap_or(colours::BLACK)
    }

    /// The colour the canvas is filled with before any text is drawn: the explicit
    /// background if set, otherwise transparent or white depending on
    /// `transparent_background`
    pub fn background_colour(&self) -> Colour {
        match self.background_colour {
            Some(colour) => colour,
            None if self.transparent_background => colours::TRANSPARENT,
            None => colours::WHITE,
        }
    }

    /// Use a fixed text area of `width` x `height` pixels, turning auto-sizing off
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self.auto_size = false;
        self
    }

    /// Size the text area to fit the text instead of using `width` and `height`
    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    /// Set the margin added on every side of the text area
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the font size in points and the resolution it is rendered at
    pub fn with_font(mut self, font_size: f64, dpi: f64) -> Self {
        self.font_size = font_size;
        self.dpi = dpi;
        self
    }

    /// Grow the canvas to a square whose side is a multiple of 24 pixels
    pub fn with_square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }

    /// Set the multiplier applied to the line height between baselines
    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Set the text and background colours; [None] keeps the default for that colour
    pub fn with_colours(mut self, text: Option<Colour>, background: Option<Colour>) -> Self {
        self.text_colour = text;
        self.background_colour = background;
        self
    }

    /// Use a fully transparent background when no background colour is set
    pub fn with_transparent_background(mut self, transparent: bool) -> Self {
        self.transparent_background = transparent;
        self
    }
}
