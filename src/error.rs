use image::RgbaImage;
use std::fmt;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid hex colour {0:?}: expected RGB, RRGGBB or RRGGBBAA")]
    /// A colour string was not a 3, 6 or 8 digit hex colour
    InvalidFormat(String),

    #[error("rendering unavailable: {0}")]
    /// The font could not be loaded, or could not produce metrics at the requested
    /// size, or the canvas could not be allocated
    RenderingUnavailable(String),

    #[error("failed to draw line {line}: {reason}")]
    /// A single line of text could not be rasterized
    DrawFailure { line: usize, reason: String },

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to encode the image
    Image(#[from] image::ImageError),
}

impl From<owned_ttf_parser::FaceParsingError> for RenderError {
    fn from(e: owned_ttf_parser::FaceParsingError) -> Self {
        RenderError::RenderingUnavailable(format!("unable to parse font: {e}"))
    }
}

/// The error returned by [crate::render]. When the failure happened while drawing
/// lines, `partial` holds whatever was rasterized before and after the failing line;
/// callers decide whether that output is still useful.
#[derive(Error)]
#[error("{error}")]
pub struct RenderFailure {
    #[source]
    pub error: RenderError,
    pub partial: Option<RgbaImage>,
}

impl RenderFailure {
    /// Discard any partial image and keep only the error
    pub fn into_error(self) -> RenderError {
        self.error
    }
}

impl From<RenderError> for RenderFailure {
    fn from(error: RenderError) -> Self {
        RenderFailure {
            error,
            partial: None,
        }
    }
}

// the pixel data would swamp any debug output
impl fmt::Debug for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderFailure")
            .field("error", &self.error)
            .field(
                "partial",
                &self.partial.as_ref().map(|img| img.dimensions()),
            )
            .finish()
    }
}
