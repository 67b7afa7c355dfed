use crate::config::RenderConfig;
use crate::font::Font;
use crate::glyphs::GlyphRasterizer;
use crate::layout::{plan, split_lines};
use crate::{RenderError, RenderFailure};
use image::{ImageFormat, RgbaImage};
use log::{debug, trace};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tiny_skia::Pixmap;

/// Render text into an image using `font` at the configured size and DPI.
///
/// The text is decoded as UTF-8, with invalid sequences replaced. Tabs are drawn as
/// whatever glyph the font has for them; expand them beforehand with
/// [expand_tabs](crate::layout::expand_tabs) if that is not what you want.
pub fn render(text: &[u8], config: &RenderConfig, font: &Font) -> Result<RgbaImage, RenderFailure> {
    let config = config.normalized();
    let scaled = font.scaled(config.font_size, config.dpi)?;
    render_with(&String::from_utf8_lossy(text), &config, &scaled)
}

/// Render text into an image using any [GlyphRasterizer].
///
/// The canvas is filled with the background colour, then each line is drawn at the
/// pen position given by the [CanvasPlan](crate::layout::CanvasPlan). A line that fails
/// to draw does not stop the remaining lines; the first failure is returned together
/// with the finished image in [RenderFailure::partial].
pub fn render_with<R>(text: &str, config: &RenderConfig, glyphs: &R) -> Result<RgbaImage, RenderFailure>
where
    R: GlyphRasterizer + ?Sized,
{
    let text_colour = config.text_colour();
    let background = config.background_colour();

    let canvas_plan = plan(text, config, glyphs);
    let mut canvas = Pixmap::new(canvas_plan.width, canvas_plan.height).ok_or_else(|| {
        RenderError::RenderingUnavailable(format!(
            "cannot allocate a {}x{} canvas",
            canvas_plan.width, canvas_plan.height
        ))
    })?;
    canvas.fill(background.to_skia());

    let mut failure: Option<RenderError> = None;
    for (index, line) in split_lines(text).into_iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        let pen = canvas_plan.pen_position(index);
        trace!("line {index} at ({}, {}): {line:?}", pen.x, pen.y);
        if let Err(e) = glyphs.draw_line(&mut canvas, line, pen, text_colour) {
            let e = match e {
                RenderError::DrawFailure { reason, .. } => RenderError::DrawFailure {
                    line: index,
                    reason,
                },
                other => RenderError::DrawFailure {
                    line: index,
                    reason: other.to_string(),
                },
            };
            debug!("{e}");
            if failure.is_none() {
                failure = Some(e);
            }
        }
    }

    let image = into_image(&canvas)?;
    match failure {
        Some(error) => Err(RenderFailure {
            error,
            partial: Some(image),
        }),
        None => Ok(image),
    }
}

/// Read the text to render from `path`, or from standard input when `path` is [None]
/// or `-`
pub fn read_text(path: Option<&Path>) -> Result<Vec<u8>, RenderError> {
    let mut text = Vec::new();
    match path {
        Some(path) if path.as_os_str() != "-" => {
            File::open(path)?.read_to_end(&mut text)?;
        }
        _ => {
            std::io::stdin().lock().read_to_end(&mut text)?;
        }
    }
    Ok(text)
}

/// Write an image to `path` as a PNG
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<(), RenderError> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

// tiny-skia stores premultiplied alpha, images carry straight alpha
fn into_image(canvas: &Pixmap) -> Result<RgbaImage, RenderError> {
    let data: Vec<u8> = canvas
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(canvas.width(), canvas.height(), data).ok_or_else(|| {
        RenderError::RenderingUnavailable("pixel buffer size does not match canvas".into())
    })
}
