use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use t2i::layout::expand_tabs;
use t2i::{read_text, render, save_png, Colour, Font, RenderConfig};

/// Render plain text into a PNG image
#[derive(Parser, Debug)]
#[command(name = "t2i", version, about)]
struct Args {
    /// Text file to render; reads standard input when omitted or `-`
    input: Option<PathBuf>,

    /// Margin around the text (pixels)
    #[arg(short = 'm', long, default_value_t = t2i::DEFAULT_MARGIN)]
    margin: u32,

    /// Number of spaces to replace each tab
    #[arg(short = 't', long, default_value_t = 4)]
    tab_size: usize,

    /// Force the image to be square
    #[arg(short = 's', long)]
    square: bool,

    /// Text color in HEX format
    #[arg(short = 'c', long, default_value = "#000")]
    text_color: String,

    /// Background color in HEX format
    #[arg(short = 'b', long, default_value = "#fff")]
    bg_color: String,

    /// Transparent background; overrides --bg-color
    #[arg(long)]
    transparent: bool,

    /// Space between lines, as a multiple of the line height
    #[arg(short = 'l', long, default_value_t = t2i::DEFAULT_LINE_SPACING)]
    line_spacing: f64,

    /// Font size (points)
    #[arg(long, default_value_t = t2i::DEFAULT_CLI_FONT_SIZE)]
    font_size: f64,

    /// Rendering resolution (dots per inch)
    #[arg(long, default_value_t = t2i::DEFAULT_DPI)]
    dpi: f64,

    /// Text block width (pixels); disables fitting the image to the text
    #[arg(long, default_value_t = 0)]
    width: u32,

    /// Text block height (pixels); disables fitting the image to the text
    #[arg(long, default_value_t = 0)]
    height: u32,

    /// TrueType or OpenType font to use instead of the bundled monospace font
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output PNG file path
    #[arg(short = 'o', long, default_value = "out.png")]
    output: PathBuf,

    /// Log what is being rendered
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<RenderConfig> {
        let text_colour: Colour = self.text_color.parse().context("Invalid text color")?;
        let background: Colour = self.bg_color.parse().context("Invalid background color")?;

        let mut config = RenderConfig::cli_profile()
            .with_margin(self.margin)
            .with_font(self.font_size, self.dpi)
            .with_square(self.square)
            .with_line_spacing(self.line_spacing)
            .with_colours(Some(text_colour), Some(background));
        if self.transparent {
            config = config.with_colours(Some(text_colour), None).with_transparent_background(true);
        }
        if self.width > 0 || self.height > 0 {
            config = config.with_size(self.width, self.height);
        }
        Ok(config)
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        let source = match &self.input {
            Some(path) if path.as_os_str() != "-" => path.display().to_string(),
            _ => "standard input".to_string(),
        };
        let text = read_text(self.input.as_deref()).with_context(|| format!("unable to read {source}"))?;
        Ok(text)
    }

    fn load_font(&self) -> Result<Font> {
        let font = match &self.font {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("unable to read font {}", path.display()))?;
                Font::load(bytes).with_context(|| format!("unable to load font {}", path.display()))?
            }
            None => Font::default_mono().context("unable to load the bundled font")?,
        };
        Ok(font)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = args.config()?;
    let font = args.load_font()?;
    let input = args.read_input()?;
    let text = expand_tabs(&String::from_utf8_lossy(&input), args.tab_size);
    info!(
        "rendering {} bytes with {}",
        text.len(),
        font.name().unwrap_or_else(|| "unnamed font".into())
    );

    match render(text.as_bytes(), &config, &font) {
        Ok(image) => {
            save_png(&image, &args.output)
                .with_context(|| format!("unable to write {}", args.output.display()))?;
            info!(
                "wrote {}x{} image to {}",
                image.width(),
                image.height(),
                args.output.display()
            );
            Ok(())
        }
        Err(failure) => {
            if let Some(partial) = &failure.partial {
                warn!("writing partially rendered image to {}", args.output.display());
                save_png(partial, &args.output)
                    .with_context(|| format!("unable to write {}", args.output.display()))?;
            }
            Err(failure.into_error().into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use t2i::colours;

    #[test]
    fn flags_map_onto_the_render_config() {
        let args = Args::parse_from(["t2i", "-m", "8", "-s", "-c", "#f00", "-l", "2", "notes.txt"]);
        let config = args.config().unwrap();
        assert_eq!(config.margin, 8);
        assert!(config.square);
        assert!(config.auto_size);
        assert_eq!(config.line_spacing, 2.0);
        assert_eq!(config.text_colour(), colours::RED);
        assert_eq!(config.background_colour(), colours::WHITE);
        assert_eq!(args.input, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.output, PathBuf::from("out.png"));
    }

    #[test]
    fn explicit_dimensions_turn_off_auto_size() {
        let args = Args::parse_from(["t2i", "--width", "300"]);
        let config = args.config().unwrap();
        assert!(!config.auto_size);
        assert_eq!((config.width, config.height), (300, 0));
    }

    #[test]
    fn transparent_wins_over_background_colour() {
        let args = Args::parse_from(["t2i", "--transparent", "-b", "#123"]);
        let config = args.config().unwrap();
        assert_eq!(config.background_colour(), colours::TRANSPARENT);
    }

    #[test]
    fn invalid_colours_name_the_culprit() {
        let args = Args::parse_from(["t2i", "-b", "#12"]);
        let err = args.config().unwrap_err();
        assert_eq!(err.to_string(), "Invalid background color");
    }

    #[test]
    fn missing_input_file_names_the_path() {
        let args = Args::parse_from(["t2i", "/definitely/not/here.txt"]);
        let err = args.read_input().unwrap_err();
        assert_eq!(err.to_string(), "unable to read /definitely/not/here.txt");
        assert!(matches!(
            err.downcast_ref::<t2i::RenderError>(),
            Some(t2i::RenderError::Io(_))
        ));
    }
}
