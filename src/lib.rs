mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod font;
pub use font::*;

mod glyphs;
pub use glyphs::*;

/// Utility functions and structures to lay text out on a canvas
pub mod layout;

mod render;
pub use render::*;

mod error;
pub use error::*;

/// Re-export tiny-skia, whose [tiny_skia::Pixmap] is the canvas a [GlyphRasterizer] draws on
pub use tiny_skia;
