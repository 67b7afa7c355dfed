//! Text layout: turning a block of text into a canvas size and per-line pen positions.
//!
//! Layout happens in three steps:
//!
//! - [`split_lines`](crate::layout::split_lines) breaks the text on newlines
//! - [`measure_block`](crate::layout::measure_block) finds the tight bounding box of those lines
//! - [`plan`](crate::layout::plan) applies margins and squaring, producing a [`CanvasPlan`](crate::layout::CanvasPlan)
//!
//! # Example
//!
//! ```
//! use t2i::{Font, RenderConfig};
//! use t2i::layout::plan;
//!
//! let font = Font::default_mono().expect("can load font");
//! let metrics = font.scaled(12.0, 120.0).expect("can scale font");
//!
//! let config = RenderConfig::default().with_auto_size(true).with_square(true);
//! let canvas = plan("Hello,\nworld!", &config, &metrics);
//! assert_eq!(canvas.width, canvas.height);
//! assert_eq!(canvas.width % 24, 0);
//! ```

mod canvas;
mod text;

pub use canvas::*;
pub use text::*;
