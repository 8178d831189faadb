//! ASCII Shade - grayscale image to ASCII art converter
//!
//! Images are converted in two stages:
//! 1. [`convert`] decodes an image, resizes it to a target width and maps
//!    each pixel's luminance to a palette character, producing an
//!    [`AsciiGrid`].
//! 2. [`render_to_png`] draws an [`AsciiGrid`] as black text on a
//!    transparent canvas and saves it as PNG.
//!
//! # Example
//! ```no_run
//! use ascii_shade::{AsciiConfig, FontFace, convert, render_to_png};
//!
//! let config = AsciiConfig::default();
//! if let Some(grid) = convert("photo.jpg", &config) {
//!     println!("{grid}");
//!     grid.write_text(&config.output_text_path).unwrap();
//!     render_to_png(&grid, &FontFace::builtin(), &config.output_image_path).unwrap();
//! }
//! ```

pub mod ascii;
pub mod config;
pub mod error;
pub mod filters;
pub mod font;
pub mod lut;
pub mod processor;
pub mod raster;

// Re-export main types for convenience
pub use ascii::AsciiGrid;
pub use config::{AsciiConfig, FontSpec};
pub use error::{ErrorKind, RenderError, Stage};
pub use font::FontFace;
pub use lut::Palette;
pub use processor::{convert, convert_image, try_convert};
pub use raster::{GlyphMetrics, measure_glyph, rasterize, render_to_png};
