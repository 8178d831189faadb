//! Fonts the rasterizer can measure and draw with
//!
//! [`FontFace`] has two construction paths, [`FontFace::builtin`] for the
//! fixed-width bitmap font compiled into the crate and [`FontFace::load`]
//! for a TrueType/OpenType file. Everything downstream only sees the
//! bounding-box query and the text drawing call.

use crate::config::FontSpec;
use crate::error::{RenderError, Result};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use std::fs;
use std::path::{Path, PathBuf};

/// Cell width of the built-in font
pub const BUILTIN_CELL_WIDTH: u32 = 8;
/// Cell height of the built-in font
pub const BUILTIN_CELL_HEIGHT: u32 = 12;

/// Ink bounds of a glyph, in pixels relative to the text origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl GlyphBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// A measurable, drawable font
pub enum FontFace {
    /// 8x12 bitmap font, independent of any size setting
    Builtin,
    /// Outline font rendered at a fixed pixel scale
    Outline {
        font: FontVec,
        scale: PxScale,
        path: PathBuf,
    },
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontFace::Builtin => f.write_str("FontFace::Builtin"),
            FontFace::Outline { scale, path, .. } => f
                .debug_struct("FontFace::Outline")
                .field("path", path)
                .field("scale", &scale.y)
                .finish(),
        }
    }
}

impl FontFace {
    pub fn builtin() -> Self {
        FontFace::Builtin
    }

    /// Load an outline font file at `size` pixels
    pub fn load(path: impl AsRef<Path>, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let font_load = |reason: String| RenderError::FontLoad {
            path: path.to_path_buf(),
            reason,
        };

        if !size.is_finite() || size <= 0.0 {
            return Err(font_load(format!("font size must be positive, got {size}")));
        }

        let data = fs::read(path).map_err(|e| font_load(e.to_string()))?;
        let font = FontVec::try_from_vec(data).map_err(|e| font_load(e.to_string()))?;

        log::debug!("loaded font {} at {size}px", path.display());

        Ok(FontFace::Outline {
            font,
            scale: PxScale::from(size),
            path: path.to_path_buf(),
        })
    }

    /// Pick the font named by `spec`, falling back to the built-in one
    pub fn from_spec(spec: &FontSpec) -> Result<Self> {
        match &spec.path {
            Some(path) => FontFace::load(path, spec.size),
            None => {
                if spec.size != FontSpec::default().size {
                    log::warn!(
                        "built-in font is fixed at {BUILTIN_CELL_WIDTH}x{BUILTIN_CELL_HEIGHT}, ignoring size {}",
                        spec.size
                    );
                }
                Ok(FontFace::builtin())
            }
        }
    }

    /// Ink bounding box of `ch` when drawn at the origin
    ///
    /// Returns `None` for glyphs without ink, such as a space.
    pub fn bbox(&self, ch: char) -> Option<GlyphBounds> {
        match self {
            FontFace::Builtin => builtin_bbox(ch),
            FontFace::Outline { font, scale, .. } => {
                // Same baseline placement imageproc uses when drawing
                let ascent = font.as_scaled(*scale).ascent();
                let glyph = font
                    .glyph_id(ch)
                    .with_scale_and_position(*scale, point(0.0, ascent));
                let outlined = font.outline_glyph(glyph)?;
                let bounds = outlined.px_bounds();

                Some(GlyphBounds {
                    left: bounds.min.x.floor() as i32,
                    top: bounds.min.y.floor() as i32,
                    right: bounds.max.x.ceil() as i32,
                    bottom: bounds.max.y.ceil() as i32,
                })
            }
        }
    }

    /// Draw one line of `text` with its origin at `(x, y)`
    ///
    /// Built-in glyphs advance by a whole cell; outline glyphs advance by
    /// their own metrics. Ink outside the canvas is clipped.
    pub fn draw_text(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        match self {
            FontFace::Builtin => {
                for (col, ch) in text.chars().enumerate() {
                    let cell_x = x as i64 + col as i64 * BUILTIN_CELL_WIDTH as i64;
                    draw_builtin_glyph(canvas, cell_x, y as i64, ch, color);
                }
            }
            FontFace::Outline { font, scale, .. } => {
                draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
        }
    }
}

fn draw_builtin_glyph(canvas: &mut RgbaImage, cell_x: i64, cell_y: i64, ch: char, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();

    for local_y in 0..BUILTIN_CELL_HEIGHT {
        for local_x in 0..BUILTIN_CELL_WIDTH {
            if !builtin_ink(ch, local_x, local_y) {
                continue;
            }

            let px = cell_x + local_x as i64;
            let py = cell_y + local_y as i64;
            if (0..width as i64).contains(&px) && (0..height as i64).contains(&py) {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

fn builtin_bbox(ch: char) -> Option<GlyphBounds> {
    let mut bounds: Option<GlyphBounds> = None;

    for y in 0..BUILTIN_CELL_HEIGHT as i32 {
        for x in 0..BUILTIN_CELL_WIDTH as i32 {
            if !builtin_ink(ch, x as u32, y as u32) {
                continue;
            }
            let b = bounds.get_or_insert(GlyphBounds {
                left: x,
                top: y,
                right: x + 1,
                bottom: y + 1,
            });
            b.left = b.left.min(x);
            b.top = b.top.min(y);
            b.right = b.right.max(x + 1);
            b.bottom = b.bottom.max(y + 1);
        }
    }

    bounds
}

/// Column of a diagonal running from the top-left to the bottom-right
fn diagonal(y: u32) -> u32 {
    y * (BUILTIN_CELL_WIDTH - 1) / (BUILTIN_CELL_HEIGHT - 1)
}

/// Whether the built-in glyph for `ch` has ink at `(x, y)` in its 8x12 cell
///
/// # Arguments
/// * `ch` - The character
/// * `x` - X position within the cell (0-7)
/// * `y` - Y position within the cell (0-11)
pub fn builtin_ink(ch: char, x: u32, y: u32) -> bool {
    const RIGHT: u32 = BUILTIN_CELL_WIDTH - 1;
    const BOTTOM: u32 = BUILTIN_CELL_HEIGHT - 1;

    if x > RIGHT || y > BOTTOM {
        return false;
    }

    match ch {
        ' ' => false,

        // Full-cell cross, the reference glyph for measuring
        'X' | 'x' => x == diagonal(y) || x == RIGHT - diagonal(y),

        '#' => {
            let upright = (x == 2 || x == 5) && (1..=10).contains(&y);
            let crossbar = (y == 4 || y == 7) && (1..=6).contains(&x);
            upright || crossbar
        }

        '@' => {
            // Ring with a filled core, centered in the cell
            let dx = 2 * x as i32 - RIGHT as i32;
            let dy = 2 * y as i32 - BOTTOM as i32;
            let outer = 9 * dx * dx + 4 * dy * dy <= 441;
            let inner = 9 * dx * dx + 4 * dy * dy <= 200;
            let core = dx.abs() <= 1 && dy.abs() <= 3;
            (outer && !inner) || core
        }

        '.' => (3..=4).contains(&x) && (9..=10).contains(&y),

        ':' => (3..=4).contains(&x) && matches!(y, 3 | 4 | 8 | 9),

        '-' => (1..=6).contains(&x) && (y == 5 || y == 6),

        '=' => (1..=6).contains(&x) && (y == 4 || y == 7),

        '+' => {
            let upright = (x == 3 || x == 4) && (2..=9).contains(&y);
            let crossbar = (y == 5 || y == 6) && (1..=6).contains(&x);
            upright || crossbar
        }

        '*' => {
            let plus = builtin_ink('+', x, y);
            let inner = (3..=8).contains(&y);
            plus || (inner && (x == diagonal(y) || x == RIGHT - diagonal(y)))
        }

        '%' => {
            let slash = x == RIGHT - diagonal(y);
            let dots = (x <= 1 && y <= 2) || (x >= 6 && y >= 9);
            slash || dots
        }

        '|' => x == 3 || x == 4,

        '/' => x == RIGHT - diagonal(y),

        '\\' => x == diagonal(y),

        // Anything else renders as an outlined box
        _ => x == 0 || x == RIGHT || y == 0 || y == BOTTOM,
    }
}
