use crate::ascii::AsciiGrid;
use crate::error::{RenderError, Result};
use crate::font::FontFace;
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

/// Character measured to size every cell
pub const REFERENCE_CHAR: char = 'X';

/// Fully transparent white
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Opaque black
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Size of one character cell in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub char_width: u32,
    pub char_height: u32,
}

/// Measure the cell size of `font` from the bounding box of [`REFERENCE_CHAR`]
pub fn measure_glyph(font: &FontFace) -> Result<GlyphMetrics> {
    let font_error = |reason: &str| RenderError::FontLoad {
        path: match font {
            FontFace::Outline { path, .. } => path.clone(),
            FontFace::Builtin => "<builtin>".into(),
        },
        reason: reason.to_string(),
    };

    let bounds = font
        .bbox(REFERENCE_CHAR)
        .ok_or_else(|| font_error("reference glyph has no outline"))?;

    if bounds.width() <= 0 || bounds.height() <= 0 {
        return Err(font_error("reference glyph has an empty bounding box"));
    }

    let metrics = GlyphMetrics {
        char_width: bounds.width() as u32,
        char_height: bounds.height() as u32,
    };
    log::debug!(
        "glyph cell is {}x{}",
        metrics.char_width,
        metrics.char_height
    );

    Ok(metrics)
}

/// Render the grid as black text on a transparent canvas
///
/// The canvas is `char_width * longest_row` by `char_height * rows` pixels.
/// Row `i` is drawn at `(0, i * char_height)`, without wrapping.
///
/// # Returns
/// The canvas, or `InvalidCanvas` for an empty grid or a canvas too
/// large to address (rows are placed with `i32` offsets)
pub fn rasterize(grid: &AsciiGrid, metrics: GlyphMetrics, font: &FontFace) -> Result<RgbaImage> {
    let columns = grid.max_row_len() as u64;
    let rows = grid.height() as u64;

    let width = metrics.char_width as u64 * columns;
    let height = metrics.char_height as u64 * rows;

    if width == 0 || height == 0 || width > u32::MAX as u64 || height > i32::MAX as u64 {
        return Err(RenderError::InvalidCanvas { width, height });
    }

    log::debug!("canvas is {width}x{height} for {columns}x{rows} characters");

    let mut canvas = RgbaImage::from_pixel(width as u32, height as u32, BACKGROUND);

    for (i, row) in grid.rows().iter().enumerate() {
        let y_offset = i as u64 * metrics.char_height as u64;
        font.draw_text(&mut canvas, 0, y_offset as i32, row, INK);
    }

    Ok(canvas)
}

/// Encode `canvas` as PNG at `path`
pub fn save_png(canvas: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    canvas
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| RenderError::encode(path, e))
}

/// Measure, rasterize and save the grid as a transparent PNG
pub fn render_to_png(grid: &AsciiGrid, font: &FontFace, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let metrics = measure_glyph(font)?;
    let canvas = rasterize(grid, metrics, font)?;
    save_png(&canvas, path)?;

    log::info!("PNG saved to: {}", path.display());
    Ok(())
}
