use crate::error::{RenderError, Result};
use crate::lut::Palette;
use image::GrayImage;
use std::fmt;
use std::fs;
use std::path::Path;

/// Quantize every pixel of `image` into a palette character
///
/// Pixels are visited in row-major order, so the result holds
/// `width * height` characters.
///
/// # Arguments
/// * `image` - Resized grayscale image
/// * `palette` - Characters ordered darkest to brightest
/// * `invert` - Whether to invert the luminance mapping
pub fn quantize(image: &GrayImage, palette: &Palette, invert: bool) -> Vec<char> {
    image
        .pixels()
        .map(|pixel| palette.char_for(pixel[0], invert))
        .collect()
}

/// Rows of characters making up a piece of ASCII art
///
/// Grids built by [`AsciiGrid::from_chars`] are rectangular. Grids parsed
/// from external text keep whatever row lengths the text had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiGrid {
    rows: Vec<String>,
}

impl AsciiGrid {
    /// Split a flat character sequence into rows of `row_width` characters
    ///
    /// The last row is shorter only when `chars.len()` is not a multiple of
    /// `row_width`, which never happens for output of [`quantize`].
    pub fn from_chars(chars: &[char], row_width: usize) -> Result<Self> {
        if row_width == 0 {
            return Err(RenderError::InvalidDimension {
                width: 0,
                height: chars.len() as u64,
            });
        }

        let rows = chars
            .chunks(row_width)
            .map(|row| row.iter().collect::<String>())
            .collect();

        Ok(Self { rows })
    }

    /// Parse newline-delimited text, accepting `\r\n` line endings
    pub fn parse(text: &str) -> Self {
        let rows = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        Self { rows }
    }

    /// Read a grid back from a text file written by [`AsciiGrid::write_text`]
    ///
    /// Trailing line breaks are dropped so editors that append one do not
    /// add an empty row.
    pub fn read_text(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RenderError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(text.trim_end_matches(['\r', '\n'])))
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Characters in the first row
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.chars().count())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row, counted in characters
    pub fn max_row_len(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        self.rows.iter().all(|row| row.chars().count() == width)
    }

    /// Write the grid as text, rows joined by a single newline
    pub fn write_text(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|e| RenderError::encode(path, e))?;

        log::info!("ASCII art saved to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}
