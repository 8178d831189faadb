use crate::ascii::{AsciiGrid, quantize};
use crate::config::AsciiConfig;
use crate::error::{RenderError, Result};
use crate::filters::{resize, to_grayscale};
use image::DynamicImage;
use std::path::Path;

/// Decode the image at `path`
///
/// The file handle is closed before this returns, on success or failure.
pub fn decode(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| RenderError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Converts an already decoded image to ASCII art
///
/// This is the whole of stage 1 after decoding:
/// 1. Extract luminance
/// 2. Resize to `target_width` columns, height scaled by `scale_factor`
/// 3. Quantize every pixel into a palette character
/// 4. Split the characters into rows of the resized width
///
/// # Arguments
/// * `input` - Decoded image in any color model
/// * `config` - Configuration parameters for the conversion
pub fn convert_image(input: &DynamicImage, config: &AsciiConfig) -> Result<AsciiGrid> {
    config.validate()?;

    // Step 1: Extract luminance
    let lum = to_grayscale(input);

    // Step 2: Resize, preserving the aspect ratio
    let resized = resize(&lum, config.target_width, config.scale_factor)?;

    // Step 3: One character per pixel
    let chars = quantize(&resized, &config.palette, config.invert_luminance);

    // Step 4: Rows are exactly as wide as the resized image
    AsciiGrid::from_chars(&chars, resized.width() as usize)
}

/// Decode the image at `path` and convert it to ASCII art
pub fn try_convert(path: impl AsRef<Path>, config: &AsciiConfig) -> Result<AsciiGrid> {
    let path = path.as_ref();
    let input = decode(path)?;
    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        input.width(),
        input.height()
    );

    convert_image(&input, config)
}

/// Convert the image at `path`, reporting failures instead of returning them
///
/// Any error is logged with its cause and yields `None`. No partial output
/// is produced since nothing is written here.
pub fn convert(path: impl AsRef<Path>, config: &AsciiConfig) -> Option<AsciiGrid> {
    match try_convert(path, config) {
        Ok(grid) => Some(grid),
        Err(e) => {
            log::error!("{}: {e}", e.stage());
            None
        }
    }
}
