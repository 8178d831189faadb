use crate::error::{RenderError, Result};
use image::{DynamicImage, GrayImage, Luma, imageops};

/// Calculate luminance from any decoded image
///
/// Formula: L = R * 299/1000 + G * 587/1000 + B * 114/1000 (ITU-R 601-2)
/// Alpha is ignored, so transparent pixels keep their underlying color.
///
/// # Arguments
/// * `img` - Decoded image in any color model
///
/// # Returns
/// Grayscale image with luminance values
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = img {
        return gray.clone();
    }

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let r = pixel[0] as u32;
        let g = pixel[1] as u32;
        let b = pixel[2] as u32;

        // Fixed point with rounding, max is 255 * 1000 + 500
        let luminance = (r * 299 + g * 587 + b * 114 + 500) / 1000;
        output.put_pixel(x, y, Luma([luminance as u8]));
    }

    output
}

/// Compute the resize target for a source of `width`x`height`
///
/// Height is `floor(height / width * target_width * scale_factor)`.
///
/// # Returns
/// `(target_width, new_height)`, or `InvalidDimension` when either side
/// would be zero or does not fit in a `u32`
pub fn target_dimensions(
    width: u32,
    height: u32,
    target_width: u32,
    scale_factor: f32,
) -> Result<(u32, u32)> {
    if width == 0 || height == 0 || target_width == 0 {
        return Err(RenderError::InvalidDimension {
            width: target_width as u64,
            height: 0,
        });
    }

    let aspect_ratio = height as f64 / width as f64;
    let new_height = (aspect_ratio * target_width as f64 * scale_factor as f64).floor();

    // NaN is outside every range
    if !(1.0..=u32::MAX as f64).contains(&new_height) {
        return Err(RenderError::InvalidDimension {
            width: target_width as u64,
            height: if new_height.is_finite() && new_height > 0.0 {
                new_height as u64
            } else {
                0
            },
        });
    }

    Ok((target_width, new_height as u32))
}

/// Resize a grayscale image to `target_width` columns, preserving the
/// aspect ratio adjusted by `scale_factor`
///
/// `scale_factor` below 1.0 squashes the result vertically, which
/// compensates for character cells being taller than they are wide.
pub fn resize(input: &GrayImage, target_width: u32, scale_factor: f32) -> Result<GrayImage> {
    let (width, height) = input.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, target_width, scale_factor)?;

    log::debug!("resizing {width}x{height} -> {new_width}x{new_height}");

    Ok(imageops::resize(
        input,
        new_width,
        new_height,
        imageops::FilterType::CatmullRom,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_grayscale_primaries() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(2, 0, Rgb([0, 0, 255]));

        let gray = to_grayscale(&DynamicImage::ImageRgb8(img));
        assert_eq!(gray.get_pixel(0, 0)[0], 76);
        assert_eq!(gray.get_pixel(1, 0)[0], 150);
        assert_eq!(gray.get_pixel(2, 0)[0], 29);
    }

    #[test]
    fn test_grayscale_extremes() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));

        let gray = to_grayscale(&DynamicImage::ImageRgb8(img));
        assert_eq!(gray.get_pixel(0, 0)[0], 0);
        assert_eq!(gray.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 0]));
        let gray = to_grayscale(&DynamicImage::ImageRgba8(img));
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_target_dimensions_preserve_aspect() {
        assert_eq!(target_dimensions(200, 100, 80, 1.0).unwrap(), (80, 40));
        assert_eq!(target_dimensions(100, 100, 80, 0.5).unwrap(), (80, 40));
        assert_eq!(target_dimensions(3, 2, 2, 1.0).unwrap(), (2, 1));
    }

    #[test]
    fn test_target_dimensions_floor() {
        // 7 / 3 * 1 = 2.33
        assert_eq!(target_dimensions(3, 7, 1, 1.0).unwrap(), (1, 2));
    }

    #[test]
    fn test_target_dimensions_degenerate() {
        let err = target_dimensions(100, 100, 1, 0.0001).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimension { width: 1, height: 0 }));

        assert!(target_dimensions(100, 100, 0, 1.0).is_err());
        assert!(target_dimensions(100, 100, 10, f32::NAN).is_err());
        assert!(target_dimensions(1, u32::MAX, u32::MAX, 2.0).is_err());
    }

    #[test]
    fn test_resize_dimensions() {
        let img = GrayImage::from_pixel(160, 90, Luma([128]));
        let resized = resize(&img, 80, 1.0).unwrap();
        assert_eq!(resized.dimensions(), (80, 45));
    }

    #[test]
    fn test_resize_uniform_stays_uniform() {
        let img = GrayImage::from_pixel(64, 64, Luma([200]));
        let resized = resize(&img, 16, 0.5).unwrap();
        assert_eq!(resized.dimensions(), (16, 8));
        assert!(resized.pixels().all(|p| p[0].abs_diff(200) <= 1));
    }
}
