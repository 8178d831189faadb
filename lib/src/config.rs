use crate::error::{RenderError, Result};
use crate::lut::Palette;
use std::path::PathBuf;

/// Font selection for the rasterizer
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub path: Option<PathBuf>, // None selects the built-in bitmap font
    pub size: f32,             // pixel size, default 16.0
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            path: None,
            size: 16.0,
        }
    }
}

/// Configuration for ASCII art conversion
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Sizing
    pub target_width: u32, // characters per row, default 80
    pub scale_factor: f32, // vertical stretch, default 1.0

    /// Characters
    pub palette: Palette,       // darkest to brightest, default " #@"
    pub invert_luminance: bool, // default false

    /// Rendering
    pub font: FontSpec,

    /// Outputs
    pub output_image_path: PathBuf, // default "ascii_art.png"
    pub output_text_path: PathBuf,  // default "ascii_art.txt"
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            // Sizing
            target_width: 80,
            scale_factor: 1.0,

            // Characters
            palette: Palette::default(),
            invert_luminance: false,

            // Rendering
            font: FontSpec::default(),

            // Outputs
            output_image_path: PathBuf::from("ascii_art.png"),
            output_text_path: PathBuf::from("ascii_art.txt"),
        }
    }
}

impl AsciiConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.target_width < 1 {
            return Err(RenderError::InvalidConfig(format!(
                "target_width must be at least 1, got {}",
                self.target_width
            )));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "scale_factor must be a positive number, got {}",
                self.scale_factor
            )));
        }
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "font size must be a positive number, got {}",
                self.font.size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AsciiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_width, 80);
        assert_eq!(config.palette.to_string(), " #@");
        assert_eq!(config.output_text_path, PathBuf::from("ascii_art.txt"));
    }

    #[test]
    fn test_invalid_target_width() {
        let config = AsciiConfig {
            target_width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_scale_factor() {
        let mut config = AsciiConfig::default();
        config.scale_factor = 0.0;
        assert!(config.validate().is_err());

        config.scale_factor = -1.0;
        assert!(config.validate().is_err());

        config.scale_factor = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_font_size() {
        let mut config = AsciiConfig::default();
        config.font.size = 0.0;
        assert!(config.validate().is_err());
    }
}
