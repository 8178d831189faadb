//! Character palettes and luminance quantization
//!
//! A palette is an ordered list of characters from darkest to brightest.
//! Every 8-bit luminance value falls into exactly one band of the palette.

use crate::error::{RenderError, Result};
use std::fmt;
use std::str::FromStr;

/// Three-tone palette: space for dark, `#` for mid-gray, `@` for bright
pub const DEFAULT_CHARS: [char; 3] = [' ', '#', '@'];

/// Ordered character palette, darkest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            chars: DEFAULT_CHARS.to_vec(),
        }
    }
}

impl Palette {
    /// Build a palette from characters ordered darkest to brightest
    ///
    /// Needs at least two characters and none of them may break a line.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Result<Self> {
        let chars: Vec<char> = chars.into_iter().collect();
        if chars.len() < 2 {
            return Err(RenderError::InvalidConfig(format!(
                "palette needs at least 2 characters, got {}",
                chars.len()
            )));
        }
        if let Some(ch) = chars.iter().find(|c| matches!(c, '\n' | '\r')) {
            return Err(RenderError::InvalidConfig(format!(
                "palette may not contain line breaks, got {ch:?}"
            )));
        }
        Ok(Self { chars })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false, a palette holds at least two characters
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Band index for a luminance value: `p * len / 256`
    ///
    /// Integer truncation is significant. With three characters the band
    /// edges sit at 256/3 and 512/3, so 85 is still dark and 86 is mid.
    pub fn band(&self, luminance: u8) -> usize {
        luminance as usize * self.chars.len() / 256
    }

    /// Get the character for a luminance value
    ///
    /// # Arguments
    /// * `luminance` - 8-bit luminance, 0 is black
    /// * `invert` - Map bright pixels to the dark end of the palette
    pub fn char_for(&self, luminance: u8, invert: bool) -> char {
        let luminance = if invert { 255 - luminance } else { luminance };
        self.chars[self.band(luminance)]
    }
}

impl FromStr for Palette {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        Palette::new(s.chars())
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let palette = Palette::default();
        assert_eq!(palette.char_for(0, false), ' ');
        assert_eq!(palette.char_for(128, false), '#');
        assert_eq!(palette.char_for(255, false), '@');
    }

    #[test]
    fn test_band_boundaries() {
        let palette = Palette::default();
        assert_eq!(palette.band(85), 0);
        assert_eq!(palette.band(86), 1);
        assert_eq!(palette.band(170), 1);
        assert_eq!(palette.band(171), 2);
    }

    #[test]
    fn test_inverted() {
        let palette = Palette::default();
        assert_eq!(palette.char_for(0, true), '@');
        assert_eq!(palette.char_for(255, true), ' ');
    }

    #[test]
    fn test_two_char_palette() {
        let palette: Palette = ".#".parse().unwrap();
        assert_eq!(palette.char_for(127, false), '.');
        assert_eq!(palette.char_for(128, false), '#');
    }

    #[test]
    fn test_wide_palette_covers_every_char() {
        let palette: Palette = " .:-=+*#%@".parse().unwrap();
        let used: std::collections::BTreeSet<char> =
            (0..=255u8).map(|p| palette.char_for(p, false)).collect();
        assert_eq!(used.len(), 10);
        assert_eq!(palette.char_for(255, false), '@');
    }

    #[test]
    fn test_invalid_palettes() {
        assert!("@".parse::<Palette>().is_err());
        assert!("".parse::<Palette>().is_err());
        assert!(" \n@".parse::<Palette>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let palette = Palette::default();
        assert_eq!(palette.to_string(), " #@");
    }
}
