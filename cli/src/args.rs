use ascii_shade::{AsciiConfig, FontSpec, Palette, RenderError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Turn images into three-tone ASCII art and back into transparent PNGs
#[derive(Parser, Debug)]
#[command(name = "ascii-shade", version, about)]
pub struct Cli {
    /// Log every pipeline step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image to ASCII art, saved as text and as a PNG
    Convert(ConvertArgs),
    /// Render an existing ASCII art text file to a PNG
    Render(RenderArgs),
}

/// Parse and validate a scale factor (finite, > 0)
fn parse_scale(s: &str) -> Result<f32, String> {
    let scale: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("scale must be greater than 0, got {s}"));
    }
    Ok(scale)
}

/// Parse and validate a font size in pixels (finite, > 0)
fn parse_font_size(s: &str) -> Result<f32, String> {
    let size: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid font size"))?;
    if !size.is_finite() || size <= 0.0 {
        return Err(format!("font size must be greater than 0, got {s}"));
    }
    Ok(size)
}

#[derive(Args, Debug)]
pub struct FontArgs {
    /// TrueType/OpenType font file; the built-in 8x12 font is used if omitted
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Font size in pixels, ignored by the built-in font
    #[arg(long, default_value_t = 16.0, value_parser = parse_font_size)]
    pub font_size: f32,
}

impl FontArgs {
    pub fn to_spec(&self) -> FontSpec {
        FontSpec {
            path: self.font.clone(),
            size: self.font_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Image to convert (PNG, JPEG, BMP, ...)
    pub image: PathBuf,

    /// Characters per row
    #[arg(short, long, default_value_t = 80, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Vertical scale; below 1.0 compensates for tall character cells
    #[arg(short, long, default_value_t = 1.0, value_parser = parse_scale)]
    pub scale: f32,

    /// Palette characters, darkest first
    #[arg(long, default_value = " #@")]
    pub palette: String,

    /// Map bright pixels to the dark end of the palette
    #[arg(long)]
    pub invert: bool,

    #[command(flatten)]
    pub font: FontArgs,

    /// Where to write the ASCII art text
    #[arg(short = 'o', long, default_value = "ascii_art.txt")]
    pub output_text: PathBuf,

    /// Where to write the rendered PNG
    #[arg(short = 'i', long, default_value = "ascii_art.png")]
    pub output_image: PathBuf,

    /// Skip rendering the PNG
    #[arg(long)]
    pub no_image: bool,

    /// Also print the ASCII art to stdout
    #[arg(long)]
    pub print: bool,
}

impl ConvertArgs {
    pub fn to_config(&self) -> Result<AsciiConfig, RenderError> {
        Ok(AsciiConfig {
            target_width: self.width,
            scale_factor: self.scale,
            palette: self.palette.parse::<Palette>()?,
            invert_luminance: self.invert,
            font: self.font.to_spec(),
            output_image_path: self.output_image.clone(),
            output_text_path: self.output_text.clone(),
        })
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// ASCII art text file
    pub text: PathBuf,

    #[command(flatten)]
    pub font: FontArgs,

    /// Where to write the rendered PNG
    #[arg(short = 'i', long, default_value = "ascii_art.png")]
    pub output_image: PathBuf,
}
