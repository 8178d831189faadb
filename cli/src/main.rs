mod args;

use args::{Cli, Command, ConvertArgs, FontArgs, RenderArgs};
use ascii_shade::{AsciiGrid, FontFace, RenderError, Stage, render_to_png, try_convert};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configure logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Render(args) => run_render(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err((stage, e)) => {
            log::error!("{stage}: {e}");
            ExitCode::FAILURE
        }
    }
}

type StageResult = Result<(), (Stage, RenderError)>;

fn at(stage: Stage) -> impl Fn(RenderError) -> (Stage, RenderError) {
    move |e| (stage, e)
}

fn run_convert(args: ConvertArgs) -> StageResult {
    let config = args.to_config().map_err(at(Stage::Config))?;
    config.validate().map_err(at(Stage::Config))?;

    // Load the font up front so a bad path fails before any output is written
    let font = if args.no_image {
        None
    } else {
        Some(load_font(&args.font)?)
    };

    let grid = try_convert(&args.image, &config).map_err(at(Stage::Convert))?;

    if args.print {
        println!("{grid}");
    }

    grid.write_text(&config.output_text_path).map_err(at(Stage::Output))?;

    if let Some(font) = font {
        render_to_png(&grid, &font, &config.output_image_path).map_err(at(Stage::Rasterize))?;
    }

    Ok(())
}

fn run_render(args: RenderArgs) -> StageResult {
    let grid = AsciiGrid::read_text(&args.text).map_err(at(Stage::Rasterize))?;
    let font = load_font(&args.font)?;
    render_to_png(&grid, &font, &args.output_image).map_err(at(Stage::Rasterize))
}

fn load_font(args: &FontArgs) -> Result<FontFace, (Stage, RenderError)> {
    FontFace::from_spec(&args.to_spec()).map_err(at(Stage::Rasterize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii_shade::ErrorKind;
    use image::{GrayImage, Luma};
    use std::path::Path;
    use tempfile::TempDir;

    fn convert_args(dir: &Path, image: &Path, extra: &[&str]) -> ConvertArgs {
        let text = dir.join("ascii_art.txt");
        let png = dir.join("ascii_art.png");
        let mut argv = vec![
            "ascii-shade".to_string(),
            "convert".to_string(),
            image.display().to_string(),
            "-o".to_string(),
            text.display().to_string(),
            "-i".to_string(),
            png.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));

        match Cli::try_parse_from(argv).unwrap().command {
            Command::Convert(args) => args,
            Command::Render(_) => panic!("expected convert"),
        }
    }

    fn write_gray(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("input.png");
        GrayImage::from_pixel(40, 20, Luma([200])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_run_convert_missing_image_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let args = convert_args(dir.path(), &dir.path().join("missing.png"), &[]);

        let (stage, err) = run_convert(args).unwrap_err();
        assert_eq!(stage, Stage::Convert);
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(!dir.path().join("ascii_art.txt").exists());
        assert!(!dir.path().join("ascii_art.png").exists());
    }

    #[test]
    fn test_run_convert_bad_font_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let image = write_gray(dir.path());
        let font = dir.path().join("missing.ttf");
        let args = convert_args(dir.path(), &image, &["--font", font.to_str().unwrap()]);

        let (stage, err) = run_convert(args).unwrap_err();
        assert_eq!(stage, Stage::Rasterize);
        assert_eq!(err.kind(), ErrorKind::FontLoad);
        assert!(!dir.path().join("ascii_art.txt").exists());
        assert!(!dir.path().join("ascii_art.png").exists());
    }

    #[test]
    fn test_run_convert_writes_both_outputs() {
        let dir = TempDir::new().unwrap();
        let image = write_gray(dir.path());
        let args = convert_args(dir.path(), &image, &["-w", "10"]);

        run_convert(args).unwrap();
        let text = std::fs::read_to_string(dir.path().join("ascii_art.txt")).unwrap();
        assert_eq!(text, "@@@@@@@@@@\n@@@@@@@@@@\n@@@@@@@@@@\n@@@@@@@@@@\n@@@@@@@@@@");
        assert!(dir.path().join("ascii_art.png").exists());
    }

    #[test]
    fn test_run_render_missing_text() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "ascii-shade",
            "render",
            dir.path().join("grid.txt").to_str().unwrap(),
        ])
        .unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };

        let (stage, err) = run_render(args).unwrap_err();
        assert_eq!(stage, Stage::Rasterize);
        assert!(err.to_string().starts_with("failed to read "));
    }
}
