//! Tests for argument parsing, output naming and end-to-end batch rendering

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{ImageFormat, Rgb, RgbImage};
    use photomosaic::io::cli::{Cli, FileProcessor, is_generated_output};
    use photomosaic::io::error::invalid_parameter;
    use photomosaic::io::image::load_image;
    use photomosaic::{Color, MosaicError};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_image(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
        let saved = RgbImage::from_pixel(width, height, Rgb(rgb))
            .save_with_format(path, ImageFormat::Png);
        assert!(saved.is_ok(), "failed to write {}", path.display());
    }

    fn tile_dir() -> std::io::Result<TempDir> {
        let dir = TempDir::new()?;
        write_image(&dir.path().join("dark.png"), 2, 2, [20, 20, 20]);
        write_image(&dir.path().join("light.png"), 2, 2, [230, 230, 230]);
        Ok(dir)
    }

    fn parse(args: &[&str]) -> Option<Cli> {
        Cli::try_parse_from(args).ok()
    }

    fn parse_paths(args: Vec<PathBuf>) -> photomosaic::Result<Cli> {
        Cli::try_parse_from(args)
            .map_err(|e| invalid_parameter("args", &"cli", &e))
    }

    fn render_directory(work: &Path, tiles: &Path) -> photomosaic::Result<()> {
        let cli = parse_paths(vec![
            "photomosaic".into(),
            work.to_path_buf(),
            "-t".into(),
            tiles.to_path_buf(),
            "-s".into(),
            "2".into(),
            "-q".into(),
        ])?;
        FileProcessor::new(cli).process()
    }

    // Tests defaults match the configuration constants
    // Verified by changing the default tile size
    #[test]
    fn test_default_arguments() {
        let cli = parse(&["photomosaic", "photo.jpg"]);
        assert!(cli.is_some());
        if let Some(cli) = cli {
            assert_eq!(cli.target, PathBuf::from("photo.jpg"));
            assert_eq!(cli.tiles, PathBuf::from("tile_images"));
            assert_eq!(cli.tile_size, 16);
            assert_eq!(cli.quality, 95);
            assert!(cli.output.is_none());
            assert!(cli.skip_existing());
            assert!(cli.should_show_progress());
        }
    }

    // Tests short and long flags are wired to the right fields
    // Verified by swapping the quality and size flags
    #[test]
    fn test_explicit_arguments() {
        let args: Vec<&str> = "photomosaic in -t tiles -s 8 -j 70 -o out.png -q -n"
            .split_whitespace()
            .collect();
        let cli = parse(&args);
        assert!(cli.is_some());
        if let Some(cli) = cli {
            assert_eq!(cli.tiles, PathBuf::from("tiles"));
            assert_eq!(cli.config().tile_size, 8);
            assert_eq!(cli.config().jpeg_quality, 70);
            assert_eq!(cli.output, Some(PathBuf::from("out.png")));
            assert!(!cli.should_show_progress());
            assert!(!cli.skip_existing());
        }
        assert!(parse(&["photomosaic"]).is_none());
    }

    // Tests output naming and recognition of earlier outputs
    // Verified by keeping the input extension
    #[test]
    fn test_output_naming() {
        let output = FileProcessor::get_output_path(Path::new("photos/cat.png"));
        assert_eq!(output, PathBuf::from("photos/cat_mosaic.jpeg"));
        assert!(is_generated_output(&output));
        assert!(!is_generated_output(Path::new("photos/cat.png")));
    }

    // Tests a single target renders to the requested output
    // Verified by skipping the export
    #[test]
    fn test_single_file() -> photomosaic::Result<()> {
        let tiles = tile_dir()?;
        let work = TempDir::new()?;
        let target = work.path().join("source.png");
        write_image(&target, 5, 5, [25, 25, 25]);
        let output = work.path().join("result.png");

        let cli = parse_paths(vec![
            "photomosaic".into(),
            target,
            "--tiles".into(),
            tiles.path().to_path_buf(),
            "--tile-size".into(),
            "2".into(),
            "--output".into(),
            output.clone(),
            "--quiet".into(),
        ])?;
        FileProcessor::new(cli).process()?;

        let mosaic = load_image(&output)?;
        assert_eq!((mosaic.width(), mosaic.height()), (4, 4));
        assert_eq!(mosaic.pixel(3, 3), Some(Color::new(20, 20, 20)));
        Ok(())
    }

    // Tests a directory target renders every image once and ignores earlier outputs
    // Verified by treating generated mosaics as new inputs
    #[test]
    fn test_directory_target() -> photomosaic::Result<()> {
        let tiles = tile_dir()?;
        let work = TempDir::new()?;
        write_image(&work.path().join("a.png"), 4, 4, [240, 240, 240]);
        write_image(&work.path().join("b.png"), 6, 2, [10, 10, 10]);

        render_directory(work.path(), tiles.path())?;
        render_directory(work.path(), tiles.path())?;

        assert!(work.path().join("a_mosaic.jpeg").exists());
        assert!(work.path().join("b_mosaic.jpeg").exists());
        assert!(!work.path().join("a_mosaic_mosaic.jpeg").exists());
        Ok(())
    }

    // Tests directory scanning skips folders, unsupported files and earlier outputs
    // Verified by scanning with a plain directory listing
    #[test]
    fn test_directory_scan_filters_entries() -> photomosaic::Result<()> {
        let tiles = tile_dir()?;
        let work = TempDir::new()?;
        write_image(&work.path().join("photo.png"), 4, 4, [200, 200, 200]);
        write_image(&work.path().join("old_mosaic.png"), 4, 4, [0, 0, 0]);
        fs::write(work.path().join("notes.txt"), "not an image")?;
        fs::create_dir(work.path().join("nested.png"))?;

        render_directory(work.path(), tiles.path())?;

        assert!(work.path().join("photo_mosaic.jpeg").exists());
        assert!(!work.path().join("old_mosaic_mosaic.jpeg").exists());
        assert!(!work.path().join("notes_mosaic.jpeg").exists());
        assert!(!work.path().join("nested_mosaic.jpeg").exists());
        Ok(())
    }

    // Tests an empty tile directory is fatal for the CLI
    // Verified by rendering with an empty palette
    #[test]
    fn test_empty_tiles_fatal() -> photomosaic::Result<()> {
        let tiles = TempDir::new()?;
        let work = TempDir::new()?;
        let target = work.path().join("source.png");
        write_image(&target, 4, 4, [1, 2, 3]);

        let cli = parse_paths(vec![
            "photomosaic".into(),
            target,
            "-t".into(),
            tiles.path().to_path_buf(),
            "-q".into(),
        ])?;
        assert!(matches!(
            FileProcessor::new(cli).process(),
            Err(MosaicError::EmptyPalette)
        ));
        Ok(())
    }

    // Tests --output is refused for directory targets and unknown targets fail
    // Verified by writing every mosaic to the same output
    #[test]
    fn test_invalid_targets() -> photomosaic::Result<()> {
        let work = TempDir::new()?;
        let target = work.path().to_string_lossy().to_string();
        let with_output = parse(&["photomosaic", target.as_str(), "-o", "x.jpeg", "-q"]);
        assert!(with_output.is_some());
        if let Some(cli) = with_output {
            assert!(FileProcessor::new(cli).process().is_err());
        }

        let missing = parse(&["photomosaic", "no/such/target.png", "-q"]);
        if let Some(cli) = missing {
            assert!(FileProcessor::new(cli).process().is_err());
        }
        Ok(())
    }
}
