//! Tests for tile directory loading: extension filtering, failure isolation and collisions

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgb, RgbImage};
    use photomosaic::Color;
    use photomosaic::tiles::repository::{
        TileDiagnostic, collect_tile_paths, is_tile_file, load_tiles,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_solid(dir: &Path, name: &str, size: u32, rgb: [u8; 3], format: ImageFormat) {
        let image = RgbImage::from_pixel(size, size, Rgb(rgb));
        let saved = image.save_with_format(dir.join(name), format);
        assert!(saved.is_ok(), "failed to write {name}");
    }

    // Tests extension matching is case-insensitive and limited to known formats
    // Verified by comparing extensions case-sensitively
    #[test]
    fn test_is_tile_file() {
        assert!(is_tile_file(Path::new("a.jpg")));
        assert!(is_tile_file(Path::new("a.JPEG")));
        assert!(is_tile_file(Path::new("dir/b.Png")));
        assert!(!is_tile_file(Path::new("c.gif")));
        assert!(!is_tile_file(Path::new("notes.txt")));
        assert!(!is_tile_file(Path::new("png")));
    }

    // Tests a missing directory yields an empty palette instead of an error
    // Verified by propagating the read_dir error
    #[test]
    fn test_missing_directory_is_empty() -> photomosaic::Result<()> {
        let missing = Path::new("definitely/not/a/tile/dir");
        let load = load_tiles(missing, 4)?;
        assert!(load.palette.is_empty());
        assert!(load.diagnostics.is_empty());
        assert!(collect_tile_paths(missing)?.is_empty());
        Ok(())
    }

    // Tests invalid tile sizes are rejected before scanning
    // Verified by removing tile size validation
    #[test]
    fn test_invalid_tile_size() {
        assert!(load_tiles(Path::new("."), 0).is_err());
    }

    // Tests valid images load, unknown files are ignored and sizes are normalized
    // Verified by loading every directory entry
    #[test]
    fn test_loads_and_normalizes() -> photomosaic::Result<()> {
        let dir = TempDir::new()?;
        write_solid(dir.path(), "red.png", 8, [255, 0, 0], ImageFormat::Png);
        write_solid(dir.path(), "BLUE.PNG", 3, [0, 0, 255], ImageFormat::Png);
        write_solid(dir.path(), "photo.JPG", 5, [0, 200, 0], ImageFormat::Jpeg);
        fs::write(dir.path().join("readme.txt"), "not an image")?;

        let load = load_tiles(dir.path(), 4)?;
        assert_eq!(load.palette.len(), 3);
        assert!(load.diagnostics.is_empty());
        assert!(load.palette.contains(Color::new(255, 0, 0)));
        assert!(load.palette.contains(Color::new(0, 0, 255)));
        for tile in load.palette.tiles() {
            assert_eq!(tile.size(), 4);
        }
        Ok(())
    }

    // Tests a corrupt file is skipped with a diagnostic and loading continues
    // Verified by propagating the decode error
    #[test]
    fn test_corrupt_file_skipped() -> photomosaic::Result<()> {
        let dir = TempDir::new()?;
        write_solid(dir.path(), "good.png", 4, [10, 20, 30], ImageFormat::Png);
        fs::write(dir.path().join("broken.jpg"), b"definitely not a jpeg")?;

        let load = load_tiles(dir.path(), 4)?;
        assert_eq!(load.palette.len(), 1);
        assert_eq!(load.skipped_count(), 1);
        assert!(matches!(
            load.diagnostics.first(),
            Some(TileDiagnostic::Skipped { path, .. }) if path.ends_with("broken.jpg")
        ));
        Ok(())
    }

    // Tests colliding mean colors keep the later file in sorted order
    // Verified by inserting in directory order without sorting
    #[test]
    fn test_collision_reported() -> photomosaic::Result<()> {
        let dir = TempDir::new()?;
        write_solid(dir.path(), "a.png", 4, [50, 60, 70], ImageFormat::Png);
        write_solid(dir.path(), "b.png", 4, [50, 60, 70], ImageFormat::Png);

        let load = load_tiles(dir.path(), 4)?;
        assert_eq!(load.palette.len(), 1);
        assert_eq!(load.palette.replaced_count(), 1);
        assert_eq!(
            load.diagnostics,
            vec![TileDiagnostic::Replaced {
                path: dir.path().join("b.png"),
                color: Color::new(50, 60, 70),
            }]
        );
        Ok(())
    }

    // Tests an empty directory gives an empty palette
    // Verified by treating an empty palette as an error
    #[test]
    fn test_empty_directory() -> photomosaic::Result<()> {
        let dir = TempDir::new()?;
        let load = load_tiles(dir.path(), 16)?;
        assert!(load.palette.is_empty());
        assert_eq!(load.palette.tile_size(), 16);
        Ok(())
    }

    // Tests diagnostics render the offending path
    // Verified by omitting the path from the message
    #[test]
    fn test_diagnostic_display() {
        let skipped = TileDiagnostic::Skipped {
            path: "tiles/x.png".into(),
            reason: "bad header".to_string(),
        };
        assert!(skipped.to_string().contains("tiles/x.png"));
        assert!(skipped.to_string().contains("bad header"));
    }
}
