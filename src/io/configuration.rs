//! Engine constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};

/// Default tile edge length in pixels (smaller values give a sharper mosaic)
pub const DEFAULT_TILE_SIZE: usize = 16;

// Guards against allocating absurd tiles from a typo on the command line
/// Largest accepted tile edge length
pub const MAX_TILE_SIZE: usize = 512;

/// Directory scanned for tile images when none is given
pub const DEFAULT_TILE_DIRECTORY: &str = "tile_images";

/// File extensions recognized as tile images (compared case-insensitively)
pub const TILE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

// Below this the k-d tree has nothing to split
/// Minimum number of distinct colors for the k-d tree strategy
pub const MIN_INDEXED_COLORS: usize = 2;

// Output settings
/// JPEG quality used when saving mosaics
pub const DEFAULT_JPEG_QUALITY: u8 = 95;
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of generated mosaic files
pub const OUTPUT_EXTENSION: &str = "jpeg";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Runtime parameters shared by tile loading and mosaic export
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Tile and block edge length in pixels
    pub tile_size: usize,
    /// JPEG quality for exported mosaics (1-100)
    pub jpeg_quality: u8,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl MosaicConfig {
    /// Check both parameters are within their accepted ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the tile size is outside `1..=MAX_TILE_SIZE`
    /// or the JPEG quality is outside `1..=100`
    pub fn validate(&self) -> Result<()> {
        validate_tile_size(self.tile_size)?;
        validate_jpeg_quality(self.jpeg_quality)
    }
}

/// Check a tile edge length is usable
///
/// # Errors
///
/// Returns `InvalidParameter` if `tile_size` is zero or exceeds `MAX_TILE_SIZE`
pub fn validate_tile_size(tile_size: usize) -> Result<()> {
    if tile_size == 0 || tile_size > MAX_TILE_SIZE {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &format!("must be between 1 and {MAX_TILE_SIZE}"),
        ));
    }
    Ok(())
}

/// Check a JPEG quality setting is usable
///
/// # Errors
///
/// Returns `InvalidParameter` if `quality` is outside `1..=100`
pub fn validate_jpeg_quality(quality: u8) -> Result<()> {
    if !(1..=100).contains(&quality) {
        return Err(invalid_parameter(
            "jpeg_quality",
            &quality,
            &"must be between 1 and 100",
        ));
    }
    Ok(())
}
