//! Error types for tile loading, color indexing and mosaic assembly

use std::fmt;
use std::path::PathBuf;

use crate::color::Color;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Pixel region is empty, not RGB, or reaches outside its buffer
    ///
    /// Regions are built by the engine itself, so this signals a programming
    /// error rather than bad user input. A bare array view carries no
    /// placement, so `origin` and `bounds` are only set for regions requested
    /// from a `PixelBuffer`.
    InvalidRegion {
        /// Top-left corner of the requested region (x, y)
        origin: Option<(usize, usize)>,
        /// Requested region size (width, height)
        size: (usize, usize),
        /// Channels per pixel in the region
        channels: usize,
        /// Size of the buffer the region was taken from (width, height)
        bounds: Option<(usize, usize)>,
    },

    /// Mosaic generation was requested without any tiles loaded
    EmptyPalette,

    /// Nearest-color query against an index holding no colors
    EmptyIndex,

    /// Source image is smaller than a single tile in at least one dimension
    SourceTooSmall {
        /// Source width in pixels
        width: usize,
        /// Source height in pixels
        height: usize,
        /// Tile edge length in pixels
        tile_size: usize,
    },

    /// Tile content does not match the palette tile size
    TileSizeMismatch {
        /// Tile edge length the palette expects
        expected: usize,
        /// Actual tile width
        width: usize,
        /// Actual tile height
        height: usize,
    },

    /// Index returned a color the palette has no tile for
    ///
    /// Only happens when a palette and index that were not built together
    /// are used for the same generation.
    MissingTile {
        /// Color key that was not found
        color: Color,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to decode an in-memory image
    ImageDecode {
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Failed to encode or save a generated mosaic
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion {
                origin,
                size,
                channels,
                bounds,
            } => {
                write!(
                    f,
                    "Invalid pixel region {}x{} with {channels} channels",
                    size.0, size.1
                )?;
                if let Some((x, y)) = origin {
                    write!(f, " at ({x}, {y})")?;
                }
                if let Some((width, height)) = bounds {
                    write!(f, " in a {width}x{height} buffer")?;
                }
                Ok(())
            }
            Self::EmptyPalette => write!(f, "No tiles are loaded in the palette"),
            Self::EmptyIndex => write!(f, "Color index contains no colors"),
            Self::SourceTooSmall {
                width,
                height,
                tile_size,
            } => {
                write!(
                    f,
                    "Source image {width}x{height} is smaller than one {tile_size}x{tile_size} tile"
                )
            }
            Self::TileSizeMismatch {
                expected,
                width,
                height,
            } => {
                write!(
                    f,
                    "Tile is {width}x{height} but the palette expects {expected}x{expected}"
                )
            }
            Self::MissingTile { color } => {
                write!(f, "No tile in the palette for color {color}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageDecode { source } => write!(f, "Failed to decode image: {source}"),
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. }
            | Self::ImageExport { source, .. }
            | Self::ImageDecode { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageDecode { source: err }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for `operation` on `path`
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MosaicError {
    MosaicError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
