//! Image decoding and mosaic export

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;

use crate::io::configuration::validate_jpeg_quality;
use crate::io::error::{MosaicError, Result, file_system_error};
use crate::spatial::PixelBuffer;

/// Load an image file of any supported format as RGB pixels
///
/// Alpha is discarded.
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let image = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    PixelBuffer::from_rgb_image(image.to_rgb8())
}

/// Decode in-memory image bytes as RGB pixels
///
/// # Errors
///
/// Returns `ImageDecode` if the format is unknown or the data is corrupt
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes)
        .map_err(|source| MosaicError::ImageDecode { source })?;
    PixelBuffer::from_rgb_image(image.to_rgb8())
}

/// Encode pixels as JPEG at the given quality
///
/// # Errors
///
/// Returns `InvalidParameter` for a quality outside `1..=100`, or
/// `ImageExport` if encoding fails
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>> {
    validate_jpeg_quality(quality)?;
    let image = buffer.to_rgb_image()?;
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(&image)
        .map_err(|e| MosaicError::ImageExport {
            path: PathBuf::from("<memory>"),
            source: e,
        })?;
    Ok(bytes)
}

fn is_jpeg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .is_some_and(|ext| ext == "jpg" || ext == "jpeg")
}

/// Save a mosaic to `output_path`, creating parent directories
///
/// `.jpg` and `.jpeg` paths are written as JPEG at `quality`; any other
/// extension picks its format from the extension.
///
/// # Errors
///
/// Returns an error if:
/// - `quality` is outside `1..=100`
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_mosaic(buffer: &PixelBuffer, output_path: &Path, quality: u8) -> Result<()> {
    validate_jpeg_quality(quality)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    if is_jpeg_path(output_path) {
        let bytes = encode_jpeg(buffer, quality)?;
        std::fs::write(output_path, bytes)
            .map_err(|e| file_system_error(output_path, "write mosaic", e))?;
    } else {
        buffer
            .to_rgb_image()?
            .save(output_path)
            .map_err(|e| MosaicError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;
    }

    log::debug!("Wrote mosaic to '{}'", output_path.display());
    Ok(())
}
