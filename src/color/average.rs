//! Per-channel arithmetic mean over a pixel region

use ndarray::{ArrayView3, Axis};

use crate::color::Color;
use crate::color::rgb::CHANNELS;
use crate::io::error::{MosaicError, Result};

/// Compute the mean color of a `(height, width, 3)` pixel region
///
/// Each channel is summed in `u64` and divided by the pixel count, truncating
/// toward zero. The result does not depend on traversal order.
///
/// # Errors
///
/// Returns `InvalidRegion` if the region has zero width or height, or does
/// not have exactly three channels
pub fn average_color(region: ArrayView3<'_, u8>) -> Result<Color> {
    let (height, width, channels) = region.dim();
    if height == 0 || width == 0 || channels != CHANNELS {
        return Err(MosaicError::InvalidRegion {
            origin: None,
            size: (width, height),
            channels,
            bounds: None,
        });
    }

    let mut sums = [0u64; CHANNELS];
    for pixel in region.lanes(Axis(2)) {
        for (sum, &value) in sums.iter_mut().zip(pixel.iter()) {
            *sum += u64::from(value);
        }
    }

    let count = (height * width) as u64;
    Ok(Color::from(sums.map(|sum| (sum / count) as u8)))
}
