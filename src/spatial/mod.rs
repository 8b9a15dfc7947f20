//! Pixel storage and region access
//!
//! Holds the `PixelBuffer` type used for tiles, source images and the
//! output canvas.

/// Owned RGB pixel buffers with bounds-checked regions
pub mod buffer;

pub use buffer::PixelBuffer;
