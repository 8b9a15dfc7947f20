//! Photomosaic generation by nearest mean-color tile matching
//!
//! A directory of tile images is reduced to a palette keyed by mean color and
//! indexed for nearest-neighbor search in RGB space. A source image is then
//! cut into tile-sized blocks, and every block is replaced by the tile whose
//! mean color is closest to the block's own.

#![forbid(unsafe_code)]

/// Color keys, mean color computation and nearest-color search
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Mosaic assembly from a palette and its index
pub mod mosaic;
/// Pixel buffers with bounds-checked region access
pub mod spatial;
/// Tile loading, palettes and snapshot publication
pub mod tiles;

pub use color::{Color, NearestColor, SearchIndex, average_color};
pub use io::error::{MosaicError, Result};
pub use mosaic::generate;
pub use spatial::PixelBuffer;
pub use tiles::{Palette, Tile, TileLibrary, load_tiles};
