//! Block-wise mosaic assembly
//!
//! The source is cropped to a whole number of tiles, each block is reduced to
//! its mean color, matched against the index and replaced by the palette tile
//! for the matched color. Blocks are independent: matching runs in parallel
//! and the canvas is composited once every block has been matched.

use rayon::prelude::*;

use crate::color::{Color, NearestColor, SearchIndex, average_color};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::PixelBuffer;
use crate::tiles::Palette;

/// Grid of whole tiles covering the top-left part of a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicGrid {
    columns: usize,
    rows: usize,
    tile_size: usize,
}

impl MosaicGrid {
    /// Fit a grid of `tile_size` blocks into a `width × height` source
    ///
    /// Right and bottom remainders narrower than a tile are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero tile size, or `SourceTooSmall`
    /// if not even one tile fits
    pub fn plan(width: usize, height: usize, tile_size: usize) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be positive",
            ));
        }

        let grid = Self {
            columns: width / tile_size,
            rows: height / tile_size,
            tile_size,
        };
        if grid.columns == 0 || grid.rows == 0 {
            return Err(MosaicError::SourceTooSmall {
                width,
                height,
                tile_size,
            });
        }
        Ok(grid)
    }

    /// Number of tile columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of tile rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Width of the cropped source and of the output canvas
    pub const fn width(&self) -> usize {
        self.columns * self.tile_size
    }

    /// Height of the cropped source and of the output canvas
    pub const fn height(&self) -> usize {
        self.rows * self.tile_size
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Pixel origin (x, y) of the cell at row-major position `cell`
    pub const fn cell_origin(&self, cell: usize) -> (usize, usize) {
        (
            (cell % self.columns) * self.tile_size,
            (cell / self.columns) * self.tile_size,
        )
    }
}

/// Assemble a mosaic of `source` from palette tiles
///
/// The canvas has the dimensions of `source` rounded down to whole tiles.
///
/// # Errors
///
/// Returns:
/// - `EmptyPalette` if no tiles are loaded (checked before anything else)
/// - `SourceTooSmall` if the source is smaller than one tile
/// - `EmptyIndex` or `MissingTile` if `index` was not built from `palette`
pub fn generate(
    source: &PixelBuffer,
    palette: &Palette,
    index: &SearchIndex,
) -> Result<PixelBuffer> {
    generate_with_progress(source, palette, index, || {})
}

/// Same as `generate`, calling `on_cell` once for every matched cell
///
/// `on_cell` runs on worker threads in no particular order.
///
/// # Errors
///
/// See `generate`
pub fn generate_with_progress<F>(
    source: &PixelBuffer,
    palette: &Palette,
    index: &SearchIndex,
    on_cell: F,
) -> Result<PixelBuffer>
where
    F: Fn() + Sync,
{
    if palette.is_empty() {
        return Err(MosaicError::EmptyPalette);
    }

    let grid = MosaicGrid::plan(source.width(), source.height(), palette.tile_size())?;
    let tile_size = grid.tile_size;

    let matches = (0..grid.cell_count())
        .into_par_iter()
        .map(|cell| {
            let (x, y) = grid.cell_origin(cell);
            let block = source.region(x, y, tile_size, tile_size)?;
            let matched = index.nearest(average_color(block)?)?;
            on_cell();
            Ok(matched)
        })
        .collect::<Result<Vec<Color>>>()?;

    let mut canvas = PixelBuffer::new(grid.width(), grid.height());
    for (cell, color) in matches.into_iter().enumerate() {
        let tile = palette
            .get(color)
            .ok_or(MosaicError::MissingTile { color })?;
        let (x, y) = grid.cell_origin(cell);
        canvas.paste(x, y, tile.pixels())?;
    }

    log::debug!(
        "Assembled {}x{} mosaic from {} cells",
        grid.width(),
        grid.height(),
        grid.cell_count()
    );
    Ok(canvas)
}
