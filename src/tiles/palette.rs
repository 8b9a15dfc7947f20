//! Tiles and the color-keyed palette they are collected into

use std::collections::HashMap;

use crate::color::{Color, average_color};
use crate::io::configuration::validate_tile_size;
use crate::io::error::{MosaicError, Result};
use crate::spatial::PixelBuffer;

/// Square reference image paired with its mean color
///
/// Tiles are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    color: Color,
    pixels: PixelBuffer,
}

impl Tile {
    /// Build a tile from square pixel content, computing its mean color
    ///
    /// # Errors
    ///
    /// Returns `TileSizeMismatch` if the content is not square, or
    /// `InvalidRegion` if it is empty
    pub fn new(pixels: PixelBuffer) -> Result<Self> {
        if pixels.width() != pixels.height() {
            return Err(MosaicError::TileSizeMismatch {
                expected: pixels.width().max(pixels.height()),
                width: pixels.width(),
                height: pixels.height(),
            });
        }
        let color = average_color(pixels.view())?;
        Ok(Self { color, pixels })
    }

    /// Resize arbitrary image content to `tile_size × tile_size` and build a tile
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size is invalid or the image is empty
    pub fn from_image(image: &PixelBuffer, tile_size: usize) -> Result<Self> {
        validate_tile_size(tile_size)?;
        Self::new(image.resize(tile_size, tile_size)?)
    }

    /// A solid tile of one color
    pub fn solid(tile_size: usize, color: Color) -> Self {
        Self {
            color,
            pixels: PixelBuffer::filled(tile_size, tile_size, color),
        }
    }

    /// Mean color of the tile content
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Tile content
    pub const fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Edge length in pixels
    pub fn size(&self) -> usize {
        self.pixels.width()
    }
}

/// All loaded tiles keyed by mean color
///
/// Colors remember the order in which they were first inserted. Inserting a
/// tile whose mean color is already present replaces the earlier tile's
/// content (last write wins) but keeps the color's original position. The
/// collapse is lossy; `replaced_count` reports how often it happened.
#[derive(Debug, Clone)]
pub struct Palette {
    tile_size: usize,
    tiles: Vec<Tile>,
    positions: HashMap<Color, usize>,
    replaced: usize,
}

impl Palette {
    /// Create an empty palette for tiles of the given edge length
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `tile_size` is out of range
    pub fn new(tile_size: usize) -> Result<Self> {
        validate_tile_size(tile_size)?;
        Ok(Self {
            tile_size,
            tiles: Vec::new(),
            positions: HashMap::new(),
            replaced: 0,
        })
    }

    /// Insert a tile under its mean color
    ///
    /// Returns the tile previously stored under that color, if any.
    ///
    /// # Errors
    ///
    /// Returns `TileSizeMismatch` if the tile does not have the palette's edge length
    pub fn insert(&mut self, tile: Tile) -> Result<Option<Tile>> {
        if tile.size() != self.tile_size || tile.pixels.height() != self.tile_size {
            return Err(MosaicError::TileSizeMismatch {
                expected: self.tile_size,
                width: tile.pixels.width(),
                height: tile.pixels.height(),
            });
        }

        if let Some(slot) = self
            .positions
            .get(&tile.color)
            .and_then(|&position| self.tiles.get_mut(position))
        {
            self.replaced += 1;
            return Ok(Some(std::mem::replace(slot, tile)));
        }

        self.positions.insert(tile.color, self.tiles.len());
        self.tiles.push(tile);
        Ok(None)
    }

    /// Tile stored under `color`
    pub fn get(&self, color: Color) -> Option<&Tile> {
        self.positions
            .get(&color)
            .and_then(|&position| self.tiles.get(position))
    }

    /// Whether a tile is stored under `color`
    pub fn contains(&self, color: Color) -> bool {
        self.positions.contains_key(&color)
    }

    /// Distinct colors in first-insertion order
    pub fn colors(&self) -> Vec<Color> {
        self.tiles.iter().map(Tile::color).collect()
    }

    /// Tiles in first-insertion order of their colors
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of distinct colors
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tiles are loaded
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of inserts that overwrote an existing color
    pub const fn replaced_count(&self) -> usize {
        self.replaced
    }
}
