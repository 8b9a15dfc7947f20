//! Swappable palette and index snapshot shared across generations
//!
//! A `TileLibrary` publishes an immutable `MosaicSnapshot` behind an `Arc`.
//! Generations clone the `Arc` when they start and keep using it even if a
//! reload publishes a newer snapshot meanwhile. A reload builds the whole
//! snapshot first and then replaces the pointer in one write.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::color::SearchIndex;
use crate::io::error::Result;
use crate::mosaic::assembler::{generate, generate_with_progress};
use crate::spatial::PixelBuffer;
use crate::tiles::palette::Palette;
use crate::tiles::repository::{TileDiagnostic, load_tiles};

/// Palette, matching index and load diagnostics built together
#[derive(Debug)]
pub struct MosaicSnapshot {
    palette: Palette,
    index: SearchIndex,
    diagnostics: Vec<TileDiagnostic>,
    generation: u64,
}

impl MosaicSnapshot {
    /// Index a palette and wrap both into a snapshot
    pub fn build(palette: Palette, diagnostics: Vec<TileDiagnostic>, generation: u64) -> Self {
        let index = SearchIndex::from_palette(&palette);
        Self {
            palette,
            index,
            diagnostics,
            generation,
        }
    }

    /// Loaded tiles
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Index over the palette's colors
    pub const fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Problems reported while loading the palette
    pub fn diagnostics(&self) -> &[TileDiagnostic] {
        &self.diagnostics
    }

    /// Sequence number, incremented by every swap
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Assemble a mosaic of `source` from this snapshot's tiles
    ///
    /// # Errors
    ///
    /// Returns `EmptyPalette` or `SourceTooSmall` as described for `generate`
    pub fn generate(&self, source: &PixelBuffer) -> Result<PixelBuffer> {
        generate(source, &self.palette, &self.index)
    }

    /// Same as `generate`, calling `on_cell` once for every matched cell
    ///
    /// # Errors
    ///
    /// Returns `EmptyPalette` or `SourceTooSmall` as described for `generate`
    pub fn generate_with_progress<F>(
        &self,
        source: &PixelBuffer,
        on_cell: F,
    ) -> Result<PixelBuffer>
    where
        F: Fn() + Sync,
    {
        generate_with_progress(source, &self.palette, &self.index, on_cell)
    }
}

/// Tile directory bound to the currently published snapshot
#[derive(Debug)]
pub struct TileLibrary {
    directory: PathBuf,
    tile_size: usize,
    current: RwLock<Arc<MosaicSnapshot>>,
}

impl TileLibrary {
    /// Load `directory` and publish the first snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size is invalid or the directory cannot be listed
    pub fn load(directory: impl AsRef<Path>, tile_size: usize) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        let load = load_tiles(&directory, tile_size)?;
        let snapshot = MosaicSnapshot::build(load.palette, load.diagnostics, 0);
        Ok(Self {
            directory,
            tile_size,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Directory the library loads tiles from
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Currently published snapshot
    pub fn snapshot(&self) -> Arc<MosaicSnapshot> {
        // Only ever replaced whole, so a poisoned value is still valid
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Rescan the directory and publish the result
    ///
    /// Generations already holding the previous snapshot are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed; the previous
    /// snapshot stays published in that case
    pub fn reload(&self) -> Result<Arc<MosaicSnapshot>> {
        let load = load_tiles(&self.directory, self.tile_size)?;
        Ok(self.install(load.palette, load.diagnostics))
    }

    /// Publish an externally built palette
    pub fn install(
        &self,
        palette: Palette,
        diagnostics: Vec<TileDiagnostic>,
    ) -> Arc<MosaicSnapshot> {
        let index = SearchIndex::from_palette(&palette);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = Arc::new(MosaicSnapshot {
            palette,
            index,
            diagnostics,
            generation: current.generation() + 1,
        });
        *current = Arc::clone(&snapshot);
        drop(current);

        log::info!(
            "Published tile snapshot {} with {} tiles",
            snapshot.generation(),
            snapshot.palette().len()
        );
        snapshot
    }

    /// Assemble a mosaic from the snapshot current at call time
    ///
    /// # Errors
    ///
    /// Returns `EmptyPalette` or `SourceTooSmall` as described for `generate`
    pub fn generate(&self, source: &PixelBuffer) -> Result<PixelBuffer> {
        self.snapshot().generate(source)
    }
}
