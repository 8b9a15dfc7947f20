//! Tile loading, the color-keyed palette and the published snapshot
//!
//! This module contains:
//! - `Tile` and `Palette` (last-write-wins on colliding mean colors)
//! - Directory loading with per-file diagnostics
//! - `TileLibrary`, which swaps palette and index snapshots atomically

/// Snapshot publication and reload
pub mod library;
/// Tiles and the palette keyed by mean color
pub mod palette;
/// Tile directory scanning and decoding
pub mod repository;

pub use library::{MosaicSnapshot, TileLibrary};
pub use palette::{Palette, Tile};
pub use repository::{TileDiagnostic, TileLoad, load_tiles};
