//! Tile directory loading with per-file failure isolation

use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::color::Color;
use crate::io::configuration::{TILE_EXTENSIONS, validate_tile_size};
use crate::io::error::{Result, file_system_error};
use crate::io::image::load_image;
use crate::tiles::palette::{Palette, Tile};

/// Something worth reporting about a single tile file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileDiagnostic {
    /// File could not be read or decoded and was left out
    Skipped {
        /// Offending file
        path: PathBuf,
        /// Why it was skipped
        reason: String,
    },
    /// File replaced an earlier tile with the same mean color
    Replaced {
        /// File whose tile now occupies the color
        path: PathBuf,
        /// The shared mean color
        color: Color,
    },
}

impl fmt::Display for TileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped { path, reason } => {
                write!(f, "skipped '{}': {reason}", path.display())
            }
            Self::Replaced { path, color } => {
                write!(
                    f,
                    "'{}' replaced an earlier tile with mean color {color}",
                    path.display()
                )
            }
        }
    }
}

/// Result of scanning a tile directory
#[derive(Debug, Clone)]
pub struct TileLoad {
    /// Tiles that loaded successfully
    pub palette: Palette,
    /// Per-file problems encountered while loading
    pub diagnostics: Vec<TileDiagnostic>,
}

impl TileLoad {
    /// Number of files that were skipped
    pub fn skipped_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, TileDiagnostic::Skipped { .. }))
            .count()
    }
}

/// Check whether a path has a recognized tile image extension
pub fn is_tile_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// List tile image files in `directory`, sorted by path
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns `FileSystem` if an existing directory cannot be read
pub fn collect_tile_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(directory)
        .map_err(|e| file_system_error(directory, "read directory", e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| file_system_error(directory, "read directory entry", e))?
            .path();
        if path.is_file() && is_tile_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every tile image in `directory` into a palette
///
/// Files are decoded and resized in parallel, then inserted in sorted path
/// order so colliding mean colors resolve the same way on every run. A file
/// that fails to decode is recorded as a diagnostic and skipped. A missing
/// directory or one without usable images gives an empty palette.
///
/// # Errors
///
/// Returns an error if `tile_size` is out of range or an existing directory
/// cannot be listed
pub fn load_tiles(directory: &Path, tile_size: usize) -> Result<TileLoad> {
    validate_tile_size(tile_size)?;
    let mut palette = Palette::new(tile_size)?;
    let mut diagnostics = Vec::new();

    if !directory.is_dir() {
        log::warn!(
            "Tile directory '{}' does not exist, palette is empty",
            directory.display()
        );
        return Ok(TileLoad {
            palette,
            diagnostics,
        });
    }

    let paths = collect_tile_paths(directory)?;
    let decoded: Vec<(PathBuf, Result<Tile>)> = paths
        .into_par_iter()
        .map(|path| {
            let tile = load_image(&path).and_then(|image| Tile::from_image(&image, tile_size));
            (path, tile)
        })
        .collect();

    for (path, tile) in decoded {
        match tile {
            Ok(tile) => {
                let color = tile.color();
                if palette.insert(tile)?.is_some() {
                    log::warn!(
                        "Tile '{}' replaces an earlier tile with mean color {color}",
                        path.display()
                    );
                    diagnostics.push(TileDiagnostic::Replaced { path, color });
                }
            }
            Err(e) => {
                log::warn!("Skipping tile '{}': {e}", path.display());
                diagnostics.push(TileDiagnostic::Skipped {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Loaded {} tiles from '{}' ({} diagnostics)",
        palette.len(),
        directory.display(),
        diagnostics.len()
    );

    Ok(TileLoad {
        palette,
        diagnostics,
    })
}
