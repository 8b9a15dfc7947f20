//! Nearest-color search index with build-time strategy selection
//!
//! A palette with at least `MIN_INDEXED_COLORS` distinct colors is searched
//! through a k-d tree; smaller palettes fall back to a linear scan. Both
//! strategies use the same squared Euclidean metric and resolve ties to the
//! color that came first in the build input, so callers cannot observe which
//! one is active except through `SearchIndex::strategy`.

use crate::color::Color;
use crate::color::kdtree::KdTree;
use crate::io::configuration::MIN_INDEXED_COLORS;
use crate::io::error::{MosaicError, Result};
use crate::tiles::Palette;

/// Nearest-neighbor search over a fixed set of colors
pub trait NearestColor {
    /// Color in the set minimizing squared Euclidean distance to `query`
    ///
    /// # Errors
    ///
    /// Returns `EmptyIndex` if the set holds no colors
    fn nearest(&self, query: Color) -> Result<Color>;

    /// Number of colors in the set
    fn len(&self) -> usize;

    /// Whether the set holds no colors
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Brute-force scan over colors in insertion order
#[derive(Debug, Clone, Default)]
pub struct LinearScan {
    colors: Vec<Color>,
}

impl LinearScan {
    /// Wrap colors in insertion order
    pub fn new(colors: &[Color]) -> Self {
        Self {
            colors: colors.to_vec(),
        }
    }
}

impl NearestColor for LinearScan {
    fn nearest(&self, query: Color) -> Result<Color> {
        // min_by_key returns the first of several equal minima
        self.colors
            .iter()
            .copied()
            .min_by_key(|&color| query.squared_distance(color))
            .ok_or(MosaicError::EmptyIndex)
    }

    fn len(&self) -> usize {
        self.colors.len()
    }
}

impl NearestColor for KdTree {
    fn nearest(&self, query: Color) -> Result<Color> {
        Self::nearest(self, query).ok_or(MosaicError::EmptyIndex)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

/// Which search strategy a `SearchIndex` is using
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStrategy {
    /// Balanced k-d tree
    KdTree,
    /// Brute-force scan
    Linear,
}

/// Read-only nearest-color index, safe to share across threads
#[derive(Debug, Clone)]
pub enum SearchIndex {
    /// Spatial index for palettes with enough colors
    KdTree(KdTree),
    /// Fallback scan for tiny palettes
    Linear(LinearScan),
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::Linear(LinearScan::default())
    }
}

impl SearchIndex {
    /// Build an index over distinct colors given in insertion order
    ///
    /// Duplicate colors are tolerated; the first occurrence wins every tie.
    pub fn build(colors: &[Color]) -> Self {
        if colors.len() < MIN_INDEXED_COLORS {
            log::debug!("Indexing {} colors with linear scan", colors.len());
            Self::linear(colors)
        } else {
            log::debug!("Indexing {} colors with k-d tree", colors.len());
            Self::KdTree(KdTree::build(colors))
        }
    }

    /// Build a linear-scan index regardless of size
    pub fn linear(colors: &[Color]) -> Self {
        Self::Linear(LinearScan::new(colors))
    }

    /// Build an index over the palette's colors in insertion order
    pub fn from_palette(palette: &Palette) -> Self {
        Self::build(&palette.colors())
    }

    /// Strategy chosen at build time
    pub const fn strategy(&self) -> IndexStrategy {
        match self {
            Self::KdTree(_) => IndexStrategy::KdTree,
            Self::Linear(_) => IndexStrategy::Linear,
        }
    }
}

impl NearestColor for SearchIndex {
    fn nearest(&self, query: Color) -> Result<Color> {
        match self {
            Self::KdTree(tree) => NearestColor::nearest(tree, query),
            Self::Linear(scan) => scan.nearest(query),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::KdTree(tree) => NearestColor::len(tree),
            Self::Linear(scan) => scan.len(),
        }
    }
}
