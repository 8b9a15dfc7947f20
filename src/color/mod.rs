//! Color primitives and nearest-color search
//!
//! This module contains:
//! - The `Color` key type shared by tiles and source blocks
//! - Mean color computation over pixel regions
//! - Nearest-neighbor search over palette colors (k-d tree or linear scan)

/// Mean color of a pixel region
pub mod average;
/// Nearest-color search strategies behind a single index type
pub mod index;
/// Balanced k-d tree over RGB space
pub mod kdtree;
/// The RGB color key type
pub mod rgb;

pub use average::average_color;
pub use index::{IndexStrategy, NearestColor, SearchIndex};
pub use rgb::Color;
