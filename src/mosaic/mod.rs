//! Mosaic assembly from a palette and its color index

/// Grid planning and block-wise tile compositing
pub mod assembler;

pub use assembler::{MosaicGrid, generate, generate_with_progress};
