//! Input/output operations, configuration and error handling

/// Command-line interface and batch processing
pub mod cli;
/// Engine constants and runtime configuration
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding and mosaic export
pub mod image;
/// Terminal progress display
pub mod progress;
