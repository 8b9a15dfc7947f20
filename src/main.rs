//! CLI entry point for the photomosaic generator

use clap::Parser;
use photomosaic::io::cli::{Cli, FileProcessor};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
