//! Command-line interface for rendering one image or a directory of images as mosaics

use crate::io::configuration::{
    DEFAULT_JPEG_QUALITY, DEFAULT_TILE_DIRECTORY, DEFAULT_TILE_SIZE, MosaicConfig,
    OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{export_mosaic, load_image};
use crate::io::progress::ProgressManager;
use crate::mosaic::MosaicGrid;
use crate::tiles::TileLibrary;
use crate::tiles::repository::{collect_tile_paths, is_tile_file};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild images as mosaics of tiles matched by mean color"
)]
/// Command-line arguments for the mosaic generator
pub struct Cli {
    /// Input image file or directory of images to render
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory holding the tile images
    #[arg(short, long, default_value = DEFAULT_TILE_DIRECTORY)]
    pub tiles: PathBuf,

    /// Tile edge length in pixels
    #[arg(short = 's', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// JPEG quality for the output (1-100)
    #[arg(short = 'j', long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub quality: u8,

    /// Output path (single-file targets only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine parameters requested on the command line
    pub const fn config(&self) -> MosaicConfig {
        MosaicConfig {
            tile_size: self.tile_size,
            jpeg_quality: self.quality,
        }
    }
}

/// Loads the tile library once and renders every target file with it
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size or quality is out of range
    /// - The target is missing, or `--output` is combined with a directory
    /// - No tiles could be loaded
    /// - Any target image fails to load, render or save
    pub fn process(&mut self) -> Result<()> {
        self.cli.config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            log::info!("Nothing to render in '{}'", self.cli.target.display());
            return Ok(());
        }

        let library = TileLibrary::load(&self.cli.tiles, self.cli.tile_size)?;
        let snapshot = library.snapshot();
        if snapshot.palette().is_empty() {
            return Err(MosaicError::EmptyPalette);
        }
        for diagnostic in snapshot.diagnostics() {
            log::debug!("Tile diagnostic: {diagnostic}");
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(&library, file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if !is_tile_file(&self.cli.target) {
                return Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"must be a JPEG or PNG image",
                ));
            }
            let output = self.output_path(&self.cli.target);
            if self.should_process_file(&self.cli.target, &output) {
                Ok(vec![self.cli.target.clone()])
            } else {
                Ok(vec![])
            }
        } else if self.cli.target.is_dir() {
            if self.cli.output.is_some() {
                return Err(invalid_parameter(
                    "output",
                    &self.cli.target.display(),
                    &"--output requires a single-file target",
                ));
            }

            let mut files = collect_tile_paths(&self.cli.target)?;
            files.retain(|path| {
                !is_generated_output(path)
                    && self.should_process_file(path, &Self::get_output_path(path))
            });
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path, output_path: &Path) -> bool {
        if !self.cli.skip_existing() || !output_path.exists() {
            return true;
        }
        log::info!("Skipping: {} (output exists)", input_path.display());
        false
    }

    fn process_file(&mut self, library: &TileLibrary, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);

        let source = load_image(input_path)?;
        let snapshot = library.snapshot();
        let grid = MosaicGrid::plan(source.width(), source.height(), library.tile_size())?;

        let bar = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_file(input_path, grid.cell_count()));

        let mosaic = snapshot.generate_with_progress(&source, || {
            if let Some(ref bar) = bar {
                bar.inc(1);
            }
        })?;
        export_mosaic(&mosaic, &output_path, self.cli.quality)?;

        if let (Some(pm), Some(bar)) = (&self.progress_manager, &bar) {
            pm.complete_file(bar, start_time.elapsed());
        }
        log::info!(
            "Rendered {} -> {} ({}x{} tiles, {:.2?})",
            input_path.display(),
            output_path.display(),
            grid.columns(),
            grid.rows(),
            start_time.elapsed()
        );

        Ok(())
    }

    fn output_path(&self, input_path: &Path) -> PathBuf {
        self.cli
            .output
            .clone()
            .unwrap_or_else(|| Self::get_output_path(input_path))
    }

    /// Default output location for an input: `<stem>_mosaic.jpeg` beside it
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Whether a file looks like a mosaic this tool wrote earlier
pub fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
}
