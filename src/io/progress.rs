//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display for batch mosaic generation
///
/// Each file gets a bar counting matched cells. At most
/// `MAX_INDIVIDUAL_PROGRESS_BARS` file bars are visible at once; older bars
/// are removed as new files start, and a batch bar appears for large sets.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} cells {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
        }
    }

    /// Prepare the batch bar if the file count warrants one
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Add a bar for a file about to be rendered
    ///
    /// The returned handle is cheap to clone and safe to advance from
    /// worker threads.
    pub fn start_file(&mut self, path: &Path, cell_count: usize) -> ProgressBar {
        if self.file_bars.len() >= MAX_INDIVIDUAL_PROGRESS_BARS {
            let oldest = self.file_bars.remove(0);
            self.multi_progress.remove(&oldest);
        }

        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(CELL_STYLE.clone());
        bar.set_prefix(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        let bar = self.multi_progress.add(bar);
        self.file_bars.push(bar.clone());
        bar
    }

    /// Mark a file as done and advance the batch bar
    pub fn complete_file(&self, bar: &ProgressBar, elapsed: Duration) {
        bar.finish_with_message(format!("✓ {:.2}s", elapsed.as_secs_f64()));
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}
