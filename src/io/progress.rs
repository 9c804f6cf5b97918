//! Batch progress display over task files

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

use crate::algorithm::search::ResultRecord;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::io::error::Result;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Tasks: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static TALLY_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Progress display for a batch of tasks
///
/// One bar advances per finished task; a second line keeps a running
/// solved tally. Every method takes `&self` so the display can be shared
/// between the task source and the result observer of a batch.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    tally_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create an idle progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            tally_bar: None,
        }
    }

    /// Create the bars for a batch of `task_count` tasks
    pub fn initialize(&mut self, task_count: usize) {
        let batch_bar = ProgressBar::new(task_count as u64);
        batch_bar.set_style(BATCH_STYLE.clone());
        self.batch_bar = Some(self.multi_progress.add(batch_bar));

        let tally_bar = ProgressBar::new(0);
        tally_bar.set_style(TALLY_STYLE.clone());
        tally_bar.set_prefix("Solved:");
        self.tally_bar = Some(self.multi_progress.add(tally_bar));
    }

    /// Show the task currently being searched
    pub fn start_task(&self, path: &Path) {
        if let Some(ref batch_bar) = self.batch_bar {
            let display_name = path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            batch_bar.set_message(display_name);
        }
    }

    /// Count a finished task, loaded or not
    pub fn complete_task(&self, result: &Result<ResultRecord>) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(ref tally_bar) = self.tally_bar {
            tally_bar.inc_length(1);
            if result.as_ref().is_ok_and(ResultRecord::is_solved) {
                tally_bar.inc(1);
            }
        }
    }

    /// Solved and finished counts so far
    pub fn tally(&self) -> (usize, usize) {
        let position = |bar: Option<&ProgressBar>| bar.map_or(0, |bar| bar.position() as usize);
        (
            position(self.tally_bar.as_ref()),
            position(self.batch_bar.as_ref()),
        )
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All tasks processed");
        }
        if let Some(ref tally_bar) = self.tally_bar {
            tally_bar.finish();
        }
        let _ = self.multi_progress.clear();
    }
}
