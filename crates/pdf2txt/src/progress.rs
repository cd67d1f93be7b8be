//! Terminal progress bar driven by the batch runner's progress callback.

use indicatif::{ProgressBar, ProgressStyle};

use pdf2txt_core::batch::{ProgressReporter, ProgressUpdate};

const TEMPLATE: &str =
    "{msg} [{bar:40.cyan/dim}] {percent:>3}% {bytes}/{total_bytes} {elapsed_precise}";

/// A byte-sized bar for `job_count` jobs totalling `total_bytes`, or a
/// hidden one when progress display is off.
pub fn create_bar(total_bytes: u64, job_count: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total_bytes);
    match ProgressStyle::with_template(TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("=> ")),
        Err(e) => log::warn!("Invalid progress template: {}", e),
    }
    bar.set_message(format!("0 of {}", job_count));
    bar
}

/// Advance `bar` after every job and print skipped jobs above it.
pub fn reporter(bar: ProgressBar) -> ProgressReporter {
    Box::new(move |update: &ProgressUpdate<'_>| {
        if let Some(err) = update.failure {
            bar.suspend(|| println!("Skipping {}\n\tCause: {}", update.job, err));
        }
        bar.set_message(update.description.clone());
        bar.inc(update.bytes_advanced);
    })
}
