//! Batch runner: executes a [`JobBatch`] one job at a time.
//!
//! A batch is `Pending` until [`BatchRunner::run`] is called and `Running`
//! while jobs execute. It ends `Completed` (every job attempted, returned as
//! `Ok(BatchReport)`) or `Aborted` (a halt-on-fail job failed, returned as
//! `Err(ExtractError::Aborted)`).

use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::{ExtractError, Result};
use crate::extractor::{extract_text_to_file, TextExtractor};
use crate::job::{ExtractJob, JobBatch};
use crate::options::LayoutParams;

/// Progress observer, called once after every attempted job.
pub type ProgressReporter = Box<dyn Fn(&ProgressUpdate<'_>) + Send + Sync>;

/// What the runner tells its progress observer after a job.
#[derive(Debug)]
pub struct ProgressUpdate<'a> {
    /// 1-based position of the job in the batch.
    pub index: usize,
    pub job_count: usize,
    pub job: &'a ExtractJob,
    /// Input size of this job.
    pub bytes_advanced: u64,
    /// Input bytes of all jobs attempted so far.
    pub bytes_done: u64,
    pub bytes_total: u64,
    /// `"{index} of {job_count}"`.
    pub description: String,
    /// Set when the job failed and the batch continues.
    pub failure: Option<&'a ExtractError>,
}

/// A job that failed without halting the batch.
#[derive(Debug)]
pub struct JobFailure {
    pub job: ExtractJob,
    pub error: ExtractError,
}

/// Outcome of a completed batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<JobFailure>,
    pub bytes_processed: u64,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Input paths of the failed jobs, in batch order.
    pub fn failed_inputs(&self) -> Vec<PathBuf> {
        self.failures
            .iter()
            .map(|f| f.job.input_path().to_path_buf())
            .collect()
    }
}

/// Runs jobs sequentially through a [`TextExtractor`].
pub struct BatchRunner {
    extractor: Box<dyn TextExtractor>,
    params: LayoutParams,
    progress_reporter: Option<ProgressReporter>,
}

impl BatchRunner {
    pub fn new(extractor: Box<dyn TextExtractor>) -> Self {
        Self {
            extractor,
            params: LayoutParams::default(),
            progress_reporter: None,
        }
    }

    /// Set the parameters passed through to the extractor.
    pub fn set_layout_params(&mut self, params: LayoutParams) {
        self.params = params;
    }

    /// Set a progress reporter callback.
    pub fn set_progress_reporter(&mut self, reporter: ProgressReporter) {
        self.progress_reporter = Some(reporter);
    }

    /// Attempt every job in order.
    ///
    /// A failing job with `halt_on_fail` stops the batch and its error is
    /// returned wrapped in [`ExtractError::Aborted`]; later jobs are not
    /// attempted. Other failures are collected in the report.
    pub fn run(&self, batch: &JobBatch) -> Result<BatchReport> {
        let start = Instant::now();
        let job_count = batch.len();
        let mut report = BatchReport::default();

        info!(
            "Extracting text from {} file(s) with {}",
            job_count,
            self.extractor.name()
        );

        for (idx, (job, size)) in batch.iter().enumerate() {
            let index = idx + 1;
            debug!("[{}/{}] {}", index, job_count, job);

            let result = extract_text_to_file(
                self.extractor.as_ref(),
                job.input_path(),
                job.output_path(),
                job.overwrite(),
                &self.params,
            );
            report.attempted += 1;
            report.bytes_processed += size;

            let failure = match result {
                Ok(()) => {
                    report.succeeded += 1;
                    None
                }
                Err(error) if job.halt_on_fail() => {
                    info!("Halting batch at {}: {}", job.input_path().display(), error);
                    return Err(ExtractError::Aborted {
                        index,
                        total: job_count,
                        input: job.input_path().to_path_buf(),
                        source: Box::new(error),
                    });
                }
                Err(error) => {
                    info!("Skipping {}: {}", job.input_path().display(), error);
                    report.failures.push(JobFailure {
                        job: job.clone(),
                        error,
                    });
                    report.failures.last().map(|f| &f.error)
                }
            };

            self.report_progress(&ProgressUpdate {
                index,
                job_count,
                job,
                bytes_advanced: size,
                bytes_done: report.bytes_processed,
                bytes_total: batch.total_size(),
                description: format!("{} of {}", index, job_count),
                failure,
            });
        }

        report.elapsed = start.elapsed();
        info!(
            "Batch complete: {} succeeded, {} failed, {} attempted",
            report.succeeded,
            report.failed(),
            report.attempted
        );
        Ok(report)
    }

    fn report_progress(&self, update: &ProgressUpdate<'_>) {
        if let Some(ref reporter) = self.progress_reporter {
            reporter(update);
        }
    }
}
