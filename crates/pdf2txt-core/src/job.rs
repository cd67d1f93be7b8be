//! Extraction jobs and the batches that group them.

use std::fmt;
use std::path::{Path, PathBuf};

use pdf2txt_utils::fs::file_size;

use crate::error::Result;

/// Extension every output file carries.
pub const TEXT_EXTENSION: &str = "txt";

/// One input-file-to-output-file extraction task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractJob {
    input_path: PathBuf,
    output_path: PathBuf,
    overwrite: bool,
    halt_on_fail: bool,
}

impl ExtractJob {
    /// Create a job. The output suffix is normalized to `.txt`.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        overwrite: bool,
        halt_on_fail: bool,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into().with_extension(TEXT_EXTENSION),
            overwrite,
            halt_on_fail,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn halt_on_fail(&self) -> bool {
        self.halt_on_fail
    }
}

impl fmt::Display for ExtractJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.input_path.display(),
            self.output_path.display()
        )
    }
}

/// An ordered list of jobs with the input sizes used to drive progress.
///
/// Sizes are captured once when the batch is planned so that the progress
/// total and the per-job increments always agree.
#[derive(Debug, Clone, Default)]
pub struct JobBatch {
    jobs: Vec<ExtractJob>,
    sizes: Vec<u64>,
    total_size: u64,
}

impl JobBatch {
    /// Build a batch, reading the size of every input file.
    pub fn new(jobs: Vec<ExtractJob>) -> Result<Self> {
        let sizes = jobs
            .iter()
            .map(|job| file_size(job.input_path()))
            .collect::<std::io::Result<Vec<u64>>>()?;
        let total_size = sizes.iter().sum();
        Ok(Self {
            jobs,
            sizes,
            total_size,
        })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Sum of all input file sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Iterate jobs in order together with their input size.
    pub fn iter(&self) -> impl Iterator<Item = (&ExtractJob, u64)> {
        self.jobs.iter().zip(self.sizes.iter().copied())
    }
}
