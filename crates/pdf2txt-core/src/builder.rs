//! Job planning: turn an input path and a destination into a [`JobBatch`].

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use pdf2txt_utils::fs::has_extension;

use crate::error::{ExtractError, Result};
use crate::job::{ExtractJob, JobBatch, TEXT_EXTENSION};
use crate::path_delta::path_delta;

/// Extension of the files picked up by a directory scan.
pub const PDF_EXTENSION: &str = "pdf";

/// Flags applied to every job of a batch.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Descend into sub directories of a directory input.
    pub recurse: bool,
    pub overwrite: bool,
    pub halt_on_fail: bool,
    /// Output file name for a single file input, placed inside the destination.
    pub file_name: Option<PathBuf>,
}

/// Plan the jobs for `path_in`, which may be a single file or a directory.
pub fn build_jobs(path_in: &Path, path_out: &Path, options: &BuildOptions) -> Result<JobBatch> {
    let jobs = if path_in.is_file() {
        vec![build_single_job(
            path_in,
            path_out,
            options.file_name.as_deref(),
            options.overwrite,
            options.halt_on_fail,
        )?]
    } else if path_in.is_dir() {
        build_jobs_from_directory(
            path_in,
            path_out,
            options.recurse,
            options.overwrite,
            options.halt_on_fail,
        )?
    } else {
        return Err(ExtractError::InputNotFound(path_in.to_path_buf()));
    };

    JobBatch::new(jobs)
}

/// Plan the job for one input file.
///
/// The output goes to `path_out/file_name` when a name is given, to
/// `path_out` itself when it looks like a file, and otherwise to
/// `path_out/<input name>.txt`.
pub fn build_single_job(
    path_in: &Path,
    path_out: &Path,
    file_name: Option<&Path>,
    overwrite: bool,
    halt_on_fail: bool,
) -> Result<ExtractJob> {
    if !path_in.exists() {
        return Err(ExtractError::InputNotFound(path_in.to_path_buf()));
    }
    if !has_extension(path_in, PDF_EXTENSION) {
        warn!(
            "Input file might not be a pdf, suffix for {} is not '.pdf' (case insensitive).",
            path_in.display()
        );
    }

    let output = match file_name {
        Some(name) => {
            let name = name.file_name().ok_or_else(|| {
                ExtractError::InvalidDestination(format!(
                    "file name {} has no final component",
                    name.display()
                ))
            })?;
            path_out.join(name)
        }
        None if is_file_target(path_out) => path_out.to_path_buf(),
        None => {
            let name = path_in.file_name().ok_or_else(|| {
                ExtractError::InvalidDestination(format!(
                    "cannot derive an output name from {}",
                    path_in.display()
                ))
            })?;
            path_out.join(name)
        }
    };

    Ok(ExtractJob::new(path_in, output, overwrite, halt_on_fail))
}

/// Plan one job per pdf file found in `path_in`, mirroring its layout under
/// `path_out`.
pub fn build_jobs_from_directory(
    path_in: &Path,
    path_out: &Path,
    recurse: bool,
    overwrite: bool,
    halt_on_fail: bool,
) -> Result<Vec<ExtractJob>> {
    if path_out.is_file() {
        return Err(ExtractError::InvalidDestination(format!(
            "{} is an existing file, not a directory",
            path_out.display()
        )));
    }
    if !path_in.is_dir() {
        return Err(ExtractError::InputNotFound(path_in.to_path_buf()));
    }

    let input_files = find_pdf_files(path_in, recurse);
    if input_files.is_empty() {
        return Err(ExtractError::NoInputFiles(path_in.to_path_buf()));
    }
    debug!(
        "Found {} pdf files in {}",
        input_files.len(),
        path_in.display()
    );

    input_files
        .iter()
        .map(|input| {
            let output = path_delta(path_in, input, path_out)?;
            Ok(ExtractJob::new(input, output, overwrite, halt_on_fail))
        })
        .collect()
}

/// List files with a `.pdf` extension (any case) under `dir`.
///
/// Only immediate children are considered unless `recurse` is set. Entries
/// are visited in file name order so the result is reproducible.
pub fn find_pdf_files(dir: &Path, recurse: bool) -> Vec<PathBuf> {
    let max_depth = if recurse { usize::MAX } else { 1 };

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_extension(e.path(), PDF_EXTENSION))
        .map(|e| e.into_path())
        .collect()
}

fn is_file_target(path: &Path) -> bool {
    if path.is_dir() {
        return false;
    }
    path.is_file() || has_extension(path, TEXT_EXTENSION)
}
