use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("No pdf files were found in {}", .0.display())]
    NoInputFiles(PathBuf),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Output path exists and it is a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    #[error("Output path exists and overwrite is false: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("{} is not under {}", item.display(), root.display())]
    PathResolution { root: PathBuf, item: PathBuf },

    #[error("Failed to extract text from {}: {message}", path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Batch aborted at job {index} of {total} ({})", input.display())]
    Aborted {
        index: usize,
        total: usize,
        input: PathBuf,
        source: Box<ExtractError>,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
