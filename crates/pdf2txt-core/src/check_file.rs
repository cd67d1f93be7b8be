//! Output path validation.

use std::path::Path;

use crate::error::{ExtractError, Result};

/// Check that `path_out` can receive a new output file.
///
/// Fails if the path is an existing directory, or an existing file while
/// `overwrite` is false. When `ensure_parents` is set and the checks pass,
/// missing parent directories are created.
pub fn check_file(path_out: &Path, ensure_parents: bool, overwrite: bool) -> Result<()> {
    if let Ok(meta) = std::fs::metadata(path_out) {
        if meta.is_dir() {
            return Err(ExtractError::IsDirectory(path_out.to_path_buf()));
        }
        if !overwrite {
            return Err(ExtractError::AlreadyExists(path_out.to_path_buf()));
        }
    }

    if ensure_parents {
        if let Some(parent) = path_out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(())
}
