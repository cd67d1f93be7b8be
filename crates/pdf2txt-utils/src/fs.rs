//! File size accounting and extension checks.

use std::io;
use std::path::Path;

use indicatif::HumanBytes;

/// Check a path's extension against `ext`, ignoring ASCII case.
///
/// `ext` is given without the leading dot.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Size in bytes of the file at `path`.
pub fn file_size(path: &Path) -> io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// `"<file name> - <size>"`, for status lines.
pub fn file_size_msg(path: &Path) -> io::Result<String> {
    let size = file_size(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(format!("{} - {}", name, HumanBytes(size)))
}
