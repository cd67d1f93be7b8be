//! The seam to the PDF text extraction library.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::check_file::check_file;
use crate::error::{ExtractError, Result};
use crate::options::LayoutParams;

/// A PDF-to-text engine: reads PDF bytes, writes UTF-8 text.
pub trait TextExtractor: Send + Sync {
    /// Human-readable name of this extractor.
    fn name(&self) -> &str;

    /// Extract the text of the PDF in `input` into `output`.
    fn extract_text(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        params: &LayoutParams,
    ) -> Result<()>;
}

/// Extract the text of one PDF file into a text file.
///
/// The output is validated (and its parent directories created) before the
/// input is opened. Text is written to a temporary file next to the output
/// and moved into place only when the extractor succeeds, so a failure
/// leaves an existing output as it was.
pub fn extract_text_to_file(
    extractor: &dyn TextExtractor,
    input_path: &Path,
    output_path: &Path,
    overwrite: bool,
    params: &LayoutParams,
) -> Result<()> {
    check_file(output_path, true, overwrite)?;

    let input = File::open(input_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::InputNotFound(input_path.to_path_buf()),
        _ => ExtractError::Io(e),
    })?;
    let mut reader = BufReader::new(input);

    let output_dir = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdf2txt-").suffix(".part");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut writer = BufWriter::new(builder.tempfile_in(output_dir)?);

    log::debug!(
        "{}: {} -> {}",
        extractor.name(),
        input_path.display(),
        output_path.display()
    );
    extractor
        .extract_text(&mut reader, &mut writer, params)
        .map_err(|e| match e {
            ExtractError::Io(e) => ExtractError::Io(e),
            e => ExtractError::Extraction {
                path: input_path.to_path_buf(),
                message: e.to_string(),
            },
        })?;

    let staged = writer
        .into_inner()
        .map_err(|e| ExtractError::Io(e.into_error()))?;
    let persisted = if overwrite {
        staged.persist(output_path)
    } else {
        staged.persist_noclobber(output_path)
    };
    persisted.map_err(|e| match e.error.kind() {
        io::ErrorKind::AlreadyExists => ExtractError::AlreadyExists(output_path.to_path_buf()),
        _ => ExtractError::Io(e.error),
    })?;

    Ok(())
}
