//! Page-by-page text extraction.

use std::io::{Read, Write};

use lopdf::Document;

use pdf2txt_core::error::{ExtractError, Result};
use pdf2txt_core::options::LayoutParams;

/// Parse a PDF document from raw bytes.
pub fn load_document(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| ExtractError::Pdf(format!("Failed to load PDF: {}", e)))
}

/// Page numbers to extract, in document order.
///
/// `page_numbers` restricts the selection, `max_pages` (when non-zero)
/// truncates it.
pub fn select_pages(doc: &Document, params: &LayoutParams) -> Vec<u32> {
    let mut pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    pages.sort_unstable();

    if let Some(ref wanted) = params.page_numbers {
        pages.retain(|n| wanted.contains(n));
    }
    if params.max_pages > 0 {
        pages.truncate(params.max_pages as usize);
    }
    pages
}

pub(crate) fn extract_text(
    input: &mut dyn Read,
    output: &mut dyn Write,
    params: &LayoutParams,
) -> Result<()> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;

    let doc = load_document(&bytes)?;
    let pages = select_pages(&doc, params);
    log::debug!(
        "PDF has {} pages, extracting {}",
        doc.get_pages().len(),
        pages.len()
    );

    for page in pages {
        let text = doc
            .extract_text(&[page])
            .map_err(|e| ExtractError::Pdf(format!("page {}: {}", page, e)))?;
        output.write_all(text.as_bytes())?;
        output.write_all(params.page_separator.as_bytes())?;
    }
    output.flush()?;

    Ok(())
}
