//! PDF text extractor backed by `lopdf`.

mod extract;

use std::io::{Read, Write};

use pdf2txt_core::error::Result;
use pdf2txt_core::extractor::TextExtractor;
use pdf2txt_core::options::LayoutParams;

pub use extract::{load_document, select_pages};

pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn extract_text(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        params: &LayoutParams,
    ) -> Result<()> {
        extract::extract_text(input, output, params)
    }
}
