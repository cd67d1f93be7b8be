//! Options shared by the CLI and the batch runner.

use serde::{Deserialize, Serialize};

/// Defaults for every extraction run, loaded from config files and then
/// overridden by command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    // -- General --
    pub suppress_status_msgs: bool,
    pub progress: bool,

    // -- Jobs --
    pub overwrite: bool,
    pub recurse: bool,
    pub halt_on_fail: bool,

    // -- Extractor --
    pub layout: LayoutParams,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            suppress_status_msgs: false,
            progress: true,
            overwrite: false,
            recurse: false,
            halt_on_fail: false,
            layout: LayoutParams::default(),
        }
    }
}

/// Parameters handed through to the text extractor untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Written after every extracted page. A form feed by default.
    pub page_separator: String,
    /// 1-based page numbers to extract. All pages when unset.
    pub page_numbers: Option<Vec<u32>>,
    /// Stop after this many pages; 0 means no limit.
    pub max_pages: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            page_separator: "\u{c}".to_string(),
            page_numbers: None,
            max_pages: 0,
        }
    }
}
