//! Page-level types.

use serde::{Deserialize, Serialize};

/// Flattened text of a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Trimmed fragments joined by a single space
    pub text: String,
}

impl Page {
    /// Create a new page.
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }

    /// Check if the page carries no text.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
