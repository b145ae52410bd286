//! Document metadata, raw and normalized.

use serde::{Deserialize, Serialize};

/// Metadata fields as read from the document, before normalization.
///
/// Every field is optional: documents may omit the /Info dictionary
/// entirely or carry only a subset of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInfo {
    /// /Title
    pub title: Option<String>,
    /// /Author
    pub author: Option<String>,
    /// /Subject
    pub subject: Option<String>,
    /// /Keywords, comma separated
    pub keywords: Option<String>,
    /// /Creator
    pub creator: Option<String>,
    /// /CreationDate, raw PDF date string
    pub creation_date: Option<String>,
    /// /ModDate, raw PDF date string
    pub mod_date: Option<String>,
    /// Version from the file header (e.g., "1.7")
    pub pdf_version: Option<String>,
}

/// Normalized document metadata.
///
/// Absent source fields become empty strings. Dates are ISO-8601 when the
/// raw value matched the PDF date pattern and the raw string otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Document title
    pub title: String,

    /// Document author
    pub author: String,

    /// Document subject
    pub subject: String,

    /// Keywords, split on commas and trimmed
    pub keywords: Vec<String>,

    /// Creator application
    pub creator: String,

    /// Creation date
    pub created_date: String,

    /// Last modification date
    pub modified_date: String,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,
}
