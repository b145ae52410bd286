//! Source document handle.

use serde::{Deserialize, Serialize};

/// A host node that may carry PDF content.
///
/// The host owns the bytes; the transformer only sees the identity and
/// media type, and asks a [`crate::ContentLoader`] for the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    /// Host-assigned node id
    pub id: String,

    /// Media type reported by the host (e.g., "application/pdf")
    pub media_type: String,
}

impl SourceDocument {
    /// Create a new source document handle.
    pub fn new(id: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_type: media_type.into(),
        }
    }

    /// Create a handle for a document reported as `application/pdf`.
    pub fn pdf(id: impl Into<String>) -> Self {
        Self::new(id, crate::detect::PDF_MEDIA_TYPES[0])
    }

    /// Check whether the media type is routed to the PDF transformer.
    pub fn is_pdf(&self) -> bool {
        crate::detect::is_pdf_media_type(&self.media_type)
    }
}
