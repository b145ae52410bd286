//! # pdfnode
//!
//! Turns PDF documents into normalized, content-addressed records for a
//! content graph.
//!
//! Each record carries the document's normalized metadata, the flattened
//! text of every page, a digest of that content, and an id derived from
//! the source document. A document that fails to parse still produces a
//! record: the failure is kept as data in its `error` field, so one bad
//! file never aborts an ingestion run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfnode::{on_document_discovered, MemoryLoader, MemorySink, NamespacedIds, SourceDocument};
//!
//! # async fn run() -> Result<(), pdfnode::LoadError> {
//! let bytes = std::fs::read("document.pdf").unwrap();
//! let loader = MemoryLoader::new().with_content("file-1", bytes);
//! let sink = MemorySink::new();
//!
//! on_document_discovered(
//!     &SourceDocument::pdf("file-1"),
//!     &loader,
//!     &NamespacedIds::default(),
//!     &sink,
//! )
//! .await?;
//!
//! let record = &sink.nodes()[0];
//! println!("{} pages, digest {}", record.number_of_pages(), record.content_digest);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! - **Guard**: only `application/pdf` and `application/x-pdf` are handled
//! - **Load**: the host's [`ContentLoader`] supplies the complete bytes
//! - **Parse**: [`parser::LopdfBackend`] reads the document structure
//! - **Extract**: [`extract::normalize`] and [`extract::extract_pages`]
//! - **Identify**: [`digest::digest`] over the content, [`IdFactory`] for the id
//! - **Emit**: [`NodeSink::create_node`], then [`NodeSink::create_parent_child_link`]

pub mod detect;
pub mod digest;
pub mod error;
pub mod extract;
pub mod ids;
pub mod model;
pub mod parser;
pub mod transform;

#[cfg(feature = "fs")]
pub mod fs;

// Re-export commonly used types
pub use detect::{is_pdf_bytes, is_pdf_media_type, PDF_MEDIA_TYPES};
pub use error::{Error, Result};
pub use ids::NamespacedIds;
pub use model::{DocumentRecord, ExtractionError, Metadata, Page, RecordContent, SourceDocument};
pub use transform::{
    ContentLoader, DateZone, Emission, IdFactory, LoadError, MemoryLoader, MemorySink, NodeSink,
    PdfTransformer, TransformOptions,
};

#[cfg(feature = "fs")]
pub use fs::FileLoader;

/// Handle a newly discovered host document with default options.
///
/// Non-PDF documents are ignored. For PDF documents exactly one record is
/// created and linked to `document`, even when the bytes do not parse.
/// Only a failure to load the content is returned as an error.
pub async fn on_document_discovered<L, I, S>(
    document: &SourceDocument,
    loader: &L,
    ids: &I,
    sink: &S,
) -> std::result::Result<(), L::Error>
where
    L: ContentLoader + ?Sized,
    I: IdFactory + ?Sized,
    S: NodeSink + ?Sized,
{
    PdfTransformer::new()
        .transform(document, loader, ids, sink)
        .await
        .map(|_| ())
}

/// Extract the record content of in-memory PDF bytes with default options.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("document.pdf").unwrap();
/// let content = pdfnode::extract_bytes(&data);
/// if let Some(error) = &content.error {
///     eprintln!("could not read document: {}", error.message);
/// }
/// ```
pub fn extract_bytes(data: &[u8]) -> RecordContent {
    PdfTransformer::new().extract(data)
}
