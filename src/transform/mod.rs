//! Source document → graph record transformation.
//!
//! [`PdfTransformer`] is the only place failures are caught. Upstream load
//! errors are returned to the caller untouched; everything that goes wrong
//! while parsing or extracting becomes an
//! [`ExtractionError`](crate::model::ExtractionError) inside the emitted
//! record.
//!
//! # Example
//!
//! ```no_run
//! use pdfnode::{MemoryLoader, MemorySink, PdfTransformer, SourceDocument};
//!
//! # async fn run() -> Result<(), pdfnode::LoadError> {
//! let document = SourceDocument::pdf("file-1");
//! let loader = MemoryLoader::new().with_content("file-1", std::fs::read("report.pdf").unwrap());
//! let ids = |seed: &str| format!("node:{}", seed);
//! let sink = MemorySink::new();
//!
//! let record = PdfTransformer::new()
//!     .transform(&document, &loader, &ids, &sink)
//!     .await?;
//! assert!(record.is_some());
//! # Ok(())
//! # }
//! ```

mod host;
mod options;

pub use host::{ContentLoader, Emission, IdFactory, LoadError, MemoryLoader, MemorySink, NodeSink};
pub use options::{DateZone, TransformOptions, DEFAULT_NODE_TYPE};

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::digest::digest;
use crate::error::{Error, Result};
use crate::extract::extract_document;
use crate::model::{DocumentRecord, ExtractionError, Metadata, Page, RecordContent, SourceDocument};
use crate::parser::{LopdfBackend, PdfBackend};

/// Seed handed to the [`IdFactory`] for the record derived from `parent_id`.
pub fn node_id_seed(parent_id: &str, node_type: &str) -> String {
    format!("{} >>> {}", parent_id, node_type)
}

/// Turns PDF source documents into [`DocumentRecord`]s.
///
/// Holds only immutable options, so one transformer can serve any number
/// of concurrent transformations.
#[derive(Debug, Clone, Default)]
pub struct PdfTransformer {
    options: TransformOptions,
}

impl PdfTransformer {
    /// Create a transformer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transformer with custom options.
    pub fn with_options(options: TransformOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform one source document and emit the result.
    ///
    /// Returns `Ok(None)` without any side effect when the media type is not
    /// recognized. Otherwise exactly one record is passed to
    /// [`NodeSink::create_node`], then linked to `document` through
    /// [`NodeSink::create_parent_child_link`], whether or not the document
    /// parsed.
    pub async fn transform<L, I, S>(
        &self,
        document: &SourceDocument,
        loader: &L,
        ids: &I,
        sink: &S,
    ) -> std::result::Result<Option<DocumentRecord>, L::Error>
    where
        L: ContentLoader + ?Sized,
        I: IdFactory + ?Sized,
        S: NodeSink + ?Sized,
    {
        if !self.options.accepts(&document.media_type) {
            log::debug!(
                "Skipping {}: media type {:?} is not handled",
                document.id,
                document.media_type
            );
            return Ok(None);
        }

        let bytes = loader.load_content(document).await?;
        let record = self.record_from_bytes(document, &bytes, ids);

        sink.create_node(&record);
        sink.create_parent_child_link(document, &record);

        Ok(Some(record))
    }

    /// Build the record for `document` from already loaded bytes.
    ///
    /// Never fails: parse and extraction errors are captured in the record.
    pub fn record_from_bytes<I>(&self, document: &SourceDocument, bytes: &[u8], ids: &I) -> DocumentRecord
    where
        I: IdFactory + ?Sized,
    {
        let (content, content_digest) = self.seal(self.extract(bytes));
        let id = ids.create_node_id(&node_id_seed(&document.id, &self.options.node_type));

        DocumentRecord::new(
            content,
            id,
            content_digest,
            document.id.clone(),
            self.options.node_type.clone(),
        )
    }

    /// Parse `bytes` and run both extractors, capturing any failure.
    pub fn extract(&self, bytes: &[u8]) -> RecordContent {
        let zone = self.options.date_zone;
        self.capture(|| {
            let backend = LopdfBackend::load_bytes(bytes)?;
            extract_document(&backend, zone)
        })
    }

    /// Run both extractors over an already parsed document, capturing any
    /// failure or panic.
    pub fn extract_from<B: PdfBackend + ?Sized>(&self, backend: &B) -> RecordContent {
        let zone = self.options.date_zone;
        self.capture(|| extract_document(backend, zone))
    }

    fn capture<F>(&self, run: F) -> RecordContent
    where
        F: FnOnce() -> Result<(Metadata, Vec<Page>)>,
    {
        let result = catch_unwind(AssertUnwindSafe(run)).unwrap_or_else(|panic| {
            Err(Error::PdfParse(format!(
                "parser panicked: {}",
                panic_message(&*panic)
            )))
        });

        match result {
            Ok((metadata, pages)) => {
                log::debug!("Extracted {} pages", pages.len());
                RecordContent::success(metadata, pages)
            }
            Err(e) => {
                log::warn!("Capturing extraction failure: {}", e);
                self.failure(&e)
            }
        }
    }

    /// Attach the digest; a content that cannot be serialized is replaced
    /// by the failure that says so.
    fn seal(&self, content: RecordContent) -> (RecordContent, String) {
        match digest(&content) {
            Ok(d) => (content, d),
            Err(e) => {
                log::warn!("Capturing serialization failure: {}", e);
                let failed = self.failure(&e);
                let d = digest(&failed).unwrap_or_default();
                (failed, d)
            }
        }
    }

    fn failure(&self, error: &Error) -> RecordContent {
        RecordContent::failure(ExtractionError::from_error(error, self.options.include_stack))
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
