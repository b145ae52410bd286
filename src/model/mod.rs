//! Record model types.
//!
//! These are the shapes handed to the host graph: the normalized
//! [`Metadata`], per-page [`Page`] text, the [`ExtractionError`] envelope
//! and the finished [`DocumentRecord`].

mod metadata;
mod page;
mod record;
mod source;

pub use metadata::{Metadata, RawInfo};
pub use page::Page;
pub use record::{DocumentRecord, ExtractionError, RecordContent};
pub use source::SourceDocument;
