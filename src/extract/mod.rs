//! Extractors that run over a parsed document.

pub mod metadata;
pub mod pages;

pub use metadata::{normalize, parse_date, parse_keywords};
pub use pages::{extract_pages, join_fragments};

use crate::error::Result;
use crate::model::{Metadata, Page};
use crate::parser::PdfBackend;
use crate::transform::DateZone;

/// Run both extractors: metadata first, then every page.
pub fn extract_document<B: PdfBackend + ?Sized>(
    document: &B,
    zone: DateZone,
) -> Result<(Metadata, Vec<Page>)> {
    let raw = document.info()?;
    let metadata = normalize(raw.as_ref(), zone);
    let pages = extract_pages(document)?;
    Ok((metadata, pages))
}
