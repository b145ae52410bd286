//! Error types for pdfnode.

use std::io;
use thiserror::Error;

/// Result type alias for pdfnode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing a document or extracting its content.
///
/// These never cross the transformer boundary: [`crate::PdfTransformer`]
/// converts them into [`crate::model::ExtractionError`] records.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading document bytes.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The bytes are not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// A required PDF object is missing.
    #[error("Missing required object: {0}")]
    MissingObject(String),

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The record could not be serialized for digesting.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Stable machine-readable code, carried as `ExtractionError.code`.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Io(_) => "IO",
            Error::UnknownFormat => "UNKNOWN_FORMAT",
            Error::UnsupportedVersion(_) => "UNSUPPORTED_VERSION",
            Error::PdfParse(_) => "PDF_PARSE",
            Error::Encrypted => "ENCRYPTED",
            Error::MissingObject(_) => "MISSING_OBJECT",
            Error::TextExtract(_) => "TEXT_EXTRACT",
            Error::PageOutOfRange(_, _) => "PAGE_OUT_OF_RANGE",
            Error::Serialization(_) => "SERIALIZATION",
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
