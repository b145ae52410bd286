//! PDF recognition by media type and by magic bytes.

use crate::error::{Error, Result};
use std::path::Path;

/// Media types routed to the PDF transformer.
pub const PDF_MEDIA_TYPES: [&str; 2] = ["application/pdf", "application/x-pdf"];

/// Media type reported for files that are not recognized as PDF.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// PDF header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version from the header (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Check whether a media type is one of the recognized PDF types.
///
/// Comparison is exact, the way the host reports media types.
pub fn is_pdf_media_type(media_type: &str) -> bool {
    PDF_MEDIA_TYPES.contains(&media_type)
}

/// Guess a media type from a file extension.
///
/// Used by callers that discover documents on disk and have no
/// host-provided media type.
pub fn media_type_for_path<P: AsRef<Path>>(path: P) -> &'static str {
    match path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => PDF_MEDIA_TYPES[0],
        _ => OCTET_STREAM,
    }
}

/// Detect the PDF header in raw bytes.
///
/// # Returns
/// * `Ok(PdfFormat)` if the data starts with a valid PDF header
/// * `Err(Error::UnknownFormat)` if the data is not a PDF
/// * `Err(Error::UnsupportedVersion)` if the version is malformed
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }

    if !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

/// Check if a version string looks like "1.7".
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_media_types() {
        assert!(is_pdf_media_type("application/pdf"));
        assert!(is_pdf_media_type("application/x-pdf"));
        assert!(!is_pdf_media_type("text/plain"));
        assert!(!is_pdf_media_type("application/PDF"));
        assert!(!is_pdf_media_type(""));
    }

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path("report.pdf"), "application/pdf");
        assert_eq!(media_type_for_path("REPORT.PDF"), "application/pdf");
        assert_eq!(media_type_for_path("notes.txt"), OCTET_STREAM);
        assert_eq!(media_type_for_path("no_extension"), OCTET_STREAM);
    }

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.version, "1.7");
        assert_eq!(format.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        let result = detect_format_from_bytes(b"%PDF");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_bad_version() {
        let result = detect_format_from_bytes(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
        assert!(!is_pdf_bytes(b""));
    }
}
