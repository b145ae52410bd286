//! PDF backend abstraction layer.
//!
//! [`PdfBackend`] is the parsed-document contract the extractors run
//! against: a page count, a metadata accessor and per-page text
//! fragments. [`LopdfBackend`] implements it on top of `lopdf`, without
//! leaking lopdf types past this module.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::text::{collect_fragments, TextFragment};
use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::RawInfo;

/// Abstract interface for a parsed PDF document.
pub trait PdfBackend {
    /// Number of pages reported by the document.
    fn page_count(&self) -> u32;

    /// Raw metadata, or `None` when the document has no info dictionary.
    fn info(&self) -> Result<Option<RawInfo>>;

    /// Text fragments of a page (1-indexed), in stream order.
    fn page_fragments(&self, page_number: u32) -> Result<Vec<TextFragment>>;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfBackend {
    /// Parse a complete document from memory.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            log::debug!("Document is encrypted; extracted text may be unreadable");
        }

        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    /// PDF version string from the header.
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        self.pages
            .get(&page_number)
            .copied()
            .ok_or(Error::PageOutOfRange(page_number, self.page_count()))
    }

    /// Decompressed content stream of a page; empty when it has none.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::MissingObject(format!("page {:?}: {}", page_id, e)))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => self.stream_content(*r),
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    let r = obj
                        .as_reference()
                        .map_err(|e| Error::PdfParse(e.to_string()))?;
                    content.extend_from_slice(&self.stream_content(r)?);
                    content.push(b' ');
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn stream_content(&self, id: ObjectId) -> Result<Vec<u8>> {
        match self.doc.get_object(id)? {
            Object::Stream(s) if s.dict.has(b"Filter") => s
                .decompressed_content()
                .map_err(|e| Error::TextExtract(format!("content stream {:?}: {}", id, e))),
            Object::Stream(s) => Ok(s.content.clone()),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn info_dictionary(&self) -> Option<&Dictionary> {
        match self.doc.trailer.get(b"Info").ok()? {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn info(&self) -> Result<Option<RawInfo>> {
        let version = Some(self.doc.version.clone());
        let Some(dict) = self.info_dictionary() else {
            return Ok(Some(RawInfo {
                pdf_version: version,
                ..Default::default()
            }));
        };

        Ok(Some(RawInfo {
            title: get_string_from_dict(dict, b"Title"),
            author: get_string_from_dict(dict, b"Author"),
            subject: get_string_from_dict(dict, b"Subject"),
            keywords: get_string_from_dict(dict, b"Keywords"),
            creator: get_string_from_dict(dict, b"Creator"),
            creation_date: get_string_from_dict(dict, b"CreationDate"),
            mod_date: get_string_from_dict(dict, b"ModDate"),
            pdf_version: version,
        }))
    }

    fn page_fragments(&self, page_number: u32) -> Result<Vec<TextFragment>> {
        let page_id = self.page_id(page_number)?;

        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_number, e)))?;

        let content = self.page_content(page_id)?;
        collect_fragments(&self.doc, &content, &fonts)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_number, e)))
    }
}

/// Read a text string (or name) from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        obj @ Object::String(..) => lopdf::decode_text_string(obj).ok(),
        Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = LopdfBackend::load_bytes(b"<html>not a pdf</html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_rejects_truncated_pdf() {
        let result = LopdfBackend::load_bytes(b"%PDF-1.4\n1 0 obj\n<< /Type /Cat");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_string_from_dict() {
        let dict = dictionary! {
            "Title" => Object::string_literal("Annual Report"),
            "Trapped" => "False",
            "Pages" => 3,
        };
        assert_eq!(
            get_string_from_dict(&dict, b"Title").as_deref(),
            Some("Annual Report")
        );
        assert_eq!(get_string_from_dict(&dict, b"Trapped").as_deref(), Some("False"));
        assert_eq!(get_string_from_dict(&dict, b"Pages"), None);
        assert_eq!(get_string_from_dict(&dict, b"Author"), None);
    }

    #[test]
    fn test_utf16_info_string() {
        let dict = dictionary! {
            "Author" => Object::String(vec![0xFE, 0xFF, 0x00, 0x4A, 0x00, 0x6F], lopdf::StringFormat::Hexadecimal),
        };
        assert_eq!(get_string_from_dict(&dict, b"Author").as_deref(), Some("Jo"));
    }

    #[test]
    fn test_pdfdoc_info_string() {
        let dict = dictionary! {
            "Title" => Object::String(
                vec![0x8D, b'Q', 0x8E, b' ', 0x84, b' ', 0xA0],
                lopdf::StringFormat::Literal,
            ),
        };
        assert_eq!(
            get_string_from_dict(&dict, b"Title").as_deref(),
            Some("\u{201C}Q\u{201D} \u{2014} \u{20AC}")
        );
    }

    #[test]
    fn test_utf8_bom_info_string() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("Résumé".as_bytes());
        let dict = dictionary! {
            "Subject" => Object::String(bytes, lopdf::StringFormat::Literal),
        };
        assert_eq!(get_string_from_dict(&dict, b"Subject").as_deref(), Some("Résumé"));
    }
}
