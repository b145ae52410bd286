//! Per-page text flattening.

use crate::error::Result;
use crate::model::Page;
use crate::parser::{PdfBackend, TextFragment};

/// Extract the text of every page, in page order.
///
/// Pages run from 1 to the document's page count. A failure on any page
/// fails the whole extraction.
pub fn extract_pages<B: PdfBackend + ?Sized>(document: &B) -> Result<Vec<Page>> {
    (1..=document.page_count())
        .map(|page_number| {
            let fragments = document.page_fragments(page_number)?;
            Ok(Page::new(page_number, join_fragments(&fragments)))
        })
        .collect()
}

/// Trim each fragment and join them with single spaces.
pub fn join_fragments(fragments: &[TextFragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::RawInfo;

    struct FakeDocument {
        pages: Vec<Vec<&'static str>>,
        broken_page: Option<u32>,
    }

    impl PdfBackend for FakeDocument {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn info(&self) -> Result<Option<RawInfo>> {
            Ok(None)
        }

        fn page_fragments(&self, page_number: u32) -> Result<Vec<TextFragment>> {
            if self.broken_page == Some(page_number) {
                return Err(Error::TextExtract(format!("Page {}: bad stream", page_number)));
            }
            Ok(self.pages[(page_number - 1) as usize]
                .iter()
                .map(|text| TextFragment::new(*text, 0.0, 0.0))
                .collect())
        }
    }

    #[test]
    fn test_pages_in_order() {
        let doc = FakeDocument {
            pages: vec![vec![" Hello ", "world "], vec![], vec!["Third"]],
            broken_page: None,
        };
        let pages = extract_pages(&doc).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], Page::new(1, "Hello world"));
        assert_eq!(pages[1], Page::new(2, ""));
        assert_eq!(pages[2], Page::new(3, "Third"));
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.page_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_page_failure_fails_document() {
        let doc = FakeDocument {
            pages: vec![vec!["a"], vec!["b"], vec!["c"]],
            broken_page: Some(2),
        };
        let result = extract_pages(&doc);
        assert!(matches!(result, Err(Error::TextExtract(_))));
    }

    #[test]
    fn test_join_fragments_keeps_blank_fragments() {
        let fragments = vec![
            TextFragment::new("a", 0.0, 0.0),
            TextFragment::new("   ", 0.0, 0.0),
            TextFragment::new("b", 0.0, 0.0),
        ];
        assert_eq!(join_fragments(&fragments), "a  b");
    }

    #[test]
    fn test_empty_document() {
        let doc = FakeDocument {
            pages: vec![],
            broken_page: None,
        };
        assert!(extract_pages(&doc).unwrap().is_empty());
    }
}
