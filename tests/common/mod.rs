//! Fixture documents built in-process with lopdf's writer.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

/// Builder for small text-only PDF documents.
pub struct PdfBuilder {
    version: String,
    pages: Vec<PageSpec>,
    info: Vec<(String, String)>,
}

enum PageSpec {
    Text(Vec<String>),
    NoContents,
    ContentsNotAStream,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self {
            version: "1.5".to_string(),
            pages: Vec::new(),
            info: Vec::new(),
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Add a page showing each line with its own `Tj`.
    pub fn page(mut self, lines: &[&str]) -> Self {
        self.pages
            .push(PageSpec::Text(lines.iter().map(|l| l.to_string()).collect()));
        self
    }

    /// Add a page with no /Contents entry at all.
    pub fn page_without_contents(mut self) -> Self {
        self.pages.push(PageSpec::NoContents);
        self
    }

    /// Add a page whose /Contents points at a dictionary instead of a stream.
    pub fn page_with_broken_contents(mut self) -> Self {
        self.pages.push(PageSpec::ContentsNotAStream);
        self
    }

    /// Add an /Info dictionary entry.
    pub fn info(mut self, key: &str, value: &str) -> Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version(self.version.as_str());
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in &self.pages {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            };
            match lines {
                PageSpec::Text(lines) => {
                    let content_id =
                        doc.add_object(Stream::new(dictionary! {}, text_content(lines)));
                    page.set("Contents", content_id);
                }
                PageSpec::NoContents => {}
                PageSpec::ContentsNotAStream => {
                    let bogus_id = doc.add_object(dictionary! { "Kind" => "NotAStream" });
                    page.set("Contents", bogus_id);
                }
            }
            kids.push(doc.add_object(page).into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let mut info = Dictionary::new();
            for (key, value) in &self.info {
                info.set(key.clone(), Object::string_literal(value.as_str()));
            }
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}

fn text_content(lines: &[String]) -> Vec<u8> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-14).into()]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.as_str())],
        ));
    }
    operations.push(Operation::new("ET", vec![]));
    Content { operations }.encode().unwrap()
}

/// Three pages of body text, like a short report.
pub fn multiple_pages_pdf() -> Vec<u8> {
    PdfBuilder::new()
        .info("Title", "Multiple Pages")
        .info("Author", "Test Author")
        .page(&["Page one heading", "  first page body  "])
        .page(&["Second page"])
        .page(&["Third", "and last", "page"])
        .build()
}

/// A single page with a fully populated info dictionary.
pub fn one_page_pdf() -> Vec<u8> {
    PdfBuilder::new()
        .info("Title", "Title")
        .info("Author", "Author")
        .info("Subject", "Subject")
        .info("Keywords", "a, b ,c")
        .info("Creator", "Writer")
        .info("CreationDate", "D:20240102030405+01'00'")
        .info("ModDate", "not-a-date")
        .page(&["Hello, world"])
        .build()
}

/// A host-style id factory that always returns the same id.
pub fn fixed_ids(_seed: &str) -> String {
    "uuid-from-host".to_string()
}
