//! Filesystem content loader (feature `fs`).

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::detect::media_type_for_path;
use crate::model::SourceDocument;
use crate::transform::ContentLoader;

/// [`ContentLoader`] that treats document ids as file paths.
///
/// Relative ids resolve against the loader's root, when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    root: Option<PathBuf>,
}

impl FileLoader {
    /// Create a loader resolving ids against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative ids against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Path a document id resolves to.
    pub fn resolve(&self, id: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(id),
            None => PathBuf::from(id),
        }
    }

    /// Describe a file as a source document, guessing its media type from
    /// the extension.
    pub fn source_for<P: AsRef<Path>>(path: P) -> SourceDocument {
        let path = path.as_ref();
        SourceDocument::new(path.to_string_lossy(), media_type_for_path(path))
    }
}

#[async_trait]
impl ContentLoader for FileLoader {
    type Error = io::Error;

    async fn load_content(&self, document: &SourceDocument) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(&document.id)).await
    }
}
