//! Collaborator interfaces provided by the host graph.
//!
//! The transformer never fetches bytes, mints ids or stores nodes itself:
//! it asks a [`ContentLoader`], an [`IdFactory`] and a [`NodeSink`].

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{DocumentRecord, SourceDocument};

/// Loads the raw bytes of a source document.
///
/// Errors are the host's own and reach the caller of the transformer
/// unchanged.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// Error returned when the content cannot be loaded at all.
    type Error: Send;

    /// Load the complete content of a document.
    async fn load_content(&self, document: &SourceDocument) -> Result<Vec<u8>, Self::Error>;
}

/// Mints node ids from a seed string.
pub trait IdFactory: Send + Sync {
    /// Create the id for the node derived from `seed`.
    fn create_node_id(&self, seed: &str) -> String;
}

impl<F> IdFactory for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn create_node_id(&self, seed: &str) -> String {
        self(seed)
    }
}

/// Receives emitted records and their parent links.
///
/// For every transformed document `create_node` is called once, then
/// `create_parent_child_link` once.
pub trait NodeSink: Send + Sync {
    /// Store a new record node.
    fn create_node(&self, record: &DocumentRecord);

    /// Link a record to the document it was derived from.
    fn create_parent_child_link(&self, parent: &SourceDocument, child: &DocumentRecord);
}

/// Error returned by [`MemoryLoader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No content registered for the document id.
    #[error("No content for document: {0}")]
    NotFound(String),
}

/// In-memory [`ContentLoader`] keyed by document id.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    contents: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the content of a document.
    pub fn with_content(mut self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(id, bytes);
        self
    }

    /// Register the content of a document.
    pub fn insert(&mut self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.contents.insert(id.into(), bytes.into());
    }
}

#[async_trait]
impl ContentLoader for MemoryLoader {
    type Error = LoadError;

    async fn load_content(&self, document: &SourceDocument) -> Result<Vec<u8>, LoadError> {
        self.contents
            .get(&document.id)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(document.id.clone()))
    }
}

/// A side effect observed by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// `create_node` was called
    Node(DocumentRecord),
    /// `create_parent_child_link` was called
    Link {
        /// Id of the source document
        parent_id: String,
        /// Id of the record
        child_id: String,
    },
}

/// [`NodeSink`] that records every emission in call order.
#[derive(Debug, Default)]
pub struct MemorySink {
    emissions: Mutex<Vec<Emission>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, emission: Emission) {
        self.emissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(emission);
    }

    /// All emissions so far, in call order.
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Records passed to `create_node`, in call order.
    pub fn nodes(&self) -> Vec<DocumentRecord> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                Emission::Node(record) => Some(record),
                Emission::Link { .. } => None,
            })
            .collect()
    }

    /// `(parent_id, child_id)` pairs passed to `create_parent_child_link`.
    pub fn links(&self) -> Vec<(String, String)> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                Emission::Link {
                    parent_id,
                    child_id,
                } => Some((parent_id, child_id)),
                Emission::Node(_) => None,
            })
            .collect()
    }

    /// Take the recorded emissions, leaving the sink empty.
    pub fn drain(&self) -> Vec<Emission> {
        std::mem::take(
            &mut *self
                .emissions
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl NodeSink for MemorySink {
    fn create_node(&self, record: &DocumentRecord) {
        self.push(Emission::Node(record.clone()));
    }

    fn create_parent_child_link(&self, parent: &SourceDocument, child: &DocumentRecord) {
        self.push(Emission::Link {
            parent_id: parent.id.clone(),
            child_id: child.id.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordContent;

    #[test]
    fn test_closure_id_factory() {
        let ids = |seed: &str| format!("id:{}", seed);
        assert_eq!(ids.create_node_id("a >>> Pdf"), "id:a >>> Pdf");
    }

    #[tokio::test]
    async fn test_memory_loader() {
        let loader = MemoryLoader::new().with_content("doc", b"%PDF-1.4".to_vec());
        let bytes = loader
            .load_content(&SourceDocument::pdf("doc"))
            .await
            .unwrap();
        assert_eq!(bytes, b"%PDF-1.4");

        let missing = loader.load_content(&SourceDocument::pdf("other")).await;
        assert_eq!(missing, Err(LoadError::NotFound("other".to_string())));
    }

    #[test]
    fn test_memory_sink_records_order() {
        let sink = MemorySink::new();
        let parent = SourceDocument::pdf("parent");
        let record = DocumentRecord::new(RecordContent::empty(), "child", "d", "parent", "Pdf");

        sink.create_node(&record);
        sink.create_parent_child_link(&parent, &record);

        let emissions = sink.emissions();
        assert!(matches!(emissions[0], Emission::Node(_)));
        assert_eq!(
            sink.links(),
            vec![("parent".to_string(), "child".to_string())]
        );
        assert_eq!(sink.nodes().len(), 1);

        assert_eq!(sink.drain().len(), 2);
        assert!(sink.emissions().is_empty());
    }
}
