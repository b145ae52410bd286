//! The record envelope and the finished graph record.

use super::{Metadata, Page};
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Captured parse or extraction failure.
///
/// Serialized as `{ "err": true, "code"?, "message", "stack"? }`; absent
/// optional fields are omitted rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionError {
    /// Always `true`
    pub err: bool,

    /// Machine-readable failure code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human-readable failure message
    pub message: String,

    /// Diagnostic trace: the failure followed by its causes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ExtractionError {
    /// Create an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            err: true,
            code: None,
            message: message.into(),
            stack: None,
        }
    }

    /// Capture a crate error, optionally with its cause chain.
    pub fn from_error(error: &Error, include_stack: bool) -> Self {
        Self {
            err: true,
            code: Some(error.code().to_string()),
            message: error.to_string(),
            stack: include_stack.then(|| diagnostic_trace(error)),
        }
    }

    /// Set the failure code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Render an error and every `source()` below it, one per line.
fn diagnostic_trace(error: &Error) -> String {
    let mut trace = format!("{} [{}]", error, error.code());
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        trace.push_str("\n    caused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}

/// The content fields of a record: everything the digest covers.
///
/// Exactly one of two shapes holds. On success `error` is `None` and the
/// other fields are populated; on failure `error` is set, `number_of_pages`
/// is 0, `metadata` is `None` (serialized as `{}`) and `pages` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordContent {
    /// Captured failure, `null` on success
    pub error: Option<ExtractionError>,

    /// Page count reported by the parser
    pub number_of_pages: u32,

    /// Normalized metadata, `{}` on failure
    #[serde(with = "metadata_or_empty")]
    pub metadata: Option<Metadata>,

    /// Pages in reading order
    pub pages: Vec<Page>,
}

impl RecordContent {
    /// The zero-value envelope every record starts from.
    pub fn empty() -> Self {
        Self {
            error: None,
            number_of_pages: 0,
            metadata: None,
            pages: Vec::new(),
        }
    }

    /// A successful extraction.
    pub fn success(metadata: Metadata, pages: Vec<Page>) -> Self {
        Self {
            number_of_pages: pages.len() as u32,
            metadata: Some(metadata),
            pages,
            ..Self::empty()
        }
    }

    /// A captured failure; success fields stay at their zero values.
    pub fn failure(error: ExtractionError) -> Self {
        Self {
            error: Some(error),
            ..Self::empty()
        }
    }

    /// Check if extraction succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl Default for RecordContent {
    fn default() -> Self {
        Self::empty()
    }
}

/// A finished record, ready for the host graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Envelope fields
    #[serde(flatten)]
    pub content: RecordContent,

    /// Node id derived from the parent id
    pub id: String,

    /// Digest of the envelope fields
    pub content_digest: String,

    /// Id of the source document
    pub parent_id: String,

    /// Child node ids (always empty when emitted)
    pub children: Vec<String>,

    /// Node type tag (e.g., "Pdf")
    #[serde(rename = "type")]
    pub node_type: String,
}

impl DocumentRecord {
    /// Create a record from its envelope and identity fields.
    pub fn new(
        content: RecordContent,
        id: impl Into<String>,
        content_digest: impl Into<String>,
        parent_id: impl Into<String>,
        node_type: impl Into<String>,
    ) -> Self {
        Self {
            content,
            id: id.into(),
            content_digest: content_digest.into(),
            parent_id: parent_id.into(),
            children: Vec::new(),
            node_type: node_type.into(),
        }
    }

    /// The captured failure, if any.
    pub fn error(&self) -> Option<&ExtractionError> {
        self.content.error.as_ref()
    }

    /// Page count.
    pub fn number_of_pages(&self) -> u32 {
        self.content.number_of_pages
    }

    /// Normalized metadata; `None` for failed records.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.content.metadata.as_ref()
    }

    /// Pages in reading order.
    pub fn pages(&self) -> &[Page] {
        &self.content.pages
    }

    /// Check if extraction succeeded.
    pub fn is_success(&self) -> bool {
        self.content.is_success()
    }
}

/// `Option<Metadata>` on the wire: `None` is the empty object `{}`.
mod metadata_or_empty {
    use super::Metadata;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::{Map, Value};

    pub fn serialize<S>(value: &Option<Metadata>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(metadata) => metadata.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Metadata>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        if map.is_empty() {
            return Ok(None);
        }
        serde_json::from_value(Value::Object(map))
            .map(Some)
            .map_err(D::Error::custom)
    }
}
