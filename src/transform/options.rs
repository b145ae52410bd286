//! Transformation options and configuration.

use crate::detect::PDF_MEDIA_TYPES;

/// Node type tag given to emitted records.
pub const DEFAULT_NODE_TYPE: &str = "Pdf";

/// Options for transforming source documents into records.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Zone PDF dates are interpreted in
    pub date_zone: DateZone,

    /// Whether captured errors carry a diagnostic trace
    pub include_stack: bool,

    /// Media types routed to the transformer
    pub media_types: Vec<String>,

    /// Record type tag, also used in the id seed
    pub node_type: String,
}

impl TransformOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zone PDF dates are interpreted in.
    pub fn with_date_zone(mut self, zone: DateZone) -> Self {
        self.date_zone = zone;
        self
    }

    /// Interpret PDF dates as UTC, for output independent of the host clock zone.
    pub fn utc(mut self) -> Self {
        self.date_zone = DateZone::Utc;
        self
    }

    /// Enable or disable diagnostic traces on captured errors.
    pub fn with_stack(mut self, include: bool) -> Self {
        self.include_stack = include;
        self
    }

    /// Replace the recognized media types.
    pub fn with_media_types<I, S>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_types = media_types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the record type tag.
    pub fn with_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    /// Check whether a media type is routed to the transformer.
    pub fn accepts(&self, media_type: &str) -> bool {
        self.media_types.iter().any(|m| m == media_type)
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            date_zone: DateZone::Local,
            include_stack: true,
            media_types: PDF_MEDIA_TYPES.iter().map(|m| m.to_string()).collect(),
            node_type: DEFAULT_NODE_TYPE.to_string(),
        }
    }
}

/// Zone in which PDF date components are interpreted.
///
/// PDF dates are read as wall-clock time; the offset suffix is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateZone {
    /// The host's local time zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}
