//! Deterministic node identifiers.

use uuid::Uuid;

use crate::transform::IdFactory;

/// Name the default namespace is derived from.
const DEFAULT_NAMESPACE: &str = "pdfnode";

/// [`IdFactory`] minting UUIDv5 ids inside a fixed namespace.
///
/// The same seed always maps to the same id, so re-processing a source
/// document re-creates the record under the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespacedIds {
    namespace: Uuid,
}

impl NamespacedIds {
    /// Create a factory whose namespace is derived from `name`.
    pub fn new(name: &str) -> Self {
        Self {
            namespace: Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()),
        }
    }

    /// Create a factory for an existing namespace.
    pub fn with_namespace(namespace: Uuid) -> Self {
        Self { namespace }
    }

    /// The namespace ids are minted in.
    pub fn namespace(&self) -> Uuid {
        self.namespace
    }
}

impl Default for NamespacedIds {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl IdFactory for NamespacedIds {
    fn create_node_id(&self, seed: &str) -> String {
        Uuid::new_v5(&self.namespace, seed.as_bytes()).to_string()
    }
}
