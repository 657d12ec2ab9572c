//! Authenticated principal and its resolved attribute set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute name → ordered list of values.
///
/// Insertion-ordered so that merge output is deterministic for a fixed
/// scope iteration order.
pub type AttributeMap = IndexMap<String, Vec<Value>>;

/// The authenticated subject plus its resolved attributes.
///
/// Immutable once constructed: the filter never mutates its input, it
/// produces a fresh `Principal` with a recomputed attribute map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    id: String,
    attributes: AttributeMap,
}

impl Principal {
    /// Create a principal from an id and an attribute map.
    pub fn new(id: impl Into<String>, attributes: AttributeMap) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Subject identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All resolved attributes, in resolution order.
    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Values for a single attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&[Value]> {
        self.attributes.get(name).map(Vec::as_slice)
    }
}

// ============================================================================
// Tests
// ============================================================================
