//! Intermediate Representation produced by the importer.
//!
//! The IR is tool-agnostic: it carries what the XMI said (ids, types, names,
//! provenance) without committing to any downstream object model. All types
//! serialize to camelCase JSON so the model builder can consume them as-is.
//!
//! ```text
//! ImportResult
//! ├── elements:      Vec<IrElement>
//! ├── relationships: Vec<IrRelationship>
//! └── counters       (created packages, rewritten endpoints)
//! ```

mod members;

pub use members::{ClassifierMembers, Multiplicity, UmlAttribute, UmlOperation, UmlParameter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form, insertion-ordered JSON object used for `attrs` and `meta`.
pub type JsonMap = serde_json::Map<String, Value>;

/// Type token for records whose source type could not be mapped.
pub const UNKNOWN_TYPE: &str = "Unknown";

// ============================================================================
// SHARED PIECES
// ============================================================================

/// An identifier of the record in some external system.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalId {
    pub system: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ExternalId {
    pub fn new(system: impl Into<String>, id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            id: id.into(),
            kind: Some(kind.into()),
        }
    }
}

/// Key/value pair preserved from the source (stereotypes, profile tags).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedValue {
    pub key: String,
    pub value: String,
}

impl TaggedValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

fn push_unique_external_id(ids: &mut Vec<ExternalId>, ext: ExternalId) {
    if !ids.iter().any(|e| e.system == ext.system && e.id == ext.id && e.kind == ext.kind) {
        ids.push(ext);
    }
}

// ============================================================================
// ELEMENTS
// ============================================================================

/// A model element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<ExternalId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tagged_values: Vec<TaggedValue>,
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub attrs: JsonMap,
    #[serde(default)]
    pub meta: JsonMap,
}

impl IrElement {
    pub fn new(id: impl Into<String>, element_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element_type: element_type.into(),
            name: name.into(),
            documentation: None,
            folder_id: None,
            external_ids: Vec::new(),
            tagged_values: Vec::new(),
            attrs: JsonMap::new(),
            meta: JsonMap::new(),
        }
    }

    /// Add an external id unless an identical one is already present.
    pub fn add_external_id(&mut self, ext: ExternalId) {
        push_unique_external_id(&mut self.external_ids, ext);
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.get(key).and_then(Value::as_str)
    }

    pub fn is_unknown(&self) -> bool {
        self.element_type == UNKNOWN_TYPE
    }
}

// ============================================================================
// RELATIONSHIPS
// ============================================================================

/// A directed relationship between two endpoint tokens.
///
/// Endpoints are not required to name an element of the same import;
/// the model builder resolves them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrRelationship {
    pub id: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub attrs: JsonMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<ExternalId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tagged_values: Vec<TaggedValue>,
    #[serde(default)]
    pub meta: JsonMap,
}

impl IrRelationship {
    pub fn new(
        id: impl Into<String>,
        relationship_type: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            relationship_type: relationship_type.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            name: None,
            documentation: None,
            attrs: JsonMap::new(),
            external_ids: Vec::new(),
            tagged_values: Vec::new(),
            meta: JsonMap::new(),
        }
    }

    pub fn add_external_id(&mut self, ext: ExternalId) {
        push_unique_external_id(&mut self.external_ids, ext);
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    pub fn tagged_value(&self, key: &str) -> Option<&str> {
        self.tagged_values
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }
}

// ============================================================================
// FOLDERS AND VIEWS (consumed, produced elsewhere)
// ============================================================================

/// A folder in the model browser, usually one per UML package.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrFolder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<ExternalId>,
}

impl IrFolder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            external_ids: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Every id the folder is known under: its own, then its external ids.
    pub fn known_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.external_ids.iter().map(|e| e.id.as_str()))
    }
}

/// A diagram. Only the element references of its nodes matter here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrView {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub nodes: Vec<IrViewNode>,
}

/// A placed node on a diagram.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrViewNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_ref: Option<String>,
}

impl IrViewNode {
    pub fn referencing(element_ref: impl Into<String>) -> Self {
        Self {
            id: None,
            element_ref: Some(element_ref.into()),
        }
    }
}
