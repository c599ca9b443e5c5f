//! Identifier indices built once per import.
//!
//! EA identifiers are unreliable: the same id may appear on more than one
//! node (first occurrence wins), references come as attributes, IDREF
//! lists, `xmi:idref` children or `href` URIs, and some facts only exist
//! in the vendor extension section keyed by `xmi:idref`.

use rustc_hash::FxHashMap;

use crate::xml::nav;
use crate::xml::{Node, NodeId, XmlDocument};

// ============================================================================
// ID → NODE
// ============================================================================

/// Map from every id-bearing node's id to its node.
#[derive(Debug, Default)]
pub struct XmiIdIndex {
    by_id: FxHashMap<String, NodeId>,
}

impl XmiIdIndex {
    /// Guarded lookup; blank or missing ids resolve to nothing.
    pub fn resolve(&self, id: Option<&str>) -> Option<NodeId> {
        let id = nav::non_empty(id)?;
        self.by_id.get(id).copied()
    }

    /// Lookup returning a node handle.
    pub fn resolve_node<'d>(&self, doc: &'d XmlDocument, id: Option<&str>) -> Option<Node<'d>> {
        self.resolve(id).map(|n| doc.node(n))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Walk the document once and index every `xmi:id` and plain `id`. A node
/// carrying both is reachable through either.
///
/// On duplicate ids the first node in document order wins.
pub fn build_xmi_id_index(doc: &XmlDocument) -> XmiIdIndex {
    let mut by_id = FxHashMap::default();
    for node in doc.nodes() {
        let ids = [nav::attr_value(node, "xmi:id"), nav::attr_value(node, "id")];
        for id in ids.into_iter().flatten() {
            by_id.entry(id.to_string()).or_insert(node.id());
        }
    }
    tracing::trace!(ids = by_id.len(), "built xmi id index");
    XmiIdIndex { by_id }
}

/// Split a whitespace-separated IDREF list.
pub fn parse_id_ref_list(value: &str) -> Vec<&str> {
    value.split_whitespace().collect()
}

/// Fragment of an `href` (`file.xmi#EAID_1` → `EAID_1`).
pub fn resolve_href_id(href: &str) -> Option<&str> {
    let (_, fragment) = href.rsplit_once('#')?;
    nav::non_empty(Some(fragment))
}

// ============================================================================
// ID → NAME
// ============================================================================

/// Map from id to a human-readable name.
#[derive(Debug, Default)]
pub struct NameIndex {
    by_id: FxHashMap<String, String>,
}

impl NameIndex {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }
}

/// Index display names: a direct `name` attribute, else an EA
/// `<properties name="…">` child.
pub fn build_xmi_id_to_name_index(doc: &XmlDocument) -> NameIndex {
    let mut by_id = FxHashMap::default();
    for node in doc.nodes() {
        let Some(id) = nav::xmi_id(node) else {
            continue;
        };
        if by_id.contains_key(id) {
            continue;
        }
        let name = nav::attr_value(node, "name").or_else(|| {
            nav::child(node, "properties").and_then(|p| nav::attr_value(p, "name"))
        });
        if let Some(name) = name {
            by_id.insert(id.to_string(), name.to_string());
        }
    }
    NameIndex { by_id }
}

// ============================================================================
// EA EXTENSION RECORDS
// ============================================================================

/// EA's `<xmi:Extension>` element and connector records keyed by `xmi:idref`.
#[derive(Debug, Default)]
pub struct EaExtensionIndex {
    elements: FxHashMap<String, NodeId>,
    connectors: FxHashMap<String, NodeId>,
}

impl EaExtensionIndex {
    pub fn element<'d>(&self, doc: &'d XmlDocument, id: &str) -> Option<Node<'d>> {
        self.elements.get(id).map(|n| doc.node(*n))
    }

    pub fn connector<'d>(&self, doc: &'d XmlDocument, id: &str) -> Option<Node<'d>> {
        self.connectors.get(id).map(|n| doc.node(*n))
    }

    /// Element record first, then connector record.
    pub fn record<'d>(&self, doc: &'d XmlDocument, id: &str) -> Option<Node<'d>> {
        self.element(doc, id).or_else(|| self.connector(doc, id))
    }

    /// All element records in document order.
    pub fn element_records<'d>(&self, doc: &'d XmlDocument) -> Vec<Node<'d>> {
        let mut ids: Vec<NodeId> = self.elements.values().copied().collect();
        ids.sort();
        ids.into_iter().map(|n| doc.node(n)).collect()
    }
}

pub fn build_ea_extension_index(doc: &XmlDocument) -> EaExtensionIndex {
    let mut index = EaExtensionIndex::default();
    for ext in doc.nodes().filter(|n| nav::is_extension(*n)) {
        for node in ext.descendants() {
            let Some(idref) = nav::xmi_idref(node) else {
                continue;
            };
            let target = if node.local_name().eq_ignore_ascii_case("element") {
                &mut index.elements
            } else if node.local_name().eq_ignore_ascii_case("connector") {
                &mut index.connectors
            } else {
                continue;
            };
            target.entry(idref.to_string()).or_insert(node.id());
        }
    }
    index
}
