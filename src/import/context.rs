//! Per-import state.
//!
//! [`ImportContext`] holds everything derived once from the document and
//! never changes afterwards. [`ImportSession`] holds the state that passes
//! update as they run: synthetic ids and the type-name cache. Both are
//! created fresh for every import.

use rustc_hash::{FxHashMap, FxHashSet};

use super::classify::{self, NodeClass, base_ref};
use super::id_index::{
    EaExtensionIndex, NameIndex, XmiIdIndex, build_ea_extension_index, build_xmi_id_index,
    build_xmi_id_to_name_index,
};
use super::type_name::TypeNameResolver;
use crate::config::ImportOptions;
use crate::xml::{Node, NodeId, XmlDocument};

// ============================================================================
// IMMUTABLE CONTEXT
// ============================================================================

/// Read-only indices shared by every pass of one import.
pub struct ImportContext<'a> {
    pub doc: &'a XmlDocument,
    pub options: &'a ImportOptions,
    pub ids: XmiIdIndex,
    pub names: NameIndex,
    pub extensions: EaExtensionIndex,
    classes: Vec<NodeClass<'a>>,
    stereotype_bases: FxHashSet<&'a str>,
}

impl<'a> ImportContext<'a> {
    pub fn new(doc: &'a XmlDocument, options: &'a ImportOptions) -> Self {
        let ids = build_xmi_id_index(doc);
        let names = build_xmi_id_to_name_index(doc);
        let extensions = build_ea_extension_index(doc);
        let classes = classify::classify_document(doc, &options.type_aliases);

        let stereotype_bases = doc
            .nodes()
            .filter(|n| matches!(classes[n.id().index()], NodeClass::Profile(_)))
            .filter_map(|n| base_ref(n).map(|(_, id)| id))
            .collect();

        tracing::debug!(
            nodes = doc.len(),
            ids = ids.len(),
            "prepared import context"
        );

        Self {
            doc,
            options,
            ids,
            names,
            extensions,
            classes,
            stereotype_bases,
        }
    }

    /// Classification of a node.
    pub fn class(&self, node: Node<'_>) -> &NodeClass<'a> {
        &self.classes[node.id().index()]
    }

    /// All nodes with their classes, document order.
    pub fn classified(&self) -> impl Iterator<Item = (Node<'a>, &NodeClass<'a>)> + '_ {
        self.doc.nodes().zip(self.classes.iter())
    }

    /// Node for an id, tolerant of blank input.
    pub fn resolve(&self, id: Option<&str>) -> Option<Node<'a>> {
        self.ids.resolve_node(self.doc, id)
    }

    /// True when a profile stereotype application claims `id` as its base.
    pub fn is_stereotype_base(&self, id: &str) -> bool {
        self.stereotype_bases.contains(id)
    }

    /// EA extension record (element, else connector) for an id.
    pub fn ea_record(&self, id: &str) -> Option<Node<'a>> {
        self.extensions.record(self.doc, id)
    }
}

// ============================================================================
// MUTABLE SESSION
// ============================================================================

/// Synthetic identifiers handed out during one import.
///
/// Keyed by node so that any pass asking again for the same node gets the
/// same id, and by `(prefix, type, source, target)` so identical inferred
/// relationships share one id.
#[derive(Debug, Default)]
pub struct SyntheticIds {
    by_node: FxHashMap<NodeId, String>,
    by_triple: FxHashMap<(String, String, String, String), String>,
    counters: FxHashMap<String, usize>,
}

impl SyntheticIds {
    fn next(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{prefix}_synth_{counter}")
    }

    /// Synthetic id for a node; `true` when it was newly minted.
    pub fn for_node(&mut self, node: NodeId, prefix: &str) -> (String, bool) {
        if let Some(id) = self.by_node.get(&node) {
            return (id.clone(), false);
        }
        let id = self.next(prefix);
        self.by_node.insert(node, id.clone());
        (id, true)
    }

    /// Previously assigned synthetic id of a node.
    pub fn get(&self, node: NodeId) -> Option<&str> {
        self.by_node.get(&node).map(String::as_str)
    }

    /// Synthetic relationship id for a triple; `true` when newly minted.
    pub fn for_triple(&mut self, prefix: &str, rel_type: &str, source: &str, target: &str) -> (String, bool) {
        let key = (
            prefix.to_string(),
            rel_type.to_string(),
            source.to_string(),
            target.to_string(),
        );
        if let Some(id) = self.by_triple.get(&key) {
            return (id.clone(), false);
        }
        let id = self.next(prefix);
        self.by_triple.insert(key, id.clone());
        (id, true)
    }
}

/// State threaded through the passes of one import.
#[derive(Debug, Default)]
pub struct ImportSession {
    pub synthetic: SyntheticIds,
    pub types: TypeNameResolver,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }
}
