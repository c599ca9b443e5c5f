//! Arena-backed XML document built with `quick-xml`.
//!
//! Import passes need random access (id lookups, parent walks, subtree
//! scans) over the whole XMI file, so the event stream is materialized once
//! into a flat arena. Nodes are stored in document order, which makes a
//! preorder walk a plain index scan and lets every subtree be described by a
//! contiguous index range.
//!
//! ```text
//! XmlDocument
//! ├── nodes: Vec<NodeData>   (document order)
//! │     ├── tag / namespace / attributes / text
//! │     ├── parent, children
//! │     └── subtree_end      (exclusive index bound of descendants)
//! ```

use std::sync::Arc;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ImportError;

// ============================================================================
// IDs
// ============================================================================

/// Stable handle for a node inside one [`XmlDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in document order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single attribute, stored with its qualified name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    /// Attribute name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Namespace prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(p, _)| p)
    }
}

#[derive(Debug)]
struct NodeData {
    tag: String,
    namespace: Option<Arc<str>>,
    attributes: Vec<Attribute>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    subtree_end: u32,
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// A fully parsed, immutable XML document.
#[derive(Debug, Default)]
pub struct XmlDocument {
    nodes: Vec<NodeData>,
}

impl XmlDocument {
    /// Parse a document from a string.
    pub fn parse(input: &str) -> Result<Self, ImportError> {
        DocumentBuilder::default().build(input)
    }

    /// Parse a document from raw bytes (must be UTF-8).
    pub fn parse_bytes(input: &[u8]) -> Result<Self, ImportError> {
        let text = std::str::from_utf8(input)
            .map_err(|e| ImportError::xml(format!("Invalid UTF-8: {e}")))?;
        Self::parse(text)
    }

    /// The first top-level element.
    pub fn root(&self) -> Option<Node<'_>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(self.node(NodeId(0)))
        }
    }

    /// Handle for a node id produced by this document.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { doc: self, id }
    }

    /// All elements in document order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        (0..self.nodes.len() as u32).map(move |i| self.node(NodeId(i)))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Quick structural check that the input looks like an XMI export.
///
/// This does not parse the document; it only rejects input that is clearly
/// something else before the full parse is attempted.
pub fn validate_xmi(input: &[u8]) -> Result<(), ImportError> {
    let content = std::str::from_utf8(input)
        .map_err(|e| ImportError::xml(format!("Invalid UTF-8: {e}")))?;

    if !content.contains("XMI") && !content.contains("uml:Model") {
        return Err(ImportError::NotXmi("missing XMI root element".to_string()));
    }

    Ok(())
}

// ============================================================================
// NODE HANDLE
// ============================================================================

/// Borrowed view of one element.
#[derive(Clone, Copy)]
pub struct Node<'d> {
    doc: &'d XmlDocument,
    id: NodeId,
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} #{}>", self.tag_name(), self.id.0)
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl<'d> Node<'d> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'d XmlDocument {
        self.doc
    }

    /// Qualified tag name as written (`uml:Model`, `packagedElement`).
    pub fn tag_name(&self) -> &'d str {
        &self.doc.data(self.id).tag
    }

    /// Tag name without prefix.
    pub fn local_name(&self) -> &'d str {
        local_part(self.tag_name())
    }

    /// Tag prefix, if any.
    pub fn prefix(&self) -> Option<&'d str> {
        self.tag_name().split_once(':').map(|(p, _)| p)
    }

    /// Namespace URI bound to the tag prefix (or the default namespace).
    pub fn namespace_uri(&self) -> Option<&'d str> {
        self.doc.data(self.id).namespace.as_deref()
    }

    pub fn attributes(&self) -> &'d [Attribute] {
        &self.doc.data(self.id).attributes
    }

    /// Exact-name attribute lookup.
    pub fn attribute(&self, name: &str) -> Option<&'d str> {
        self.attributes()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Concatenated direct text content (whitespace-trimmed segments).
    pub fn text(&self) -> &'d str {
        &self.doc.data(self.id).text
    }

    pub fn parent(&self) -> Option<Node<'d>> {
        self.doc.data(self.id).parent.map(|p| self.doc.node(p))
    }

    pub fn children(self) -> impl Iterator<Item = Node<'d>> {
        let doc = self.doc;
        doc.data(self.id).children.iter().map(move |c| doc.node(*c))
    }

    /// Parent chain, nearest first, excluding this node.
    pub fn ancestors(self) -> impl Iterator<Item = Node<'d>> {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    /// All nodes below this one in document order, excluding this node.
    pub fn descendants(self) -> impl Iterator<Item = Node<'d>> {
        let doc = self.doc;
        let end = doc.data(self.id).subtree_end;
        (self.id.0 + 1..end).map(move |i| doc.node(NodeId(i)))
    }
}

/// Strip a namespace prefix from a qualified name.
pub fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, l)| l).unwrap_or(name)
}

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Default)]
struct DocumentBuilder {
    nodes: Vec<NodeData>,
    /// Open elements, innermost last.
    open: Vec<NodeId>,
    /// Namespace scopes, one frame per open element.
    scopes: Vec<Vec<(String, Arc<str>)>>,
}

impl DocumentBuilder {
    fn build(mut self, input: &str) -> Result<XmlDocument, ImportError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    self.open_element(e)?;
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing element - handle as start + end
                    self.open_element(e)?;
                    self.close_element();
                }
                Ok(Event::End(_)) => {
                    self.close_element();
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| ImportError::xml(format!("Text error: {e}")))?;
                    self.append_text(&text);
                }
                Ok(Event::CData(e)) => {
                    let raw = e.into_inner();
                    self.append_text(&String::from_utf8_lossy(&raw));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ImportError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
        }

        // Unclosed elements at EOF still get a valid subtree range.
        while !self.open.is_empty() {
            self.close_element();
        }

        Ok(XmlDocument { nodes: self.nodes })
    }

    fn open_element(&mut self, e: &BytesStart<'_>) -> Result<(), ImportError> {
        let tag = std::str::from_utf8(e.name().as_ref())
            .map_err(|e| ImportError::xml(format!("Invalid tag name: {e}")))?
            .to_string();

        let mut attributes = Vec::new();
        let mut frame = Vec::new();
        for attr_result in e.attributes().with_checks(false) {
            let attr =
                attr_result.map_err(|e| ImportError::xml(format!("Attribute error: {e}")))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| ImportError::xml(format!("Attribute key error: {e}")))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| ImportError::xml(format!("Attribute value error: {e}")))?
                .to_string();

            if key == "xmlns" {
                frame.push((String::new(), Arc::from(value.as_str())));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                frame.push((prefix.to_string(), Arc::from(value.as_str())));
            }
            attributes.push(Attribute { name: key, value });
        }
        self.scopes.push(frame);

        let prefix = tag.split_once(':').map(|(p, _)| p).unwrap_or("");
        let namespace = self.lookup_namespace(prefix);

        let id = NodeId(self.nodes.len() as u32);
        let parent = self.open.last().copied();
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        self.nodes.push(NodeData {
            tag,
            namespace,
            attributes,
            parent,
            children: Vec::new(),
            text: String::new(),
            subtree_end: id.0 + 1,
        });
        self.open.push(id);
        Ok(())
    }

    fn close_element(&mut self) {
        if let Some(id) = self.open.pop() {
            self.nodes[id.index()].subtree_end = self.nodes.len() as u32;
            self.scopes.pop();
        }
    }

    fn append_text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if let Some(id) = self.open.last() {
            let node = &mut self.nodes[id.index()];
            if !node.text.is_empty() {
                node.text.push(' ');
            }
            node.text.push_str(text.trim());
        }
    }

    fn lookup_namespace(&self, prefix: &str) -> Option<Arc<str>> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| Arc::clone(uri))
    }
}
