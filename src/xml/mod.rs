//! XML document model and navigation helpers.
//!
//! The importer works against an already-parsed, in-memory document.
//! [`XmlDocument`] is that document; [`nav`] holds the prefix- and
//! case-tolerant lookups every pass uses.

mod document;
pub mod nav;

pub use document::{Attribute, Node, NodeId, XmlDocument, local_part, validate_xmi};
