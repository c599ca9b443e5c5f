//! Relationship parsing.
//!
//! Endpoints are read through ordered extractor chains chosen per
//! [`UmlRelationKind`](super::classify::UmlRelationKind) or, for profile
//! tags, one generic chain tried on the tag and then on its base. The
//! resulting drafts go through [`emit`] which fans out multi-valued
//! endpoints and assigns ids.

mod archimate;
mod bpmn;
mod emit;
mod profile;
mod uml;

pub use archimate::parse_archimate_relationships;
pub use bpmn::parse_bpmn_relationships;
pub use uml::parse_uml_relationships;

use serde::Serialize;

use super::context::ImportContext;
use super::extract::{Extractor, id_refs_any};
use crate::ir::IrRelationship;
use crate::xml::{Node, nav};

/// Relationships produced by one family.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RelationshipParseResult {
    pub relationships: Vec<IrRelationship>,
}

// ============================================================================
// ENDPOINT EXTRACTORS
// ============================================================================

/// Define an endpoint extractor reading the first non-empty of several
/// reference names.
macro_rules! ref_extractor {
    ($name:ident, $($attr:literal),+ $(,)?) => {
        pub(crate) fn $name(_: &ImportContext<'_>, node: Node<'_>) -> Option<Vec<String>> {
            id_refs_any(node, &[$($attr),+])
        }
    };
}

ref_extractor!(specific, "specific");
ref_extractor!(general, "general");
ref_extractor!(including_case, "includingCase");
ref_extractor!(addition, "addition");
ref_extractor!(extension, "extension");
ref_extractor!(extended_case, "extendedCase");
ref_extractor!(client, "client");
ref_extractor!(supplier, "supplier");
ref_extractor!(implementing_classifier, "implementingClassifier");
ref_extractor!(contract, "contract");
ref_extractor!(edge_source, "source");
ref_extractor!(edge_target, "target");
ref_extractor!(information_source, "informationSource");
ref_extractor!(information_target, "informationTarget");
ref_extractor!(generic_source, "source", "client", "from", "src", "start");
ref_extractor!(generic_target, "target", "supplier", "to", "tgt", "end");

/// `<source xmi:idref>` of the record's EA connector.
pub(crate) fn ea_connector_source(ctx: &ImportContext<'_>, node: Node<'_>) -> Option<Vec<String>> {
    ea_connector_end(ctx, node, "source")
}

/// `<target xmi:idref>` of the record's EA connector.
pub(crate) fn ea_connector_target(ctx: &ImportContext<'_>, node: Node<'_>) -> Option<Vec<String>> {
    ea_connector_end(ctx, node, "target")
}

fn ea_connector_end(ctx: &ImportContext<'_>, node: Node<'_>, end: &str) -> Option<Vec<String>> {
    let id = nav::xmi_id(node)?;
    let connector = ctx.extensions.connector(ctx.doc, id)?;
    let end = nav::child(connector, end)?;
    nav::xmi_idref(end).map(|id| vec![id.to_string()])
}

/// Endpoint chains for one side of a relationship.
pub(crate) struct EndpointRule {
    pub chain: &'static [Extractor<Vec<String>>],
    /// Fall back to the owning element (embedded form).
    pub owner_fallback: bool,
}

impl EndpointRule {
    pub const fn new(chain: &'static [Extractor<Vec<String>>]) -> Self {
        Self {
            chain,
            owner_fallback: false,
        }
    }

    pub const fn or_owner(chain: &'static [Extractor<Vec<String>>]) -> Self {
        Self {
            chain,
            owner_fallback: true,
        }
    }
}
