//! Element parsing.
//!
//! Three families walk the same classified document:
//!
//! | Family    | Recognized by                  | Module      |
//! |-----------|--------------------------------|-------------|
//! | UML       | `xmi:type="uml:…"`             | `uml`       |
//! | ArchiMate | ArchiMate profile namespace    | `archimate` |
//! | BPMN      | BPMN profile namespace         | `bpmn`      |
//!
//! Identity, naming, documentation, folder and external-id discovery are
//! shared and live here; the profile families share their whole pipeline
//! in `profile`.

mod archimate;
mod bpmn;
pub(crate) mod profile;
mod uml;

pub use archimate::parse_archimate_elements;
pub use bpmn::parse_bpmn_elements;
pub use uml::parse_uml_elements;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::classify::Family;
use super::context::{ImportContext, ImportSession};
use super::extract::{self, first_match_or};
use crate::ir::{ExternalId, IrElement};
use crate::report::ImportReport;
use crate::xml::{Node, nav};

/// External id kinds.
pub mod id_kinds {
    pub const XMI_ID: &str = "xmi-id";
    pub const XMI_BASE_ID: &str = "xmi-base-id";
    pub const EA_GUID: &str = "ea-guid";
}

/// Elements produced by one family.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ElementParseResult {
    pub elements: Vec<IrElement>,
}

// ============================================================================
// IDENTITY
// ============================================================================

/// Resolved identity of an element-bearing node.
pub(crate) struct Identity<'a> {
    pub id: String,
    pub own_id: Option<&'a str>,
    pub base_id: Option<&'a str>,
    pub base: Option<Node<'a>>,
}

/// Pick the element id: base reference, own id, then a synthetic id.
pub(crate) fn resolve_identity<'a>(
    ctx: &ImportContext<'a>,
    session: &mut ImportSession,
    report: &mut ImportReport,
    node: Node<'a>,
    family: Family,
    base_id: Option<&'a str>,
    what: &str,
) -> Identity<'a> {
    let own_id = nav::xmi_id(node);
    let base = ctx.resolve(base_id);

    let id = match base_id.or(own_id) {
        Some(id) => id.to_string(),
        None => {
            let (id, _) = session.synthetic.for_node(node.id(), family.prefix());
            let named = nav::attr_value(node, "name")
                .map(|n| format!(" (name: {n})"))
                .unwrap_or_default();
            report.warn(format!(
                "{} element {what} has no identifier; assigned synthetic id {id}{named}",
                family.label()
            ));
            id
        }
    };

    Identity {
        id,
        own_id,
        base_id,
        base,
    }
}

// ============================================================================
// SHARED FACTS
// ============================================================================

/// Nearest ancestor `uml:Package` id.
pub(crate) fn folder_of(node: Node<'_>) -> Option<String> {
    node.ancestors()
        .find(|a| nav::is_metaclass(*a, "Package"))
        .and_then(nav::xmi_id)
        .map(str::to_string)
}

/// Name, documentation and folder with stereotype-base fallback.
pub(crate) struct Descriptors {
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub folder_id: Option<String>,
}

pub(crate) fn describe<'a>(ctx: &ImportContext<'a>, node: Node<'a>, base: Option<Node<'a>>) -> Descriptors {
    Descriptors {
        name: first_match_or(extract::NAME, ctx, node, base),
        documentation: first_match_or(extract::DOCUMENTATION, ctx, node, base),
        folder_id: folder_of(node).or_else(|| base.and_then(folder_of)),
    }
}

/// EA GUID of a record: an explicit `ea_guid`, else derived from an
/// `EAID_xxxxxxxx_xxxx_…` id.
pub fn ea_guid(node: Option<Node<'_>>, id: Option<&str>) -> Option<String> {
    if let Some(guid) = node.and_then(|n| nav::attr_value(n, "ea_guid")) {
        return Some(guid.to_string());
    }
    let body = id?.strip_prefix("EAID_")?;
    let groups: Vec<&str> = body.split('_').collect();
    let shaped = groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()));
    shaped.then(|| format!("{{{}}}", groups.join("-")))
}

/// `xmi-id`, `xmi-base-id` and `ea-guid` external ids.
pub(crate) fn collect_external_ids(ctx: &ImportContext<'_>, element: &mut IrElement, identity: &Identity<'_>) {
    let system = ctx.options.external_id_system.as_str();
    if let Some(own) = identity.own_id {
        element.add_external_id(ExternalId::new(system, own, id_kinds::XMI_ID));
    }
    if let Some(base) = identity.base_id {
        element.add_external_id(ExternalId::new(system, base, id_kinds::XMI_BASE_ID));
    }
    let guid_source = identity.base.or_else(|| identity.own_id.and_then(|id| ctx.resolve(Some(id))));
    let guid = ea_guid(guid_source, identity.base_id.or(identity.own_id)).or_else(|| {
        let id = identity.base_id.or(identity.own_id)?;
        ea_guid(ctx.ea_record(id), None)
    });
    if let Some(guid) = guid {
        element.add_external_id(ExternalId::new(system, guid, id_kinds::EA_GUID));
    }
}

// ============================================================================
// SINK
// ============================================================================

/// Collects one family's elements, dropping repeated ids.
pub(crate) struct ElementSink {
    seen: FxHashSet<String>,
    elements: Vec<IrElement>,
}

impl ElementSink {
    pub fn new() -> Self {
        Self {
            seen: FxHashSet::default(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: IrElement, report: &mut ImportReport) {
        if !self.seen.insert(element.id.clone()) {
            report.warn(format!(
                "Duplicate element id {} ({} '{}') ignored; first occurrence kept",
                element.id, element.element_type, element.name
            ));
            return;
        }
        self.elements.push(element);
    }

    pub fn finish(self, family: Family) -> ElementParseResult {
        tracing::debug!(family = family.label(), count = self.elements.len(), "parsed elements");
        ElementParseResult {
            elements: self.elements,
        }
    }
}
