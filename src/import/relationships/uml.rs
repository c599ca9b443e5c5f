use serde_json::json;

use super::emit::{Draft, RelationshipSink};
use super::{
    EndpointRule, RelationshipParseResult, addition, client, contract, ea_connector_source, ea_connector_target,
    edge_source, edge_target, extended_case, extension, general, implementing_classifier, including_case,
    information_source, information_target, specific, supplier,
};
use crate::import::classify::{Family, NodeClass, UmlRelationKind};
use crate::import::context::{ImportContext, ImportSession};
use crate::import::elements::{ea_guid, id_kinds};
use crate::import::extract::{self, Extractor, first_match, id_refs};
use crate::import::members::parse_multiplicity;
use crate::import::type_map::uml_relationship_type;
use crate::ir::{ExternalId, TaggedValue, UNKNOWN_TYPE};
use crate::report::ImportReport;
use crate::xml::{Node, nav};

type Chain = &'static [Extractor<Vec<String>>];

const GENERALIZATION_SOURCE: Chain = &[specific];
const GENERALIZATION_TARGET: Chain = &[general];
const INCLUDE_SOURCE: Chain = &[including_case, client];
const INCLUDE_TARGET: Chain = &[addition, supplier];
const EXTEND_SOURCE: Chain = &[extension, client];
const EXTEND_TARGET: Chain = &[extended_case, supplier];
const DEPENDENCY_SOURCE: Chain = &[client, implementing_classifier, ea_connector_source];
const DEPENDENCY_TARGET: Chain = &[supplier, contract, ea_connector_target];
const EDGE_SOURCE: Chain = &[edge_source, client, ea_connector_source];
const EDGE_TARGET: Chain = &[edge_target, supplier, ea_connector_target];
const FLOW_SOURCE: Chain = &[information_source, edge_source, client, ea_connector_source];
const FLOW_TARGET: Chain = &[information_target, edge_target, supplier, ea_connector_target];
const TRANSITION_SOURCE: Chain = &[edge_source];
const TRANSITION_TARGET: Chain = &[edge_target];

/// Source and target rules per relationship kind. Associations resolve
/// through their member ends instead.
fn endpoint_rules(kind: UmlRelationKind) -> Option<(EndpointRule, EndpointRule)> {
    use UmlRelationKind::*;
    let rules = match kind {
        Generalization => (EndpointRule::or_owner(GENERALIZATION_SOURCE), EndpointRule::new(GENERALIZATION_TARGET)),
        Include => (EndpointRule::or_owner(INCLUDE_SOURCE), EndpointRule::new(INCLUDE_TARGET)),
        Extend => (EndpointRule::or_owner(EXTEND_SOURCE), EndpointRule::new(EXTEND_TARGET)),
        DependencyLike => (EndpointRule::or_owner(DEPENDENCY_SOURCE), EndpointRule::new(DEPENDENCY_TARGET)),
        ActivityEdge => (EndpointRule::new(EDGE_SOURCE), EndpointRule::new(EDGE_TARGET)),
        InformationFlow => (EndpointRule::new(FLOW_SOURCE), EndpointRule::new(FLOW_TARGET)),
        Transition => (EndpointRule::new(TRANSITION_SOURCE), EndpointRule::new(TRANSITION_TARGET)),
        Association => return None,
    };
    Some(rules)
}

/// Parse UML relationship records, plus the association half of every
/// `AssociationClass`.
pub fn parse_uml_relationships(
    ctx: &ImportContext<'_>,
    session: &mut ImportSession,
    report: &mut ImportReport,
) -> RelationshipParseResult {
    let mut sink = RelationshipSink::new(Family::Uml);

    for (node, class) in ctx.classified() {
        let draft = match *class {
            NodeClass::UmlRelationship { metaclass, kind } => {
                if nav::xmi_id(node).is_some_and(|id| ctx.is_stereotype_base(id)) {
                    tracing::trace!(metaclass, "skipping stereotype base; owned by its profile");
                    continue;
                }
                relationship_draft(ctx, session, node, metaclass, kind)
            }
            NodeClass::UmlElement { metaclass, .. } if metaclass.eq_ignore_ascii_case("AssociationClass") => {
                association_class_draft(ctx, session, node)
            }
            _ => continue,
        };
        sink.emit(ctx, session, report, draft);
    }

    sink.finish()
}

fn relationship_draft(
    ctx: &ImportContext<'_>,
    session: &ImportSession,
    node: Node<'_>,
    metaclass: &str,
    kind: UmlRelationKind,
) -> Draft {
    let stereotype = first_match(extract::STEREOTYPE, ctx, node);
    let rel_type = uml_relationship_type(metaclass, stereotype.as_deref()).unwrap_or(UNKNOWN_TYPE);

    let (sources, targets) = kind_endpoints(ctx, session, node, kind);

    let mut draft = base_draft(ctx, node, metaclass, rel_type);
    draft.sources = sources;
    draft.targets = targets;
    if let Some(stereotype) = stereotype {
        draft.tagged_values.push(TaggedValue::new("stereotype", stereotype));
    }
    if kind == UmlRelationKind::ActivityEdge || kind == UmlRelationKind::Transition {
        if let Some(guard) = first_match(extract::GUARD, ctx, node) {
            draft.attrs.insert("guard".into(), json!(guard));
        }
    }
    if kind == UmlRelationKind::Association {
        add_end_multiplicities(ctx, node, &mut draft);
    }
    draft
}

fn association_class_draft(ctx: &ImportContext<'_>, session: &ImportSession, node: Node<'_>) -> Draft {
    let (sources, targets) = association_ends(ctx, node);
    let element_id = nav::xmi_id(node)
        .map(str::to_string)
        .or_else(|| session.synthetic.get(node.id()).map(str::to_string));

    let mut draft = base_draft(ctx, node, "AssociationClass", "uml.association");
    draft.base_id = element_id.as_ref().map(|id| format!("{id}__association"));
    draft.external_ids.clear();
    draft.sources = sources;
    draft.targets = targets;
    if let Some(id) = element_id {
        draft.meta.insert("associationClassId".into(), json!(id));
    }
    add_end_multiplicities(ctx, node, &mut draft);
    draft
}

/// Fields every UML relationship carries.
fn base_draft(ctx: &ImportContext<'_>, node: Node<'_>, metaclass: &str, rel_type: &str) -> Draft {
    let own_id = nav::xmi_id(node);
    let system = ctx.options.external_id_system.as_str();

    let mut draft = Draft {
        rel_type: rel_type.to_string(),
        base_id: own_id.map(str::to_string),
        name: first_match(extract::NAME, ctx, node),
        documentation: first_match(extract::DOCUMENTATION, ctx, node),
        construct: metaclass.to_string(),
        ..Draft::default()
    };
    if let Some(id) = own_id {
        draft.external_ids.push(ExternalId::new(system, id, id_kinds::XMI_ID));
        if let Some(guid) = ea_guid(Some(node), Some(id)).or_else(|| ea_guid(ctx.ea_record(id), None)) {
            draft.external_ids.push(ExternalId::new(system, guid, id_kinds::EA_GUID));
        }
    }
    draft.meta.insert("sourceFamily".into(), json!(Family::Uml.prefix()));
    draft.meta.insert("metaclass".into(), json!(metaclass));
    if let Some(xmi_type) = nav::xmi_type(node) {
        draft.meta.insert("xmiType".into(), json!(xmi_type));
    }
    draft
}

fn kind_endpoints(
    ctx: &ImportContext<'_>,
    session: &ImportSession,
    node: Node<'_>,
    kind: UmlRelationKind,
) -> (Vec<String>, Vec<String>) {
    match endpoint_rules(kind) {
        Some((source_rule, target_rule)) => (
            endpoints(ctx, session, node, &source_rule),
            endpoints(ctx, session, node, &target_rule),
        ),
        None => association_ends(ctx, node),
    }
}

/// Endpoints of a UML relationship record read with the rules of its own
/// metaclass. `None` when `node` is not a UML relationship.
pub(crate) fn uml_endpoints(
    ctx: &ImportContext<'_>,
    session: &ImportSession,
    node: Node<'_>,
) -> Option<(Vec<String>, Vec<String>)> {
    match *ctx.class(node) {
        NodeClass::UmlRelationship { kind, .. } => Some(kind_endpoints(ctx, session, node, kind)),
        _ => None,
    }
}

/// Run an endpoint rule, falling back to the owning classifier.
fn endpoints(ctx: &ImportContext<'_>, session: &ImportSession, node: Node<'_>, rule: &EndpointRule) -> Vec<String> {
    if let Some(found) = extract::first_match(rule.chain, ctx, node) {
        return found;
    }
    if !rule.owner_fallback {
        return Vec::new();
    }
    node.parent()
        .filter(|owner| matches!(ctx.class(*owner), NodeClass::UmlElement { .. }))
        .and_then(|owner| {
            nav::xmi_id(owner)
                .map(str::to_string)
                .or_else(|| session.synthetic.get(owner.id()).map(str::to_string))
        })
        .into_iter()
        .collect()
}

// ============================================================================
// ASSOCIATIONS
// ============================================================================

/// End property nodes: `memberEnd` references, completed by `ownedEnd`.
fn end_nodes<'a>(ctx: &ImportContext<'a>, node: Node<'a>) -> Vec<Node<'a>> {
    let mut ends: Vec<Node<'a>> = id_refs(node, "memberEnd")
        .iter()
        .filter_map(|id| ctx.resolve(Some(id)))
        .collect();
    if ends.len() < 2 {
        for owned in nav::children_named(node, "ownedEnd") {
            if !ends.contains(&owned) {
                ends.push(owned);
            }
        }
    }
    ends
}

fn end_type(end: Node<'_>) -> Option<String> {
    nav::attr_value(end, "type")
        .or_else(|| nav::child(end, "type").and_then(nav::xmi_idref))
        .map(str::to_string)
}

/// EA names association ends `EAID_src…` / `EAID_dst…`.
fn is_source_end(end: Node<'_>) -> bool {
    nav::xmi_id(end).is_some_and(|id| id.to_ascii_lowercase().starts_with("eaid_src"))
}

/// Association endpoints from its member ends. EA's `src`/`dst` end ids
/// decide direction; otherwise member end order does. The EA connector
/// record is the last resort.
fn association_ends(ctx: &ImportContext<'_>, node: Node<'_>) -> (Vec<String>, Vec<String>) {
    let ends = end_nodes(ctx, node);
    let (source_end, target_end) = match ends.iter().position(|e| is_source_end(*e)) {
        Some(src) if ends.len() == 2 => (Some(ends[src]), Some(ends[1 - src])),
        _ => (ends.first().copied(), ends.get(1).copied()),
    };

    let source = source_end
        .and_then(end_type)
        .map(|s| vec![s])
        .or_else(|| ea_connector_source(ctx, node))
        .unwrap_or_default();
    let target = target_end
        .and_then(end_type)
        .map(|t| vec![t])
        .or_else(|| ea_connector_target(ctx, node))
        .unwrap_or_default();
    (source, target)
}

fn add_end_multiplicities(ctx: &ImportContext<'_>, node: Node<'_>, draft: &mut Draft) {
    let ends = end_nodes(ctx, node);
    let (source_end, target_end) = match ends.iter().position(|e| is_source_end(*e)) {
        Some(src) if ends.len() == 2 => (Some(ends[src]), Some(ends[1 - src])),
        _ => (ends.first().copied(), ends.get(1).copied()),
    };
    for (key, end) in [("sourceMultiplicity", source_end), ("targetMultiplicity", target_end)] {
        if let Some(multiplicity) = end.and_then(parse_multiplicity) {
            draft.attrs.insert(key.into(), json!(multiplicity));
        }
    }
}
