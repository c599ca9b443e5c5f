//! Shared pipeline for profile relationship tags.
//!
//! EA writes a profile relationship as a tag application
//! (`<ArchiMate3:ArchiMate_Serving base_Dependency="…"/>`) over a plain UML
//! record that carries the endpoints. Endpoints are looked up on the tag
//! first, then on the base record, then on the base's EA connector.

use serde_json::json;

use super::emit::{Draft, RelationshipSink};
use super::uml::uml_endpoints;
use super::{RelationshipParseResult, ea_connector_source, ea_connector_target, generic_source, generic_target};
use crate::import::classify::{Family, NodeClass, ProfileTag, base_ref};
use crate::import::context::{ImportContext, ImportSession};
use crate::import::elements::profile::profile_tagged_values;
use crate::import::elements::{ea_guid, id_kinds};
use crate::import::extract::{self, Extractor, first_match, first_match_or};
use crate::import::type_map::ProfileType;
use crate::ir::{ExternalId, UNKNOWN_TYPE};
use crate::report::ImportReport;
use crate::xml::{Node, nav};

const SOURCE_CHAIN: &[Extractor<Vec<String>>] = &[generic_source];
const TARGET_CHAIN: &[Extractor<Vec<String>>] = &[generic_target];
const CONNECTOR_SOURCE: &[Extractor<Vec<String>>] = &[ea_connector_source];
const CONNECTOR_TARGET: &[Extractor<Vec<String>>] = &[ea_connector_target];

/// Family-specific adjustment of a draft, given the tag and its base.
pub(crate) type RefineDraft = for<'a> fn(&ImportContext<'a>, Node<'a>, Option<Node<'a>>, &mut Draft);

pub(crate) fn parse_profile_relationships(
    ctx: &ImportContext<'_>,
    session: &mut ImportSession,
    report: &mut ImportReport,
    family: Family,
    refine: Option<RefineDraft>,
) -> RelationshipParseResult {
    let mut sink = RelationshipSink::new(family);

    for (node, class) in ctx.classified() {
        let NodeClass::Profile(tag) = class else {
            continue;
        };
        if tag.family != family || !tag.is_relationship {
            continue;
        }
        let mut draft = profile_draft(ctx, session, node, tag);
        if let Some(refine) = refine {
            let base = base_ref(node).and_then(|(_, id)| ctx.resolve(Some(id)));
            refine(ctx, node, base, &mut draft);
        }
        sink.emit(ctx, session, report, draft);
    }

    sink.finish()
}

fn profile_draft<'a>(ctx: &ImportContext<'a>, session: &ImportSession, node: Node<'a>, tag: &ProfileTag<'_>) -> Draft {
    let base_link = base_ref(node);
    let base_id = base_link.map(|(_, id)| id);
    let base = ctx.resolve(base_id);
    let own_id = nav::xmi_id(node);
    let (base_sources, base_targets) = base.and_then(|b| uml_endpoints(ctx, session, b)).unzip();

    let rel_type = match &tag.mapped {
        ProfileType::Relationship(t) => t.clone(),
        _ => UNKNOWN_TYPE.to_string(),
    };

    let mut draft = Draft {
        rel_type,
        base_id: base_id.or(own_id).map(str::to_string),
        sources: endpoints(ctx, node, base, SOURCE_CHAIN, base_sources, CONNECTOR_SOURCE),
        targets: endpoints(ctx, node, base, TARGET_CHAIN, base_targets, CONNECTOR_TARGET),
        name: first_match_or(extract::NAME, ctx, node, base),
        documentation: first_match_or(extract::DOCUMENTATION, ctx, node, base),
        tagged_values: profile_tagged_values(ctx, node, base, tag),
        construct: tag.tag.to_string(),
        ..Draft::default()
    };

    let system = ctx.options.external_id_system.as_str();
    if let Some(id) = own_id {
        draft.external_ids.push(ExternalId::new(system, id, id_kinds::XMI_ID));
    }
    if let Some(id) = base_id {
        draft.external_ids.push(ExternalId::new(system, id, id_kinds::XMI_BASE_ID));
    }
    let guid_id = base_id.or(own_id);
    if let Some(guid) = ea_guid(base, guid_id).or_else(|| guid_id.and_then(|id| ea_guid(ctx.ea_record(id), None))) {
        draft.external_ids.push(ExternalId::new(system, guid, id_kinds::EA_GUID));
    }

    draft.meta.insert("sourceFamily".into(), json!(tag.family.prefix()));
    draft.meta.insert("profileTag".into(), json!(tag.tag));
    if draft.rel_type == UNKNOWN_TYPE {
        draft.meta.insert("unknownType".into(), json!(tag.local));
    }
    if let Some((metaclass, _)) = base_link {
        draft.meta.insert("baseMetaclass".into(), json!(metaclass));
    }
    if let Some(xmi_type) = base.and_then(nav::xmi_type) {
        draft.meta.insert("baseXmiType".into(), json!(xmi_type));
    }
    draft
}

/// Tag, then base record, then the base read as its own UML metaclass,
/// then the base's EA connector.
fn endpoints<'a>(
    ctx: &ImportContext<'a>,
    node: Node<'a>,
    base: Option<Node<'a>>,
    chain: &[Extractor<Vec<String>>],
    from_base_kind: Option<Vec<String>>,
    connector: &[Extractor<Vec<String>>],
) -> Vec<String> {
    first_match_or(chain, ctx, node, base)
        .or(from_base_kind.filter(|ids| !ids.is_empty()))
        .or_else(|| base.and_then(|b| first_match(connector, ctx, b)))
        .or_else(|| first_match(connector, ctx, node))
        .unwrap_or_default()
}
