//! Shared pipeline for profile tag families (ArchiMate, BPMN).

use serde_json::json;

use super::{ElementParseResult, ElementSink, collect_external_ids, describe, resolve_identity};
use crate::import::classify::{Family, NodeClass, ProfileTag, base_ref};
use crate::import::context::{ImportContext, ImportSession};
use crate::import::extract::{self, first_match_or};
use crate::import::type_map::ProfileType;
use crate::ir::{IrElement, TaggedValue, UNKNOWN_TYPE};
use crate::report::ImportReport;
use crate::xml::{Node, nav};

/// Family-specific adjustment applied after the shared fields are filled.
pub(crate) type Refine = fn(Node<'_>, &ProfileTag<'_>, &mut IrElement);

/// Tag attributes that are consumed elsewhere, not kept as tagged values.
const CONSUMED_ATTRIBUTES: &[&str] = &["name", "documentation", "stereotype", "id", "idref"];

const RESERVED_PREFIXES: &[&str] = &["xmi", "xsi", "xmlns"];

pub(crate) fn parse_profile_elements(
    ctx: &ImportContext<'_>,
    session: &mut ImportSession,
    report: &mut ImportReport,
    family: Family,
    refine: Option<Refine>,
) -> ElementParseResult {
    let mut sink = ElementSink::new();

    for (node, class) in ctx.classified() {
        let NodeClass::Profile(tag) = class else {
            continue;
        };
        if tag.family != family || tag.is_relationship {
            continue;
        }

        let base = base_ref(node);
        let identity = resolve_identity(ctx, session, report, node, family, base.map(|(_, id)| id), tag.local);
        if let (Some(base_id), None) = (identity.base_id, identity.base) {
            report.warn(format!(
                "{} stereotype application {} references missing base element {base_id}; using a generic label",
                family.label(),
                tag.tag
            ));
        }

        let described = describe(ctx, node, identity.base);
        let element_type = match &tag.mapped {
            ProfileType::Element(t) => t.clone(),
            _ => UNKNOWN_TYPE.to_string(),
        };
        let mut element = IrElement::new(
            identity.id.clone(),
            element_type,
            described.name.unwrap_or_else(|| generic_label(family, tag.local)),
        );
        element.documentation = described.documentation;
        element.folder_id = described.folder_id;
        collect_external_ids(ctx, &mut element, &identity);

        element.tagged_values = profile_tagged_values(ctx, node, identity.base, tag);

        element.meta.insert("sourceFamily".into(), json!(family.prefix()));
        element.meta.insert("profileTag".into(), json!(tag.tag));
        if element.is_unknown() {
            element.meta.insert("unknownType".into(), json!(tag.local));
        }
        if let Some((metaclass, _)) = base {
            element.meta.insert("baseMetaclass".into(), json!(metaclass));
        }
        if let Some(xmi_type) = identity.base.and_then(nav::xmi_type) {
            element.meta.insert("baseXmiType".into(), json!(xmi_type));
        }

        if let Some(refine) = refine {
            refine(node, tag, &mut element);
        }

        sink.push(element, report);
    }

    sink.finish(family)
}

/// `profileTag`, `stereotype`, then the tag's remaining attributes in
/// source order.
pub(crate) fn profile_tagged_values<'a>(
    ctx: &ImportContext<'a>,
    node: Node<'a>,
    base: Option<Node<'a>>,
    tag: &ProfileTag<'_>,
) -> Vec<TaggedValue> {
    let mut values = vec![TaggedValue::new("profileTag", tag.tag)];
    if let Some(stereotype) = first_match_or(extract::STEREOTYPE, ctx, node, base) {
        values.push(TaggedValue::new("stereotype", stereotype));
    }

    for attribute in node.attributes() {
        let local = attribute.local_name();
        let reserved = attribute
            .prefix()
            .is_some_and(|p| RESERVED_PREFIXES.iter().any(|r| p.eq_ignore_ascii_case(r)))
            || attribute.name.eq_ignore_ascii_case("xmlns");
        let consumed = CONSUMED_ATTRIBUTES.iter().any(|c| local.eq_ignore_ascii_case(c))
            || local.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("base_"));
        if reserved || consumed || attribute.value.trim().is_empty() {
            continue;
        }
        values.push(TaggedValue::new(local, attribute.value.as_str()));
    }
    values
}

/// Display label for an unnamed tag: the local name without the family
/// prefix (`ArchiMate_BusinessActor` → `BusinessActor`).
pub(crate) fn generic_label(family: Family, local: &str) -> String {
    let prefix = family.prefix();
    if local.to_ascii_lowercase().starts_with(prefix) {
        let rest = local[prefix.len()..]
            .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | '_' | '-' | ':'));
        if !rest.is_empty() {
            return rest.to_string();
        }
    }
    local.to_string()
}
