use serde_json::{Value, json};

use super::{ElementSink, ElementParseResult, collect_external_ids, describe, resolve_identity};
use crate::import::classify::{Family, NodeClass};
use crate::import::context::{ImportContext, ImportSession};
use crate::import::extract::{self, first_match};
use crate::import::members::{bears_members, enumeration_literals, parse_classifier_members};
use crate::import::type_map::uml_action_kind;
use crate::ir::{IrElement, TaggedValue};
use crate::report::ImportReport;
use crate::xml::nav;

/// Parse every UML classifier, action and behavior node.
///
/// Nodes that a profile stereotype application claims as its base are
/// left to the profile family.
pub fn parse_uml_elements(
    ctx: &ImportContext<'_>,
    session: &mut ImportSession,
    report: &mut ImportReport,
) -> ElementParseResult {
    let mut sink = ElementSink::new();

    for (node, class) in ctx.classified() {
        let NodeClass::UmlElement { metaclass, element_type } = *class else {
            continue;
        };
        if nav::xmi_id(node).is_some_and(|id| ctx.is_stereotype_base(id)) {
            tracing::trace!(metaclass, "skipping stereotype base; owned by its profile");
            continue;
        }

        let identity = resolve_identity(ctx, session, report, node, Family::Uml, None, metaclass);
        let described = describe(ctx, node, None);
        let mut element = IrElement::new(
            identity.id.clone(),
            element_type,
            described.name.unwrap_or_else(|| metaclass.to_string()),
        );
        element.documentation = described.documentation;
        element.folder_id = described.folder_id;
        collect_external_ids(ctx, &mut element, &identity);

        if let Some(stereotype) = first_match(extract::STEREOTYPE, ctx, node) {
            element.tagged_values.push(TaggedValue::new("stereotype", stereotype));
        }

        element.meta.insert("sourceFamily".into(), json!(Family::Uml.prefix()));
        element.meta.insert("metaclass".into(), json!(metaclass));
        if let Some(xmi_type) = nav::xmi_type(node) {
            element.meta.insert("xmiType".into(), json!(xmi_type));
        }

        if let Some(kind) = uml_action_kind(metaclass) {
            element.attrs.insert("actionKind".into(), json!(kind));
        }
        if element_type == "uml.enumeration" {
            let literals = enumeration_literals(node);
            if !literals.is_empty() {
                element.attrs.insert("literals".into(), json!(literals));
            }
        }
        if ctx.options.parse_members && bears_members(element_type) {
            let members = parse_classifier_members(ctx, &mut session.types, node);
            if !members.is_empty() {
                let value = serde_json::to_value(&members).unwrap_or(Value::Null);
                element.meta.insert("umlMembers".into(), value);
            }
        }

        sink.push(element, report);
    }

    sink.finish(Family::Uml)
}
