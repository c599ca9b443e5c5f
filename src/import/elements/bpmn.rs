use serde_json::json;

use super::ElementParseResult;
use super::profile::parse_profile_elements;
use crate::import::classify::{Family, ProfileTag};
use crate::import::context::{ImportContext, ImportSession};
use crate::import::type_map::{normalize_type_key, profile_key};
use crate::ir::IrElement;
use crate::report::ImportReport;
use crate::xml::{Node, nav};

/// Parse BPMN profile tag applications into elements.
///
/// EA encodes several BPMN types as one tag plus a discriminating
/// attribute (`Activity` + `activityType`, `Gateway` + `gatewayType`);
/// those attributes refine the mapped type.
pub fn parse_bpmn_elements(
    ctx: &ImportContext<'_>,
    session: &mut ImportSession,
    report: &mut ImportReport,
) -> ElementParseResult {
    parse_profile_elements(ctx, session, report, Family::Bpmn, Some(refine_bpmn))
}

fn refine_bpmn(node: Node<'_>, tag: &ProfileTag<'_>, element: &mut IrElement) {
    let refined = match profile_key(Family::Bpmn, tag.local).as_str() {
        "activity" => refine_activity(node, element),
        "gateway" => nav::attr_value(node, "gatewayType").and_then(gateway_type),
        "intermediateevent" => {
            let throwing = nav::attr_any(node, &["catchOrThrow", "eventType"])
                .is_some_and(|v| v.to_ascii_lowercase().contains("throw"));
            throwing.then_some("bpmn.intermediateThrowEvent")
        }
        _ => None,
    };

    if let Some(refined) = refined {
        element.element_type = refined.to_string();
        element.meta.remove("unknownType");
    }

    if element.element_type.ends_with("Event") {
        if let Some(definition) = nav::attr_value(node, "eventDefinition")
            .filter(|d| !d.eq_ignore_ascii_case("none"))
        {
            element.attrs.insert("eventDefinition".into(), json!(definition));
        }
    }
}

fn refine_activity(node: Node<'_>, element: &mut IrElement) -> Option<&'static str> {
    if let Some(task_type) = nav::attr_value(node, "taskType").filter(|t| !t.eq_ignore_ascii_case("none")) {
        element.attrs.insert("taskType".into(), json!(task_type));
    }
    let kind = nav::attr_value(node, "activityType")?;
    match normalize_type_key(kind).as_str() {
        "task" => Some("bpmn.task"),
        "subprocess" => Some("bpmn.subProcess"),
        "eventsubprocess" | "transaction" | "adhocsubprocess" => {
            element.attrs.insert("subProcessKind".into(), json!(kind));
            Some("bpmn.subProcess")
        }
        "callactivity" => Some("bpmn.callActivity"),
        _ => None,
    }
}

fn gateway_type(kind: &str) -> Option<&'static str> {
    match normalize_type_key(kind).as_str() {
        "exclusive" | "exclusivedatabased" | "databasedexclusive" => Some("bpmn.gatewayExclusive"),
        "parallel" => Some("bpmn.gatewayParallel"),
        "inclusive" => Some("bpmn.gatewayInclusive"),
        "eventbased" | "exclusiveeventbased" | "paralleleventbased" => Some("bpmn.gatewayEventBased"),
        "complex" => Some("bpmn.gatewayComplex"),
        _ => None,
    }
}
