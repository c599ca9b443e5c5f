use serde_json::json;

use super::RelationshipParseResult;
use super::emit::Draft;
use super::profile::parse_profile_relationships;
use crate::import::classify::Family;
use crate::import::context::{ImportContext, ImportSession};
use crate::import::extract::{self, first_match};
use crate::report::ImportReport;
use crate::xml::{Node, nav};

/// Parse BPMN flow and association tags.
///
/// Sequence flow conditions are kept as `attrs.condition`, read from the
/// tag's `conditionExpression` or the base edge's guard.
pub fn parse_bpmn_relationships(
    ctx: &ImportContext<'_>,
    session: &mut ImportSession,
    report: &mut ImportReport,
) -> RelationshipParseResult {
    parse_profile_relationships(ctx, session, report, Family::Bpmn, Some(refine_bpmn))
}

fn refine_bpmn<'a>(ctx: &ImportContext<'a>, node: Node<'a>, base: Option<Node<'a>>, draft: &mut Draft) {
    if draft.rel_type != "bpmn.sequenceFlow" {
        return;
    }
    let condition = nav::attr_any(node, &["conditionExpression", "condition"])
        .map(str::to_string)
        .or_else(|| base.and_then(|b| first_match(extract::GUARD, ctx, b)));
    if let Some(condition) = condition {
        draft.attrs.insert("condition".into(), json!(condition));
    }
}
