//! Ordered extractor chains.
//!
//! Most facts in an EA export can live in several places: an attribute, a
//! child element, the EA extension record, or the stereotype's base
//! element. Each place is a small pure function, and a fact is read by
//! trying a fixed list of them in order until one answers.

use super::context::ImportContext;
use super::id_index::{parse_id_ref_list, resolve_href_id};
use crate::xml::{Node, nav};

/// One way of reading a fact off a node.
pub type Extractor<T> = for<'a, 'b, 'c> fn(&'a ImportContext<'b>, Node<'c>) -> Option<T>;

/// First answer of a chain.
pub fn first_match<'a, T>(chain: &[Extractor<T>], ctx: &ImportContext<'a>, node: Node<'a>) -> Option<T> {
    chain.iter().find_map(|extract| extract(ctx, node))
}

/// First answer of a chain on `node`, then on `fallback`.
pub fn first_match_or<'a, T>(
    chain: &[Extractor<T>],
    ctx: &ImportContext<'a>,
    node: Node<'a>,
    fallback: Option<Node<'a>>,
) -> Option<T> {
    first_match(chain, ctx, node).or_else(|| fallback.and_then(|f| first_match(chain, ctx, f)))
}

// ============================================================================
// TEXT FACTS
// ============================================================================

pub const NAME: &[Extractor<String>] = &[name_attribute, properties_name];

pub const DOCUMENTATION: &[Extractor<String>] = &[owned_comment_body, documentation_attribute, ea_record_documentation];

pub const STEREOTYPE: &[Extractor<String>] = &[stereotype_attribute, properties_stereotype, ea_record_stereotype];

pub const GUARD: &[Extractor<String>] = &[guard_specification, guard_attribute];

fn owned(value: Option<&str>) -> Option<String> {
    nav::non_empty(value).map(str::to_string)
}

fn name_attribute(_: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    owned(nav::attr(node, "name"))
}

fn properties_name(_: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    owned(nav::child(node, "properties").and_then(|p| nav::attr(p, "name")))
}

fn owned_comment_body(_: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    nav::children_named(node, "ownedComment").find_map(|comment| {
        owned(nav::attr(comment, "body"))
            .or_else(|| owned(nav::child(comment, "body").map(|b| b.text())))
            .or_else(|| owned(Some(comment.text())))
    })
}

fn documentation_attribute(_: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    owned(nav::attr(node, "documentation"))
}

fn ea_record<'a>(ctx: &ImportContext<'a>, node: Node<'_>) -> Option<Node<'a>> {
    nav::xmi_id(node).and_then(|id| ctx.ea_record(id))
}

fn ea_record_documentation(ctx: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    let record = ea_record(ctx, node)?;
    owned(nav::child(record, "properties").and_then(|p| nav::attr(p, "documentation")))
        .or_else(|| owned(nav::child(record, "documentation").and_then(|d| nav::attr(d, "value"))))
}

fn stereotype_attribute(_: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    owned(nav::attr(node, "stereotype"))
}

fn properties_stereotype(_: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    owned(nav::child(node, "properties").and_then(|p| nav::attr(p, "stereotype")))
}

fn ea_record_stereotype(ctx: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    let record = ea_record(ctx, node)?;
    owned(nav::child(record, "properties").and_then(|p| nav::attr(p, "stereotype")))
}

/// `<guard><specification body="…"/></guard>` or a nested `<body>` text.
fn guard_specification(_: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    let guard = nav::child(node, "guard")?;
    let spec = nav::child(guard, "specification").unwrap_or(guard);
    owned(nav::attr(spec, "body"))
        .or_else(|| owned(nav::attr(spec, "value")))
        .or_else(|| owned(nav::descendants_named(spec, "body").next().map(|b| b.text())))
}

fn guard_attribute(_: &ImportContext<'_>, node: Node<'_>) -> Option<String> {
    owned(nav::attr(node, "guard"))
}

// ============================================================================
// REFERENCES
// ============================================================================

/// Ids referenced under `name`: a (possibly multi-valued) attribute, else
/// child elements carrying `xmi:idref` or an `href`.
pub fn id_refs(node: Node<'_>, name: &str) -> Vec<String> {
    if let Some(value) = nav::attr_value(node, name) {
        return parse_id_ref_list(value).into_iter().map(str::to_string).collect();
    }
    nav::children_named(node, name)
        .filter_map(|c| {
            nav::xmi_idref(c).or_else(|| nav::attr_value(c, "href").and_then(resolve_href_id))
        })
        .map(str::to_string)
        .collect()
}

/// First non-empty [`id_refs`] among several names.
pub fn id_refs_any(node: Node<'_>, names: &[&str]) -> Option<Vec<String>> {
    names
        .iter()
        .map(|n| id_refs(node, n))
        .find(|refs| !refs.is_empty())
}
