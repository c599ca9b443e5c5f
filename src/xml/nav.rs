//! Lookup helpers tolerant of namespace prefixes and ASCII case.
//!
//! EA exports are inconsistent about prefixes (`xmi:id` vs `id`,
//! `xmi:idref` vs `idref`) and about the case of extension record tags.
//! Everything in the import pipeline reads the document through these
//! helpers instead of comparing raw names.

use super::document::{Node, local_part};

/// Prefixes that carry XMI bookkeeping rather than model data.
const RESERVED_PREFIXES: &[&str] = &["xmi", "xsi", "xmlns"];

/// Attribute lookup.
///
/// Exact name first, then a case-insensitive match. An unprefixed `name`
/// also matches a prefixed attribute with the same local name unless that
/// prefix is an XMI bookkeeping prefix, so `attr(n, "type")` never returns
/// `xmi:type`.
pub fn attr<'d>(node: Node<'d>, name: &str) -> Option<&'d str> {
    if let Some(value) = node.attribute(name) {
        return Some(value);
    }
    let attrs = node.attributes();
    if let Some(a) = attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name)) {
        return Some(a.value.as_str());
    }

    match name.split_once(':') {
        Some((prefix, local)) => attrs
            .iter()
            .find(|a| {
                a.prefix().is_some_and(|p| p.eq_ignore_ascii_case(prefix))
                    && a.local_name().eq_ignore_ascii_case(local)
            })
            .map(|a| a.value.as_str()),
        None => attrs
            .iter()
            .find(|a| {
                a.prefix().is_some_and(|p| {
                    !RESERVED_PREFIXES.iter().any(|r| p.eq_ignore_ascii_case(r))
                }) && a.local_name().eq_ignore_ascii_case(name)
            })
            .map(|a| a.value.as_str()),
    }
}

/// Like [`attr`], but treats blank values as absent and trims the result.
pub fn attr_value<'d>(node: Node<'d>, name: &str) -> Option<&'d str> {
    non_empty(attr(node, name))
}

/// First non-blank value among several attribute names.
pub fn attr_any<'d>(node: Node<'d>, names: &[&str]) -> Option<&'d str> {
    names.iter().find_map(|n| attr_value(node, n))
}

/// Trim a value and drop it when empty.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The node's own identifier (`xmi:id`, falling back to `id`).
pub fn xmi_id(node: Node<'_>) -> Option<&str> {
    attr_any(node, &["xmi:id", "id"])
}

/// `xmi:idref` / `idref` reference carried by wrapper and extension records.
pub fn xmi_idref(node: Node<'_>) -> Option<&str> {
    attr_any(node, &["xmi:idref", "idref"])
}

/// Full `xmi:type` (or `xsi:type`) value, e.g. `uml:Class`.
pub fn xmi_type(node: Node<'_>) -> Option<&str> {
    attr_any(node, &["xmi:type", "xsi:type"])
}

/// Metaclass name without prefix, e.g. `Class` for `uml:Class`.
pub fn metaclass(node: Node<'_>) -> Option<&str> {
    xmi_type(node).map(local_part)
}

/// Returns true when the node's metaclass equals `name` (case-insensitive).
pub fn is_metaclass(node: Node<'_>, name: &str) -> bool {
    metaclass(node).is_some_and(|m| m.eq_ignore_ascii_case(name))
}

/// First direct child with the given local name.
pub fn child<'d>(node: Node<'d>, local: &str) -> Option<Node<'d>> {
    children_named(node, local).next()
}

/// Direct children with the given local name.
pub fn children_named<'d, 'n>(
    node: Node<'d>,
    local: &'n str,
) -> impl Iterator<Item = Node<'d>> {
    node.children()
        .filter(move |c| c.local_name().eq_ignore_ascii_case(local))
}

/// Descendants with the given local name, document order.
pub fn descendants_named<'d, 'n>(
    node: Node<'d>,
    local: &'n str,
) -> impl Iterator<Item = Node<'d>> {
    node.descendants()
        .filter(move |c| c.local_name().eq_ignore_ascii_case(local))
}

/// Vendor extension container (`<xmi:Extension>`).
pub fn is_extension(node: Node<'_>) -> bool {
    if !node.local_name().eq_ignore_ascii_case("Extension") {
        return false;
    }
    node.prefix().is_some_and(|p| p.eq_ignore_ascii_case("xmi"))
        || node
            .namespace_uri()
            .is_some_and(|ns| ns.to_ascii_lowercase().contains("xmi"))
}
