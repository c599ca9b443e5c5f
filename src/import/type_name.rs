//! Classifier/datatype reference resolution.
//!
//! An attribute, parameter or association end declares its type in one of
//! several ways: a `type` attribute holding an id, a `<type>` child with an
//! `xmi:idref` or an `href` into a primitive library, an EA pseudo id such
//! as `EAJava_int`, or only an EA `<properties type="…">` hint. The
//! resolver turns whichever is present into a display name, refusing to
//! mistake metaclass tokens (`uml:Property`) for datatypes.

use rustc_hash::FxHashMap;

use super::context::ImportContext;
use super::id_index::resolve_href_id;
use crate::xml::{Node, local_part, nav};

/// UML metaclass names that leak into type slots of some exports.
const METACLASS_DENY_LIST: &[&str] = &[
    "Property",
    "Parameter",
    "Operation",
    "Class",
    "Classifier",
    "Element",
    "NamedElement",
    "TypedElement",
    "Type",
    "Association",
];

/// Markers of well-known primitive type libraries in `href` values.
const PRIMITIVE_LIBRARY_MARKERS: &[&str] = &["primitivetypes", "xmlschema", "javaprimitivetypes", "ecore"];

/// Prefixes of EA's internal identifier schemes.
const INTERNAL_ID_PREFIXES: &[&str] = &["EAID_", "EAPK_", "EAGUID", "MX_EAID_", "DCE_"];

/// A resolved type reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeRef {
    /// The raw reference as found in the source.
    pub reference: Option<String>,
    /// Display name, when one could be determined.
    pub name: Option<String>,
}

/// Resolves type references to names, caching by raw reference.
///
/// One resolver lives in each [`ImportSession`](super::context::ImportSession).
#[derive(Debug, Default)]
pub struct TypeNameResolver {
    cache: FxHashMap<String, Option<String>>,
}

impl TypeNameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached raw references.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Resolve the declared type of `node`, whose own metaclass is
    /// `owner_metaclass` (`Property`, `Parameter`, …).
    pub fn resolve(&mut self, ctx: &ImportContext<'_>, node: Node<'_>, owner_metaclass: &str) -> TypeRef {
        let raw = raw_type_ref(node, owner_metaclass);

        if let Some(raw) = raw {
            let name = match self.cache.get(raw) {
                Some(hit) => hit.clone(),
                None => {
                    let resolved = resolve_raw(ctx, raw);
                    self.cache.insert(raw.to_string(), resolved.clone());
                    resolved
                }
            };
            if name.is_some() {
                return TypeRef {
                    reference: Some(raw.to_string()),
                    name,
                };
            }
            if let Some(hint) = properties_hint(ctx, node, owner_metaclass) {
                return TypeRef {
                    reference: Some(raw.to_string()),
                    name: Some(hint),
                };
            }
            return TypeRef {
                reference: Some(raw.to_string()),
                name: None,
            };
        }

        TypeRef {
            reference: None,
            name: properties_hint(ctx, node, owner_metaclass),
        }
    }
}

/// Step (a): the first acceptable raw reference among the `type`
/// attribute and the `<type>` child's `xmi:idref` or `href`.
fn raw_type_ref<'d>(node: Node<'d>, owner_metaclass: &str) -> Option<&'d str> {
    let child = nav::child(node, "type");
    [
        nav::attr_value(node, "type"),
        child.and_then(nav::xmi_idref),
        child.and_then(|c| nav::attr_value(c, "href")),
    ]
    .into_iter()
    .flatten()
    .find(|raw| !is_rejected_token(raw, owner_metaclass))
}

/// Tokens that name a metaclass rather than a type.
fn is_rejected_token(token: &str, owner_metaclass: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    if lower.starts_with("uml:") || lower.starts_with("xmi:") {
        return true;
    }
    let owner = local_part(owner_metaclass);
    !owner.is_empty() && (token.eq_ignore_ascii_case(owner) || token.eq_ignore_ascii_case(owner_metaclass))
}

fn is_denied_metaclass(name: &str) -> bool {
    METACLASS_DENY_LIST.iter().any(|m| m.eq_ignore_ascii_case(name))
}

/// Steps (b), (c) and (e) for a raw reference; these depend only on the
/// reference and are cached.
fn resolve_raw(ctx: &ImportContext<'_>, raw: &str) -> Option<String> {
    if let Some(primitive) = primitive_name(raw) {
        return (!is_denied_metaclass(primitive)).then(|| primitive.to_string());
    }

    let id = resolve_href_id(raw).unwrap_or(raw);
    if let Some(name) = ctx.names.get(id) {
        return Some(name.to_string());
    }

    is_human_readable(raw, ctx.options.type_name_max_len).then(|| raw.to_string())
}

/// Step (b): primitive name from a library `href` or an EA pseudo id.
fn primitive_name(raw: &str) -> Option<&str> {
    let lower = raw.to_ascii_lowercase();
    if PRIMITIVE_LIBRARY_MARKERS.iter().any(|m| lower.contains(m)) {
        let segment = raw.rsplit(['#', '/']).next()?;
        return nav::non_empty(Some(segment));
    }

    // EAJava_int, EAnone_String, EAC++_char
    let rest = raw.strip_prefix("EA")?;
    if INTERNAL_ID_PREFIXES.iter().any(|p| raw.starts_with(p)) {
        return None;
    }
    let (language, name) = rest.split_once('_')?;
    if language.is_empty() || !language.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    nav::non_empty(Some(name))
}

/// Step (d): EA `<properties>`/`<type>` hints on the node itself.
fn properties_hint(ctx: &ImportContext<'_>, node: Node<'_>, owner_metaclass: &str) -> Option<String> {
    let holders = node.descendants().filter(|d| {
        d.local_name().eq_ignore_ascii_case("properties") || d.local_name().eq_ignore_ascii_case("type")
    });
    for holder in holders {
        let Some(token) = nav::attr_any(holder, &["type", "datatype", "classifier"]) else {
            continue;
        };
        if is_rejected_token(token, owner_metaclass) || is_denied_metaclass(token) {
            continue;
        }
        if let Some(name) = ctx.names.get(token) {
            return Some(name.to_string());
        }
        if let Some(primitive) = primitive_name(token) {
            return Some(primitive.to_string());
        }
        if is_human_readable(token, ctx.options.type_name_max_len) {
            return Some(token.to_string());
        }
    }
    None
}

/// Step (e): whether a raw token can stand for itself as a type name.
fn is_human_readable(token: &str, max_len: usize) -> bool {
    !token.is_empty()
        && token.chars().count() <= max_len
        && !looks_like_internal_id(token)
        && !has_scheme(token)
        && !is_denied_metaclass(token)
}

fn looks_like_internal_id(token: &str) -> bool {
    if INTERNAL_ID_PREFIXES.iter().any(|p| token.starts_with(p)) {
        return true;
    }
    if token.starts_with('{') && token.ends_with('}') {
        return true;
    }
    // Generated ids such as `_18_0_2_b4c02e1_1435176831233_484911_4434`.
    if token.starts_with('_') && token.chars().filter(|c| c.is_ascii_digit()).count() >= 6 {
        return true;
    }
    is_uuid_shaped(token)
}

fn is_uuid_shaped(token: &str) -> bool {
    let groups: Vec<&str> = token.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()))
}

fn has_scheme(token: &str) -> bool {
    token.contains("://") || token.to_ascii_lowercase().starts_with("urn:") || token.contains('#')
}
