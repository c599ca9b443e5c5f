//! Classifier member parsing: attributes, operations, parameters and
//! enumeration literals.

use super::context::ImportContext;
use super::type_name::TypeNameResolver;
use crate::ir::{ClassifierMembers, Multiplicity, UmlAttribute, UmlOperation, UmlParameter};
use crate::xml::{Node, nav};

/// Element types whose members are parsed.
pub const MEMBER_BEARING_TYPES: &[&str] = &[
    "uml.class",
    "uml.associationClass",
    "uml.interface",
    "uml.dataType",
    "uml.primitiveType",
    "uml.enumeration",
    "uml.signal",
];

/// Wrapper tags some exports put around `ownedAttribute` lists.
const ATTRIBUTE_WRAPPERS: &[&str] = &["ownedAttributes", "attributes"];

pub fn bears_members(element_type: &str) -> bool {
    MEMBER_BEARING_TYPES.contains(&element_type)
}

/// Parse attributes and operations of a classifier node.
pub fn parse_classifier_members(
    ctx: &ImportContext<'_>,
    types: &mut TypeNameResolver,
    classifier: Node<'_>,
) -> ClassifierMembers {
    let attributes = owned_attribute_nodes(ctx, classifier)
        .into_iter()
        .filter_map(|node| parse_attribute(ctx, types, node))
        .collect();
    let operations = nav::children_named(classifier, "ownedOperation")
        .filter_map(|node| parse_operation(ctx, types, node))
        .collect();
    ClassifierMembers { attributes, operations }
}

/// `ownedAttribute` nodes, following wrappers and `xmi:idref` stand-ins.
fn owned_attribute_nodes<'a>(ctx: &ImportContext<'a>, classifier: Node<'a>) -> Vec<Node<'a>> {
    let direct = nav::children_named(classifier, "ownedAttribute");
    let wrapped = classifier
        .children()
        .filter(|c| ATTRIBUTE_WRAPPERS.iter().any(|w| c.local_name().eq_ignore_ascii_case(w)))
        .flat_map(|w| {
            w.children().filter(|c| {
                c.local_name().eq_ignore_ascii_case("ownedAttribute")
                    || c.local_name().eq_ignore_ascii_case("attribute")
            })
        });

    direct
        .chain(wrapped)
        .filter_map(|node| {
            if nav::xmi_type(node).is_none() && nav::attr_value(node, "name").is_none() {
                // Stand-in pointing at the real property.
                return nav::xmi_idref(node).and_then(|id| ctx.resolve(Some(id)));
            }
            Some(node)
        })
        .collect()
}

fn parse_attribute(ctx: &ImportContext<'_>, types: &mut TypeNameResolver, node: Node<'_>) -> Option<UmlAttribute> {
    let Some(name) = nav::attr_value(node, "name") else {
        tracing::trace!(node = ?node, "skipping unnamed attribute");
        return None;
    };
    let metaclass = nav::metaclass(node).unwrap_or("Property");
    let resolved = types.resolve(ctx, node, metaclass);

    Some(UmlAttribute {
        name: name.to_string(),
        metaclass: metaclass.to_string(),
        data_type_ref: resolved.reference,
        data_type_name: resolved.name,
        multiplicity: parse_multiplicity(node),
        visibility: nav::attr_value(node, "visibility").map(str::to_string),
        is_static: parse_flag(node, "isStatic"),
        default_value: default_value(node),
    })
}

fn parse_operation(ctx: &ImportContext<'_>, types: &mut TypeNameResolver, node: Node<'_>) -> Option<UmlOperation> {
    let name = nav::attr_value(node, "name")?;
    let mut return_type = None;
    let mut params = Vec::new();

    for param in nav::children_named(node, "ownedParameter") {
        let metaclass = nav::metaclass(param).unwrap_or("Parameter");
        let is_return = nav::attr_value(param, "direction").is_some_and(|d| d.eq_ignore_ascii_case("return"));
        let resolved = types.resolve(ctx, param, metaclass);
        if is_return {
            return_type = resolved.name.or(return_type);
            continue;
        }
        let Some(param_name) = nav::attr_value(param, "name") else {
            continue;
        };
        params.push(UmlParameter {
            name: param_name.to_string(),
            type_name: resolved.name,
        });
    }

    Some(UmlOperation {
        name: name.to_string(),
        return_type,
        visibility: nav::attr_value(node, "visibility").map(str::to_string),
        params,
        is_static: parse_flag(node, "isStatic"),
        is_abstract: parse_flag(node, "isAbstract"),
    })
}

/// Multiplicity from `lowerValue`/`upperValue` children; `-1` means `*`.
pub fn parse_multiplicity(node: Node<'_>) -> Option<Multiplicity> {
    let bound = |child: &str| {
        nav::child(node, child)
            .and_then(|c| nav::attr_value(c, "value"))
            .map(|v| if v == "-1" { "*".to_string() } else { v.to_string() })
    };
    let multiplicity = Multiplicity {
        lower: bound("lowerValue"),
        upper: bound("upperValue"),
    };
    (!multiplicity.is_empty()).then_some(multiplicity)
}

fn parse_flag(node: Node<'_>, name: &str) -> Option<bool> {
    match nav::attr_value(node, name)? {
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn default_value(node: Node<'_>) -> Option<String> {
    nav::child(node, "defaultValue")
        .and_then(|d| nav::attr_any(d, &["value", "body"]))
        .or_else(|| nav::attr_value(node, "default"))
        .map(str::to_string)
}

/// Names of an enumeration's `ownedLiteral` children.
pub fn enumeration_literals(node: Node<'_>) -> Vec<String> {
    nav::children_named(node, "ownedLiteral")
        .filter_map(|l| nav::attr_value(l, "name"))
        .map(str::to_string)
        .collect()
}
