//! Node classification.
//!
//! Every node is classified exactly once per import into a closed
//! [`NodeClass`]. The element and relationship passes match on the class
//! instead of re-inspecting `xmi:type`, namespaces or tag names.

use indexmap::IndexMap;

use super::type_map::{self, ProfileType};
use crate::xml::{Node, XmlDocument, nav};

/// Construct family a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Uml,
    ArchiMate,
    Bpmn,
}

impl Family {
    /// Lowercase prefix used for qualified types and synthetic ids.
    pub fn prefix(self) -> &'static str {
        match self {
            Family::Uml => "uml",
            Family::ArchiMate => "archimate",
            Family::Bpmn => "bpmn",
        }
    }

    /// Human-readable family name used in warnings.
    pub fn label(self) -> &'static str {
        match self {
            Family::Uml => "UML",
            Family::ArchiMate => "ArchiMate",
            Family::Bpmn => "BPMN",
        }
    }

    /// Profile family of a node, judged by namespace URI, then prefix.
    fn of_profile_node(node: Node<'_>) -> Option<Family> {
        let by_token = |token: &str| {
            let token = token.to_ascii_lowercase();
            if token.contains("archimate") {
                Some(Family::ArchiMate)
            } else if token.contains("bpmn") {
                Some(Family::Bpmn)
            } else {
                None
            }
        };
        node.namespace_uri()
            .and_then(by_token)
            .or_else(|| node.prefix().and_then(by_token))
    }
}

/// How a UML relationship metaclass finds its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UmlRelationKind {
    Generalization,
    Include,
    Extend,
    /// `client` → `supplier` records (Dependency, Realization, Usage, …).
    DependencyLike,
    /// ControlFlow / ObjectFlow.
    ActivityEdge,
    InformationFlow,
    Association,
    Transition,
}

/// A profile tag application (`<ArchiMate3:ArchiMate_BusinessActor …/>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileTag<'d> {
    pub family: Family,
    /// Qualified tag as written.
    pub tag: &'d str,
    /// Tag local name.
    pub local: &'d str,
    pub mapped: ProfileType,
    pub is_relationship: bool,
}

impl ProfileTag<'_> {
    /// Mapped qualified type, if any.
    pub fn mapped_type(&self) -> Option<&str> {
        match &self.mapped {
            ProfileType::Element(t) | ProfileType::Relationship(t) => Some(t),
            ProfileType::Unmapped => None,
        }
    }
}

/// Classification of a single node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeClass<'d> {
    Other,
    /// Inside (or is) an `<xmi:Extension>` subtree.
    Extension,
    UmlElement {
        metaclass: &'d str,
        element_type: &'static str,
    },
    UmlRelationship {
        metaclass: &'d str,
        kind: UmlRelationKind,
    },
    Profile(ProfileTag<'d>),
}

impl<'d> NodeClass<'d> {
    pub fn profile(&self) -> Option<&ProfileTag<'d>> {
        match self {
            NodeClass::Profile(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn family(&self) -> Option<Family> {
        match self {
            NodeClass::UmlElement { .. } | NodeClass::UmlRelationship { .. } => Some(Family::Uml),
            NodeClass::Profile(tag) => Some(tag.family),
            NodeClass::Other | NodeClass::Extension => None,
        }
    }

    pub fn is_relationship(&self) -> bool {
        match self {
            NodeClass::UmlRelationship { .. } => true,
            NodeClass::Profile(tag) => tag.is_relationship,
            _ => false,
        }
    }
}

/// The `base_<Metaclass>` reference of a stereotype application as
/// `(metaclass, id)`.
pub fn base_ref<'d>(node: Node<'d>) -> Option<(&'d str, &'d str)> {
    node.attributes().iter().find_map(|a| {
        let local = a.local_name();
        let metaclass = local.get(..5).filter(|p| p.eq_ignore_ascii_case("base_")).map(|_| &local[5..])?;
        let id = nav::non_empty(Some(a.value.as_str()))?;
        Some((metaclass, id))
    })
}

/// Classify one node. `in_extension` is precomputed by the caller.
pub fn classify_node<'d>(
    node: Node<'d>,
    in_extension: bool,
    type_aliases: &IndexMap<String, String>,
) -> NodeClass<'d> {
    if in_extension {
        return NodeClass::Extension;
    }

    if let Some(xmi_type) = nav::xmi_type(node) {
        if let Some((prefix, metaclass)) = xmi_type.split_once(':') {
            if prefix.eq_ignore_ascii_case("uml") {
                if let Some((kind, _)) = type_map::uml_relationship_kind(metaclass) {
                    return NodeClass::UmlRelationship { metaclass, kind };
                }
                if let Some(element_type) = type_map::uml_element_type(metaclass) {
                    return NodeClass::UmlElement { metaclass, element_type };
                }
                return NodeClass::Other;
            }
        }
    }

    let Some(family) = Family::of_profile_node(node) else {
        return NodeClass::Other;
    };
    // Only top-level applications; children of a tag are tag data.
    if node.parent().is_some_and(|p| Family::of_profile_node(p).is_some()) {
        return NodeClass::Other;
    }

    let local = node.local_name();
    let mapped = type_map::map_profile_tag(family, local, type_aliases);
    let is_relationship = match &mapped {
        ProfileType::Relationship(_) => true,
        ProfileType::Element(_) => false,
        // Unmapped tags follow their base: any UML relationship metaclass.
        ProfileType::Unmapped => {
            base_ref(node).is_some_and(|(metaclass, _)| type_map::uml_relationship_kind(metaclass).is_some())
        }
    };

    NodeClass::Profile(ProfileTag {
        family,
        tag: node.tag_name(),
        local,
        mapped,
        is_relationship,
    })
}

/// Classify every node of the document, indexed by `NodeId::index()`.
pub fn classify_document<'d>(doc: &'d XmlDocument, type_aliases: &IndexMap<String, String>) -> Vec<NodeClass<'d>> {
    let mut in_extension: Vec<bool> = Vec::with_capacity(doc.len());
    let mut classes = Vec::with_capacity(doc.len());
    for node in doc.nodes() {
        // Parents precede children in arena order.
        let inside = nav::is_extension(node)
            || node.parent().is_some_and(|p| in_extension[p.id().index()]);
        in_extension.push(inside);
        classes.push(classify_node(node, inside, type_aliases));
    }
    classes
}
