//! Association-class linkage.
//!
//! An `AssociationClass` is imported twice: as an element and as an
//! association relationship with id `<elementId>__association`. This pass
//! points each side at the other.

use rustc_hash::FxHashMap;
use serde_json::json;

use crate::ir::{IrElement, IrRelationship};
use crate::report::{ImportReport, codes};

pub const ASSOCIATION_SUFFIX: &str = "__association";
pub const ELEMENT_LINK_ATTR: &str = "associationRelationshipId";
pub const RELATIONSHIP_LINK_ATTR: &str = "associationClassElementId";

/// Link association-class elements and their association relationships.
///
/// Returns the number of new links. Already linked pairs are left alone,
/// so running the pass twice reports nothing the second time.
pub fn link_association_classes(
    elements: &mut [IrElement],
    relationships: &mut [IrRelationship],
    report: &mut ImportReport,
) -> usize {
    let by_id: FxHashMap<String, usize> = relationships
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id.clone(), i))
        .collect();

    let mut linked = 0;
    for element in elements.iter_mut().filter(|e| e.element_type == "uml.associationClass") {
        let relationship_id = format!("{}{ASSOCIATION_SUFFIX}", element.id);
        let Some(&index) = by_id.get(&relationship_id) else {
            continue;
        };
        let relationship = &mut relationships[index];

        let element_linked = element.attr_str(ELEMENT_LINK_ATTR) == Some(relationship_id.as_str());
        let relationship_linked = relationship.attr_str(RELATIONSHIP_LINK_ATTR) == Some(element.id.as_str());
        if element_linked && relationship_linked {
            continue;
        }

        element.attrs.insert(ELEMENT_LINK_ATTR.into(), json!(relationship_id));
        relationship.attrs.insert(RELATIONSHIP_LINK_ATTR.into(), json!(element.id));
        report.info(
            codes::ASSOCIATION_CLASS_LINKED,
            format!("Linked association class {} to association {relationship_id}", element.id),
            [
                ("elementId", json!(element.id)),
                ("relationshipId", json!(relationship_id)),
            ],
        );
        linked += 1;
    }
    linked
}
