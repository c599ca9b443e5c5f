//! Association class tests.

use crate::helpers::import_helpers::*;
use crate::helpers::xmi_fixtures::*;
use eaxmi::ImportReport;
use eaxmi::import::normalize::link_association_classes;
use eaxmi::report::codes;

#[test]
fn test_association_class_is_element_and_relationship() {
    let (result, _) = import_str(ASSOCIATION_CLASS);

    assert_eq!(element(&result, "ENROLMENT").element_type, "uml.associationClass");
    let association = relationship(&result, "ENROLMENT__association");
    assert_eq!(association.relationship_type, "uml.association");
    assert_eq!(endpoints(association), ("STUDENT", "COURSE"));
    assert_eq!(association.attrs["targetMultiplicity"]["upper"], "*");
}

#[test]
fn test_linked_both_ways() {
    let (result, report) = import_str(ASSOCIATION_CLASS);

    assert_eq!(
        element(&result, "ENROLMENT").attr_str("associationRelationshipId"),
        Some("ENROLMENT__association")
    );
    assert_eq!(
        relationship(&result, "ENROLMENT__association").attr_str("associationClassElementId"),
        Some("ENROLMENT")
    );
    assert_eq!(report.infos_with_code(codes::ASSOCIATION_CLASS_LINKED).count(), 1);
}

#[test]
fn test_linkage_is_idempotent() {
    let (mut result, _) = import_str(ASSOCIATION_CLASS);
    let before = result.clone();

    let mut report = ImportReport::new();
    let linked = link_association_classes(&mut result.elements, &mut result.relationships, &mut report);

    assert_eq!(linked, 0);
    assert!(report.infos.is_empty());
    assert_eq!(result, before);
}
