//! Relationship fan-out, de-duplication and stereotype override tests.

use crate::helpers::import_helpers::*;
use crate::helpers::xmi_fixtures::*;
use rstest::rstest;

// =============================================================================
// FAN-OUT
// =============================================================================

#[test]
fn test_fan_out_is_n_times_m() {
    let (result, _) = import_str(FAN_OUT);

    let fanned: Vec<_> = result
        .relationships
        .iter()
        .filter(|r| r.id.starts_with("D1_"))
        .map(|r| (r.id.as_str(), r.source_id.as_str(), r.target_id.as_str()))
        .collect();
    assert_eq!(
        fanned,
        vec![
            ("D1_1", "A", "C"),
            ("D1_2", "A", "D"),
            ("D1_3", "A", "E"),
            ("D1_4", "B", "C"),
            ("D1_5", "B", "D"),
            ("D1_6", "B", "E"),
        ]
    );
}

#[test]
fn test_single_pair_keeps_base_id() {
    let (result, _) = import_str(FAN_OUT);
    assert_eq!(endpoints(relationship(&result, "D2")), ("A", "C"));
    assert!(result.relationships.iter().all(|r| r.id != "D2_1"));
}

#[test]
fn test_identical_triples_without_id_collapse() {
    let (result, _) = import_str(FAN_OUT);

    let flows = relationships_of_type(&result, "archimate.flow");
    assert_eq!(flows.len(), 2);
    assert_eq!(flows[0].id, "archimate_rel_synth_1");
    assert_eq!(endpoints(flows[0]), ("A", "B"));
    assert_eq!(flows[1].id, "archimate_rel_synth_2");
    assert_eq!(endpoints(flows[1]), ("A", "C"));
}

#[test]
fn test_missing_endpoint_skips_with_warning() {
    let (result, report) = import_str(FAN_OUT);

    assert!(result.relationships.iter().all(|r| !r.id.starts_with("D3")));
    assert_warned(&report, "Skipping UML relationship Dependency (D3): source [A], target unresolved");
}

// =============================================================================
// STEREOTYPE OVERRIDES
// =============================================================================

#[rstest]
#[case("DI", "uml.include", ("UC1", "UC2"))]
#[case("DE", "uml.extend", ("UC3", "UC1"))]
#[case("DP", "uml.dependency", ("UC1", "UC3"))]
#[case("I1", "uml.include", ("UC1", "UC3"))]
fn test_use_case_dependency_types(#[case] id: &str, #[case] expected: &str, #[case] ends: (&str, &str)) {
    let (result, report) = import_str(USE_CASE_DEPENDENCIES);

    let rel = relationship(&result, id);
    assert_eq!(rel.relationship_type, expected);
    assert_eq!(endpoints(rel), ends);
    assert!(report.is_clean(), "{:?}", report.warnings);
}

#[test]
fn test_stereotype_is_kept_as_tagged_value() {
    let (result, _) = import_str(USE_CASE_DEPENDENCIES);
    assert_eq!(relationship(&result, "DI").tagged_value("stereotype"), Some("InClUdE"));
    assert_eq!(relationship(&result, "DE").tagged_value("stereotype"), Some("extend"));
}

// =============================================================================
// ALTERNATE FORMS
// =============================================================================

#[test]
fn test_guard_from_specification_body() {
    let (result, _) = import_str(RELATIONSHIP_FORMS);

    let flow = relationship(&result, "CF1");
    assert_eq!(flow.relationship_type, "uml.controlFlow");
    assert_eq!(endpoints(flow), ("MEASURE", "RENDER"));
    assert_eq!(flow.attr_str("guard"), Some("size > 0"));
}

#[test]
fn test_generalization_general_child_and_owner_source() {
    let (result, _) = import_str(RELATIONSHIP_FORMS);

    let generalization = relationship(&result, "G1");
    assert_eq!(generalization.relationship_type, "uml.generalization");
    assert_eq!(endpoints(generalization), ("CIRCLE", "SHAPE"));
}

#[test]
fn test_relationship_without_id_is_skipped_with_warning() {
    let (result, report) = import_str(RELATIONSHIP_FORMS);

    assert!(relationships_of_type(&result, "uml.dependency").is_empty());
    assert_warned(&report, "Skipping UML relationship Dependency (no id): source [SHAPE], target unresolved");
}

#[rstest]
#[case("T1", ("IDLE", "BUSY"), "Choreography")]
#[case("IR1", ("SHAPE", "DRAWABLE"), "ArchiMate_Mystery")]
fn test_unmapped_tag_over_relationship_base_keeps_relationship(
    #[case] id: &str,
    #[case] ends: (&str, &str),
    #[case] tag: &str,
) {
    let (result, report) = import_str(RELATIONSHIP_FORMS);

    let rel = relationship(&result, id);
    assert_eq!(rel.relationship_type, "Unknown");
    assert_eq!(endpoints(rel), ends);
    assert_eq!(rel.meta["unknownType"], tag);
    assert!(result.elements.iter().all(|e| e.id != id));
    assert!(report.warnings.iter().all(|w| !w.contains(id)), "{:?}", report.warnings);
}
