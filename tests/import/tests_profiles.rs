//! ArchiMate and BPMN stereotype application tests.

use crate::helpers::import_helpers::*;
use crate::helpers::xmi_fixtures::*;
use rstest::rstest;

#[rstest]
#[case("APP", "archimate.applicationComponent")]
#[case("ACTOR", "archimate.businessActor")]
#[case("TASK", "bpmn.task")]
#[case("GW", "bpmn.gatewayExclusive")]
#[case("MISSING", "Unknown")]
fn test_profile_element_types(#[case] id: &str, #[case] expected: &str) {
    let (result, _) = import_str(PROFILES);
    assert_eq!(element(&result, id).element_type, expected);
}

#[test]
fn test_stereotype_bases_are_not_imported_as_uml() {
    let (result, _) = import_str(PROFILES);

    assert!(result.elements.iter().all(|e| !e.element_type.starts_with("uml.")));
    assert!(result.relationships.iter().all(|r| !r.relationship_type.starts_with("uml.")));
}

#[test]
fn test_facts_fall_back_to_base_element() {
    let (result, _) = import_str(PROFILES);
    let app = element(&result, "APP");

    assert_eq!(app.name, "Billing");
    assert_eq!(app.documentation.as_deref(), Some("Invoices customers"));
    assert_eq!(app.folder_id.as_deref(), Some("EAPK_ARCH"));
    assert_eq!(app.meta_str("baseMetaclass"), Some("Component"));

    let tags: Vec<_> = app.tagged_values.iter().map(|t| (t.key.as_str(), t.value.as_str())).collect();
    assert_eq!(
        tags,
        vec![
            ("profileTag", "ArchiMate3:ArchiMate_ApplicationComponent"),
            ("lifecycle", "production")
        ]
    );
}

#[test]
fn test_bpmn_task_type_attribute() {
    let (result, _) = import_str(PROFILES);
    assert_eq!(element(&result, "TASK").attr_str("taskType"), Some("Send"));
}

#[test]
fn test_dangling_application_warns_and_keeps_token() {
    let (result, report) = import_str(PROFILES);
    let gizmo = element(&result, "MISSING");

    assert_eq!(gizmo.name, "Gizmo");
    assert_eq!(gizmo.meta_str("unknownType"), Some("ArchiMate_Gizmo"));
    assert_warned(&report, "references missing base element MISSING");
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_profile_relationships_use_base_endpoints() {
    let (result, _) = import_str(PROFILES);

    let serving = relationship(&result, "SERVES");
    assert_eq!(serving.relationship_type, "archimate.serving");
    assert_eq!(endpoints(serving), ("APP", "ACTOR"));

    let flow = relationship(&result, "SF");
    assert_eq!(flow.relationship_type, "bpmn.sequenceFlow");
    assert_eq!(endpoints(flow), ("TASK", "GW"));
    assert_eq!(flow.name.as_deref(), Some("next"));
    assert_eq!(flow.attr_str("condition"), Some("invoice sent"));
}
