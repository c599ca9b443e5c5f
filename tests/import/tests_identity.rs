//! Element identity tests.

use crate::helpers::import_helpers::*;
use crate::helpers::xmi_fixtures::*;
use eaxmi::{ImportOptions, ImportReport, XmlDocument, import_document};

#[test]
fn test_missing_ids_get_family_synthetic_ids() {
    let (result, report) = import_str(MISSING_IDS);

    assert_eq!(
        ids(&result.elements),
        vec!["uml_synth_1", "C1", "archimate_synth_1", "archimate_synth_2", "ACT"]
    );
    assert_eq!(report.warnings.len(), 3);
    assert_warned(&report, "assigned synthetic id archimate_synth_1 (name: Clerk)");
}

#[test]
fn test_synthetic_ids_are_stable_across_runs() {
    let doc = XmlDocument::parse(MISSING_IDS).unwrap();
    let options = ImportOptions::default();

    let mut first_report = ImportReport::new();
    let first = import_document(&doc, &[], &[], &options, &mut first_report);
    let mut second_report = ImportReport::new();
    let second = import_document(&doc, &[], &[], &options, &mut second_report);

    assert_eq!(ids(&first.elements), ids(&second.elements));
    assert_eq!(first_report, second_report);
}

#[test]
fn test_unnamed_element_falls_back_to_metaclass() {
    let (result, _) = import_str(MISSING_IDS);
    assert_eq!(element(&result, "uml_synth_1").name, "Anonymous");
    assert_eq!(element(&result, "C1").meta_str("metaclass"), Some("Class"));
}

#[test]
fn test_duplicate_ids_keep_first() {
    let xml = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001">
  <packagedElement xmi:type="uml:Class" xmi:id="DUP" name="First"/>
  <packagedElement xmi:type="uml:Interface" xmi:id="DUP" name="Second"/>
</xmi:XMI>"#;
    let (result, report) = import_str(xml);

    assert_eq!(result.elements.len(), 1);
    assert_eq!(element(&result, "DUP").name, "First");
    assert_warned(&report, "Duplicate element id DUP");
}
