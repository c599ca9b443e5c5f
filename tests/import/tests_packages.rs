//! Package materialization tests.

use crate::helpers::import_helpers::*;
use crate::helpers::xmi_fixtures::*;
use eaxmi::report::codes;
use eaxmi::{ImportOptions, IrFolder, IrView, IrViewNode};

fn folders() -> Vec<IrFolder> {
    vec![
        IrFolder::new("EAPK_ROOT", "Model"),
        IrFolder::new("EAPK_SALES", "Sales").with_parent("EAPK_ROOT"),
    ]
}

fn diagram(refs: &[&str]) -> IrView {
    IrView {
        id: "EAID_DIAGRAM".into(),
        name: "Sales overview".into(),
        folder_id: Some("EAPK_SALES".into()),
        nodes: refs.iter().map(|r| IrViewNode::referencing(*r)).collect(),
    }
}

#[test]
fn test_repository_id_package_is_materialized_once() {
    let views = [diagram(&["EAID_SALES", "EAID_ORDER"])];
    let (result, report) = import_with(PACKAGE_ALIASES, &folders(), &views, &ImportOptions::default());

    let packages: Vec<_> = result
        .elements
        .iter()
        .filter(|e| e.element_type == "uml.package")
        .collect();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].id, "EAPK_SALES");
    assert_eq!(packages[0].name, "Sales");
    assert_eq!(packages[0].folder_id.as_deref(), Some("EAPK_ROOT"));
    assert_eq!(result.created_package_elements, 1);
    assert_eq!(report.infos_with_code(codes::PACKAGE_MATERIALIZED).count(), 1);
}

#[test]
fn test_repository_id_endpoints_are_rewritten() {
    let (result, report) = import_with(PACKAGE_ALIASES, &folders(), &[], &ImportOptions::default());

    assert_eq!(endpoints(relationship(&result, "EAID_DEP")), ("EAID_ORDER", "EAPK_SALES"));
    assert_eq!(result.rewritten_relationship_endpoints, 1);
    assert_eq!(report.infos_with_code(codes::PACKAGE_ENDPOINTS_REWRITTEN).count(), 1);
}

#[test]
fn test_package_records_both_ids() {
    let views = [diagram(&["EAID_SALES"])];
    let (result, _) = import_with(PACKAGE_ALIASES, &folders(), &views, &ImportOptions::default());

    let package = element(&result, "EAPK_SALES");
    let kinds: Vec<_> = package
        .external_ids
        .iter()
        .map(|x| (x.id.as_str(), x.kind.as_deref()))
        .collect();
    assert!(kinds.contains(&("EAPK_SALES", Some("xmi-id"))));
    assert!(kinds.contains(&("EAID_SALES", Some("ea-package-id"))));
}

#[test]
fn test_prefix_swap_without_extension_record() {
    let xml = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001">
  <uml:Model xmi:type="uml:Model" xmi:id="M">
    <packagedElement xmi:type="uml:Package" xmi:id="EAPK_X" name="X"/>
  </uml:Model>
</xmi:XMI>"#;
    let folders = [IrFolder::new("EAPK_X", "X")];
    let (result, _) = import_with(xml, &folders, &[diagram(&["EAID_X"])], &ImportOptions::default());

    assert_eq!(ids(&result.elements), vec!["EAPK_X"]);
}

#[test]
fn test_disabled_materialization_leaves_ids_alone() {
    let options = ImportOptions {
        materialize_packages: false,
        ..ImportOptions::default()
    };
    let views = [diagram(&["EAID_SALES"])];
    let (result, _) = import_with(PACKAGE_ALIASES, &folders(), &views, &options);

    assert_eq!(result.created_package_elements, 0);
    assert_eq!(endpoints(relationship(&result, "EAID_DEP")).1, "EAID_SALES");
}
