//! Option loading and option-driven behavior.

use std::io::Write;

use crate::helpers::import_helpers::*;
use crate::helpers::xmi_fixtures::*;
use eaxmi::{ImportError, ImportOptions};

#[test]
fn test_load_json_options() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{ "parseMembers": false, "externalIdSystem": "ea-16", "typeAliases": {{ "Gizmo": "archimate.node" }} }}"#
    )
    .unwrap();

    let options = ImportOptions::load(file.path()).unwrap();
    assert!(!options.parse_members);
    assert_eq!(options.external_id_system, "ea-16");
    assert_eq!(options.type_aliases.get("Gizmo").map(String::as_str), Some("archimate.node"));
    assert!(options.materialize_packages);
    assert_eq!(options.type_name_max_len, 64);
}

#[test]
fn test_unknown_extension_is_rejected() {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    let err = ImportOptions::load(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::Config(_)));
}

#[cfg(feature = "yaml")]
#[test]
fn test_load_yaml_options() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "linkAssociationClasses: false\ntypeNameMaxLen: 12").unwrap();

    let options = ImportOptions::load(file.path()).unwrap();
    assert!(!options.link_association_classes);
    assert_eq!(options.type_name_max_len, 12);
}

#[test]
fn test_members_can_be_disabled() {
    let options = ImportOptions {
        parse_members: false,
        ..ImportOptions::default()
    };
    let (result, _) = import_with(CLASS_MEMBERS, &[], &[], &options);
    assert!(!element(&result, "ORDER").meta.contains_key("umlMembers"));
}

#[test]
fn test_configured_alias_maps_unknown_tag() {
    let options = ImportOptions::default().with_type_alias("Gizmo", "archimate.node");
    let (result, _) = import_with(PROFILES, &[], &[], &options);

    let gizmo = element(&result, "MISSING");
    assert_eq!(gizmo.element_type, "archimate.node");
    assert!(gizmo.meta_str("unknownType").is_none());
}

#[test]
fn test_external_id_system_is_configurable() {
    let options = ImportOptions {
        external_id_system: "ea-16".into(),
        ..ImportOptions::default()
    };
    let (result, _) = import_with(CLASS_MEMBERS, &[], &[], &options);
    assert!(element(&result, "ORDER").external_ids.iter().all(|x| x.system == "ea-16"));
}
