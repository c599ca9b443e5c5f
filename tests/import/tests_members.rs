//! Classifier member and type-name tests.

use crate::helpers::import_helpers::*;
use crate::helpers::xmi_fixtures::*;
use eaxmi::ir::{ClassifierMembers, Multiplicity};

fn order_members() -> ClassifierMembers {
    let (result, _) = import_str(CLASS_MEMBERS);
    let order = element(&result, "ORDER");
    serde_json::from_value(order.meta["umlMembers"].clone()).expect("umlMembers should deserialize")
}

#[test]
fn test_unbounded_upper_is_star() {
    let members = order_members();
    let lines = &members.attributes[0];

    assert_eq!(lines.name, "lines");
    assert_eq!(
        lines.multiplicity,
        Some(Multiplicity {
            lower: Some("0".into()),
            upper: Some("*".into()),
        })
    );
}

#[test]
fn test_type_resolves_through_name_index() {
    let members = order_members();
    let lines = &members.attributes[0];

    assert_eq!(lines.data_type_ref.as_deref(), Some("LINE"));
    assert_eq!(lines.data_type_name.as_deref(), Some("OrderLine"));
}

#[test]
fn test_own_metaclass_is_never_a_type_name() {
    let members = order_members();
    let this = members.attributes.iter().find(|a| a.name == "self").unwrap();

    assert_eq!(this.metaclass, "Property");
    assert_eq!(this.data_type_name, None);
    assert_eq!(this.data_type_ref, None);
}

#[test]
fn test_rejected_type_attribute_falls_through_to_type_child() {
    let members = order_members();
    let first = members.attributes.iter().find(|a| a.name == "firstLine").unwrap();

    assert_eq!(first.data_type_ref.as_deref(), Some("LINE"));
    assert_eq!(first.data_type_name.as_deref(), Some("OrderLine"));
}

#[test]
fn test_primitive_href_type() {
    let members = order_members();
    let total = members.attributes.iter().find(|a| a.name == "total").unwrap();
    assert_eq!(total.data_type_name.as_deref(), Some("Real"));
}

#[test]
fn test_operation_signature() {
    let members = order_members();
    let add_line = &members.operations[0];

    assert_eq!(add_line.name, "addLine");
    assert_eq!(add_line.visibility.as_deref(), Some("public"));
    assert_eq!(add_line.return_type.as_deref(), Some("boolean"));
    assert_eq!(add_line.params.len(), 1);
    assert_eq!(add_line.params[0].name, "line");
    assert_eq!(add_line.params[0].type_name.as_deref(), Some("OrderLine"));
}

#[test]
fn test_class_without_members_has_no_member_meta() {
    let (result, _) = import_str(CLASS_MEMBERS);
    assert!(!element(&result, "LINE").meta.contains_key("umlMembers"));
}
