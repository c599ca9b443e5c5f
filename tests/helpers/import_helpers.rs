//! Helpers for running imports and looking things up in the result.

#![allow(dead_code)]

use eaxmi::{ImportOptions, ImportReport, ImportResult, IrElement, IrFolder, IrRelationship, IrView, XmlDocument, import_document};

/// Import with default options and no folders or views.
pub fn import_str(xml: &str) -> (ImportResult, ImportReport) {
    import_with(xml, &[], &[], &ImportOptions::default())
}

/// Import with explicit folders, views and options.
pub fn import_with(
    xml: &str,
    folders: &[IrFolder],
    views: &[IrView],
    options: &ImportOptions,
) -> (ImportResult, ImportReport) {
    let doc = XmlDocument::parse(xml).expect("fixture should parse");
    let mut report = ImportReport::new();
    let result = import_document(&doc, folders, views, options, &mut report);
    (result, report)
}

pub fn element<'a>(result: &'a ImportResult, id: &str) -> &'a IrElement {
    result
        .elements
        .iter()
        .find(|e| e.id == id)
        .unwrap_or_else(|| panic!("element {id} not imported; got {:?}", ids(&result.elements)))
}

pub fn relationship<'a>(result: &'a ImportResult, id: &str) -> &'a IrRelationship {
    result
        .relationships
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("relationship {id} not imported"))
}

pub fn relationships_of_type<'a>(result: &'a ImportResult, rel_type: &str) -> Vec<&'a IrRelationship> {
    result
        .relationships
        .iter()
        .filter(|r| r.relationship_type == rel_type)
        .collect()
}

pub fn ids(elements: &[IrElement]) -> Vec<&str> {
    elements.iter().map(|e| e.id.as_str()).collect()
}

pub fn endpoints(rel: &IrRelationship) -> (&str, &str) {
    (rel.source_id.as_str(), rel.target_id.as_str())
}

pub fn assert_warned(report: &ImportReport, needle: &str) {
    assert!(
        report.warnings.iter().any(|w| w.contains(needle)),
        "expected a warning containing {needle:?}, got {:?}",
        report.warnings
    );
}
