//! EA-XMI import pipeline.
//!
//! ```text
//! import_document
//!   ├─ ImportContext   (id/name/extension indices, classification)
//!   ├─ elements        (uml → archimate → bpmn)
//!   ├─ relationships   (uml → archimate → bpmn)
//!   └─ normalize       (association classes, packages)
//! ```
//!
//! Everything is built fresh per call. The only state that outlives a pass
//! is the [`ImportSession`](context::ImportSession), which owns synthetic
//! ids and the type-name cache for the duration of one import.

pub mod classify;
pub mod context;
pub mod elements;
pub mod extract;
pub mod id_index;
pub mod members;
pub mod normalize;
pub mod relationships;
pub mod type_map;
pub mod type_name;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::ImportOptions;
use crate::error::ImportError;
use crate::ir::{IrElement, IrFolder, IrRelationship, IrView};
use crate::report::ImportReport;
use crate::xml::{XmlDocument, validate_xmi};

use context::{ImportContext, ImportSession};

/// Output of one import run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub elements: Vec<IrElement>,
    pub relationships: Vec<IrRelationship>,
    pub created_package_elements: usize,
    pub rewritten_relationship_endpoints: usize,
}

/// Import a parsed XMI document.
///
/// Never fails: anything the importer cannot make sense of ends up as a
/// warning in `report`. `folders` and `views` come from the host's own
/// folder and diagram parsing and are only read by package materialization.
pub fn import_document(
    doc: &XmlDocument,
    folders: &[IrFolder],
    views: &[IrView],
    options: &ImportOptions,
    report: &mut ImportReport,
) -> ImportResult {
    let ctx = ImportContext::new(doc, options);
    let mut session = ImportSession::new();

    let mut elements = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let families = [
        elements::parse_uml_elements,
        elements::parse_archimate_elements,
        elements::parse_bpmn_elements,
    ];
    for parse in families {
        for element in parse(&ctx, &mut session, report).elements {
            if !seen.insert(element.id.clone()) {
                report.warn(format!(
                    "Duplicate element id {} ({} '{}') across families ignored; first occurrence kept",
                    element.id, element.element_type, element.name
                ));
                continue;
            }
            elements.push(element);
        }
    }

    let mut relationships = Vec::new();
    let mut rel_seen: FxHashSet<String> = FxHashSet::default();
    let families = [
        relationships::parse_uml_relationships,
        relationships::parse_archimate_relationships,
        relationships::parse_bpmn_relationships,
    ];
    for parse in families {
        for rel in parse(&ctx, &mut session, report).relationships {
            if !rel_seen.insert(rel.id.clone()) {
                report.warn(format!(
                    "Duplicate relationship id {} ({}) across families ignored; first occurrence kept",
                    rel.id, rel.relationship_type
                ));
                continue;
            }
            relationships.push(rel);
        }
    }

    if options.link_association_classes {
        normalize::link_association_classes(&mut elements, &mut relationships, report);
    }

    let mut result = ImportResult {
        elements,
        relationships,
        ..ImportResult::default()
    };
    if options.materialize_packages {
        let materialized =
            normalize::materialize_packages(&ctx, result.elements, result.relationships, folders, views, report);
        result = ImportResult {
            elements: materialized.elements,
            relationships: materialized.relationships,
            created_package_elements: materialized.created_package_elements,
            rewritten_relationship_endpoints: materialized.rewritten_relationship_endpoints,
        };
    }

    tracing::debug!(
        elements = result.elements.len(),
        relationships = result.relationships.len(),
        packages = result.created_package_elements,
        warnings = report.warnings.len(),
        "import finished"
    );
    result
}

/// Check, parse and import raw XMI bytes.
///
/// The only fallible step is reading the document itself.
pub fn import_bytes(
    input: &[u8],
    folders: &[IrFolder],
    views: &[IrView],
    options: &ImportOptions,
    report: &mut ImportReport,
) -> Result<ImportResult, ImportError> {
    validate_xmi(input)?;
    let doc = XmlDocument::parse_bytes(input)?;
    Ok(import_document(&doc, folders, views, options, report))
}
