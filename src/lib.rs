//! # ea-xmi-import
//!
//! Import of Sparx Enterprise Architect XMI exports into a normalized
//! intermediate representation of elements and relationships.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! import    → classification, element/relationship parsers, normalize passes
//!   ↓
//! ir        → IrElement, IrRelationship, IrFolder, IrView, member records
//!   ↓
//! xml       → quick-xml arena DOM, namespace/case tolerant navigation
//!   ↓
//! config, report, error
//! ```

// ============================================================================
// MODULES (dependency order: error → config/report → xml → ir → import)
// ============================================================================

/// Error type for the fallible boundaries (XML parsing, option loading)
pub mod error;

/// Import options, loadable from JSON or YAML
pub mod config;

/// Append-only warning/info log of one import
pub mod report;

/// Arena XML document and navigation helpers
pub mod xml;

/// Intermediate representation produced by the importer
pub mod ir;

/// The import pipeline
pub mod import;

pub use config::ImportOptions;
pub use error::ImportError;
pub use import::{ImportResult, import_bytes, import_document};
pub use ir::{ExternalId, IrElement, IrFolder, IrRelationship, IrView, IrViewNode, TaggedValue};
pub use report::{ImportReport, ReportInfo};
pub use xml::XmlDocument;
