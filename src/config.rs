//! Import options.
//!
//! Options are plain data with defaults matching what EA exports need.
//! Hosts can build them in code or load them from a JSON (or, with the
//! `yaml` feature, YAML) file.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// Options for one import run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportOptions {
    /// Parse attributes and operations of classes, interfaces and datatypes.
    pub parse_members: bool,
    /// Longest raw type token accepted verbatim as a type name.
    pub type_name_max_len: usize,
    /// `system` written on every external id the importer records.
    pub external_id_system: String,
    /// Extra profile tag aliases (tag local name → qualified type),
    /// consulted before the built-in tables.
    pub type_aliases: IndexMap<String, String>,
    /// Run the association-class linkage pass.
    pub link_association_classes: bool,
    /// Run the package materialization pass.
    pub materialize_packages: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            parse_members: true,
            type_name_max_len: 64,
            external_id_system: "sparx-ea".to_string(),
            type_aliases: IndexMap::new(),
            link_association_classes: true,
            materialize_packages: true,
        }
    }
}

impl ImportOptions {
    /// Parse options from JSON text.
    pub fn from_json_str(input: &str) -> Result<Self, ImportError> {
        serde_json::from_str(input).map_err(|e| ImportError::config(format!("JSON: {e}")))
    }

    /// Parse options from YAML text.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(input: &str) -> Result<Self, ImportError> {
        serde_yaml::from_str(input).map_err(|e| ImportError::config(format!("YAML: {e}")))
    }

    /// Load options from a file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Self::from_json_str(&content),
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            other => Err(ImportError::config(format!(
                "Unsupported options file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Builder-style alias registration.
    pub fn with_type_alias(mut self, token: impl Into<String>, qualified: impl Into<String>) -> Self {
        self.type_aliases.insert(token.into(), qualified.into());
        self
    }
}
