//! Import report: the caller-owned log of everything an import noticed.
//!
//! The report is append-only and ordered. Entries are never deduplicated, so
//! running a pass twice shows up twice. Every entry is also emitted through
//! `tracing` so hosts that install a subscriber see the same stream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ir::JsonMap;

/// Info codes emitted by the normalize passes.
pub mod codes {
    pub const ASSOCIATION_CLASS_LINKED: &str = "association-class-linked";
    pub const PACKAGE_ENDPOINTS_REWRITTEN: &str = "package-endpoints-rewritten";
    pub const PACKAGE_MATERIALIZED: &str = "package-materialized";
}

/// A structured informational entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportInfo {
    pub message: String,
    pub code: String,
    #[serde(default)]
    pub context: JsonMap,
}

/// Warnings and infos collected over one import.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub warnings: Vec<String>,
    pub infos: Vec<ReportInfo>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Append a structured info entry.
    pub fn info<I, K>(&mut self, code: &str, message: impl Into<String>, context: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let message = message.into();
        tracing::debug!(code, "{}", message);
        self.infos.push(ReportInfo {
            message,
            code: code.to_string(),
            context: context.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Infos with the given code.
    pub fn infos_with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ReportInfo> {
        self.infos.iter().filter(move |i| i.code == code)
    }
}
