//! Error types for the fallible edges of an import.
//!
//! The import passes themselves never fail: anomalies in the model are
//! reported through [`ImportReport`](crate::report::ImportReport). Only
//! reading the XML document and loading option files can return an error.

use thiserror::Error;

/// Errors raised while preparing an import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid or unreadable import options.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error while reading an option file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input that is not an XMI document at all.
    #[error("Not an XMI document: {0}")]
    NotXmi(String),
}

impl ImportError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
