//! Import pipeline tests
//!
//! End-to-end tests running whole XMI fixtures through `import_document`:
//! - Identity and synthetic ids
//! - Relationship fan-out and stereotype overrides
//! - Classifier members and type names
//! - Profile families
//! - Normalize passes
//! - Options

pub mod tests_association_class;
pub mod tests_identity;
pub mod tests_members;
pub mod tests_options;
pub mod tests_packages;
pub mod tests_profiles;
pub mod tests_relationships;
