//! Passes run over the combined element and relationship sets after all
//! families have been parsed.

mod association_class;
mod packages;

pub use association_class::link_association_classes;
pub use packages::{PackageAliases, PackageMaterialization, build_package_alias_table, materialize_packages};
