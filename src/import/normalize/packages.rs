//! Package materialization.
//!
//! EA knows every package under two ids: the XMI id of its
//! `packagedElement` (`EAPK_…`) and a repository id (`EAID_…`) that only
//! appears in extension records, diagrams and some connectors. Packages are
//! imported as folders, so a diagram or relationship that points at a
//! package needs an element to land on. This pass reconciles the two id
//! schemes and creates `uml.package` elements from folders where needed.

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use serde_json::json;

use crate::import::context::ImportContext;
use crate::import::elements::id_kinds;
use crate::ir::{ExternalId, IrElement, IrFolder, IrRelationship, IrView};
use crate::report::{ImportReport, codes};
use crate::xml::nav;

pub const PACKAGE_TYPE: &str = "uml.package";
const REPOSITORY_PREFIX: &str = "EAID_";
const XMI_PACKAGE_PREFIX: &str = "EAPK_";
/// External id kind recording a package's repository id.
pub const EA_PACKAGE_ID: &str = "ea-package-id";

/// Bidirectional `EAID_*` ↔ `EAPK_*` package id map.
#[derive(Debug, Default, Clone)]
pub struct PackageAliases {
    to_xmi: FxHashMap<String, String>,
    to_repository: FxHashMap<String, String>,
}

impl PackageAliases {
    pub fn insert(&mut self, repository_id: &str, xmi_id: &str) {
        self.to_xmi
            .entry(repository_id.to_string())
            .or_insert_with(|| xmi_id.to_string());
        self.to_repository
            .entry(xmi_id.to_string())
            .or_insert_with(|| repository_id.to_string());
    }

    /// XMI id for a repository id.
    pub fn xmi_id(&self, repository_id: &str) -> Option<&str> {
        self.to_xmi.get(repository_id).map(String::as_str)
    }

    /// Repository id for an XMI id.
    pub fn repository_id(&self, xmi_id: &str) -> Option<&str> {
        self.to_repository.get(xmi_id).map(String::as_str)
    }

    /// True when `id` names a package under either scheme.
    pub fn is_package(&self, id: &str) -> bool {
        self.to_xmi.contains_key(id) || self.to_repository.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.to_xmi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_xmi.is_empty()
    }
}

/// Output of [`materialize_packages`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMaterialization {
    pub elements: Vec<IrElement>,
    pub relationships: Vec<IrRelationship>,
    pub created_package_elements: usize,
    pub rewritten_relationship_endpoints: usize,
}

fn swap_prefix(id: &str, from: &str, to: &str) -> Option<String> {
    id.strip_prefix(from).map(|rest| format!("{to}{rest}"))
}

/// Build the alias table from EA extension element records that describe
/// packages: `<element xmi:idref="EAPK_…"><model package2="EAID_…"/></element>`.
pub fn build_package_alias_table(ctx: &ImportContext<'_>) -> PackageAliases {
    let mut aliases = PackageAliases::default();

    for record in ctx.extensions.element_records(ctx.doc) {
        let Some(xmi_id) = nav::xmi_idref(record) else {
            continue;
        };
        let model = nav::child(record, "model");
        let is_package = nav::is_metaclass(record, "Package")
            || model.is_some_and(|m| nav::attr_value(m, "package2").is_some())
            || model
                .and_then(|m| nav::attr_value(m, "ea_eleType"))
                .or_else(|| nav::attr_value(record, "ea_eleType"))
                .is_some_and(|t| t.eq_ignore_ascii_case("package"));
        if !is_package {
            continue;
        }

        let repository_id = model
            .and_then(|m| nav::attr_value(m, "package2"))
            .filter(|p| p.starts_with(REPOSITORY_PREFIX))
            .map(str::to_string)
            .or_else(|| swap_prefix(xmi_id, XMI_PACKAGE_PREFIX, REPOSITORY_PREFIX));
        if let Some(repository_id) = repository_id.filter(|r| r != xmi_id) {
            aliases.insert(&repository_id, xmi_id);
        }
    }

    tracing::debug!(aliases = aliases.len(), "built package alias table");
    aliases
}

/// Rewrite repository-id endpoints, then create `uml.package` elements for
/// every referenced package that has no element yet.
pub fn materialize_packages(
    ctx: &ImportContext<'_>,
    mut elements: Vec<IrElement>,
    mut relationships: Vec<IrRelationship>,
    folders: &[IrFolder],
    views: &[IrView],
    report: &mut ImportReport,
) -> PackageMaterialization {
    let aliases = build_package_alias_table(ctx);
    let mut folder_index: FxHashMap<&str, &IrFolder> = FxHashMap::default();
    for folder in folders {
        for id in folder.known_ids() {
            folder_index.entry(id).or_insert(folder);
        }
    }
    let folder_for = |id: &str| folder_index.get(id).copied();

    // Canonical package id of a token, if it names a package at all.
    let canonical = |token: &str| -> Option<String> {
        if let Some(xmi_id) = aliases.xmi_id(token) {
            return Some(xmi_id.to_string());
        }
        if aliases.is_package(token) || token.starts_with(XMI_PACKAGE_PREFIX) {
            return Some(token.to_string());
        }
        if let Some(folder) = folder_for(token) {
            return Some(folder.id.clone());
        }
        let swapped = swap_prefix(token, REPOSITORY_PREFIX, XMI_PACKAGE_PREFIX)?;
        let known = folder_for(swapped.as_str()).is_some()
            || ctx.resolve(Some(swapped.as_str())).is_some_and(|n| nav::is_metaclass(n, "Package"));
        known.then_some(swapped)
    };

    // (b) endpoint rewrites
    let mut rewritten = 0;
    for rel in &mut relationships {
        for endpoint in [&mut rel.source_id, &mut rel.target_id] {
            let current = endpoint.as_str();
            if !current.starts_with(REPOSITORY_PREFIX) {
                continue;
            }
            if let Some(xmi_id) = canonical(current).filter(|c| c != current) {
                *endpoint = xmi_id;
                rewritten += 1;
            }
        }
    }
    if rewritten > 0 {
        report.info(
            codes::PACKAGE_ENDPOINTS_REWRITTEN,
            format!("Rewrote {rewritten} relationship endpoint(s) from EA package ids to XMI ids"),
            [("count", json!(rewritten))],
        );
    }

    // (c) referenced packages, diagrams first
    let mut referenced: IndexSet<String> = IndexSet::new();
    let view_refs = views
        .iter()
        .flat_map(|v| v.nodes.iter())
        .filter_map(|n| n.element_ref.as_deref());
    for token in view_refs {
        if let Some(id) = canonical(token) {
            referenced.insert(id);
        }
    }
    for rel in &relationships {
        for endpoint in [&rel.source_id, &rel.target_id] {
            if let Some(id) = canonical(endpoint.as_str()) {
                referenced.insert(id);
            }
        }
    }

    // (d) materialize
    let mut known: FxHashSet<String> = elements
        .iter()
        .flat_map(|e| std::iter::once(e.id.clone()).chain(e.external_ids.iter().map(|x| x.id.clone())))
        .collect();
    let system = ctx.options.external_id_system.as_str();
    let mut created = 0;

    for package_id in referenced {
        if known.contains(&package_id) {
            continue;
        }
        let repository_id = aliases.repository_id(&package_id);
        let folder = folder_for(package_id.as_str()).or_else(|| repository_id.and_then(folder_for));
        let Some(folder) = folder else {
            report.warn(format!(
                "Package {package_id} is referenced but its folder was never imported; not materialized"
            ));
            continue;
        };

        let mut element = IrElement::new(package_id.clone(), PACKAGE_TYPE, folder.name.clone());
        element.folder_id = folder.parent_id.clone();
        for ext in &folder.external_ids {
            element.add_external_id(ext.clone());
        }
        element.add_external_id(ExternalId::new(system, &package_id, id_kinds::XMI_ID));
        if let Some(repository_id) = repository_id {
            element.add_external_id(ExternalId::new(system, repository_id, EA_PACKAGE_ID));
        }
        element.meta.insert("sourceFamily".into(), json!("uml"));
        element.meta.insert("metaclass".into(), json!("Package"));
        element.meta.insert("materializedFromFolder".into(), json!(folder.id));

        report.info(
            codes::PACKAGE_MATERIALIZED,
            format!("Materialized package {package_id} ('{}') from its folder", folder.name),
            [("packageId", json!(package_id)), ("folderId", json!(folder.id))],
        );
        known.insert(package_id);
        elements.push(element);
        created += 1;
    }

    tracing::debug!(created, rewritten, "package materialization done");
    PackageMaterialization {
        elements,
        relationships,
        created_package_elements: created,
        rewritten_relationship_endpoints: rewritten,
    }
}
