//! Relationship emission: endpoint canonicalization, fan-out, id
//! assignment and de-duplication.

use rustc_hash::FxHashSet;

use super::RelationshipParseResult;
use crate::import::classify::{Family, NodeClass, base_ref};
use crate::import::context::{ImportContext, ImportSession};
use crate::ir::{ExternalId, IrRelationship, JsonMap, TaggedValue};
use crate::report::ImportReport;

/// A relationship record before endpoint fan-out.
#[derive(Debug, Default)]
pub(crate) struct Draft {
    pub rel_type: String,
    /// Id of the source record, if it had one.
    pub base_id: Option<String>,
    pub sources: Vec<String>,
    pub targets: Vec<String>,
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub attrs: JsonMap,
    pub external_ids: Vec<ExternalId>,
    pub tagged_values: Vec<TaggedValue>,
    pub meta: JsonMap,
    /// Metaclass or profile tag, for warnings.
    pub construct: String,
}

/// Collects one family's relationships.
pub(crate) struct RelationshipSink {
    family: Family,
    seen: FxHashSet<String>,
    relationships: Vec<IrRelationship>,
}

impl RelationshipSink {
    pub fn new(family: Family) -> Self {
        Self {
            family,
            seen: FxHashSet::default(),
            relationships: Vec::new(),
        }
    }

    /// Emit one IR relationship per distinct (source, target) pair.
    ///
    /// Repeated endpoint tokens name the same pair twice and yield one
    /// relationship; the fan-out count is taken after that reduction. A
    /// record with a missing endpoint is skipped with a warning. With a
    /// base id, fanned-out pairs get `<base>_<n>` ids (1-based); without
    /// one, ids come from the session's triple map so identical triples
    /// collapse.
    pub fn emit(&mut self, ctx: &ImportContext<'_>, session: &mut ImportSession, report: &mut ImportReport, draft: Draft) {
        let sources = canonical_endpoints(ctx, &draft.sources);
        let targets = canonical_endpoints(ctx, &draft.targets);

        if sources.is_empty() || targets.is_empty() {
            report.warn(format!(
                "Skipping {} relationship {} ({}): source {}, target {}",
                self.family.label(),
                draft.construct,
                draft.base_id.as_deref().unwrap_or("no id"),
                endpoint_state(&sources),
                endpoint_state(&targets),
            ));
            return;
        }

        let fan_out = sources.len() * targets.len() > 1;
        let synth_prefix = format!("{}_rel", self.family.prefix());
        let pairs = sources
            .iter()
            .flat_map(|s| targets.iter().map(move |t| (s, t)))
            .enumerate();

        for (index, (source, target)) in pairs {
            let id = match &draft.base_id {
                Some(base) if fan_out => format!("{base}_{}", index + 1),
                Some(base) => base.clone(),
                None => session.synthetic.for_triple(&synth_prefix, &draft.rel_type, source, target).0,
            };

            if !self.seen.insert(id.clone()) {
                if draft.base_id.is_none() {
                    tracing::trace!(%id, "collapsed identical inferred relationship");
                } else {
                    report.warn(format!(
                        "Duplicate relationship id {id} ({}) ignored; first occurrence kept",
                        draft.rel_type
                    ));
                }
                continue;
            }

            let mut rel = IrRelationship::new(id, draft.rel_type.clone(), source.clone(), target.clone());
            rel.name = draft.name.clone();
            rel.documentation = draft.documentation.clone();
            rel.attrs = draft.attrs.clone();
            rel.tagged_values = draft.tagged_values.clone();
            rel.meta = draft.meta.clone();
            for ext in &draft.external_ids {
                rel.add_external_id(ext.clone());
            }
            self.relationships.push(rel);
        }
    }

    pub fn finish(self) -> RelationshipParseResult {
        tracing::debug!(
            family = self.family.label(),
            count = self.relationships.len(),
            "parsed relationships"
        );
        RelationshipParseResult {
            relationships: self.relationships,
        }
    }
}

fn endpoint_state(tokens: &[String]) -> String {
    if tokens.is_empty() {
        "unresolved".to_string()
    } else {
        format!("[{}]", tokens.join(", "))
    }
}

/// Endpoint tokens with stereotype applications replaced by their base
/// element id, blanks and repeats dropped, order kept. Deduplicating each
/// side makes every pair of the product distinct.
fn canonical_endpoints(ctx: &ImportContext<'_>, tokens: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        let canonical = ctx
            .resolve(Some(token))
            .filter(|n| matches!(ctx.class(*n), NodeClass::Profile(_)))
            .and_then(base_ref)
            .map_or(token, |(_, base)| base);
        if !out.iter().any(|t| t == canonical) {
            out.push(canonical.to_string());
        }
    }
    out
}
