use super::RelationshipParseResult;
use super::profile::parse_profile_relationships;
use crate::import::classify::Family;
use crate::import::context::{ImportContext, ImportSession};
use crate::report::ImportReport;

/// Parse ArchiMate relationship tags.
pub fn parse_archimate_relationships(
    ctx: &ImportContext<'_>,
    session: &mut ImportSession,
    report: &mut ImportReport,
) -> RelationshipParseResult {
    parse_profile_relationships(ctx, session, report, Family::ArchiMate, None)
}
