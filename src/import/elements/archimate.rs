use super::ElementParseResult;
use super::profile::parse_profile_elements;
use crate::import::classify::Family;
use crate::import::context::{ImportContext, ImportSession};
use crate::report::ImportReport;

/// Parse ArchiMate profile tag applications into elements.
pub fn parse_archimate_elements(
    ctx: &ImportContext<'_>,
    session: &mut ImportSession,
    report: &mut ImportReport,
) -> ElementParseResult {
    parse_profile_elements(ctx, session, report, Family::ArchiMate, None)
}
