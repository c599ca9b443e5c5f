pub mod import_helpers;
pub mod xmi_fixtures;
