// Engine library root
// Loads customer registration exports and audits them with the shared validators.

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use config::AuditSettings;
pub use data::csv_parser::RegistryCsvParser;
pub use error::EngineError;
pub use services::{AuditReport, RegistryAuditor};
pub use session::{LogoutHandler, LogoutReason, SessionController, SessionState};

use std::path::Path;

/// Loads `csv_path` and audits every record in it.
pub fn audit_file(csv_path: impl AsRef<Path>, settings: AuditSettings) -> Result<AuditReport, EngineError> {
    let records = RegistryCsvParser::load_records(csv_path, &settings)?;
    Ok(RegistryAuditor::new(settings).audit(&records))
}
