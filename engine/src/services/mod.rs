// Services built on top of the shared validators
pub mod audit;

pub use audit::{AuditEntry, AuditReport, Issue, RegistryAuditor};
