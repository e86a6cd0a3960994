//! Registration audit
//!
//! Runs every loaded customer record through the same validators the
//! registration form uses at submission time and collects what is wrong
//! with each one. Nothing here fails: bad data becomes an [`Issue`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    is_valid_cpf_cnpj_with, mask_cpf_cnpj, normalize, normalize_email, CnpjCheck, Cnpj, Cpf,
    DocumentError, DocumentKind, Email, Phone,
};
use std::collections::HashMap;

use crate::config::AuditSettings;
use crate::data::csv_parser::brazilian_format;
use crate::models::CustomerRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Issue {
    EmptyName,
    InvalidDocument { reason: String },
    DuplicateDocument { first_line: usize },
    MissingEmail,
    InvalidEmail,
    MissingPhone,
    InvalidPhone { digits: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub line: usize,
    pub name: String,
    /// Document as the form would display it.
    pub document: String,
    pub kind: Option<DocumentKind>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Registration date as `dd/mm/yyyy`.
    pub registered_on: Option<String>,
    pub issues: Vec<Issue>,
}

impl AuditEntry {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub cnpj_check: CnpjCheck,
    pub total: usize,
    pub valid: usize,
    pub entries: Vec<AuditEntry>,
}

impl AuditReport {
    pub fn invalid(&self) -> usize {
        self.total - self.valid
    }

    pub fn invalid_entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(|entry| !entry.is_valid())
    }
}

pub struct RegistryAuditor {
    settings: AuditSettings,
}

impl RegistryAuditor {
    pub fn new(settings: AuditSettings) -> Self {
        RegistryAuditor { settings }
    }

    pub fn audit(&self, records: &[CustomerRecord]) -> AuditReport {
        // Normalized document -> first line it appeared on
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut entries = Vec::with_capacity(records.len());

        for record in records {
            let entry = self.audit_record(record, &mut seen);
            if entry.is_valid() {
                tracing::debug!(line = entry.line, document = %entry.document, "Record passed audit");
            } else {
                tracing::warn!(line = entry.line, issues = ?entry.issues, "Record failed audit");
            }
            entries.push(entry);
        }

        let valid = entries.iter().filter(|entry| entry.is_valid()).count();
        tracing::info!(
            total = entries.len(),
            valid,
            cnpj_check = ?self.settings.cnpj_check,
            "Registration audit finished"
        );

        AuditReport {
            generated_at: Utc::now(),
            cnpj_check: self.settings.cnpj_check,
            total: entries.len(),
            valid,
            entries,
        }
    }

    fn audit_record(&self, record: &CustomerRecord, seen: &mut HashMap<String, usize>) -> AuditEntry {
        let mut issues = Vec::new();

        if record.name.trim().is_empty() {
            issues.push(Issue::EmptyName);
        }

        let digits = normalize(&record.document);
        let kind = DocumentKind::detect(&digits);
        if !is_valid_cpf_cnpj_with(&digits, self.settings.cnpj_check) {
            issues.push(Issue::InvalidDocument {
                reason: document_rejection(&digits, self.settings.cnpj_check).to_string(),
            });
        }
        if !digits.is_empty() {
            match seen.get(&digits) {
                Some(first_line) => issues.push(Issue::DuplicateDocument {
                    first_line: *first_line,
                }),
                None => {
                    seen.insert(digits.clone(), record.line);
                }
            }
        }

        let email = record.email.as_deref().map(normalize_email);
        match &email {
            Some(address) => {
                if Email::parse(address).is_err() {
                    issues.push(Issue::InvalidEmail);
                }
            }
            None if self.settings.require_email => issues.push(Issue::MissingEmail),
            None => {}
        }

        let phone = match record.phone.as_deref() {
            Some(raw) => match Phone::parse(raw) {
                Ok(phone) => Some(phone.masked()),
                Err(_) => {
                    issues.push(Issue::InvalidPhone {
                        digits: normalize(raw).len(),
                    });
                    Some(raw.to_string())
                }
            },
            None => {
                if self.settings.require_phone {
                    issues.push(Issue::MissingPhone);
                }
                None
            }
        };

        AuditEntry {
            line: record.line,
            name: record.name.clone(),
            document: mask_cpf_cnpj(&digits),
            kind,
            email,
            phone,
            registered_on: record.registered_on.map(brazilian_format::format_date),
            issues,
        }
    }
}

// Only called for documents the validators already rejected
fn document_rejection(digits: &str, cnpj_check: CnpjCheck) -> DocumentError {
    let parsed = match DocumentKind::detect(digits) {
        Some(DocumentKind::Cpf) => Cpf::parse(digits).map(|_| ()),
        Some(DocumentKind::Cnpj) => match cnpj_check {
            CnpjCheck::FormatOnly => Cnpj::parse(digits).map(|_| ()),
            CnpjCheck::CheckDigits => Cnpj::parse_strict(digits).map(|_| ()),
        },
        None => Err(DocumentError::UnknownDocument(digits.len())),
    };
    match parsed {
        Err(err) => err,
        Ok(()) => DocumentError::UnknownDocument(digits.len()),
    }
}
