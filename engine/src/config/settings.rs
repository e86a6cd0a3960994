// Audit settings, loaded from a JSON file or left at their defaults
use serde::Deserialize;
use shared::CnpjCheck;
use std::path::Path;

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AuditSettings {
    /// Field delimiter of the registration export. Must be a single ASCII character.
    pub delimiter: char,
    pub has_headers: bool,
    pub cnpj_check: CnpjCheck,
    pub require_email: bool,
    pub require_phone: bool,
}

impl Default for AuditSettings {
    fn default() -> Self {
        AuditSettings {
            delimiter: ';',
            has_headers: true,
            cnpj_check: CnpjCheck::FormatOnly,
            require_email: false,
            require_phone: false,
        }
    }
}

impl AuditSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings: AuditSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), ?settings, "Loaded audit settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "delimiter must be an ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects. Call [`validate`](Self::validate) first.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}
