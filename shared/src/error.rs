use thiserror::Error;

use crate::validation::DocumentKind;

/// Why a value could not be turned into one of the typed models.
///
/// The plain validator functions never produce this; it only comes out of
/// the `parse` constructors in [`crate::models`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("{kind} must have {expected} digits, found {found}")]
    InvalidLength {
        kind: DocumentKind,
        expected: usize,
        found: usize,
    },

    #[error("Document number must have 11 (CPF) or 14 (CNPJ) digits, found {0}")]
    UnknownDocument(usize),

    #[error("{0} cannot be a single repeated digit")]
    RepeatedDigits(DocumentKind),

    #[error("{0} check digits do not match")]
    CheckDigitMismatch(DocumentKind),

    #[error("Invalid e-mail address: '{0}'")]
    InvalidEmail(String),

    #[error("Phone number must have 10 or 11 digits, found {0}")]
    InvalidPhone(usize),
}
