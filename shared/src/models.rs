//! Validated value objects for customer registration data
//!
//! Each type stores digits only (or the normalized address, for e-mail),
//! displays with its mask, and serializes as a plain string. Building one
//! goes through the same checks as the free functions in
//! [`crate::validation`], so a `Cpf` that exists is a valid CPF.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::email::{is_valid_email, normalize_email};
use crate::error::DocumentError;
use crate::format::digits::all_same;
use crate::format::{mask_cnpj, mask_cpf, mask_phone, normalize, CNPJ_LEN, CPF_LEN};
use crate::validation::{is_valid_cnpj_strict, is_valid_cpf, DocumentKind};

fn checked_digits(value: &str, kind: DocumentKind) -> Result<String, DocumentError> {
    let digits = normalize(value);
    let expected = kind.expected_len();
    if digits.len() != expected {
        return Err(DocumentError::InvalidLength {
            kind,
            expected,
            found: digits.len(),
        });
    }
    if all_same(&digits) {
        return Err(DocumentError::RepeatedDigits(kind));
    }
    Ok(digits)
}

// ============================================================================
// Cpf
// ============================================================================

/// An individual taxpayer number with verified check digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Parses a CPF, masked or not.
    ///
    /// # Errors
    ///
    /// - `InvalidLength` unless there are exactly 11 digits
    /// - `RepeatedDigits` for values like `000.000.000-00`
    /// - `CheckDigitMismatch` when either check digit is wrong
    pub fn parse(value: &str) -> Result<Self, DocumentError> {
        let digits = checked_digits(value, DocumentKind::Cpf)?;
        if !is_valid_cpf(&digits) {
            return Err(DocumentError::CheckDigitMismatch(DocumentKind::Cpf));
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_cpf(&self.0)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl TryFrom<String> for Cpf {
    type Error = DocumentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> String {
        cpf.0
    }
}

// ============================================================================
// Cnpj
// ============================================================================

/// A company taxpayer number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cnpj(String);

impl Cnpj {
    /// Parses a CNPJ checking length and repetition only, matching
    /// [`crate::validation::is_valid_cnpj`].
    pub fn parse(value: &str) -> Result<Self, DocumentError> {
        checked_digits(value, DocumentKind::Cnpj).map(Self)
    }

    /// Like [`Cnpj::parse`] but also verifies the check digits.
    pub fn parse_strict(value: &str) -> Result<Self, DocumentError> {
        let digits = checked_digits(value, DocumentKind::Cnpj)?;
        if !is_valid_cnpj_strict(&digits) {
            return Err(DocumentError::CheckDigitMismatch(DocumentKind::Cnpj));
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_cnpj(&self.0)
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl TryFrom<String> for Cnpj {
    type Error = DocumentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Cnpj> for String {
    fn from(cnpj: Cnpj) -> String {
        cnpj.0
    }
}

// ============================================================================
// TaxId
// ============================================================================

/// Either kind of taxpayer number, chosen by digit count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaxId {
    Cpf(Cpf),
    Cnpj(Cnpj),
}

impl TaxId {
    pub fn parse(value: &str) -> Result<Self, DocumentError> {
        match normalize(value).len() {
            CPF_LEN => Cpf::parse(value).map(TaxId::Cpf),
            CNPJ_LEN => Cnpj::parse(value).map(TaxId::Cnpj),
            other => Err(DocumentError::UnknownDocument(other)),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            TaxId::Cpf(_) => DocumentKind::Cpf,
            TaxId::Cnpj(_) => DocumentKind::Cnpj,
        }
    }

    pub fn digits(&self) -> &str {
        match self {
            TaxId::Cpf(cpf) => cpf.digits(),
            TaxId::Cnpj(cnpj) => cnpj.digits(),
        }
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxId::Cpf(cpf) => fmt::Display::fmt(cpf, f),
            TaxId::Cnpj(cnpj) => fmt::Display::fmt(cnpj, f),
        }
    }
}

impl TryFrom<String> for TaxId {
    type Error = DocumentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TaxId> for String {
    fn from(id: TaxId) -> String {
        id.digits().to_string()
    }
}

// ============================================================================
// Phone
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneKind {
    Landline,
    Mobile,
}

/// A phone number with area code: 10 digits (landline) or 11 (mobile).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn parse(value: &str) -> Result<Self, DocumentError> {
        let digits = normalize(value);
        match digits.len() {
            10 | 11 => Ok(Self(digits)),
            other => Err(DocumentError::InvalidPhone(other)),
        }
    }

    /// Digit count is the only signal; area codes are not checked.
    pub fn kind(&self) -> PhoneKind {
        if self.0.len() == 11 {
            PhoneKind::Mobile
        } else {
            PhoneKind::Landline
        }
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_phone(&self.0)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl TryFrom<String> for Phone {
    type Error = DocumentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> String {
        phone.0
    }
}

// ============================================================================
// Email
// ============================================================================

/// A trimmed, lowercased e-mail address that passed the structural check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self, DocumentError> {
        let normalized = normalize_email(value);
        if !is_valid_email(&normalized) {
            return Err(DocumentError::InvalidEmail(value.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DocumentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> String {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_parse_and_display() {
        let cpf = Cpf::parse("111.444.777-35").unwrap();
        assert_eq!(cpf.digits(), "11144477735");
        assert_eq!(cpf.to_string(), "111.444.777-35");
    }

    #[test]
    fn test_cpf_parse_errors() {
        assert_eq!(
            Cpf::parse("1114447773"),
            Err(DocumentError::InvalidLength {
                kind: DocumentKind::Cpf,
                expected: 11,
                found: 10
            })
        );
        assert_eq!(
            Cpf::parse("22222222222"),
            Err(DocumentError::RepeatedDigits(DocumentKind::Cpf))
        );
        assert_eq!(
            Cpf::parse("11144477736"),
            Err(DocumentError::CheckDigitMismatch(DocumentKind::Cpf))
        );
    }

    #[test]
    fn test_cnpj_parse_format_only_vs_strict() {
        assert!(Cnpj::parse("11222333000182").is_ok());
        assert_eq!(
            Cnpj::parse_strict("11222333000182"),
            Err(DocumentError::CheckDigitMismatch(DocumentKind::Cnpj))
        );
        let cnpj = Cnpj::parse_strict("11222333000181").unwrap();
        assert_eq!(cnpj.to_string(), "11.222.333/0001-81");
    }

    #[test]
    fn test_tax_id_dispatch() {
        let cpf = TaxId::parse("11144477735").unwrap();
        assert_eq!(cpf.kind(), DocumentKind::Cpf);
        let cnpj = TaxId::parse("11.222.333/0001-81").unwrap();
        assert_eq!(cnpj.kind(), DocumentKind::Cnpj);
        assert_eq!(cnpj.to_string(), "11.222.333/0001-81");
        assert_eq!(TaxId::parse("123"), Err(DocumentError::UnknownDocument(3)));
    }

    #[test]
    fn test_phone_kind() {
        let mobile = Phone::parse("(11) 98765-4321").unwrap();
        assert_eq!(mobile.kind(), PhoneKind::Mobile);
        let landline = Phone::parse("1133334444").unwrap();
        assert_eq!(landline.kind(), PhoneKind::Landline);
        assert_eq!(landline.to_string(), "(11) 3333-4444");
        assert_eq!(Phone::parse("3333-4444"), Err(DocumentError::InvalidPhone(8)));
    }

    #[test]
    fn test_email_parse_normalizes() {
        let email = Email::parse("  A@B.COM  ").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
        assert!(Email::parse("invalid").is_err());
    }

    #[test]
    fn test_serde_round_trip_uses_digits() {
        let id = TaxId::parse("111.444.777-35").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"11144477735\"");
        let back: TaxId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_serde_rejects_invalid_document() {
        let result: Result<Cpf, _> = serde_json::from_str("\"11144477736\"");
        assert!(result.is_err());
    }
}
