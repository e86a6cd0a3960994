//! CPF and CNPJ validation
//!
//! Validators are total: malformed or incomplete input yields `false`,
//! never an error. They are meant to run at form submission, while the
//! masks in [`crate::format`] run on every keystroke.

use serde::{Deserialize, Serialize};

use crate::format::digits::{all_same, normalize, values};
use crate::format::{CNPJ_LEN, CPF_LEN};

const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Which taxpayer document a digit string represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl DocumentKind {
    /// Picks the document kind from the normalized length: 11 is a CPF,
    /// 14 a CNPJ. Any other length is ambiguous and returns `None`.
    pub fn detect(value: &str) -> Option<Self> {
        match normalize(value).len() {
            CPF_LEN => Some(DocumentKind::Cpf),
            CNPJ_LEN => Some(DocumentKind::Cnpj),
            _ => None,
        }
    }

    pub fn expected_len(self) -> usize {
        match self {
            DocumentKind::Cpf => CPF_LEN,
            DocumentKind::Cnpj => CNPJ_LEN,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How strictly CNPJ numbers are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CnpjCheck {
    /// Length and non-repetition only. Accepts numbers whose check digits are wrong.
    #[default]
    FormatOnly,
    /// Also verifies both modulo-11 check digits.
    CheckDigits,
}

impl CnpjCheck {
    pub fn validate(self, value: &str) -> bool {
        match self {
            CnpjCheck::FormatOnly => is_valid_cnpj(value),
            CnpjCheck::CheckDigits => is_valid_cnpj_strict(value),
        }
    }
}

/// Modulo-11 reduction shared by the CPF digits: `11 - sum % 11`, with 10 and 11 folding to 0.
fn cpf_check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(d, w)| d * w)
        .sum();
    let digit = 11 - sum % 11;
    if digit >= 10 {
        0
    } else {
        digit
    }
}

fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let rest = sum % 11;
    if rest < 2 {
        0
    } else {
        11 - rest
    }
}

fn has_document_shape(digits: &str, len: usize) -> bool {
    digits.len() == len && !all_same(digits)
}

/// Validates a CPF: 11 digits, not all identical, both check digits correct.
pub fn is_valid_cpf(value: &str) -> bool {
    let digits = normalize(value);
    if !has_document_shape(&digits, CPF_LEN) {
        return false;
    }

    let d = values(&digits);
    if cpf_check_digit(&d[..9], 10) != d[9] {
        return false;
    }
    cpf_check_digit(&d[..10], 11) == d[10]
}

/// Validates the format of a CNPJ: 14 digits, not all identical.
///
/// Check digits are not verified here; use [`is_valid_cnpj_strict`] or
/// [`CnpjCheck::CheckDigits`] for that.
pub fn is_valid_cnpj(value: &str) -> bool {
    has_document_shape(&normalize(value), CNPJ_LEN)
}

/// Validates a CNPJ including its two modulo-11 check digits.
pub fn is_valid_cnpj_strict(value: &str) -> bool {
    let digits = normalize(value);
    if !has_document_shape(&digits, CNPJ_LEN) {
        return false;
    }

    let d = values(&digits);
    cnpj_check_digit(&d[..12], &CNPJ_FIRST_WEIGHTS) == d[12]
        && cnpj_check_digit(&d[..13], &CNPJ_SECOND_WEIGHTS) == d[13]
}

/// Dispatches on length: 11 digits as CPF, 14 as CNPJ (format only), anything else fails.
pub fn is_valid_cpf_cnpj(value: &str) -> bool {
    is_valid_cpf_cnpj_with(value, CnpjCheck::FormatOnly)
}

/// Same as [`is_valid_cpf_cnpj`] with a caller-chosen CNPJ policy.
pub fn is_valid_cpf_cnpj_with(value: &str, cnpj: CnpjCheck) -> bool {
    match DocumentKind::detect(value) {
        Some(DocumentKind::Cpf) => is_valid_cpf(value),
        Some(DocumentKind::Cnpj) => cnpj.validate(value),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_valid() {
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("111.444.777-35"));
        assert!(is_valid_cpf("529.982.247-25"));
    }

    #[test]
    fn test_cpf_second_digit_mismatch() {
        assert!(!is_valid_cpf("11144477736"));
    }

    #[test]
    fn test_cpf_first_digit_mismatch() {
        assert!(!is_valid_cpf("11144477745"));
    }

    #[test]
    fn test_cpf_rejects_repeated_digits() {
        for d in 0..=9 {
            let repeated = d.to_string().repeat(11);
            assert!(!is_valid_cpf(&repeated), "accepted {}", repeated);
        }
    }

    #[test]
    fn test_cpf_rejects_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("1114447773"));
        assert!(!is_valid_cpf("111444777350"));
    }

    #[test]
    fn test_cpf_check_digit_folds_ten_to_zero() {
        // 123.456.789-09: first digit sum % 11 == 1, which yields 10 and folds to 0
        assert!(is_valid_cpf("12345678909"));
    }

    #[test]
    fn test_cnpj_format_only() {
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        // Wrong check digits still pass the format check
        assert!(is_valid_cnpj("11222333000182"));
        assert!(!is_valid_cnpj("11111111111111"));
        assert!(!is_valid_cnpj("1122233300018"));
    }

    #[test]
    fn test_cnpj_strict() {
        assert!(is_valid_cnpj_strict("11222333000181"));
        assert!(is_valid_cnpj_strict("11.444.777/0001-61"));
        assert!(!is_valid_cnpj_strict("11222333000182"));
        assert!(!is_valid_cnpj_strict("11222333000191"));
        assert!(!is_valid_cnpj_strict("00000000000000"));
    }

    #[test]
    fn test_cpf_cnpj_dispatch() {
        assert!(is_valid_cpf_cnpj("111.444.777-35"));
        assert!(is_valid_cpf_cnpj("11.222.333/0001-81"));
        assert!(!is_valid_cpf_cnpj("11144477736"));
        assert!(!is_valid_cpf_cnpj("112223330001"));
        assert!(!is_valid_cpf_cnpj(""));
    }

    #[test]
    fn test_cpf_cnpj_with_policy() {
        assert!(is_valid_cpf_cnpj_with("11222333000182", CnpjCheck::FormatOnly));
        assert!(!is_valid_cpf_cnpj_with("11222333000182", CnpjCheck::CheckDigits));
        assert!(is_valid_cpf_cnpj_with("11144477735", CnpjCheck::CheckDigits));
    }

    #[test]
    fn test_document_kind_detect() {
        assert_eq!(DocumentKind::detect("111.444.777-35"), Some(DocumentKind::Cpf));
        assert_eq!(DocumentKind::detect("11.222.333/0001-81"), Some(DocumentKind::Cnpj));
        assert_eq!(DocumentKind::detect("123"), None);
    }

    #[test]
    fn test_cnpj_check_deserializes_snake_case() {
        let check: CnpjCheck = serde_json::from_str("\"check_digits\"").unwrap();
        assert_eq!(check, CnpjCheck::CheckDigits);
        assert_eq!(CnpjCheck::default(), CnpjCheck::FormatOnly);
    }
}
