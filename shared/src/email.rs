// Structural e-mail check and normalization. Not an RFC 5322 validator.
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern"));

/// Accepts `local@domain.tld` where no part contains whitespace or a second `@`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Trims surrounding whitespace and lowercases the address.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
