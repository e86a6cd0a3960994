// Progressive input masks for CPF, CNPJ and phone numbers.
// Every mask normalizes first, so feeding an already masked value back in is safe.
use super::digits::normalize;

pub const CPF_LEN: usize = 11;
pub const CNPJ_LEN: usize = 14;
pub const PHONE_MAX_LEN: usize = 11;

/// Digit positions where a separator is inserted before the digit at that index.
const CPF_BREAKS: [(usize, char); 3] = [(3, '.'), (6, '.'), (9, '-')];
const CNPJ_BREAKS: [(usize, char); 4] = [(2, '.'), (5, '.'), (8, '/'), (12, '-')];

fn capped(value: &str, max: usize) -> String {
    let mut digits = normalize(value);
    digits.truncate(max);
    digits
}

/// Inserts each separator only once a digit exists after its boundary,
/// so an incomplete value never ends with a dangling separator.
fn apply_breaks(digits: &str, breaks: &[(usize, char)]) -> String {
    let mut out = String::with_capacity(digits.len() + breaks.len());
    for (i, c) in digits.chars().enumerate() {
        if let Some((_, sep)) = breaks.iter().find(|(at, _)| *at == i) {
            out.push(*sep);
        }
        out.push(c);
    }
    out
}

/// Formats up to 11 digits as `ddd.ddd.ddd-dd`.
pub fn mask_cpf(value: &str) -> String {
    apply_breaks(&capped(value, CPF_LEN), &CPF_BREAKS)
}

/// Formats up to 14 digits as `dd.ddd.ddd/dddd-dd`.
pub fn mask_cnpj(value: &str) -> String {
    apply_breaks(&capped(value, CNPJ_LEN), &CNPJ_BREAKS)
}

/// CPF layout while the value fits in 11 digits, CNPJ layout beyond that.
pub fn mask_cpf_cnpj(value: &str) -> String {
    if normalize(value).len() <= CPF_LEN {
        mask_cpf(value)
    } else {
        mask_cnpj(value)
    }
}

/// Formats a phone number with area code.
///
/// Ten digits are laid out as a landline `(dd) dddd-dddd`, eleven as a
/// mobile `(dd) ddddd-dddd`. Shorter values are revealed progressively.
pub fn mask_phone(value: &str) -> String {
    let digits = capped(value, PHONE_MAX_LEN);
    let len = digits.len();

    match len {
        0 => String::new(),
        1 => format!("({}", digits),
        2 => format!("({})", digits),
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        7..=10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}
