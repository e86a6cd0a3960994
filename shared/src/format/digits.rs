// Digit extraction shared by every mask and validator

/// Keeps only the ASCII digits of `value`, in their original order.
pub fn normalize(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Removes any mask punctuation. Same as [`normalize`].
pub fn unmask(value: &str) -> String {
    normalize(value)
}

/// True when every digit is the same one ("00000000000", "111..."). False for empty input.
pub(crate) fn all_same(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    bytes
        .first()
        .is_some_and(|first| bytes.iter().all(|b| b == first))
}

/// Digit string to numeric values. Input must already be normalized.
pub(crate) fn values(digits: &str) -> Vec<u32> {
    digits.bytes().map(|b| u32::from(b - b'0')).collect()
}
