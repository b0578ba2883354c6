//! Price field formatting: digits only, `,` every three digits from the right.

/// Strip every thousands separator.
pub fn remove_commas(input: &str) -> String {
    input.replace(',', "")
}

/// Whether `input` is acceptable as a price edit (digits and separators only).
/// The empty string is accepted so the field can be cleared.
pub fn is_price_input(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_digit() || c == ',')
}

/// Re-group a price with a separator every three digits from the right.
///
/// Existing separators are discarded first, so formatting is idempotent.
pub fn format_number(input: &str) -> String {
    let digits = remove_commas(input);
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
