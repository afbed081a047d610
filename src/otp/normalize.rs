//! Contact Normalization Module
//!
//! Canonicalizes phone numbers and emails before they are used as
//! store keys. Callers frequently request a code with one formatting
//! and verify with another (spaces, dashes, country-code presence), so
//! every store operation normalizes, not just writes.

// == Normalize ==
/// Reduces a phone number or email to its canonical key form.
///
/// - Emails (anything containing `@`) are trimmed and lowercased.
/// - A phone number is reduced to its digits; a bare 10-digit local
///   number gains the default country code as `+<cc><digits>`, and a
///   number already carrying that country code canonicalizes to the
///   same `+`-prefixed form.
/// - Anything else passes through trimmed. This is best-effort
///   canonicalization, not validation.
pub fn normalize(key: &str, default_country_code: &str) -> String {
    let trimmed = key.trim();

    if trimmed.contains('@') {
        return trimmed.to_lowercase();
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 {
        return format!("+{}{}", default_country_code, digits);
    }

    if digits.len() == 10 + default_country_code.len() && digits.starts_with(default_country_code) {
        return format!("+{}", digits);
    }

    trimmed.to_string()
}
