//! UTF-8-safe string helpers
//!
//! Company names on the register are full of umlauts and other multi-byte
//! characters, so byte slicing is never safe here.

/// Truncate `s` to at most `max_chars` characters (not bytes).
///
/// Never panics on multi-byte characters and never allocates.
///
/// # Examples
/// ```
/// # use handelsregister::utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Gasag AG", 5), "Gasag");
/// assert_eq!(safe_truncate_chars("Müller & Söhne", 6), "Müller");
/// assert_eq!(safe_truncate_chars("AG", 100), "AG");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Collapse every run of whitespace into a single space and trim both ends.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
