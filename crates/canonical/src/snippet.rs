//! Snippet truncation.

/// Maximum snippet length, in UTF-16 code units.
pub const SNIPPET_UTF16_LEN: usize = 32;

/// Returns the longest prefix of `text` that fits in [`SNIPPET_UTF16_LEN`]
/// UTF-16 code units.
///
/// A character whose surrogate pair would straddle the limit is dropped
/// entirely, so the snippet is always valid UTF-8 and always a prefix of the
/// text it came from.
///
/// ```rust
/// use canonical::snippet;
///
/// assert_eq!(snippet("short"), "short");
/// assert_eq!(snippet(&"a".repeat(40)).len(), 32);
/// ```
pub fn snippet(text: &str) -> &str {
    let mut units = 0usize;
    for (byte_idx, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > SNIPPET_UTF16_LEN {
            return &text[..byte_idx];
        }
    }
    text
}
