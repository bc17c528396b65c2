//! Whitespace normalization.
//!
//! [`normalize_text`] is the only normalization applied before hashing. It
//! deliberately does no case folding and no Unicode normalization: node text
//! is compared as rendered.
//!
//! # Examples
//!
//! ```rust
//! use canonical::normalize_text;
//!
//! assert_eq!(normalize_text("  hello \n\t world  "), "hello world");
//! ```

/// True for the characters matched by ECMAScript `\s`.
///
/// This differs from [`char::is_whitespace`]: U+FEFF is whitespace here,
/// U+0085 is not.
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Collapses runs of whitespace (see [`is_js_whitespace`]) to a single ASCII
/// space and trims both ends.
///
/// The function is idempotent: `normalize_text(normalize_text(s)) ==
/// normalize_text(s)`.
///
/// ```rust
/// use canonical::normalize_text;
///
/// assert_eq!(normalize_text("hello\r\n\r\nworld"), "hello world");
/// assert_eq!(normalize_text("hello\u{00A0}world"), "hello world");
/// assert_eq!(normalize_text("   \n\t   "), "");
/// ```
pub fn normalize_text(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split(is_js_whitespace).filter(|s| !s.is_empty()) {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(normalize_text("a \t b\n\nc"), "a b c");
        assert_eq!(normalize_text("\u{2003}wide\u{2003}space\u{2003}"), "wide space");
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        assert_eq!(normalize_text("\u{FEFF}Hello  world"), "Hello world");
        assert_eq!(normalize_text("a\u{FEFF}\u{FEFF}b\u{FEFF}"), "a b");
    }

    #[test]
    fn next_line_is_not_whitespace() {
        assert_eq!(normalize_text("a\u{0085}b"), "a\u{85}b");
        assert_eq!(normalize_text(" \u{0085} "), "\u{85}");
    }

    #[test]
    fn whitespace_set_boundaries() {
        for c in ['\u{000B}', '\u{000C}', '\u{1680}', '\u{200A}', '\u{202F}', '\u{205F}'] {
            assert!(is_js_whitespace(c), "{c:?}");
        }
        for c in ['\u{0085}', '\u{200B}', '\u{180E}', '\u{000E}'] {
            assert!(!is_js_whitespace(c), "{c:?}");
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "",
            "plain",
            "  leading",
            "trailing  ",
            "multi   inner\n\nlines",
            " 全角\u{3000}スペース ",
            "\u{FEFF}bom\u{0085}nel",
        ];
        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once, "not idempotent for {s:?}");
        }
    }
}
