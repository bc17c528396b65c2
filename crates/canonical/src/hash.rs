//! Identity hash for normalized node text.
//!
//! # Algorithm
//!
//! ```text
//! h = 0
//! for each UTF-16 code unit u of text:
//!     h = (h * 31 + u) wrapped to i32
//! ```
//!
//! This is the classic string hash; it is cheap, stable and compact enough to
//! travel inside a URL. Collisions are possible and are accepted as a rare
//! source of false positive matches: the resolver combines the hash with a
//! snippet and a sibling index, so a collision alone rarely decides a match.

/// Hash `text` with the 32-bit polynomial rule.
///
/// Callers are expected to pass text that already went through
/// [`normalize_text`](crate::normalize_text).
///
/// ```rust
/// use canonical::text_hash;
///
/// assert_eq!(text_hash(""), 0);
/// assert_eq!(text_hash("a"), 97);
/// assert_eq!(text_hash("ab"), 97 * 31 + 98);
/// ```
pub fn text_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}
