//! Anchor canonical text layer.
//!
//! Every node fingerprint is built from the node's text content, so the rules
//! in this crate decide whether a link shared today still resolves next year.
//! They are frozen: changing the normalization or the hash silently breaks
//! every descriptor produced by an earlier build.
//!
//! ## What we do
//!
//! - Whitespace normalization (runs collapse to one ASCII space, edges trimmed)
//! - A 32-bit signed polynomial hash over UTF-16 code units
//! - Snippet truncation to a fixed number of UTF-16 code units
//!
//! ## Pure function guarantee
//!
//! No I/O, no locale, no allocation-order dependence. The same text yields the
//! same [`TextFingerprint`] on every platform.
//!
//! ## Why UTF-16
//!
//! Descriptors are exchanged with pages that measure strings in UTF-16 code
//! units. Hashing and truncating in the same unit keeps `textHash` and
//! `textSnippet` byte-for-byte compatible with descriptors minted there.

mod hash;
mod snippet;
mod whitespace;

pub use crate::hash::text_hash;
pub use crate::snippet::{snippet, SNIPPET_UTF16_LEN};
pub use crate::whitespace::{is_js_whitespace, normalize_text};

/// Normalized text plus the two derived identity signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFingerprint {
    /// Whitespace-normalized text.
    pub normalized: String,
    /// Leading [`SNIPPET_UTF16_LEN`] UTF-16 units of `normalized`.
    pub snippet: String,
    /// [`text_hash`] of `normalized`.
    pub hash: i32,
}

/// Normalize `raw` and derive its snippet and hash in one pass.
pub fn fingerprint_text(raw: &str) -> TextFingerprint {
    let normalized = normalize_text(raw);
    let snippet = snippet(&normalized).to_string();
    let hash = text_hash(&normalized);
    TextFingerprint {
        normalized,
        snippet,
        hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_text_matches_reference_descriptor() {
        let fp = fingerprint_text("\n   Feature C (with unicode 🚀)\n  ");
        assert_eq!(fp.normalized, "Feature C (with unicode 🚀)");
        assert_eq!(fp.snippet, "Feature C (with unicode 🚀)");
        assert_eq!(fp.hash, -127_466_550);
    }

    #[test]
    fn fingerprint_text_truncates_long_content() {
        let fp = fingerprint_text("The quick brown fox jumps over the lazy dog");
        assert_eq!(fp.snippet, "The quick brown fox jumps over t");
        assert_eq!(fp.snippet.encode_utf16().count(), SNIPPET_UTF16_LEN);
        assert_eq!(fp.hash, text_hash("The quick brown fox jumps over the lazy dog"));
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let texts = ["", "hello world", "こんにちは世界", "emoji \u{1f600}"];

        for text in texts {
            assert_eq!(fingerprint_text(text), fingerprint_text(text));
        }
    }

    #[test]
    fn empty_text_has_zero_hash() {
        let fp = fingerprint_text("   \t\n ");
        assert_eq!(fp.normalized, "");
        assert_eq!(fp.snippet, "");
        assert_eq!(fp.hash, 0);
    }
}
