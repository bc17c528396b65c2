//! URL-safe descriptor tokens.
//!
//! ```text
//! token = base64url_nopad(utf8(json([descriptor, ...])))
//! ```
//!
//! The alphabet never needs percent-escaping in a query string. Decoding is
//! lenient about padding and about tokens that went through the standard
//! alphabet (`+`, `/`), since both show up when links are hand-edited or
//! re-encoded by chat clients.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use tracing::{debug, warn};

use crate::descriptor::AnchorDescriptor;
use crate::error::CodecError;

const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode descriptors into a token, propagating serializer failures.
pub fn try_serialize(descriptors: &[AnchorDescriptor]) -> Result<String, CodecError> {
    let json = serde_json::to_vec(descriptors)?;
    Ok(TOKEN_ENGINE.encode(json))
}

/// Encode descriptors into a token. Order is preserved.
pub fn serialize(descriptors: &[AnchorDescriptor]) -> String {
    match try_serialize(descriptors) {
        Ok(token) => token,
        Err(err) => {
            warn!(error = %err, count = descriptors.len(), "anchor_serialize_failure");
            String::new()
        }
    }
}

/// Decode a token, reporting why it was rejected.
pub fn try_deserialize(token: &str) -> Result<Vec<AnchorDescriptor>, CodecError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(CodecError::Empty);
    }
    let normalized: String = trimmed
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = TOKEN_ENGINE.decode(normalized.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decode a token; malformed input yields no descriptors.
pub fn deserialize(token: &str) -> Vec<AnchorDescriptor> {
    match try_deserialize(token) {
        Ok(descriptors) => descriptors,
        Err(err) => {
            debug!(error = %err, token_len = token.len(), "anchor_token_rejected");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<AnchorDescriptor> {
        vec![
            AnchorDescriptor {
                tag: "LI".into(),
                index: 2,
                parent_id: "features".into(),
                text_snippet: "Feature C (with unicode 🚀)".into(),
                text_hash: -127_466_550,
            },
            AnchorDescriptor {
                tag: "H2".into(),
                index: 0,
                parent_id: String::new(),
                text_snippet: "全角テキスト／スラッシュ＋プラス".into(),
                text_hash: 42,
            },
        ]
    }

    #[test]
    fn round_trip_preserves_order_and_unicode() {
        let descriptors = sample();
        let token = serialize(&descriptors);
        assert_eq!(deserialize(&token), descriptors);
    }

    #[test]
    fn token_is_query_safe() {
        let token = serialize(&sample());
        assert!(!token.is_empty());
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn empty_list_round_trips() {
        let token = serialize(&[]);
        assert_eq!(try_deserialize(&token).unwrap(), Vec::new());
    }

    #[test]
    fn padded_and_standard_alphabet_tokens_decode() {
        let descriptors = sample();
        let json = serde_json::to_vec(&descriptors).unwrap();
        let standard = base64::engine::general_purpose::STANDARD.encode(json);
        assert_eq!(deserialize(&standard), descriptors);
    }

    #[test]
    fn malformed_tokens_yield_nothing() {
        assert!(deserialize("").is_empty());
        assert!(deserialize("!!!not base64!!!").is_empty());
        // Valid base64, not JSON.
        assert!(deserialize(&TOKEN_ENGINE.encode(b"hello")).is_empty());
        // Valid JSON, wrong shape.
        assert!(deserialize(&TOKEN_ENGINE.encode(br#"{"tag":"P"}"#)).is_empty());

        assert!(matches!(try_deserialize("   "), Err(CodecError::Empty)));
        assert!(matches!(try_deserialize("%%%"), Err(CodecError::Base64(_))));
        assert!(matches!(
            try_deserialize(&TOKEN_ENGINE.encode(b"[1,2]")),
            Err(CodecError::Json(_))
        ));
    }
}
