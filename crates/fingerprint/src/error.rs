use thiserror::Error;

/// Errors produced while configuring the fingerprint engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),
}

/// Reasons a serialized descriptor token could not be decoded.
///
/// [`deserialize`](crate::deserialize) maps all of these to an empty list;
/// [`try_deserialize`](crate::try_deserialize) surfaces them for logging.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("token is empty")]
    Empty,
    #[error("token is not valid url-safe base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not a descriptor list: {0}")]
    Json(#[from] serde_json::Error),
}
