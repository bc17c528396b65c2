use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state token is empty")]
    Empty,
    #[error("state token is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("state payload has the wrong shape: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid state parameter name {0:?}")]
    InvalidParamName(String),
}
