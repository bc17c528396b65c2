use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FocusError {
    #[error("invalid focus config: {0}")]
    InvalidConfig(String),
}
