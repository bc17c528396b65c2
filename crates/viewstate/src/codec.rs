use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use tracing::debug;

use crate::error::StateError;
use crate::state::ViewState;

const STATE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode `state` as a query-safe token.
pub fn encode_state(state: &ViewState) -> String {
    // String sets and string-keyed maps always serialize.
    let json = serde_json::to_vec(state).unwrap_or_else(|_| b"{}".to_vec());
    STATE_ENGINE.encode(json)
}

/// Decode a token, reporting why it was rejected.
pub fn try_decode_state(token: &str) -> Result<ViewState, StateError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(StateError::Empty);
    }
    let bytes = STATE_ENGINE.decode(token)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decode a token; anything malformed is `None`.
pub fn decode_state(token: &str) -> Option<ViewState> {
    match try_decode_state(token) {
        Ok(state) => Some(state),
        Err(err) => {
            debug!(error = %err, token_len = token.len(), "view_state_rejected");
            None
        }
    }
}
