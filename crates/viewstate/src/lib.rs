//! Compact view state for shareable URLs.
//!
//! [`ViewState`] bundles shown/peeked toggles, selected tabs and focused
//! anchor tokens. [`encode_state`] turns it into a short base64url token;
//! [`StateCodec`] keeps that token in one query parameter (`view` by
//! default) using history replacement, so no back-button entries pile up.

mod codec;
mod error;
mod location;
mod state;

pub use crate::codec::{decode_state, encode_state, try_decode_state};
pub use crate::error::StateError;
pub use crate::location::{parse_url, update_url, StateCodec, DEFAULT_PARAM};
pub use crate::state::ViewState;
