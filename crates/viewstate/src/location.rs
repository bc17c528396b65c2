use history::query::{get_param, remove_all, set_param, UrlPart};
use history::url::Url;
use history::HistoryEnv;
use tracing::{debug, trace};

use crate::codec::{decode_state, encode_state};
use crate::error::StateError;
use crate::state::ViewState;

pub const DEFAULT_PARAM: &str = "view";

/// Reads and writes one query parameter holding an encoded [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCodec {
    param_name: String,
}

impl StateCodec {
    pub fn new(param_name: impl Into<String>) -> Result<Self, StateError> {
        let param_name = param_name.into();
        let valid = !param_name.is_empty()
            && param_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StateError::InvalidParamName(param_name));
        }
        Ok(Self { param_name })
    }

    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// State carried by `url`, if present and valid.
    pub fn extract(&self, url: &Url) -> Option<ViewState> {
        let query = UrlPart::Query.get(url)?;
        decode_state(&get_param(query, &self.param_name)?)
    }

    /// `url` with the parameter set to `state`, or removed for `None`.
    ///
    /// Other query segments keep their text and order.
    pub fn embed(&self, url: &Url, state: Option<&ViewState>) -> Url {
        let query = UrlPart::Query.get(url).unwrap_or("");
        let rewritten = match state {
            Some(state) => set_param(query, &self.param_name, &encode_state(state)),
            None => remove_all(query, &self.param_name),
        };
        let mut out = url.clone();
        UrlPart::Query.set(&mut out, &rewritten);
        out
    }

    /// Replace the current history entry so it carries `state`.
    ///
    /// Returns whether the location changed. Without a location this is a
    /// no-op.
    pub fn update_url<E: HistoryEnv + ?Sized>(&self, env: &mut E, state: Option<&ViewState>) -> bool {
        let Some(current) = env.location() else {
            debug!(param = %self.param_name, "view_state_update_skipped_no_location");
            return false;
        };
        let next = self.embed(&current, state);
        if next == current {
            return false;
        }
        trace!(url = %next, "view_state_url_replaced");
        env.replace(&next);
        true
    }

    /// State carried by the current location.
    pub fn parse_url<E: HistoryEnv + ?Sized>(&self, env: &E) -> Option<ViewState> {
        self.extract(&env.location()?)
    }
}

impl Default for StateCodec {
    fn default() -> Self {
        Self {
            param_name: DEFAULT_PARAM.to_string(),
        }
    }
}

/// [`StateCodec::update_url`] with the default parameter name.
pub fn update_url<E: HistoryEnv + ?Sized>(env: &mut E, state: Option<&ViewState>) -> bool {
    StateCodec::default().update_url(env, state)
}

/// [`StateCodec::parse_url`] with the default parameter name.
pub fn parse_url<E: HistoryEnv + ?Sized>(env: &E) -> Option<ViewState> {
    StateCodec::default().parse_url(env)
}
