//! Location and history access for the URL-facing components.
//!
//! Nothing here reaches for a global `window`. Callers hand the state codec
//! and the action router a [`HistoryEnv`]; headless hosts use
//! [`MemoryHistory`], and code running where no location exists at all uses
//! [`Detached`], which turns every URL operation into a no-op.
//!
//! The [`query`] module edits query strings and fragments segment by
//! segment, leaving every segment it was not asked to touch byte-for-byte
//! intact.

mod error;
mod memory;
pub mod query;

use serde::{Deserialize, Serialize};
use url::Url;

pub use crate::error::HistoryError;
pub use crate::memory::MemoryHistory;

pub use url;

/// Navigation notifications a router reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationEvent {
    /// Back/forward traversal between entries.
    PopState,
    /// Fragment-only change of the current location.
    HashChange,
}

/// Read the current location and rewrite it without adding an entry.
pub trait HistoryEnv {
    /// Current location, or `None` when there is no browsing context.
    fn location(&self) -> Option<Url>;

    /// Replace the current entry's URL. Never pushes.
    fn replace(&mut self, url: &Url);

    fn is_available(&self) -> bool {
        self.location().is_some()
    }
}

impl<E: HistoryEnv + ?Sized> HistoryEnv for &mut E {
    fn location(&self) -> Option<Url> {
        (**self).location()
    }

    fn replace(&mut self, url: &Url) {
        (**self).replace(url)
    }
}

/// Environment with no location at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detached;

impl HistoryEnv for Detached {
    fn location(&self) -> Option<Url> {
        None
    }

    fn replace(&mut self, _url: &Url) {}
}

/// Parse an absolute location.
pub fn parse_location(input: &str) -> Result<Url, HistoryError> {
    Url::parse(input).map_err(|source| HistoryError::InvalidUrl {
        input: input.to_string(),
        source,
    })
}
