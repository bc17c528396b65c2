use tracing::trace;
use url::Url;

use crate::error::HistoryError;
use crate::{parse_location, HistoryEnv, NavigationEvent};

/// In-memory session history with browser-like entry semantics.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Url>,
    cursor: usize,
    replacements: usize,
}

impl MemoryHistory {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            replacements: 0,
        }
    }

    pub fn parse(initial: &str) -> Result<Self, HistoryError> {
        Ok(Self::new(parse_location(initial)?))
    }

    /// Current entry.
    pub fn current(&self) -> &Url {
        &self.entries[self.cursor]
    }

    /// Number of entries in the session. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// How many times [`HistoryEnv::replace`] has rewritten an entry.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// Push a new entry, dropping any forward entries.
    ///
    /// Returns [`NavigationEvent::HashChange`] when only the fragment
    /// changed; any other navigation is a fresh load and emits nothing.
    pub fn navigate(&mut self, url: Url) -> Option<NavigationEvent> {
        let event = same_document(self.current(), &url).then_some(NavigationEvent::HashChange);
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url);
        self.cursor += 1;
        trace!(entries = self.entries.len(), ?event, "history_navigate");
        event
    }

    /// Navigate to the current URL with a new fragment (`None` clears it).
    pub fn set_hash(&mut self, fragment: Option<&str>) -> Option<NavigationEvent> {
        let mut url = self.current().clone();
        url.set_fragment(fragment);
        self.navigate(url)
    }

    /// Step back one entry.
    pub fn back(&mut self) -> Option<NavigationEvent> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(NavigationEvent::PopState)
    }

    /// Step forward one entry.
    pub fn forward(&mut self) -> Option<NavigationEvent> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(NavigationEvent::PopState)
    }
}

fn same_document(a: &Url, b: &Url) -> bool {
    a[..url::Position::AfterQuery] == b[..url::Position::AfterQuery] && a.fragment() != b.fragment()
}

impl HistoryEnv for MemoryHistory {
    fn location(&self) -> Option<Url> {
        Some(self.current().clone())
    }

    fn replace(&mut self, url: &Url) {
        trace!(from = %self.entries[self.cursor], to = %url, "history_replace");
        self.entries[self.cursor] = url.clone();
        self.replacements += 1;
    }
}
