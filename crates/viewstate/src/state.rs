use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

/// Externalisable view state.
///
/// Wire keys are single letters and empty collections are omitted, so an
/// untouched page encodes to `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Toggles forced open.
    #[serde(rename = "s", default, skip_serializing_if = "BTreeSet::is_empty")]
    pub shown_toggles: BTreeSet<String>,
    /// Toggles shown in peek mode.
    #[serde(rename = "p", default, skip_serializing_if = "BTreeSet::is_empty")]
    pub peek_toggles: BTreeSet<String>,
    /// Selected tab per tab group.
    #[serde(rename = "t", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tabs: BTreeMap<String, String>,
    /// Serialized anchor tokens naming focused nodes.
    #[serde(
        rename = "f",
        default,
        skip_serializing_if = "focus_is_empty",
        deserialize_with = "deserialize_focus"
    )]
    pub focus: Option<Vec<String>>,
}

fn focus_is_empty(focus: &Option<Vec<String>>) -> bool {
    focus.as_ref().map_or(true, Vec::is_empty)
}

/// `null` and `[]` both decode to `None`.
fn deserialize_focus<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.filter(|tokens| !tokens.is_empty()))
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shown(mut self, id: impl Into<String>) -> Self {
        self.shown_toggles.insert(id.into());
        self
    }

    pub fn with_peek(mut self, id: impl Into<String>) -> Self {
        self.peek_toggles.insert(id.into());
        self
    }

    pub fn with_tab(mut self, group: impl Into<String>, tab: impl Into<String>) -> Self {
        self.tabs.insert(group.into(), tab.into());
        self
    }

    pub fn with_focus(mut self, token: impl Into<String>) -> Self {
        self.focus.get_or_insert_with(Vec::new).push(token.into());
        self
    }

    /// Focus tokens, empty when none are set.
    pub fn focus_tokens(&self) -> &[String] {
        self.focus.as_deref().unwrap_or(&[])
    }

    /// True when the state carries nothing worth sharing.
    pub fn is_empty(&self) -> bool {
        self.shown_toggles.is_empty()
            && self.peek_toggles.is_empty()
            && self.tabs.is_empty()
            && focus_is_empty(&self.focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collections_are_omitted() {
        let json = serde_json::to_string(&ViewState::new()).unwrap();
        assert_eq!(json, "{}");

        let state = ViewState::new().with_tab("lang", "rust");
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"t":{"lang":"rust"}}"#);
    }

    #[test]
    fn empty_focus_list_is_omitted() {
        let state = ViewState {
            focus: Some(Vec::new()),
            ..ViewState::default()
        };
        assert!(state.is_empty());
        assert_eq!(serde_json::to_string(&state).unwrap(), "{}");
    }

    #[test]
    fn sets_serialize_sorted() {
        let state = ViewState::new().with_shown("b").with_shown("a").with_shown("b");
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"s":["a","b"]}"#);
    }

    #[test]
    fn builders_accumulate_focus() {
        let state = ViewState::new().with_focus("tok1").with_focus("tok2");
        assert_eq!(state.focus_tokens(), ["tok1".to_string(), "tok2".to_string()]);
        assert!(ViewState::new().focus_tokens().is_empty());
    }
}
