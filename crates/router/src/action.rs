use history::query::{remove_all, segment_key, segments, UrlPart};
use history::url::Url;
use serde::Serialize;

/// How the share flow lets the user pick nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Element,
    Section,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    OpenModal,
    StartShare { mode: Option<SelectionMode> },
}

/// A trigger found in a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrlAction {
    #[serde(flatten)]
    pub kind: ActionKind,
    /// Literal token that matched.
    pub token: &'static str,
    pub part: UrlPart,
}

/// Recognised trigger tokens. Matching is exact; there is no versioning.
pub const VOCABULARY: &[(&str, ActionKind)] = &[
    ("open-settings", ActionKind::OpenModal),
    ("share", ActionKind::StartShare { mode: None }),
    (
        "share-element",
        ActionKind::StartShare {
            mode: Some(SelectionMode::Element),
        },
    ),
    (
        "share-section",
        ActionKind::StartShare {
            mode: Some(SelectionMode::Section),
        },
    ),
    (
        "share-range",
        ActionKind::StartShare {
            mode: Some(SelectionMode::Range),
        },
    ),
];

fn lookup(key: &str) -> Option<(&'static str, ActionKind)> {
    VOCABULARY.iter().copied().find(|(token, _)| *token == key)
}

/// First trigger in the query, else the first in the fragment.
pub fn detect_action(url: &Url) -> Option<UrlAction> {
    [UrlPart::Query, UrlPart::Fragment]
        .into_iter()
        .find_map(|part| {
            segments(part.get(url)?).find_map(|segment| {
                lookup(segment_key(segment)).map(|(token, kind)| UrlAction { kind, token, part })
            })
        })
}

/// `url` with `action`'s token removed from the part it was found in.
///
/// An emptied query or fragment loses its delimiter. Applying this twice
/// gives the same URL as applying it once.
pub fn cleaned_url(url: &Url, action: &UrlAction) -> Url {
    let mut out = url.clone();
    if let Some(text) = action.part.get(url) {
        let rest = remove_all(text, action.token);
        action.part.set(&mut out, &rest);
    }
    out
}
