//! Workspace umbrella crate for anchorfp.
//!
//! This crate stitches the anchor engines together so a host can share a
//! handful of nodes through a URL and restore focus on them elsewhere with
//! two calls: [`share_url`] and [`restore_focus`].

pub mod config;

pub use canonical::{fingerprint_text, normalize_text, snippet, text_hash, TextFingerprint, SNIPPET_UTF16_LEN};
pub use fingerprint::{
    create_descriptor, create_descriptors, deserialize, fingerprint_token, resolve, resolve_all,
    resolve_token, serialize, try_deserialize, try_serialize, AnchorDescriptor, CandidateScore,
    CodecError, FingerprintError, Resolver, ScoringPolicy,
};
pub use focus::{divider_label, FocusConfig, FocusEngine, FocusError, FocusOutcome, FocusState};
pub use history::query::UrlPart;
pub use history::url::Url;
pub use history::{parse_location, Detached, HistoryEnv, HistoryError, MemoryHistory, NavigationEvent};
pub use router::{cleaned_url, detect_action, ActionKind, ActionRouter, SelectionMode, UrlAction, VOCABULARY};
pub use tree::{DocTree, DocumentTree, MarkableTree, MarkerSpec, NodeId, TreeError};
pub use viewstate::{
    decode_state, encode_state, parse_url, try_decode_state, update_url, StateCodec, StateError,
    ViewState, DEFAULT_PARAM,
};

pub use crate::config::{AnchorConfig, ConfigLoadError};

use tracing::{debug, info};

/// Attach a focus token for `nodes` to `state`, replacing any earlier focus.
///
/// Nodes that cannot be anchored (text nodes) are skipped. An empty
/// selection clears the focus entry.
pub fn attach_focus<T: DocumentTree>(
    tree: &T,
    root: T::Node,
    nodes: &[T::Node],
    mut state: ViewState,
) -> ViewState {
    let descriptors = create_descriptors(tree, nodes, root);
    state.focus = if descriptors.is_empty() {
        None
    } else {
        Some(vec![serialize(&descriptors)])
    };
    state
}

/// Build a shareable URL from `base` that focuses `nodes` when opened.
///
/// `state` carries whatever other view state should travel with the link.
pub fn share_url<T: DocumentTree>(
    tree: &T,
    root: T::Node,
    nodes: &[T::Node],
    base: &Url,
    state: ViewState,
    codec: &StateCodec,
) -> Url {
    let state = attach_focus(tree, root, nodes, state);
    let url = codec.embed(base, Some(&state));
    info!(
        nodes = nodes.len(),
        focused = state.focus_tokens().len(),
        url_len = url.as_str().len(),
        "share_url_built"
    );
    url
}

/// Read view state from the current location and focus the nodes it names.
///
/// Returns `None` when the location carries no usable view state or no
/// focus tokens; otherwise the outcome of applying every decoded
/// descriptor (which may still have resolved nothing).
pub fn restore_focus<T, E>(
    tree: &mut T,
    engine: &mut FocusEngine<T::Node>,
    env: &E,
    codec: &StateCodec,
) -> Option<FocusOutcome>
where
    T: MarkableTree,
    E: HistoryEnv + ?Sized,
{
    let state = codec.parse_url(env)?;
    if state.focus_tokens().is_empty() {
        debug!("restore_focus_no_tokens");
        return None;
    }
    let descriptors: Vec<AnchorDescriptor> = state
        .focus_tokens()
        .iter()
        .flat_map(|token| deserialize(token))
        .collect();
    Some(engine.apply_descriptors(tree, &descriptors))
}
