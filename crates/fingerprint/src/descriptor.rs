//! Descriptor type and capture.
//!
//! The descriptor schema is a public wire contract: field names are the
//! camelCase names links have always carried, and `textSnippet`/`textHash`
//! are derived with the frozen rules from the `canonical` crate.

use canonical::fingerprint_text;
use serde::{Deserialize, Deserializer, Serialize};
use tree::DocumentTree;

use crate::codec::serialize;

/// Portable fingerprint of one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorDescriptor {
    /// Uppercase tag name.
    pub tag: String,
    /// Rank among same-tag element siblings at capture time.
    pub index: u32,
    /// `id` of the nearest identified ancestor; empty means "whole root".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parent_id: String,
    /// First 32 UTF-16 units of the normalized text.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text_snippet: String,
    /// Polynomial hash of the full normalized text.
    pub text_hash: i32,
}

impl AnchorDescriptor {
    /// True when the descriptor names no ancestor scope.
    pub fn is_unscoped(&self) -> bool {
        self.parent_id.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fingerprint `node` relative to `root`.
///
/// Returns `None` for non-element nodes, which cannot be anchored.
pub fn create_descriptor<T: DocumentTree>(
    tree: &T,
    node: T::Node,
    root: T::Node,
) -> Option<AnchorDescriptor> {
    let tag = tree.tag(node)?.to_ascii_uppercase();

    let parent_id = tree
        .ancestors_within(node, root)
        .into_iter()
        .find_map(|ancestor| tree.element_id(ancestor).filter(|id| !id.is_empty()))
        .unwrap_or_default()
        .to_string();

    let text = fingerprint_text(&tree.text_content(node));

    Some(AnchorDescriptor {
        tag,
        index: tree.same_tag_rank(node) as u32,
        parent_id,
        text_snippet: text.snippet,
        text_hash: text.hash,
    })
}

/// Fingerprint each node in order, skipping nodes that cannot be anchored.
pub fn create_descriptors<T: DocumentTree>(
    tree: &T,
    nodes: &[T::Node],
    root: T::Node,
) -> Vec<AnchorDescriptor> {
    nodes
        .iter()
        .filter_map(|node| create_descriptor(tree, *node, root))
        .collect()
}

/// Fingerprint `nodes` and serialize the result into one URL-safe token.
pub fn fingerprint_token<T: DocumentTree>(tree: &T, nodes: &[T::Node], root: T::Node) -> String {
    serialize(&create_descriptors(tree, nodes, root))
}
