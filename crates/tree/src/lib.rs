//! Document tree abstraction used by the anchor engines.
//!
//! The fingerprint and focus engines never touch a concrete DOM. They work
//! against two traits:
//!
//! - [`DocumentTree`]: read access (tag, parent, children, `id`, text).
//! - [`MarkableTree`]: the handful of writes focus mode needs (classes,
//!   marker insertion, marker removal).
//!
//! [`DocTree`] is the in-memory arena implementation used by tests, the CLI
//! and headless hosts. A browser binding implements the same traits over its
//! live document.

mod arena;
mod error;

use std::fmt::Debug;
use std::hash::Hash;

pub use crate::arena::{DocTree, NodeId};
pub use crate::error::TreeError;

/// Read-only view of a document tree.
///
/// Only element nodes carry a tag; text nodes return `None` from
/// [`DocumentTree::tag`] and have no children.
pub trait DocumentTree {
    type Node: Copy + Eq + Hash + Debug;

    /// Uppercase tag name for elements, `None` for text nodes.
    fn tag(&self, node: Self::Node) -> Option<&str>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Child nodes in document order, text nodes included.
    fn children(&self, node: Self::Node) -> &[Self::Node];

    /// Value of the `id` attribute, if present.
    fn element_id(&self, node: Self::Node) -> Option<&str>;

    /// Concatenated text of all descendant text nodes, in document order.
    ///
    /// Implementations skip synthetic markers inserted through
    /// [`MarkableTree::insert_marker`] so that focus mode never changes the
    /// text an anchor is computed from.
    fn text_content(&self, node: Self::Node) -> String;

    fn is_element(&self, node: Self::Node) -> bool {
        self.tag(node).is_some()
    }

    /// True for synthetic markers. They are invisible to sibling ranking.
    fn is_marker(&self, _node: Self::Node) -> bool {
        false
    }

    /// Element children only.
    fn element_children(&self, node: Self::Node) -> Vec<Self::Node> {
        self.children(node)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    /// Zero-based rank of `node` among element siblings sharing its tag.
    /// Returns 0 for detached nodes and for the root.
    fn same_tag_rank(&self, node: Self::Node) -> usize {
        let (Some(tag), Some(parent)) = (self.tag(node), self.parent(node)) else {
            return 0;
        };
        self.children(parent)
            .iter()
            .copied()
            .filter(|sibling| {
                !self.is_marker(*sibling)
                    && self
                        .tag(*sibling)
                        .is_some_and(|t| t.eq_ignore_ascii_case(tag))
            })
            .position(|sibling| sibling == node)
            .unwrap_or(0)
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Ancestors of `node`, nearest first, stopping after `root`.
    ///
    /// If `root` is not an ancestor the walk runs to the top of the tree.
    fn ancestors_within(&self, node: Self::Node, root: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        if node == root {
            return out;
        }
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            out.push(ancestor);
            if ancestor == root {
                break;
            }
            current = self.parent(ancestor);
        }
        out
    }

    /// True when `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// First element in document order under (or equal to) `scope` whose
    /// `id` equals `id`.
    fn find_element_by_id(&self, scope: Self::Node, id: &str) -> Option<Self::Node> {
        if self.element_id(scope) == Some(id) {
            return Some(scope);
        }
        self.descendants(scope)
            .into_iter()
            .find(|node| self.element_id(*node) == Some(id))
    }
}

/// Presentation of a synthetic marker node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpec<'a> {
    pub tag: &'a str,
    pub class: &'a str,
    pub label: &'a str,
}

/// Write access needed to present focus mode.
pub trait MarkableTree: DocumentTree {
    fn add_class(&mut self, node: Self::Node, class: &str);

    fn remove_class(&mut self, node: Self::Node, class: &str);

    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    /// Insert a synthetic element under `parent`, before `before` (or at the
    /// end when `before` is `None`). Returns `None` if `before` is not a
    /// child of `parent`.
    fn insert_marker(
        &mut self,
        parent: Self::Node,
        before: Option<Self::Node>,
        marker: MarkerSpec<'_>,
    ) -> Option<Self::Node>;

    /// Detach `node` and its subtree. Returns false if it was already gone.
    fn remove_node(&mut self, node: Self::Node) -> bool;
}
