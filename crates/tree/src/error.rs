use thiserror::Error;

use crate::NodeId;

/// Errors raised by [`DocTree`](crate::DocTree) mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("unknown or removed node {0:?}")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not an element and cannot have children")]
    NotAnElement(NodeId),
    #[error("node {0:?} is not a text node")]
    NotText(NodeId),
    #[error("node {before:?} is not a child of {parent:?}")]
    InvalidSibling { parent: NodeId, before: NodeId },
    #[error("the root node cannot be removed")]
    CannotRemoveRoot,
}
