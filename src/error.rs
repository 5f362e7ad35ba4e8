//! Errors surfaced by tree operations. All of them are contract violations by the caller: the
//! tree is never left partially modified when one is returned.

use crate::node::NodeId;

/// Errors triggered by tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// An absent key was handed to [`Tree::try_insert`][crate::Tree::try_insert].
    #[error("cannot insert an absent key into a tree")]
    MissingKey,
    /// A rotation was requested with an empty parent and/or child.
    #[error("cannot rotate: {0} must not be empty")]
    MissingNode(&'static str),
    /// The id does not name a live node of this tree.
    #[error("node {0} is not part of this tree")]
    UnknownNode(NodeId),
    /// A rotation was requested on two nodes that are not parent and child.
    #[error("node {child} is not a child of node {parent}")]
    NotRelated {
        /// The would-be parent.
        parent: NodeId,
        /// The would-be child.
        child: NodeId,
    },
    /// The operation exists in the interface but has no implementation.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

/// Shorthand for results of tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
