//! Balance policies. A policy decides, after every insertion, whether and where to rotate and
//! how to keep its per-node bookkeeping (the node "tag") up to date. Policies share the node
//! model, the insertion search and the rotation primitive; they are interchangeable strategies
//! selected by the `P` parameter of [`Tree`].

use std::fmt;

use log::trace;

use crate::node::NodeId;
use crate::tree::Tree;

pub mod avl;
pub mod red_black;

pub use avl::{Avl, SingleRotation};
pub use red_black::{Color, RedBlack};

mod private {
    pub trait Sealed {}

    impl Sealed for super::Unbalanced {}
    impl Sealed for super::Avl {}
    impl Sealed for super::SingleRotation {}
    impl Sealed for super::RedBlack {}
}

/// The outcome of the shared insertion search, handed to [`Balance::rebalance`].
#[derive(Debug)]
pub struct Insertion {
    /// The freshly attached node.
    pub(crate) node: NodeId,
    /// Every node the search visited, from the root down to the new node's parent.
    pub(crate) path: Vec<NodeId>,
    /// The new node is a duplicate that was threaded above an existing left subtree (so it is
    /// not a leaf).
    pub(crate) threaded: bool,
}

/// A strategy for keeping a [`Tree`] balanced. This trait is sealed: the available policies are
/// [`Unbalanced`], [`Avl`], [`SingleRotation`] and [`RedBlack`].
pub trait Balance: private::Sealed + Sized {
    /// Per-node bookkeeping.
    type Tag: Copy + fmt::Debug;

    /// The tag of a node that was just created.
    fn new_tag() -> Self::Tag;

    /// Restores the policy's invariant after `insertion` attached a node.
    fn rebalance<K: Ord>(tree: &mut Tree<K, Self>, insertion: Insertion);

    /// Called by the rotation primitive after `promoted` was rotated above `demoted`.
    fn rotated<K>(_tree: &mut Tree<K, Self>, _demoted: NodeId, _promoted: NodeId) {}
}

/// No balancing at all: a plain binary search tree whose shape is the insertion order's.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    type Tag = ();

    fn new_tag() -> Self::Tag {}

    fn rebalance<K: Ord>(_tree: &mut Tree<K, Self>, insertion: Insertion) {
        trace!("{} left in place, no balancing", insertion.node);
    }
}
