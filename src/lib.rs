//! This crate exposes a binary search tree with pluggable balancing: none at all, AVL, or
//! red-black.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert and find stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than or equal to its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than or equal to its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is the number of nodes on
//! the longest path from the root `Node` to a leaf `Node`). Balancing keeps the height close to
//! `lg N` where `N` is the number of nodes in the tree:
//!
//! - [`BinarySearchTree`] never rotates. Sorted input degenerates it into a list.
//! - [`AvlTree`] caches each subtree's height and rotates the taller child up whenever two
//!   siblings differ in height by two or more. It only ever rotates once per node, so an inward
//!   lean (inserting 3, 1, 2) moves to the other side instead of going away. `Tree<K, Avl>`
//!   opts into classic AVL, which adds double rotations and keeps every node balanced.
//! - [`RedBlackTree`] colors nodes red or black and rotates when a red node gets a red child
//!   that cannot be fixed by recoloring.
//!
//! All of them are the same [`Tree`] type with a different [`Balance`] policy, so they share the
//! insertion search, the [rotation](Tree::rotate) primitive and every query.
//!
//! ## Duplicates
//!
//! Every insertion adds a node, even for a key that is already present. A duplicate is threaded
//! in as the left child of the first equal node the search meets, taking over that node's
//! previous left subtree.
//!
//! ```
//! use balanced_bst::BinarySearchTree;
//!
//! let tree: BinarySearchTree<_> = [2, 1, 2].into_iter().collect();
//! let root = tree.root().unwrap();
//!
//! assert_eq!(tree.size(), 3);
//! assert_eq!(root.left().map(|n| *n.key()), Some(2));
//! assert_eq!(root.left().and_then(|n| n.left()).map(|n| *n.key()), Some(1));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balance;
mod error;
mod node;
mod rotation;
mod tree;

#[cfg(test)]
mod test;

pub use balance::{Avl, Balance, Color, RedBlack, SingleRotation, Unbalanced};
pub use error::{Result, TreeError};
pub use node::{NodeId, NodeRef};
pub use tree::{Iter, Tree};

/// A tree that never rebalances.
pub type BinarySearchTree<K> = Tree<K, Unbalanced>;

/// A tree kept balanced by single AVL rotations, see [`SingleRotation`].
pub type AvlTree<K> = Tree<K, SingleRotation>;

/// A tree kept balanced by red-black coloring.
pub type RedBlackTree<K> = Tree<K, RedBlack>;
