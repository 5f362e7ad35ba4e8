//! Red-black balancing.
//!
//! Every node is red or black. After each insertion:
//!
//! 1. the root is black,
//! 2. a red node has no red child,
//! 3. every path from a node down to an empty link passes the same number of black nodes.
//!
//! Together these keep the height within `2 * log2(n + 1)`.

use log::debug;

use super::{Balance, Insertion};
use crate::node::{Link, NodeId, NodeRef};
use crate::tree::Tree;

/// The color of a red-black node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// New nodes start out red.
    Red,
    /// The root, and every empty link, is black.
    Black,
}

/// Red-black balancing by recoloring and at most two rotations per insertion.
///
/// # Examples
///
/// ```
/// use balanced_bst::{Color, RedBlackTree};
///
/// let tree: RedBlackTree<_> = [1, 2, 3].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(root.key(), &2);
/// assert_eq!(root.color(), Color::Black);
/// assert!(root.left().unwrap().is_red());
/// assert!(root.right().unwrap().is_red());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RedBlack;

impl Balance for RedBlack {
    type Tag = Color;

    fn new_tag() -> Self::Tag {
        Color::Red
    }

    fn rebalance<K: Ord>(tree: &mut Tree<K, Self>, insertion: Insertion) {
        let Insertion {
            node,
            mut path,
            threaded,
        } = insertion;
        if threaded {
            tree.sink_threaded(node, &mut path);
        }
        ensure_color_properties(tree, node);
    }
}

impl<K> NodeRef<'_, K, RedBlack> {
    /// The color of this node.
    pub fn color(&self) -> Color {
        self.raw().tag
    }

    /// Whether this node is black.
    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    /// Whether this node is red.
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }
}

/// Empty links count as black.
fn color<K>(tree: &Tree<K, RedBlack>, link: Link) -> Color {
    link.get().map_or(Color::Black, |id| tree.slot(id).tag)
}

fn is_black<K>(tree: &Tree<K, RedBlack>, id: NodeId) -> bool {
    color(tree, Link::to(id)) == Color::Black
}

fn paint<K>(tree: &mut Tree<K, RedBlack>, id: NodeId, color: Color) {
    tree.slot_mut(id).tag = color;
}

/// Walks up from `node` until no red node has a red parent and the root is black.
fn ensure_color_properties<K>(tree: &mut Tree<K, RedBlack>, mut node: NodeId) {
    loop {
        let Some(parent) = tree.parent_of(node) else {
            paint(tree, node, Color::Black);
            return;
        };
        if is_black(tree, node) || is_black(tree, parent) {
            node = parent;
            continue;
        }
        let Some(grandparent) = tree.parent_of(parent) else {
            // A red root: painting it black fixes the red-red pair.
            paint(tree, parent, Color::Black);
            return;
        };

        let parent_is_right = tree.is_right_child(parent);
        let aunt = if parent_is_right {
            tree.slot(grandparent).left
        } else {
            tree.slot(grandparent).right
        };

        match aunt.get() {
            Some(aunt) if !is_black(tree, aunt) => {
                debug!("{node} and {parent} are red, aunt {aunt} is red: recoloring {grandparent}");
                paint(tree, parent, Color::Black);
                paint(tree, aunt, Color::Black);
                paint(tree, grandparent, Color::Red);
                node = grandparent;
            }
            _ => {
                // An inside child is lifted first so the final rotation is the outside case.
                let parent = if tree.is_right_child(node) != parent_is_right {
                    debug!("{node} is an inside child of {parent}: lifting it");
                    tree.rotate_up(node);
                    node
                } else {
                    parent
                };
                debug!("{parent} is red with a black aunt: lifting it above {grandparent}");
                paint(tree, grandparent, Color::Red);
                paint(tree, parent, Color::Black);
                tree.rotate_up(parent);
                return;
            }
        }
    }
}
