//! AVL balancing: every node caches the height of its subtree and a node whose children's
//! heights differ by two or more gets a child rotated above it.
//!
//! Two policies are provided:
//!
//! - [`Avl`] resolves every imbalance, lifting the inner grandchild first when the taller child
//!   leans inward (a double rotation). It keeps `|height(left) - height(right)| < 2` at every
//!   node.
//! - [`SingleRotation`] always performs a single rotation of the taller child. It agrees with
//!   [`Avl`] whenever the taller child leans outward, but an inward lean (e.g. inserting 3, 1, 2)
//!   is only shifted to the other side and the imbalance stays.
//!
//! See [the Wikipedia page][wiki] for the terminology.
//!
//! [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing

use log::debug;

use super::{Balance, Insertion};
use crate::node::{Link, NodeId, NodeRef};
use crate::tree::Tree;

/// Classic AVL balancing with single and double rotations. Opt in with `Tree<K, Avl>`;
/// [`AvlTree`](crate::AvlTree) uses [`SingleRotation`].
///
/// # Examples
///
/// ```
/// use balanced_bst::{Avl, Tree};
///
/// let tree: Tree<_, Avl> = [3, 1, 2].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(root.key(), &2);
/// assert_eq!(root.cached_height(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Avl;

/// AVL balancing that only ever rotates the taller child up once. This is the policy behind
/// [`AvlTree`](crate::AvlTree).
///
/// # Examples
///
/// ```
/// use balanced_bst::AvlTree;
///
/// let tree: AvlTree<_> = [3, 1, 2].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// // 1 was lifted above 3 and took 2 along as 3's left child.
/// assert_eq!(root.key(), &1);
/// assert_eq!(root.right().and_then(|n| n.left()).map(|n| *n.key()), Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleRotation;

impl Balance for Avl {
    /// The height of the node's subtree. A node with no children has a height of 1.
    type Tag = usize;

    fn new_tag() -> Self::Tag {
        1
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
        walk_up(tree, node, &path, ensure_balance);
    }

    fn rotated<K>(tree: &mut Tree<K, Self>, demoted: NodeId, promoted: NodeId) {
        refresh_heights(tree, demoted, promoted);
    }
}

impl Balance for SingleRotation {
    /// The height of the node's subtree. A node with no children has a height of 1.
    type Tag = usize;

    fn new_tag() -> Self::Tag {
        1
    }

    fn rebalance<K: Ord>(tree: &mut Tree<K, Self>, insertion: Insertion) {
        walk_up(tree, insertion.node, &insertion.path, rotate_taller_child);
    }

    fn rotated<K>(tree: &mut Tree<K, Self>, demoted: NodeId, promoted: NodeId) {
        refresh_heights(tree, demoted, promoted);
    }
}

impl<K, P: Balance<Tag = usize>> NodeRef<'_, K, P> {
    /// The height of the subtree rooted at this node, as cached by the AVL policy.
    pub fn cached_height(&self) -> usize {
        self.raw().tag
    }

    /// `height(left) - height(right)`.
    pub fn balance_factor(&self) -> isize {
        let left = self.left().map_or(0, |n| n.cached_height());
        let right = self.right().map_or(0, |n| n.cached_height());
        left as isize - right as isize
    }
}

fn height<K, P: Balance<Tag = usize>>(tree: &Tree<K, P>, link: Link) -> usize {
    link.get().map_or(0, |id| tree.slot(id).tag)
}

/// Sets the height of `id` to the max of its children's heights + 1.
fn fix_height<K, P: Balance<Tag = usize>>(tree: &mut Tree<K, P>, id: NodeId) {
    let node = tree.slot(id);
    let fixed = height(tree, node.left).max(height(tree, node.right)) + 1;
    tree.slot_mut(id).tag = fixed;
}

fn balance_factor<K, P: Balance<Tag = usize>>(tree: &Tree<K, P>, id: NodeId) -> isize {
    let node = tree.slot(id);
    height(tree, node.left) as isize - height(tree, node.right) as isize
}

/// After a rotation only the two rotated nodes and the ancestors above them change height.
fn refresh_heights<K, P: Balance<Tag = usize>>(
    tree: &mut Tree<K, P>,
    demoted: NodeId,
    promoted: NodeId,
) {
    fix_height(tree, demoted);
    fix_height(tree, promoted);
    let mut ancestor = tree.parent_of(promoted);
    while let Some(id) = ancestor {
        fix_height(tree, id);
        ancestor = tree.parent_of(id);
    }
}

/// Checks every node the insertion search visited, innermost first. These are the nodes as they
/// were found on the way down: a node lifted by a rotation on the way up is not checked again.
fn walk_up<K, P: Balance<Tag = usize>>(
    tree: &mut Tree<K, P>,
    inserted: NodeId,
    path: &[NodeId],
    ensure: fn(&mut Tree<K, P>, NodeId),
) {
    fix_height(tree, inserted);
    for &ancestor in path.iter().rev() {
        fix_height(tree, ancestor);
        ensure(tree, ancestor);
    }
}

fn ensure_balance<K>(tree: &mut Tree<K, Avl>, id: NodeId) {
    match balance_factor(tree, id) {
        bf if bf >= 2 => {
            let Some(left) = tree.slot(id).left.get() else {
                return;
            };
            if balance_factor(tree, left) < 0 {
                if let Some(inner) = tree.slot(left).right.get() {
                    debug!("{id} is left-heavy ({bf}) and {left} leans right: lifting {inner}");
                    tree.rotate_up(inner);
                }
            }
            if let Some(left) = tree.slot(id).left.get() {
                debug!("{id} is left-heavy ({bf}): lifting {left}");
                tree.rotate_up(left);
            }
        }
        bf if bf <= -2 => {
            let Some(right) = tree.slot(id).right.get() else {
                return;
            };
            if balance_factor(tree, right) > 0 {
                if let Some(inner) = tree.slot(right).left.get() {
                    debug!("{id} is right-heavy ({bf}) and {right} leans left: lifting {inner}");
                    tree.rotate_up(inner);
                }
            }
            if let Some(right) = tree.slot(id).right.get() {
                debug!("{id} is right-heavy ({bf}): lifting {right}");
                tree.rotate_up(right);
            }
        }
        _ => {}
    }
}

fn rotate_taller_child<K>(tree: &mut Tree<K, SingleRotation>, id: NodeId) {
    let bf = balance_factor(tree, id);
    let taller = match bf {
        bf if bf >= 2 => tree.slot(id).left,
        bf if bf <= -2 => tree.slot(id).right,
        _ => return,
    };
    if let Some(child) = taller.get() {
        debug!("{id} is unbalanced ({bf}): lifting {child}");
        tree.rotate_up(child);
    }
}
