//! Nodes and the links between them.
//!
//! Nodes live in an arena owned by their [`Tree`] and refer to each other by [`NodeId`]. The
//! `left` and `right` links own their targets in the sense that every node is held by exactly one
//! of them (or by the tree's root link). The `parent` link is a back-reference used for navigation
//! and rotation bookkeeping only.

use std::fmt;

use crate::balance::Balance;
use crate::tree::Tree;

/// Names a node of a particular [`Tree`]. Ids stay valid until the tree is cleared.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A possibly empty reference to a node.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub(crate) struct Link(pub(crate) Option<NodeId>);

impl Link {
    pub(crate) const EMPTY: Self = Link(None);

    pub(crate) fn to(id: NodeId) -> Self {
        Link(Some(id))
    }

    pub(crate) fn get(self) -> Option<NodeId> {
        self.0
    }

    pub(crate) fn is(self, id: NodeId) -> bool {
        self.0 == Some(id)
    }

    pub(crate) fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, T> {
    pub(crate) key: K,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
    /// Per-policy balance bookkeeping: nothing, a cached height, or a color.
    pub(crate) tag: T,
}

impl<K, T> Node<K, T> {
    pub(crate) fn new(key: K, tag: T) -> Self {
        Self {
            key,
            left: Link::EMPTY,
            right: Link::EMPTY,
            parent: Link::EMPTY,
            tag,
        }
    }
}

/// A read-only view of one node, used to inspect (and print) the shape of a tree.
///
/// # Examples
///
/// ```
/// use balanced_bst::BinarySearchTree;
///
/// let tree: BinarySearchTree<_> = [2, 1, 3].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(root.key(), &2);
/// assert_eq!(root.left().map(|n| *n.key()), Some(1));
/// assert_eq!(root.right().and_then(|n| n.parent()).map(|n| n.id()), Some(root.id()));
/// ```
pub struct NodeRef<'a, K, P: Balance> {
    tree: &'a Tree<K, P>,
    id: NodeId,
}

impl<K, P: Balance> Clone for NodeRef<'_, K, P> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K, P: Balance> Copy for NodeRef<'_, K, P> {}

impl<'a, K, P: Balance> NodeRef<'a, K, P> {
    /// The caller guarantees `id` is live in `tree`.
    pub(crate) fn new(tree: &'a Tree<K, P>, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub(crate) fn raw(&self) -> &'a Node<K, P::Tag> {
        self.tree.slot(self.id)
    }

    fn follow(&self, link: Link) -> Option<Self> {
        link.get().map(|id| Self::new(self.tree, id))
    }

    /// The id of this node, usable with [`Tree::rotate`] and [`Tree::node`].
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key stored in this node.
    pub fn key(&self) -> &'a K {
        &self.raw().key
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<Self> {
        self.follow(self.raw().left)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<Self> {
        self.follow(self.raw().right)
    }

    /// The parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.follow(self.raw().parent)
    }

    /// Whether this node hangs off its parent's right side. The root is not a right child.
    pub fn is_right_child(&self) -> bool {
        self.tree.is_right_child(self.id)
    }
}

/// One step of printing a subtree.
enum Piece<'a, K, P: Balance> {
    Text(&'static str),
    Child(Option<NodeRef<'a, K, P>>),
    Node(NodeRef<'a, K, P>),
}

/// Prints the subtree as `Node { key, tag, left, right }`, nested like a derived `Debug`. The
/// pieces still to print are kept on an explicit stack, so deep trees cannot overflow the call
/// stack.
impl<K, P> fmt::Debug for NodeRef<'_, K, P>
where
    K: fmt::Debug,
    P: Balance,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(*self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Child(None) => f.write_str("None")?,
                Piece::Child(Some(node)) => {
                    f.write_str("Some(")?;
                    stack.push(Piece::Text(")"));
                    stack.push(Piece::Node(node));
                }
                Piece::Node(node) => {
                    write!(
                        f,
                        "Node {{ key: {:?}, tag: {:?}, left: ",
                        node.key(),
                        node.raw().tag
                    )?;
                    stack.push(Piece::Text(" }"));
                    stack.push(Piece::Child(node.right()));
                    stack.push(Piece::Text(", right: "));
                    stack.push(Piece::Child(node.left()));
                }
            }
        }
        Ok(())
    }
}
