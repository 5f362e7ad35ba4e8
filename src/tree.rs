//! The tree container: owns the nodes and the root link, runs the shared insertion search and
//! hands every insertion to the balance policy.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

use log::{trace, warn};

use crate::balance::{Balance, Insertion, Unbalanced};
use crate::error::{Result, TreeError};
use crate::node::{Link, Node, NodeId, NodeRef};

/// A binary search tree over keys `K`, kept balanced by the policy `P`. Keys may repeat: every
/// insertion adds a node.
///
/// # Examples
///
/// ```
/// use balanced_bst::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// assert!(tree.is_empty());
///
/// for key in 1..=7 {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.size(), 7);
/// assert_eq!(tree.height(), 4);
/// assert!(tree.contains(&4));
/// assert!(!tree.contains(&8));
/// assert!(tree.root().unwrap().is_black());
/// ```
pub struct Tree<K, P: Balance = Unbalanced> {
    pub(crate) nodes: Vec<Node<K, P::Tag>>,
    pub(crate) root: Link,
    policy: PhantomData<P>,
}

impl<K, P: Balance> Default for Tree<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, P: Balance> Clone for Tree<K, P> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            policy: PhantomData,
        }
    }
}

impl<K: fmt::Debug, P: Balance> fmt::Debug for Tree<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

impl<K, P: Balance> Tree<K, P> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Generates a new, empty `Tree` with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: Link::EMPTY,
            policy: PhantomData,
        }
    }

    /// Inserts `key`. Returns the id of the new node.
    ///
    /// A key equal to an existing one is threaded immediately to the left of the first equal
    /// node found: it takes that node's left child slot and the previous left subtree hangs
    /// below it.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(10);
    /// tree.insert(5);
    /// tree.insert(10);
    ///
    /// let root = tree.root().unwrap();
    /// let duplicate = root.left().unwrap();
    /// assert_eq!(duplicate.key(), &10);
    /// assert_eq!(duplicate.left().map(|n| *n.key()), Some(5));
    /// assert_eq!(tree.size(), 3);
    /// ```
    pub fn insert(&mut self, key: K) -> NodeId
    where
        K: Ord,
    {
        let insertion = self.attach(key);
        let id = insertion.node;
        P::rebalance(self, insertion);

        if cfg!(debug_assertions) {
            match self.parent_of(id) {
                Some(parent) => {
                    let parent = self.slot(parent);
                    assert!(parent.left.is(id) || parent.right.is(id));
                }
                None => assert!(self.root.is(id)),
            }
        }
        id
    }

    /// Inserts a key that may be absent.
    ///
    /// # Errors
    ///
    /// [`TreeError::MissingKey`] if `key` is `None`; the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{AvlTree, TreeError};
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.try_insert(None::<i32>), Err(TreeError::MissingKey));
    /// assert!(tree.is_empty());
    ///
    /// assert!(tree.try_insert(Some(1)).is_ok());
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn try_insert(&mut self, key: Option<K>) -> Result<NodeId>
    where
        K: Ord,
    {
        let key = key.ok_or(TreeError::MissingKey)?;
        Ok(self.insert(key))
    }

    /// Deletion is not supported by any policy.
    ///
    /// # Errors
    ///
    /// Always [`TreeError::Unsupported`].
    pub fn delete(&mut self, _key: &K) -> Result<()>
    where
        K: Ord,
    {
        warn!("delete called on a tree that does not support deletion");
        Err(TreeError::Unsupported("delete"))
    }

    /// Whether any node holds a key equal to `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut current = self.root.get();
        while let Some(id) = current {
            let node = self.slot(id);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.get(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right.get(),
            };
        }
        false
    }

    /// The number of nodes in the tree, duplicates included.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<NodeId> = self.root.get().into_iter().collect();
        while let Some(id) = stack.pop() {
            count += 1;
            let node = self.slot(id);
            stack.extend(node.left.get());
            stack.extend(node.right.get());
        }
        count
    }

    /// The number of nodes on the longest path from the root down. An empty tree has height 0.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = Link::EMPTY;
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.get().is_none()
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, K, P>> {
        self.root.get().map(|id| NodeRef::new(self, id))
    }

    /// The node named by `id`, or `None` if `id` is not a node of this tree.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, P>> {
        self.is_live(id).then(|| NodeRef::new(self, id))
    }

    /// The keys in order. Equal keys come out next to each other.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree: AvlTree<_> = [3, 1, 2, 1].into_iter().collect();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, P> {
        Iter {
            tree: self,
            stack: Vec::new(),
            next: self.root,
        }
    }

    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Node<K, P::Tag> {
        &self.nodes[id.0]
    }

    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut Node<K, P::Tag> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).parent.get()
    }

    pub(crate) fn is_right_child(&self, id: NodeId) -> bool {
        self.parent_of(id)
            .map_or(false, |parent| self.slot(parent).right.is(id))
    }

    /// Height of the subtree behind `link`, by a full level-by-level walk.
    pub(crate) fn subtree_height(&self, link: Link) -> usize {
        let mut height = 0;
        let mut level: Vec<NodeId> = link.get().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&id| {
                    let node = self.slot(id);
                    [node.left.get(), node.right.get()]
                })
                .flatten()
                .collect();
        }
        height
    }

    /// The unbalanced part of insertion: find the spot for `key` and link a new node there.
    fn attach(&mut self, key: K) -> Insertion
    where
        K: Ord,
    {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(key, P::new_tag()));

        let Some(mut current) = self.root.get() else {
            trace!("{id} becomes the root");
            self.root = Link::to(id);
            return Insertion {
                node: id,
                path: Vec::new(),
                threaded: false,
            };
        };

        let mut path = Vec::new();
        let threaded = loop {
            path.push(current);
            let ordering = self.slot(id).key.cmp(&self.slot(current).key);
            let next = match ordering {
                Ordering::Less | Ordering::Equal => self.slot(current).left,
                Ordering::Greater => self.slot(current).right,
            };
            match (ordering, next.get()) {
                (Ordering::Equal, Some(_)) => {
                    let displaced = self.slot_mut(current).left.take();
                    self.slot_mut(current).left = Link::to(id);
                    self.slot_mut(id).left = displaced;
                    if let Some(displaced) = displaced.get() {
                        self.slot_mut(displaced).parent = Link::to(id);
                    }
                    break true;
                }
                (_, Some(child)) => current = child,
                (Ordering::Greater, None) => {
                    self.slot_mut(current).right = Link::to(id);
                    break false;
                }
                (_, None) => {
                    self.slot_mut(current).left = Link::to(id);
                    break false;
                }
            }
        };
        self.slot_mut(id).parent = Link::to(current);
        trace!("{id} attached below {current} (threaded: {threaded})");

        Insertion {
            node: id,
            path,
            threaded,
        }
    }

    /// Rotates a threaded duplicate down the right spine of the subtree it was threaded above,
    /// until it is a leaf. The in-order position of every node is unchanged. The nodes lifted
    /// above it are appended to `path`.
    pub(crate) fn sink_threaded(&mut self, id: NodeId, path: &mut Vec<NodeId>) {
        while let Some(left) = self.slot(id).left.get() {
            self.rotate_up(left);
            path.push(left);
        }
    }
}

impl<K: Ord, P: Balance> Extend<K> for Tree<K, P> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K: Ord, P: Balance> FromIterator<K> for Tree<K, P> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let keys = keys.into_iter();
        let mut tree = Self::with_capacity(keys.size_hint().0);
        tree.extend(keys);
        tree
    }
}

impl<'a, K, P: Balance> IntoIterator for &'a Tree<K, P> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the keys of a [`Tree`].
pub struct Iter<'a, K, P: Balance> {
    tree: &'a Tree<K, P>,
    stack: Vec<NodeId>,
    next: Link,
}

impl<'a, K, P: Balance> Iterator for Iter<'a, K, P> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.next.get() {
            self.stack.push(id);
            self.next = self.tree.slot(id).left;
        }
        let id = self.stack.pop()?;
        let node = self.tree.slot(id);
        self.next = node.right;
        Some(&node.key)
    }
}
