//! The single rotation shared by every balance policy.

use log::trace;

use crate::balance::Balance;
use crate::error::{Result, TreeError};
use crate::node::{Link, NodeId};
use crate::tree::Tree;

impl<K, P: Balance> Tree<K, P> {
    /// Rotates `child` up above `parent`. The direction follows from which side `child` hangs off:
    /// a right child rotates left, a left child rotates right. The in-order sequence of keys does
    /// not change.
    ///
    /// This is purely structural. Rotating by hand can break the balance invariant of the tree's
    /// policy; the next insertions only repair what they touch.
    ///
    /// # Errors
    ///
    /// - [`TreeError::MissingNode`] if `parent` or `child` is `None`.
    /// - [`TreeError::UnknownNode`] if either id does not name a node of this tree.
    /// - [`TreeError::NotRelated`] if `child`'s parent is not `parent`.
    ///
    /// Nothing is modified when an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<_> = [10, 5, 15].into_iter().collect();
    /// let root = tree.root().map(|n| n.id());
    /// let right = tree.root().and_then(|n| n.right()).map(|n| n.id());
    ///
    /// tree.rotate(root, right).unwrap();
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.key(), &15);
    /// assert_eq!(root.left().map(|n| *n.key()), Some(10));
    /// assert_eq!(root.left().and_then(|n| n.left()).map(|n| *n.key()), Some(5));
    /// ```
    pub fn rotate(&mut self, parent: Option<NodeId>, child: Option<NodeId>) -> Result<()> {
        let (parent, child) = match (parent, child) {
            (None, None) => return Err(TreeError::MissingNode("parent and child")),
            (None, Some(_)) => return Err(TreeError::MissingNode("parent")),
            (Some(_), None) => return Err(TreeError::MissingNode("child")),
            (Some(parent), Some(child)) => (parent, child),
        };
        for id in [parent, child] {
            if !self.is_live(id) {
                return Err(TreeError::UnknownNode(id));
            }
        }
        if !self.slot(child).parent.is(parent) {
            return Err(TreeError::NotRelated { parent, child });
        }

        self.rotate_up(child);
        Ok(())
    }

    /// Rotates `child` above its parent.
    ///
    /// ## Panics
    ///
    /// When `child` is the root.
    ///
    /// # Diagram
    ///
    /// For a left child (the right child is the mirror image), with `y` as the liminal subtree:
    ///
    /// ```text
    ///     grandparent               grandparent
    ///         |                         |
    ///       parent                    child
    ///       /    \                    /    \
    ///    child    z    rotate ->     x    parent
    ///    /   \                            /    \
    ///   x     y                          y      z
    /// ```
    pub(crate) fn rotate_up(&mut self, child: NodeId) {
        let parent = self
            .parent_of(child)
            .expect("Rotating a node requires a parent");
        let grandparent = self.slot(parent).parent;

        if self.slot(parent).right.is(child) {
            let liminal = self.slot_mut(child).left.take();
            self.slot_mut(parent).right = liminal;
            self.slot_mut(child).left = Link::to(parent);
            trace!("rotating {child} left above {parent}");
            self.adopt(liminal, parent);
        } else {
            let liminal = self.slot_mut(child).right.take();
            self.slot_mut(parent).left = liminal;
            self.slot_mut(child).right = Link::to(parent);
            trace!("rotating {child} right above {parent}");
            self.adopt(liminal, parent);
        }
        self.slot_mut(parent).parent = Link::to(child);
        self.slot_mut(child).parent = grandparent;

        match grandparent.get() {
            Some(grandparent) => {
                let grandparent = self.slot_mut(grandparent);
                if grandparent.left.is(parent) {
                    grandparent.left = Link::to(child);
                } else {
                    grandparent.right = Link::to(child);
                }
            }
            None => self.root = Link::to(child),
        }

        P::rotated(self, parent, child);
    }

    /// Points the parent link of `link`'s target (if any) at `parent`.
    fn adopt(&mut self, link: Link, parent: NodeId) {
        if let Some(id) = link.get() {
            self.slot_mut(id).parent = Link::to(parent);
        }
    }
}
