//! Helpers shared by the unit tests.

use std::fmt;

use log::LevelFilter;
use simplelog::{Config, TestLogger};

use crate::balance::{Balance, Color, RedBlack};
use crate::node::{Link, NodeRef};
use crate::tree::Tree;


/// Routes `log` output to the test harness. Safe to call from every test.
pub(crate) fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Follows a path like `"LR"` (left, then right) from the root. `""` is the root itself.
pub(crate) fn node_at<'a, K, P: Balance>(
    tree: &'a Tree<K, P>,
    path: &str,
) -> Option<NodeRef<'a, K, P>> {
    let mut node = tree.root()?;
    for step in path.chars() {
        node = match step {
            'L' => node.left()?,
            'R' => node.right()?,
            other => panic!("unknown step {other:?} in {path:?}"),
        };
    }
    Some(node)
}

/// The key at the end of `path`, see [`node_at`].
pub(crate) fn shape_of<K: Copy, P: Balance>(tree: &Tree<K, P>, path: &str) -> Option<K> {
    node_at(tree, path).map(|n| *n.key())
}

pub(crate) fn in_order<K: Clone, P: Balance>(tree: &Tree<K, P>) -> Vec<K> {
    tree.iter().cloned().collect()
}

/// Checks that child and parent links agree, that every arena node is reachable from the root
/// exactly once, and that the in-order keys are sorted.
pub(crate) fn assert_links<K, P>(tree: &Tree<K, P>)
where
    K: Ord + fmt::Debug,
    P: Balance,
{
    let mut reached = 0;
    let mut stack: Vec<_> = tree.root().into_iter().collect();
    if let Some(root) = tree.root() {
        assert!(root.parent().is_none(), "root {:?} has a parent", root.id());
    }
    while let Some(node) = stack.pop() {
        reached += 1;
        for child in [node.left(), node.right()].into_iter().flatten() {
            assert_eq!(
                child.parent().map(|n| n.id()),
                Some(node.id()),
                "{:?} does not point back at {:?}",
                child.id(),
                node.id()
            );
            stack.push(child);
        }
    }
    assert_eq!(reached, tree.nodes.len());
    assert_eq!(reached, tree.size());

    let keys: Vec<_> = tree.iter().collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]), "{keys:?} is not sorted");
}

/// Checks every cached height against a full walk and that no node leans by two or more.
pub(crate) fn assert_avl<K, P>(tree: &Tree<K, P>)
where
    K: Ord + fmt::Debug,
    P: Balance<Tag = usize>,
{
    assert_links(tree);
    let mut stack: Vec<_> = tree.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        assert_eq!(
            node.cached_height(),
            tree.subtree_height(Link::to(node.id())),
            "stale height at {:?}",
            node.key()
        );
        assert!(
            node.balance_factor().abs() < 2,
            "{:?} is unbalanced: {}",
            node.key(),
            node.balance_factor()
        );
        stack.extend(node.left());
        stack.extend(node.right());
    }
}

/// Checks the red-black color properties and returns the black height of the tree (the number
/// of black nodes on every path from the root down to an empty link).
pub(crate) fn assert_red_black<K>(tree: &Tree<K, RedBlack>) -> usize
where
    K: Ord + fmt::Debug,
{
    fn black_height<K: fmt::Debug>(node: Option<NodeRef<'_, K, RedBlack>>) -> usize {
        let Some(node) = node else {
            return 0;
        };
        if node.is_red() {
            for child in [node.left(), node.right()].into_iter().flatten() {
                assert!(
                    child.is_black(),
                    "red {:?} has red child {:?}",
                    node.key(),
                    child.key()
                );
            }
        }
        let left = black_height(node.left());
        let right = black_height(node.right());
        assert_eq!(left, right, "black heights differ below {:?}", node.key());
        left + usize::from(node.color() == Color::Black)
    }

    assert_links(tree);
    if let Some(root) = tree.root() {
        assert!(root.is_black(), "root {:?} is red", root.key());
    }
    black_height(tree.root())
}
