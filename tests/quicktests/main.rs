//! Property tests against the public interface only.

use std::collections::HashSet;

use balanced_bst::{Avl, AvlTree, Balance, BinarySearchTree, RedBlackTree, Tree};

type ClassicAvlTree<K> = Tree<K, Avl>;

fn sorted<T: Ord>(mut xs: Vec<T>) -> Vec<T> {
    xs.sort();
    xs
}

fn contains_all<P: Balance>(xs: &[i8]) -> bool {
    let tree: Tree<_, P> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

fn contains_none_of<P: Balance>(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_, P> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

/// Every child must point back at its parent, and walking down from the root must reach each
/// inserted key exactly once.
fn links_agree<K, P: Balance>(tree: &Tree<K, P>) -> bool {
    let mut reached = 0;
    let mut stack: Vec<_> = tree.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        reached += 1;
        for child in [node.left(), node.right()].into_iter().flatten() {
            if child.parent().map(|n| n.id()) != Some(node.id()) {
                return false;
            }
            stack.push(child);
        }
    }
    reached == tree.size()
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        contains_all::<balanced_bst::Unbalanced>(&xs)
            && contains_all::<balanced_bst::Avl>(&xs)
            && contains_all::<balanced_bst::SingleRotation>(&xs)
            && contains_all::<balanced_bst::RedBlack>(&xs)
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        contains_none_of::<balanced_bst::Unbalanced>(xs.clone(), nots.clone())
            && contains_none_of::<balanced_bst::Avl>(xs.clone(), nots.clone())
            && contains_none_of::<balanced_bst::SingleRotation>(xs.clone(), nots.clone())
            && contains_none_of::<balanced_bst::RedBlack>(xs, nots)
    }
}

quickcheck::quickcheck! {
    fn iterates_in_order(xs: Vec<i16>) -> bool {
        let plain: BinarySearchTree<_> = xs.iter().copied().collect();
        let avl: AvlTree<_> = xs.iter().copied().collect();
        let classic: ClassicAvlTree<_> = xs.iter().copied().collect();
        let red_black: RedBlackTree<_> = xs.iter().copied().collect();
        let expected = sorted(xs);

        plain.iter().eq(expected.iter())
            && avl.iter().eq(expected.iter())
            && classic.iter().eq(expected.iter())
            && red_black.iter().eq(expected.iter())
    }
}

quickcheck::quickcheck! {
    fn size_counts_duplicates(xs: Vec<u8>) -> bool {
        let avl: AvlTree<_> = xs.iter().copied().collect();
        let classic: ClassicAvlTree<_> = xs.iter().copied().collect();
        let red_black: RedBlackTree<_> = xs.iter().copied().collect();

        avl.size() == xs.len() && classic.size() == xs.len() && red_black.size() == xs.len()
    }
}

quickcheck::quickcheck! {
    fn parent_links_agree(xs: Vec<i8>) -> bool {
        let plain: BinarySearchTree<_> = xs.iter().copied().collect();
        let avl: AvlTree<_> = xs.iter().copied().collect();
        let classic: ClassicAvlTree<_> = xs.iter().copied().collect();
        let red_black: RedBlackTree<_> = xs.iter().copied().collect();

        links_agree(&plain)
            && links_agree(&avl)
            && links_agree(&classic)
            && links_agree(&red_black)
    }
}

quickcheck::quickcheck! {
    fn balanced_heights_are_logarithmic(xs: Vec<i32>) -> bool {
        let n = xs.len() as f64;
        let avl: ClassicAvlTree<_> = xs.iter().copied().collect();
        let red_black: RedBlackTree<_> = xs.iter().copied().collect();

        avl.height() as f64 <= 1.45 * (n + 2.0).log2()
            && red_black.height() as f64 <= 2.0 * (n + 1.0).log2()
    }
}

quickcheck::quickcheck! {
    fn avl_tree_keeps_cached_heights(xs: Vec<i8>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();
        let mut stack: Vec<_> = tree.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            let left = node.left().map_or(0, |n| n.cached_height());
            let right = node.right().map_or(0, |n| n.cached_height());
            if node.cached_height() != left.max(right) + 1 {
                return false;
            }
            stack.extend(node.left());
            stack.extend(node.right());
        }
        tree.root().map_or(0, |n| n.cached_height()) == tree.height()
    }
}

quickcheck::quickcheck! {
    fn rotation_round_trip(xs: Vec<i8>) -> bool {
        let original: BinarySearchTree<_> = xs.iter().copied().collect();
        let mut tree = original.clone();
        let Some(root) = tree.root() else {
            return true;
        };
        let (root, child) = match root.left().or_else(|| root.right()) {
            Some(child) => (root.id(), child.id()),
            None => return true,
        };

        tree.rotate(Some(root), Some(child)).unwrap();
        if tree.root().map(|n| n.id()) != Some(child) {
            return false;
        }
        tree.rotate(Some(child), Some(root)).unwrap();

        tree.iter().eq(original.iter())
            && tree.root().map(|n| n.id()) == Some(root)
            && format!("{tree:?}") == format!("{original:?}")
    }
}
