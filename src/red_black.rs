//! A Red-Black tree.
//!
//! Every node is colored red or black such that:
//!
//! 1. The root is black.
//! 2. No red node has a red child.
//! 3. Empty children count as black.
//! 4. Every path from a node down to an empty child passes through the same number of black
//!    nodes (the node's black-height).
//! 5. New nodes start out red.
//!
//! Together these keep the longest root-to-leaf path at most twice as long as the shortest.
//! Inserts repair red-red violations by recoloring up the tree and finish with at most two
//! rotations. Deletes of a black node leave one path a black short (a "double-black" position)
//! which is repaired by borrowing from the sibling's side.
//!
//! # Examples
//!
//! ```
//! use trees::red_black::{Color, Tree};
//!
//! let tree: Tree<_, _> = [50, 30, 70, 20, 40, 60, 80].into_iter().map(|k| (k, k)).collect();
//!
//! assert_eq!(tree.root().map(|n| n.color()), Some(Color::Black));
//! assert_eq!(
//!     tree.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
//!     [20, 30, 40, 50, 60, 70, 80]
//! );
//! ```

use std::fmt;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::node::{self, Iter, Link, Side};
use crate::raw::{side_of, Inserted, NodePtr, RawTree};
use crate::traversal::{self, BinaryTree, Order, Traversal};

/// Balancing metadata of a Red-Black node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red nodes never have a red child.
    Red,
    /// Black nodes are counted by the black-height.
    Black,
}

/// A node of a Red-Black [`Tree`].
pub type Node<K, V> = node::Node<K, V, Color>;

impl<K, V> Node<K, V> {
    /// This node's color.
    pub fn color(&self) -> Color {
        self.meta
    }
}

/// Color of the node behind `link`. Empty links are black.
fn color<K, V>(link: Link<K, V, Color>) -> Color {
    link.get().map_or(Color::Black, Node::color)
}

fn is_red<K, V>(link: Link<K, V, Color>) -> bool {
    color(link) == Color::Red
}

fn set_color<K, V>(node: NodePtr<K, V, Color>, color: Color) {
    // SAFETY: Callers hold `&mut` access to the tree `node` belongs to and no reference into it
    // is live across this write.
    unsafe { (*node.as_ptr()).meta = color };
}

fn parent_of<K, V>(node: NodePtr<K, V, Color>) -> Option<NodePtr<K, V, Color>> {
    // SAFETY: `node` is a live node. The reference only lives for this read.
    unsafe { node.as_ref() }.parent.0
}

fn child_of<K, V>(node: NodePtr<K, V, Color>, side: Side) -> Link<K, V, Color> {
    // SAFETY: As in `parent`.
    unsafe { node.as_ref() }.child(side)
}

/// A self-balancing Binary Search Tree colored to keep every path within a factor of two of every
/// other. This can be used for inserting, finding, and deleting keys and values.
pub struct Tree<K, V> {
    raw: RawTree<K, V, Color>,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.raw, f)
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            raw: RawTree::new(),
        }
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels in the tree. An empty tree has height 0.
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// The root node, for walking the tree's shape.
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.raw.root()
    }

    /// The entry with the smallest key.
    pub fn min(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|n| n.entry())
    }

    /// The entry with the largest key.
    pub fn max(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|n| n.entry())
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, Color> {
        self.raw.iter()
    }

    /// Walks the tree in the given order. See [`traversal`] for the available orders.
    pub fn traverse(&self, order: Order) -> Traversal<'_, Node<K, V>> {
        traversal::traverse(self, order)
    }

    /// Finds the value associated with the given key. If no node has the key,
    /// [`Error::KeyNotFound`] is returned.
    pub fn search(&self, key: &K) -> Result<&V>
    where
        K: Ord,
    {
        self.raw.get(key).map(Node::value).ok_or(Error::KeyNotFound)
    }

    /// Whether a node holds the given key.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.raw.get(key).is_some()
    }

    /// The entry that follows `key` in ascending order, or `None` if `key` is the largest.
    pub fn successor(&self, key: &K) -> Result<Option<(&K, &V)>>
    where
        K: Ord,
    {
        let node = self.raw.get(key).ok_or(Error::KeyNotFound)?;
        Ok(node.next().map(|n| n.entry()))
    }

    /// The entry that precedes `key` in ascending order, or `None` if `key` is the smallest.
    pub fn predecessor(&self, key: &K) -> Result<Option<(&K, &V)>>
    where
        K: Ord,
    {
        let node = self.raw.get(key).ok_or(Error::KeyNotFound)?;
        Ok(node.prev().map(|n| n.entry()))
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwites its value and leaves the colors alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::red_black::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// assert_eq!(tree.search(&1), Ok(&2));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.search(&1), Ok(&3));
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        if let Inserted::Created(node) = self.raw.insert(key, value, Color::Red) {
            self.insert_fixup(node);
        }
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, [`Error::KeyNotFound`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::red_black::Tree;
    /// use trees::Error;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.delete(&1), Ok(2));
    /// assert_eq!(tree.delete(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<V>
    where
        K: Ord,
    {
        let node = self.raw.find(key).ok_or(Error::KeyNotFound)?;
        let removed = self.raw.remove(node);
        if removed.meta == Color::Black {
            self.delete_fixup(removed.child, removed.parent, removed.side);
        }
        Ok(removed.value)
    }

    fn rotate(&mut self, node: NodePtr<K, V, Color>, side: Side) {
        trace!("red-black: rotating {side:?}");
        self.raw.rotate(node, side);
    }

    fn blacken_root(&mut self) {
        if let Some(root) = self.raw.root_link().0 {
            set_color(root, Color::Black);
        }
    }

    /// Restores "no red node has a red child" after `node` was attached as a red leaf.
    fn insert_fixup(&mut self, mut node: NodePtr<K, V, Color>) {
        while let Some(mut parent) = parent_of(node).filter(|&p| is_red(Link::to(p))) {
            // A red parent is never the root so there is always a grandparent.
            let grandparent = parent_of(parent).expect("Red node => not root");
            // SAFETY: `grandparent` is live. The reference only lives for this read.
            let parent_side = side_of(unsafe { grandparent.as_ref() }, parent);
            let uncle = child_of(grandparent, parent_side.opposite());

            if let Some(uncle) = uncle.0.filter(|&u| is_red(Link::to(u))) {
                debug!("red-black insert: red uncle, recoloring");
                set_color(parent, Color::Black);
                set_color(uncle, Color::Black);
                set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // SAFETY: As above.
            if side_of(unsafe { parent.as_ref() }, node) != parent_side {
                debug!("red-black insert: black uncle, zig-zag");
                self.rotate(parent, parent_side);
                // `node` took `parent`'s place and `parent` is now its child on the outside.
                parent = node;
            }

            debug!("red-black insert: black uncle, zig-zig");
            set_color(parent, Color::Black);
            set_color(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            break;
        }
        self.blacken_root();
    }

    /// Restores equal black-heights after a black node was unlinked from `parent`'s `side`,
    /// leaving `node` (possibly empty) in its place.
    fn delete_fixup(
        &mut self,
        mut node: Link<K, V, Color>,
        mut parent: Link<K, V, Color>,
        mut side: Side,
    ) {
        loop {
            // A red node in the short position absorbs the missing black.
            if let Some(red) = node.0.filter(|&n| is_red(Link::to(n))) {
                set_color(red, Color::Black);
                break;
            }
            // The root lost a black on every path at once so nothing is unbalanced.
            let Some(p) = parent.0 else {
                break;
            };

            let mut sibling = child_of(p, side.opposite())
                .0
                .expect("Double-black position => sibling");

            if is_red(Link::to(sibling)) {
                debug!("red-black delete: red sibling");
                set_color(sibling, Color::Black);
                set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = child_of(p, side.opposite())
                    .0
                    .expect("Red sibling => black children");
            }

            let near = child_of(sibling, side);
            let far = child_of(sibling, side.opposite());

            if !is_red(near) && !is_red(far) {
                set_color(sibling, Color::Red);
                if is_red(Link::to(p)) {
                    debug!("red-black delete: black nephews, red parent");
                    set_color(p, Color::Black);
                    break;
                }
                debug!("red-black delete: black nephews, moving up");
                node = Link::to(p);
                parent = Link(parent_of(p));
                if let Some(grandparent) = parent.0 {
                    // SAFETY: `grandparent` is live. The reference only lives for this read.
                    side = side_of(unsafe { grandparent.as_ref() }, p);
                }
                continue;
            }

            if !is_red(far) {
                debug!("red-black delete: red near nephew");
                let near = near.0.expect("Not both nephews black => red near nephew");
                set_color(near, Color::Black);
                set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = near;
            }

            debug!("red-black delete: red far nephew");
            set_color(sibling, color(Link::to(p)));
            set_color(p, Color::Black);
            if let Some(far) = child_of(sibling, side.opposite()).0 {
                set_color(far, Color::Black);
            }
            self.rotate(p, side);
            break;
        }
        self.blacken_root();
    }
}

impl<K, V> BinaryTree for Tree<K, V> {
    type Node = Node<K, V>;

    fn root(&self) -> Option<&Self::Node> {
        self.raw.root()
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::tests::assert_red_black;
    use super::*;
    use crate::test::quick::Op;

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            let mut tree = Tree::new();
            let mut map = BTreeMap::new();

            for op in &ops {
                match *op {
                    Op::Insert(k, v) => {
                        tree.insert(k, v);
                        map.insert(k, v);
                    }
                    Op::Remove(k) => {
                        assert_eq!(tree.delete(&k).ok(), map.remove(&k));
                    }
                    Op::Iter => {
                        assert!(tree.iter().eq(map.iter()));
                    }
                }
                assert_red_black(&tree);
            }
            tree.len() == map.len() && map.keys().all(|key| tree.search(key).ok() == map.get(key))
        }
    }
}
