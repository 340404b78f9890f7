//! A height balanced BST (an AVL tree).
//!
//! Every node stores the height of its subtree. After a structural change the tree walks from
//! the changed position back up to the root through parent links, refreshing heights and rotating
//! wherever the two subtrees of a node differ in height by more than one.
//!
//! # Examples
//!
//! ```
//! use trees::avl::Tree;
//! use trees::Error;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), Err(Error::KeyNotFound));
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.search(&1), Ok(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! tree.insert(1, 3);
//! assert_eq!(tree.search(&1), Ok(&3));
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(&1), Ok(3));
//! assert_eq!(tree.search(&1), Err(Error::KeyNotFound));
//! ```

use std::fmt;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::node::{self, Iter, Link, Side};
use crate::raw::{Inserted, NodePtr, RawTree};
use crate::traversal::{self, BinaryTree, Order, Traversal};

/// Balancing metadata of an AVL node: the number of levels in its subtree. A leaf has height 1.
pub type Height = usize;

/// A node of an AVL [`Tree`].
pub type Node<K, V> = node::Node<K, V, Height>;

impl<K, V> Node<K, V> {
    /// How many levels are in the subtree rooted at this node.
    pub fn height(&self) -> usize {
        self.meta
    }
}

/// Height of the subtree behind `link`. Empty subtrees have height 0.
fn height<K, V>(link: Link<K, V, Height>) -> usize {
    link.get().map_or(0, Node::height)
}

/// Adjusts the height of `node` to be the max of its children's heights + 1.
fn fix_height<K, V>(mut node: NodePtr<K, V, Height>) {
    // SAFETY: Callers hold `&mut` access to the tree `node` belongs to and no other reference
    // into it is live.
    let node = unsafe { node.as_mut() };
    node.meta = height(node.left).max(height(node.right)) + 1;
}

/// `height(left) - height(right)`. Positive when the node leans left.
fn balance_factor<K, V>(node: NodePtr<K, V, Height>) -> isize {
    // SAFETY: See `fix_height`.
    let node = unsafe { node.as_ref() };
    height(node.left) as isize - height(node.right) as isize
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can be used for
/// inserting, finding, and deleting keys and values.
pub struct Tree<K, V> {
    raw: RawTree<K, V, Height>,
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
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::avl::Tree;
    ///
    /// // Ascending inserts would build a linked list without rebalancing.
    /// let tree: Tree<_, _> = (1..=7).map(|k| (k, k)).collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        height(self.raw.root_link())
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
    pub fn iter(&self) -> Iter<'_, K, V, Height> {
        self.raw.iter()
    }

    /// Walks the tree in the given order. See [`traversal`] for the available orders.
    pub fn traverse(&self, order: Order) -> Traversal<'_, Node<K, V>> {
        traversal::traverse(self, order)
    }

    /// Finds the value associated with the given key. If no node has the key,
    /// [`Error::KeyNotFound`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::avl::Tree;
    /// use trees::Error;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.search(&1), Ok(&2));
    /// assert_eq!(tree.search(&42), Err(Error::KeyNotFound));
    /// ```
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
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::avl::Tree;
    ///
    /// let tree: Tree<_, _> = [(1, 'a'), (5, 'e'), (9, 'i')].into_iter().collect();
    /// assert_eq!(tree.successor(&5), Ok(Some((&9, &'i'))));
    /// assert_eq!(tree.successor(&9), Ok(None));
    /// assert!(tree.successor(&4).is_err());
    /// ```
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
    /// existing key overwites its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// assert_eq!(tree.search(&1), Ok(&2));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.search(&1), Ok(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        if let Inserted::Created(node) = self.raw.insert(key, value, 1) {
            // SAFETY: `node` was just attached to this tree.
            let parent = unsafe { node.as_ref() }.parent;
            self.rebalance_from(parent);
        }
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, [`Error::KeyNotFound`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::avl::Tree;
    /// use trees::Error;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.delete(&1), Ok(2));
    /// assert_eq!(tree.delete(&1), Err(Error::KeyNotFound));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<V>
    where
        K: Ord,
    {
        let node = self.raw.find(key).ok_or(Error::KeyNotFound)?;
        let removed = self.raw.remove(node);
        self.rebalance_from(removed.parent);
        Ok(removed.value)
    }

    /// Walks from `start` up to the root, rebalancing every node on the way. Rotations change the
    /// heights of the ancestors above them so the walk never stops early.
    fn rebalance_from(&mut self, mut current: Link<K, V, Height>) {
        while let Some(node) = current.0 {
            let subtree = self.rebalance(node);
            // SAFETY: `subtree` is a live node of this tree.
            current = unsafe { subtree.as_ref() }.parent;
        }
    }

    /// Refreshes the height of `node` and rotates if its subtrees differ in height by more than
    /// one. Returns whichever node now roots the subtree.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn rebalance(&mut self, node: NodePtr<K, V, Height>) -> NodePtr<K, V, Height> {
        fix_height(node);
        // SAFETY: `node` is a live node of this tree. The reference is only used to read links.
        let node_ref = unsafe { node.as_ref() };

        let subtree = match balance_factor(node) {
            factor if factor > 1 => {
                let left = node_ref.left.0.expect("Left heavy => left child");
                if balance_factor(left) >= 0 {
                    debug!("avl: left-left imbalance");
                } else {
                    debug!("avl: left-right imbalance");
                    self.rotate(left, Side::Left);
                }
                self.rotate(node, Side::Right)
            }
            factor if factor < -1 => {
                let right = node_ref.right.0.expect("Right heavy => right child");
                if balance_factor(right) <= 0 {
                    debug!("avl: right-right imbalance");
                } else {
                    debug!("avl: right-left imbalance");
                    self.rotate(right, Side::Right);
                }
                self.rotate(node, Side::Left)
            }
            _ => node,
        };

        if cfg!(debug_assertions) {
            // SAFETY: As above.
            let subtree = unsafe { subtree.as_ref() };
            let left_height = height(subtree.left);
            let right_height = height(subtree.right);
            assert_eq!(subtree.meta, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
        subtree
    }

    /// Rotates `node` down towards `side` and refreshes the heights of the two nodes that moved,
    /// lower one first.
    fn rotate(&mut self, node: NodePtr<K, V, Height>, side: Side) -> NodePtr<K, V, Height> {
        trace!("avl: rotating {side:?}");
        let pivot = self.raw.rotate(node, side);
        fix_height(node);
        fix_height(pivot);
        pivot
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
    type IntoIter = Iter<'a, K, V, Height>;

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
