//! Walks over the entries of any binary tree in one of five orders.
//!
//! Every traversal is a lazy iterator of `(&K, &V)` pairs that borrows the tree. Nothing is
//! collected up front: each iterator only keeps the positions it still has to visit (a stack, or
//! a queue for [`level_order`]). Because the tree stays borrowed for the iterator's lifetime it
//! can't be mutated mid-walk. Calling a traversal again starts over from the root.
//!
//! # Examples
//!
//! ```
//! use trees::avl::Tree;
//! use trees::traversal::{self, Order};
//!
//! let tree: Tree<_, _> = [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
//!
//! let keys: Vec<_> = traversal::in_order(&tree).map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 2, 3]);
//!
//! let keys: Vec<_> = traversal::traverse(&tree, Order::PreOrder).map(|(k, _)| *k).collect();
//! assert_eq!(keys, [2, 1, 3]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use crate::error::ParseOrderError;
use crate::node::Node;

/// A node that can be walked without knowing how its tree is balanced.
pub trait TreeNode {
    /// Key type of the tree.
    type Key;
    /// Value type of the tree.
    type Value;

    /// The node's key.
    fn key(&self) -> &Self::Key;
    /// The node's value.
    fn value(&self) -> &Self::Value;
    /// Root of the left subtree.
    fn left(&self) -> Option<&Self>;
    /// Root of the right subtree.
    fn right(&self) -> Option<&Self>;
}

/// A tree whose nodes can be walked.
pub trait BinaryTree {
    /// The tree's node type.
    type Node: TreeNode;

    /// The root node, or `None` for an empty tree.
    fn root(&self) -> Option<&Self::Node>;
}

impl<K, V, M> TreeNode for Node<K, V, M> {
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        Node::key(self)
    }

    fn value(&self) -> &V {
        Node::value(self)
    }

    fn left(&self) -> Option<&Self> {
        Node::left(self)
    }

    fn right(&self) -> Option<&Self> {
        Node::right(self)
    }
}

type Entry<'a, N> = (&'a <N as TreeNode>::Key, &'a <N as TreeNode>::Value);

fn entry<N: TreeNode>(node: &N) -> Entry<'_, N> {
    (node.key(), node.value())
}

/// The order a traversal visits nodes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Left subtree, node, right subtree. Ascending key order.
    InOrder,
    /// Right subtree, node, left subtree. Descending key order.
    ReverseInOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
    /// Breadth first, root first, each level left to right.
    LevelOrder,
}

impl Order {
    /// Every order, in declaration order.
    pub const ALL: [Order; 5] = [
        Order::InOrder,
        Order::ReverseInOrder,
        Order::PreOrder,
        Order::PostOrder,
        Order::LevelOrder,
    ];

    /// The short name this order parses from.
    pub fn name(self) -> &'static str {
        match self {
            Order::InOrder => "in",
            Order::ReverseInOrder => "reverse-in",
            Order::PreOrder => "pre",
            Order::PostOrder => "post",
            Order::LevelOrder => "level",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" | "inorder" | "in-order" => Ok(Order::InOrder),
            "reverse-in" | "reverse" | "out" | "outorder" => Ok(Order::ReverseInOrder),
            "pre" | "preorder" | "pre-order" => Ok(Order::PreOrder),
            "post" | "postorder" | "post-order" => Ok(Order::PostOrder),
            "level" | "levelorder" | "level-order" => Ok(Order::LevelOrder),
            _ => Err(ParseOrderError(s.to_string())),
        }
    }
}

/// Walks `tree` in the given `order`.
pub fn traverse<T: BinaryTree>(tree: &T, order: Order) -> Traversal<'_, T::Node> {
    match order {
        Order::InOrder => Traversal::InOrder(in_order(tree)),
        Order::ReverseInOrder => Traversal::ReverseInOrder(reverse_in_order(tree)),
        Order::PreOrder => Traversal::PreOrder(pre_order(tree)),
        Order::PostOrder => Traversal::PostOrder(post_order(tree)),
        Order::LevelOrder => Traversal::LevelOrder(level_order(tree)),
    }
}

/// Walks `tree` in ascending key order.
pub fn in_order<T: BinaryTree>(tree: &T) -> InOrder<'_, T::Node> {
    let mut iter = InOrder { stack: Vec::new() };
    iter.push_left_spine(tree.root());
    iter
}

/// Walks `tree` in descending key order.
pub fn reverse_in_order<T: BinaryTree>(tree: &T) -> ReverseInOrder<'_, T::Node> {
    let mut iter = ReverseInOrder { stack: Vec::new() };
    iter.push_right_spine(tree.root());
    iter
}

/// Walks `tree` visiting each node before its subtrees.
pub fn pre_order<T: BinaryTree>(tree: &T) -> PreOrder<'_, T::Node> {
    PreOrder {
        stack: tree.root().into_iter().collect(),
    }
}

/// Walks `tree` visiting each node after its subtrees.
pub fn post_order<T: BinaryTree>(tree: &T) -> PostOrder<'_, T::Node> {
    PostOrder {
        stack: tree.root().map(|root| (root, false)).into_iter().collect(),
    }
}

/// Walks `tree` level by level.
pub fn level_order<T: BinaryTree>(tree: &T) -> LevelOrder<'_, T::Node> {
    LevelOrder {
        queue: tree.root().into_iter().collect(),
    }
}

/// Iterator returned by [`traverse`]. Dispatches to the iterator of the chosen [`Order`].
pub enum Traversal<'a, N> {
    /// See [`in_order`].
    InOrder(InOrder<'a, N>),
    /// See [`reverse_in_order`].
    ReverseInOrder(ReverseInOrder<'a, N>),
    /// See [`pre_order`].
    PreOrder(PreOrder<'a, N>),
    /// See [`post_order`].
    PostOrder(PostOrder<'a, N>),
    /// See [`level_order`].
    LevelOrder(LevelOrder<'a, N>),
}

impl<'a, N: TreeNode> Iterator for Traversal<'a, N> {
    type Item = Entry<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traversal::InOrder(iter) => iter.next(),
            Traversal::ReverseInOrder(iter) => iter.next(),
            Traversal::PreOrder(iter) => iter.next(),
            Traversal::PostOrder(iter) => iter.next(),
            Traversal::LevelOrder(iter) => iter.next(),
        }
    }
}

impl<N: TreeNode> FusedIterator for Traversal<'_, N> {}

/// Iterator returned by [`in_order`].
pub struct InOrder<'a, N> {
    /// Nodes whose left subtree is being (or has been) visited, innermost last.
    stack: Vec<&'a N>,
}

impl<'a, N: TreeNode> InOrder<'a, N> {
    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, N: TreeNode> Iterator for InOrder<'a, N> {
    type Item = Entry<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(entry(node))
    }
}

impl<N: TreeNode> FusedIterator for InOrder<'_, N> {}

/// Iterator returned by [`reverse_in_order`].
pub struct ReverseInOrder<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: TreeNode> ReverseInOrder<'a, N> {
    fn push_right_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.right();
        }
    }
}

impl<'a, N: TreeNode> Iterator for ReverseInOrder<'a, N> {
    type Item = Entry<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_right_spine(node.left());
        Some(entry(node))
    }
}

impl<N: TreeNode> FusedIterator for ReverseInOrder<'_, N> {}

/// Iterator returned by [`pre_order`].
pub struct PreOrder<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: TreeNode> Iterator for PreOrder<'a, N> {
    type Item = Entry<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree is popped (and visited) first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(entry(node))
    }
}

impl<N: TreeNode> FusedIterator for PreOrder<'_, N> {}

/// Iterator returned by [`post_order`].
pub struct PostOrder<'a, N> {
    /// Pending nodes and whether their children have already been pushed.
    stack: Vec<(&'a N, bool)>,
}

impl<'a, N: TreeNode> Iterator for PostOrder<'a, N> {
    type Item = Entry<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(entry(node));
            }
            self.stack.push((node, true));
            self.stack.extend(node.right().map(|right| (right, false)));
            self.stack.extend(node.left().map(|left| (left, false)));
        }
        None
    }
}

impl<N: TreeNode> FusedIterator for PostOrder<'_, N> {}

/// Iterator returned by [`level_order`].
pub struct LevelOrder<'a, N> {
    queue: VecDeque<&'a N>,
}

impl<'a, N: TreeNode> Iterator for LevelOrder<'a, N> {
    type Item = Entry<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(entry(node))
    }
}

impl<N: TreeNode> FusedIterator for LevelOrder<'_, N> {}
