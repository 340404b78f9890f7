//! This crate exposes two self-balancing Binary Search Trees (BSTs) behind a common keyed map
//! interface, along with lazy traversals over either of them.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and a value
//! and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## Balancing
//!
//! Inserting keys in sorted order into a plain BST builds a linked list. Both trees here restore
//! an `O(lg N)` height after every insert and delete:
//!
//! - [`avl::Tree`] keeps the heights of every node's two subtrees within one of each other.
//! - [`red_black::Tree`] colors its nodes so no path is more than twice as long as any other.
//!
//! Both store their nodes the same way (see [`node`]), report missing keys with
//! [`Error::KeyNotFound`], and can be walked in any [`traversal::Order`]. [`map::build`] picks one
//! at runtime.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
mod error;
pub mod map;
pub mod node;
mod raw;
pub mod red_black;
pub mod traversal;

pub use error::{Error, ParseOrderError, ParseTreeKindError, Result};
pub use map::{OrderedMap, TreeKind};
pub use traversal::Order;
