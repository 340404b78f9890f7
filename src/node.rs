//! The storage unit shared by every tree in this crate.
//!
//! A [`Node`] owns its two children and keeps a non-owning pointer back to its parent. The last
//! type parameter `M` is the balancing metadata of whichever tree built the node: a height for
//! [`avl`](crate::avl) trees and a [`Color`](crate::red_black::Color) for
//! [`red_black`](crate::red_black) trees. Nodes are only ever handed out behind shared
//! references, so callers can walk a tree but never restructure it.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr::NonNull;

/// A pointer to a heap allocated `Node`, or nothing.
///
/// Child links own the node they point to. Parent links don't.
pub(crate) struct Link<K, V, M>(pub(crate) Option<NonNull<Node<K, V, M>>>);

impl<K, V, M> Clone for Link<K, V, M> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K, V, M> Copy for Link<K, V, M> {}

impl<K, V, M> PartialEq for Link<K, V, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<K, V, M> Eq for Link<K, V, M> {}

impl<K, V, M> Link<K, V, M> {
    pub(crate) const EMPTY: Self = Link(None);

    pub(crate) fn to(node: NonNull<Node<K, V, M>>) -> Self {
        Link(Some(node))
    }

    pub(crate) fn get(&self) -> Option<&Node<K, V, M>> {
        // SAFETY: A non-empty link always points at a live node owned by the tree the link belongs
        // to. Nodes are only mutated through `&mut` access to that tree so no mutable alias can
        // exist while the returned reference does.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    /// Whether this link points at `node`.
    pub(crate) fn is(&self, node: &Node<K, V, M>) -> bool {
        self.0 == Some(NonNull::from(node))
    }
}

/// Which child of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single key/value entry of a tree along with its links and balancing metadata.
pub struct Node<K, V, M> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) meta: M,
    pub(crate) left: Link<K, V, M>,
    pub(crate) right: Link<K, V, M>,
    pub(crate) parent: Link<K, V, M>,
}

impl<K, V, M> fmt::Debug for Node<K, V, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
    M: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("meta", &self.meta)
            .field("value", &self.value)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<K, V, M> Node<K, V, M> {
    pub(crate) fn new_boxed(key: K, value: V, meta: M, parent: Link<K, V, M>) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            meta,
            left: Link::EMPTY,
            right: Link::EMPTY,
            parent,
        })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value stored in this node.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.get()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.get()
    }

    /// The node this node hangs from. `None` for the root.
    pub fn parent(&self) -> Option<&Self> {
        self.parent.get()
    }

    pub(crate) fn child(&self, side: Side) -> Link<K, V, M> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link<K, V, M>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// The node with the smallest key in this subtree.
    pub(crate) fn leftmost(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// The node with the largest key in this subtree.
    pub(crate) fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// The in-order successor of this node, found by walking parent links when there is no
    /// right subtree.
    pub(crate) fn next(&self) -> Option<&Self> {
        if let Some(right) = self.right() {
            return Some(right.leftmost());
        }
        let mut child = self;
        while let Some(parent) = child.parent() {
            if parent.left.is(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// The in-order predecessor of this node. Mirror image of [`Node::next`].
    pub(crate) fn prev(&self) -> Option<&Self> {
        if let Some(left) = self.left() {
            return Some(left.rightmost());
        }
        let mut child = self;
        while let Some(parent) = child.parent() {
            if parent.right.is(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    pub(crate) fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

/// An ascending iterator over the entries of a tree.
///
/// Unlike the iterators in [`traversal`](crate::traversal) this one keeps no stack. It moves
/// from node to node through parent links.
pub struct Iter<'a, K, V, M> {
    pub(crate) next: Option<&'a Node<K, V, M>>,
    pub(crate) remaining: usize,
}

impl<'a, K, V, M> Iterator for Iter<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next();
        self.remaining -= 1;
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, M> ExactSizeIterator for Iter<'_, K, V, M> {}
impl<K, V, M> FusedIterator for Iter<'_, K, V, M> {}

impl<K, V, M> Clone for Iter<'_, K, V, M> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
        }
    }
}
