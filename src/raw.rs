//! The balancing-agnostic half of a binary search tree. Both balanced trees wrap a [`RawTree`]
//! and layer their own rebalancing on top of the primitives here: ordered descent, attaching a
//! leaf, splicing a node out, and rotating around an edge.
//!
//! Everything in here works on `NonNull` node pointers. Nodes are allocated with `Box::new` and
//! leaked into the tree on insert, and turned back into a `Box` exactly once: when they are
//! spliced out by [`RawTree::remove`] or when the tree is dropped.

use std::cmp::Ordering;
use std::fmt;
use std::ptr::NonNull;

use crate::node::{Iter, Link, Node, Side};

pub(crate) type NodePtr<K, V, M> = NonNull<Node<K, V, M>>;

/// Result of [`RawTree::insert`].
pub(crate) enum Inserted<K, V, M> {
    /// The key was already present. Its value was replaced with the new one.
    Replaced,
    /// A new leaf was attached at this position. The tree may now need rebalancing.
    Created(NodePtr<K, V, M>),
}

/// What [`RawTree::remove`] spliced out of the tree and where.
pub(crate) struct Removed<K, V, M> {
    pub(crate) value: V,
    /// Metadata of the node that was physically unlinked. When the removed key had two children
    /// this is the successor's metadata, not the metadata of the node that held the key.
    pub(crate) meta: M,
    /// Former parent of the unlinked node. Upward fix-ups start here.
    pub(crate) parent: Link<K, V, M>,
    /// The (possibly empty) subtree promoted into the unlinked node's slot.
    pub(crate) child: Link<K, V, M>,
    /// Which child of `parent` the promoted subtree now is. Meaningless when `parent` is empty.
    pub(crate) side: Side,
}

pub(crate) struct RawTree<K, V, M> {
    // This is a `Link` instead of an `Option<Node>` so that it can be moved around with the tree
    // without the children's parent pointers breaking.
    root: Link<K, V, M>,
    len: usize,
}

impl<K, V, M> Drop for RawTree<K, V, M> {
    fn drop(&mut self) {
        let mut stack: Vec<NodePtr<K, V, M>> = self.root.0.take().into_iter().collect();
        while let Some(node) = stack.pop() {
            // SAFETY: Every node is reachable from exactly one child link (or the root) so each
            // is pushed once. They were allocated with `Box::new` in `Node::new_boxed` and nothing
            // else frees them.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            stack.extend(node.left.0);
            stack.extend(node.right.0);
        }
    }
}

impl<K, V, M> Clone for RawTree<K, V, M>
where
    K: Clone,
    V: Clone,
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: Link(self.root().map(|root| clone_subtree(root, Link::EMPTY))),
            len: self.len,
        }
    }
}

/// Deep copies `node` and everything below it, hanging the copy from `parent`.
fn clone_subtree<K, V, M>(node: &Node<K, V, M>, parent: Link<K, V, M>) -> NodePtr<K, V, M>
where
    K: Clone,
    V: Clone,
    M: Clone,
{
    let copy = Node::new_boxed(
        node.key.clone(),
        node.value.clone(),
        node.meta.clone(),
        parent,
    );
    let mut copy = NonNull::from(Box::leak(copy));
    let left = node.left().map(|left| clone_subtree(left, Link::to(copy)));
    let right = node.right().map(|right| clone_subtree(right, Link::to(copy)));
    // SAFETY: `copy` was just leaked and nothing else references it yet.
    unsafe {
        copy.as_mut().left = Link(left);
        copy.as_mut().right = Link(right);
    }
    copy
}

impl<K, V, M> fmt::Debug for RawTree<K, V, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
    M: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root())
            .finish()
    }
}

impl<K, V, M> RawTree<K, V, M> {
    pub(crate) fn new() -> Self {
        Self {
            root: Link::EMPTY,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn root(&self) -> Option<&Node<K, V, M>> {
        self.root.get()
    }

    pub(crate) fn root_link(&self) -> Link<K, V, M> {
        self.root
    }

    pub(crate) fn first(&self) -> Option<&Node<K, V, M>> {
        self.root().map(Node::leftmost)
    }

    pub(crate) fn last(&self) -> Option<&Node<K, V, M>> {
        self.root().map(Node::rightmost)
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V, M> {
        Iter {
            next: self.first(),
            remaining: self.len,
        }
    }

    /// Number of levels in the tree, counted by walking it. Trees that track heights should
    /// prefer their own bookkeeping.
    pub(crate) fn height(&self) -> usize {
        fn subtree_height<K, V, M>(node: Option<&Node<K, V, M>>) -> usize {
            node.map_or(0, |n| 1 + subtree_height(n.left()).max(subtree_height(n.right())))
        }
        subtree_height(self.root())
    }

    pub(crate) fn get(&self, key: &K) -> Option<&Node<K, V, M>>
    where
        K: Ord,
    {
        // SAFETY: `find` only returns pointers to live nodes of this tree and `&self` rules out
        // concurrent mutation.
        self.find(key).map(|node| unsafe { &*node.as_ptr() })
    }

    /// Descends from the root comparing `key` at each node.
    pub(crate) fn find(&self, key: &K) -> Option<NodePtr<K, V, M>>
    where
        K: Ord,
    {
        let mut current = self.root.0;
        while let Some(node) = current {
            // SAFETY: Links only point at live nodes. The reference doesn't outlive this loop
            // iteration.
            let node_ref = unsafe { node.as_ref() };
            current = match key.cmp(&node_ref.key) {
                Ordering::Less => node_ref.left.0,
                Ordering::Equal => return Some(node),
                Ordering::Greater => node_ref.right.0,
            };
        }
        None
    }

    /// Inserts `value` at `key`. An existing key has its value overwritten in place. Otherwise a
    /// new leaf carrying `meta` is attached in the empty slot the descent ended at.
    pub(crate) fn insert(&mut self, key: K, value: V, meta: M) -> Inserted<K, V, M>
    where
        K: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root.0;
        while let Some(mut node) = current {
            // SAFETY: We hold `&mut self` so no other reference into the tree exists. The
            // reference doesn't outlive this loop iteration.
            let node_mut = unsafe { node.as_mut() };
            side = match key.cmp(&node_mut.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => {
                    node_mut.value = value;
                    return Inserted::Replaced;
                }
                Ordering::Greater => Side::Right,
            };
            current = node_mut.child(side).0;
            parent = Some(node);
        }

        let new = NonNull::from(Box::leak(Node::new_boxed(key, value, meta, Link(parent))));
        match parent {
            None => self.root = Link::to(new),
            // SAFETY: `parent` is a live node of this tree and the reference from the loop above
            // has ended.
            Some(mut parent) => unsafe { parent.as_mut().set_child(side, Link::to(new)) },
        }
        self.len += 1;

        if cfg!(debug_assertions) {
            // SAFETY: `new` was just attached and is live.
            let new = unsafe { new.as_ref() };
            if let Some(parent) = new.parent() {
                match side {
                    Side::Left => assert!(new.key < parent.key),
                    Side::Right => assert!(new.key > parent.key),
                }
            }
        }

        Inserted::Created(new)
    }

    /// Unlinks the entry held by `node` and frees one node.
    ///
    /// When `node` has two children its key and value are swapped with its in-order successor's
    /// and the successor's node (which has no left child) is the one spliced out. Either way the
    /// unlinked node has at most one child, which is promoted into its slot.
    ///
    /// `node` must belong to this tree.
    pub(crate) fn remove(&mut self, mut node: NodePtr<K, V, M>) -> Removed<K, V, M> {
        // SAFETY: `node` belongs to this tree and we hold `&mut self`. The references created in
        // here are short lived and never overlap for the same node.
        unsafe {
            if let (Some(_), Some(right)) = (node.as_ref().left.0, node.as_ref().right.0) {
                let mut successor = right;
                while let Some(left) = successor.as_ref().left.0 {
                    successor = left;
                }
                std::mem::swap(&mut node.as_mut().key, &mut successor.as_mut().key);
                std::mem::swap(&mut node.as_mut().value, &mut successor.as_mut().value);
                node = successor;
            }

            let unlinked = node.as_ref();
            let child = match unlinked.left.0 {
                Some(_) => unlinked.left,
                None => unlinked.right,
            };
            let parent = unlinked.parent;
            let side = match parent.get() {
                Some(p) if p.right.is(unlinked) => Side::Right,
                _ => Side::Left,
            };
            self.replace_child(parent, node, child);
            self.len -= 1;

            // `Node` has no `Drop` impl and its children have been handed over to `parent`, so
            // moving the fields out frees just this one allocation.
            let unlinked = *Box::from_raw(node.as_ptr());
            Removed {
                value: unlinked.value,
                meta: unlinked.meta,
                parent,
                child,
                side,
            }
        }
    }

    /// Puts `new` where `old` hangs from `parent` (or at the root) and points `new` back at
    /// `parent`. `old`'s own links are left untouched.
    fn replace_child(
        &mut self,
        parent: Link<K, V, M>,
        old: NodePtr<K, V, M>,
        new: Link<K, V, M>,
    ) {
        match parent.0 {
            None => self.root = new,
            // SAFETY: `parent` is a live node of this tree and we hold `&mut self`.
            Some(mut parent) => unsafe {
                let parent = parent.as_mut();
                if parent.left.0 == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            },
        }
        if let Some(mut new) = new.0 {
            // SAFETY: As above.
            unsafe { new.as_mut().parent = parent };
        }
    }

    /// Rotates `node` down towards `side`. Its child on the opposite side (the pivot) moves up
    /// into its place and the pivot's inner subtree moves across to `node`. Returns the pivot,
    /// the new root of the subtree. Metadata is left for the caller to fix.
    ///
    /// ## Panics
    ///
    /// When `node` has no child on the opposite side of `side`.
    ///
    /// # Diagram
    ///
    /// Rotating to the right:
    ///
    /// ```text
    ///    Option<parent>          Option<parent>
    ///      /                       /
    ///    node                    pivot
    ///    /   \                   /   \
    /// pivot   z    rotate ->    x    node
    ///  / \                           /  \
    /// x   y                         y    z
    /// ```
    pub(crate) fn rotate(&mut self, mut node: NodePtr<K, V, M>, side: Side) -> NodePtr<K, V, M> {
        // SAFETY: `node` belongs to this tree and we hold `&mut self`. `node`, `pivot` and
        // `inner` are three distinct nodes so no two live `&mut` alias.
        unsafe {
            let mut pivot = node
                .as_ref()
                .child(side.opposite())
                .0
                .expect("Rotation requires a child to lift");
            let inner = pivot.as_ref().child(side);

            node.as_mut().set_child(side.opposite(), inner);
            if let Some(mut inner) = inner.0 {
                inner.as_mut().parent = Link::to(node);
            }

            let parent = node.as_ref().parent;
            self.replace_child(parent, node, Link::to(pivot));

            pivot.as_mut().set_child(side, Link::to(node));
            node.as_mut().parent = Link::to(pivot);
            pivot
        }
    }
}

/// Which child of `parent` `node` is.
pub(crate) fn side_of<K, V, M>(parent: &Node<K, V, M>, node: NodePtr<K, V, M>) -> Side {
    if parent.left.0 == Some(node) {
        Side::Left
    } else {
        Side::Right
    }
}
