//! Picking a tree at runtime.
//!
//! Both trees expose the same operations. [`OrderedMap`] names them so callers can hold either
//! engine behind a `Box<dyn OrderedMap<K, V>>` and choose one by [`TreeKind`], typically parsed
//! from a string.
//!
//! ```
//! use trees::map::{self, TreeKind};
//! use trees::traversal::Order;
//!
//! let kind: TreeKind = "rb".parse().unwrap();
//! let mut tree = map::build(kind, [(2, "two"), (1, "one"), (3, "three")]);
//!
//! tree.insert(4, "four");
//! assert_eq!(tree.delete(&2), Ok("two"));
//! assert_eq!(
//!     tree.traverse(Order::InOrder).map(|(k, _)| *k).collect::<Vec<_>>(),
//!     [1, 3, 4]
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseTreeKindError, Result};
use crate::traversal::Order;
use crate::{avl, red_black};

/// The operations shared by every tree in this crate.
pub trait OrderedMap<K, V> {
    /// Finds the value stored at `key`.
    fn search(&self, key: &K) -> Result<&V>;

    /// Stores `value` at `key`, overwriting any previous value.
    fn insert(&mut self, key: K, value: V);

    /// Removes `key` and returns its value.
    fn delete(&mut self, key: &K) -> Result<V>;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walks the entries in the given order.
    fn traverse(&self, order: Order) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;
}

impl<K: Ord, V> OrderedMap<K, V> for avl::Tree<K, V> {
    fn search(&self, key: &K) -> Result<&V> {
        avl::Tree::search(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        avl::Tree::insert(self, key, value);
    }

    fn delete(&mut self, key: &K) -> Result<V> {
        avl::Tree::delete(self, key)
    }

    fn len(&self) -> usize {
        avl::Tree::len(self)
    }

    fn traverse(&self, order: Order) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(avl::Tree::traverse(self, order))
    }
}

impl<K: Ord, V> OrderedMap<K, V> for red_black::Tree<K, V> {
    fn search(&self, key: &K) -> Result<&V> {
        red_black::Tree::search(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        red_black::Tree::insert(self, key, value);
    }

    fn delete(&mut self, key: &K) -> Result<V> {
        red_black::Tree::delete(self, key)
    }

    fn len(&self) -> usize {
        red_black::Tree::len(self)
    }

    fn traverse(&self, order: Order) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(red_black::Tree::traverse(self, order))
    }
}

/// Which balancing engine to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TreeKind {
    /// [`avl::Tree`]. Parsed from `avl`.
    #[default]
    Avl,
    /// [`red_black::Tree`]. Parsed from `rb`, `red-black` or `redblack`.
    RedBlack,
}

impl TreeKind {
    /// Both kinds, AVL first.
    pub const ALL: [TreeKind; 2] = [TreeKind::Avl, TreeKind::RedBlack];

    /// The canonical name, which also parses back to this kind.
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Avl => "avl",
            TreeKind::RedBlack => "rb",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeKind {
    type Err = ParseTreeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avl" => Ok(TreeKind::Avl),
            "rb" | "red-black" | "redblack" | "red_black" => Ok(TreeKind::RedBlack),
            _ => Err(ParseTreeKindError(s.to_string())),
        }
    }
}

/// Builds an empty tree of the given kind and inserts every pair into it, in order.
pub fn build<K, V, I>(kind: TreeKind, pairs: I) -> Box<dyn OrderedMap<K, V>>
where
    K: Ord + 'static,
    V: 'static,
    I: IntoIterator<Item = (K, V)>,
{
    match kind {
        TreeKind::Avl => Box::new(pairs.into_iter().collect::<avl::Tree<K, V>>()),
        TreeKind::RedBlack => Box::new(pairs.into_iter().collect::<red_black::Tree<K, V>>()),
    }
}
