//! Errors reported by the trees and by the string selectors used to configure them.

use thiserror::Error;

/// The error returned by lookups and removals on a tree.
///
/// An empty tree and a populated tree without the requested key are reported the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// No node in the tree holds the requested key.
    #[error("key not found")]
    KeyNotFound,
}

/// Shorthand for results whose error defaults to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returned when parsing a [`TreeKind`](crate::map::TreeKind) from an unrecognized name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tree kind `{0}` (expected `avl` or `rb`)")]
pub struct ParseTreeKindError(pub(crate) String);

/// Returned when parsing a traversal [`Order`](crate::traversal::Order) from an unrecognized
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown traversal order `{0}` (expected `in`, `reverse-in`, `pre`, `post` or `level`)")]
pub struct ParseOrderError(pub(crate) String);
