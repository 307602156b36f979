//! Tree construction errors.

use thiserror::Error;

use crate::{shapes::Aabb, P2};

/// Errors that can occur while building a [`QuadTree`](crate::QuadTree).
///
/// Inserting a point outside the tree is not an error; `insert` returns `false`.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum QuadTreeError {
    #[error("Node capacity must be at least 1")]
    ZeroCapacity,

    #[error("Invalid boundary: {0:?} (center must be finite, half extent finite and non-negative)")]
    InvalidBoundary(Aabb),

    #[error("Item at {0:?} lies outside the boundary")]
    OutsideBoundary(P2),
}
