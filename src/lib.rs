//! A point quadtree for spatial indexing on a bounded plane.
//!
//! The tree partitions an axis-aligned bounding box ([`Aabb`]) into quadrants
//! on demand: each node buckets up to `node_capacity` items and splits into four
//! children the first time an insertion finds it full. Range queries prune every
//! subtree whose boundary does not touch the query box.
//!
//! All geometry is closed: points on an edge are inside, and boxes that only
//! share an edge intersect. A point lying exactly on a quadrant seam goes to the
//! first quadrant that contains it, in northwest, northeast, southwest,
//! southeast order.
//!
//! Coordinates are expected to be finite. A NaN coordinate fails every
//! comparison, so such a point is never contained anywhere and insertion simply
//! returns `false`.
//!
//! ```
//! use aabb_quadtree::{Aabb, QuadTree};
//! use nalgebra::{point, vector};
//!
//! let boundary = Aabb::new(point![0.0, 0.0], vector![10.0, 10.0]);
//! let mut qt = QuadTree::new(boundary, 4).unwrap();
//! assert!(qt.insert(&point![5.0, 5.0]));
//! assert!(!qt.insert(&point![11.0, 0.0]));
//!
//! let found = qt.search_area(&Aabb::new(point![5.0, 5.0], vector![1.0, 1.0]));
//! assert_eq!(found, vec![&point![5.0, 5.0]]);
//! ```

mod error;
mod quadtree;
mod shapes;
mod util;

use nalgebra::{Point2, Vector2};

pub use error::QuadTreeError;
pub use quadtree::{QuadTree, DEFAULT_MAX_DEPTH, DEFAULT_NODE_CAPACITY};
pub use shapes::Aabb;
pub use util::Quadrant;

/// A 2d point
pub type P2 = Point2<f64>;

/// A 2d vector, used for half extents
pub type V2 = Vector2<f64>;

/// Trait for getting a 2d point position of data stored in the [`QuadTree`]
///
/// The position must not change while the item is stored in a tree.
pub trait Point {
    /// Get 2d point position
    fn point(&self) -> P2;
}

impl Point for P2 {
    fn point(&self) -> P2 {
        *self
    }
}
