use tracing::{debug, trace};

use crate::{error::QuadTreeError, shapes::Aabb, util::determine_quadrant, Point, P2};

/// Node capacity used by [`QuadTree::with_default_capacity`]
pub const DEFAULT_NODE_CAPACITY: usize = 4;

/// Depth at which nodes stop subdividing unless [`QuadTree::with_max_depth`] says otherwise
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// A generic QuadTree implementation for spatial indexing of 2D points.
///
/// Every node holds up to `node_capacity` items until an insertion finds it full, at
/// which point it splits once into four quadrant children and hands its items down.
/// Nodes are never merged or removed.
///
/// Mutation needs `&mut self`, so the tree has a single writer; any number of
/// readers may search it concurrently.
///
/// With the `serde` feature a tree is stored as its boundary, limits and items, and is
/// rebuilt by inserting the items again on load, so a snapshot that
/// [`QuadTree::new`] would reject, or that holds an item outside its boundary, fails
/// to deserialize.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "Snapshot<T>",
        into = "Snapshot<T>",
        bound(
            serialize = "T: Point + Clone + serde::Serialize",
            deserialize = "T: Point + Clone + serde::Deserialize<'de>"
        )
    )
)]
pub struct QuadTree<T> {
    root: Node<T>,
    limits: Limits,
    len: usize,
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    node_capacity: usize,
    max_depth: usize,
}

impl<T: Point + Clone> QuadTree<T> {
    /// Create a new empty quadtree
    ///
    /// ## Arguments
    /// - `boundary`: The boundary of the quadtree
    /// - `node_capacity`: The maximum number of items a node can hold before subdividing
    ///
    /// **Errors** if `node_capacity` is zero or the boundary is not a finite box with a
    /// non-negative half extent
    pub fn new(boundary: Aabb, node_capacity: usize) -> Result<Self, QuadTreeError> {
        if node_capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        if !boundary.is_valid() {
            return Err(QuadTreeError::InvalidBoundary(boundary));
        }

        debug!(
            center = ?boundary.center(),
            half_extent = ?boundary.half_extent(),
            node_capacity,
            "creating quadtree"
        );
        Ok(Self {
            root: Node::Leaf {
                boundary,
                items: Vec::new(),
            },
            limits: Limits {
                node_capacity,
                max_depth: DEFAULT_MAX_DEPTH,
            },
            len: 0,
        })
    }

    /// Create a new empty quadtree holding [`DEFAULT_NODE_CAPACITY`] items per node
    pub fn with_default_capacity(boundary: Aabb) -> Result<Self, QuadTreeError> {
        Self::new(boundary, DEFAULT_NODE_CAPACITY)
    }

    /// Set the depth at which nodes stop subdividing
    ///
    /// A full node at this depth keeps accepting items past its capacity, which keeps
    /// repeated insertions of the same position from splitting forever. The root is
    /// at depth 0. Only affects nodes that have not subdivided yet.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_depth = max_depth;
        self
    }

    /// Insert a point into the quadtree
    ///
    /// **Returns** a boolean value indicating if the item was inserted successfully,
    /// which is false only when its position lies outside the boundary
    pub fn insert(&mut self, item: &T) -> bool {
        let inserted = self.root.insert(item, self.limits, 0);
        if inserted {
            self.len += 1;
        } else {
            trace!(point = ?item.point(), "point outside quadtree boundary");
        }
        inserted
    }

    /// Find every item whose position lies within `area`, edges included
    ///
    /// The order of the results is deterministic but not meaningful.
    pub fn search_area(&self, area: &Aabb) -> Vec<&T> {
        let mut results = Vec::new();
        self.query(area, &mut results);
        results
    }

    /// Queries the QuadTree for items within `area`.
    /// This method appends to a passed mutable vector, so it can be reused between queries.
    pub fn query<'a>(&'a self, area: &Aabb, results: &mut Vec<&'a T>) {
        self.root.query(area, results)
    }

    /// Get an item stored at exactly `point`
    pub fn get(&self, point: &P2) -> Option<&T> {
        self.root.get(point)
    }

    /// Number of items in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no items
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the boundary of the quadtree
    pub fn boundary(&self) -> &Aabb {
        self.root.boundary()
    }

    /// Return the point at the center of the boundary
    pub fn center(&self) -> P2 {
        self.root.boundary().center()
    }

    /// Maximum number of items a node holds before subdividing
    pub fn node_capacity(&self) -> usize {
        self.limits.node_capacity
    }

    /// Depth at which nodes stop subdividing
    pub fn max_depth(&self) -> usize {
        self.limits.max_depth
    }

    /// Depth of the deepest node, the root being at depth 0
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Consume the tree, returning every item it holds
    pub fn into_items(self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len);
        self.root.into_items(&mut items);
        items
    }
}

/// Serialized form of a [`QuadTree`]
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct Snapshot<T> {
    boundary: Aabb,
    node_capacity: usize,
    max_depth: usize,
    items: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T: Point + Clone> From<QuadTree<T>> for Snapshot<T> {
    fn from(qt: QuadTree<T>) -> Self {
        Self {
            boundary: *qt.boundary(),
            node_capacity: qt.node_capacity(),
            max_depth: qt.max_depth(),
            items: qt.into_items(),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: Point + Clone> TryFrom<Snapshot<T>> for QuadTree<T> {
    type Error = QuadTreeError;

    fn try_from(snapshot: Snapshot<T>) -> Result<Self, Self::Error> {
        let mut qt = Self::new(snapshot.boundary, snapshot.node_capacity)?
            .with_max_depth(snapshot.max_depth);
        for item in &snapshot.items {
            if !qt.insert(item) {
                return Err(QuadTreeError::OutsideBoundary(item.point()));
            }
        }
        Ok(qt)
    }
}

/// QuadTree node enum
///
/// ## Variants
/// - `Internal`: Contains four children in [`Quadrant::ALL`](crate::Quadrant::ALL) order and no items.
/// - `Leaf`: Contains items directly and no children.
#[derive(Debug, Clone)]
enum Node<T> {
    Internal {
        boundary: Aabb,
        children: [Box<Node<T>>; 4],
    },
    Leaf {
        boundary: Aabb,
        items: Vec<T>,
    },
}

impl<T: Point + Clone> Node<T> {
    fn insert(&mut self, item: &T, limits: Limits, depth: usize) -> bool {
        if !self.boundary().contains(&item.point()) {
            return false;
        }

        if let Self::Leaf { items, boundary } = self {
            if items.len() < limits.node_capacity {
                items.push(item.clone());
                return true;
            }
            if depth >= limits.max_depth {
                trace!(
                    center = ?boundary.center(),
                    depth,
                    len = items.len() + 1,
                    "leaf at max depth over capacity"
                );
                items.push(item.clone());
                return true;
            }
            self.subdivide(limits, depth);
        }

        self.insert_into_children(item, limits, depth)
    }

    /// Offer the item to each child in turn until one accepts it
    fn insert_into_children(&mut self, item: &T, limits: Limits, depth: usize) -> bool {
        let Self::Internal { children, .. } = self else {
            return false;
        };

        let inserted = children
            .iter_mut()
            .any(|c| c.insert(item, limits, depth + 1));
        // Quarters share this node's exact edges and center as their own, and
        // containment is closed, so some child accepts any point this node contains.
        debug_assert!(
            inserted,
            "no quadrant accepted {:?} inside {:?}",
            item.point(),
            self.boundary()
        );
        inserted
    }

    /// Chop a leaf into four quarters and hand its items down to them
    fn subdivide(&mut self, limits: Limits, depth: usize) {
        let Self::Leaf { boundary, items } = self else {
            return;
        };

        let boundary = *boundary;
        let items = std::mem::take(items);
        trace!(
            center = ?boundary.center(),
            depth,
            redistributed = items.len(),
            "subdividing quadtree node"
        );

        let children = boundary.quarter().map(|b| {
            Box::new(Self::Leaf {
                boundary: b,
                items: Vec::new(),
            })
        });
        *self = Self::Internal { boundary, children };

        for existing_item in &items {
            let rehomed = self.insert_into_children(existing_item, limits, depth);
            debug_assert!(
                rehomed,
                "subdivision lost {:?} inside {:?}",
                existing_item.point(),
                boundary
            );
        }
    }

    fn query<'a>(&'a self, area: &Aabb, results: &mut Vec<&'a T>) {
        if !self.boundary().intersects(area) {
            return;
        }

        match self {
            Self::Leaf { boundary, items } => {
                if area.contains_aabb(boundary) {
                    results.extend(items.iter());
                } else {
                    results.extend(items.iter().filter(|item| area.contains(&item.point())));
                }
            }
            Self::Internal { children, .. } => {
                for c in children {
                    c.query(area, results);
                }
            }
        }
    }

    fn get(&self, point: &P2) -> Option<&T> {
        if !self.boundary().contains(point) {
            return None;
        }

        match self {
            Self::Leaf { items, .. } => items.iter().find(|item| item.point() == *point),
            Self::Internal { boundary, children } => {
                let q = determine_quadrant(boundary, point)?;
                children[q.index()].get(point)
            }
        }
    }

    fn into_items(self, out: &mut Vec<T>) {
        match self {
            Self::Leaf { items, .. } => out.extend(items),
            Self::Internal { children, .. } => {
                for c in children {
                    (*c).into_items(out);
                }
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { children, .. } => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }

    fn boundary(&self) -> &Aabb {
        match self {
            Self::Internal { boundary, .. } => boundary,
            Self::Leaf { boundary, .. } => boundary,
        }
    }
}
