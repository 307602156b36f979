use nalgebra::point;

use crate::{util::Quadrant, P2, V2};

/// Represents an axis-aligned bounding box defined by a center point and a half extent.
/// It covers the closed rectangle `[center - half_extent, center + half_extent]` on both
/// axes, is used to define boundaries for QuadTree nodes, and doubles as the query
/// region for range searches.
///
/// The corners are computed once and kept alongside the center, so the quarters of a
/// box share its exact edge and center coordinates and tile it without gaps.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Corners", into = "Corners")
)]
pub struct Aabb {
    center: P2,
    half_extent: V2,
    min: P2,
    max: P2,
}

impl Aabb {
    /// Create a new box from a center point and a half extent
    ///
    /// A zero half extent on an axis is allowed and degenerates the box to a line or
    /// a single point.
    pub fn new(center: P2, half_extent: V2) -> Self {
        Self {
            center,
            half_extent,
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Create a new box spanning two opposite corners, `min` being the lower-left one
    ///
    /// The corners are kept exactly as given.
    pub fn from_corners(min: P2, max: P2) -> Self {
        Self {
            center: nalgebra::center(&min, &max),
            half_extent: (max - min) / 2.,
            min,
            max,
        }
    }

    /// Get the center point of the box
    pub fn center(&self) -> P2 {
        self.center
    }

    /// Get the half extent of the box
    pub fn half_extent(&self) -> V2 {
        self.half_extent
    }

    /// Get the lower-left corner
    pub fn min(&self) -> P2 {
        self.min
    }

    /// Get the upper-right corner
    pub fn max(&self) -> P2 {
        self.max
    }

    /// Check that the center is finite and the half extent finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.center.x.is_finite()
            && self.center.y.is_finite()
            && self.half_extent.x.is_finite()
            && self.half_extent.y.is_finite()
            && self.half_extent.x >= 0.
            && self.half_extent.y >= 0.
    }

    /// Check if a point exists within the box, edges included
    pub fn contains(&self, point: &P2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if the box shares any space with another box, touching edges included
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.max.y < self.min.y
            || other.min.x > self.max.x
            || other.min.y > self.max.y)
    }

    /// Check if the box fully contains another box
    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// Quarter the box to produce four smaller boxes, in [`Quadrant::ALL`] order
    ///
    /// Each quarter spans from one of the box's corners to its center. Neighbouring
    /// quarters share the center coordinates as their seam, and the outer edges are the
    /// box's own, so every point of the box lies in at least one quarter.
    pub fn quarter(&self) -> [Self; 4] {
        let &Aabb {
            center: c, min, max, ..
        } = self;
        Quadrant::ALL.map(|q| match q {
            Quadrant::NorthWest => Self::from_corners(point![min.x, c.y], point![c.x, max.y]),
            Quadrant::NorthEast => Self::from_corners(c, max),
            Quadrant::SouthWest => Self::from_corners(min, c),
            Quadrant::SouthEast => Self::from_corners(point![c.x, min.y], point![max.x, c.y]),
        })
    }
}

/// Serialized form of an [`Aabb`]: its exact corners
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct Corners {
    min: P2,
    max: P2,
}

#[cfg(feature = "serde")]
impl From<Corners> for Aabb {
    fn from(corners: Corners) -> Self {
        Self::from_corners(corners.min, corners.max)
    }
}

#[cfg(feature = "serde")]
impl From<Aabb> for Corners {
    fn from(aabb: Aabb) -> Self {
        Self {
            min: aabb.min,
            max: aabb.max,
        }
    }
}
