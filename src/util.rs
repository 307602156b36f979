use crate::{shapes::Aabb, P2};

/// One of the four children of a subdivided node. `+y` is north.
///
/// The declaration order is also the order in which children are offered a point,
/// so a point on a seam belongs to the earliest quadrant that contains it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// All quadrants in routing order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Position of the quadrant in [`Quadrant::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The first quarter of `aabb` containing `point`, if any
pub(crate) fn determine_quadrant(aabb: &Aabb, point: &P2) -> Option<Quadrant> {
    Quadrant::ALL
        .into_iter()
        .zip(aabb.quarter())
        .find(|(_, quarter)| quarter.contains(point))
        .map(|(q, _)| q)
}
