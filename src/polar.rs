//! Geometry of polar diagram slices. A slice is a fixed wind speed cross-section of a polar
//! diagram, holding (wind angle, boat speed) samples, and its convex hull is taken in the plane
//! obtained by treating each sample as polar coordinates.

mod edges;
mod hull;
mod slice;

pub use self::edges::HullEdge;
pub use self::hull::{
    ConvexPolarHull, HullResult, PolarHull, convex_hull, convex_hull_slices, hull_indices,
    hull_slices,
};
pub use self::slice::Slice;
