//! Edges of a hull polygon, used to tell apart the parts of a hull which are reached by a single
//! sail plan from the transitions between sail plans.

use crate::polar::HullResult;

/// A segment between two consecutive vertices of a hull polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct HullEdge<'a, I> {
    /// Wind speed at the start and end vertex
    pub ws: (f64, f64),

    /// (wind angle, boat speed) of the start vertex
    pub start: (f64, f64),

    /// (wind angle, boat speed) of the end vertex
    pub end: (f64, f64),

    /// Info values of the start and end vertex, `None` for seam vertices or when the slice
    /// carried no info
    pub members: (Option<&'a I>, Option<&'a I>),
}

impl<'a, I: PartialEq> HullEdge<'a, I> {
    /// The info value shared by both endpoints, or `None` if the edge joins vertices with
    /// different (or missing) info values.
    pub fn single_member(&self) -> Option<&'a I> {
        match self.members {
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        }
    }
}

impl<I> HullResult<I> {
    /// The edges between consecutive vertices of the hull, in vertex order. The polygon is
    /// already closed, so no edge from the last vertex back to the first is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use sailpolar::{Slice, convex_hull};
    /// let slice = Slice::at_wind_speed(8.0, vec![0.0, 90.0, 180.0, 270.0], vec![2.0; 4])
    ///     .unwrap()
    ///     .with_info(vec!["jib", "jib", "spi", "spi"])
    ///     .unwrap();
    /// let hull = convex_hull(&slice);
    /// let edges = hull.edges();
    /// assert_eq!(edges.len(), 4);
    /// assert_eq!(edges[0].single_member(), Some(&"jib"));
    /// assert_eq!(edges[1].single_member(), None);
    /// ```
    pub fn edges(&self) -> Vec<HullEdge<'_, I>> {
        (1..self.len())
            .map(|i| HullEdge {
                ws: (self.ws[i - 1], self.ws[i]),
                start: (self.wa[i - 1], self.bsp[i - 1]),
                end: (self.wa[i], self.bsp[i]),
                members: (self.member(i - 1), self.member(i)),
            })
            .collect()
    }

    fn member(&self, i: usize) -> Option<&I> {
        self.info.as_ref()?.get(i)?.as_ref()
    }
}
