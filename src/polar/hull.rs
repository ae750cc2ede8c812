//! Convex hulls of polar diagram slices.
//!
//! The hull is computed on the samples projected to the plane, then re-expressed in the original
//! (wind angle, boat speed) coordinates and sorted by wind angle. Because wind angles wrap around
//! at 0°/360°, a hull which surrounds the origin needs a vertex on both sides of the seam so that
//! it can be drawn as a closed curve over the angle range [0, 360].

use crate::common::{is_full_turn, is_zero_angle, polar_to_cartesian};
use crate::errors::InvalidGeometry;
use crate::min_max;
use crate::polar::Slice;
use crate::Point2;
use log::debug;
use parry2d_f64::transformation::convex_hull_idx;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Relative tolerance used to reject point sets which have no area.
const COLLINEAR_TOL: f64 = 1.0e-10;

/// The convex hull of a slice, as parallel sequences of vertex wind speed, wind angle and boat
/// speed. When the slice carried info values, `info` holds one entry per vertex, where `None`
/// marks a vertex synthesized on the 0°/360° seam rather than taken from a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullResult<I = String> {
    pub ws: Vec<f64>,
    pub wa: Vec<f64>,
    pub bsp: Vec<f64>,
    pub info: Option<Vec<Option<I>>>,
}

impl<I> HullResult<I> {
    pub fn len(&self) -> usize {
        self.wa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wa.is_empty()
    }

    /// The vertices as (wind angle, boat speed) pairs.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.wa.iter().copied().zip(self.bsp.iter().copied()).collect()
    }

    /// The vertices projected onto the plane.
    pub fn cartesian(&self) -> Vec<Point2> {
        self.points()
            .into_iter()
            .map(|(wa, bsp)| polar_to_cartesian(wa, bsp))
            .collect()
    }

    fn push(&mut self, ws: f64, wa: f64, bsp: f64, info: Option<I>) {
        self.ws.push(ws);
        self.wa.push(wa);
        self.bsp.push(bsp);
        if let Some(all) = self.info.as_mut() {
            all.push(info);
        }
    }

    fn insert_front(&mut self, ws: f64, wa: f64, bsp: f64, info: Option<I>) {
        self.ws.insert(0, ws);
        self.wa.insert(0, wa);
        self.bsp.insert(0, bsp);
        if let Some(all) = self.info.as_mut() {
            all.insert(0, info);
        }
    }
}

impl<I: Clone> HullResult<I> {
    /// Take the given samples of the slice, in the given order.
    fn from_indices(slice: &Slice<I>, indices: &[usize]) -> Self {
        Self {
            ws: indices.iter().map(|&i| slice.ws()[i]).collect(),
            wa: indices.iter().map(|&i| slice.wa()[i]).collect(),
            bsp: indices.iter().map(|&i| slice.bsp()[i]).collect(),
            info: slice
                .info()
                .map(|info| indices.iter().map(|&i| Some(info[i].clone())).collect()),
        }
    }

    /// Repeat the first vertex, including its info, at the end.
    fn push_first(&mut self) {
        let info = self.info.as_ref().and_then(|all| all[0].clone());
        self.push(self.ws[0], self.wa[0], self.bsp[0], info);
    }
}

/// Anything which can turn a slice into an angle sorted hull polygon.
pub trait PolarHull {
    fn hull<I: Clone>(&self, slice: &Slice<I>) -> HullResult<I>;
}

/// The convex hull in the projected plane, see `convex_hull`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexPolarHull;

impl PolarHull for ConvexPolarHull {
    fn hull<I: Clone>(&self, slice: &Slice<I>) -> HullResult<I> {
        convex_hull(slice)
    }
}

/// Compute the indices of the points on the convex hull of a planar point set. Unlike the
/// underlying hull routine this never panics: sets of fewer than three points, sets containing
/// non-finite coordinates and sets without area (all points coincident or collinear) are
/// reported as errors.
///
/// # Arguments
///
/// * `points`: the planar points
///
/// returns: Result<Vec<usize, Global>, InvalidGeometry>
pub fn hull_indices(points: &[Point2]) -> Result<Vec<usize>, InvalidGeometry> {
    if points.len() < 3 {
        return Err(InvalidGeometry::NotEnoughPoints);
    }
    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) || are_collinear(points) {
        return Err(InvalidGeometry::GeometricOpFailed);
    }

    let indices = convex_hull_idx(points);
    if indices.len() < 3 {
        return Err(InvalidGeometry::GeometricOpFailed);
    }
    Ok(indices)
}

fn are_collinear(points: &[Point2]) -> bool {
    let origin = points[0];
    let scale = points.iter().map(|p| p.coords.norm()).fold(1.0, f64::max);
    let Some(far) = points
        .iter()
        .max_by(|a, b| (*a - origin).norm_squared().total_cmp(&(*b - origin).norm_squared()))
    else {
        return true;
    };

    let dir = far - origin;
    let len = dir.norm();
    if len <= COLLINEAR_TOL * scale {
        return true;
    }

    points.iter().all(|p| {
        let v = p - origin;
        (dir.x * v.y - dir.y * v.x).abs() / len <= COLLINEAR_TOL * scale
    })
}

/// Compute the convex hull of a polar diagram slice.
///
/// Each (wind angle, boat speed) sample is projected to the plane, the planar convex hull is
/// taken, and its vertices are returned in the original coordinates sorted by wind angle
/// (vertices sharing an angle keep their sample order). Info values travel with their vertices.
///
/// The polygon is then closed:
///
/// * If the hull has vertices at both 0° and 360° it is already closed.
/// * If the smallest and largest vertex angles are at most 180° apart, the hull does not wrap
///   around the seam and the first vertex is repeated at the end.
/// * Otherwise the hull wraps around the seam. A vertex at 0° is duplicated at 360°, or a vertex
///   at 360° is duplicated at 0°. With neither, the point where the hull edge from the last to
///   the first vertex crosses the 0° ray is added at both 0° and 360°, with its wind speed
///   interpolated along that edge. These seam vertices carry no info value.
///
/// Slices with fewer than three samples, or whose samples have no area in the plane, have no
/// proper hull and are returned unchanged apart from being sorted by angle.
///
/// # Arguments
///
/// * `slice`: the slice to compute the hull of
///
/// returns: HullResult<I>
///
/// # Examples
///
/// ```
/// use sailpolar::{Slice, convex_hull};
/// let slice = Slice::<String>::at_wind_speed(
///     10.0,
///     vec![0.0, 45.0, 90.0, 135.0, 180.0, 270.0],
///     vec![1.0, 1.0, 0.0, 1.0, 1.0, 1.0],
/// ).unwrap();
/// let hull = convex_hull(&slice);
/// assert_eq!(hull.wa, vec![0.0, 45.0, 135.0, 180.0, 270.0, 360.0]);
/// ```
pub fn convex_hull<I: Clone>(slice: &Slice<I>) -> HullResult<I> {
    let points = slice.cartesian();
    let vertices = match hull_indices(&points) {
        Ok(vertices) => vertices,
        Err(e) => {
            if !slice.is_empty() {
                debug!("No hull for slice of {} points ({}), returning it as is", slice.len(), e);
            }
            let all = (0..slice.len()).collect();
            return HullResult::from_indices(slice, &sort_by_angle(slice.wa(), all));
        }
    };

    let mut hull = HullResult::from_indices(slice, &sort_by_angle(slice.wa(), vertices));
    close_polygon(&mut hull);
    debug!(
        "Hull of slice with {} points has {} vertices",
        slice.len(),
        hull.len()
    );
    hull
}

/// Compute the hulls of several slices in parallel with a given hull strategy, keeping the order
/// of the slices.
pub fn hull_slices<H, I>(hull: &H, slices: &[Slice<I>]) -> Vec<HullResult<I>>
where
    H: PolarHull + Sync,
    I: Clone + Send + Sync,
{
    slices.par_iter().map(|s| hull.hull(s)).collect()
}

/// Compute the convex hulls of several slices in parallel, keeping the order of the slices.
pub fn convex_hull_slices<I: Clone + Send + Sync>(slices: &[Slice<I>]) -> Vec<HullResult<I>> {
    hull_slices(&ConvexPolarHull, slices)
}

fn sort_by_angle(wa: &[f64], mut indices: Vec<usize>) -> Vec<usize> {
    indices.sort_unstable();
    indices.sort_by(|&a, &b| wa[a].total_cmp(&wa[b]));
    indices
}

fn close_polygon<I: Clone>(hull: &mut HullResult<I>) {
    let n = hull.len();
    let (first, last) = (hull.wa[0], hull.wa[n - 1]);
    if is_zero_angle(first) && is_full_turn(last) {
        return;
    }

    let (lo, hi) = min_max(first, last);
    if hi - lo <= 180.0 {
        hull.push_first();
    } else if is_zero_angle(first) {
        hull.push(hull.ws[0], 360.0, hull.bsp[0], None);
    } else if is_full_turn(last) {
        hull.insert_front(hull.ws[n - 1], 0.0, hull.bsp[n - 1], None);
    } else {
        let (ws, bsp) = seam_crossing(hull);
        hull.insert_front(ws, 0.0, bsp, None);
        hull.push(ws, 360.0, bsp, None);
    }
}

/// Wind speed and boat speed where the hull edge from the last vertex to the first crosses the
/// 0° ray.
fn seam_crossing<I>(hull: &HullResult<I>) -> (f64, f64) {
    let n = hull.len();
    let p = polar_to_cartesian(hull.wa[n - 1], hull.bsp[n - 1]);
    let q = polar_to_cartesian(hull.wa[0], hull.bsp[0]);

    let denom = p.y - q.y;
    let t = if denom.abs() > f64::EPSILON { p.y / denom } else { 0.5 };
    let x = p.x + t * (q.x - p.x);
    let ws = hull.ws[n - 1] + t * (hull.ws[0] - hull.ws[n - 1]);
    (ws, x.max(0.0))
}
