//! Analysis building blocks for sailing polar diagrams: gap filling for chronologically ordered
//! sensor records, and convex hull extraction for polar diagram slices.

use std::error::Error;

pub mod common;
pub mod errors;
pub mod imputation;
pub mod polar;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;
pub type Point2 = parry2d_f64::na::Point2<f64>;

pub use crate::errors::{ImputeError, InvalidGeometry, SliceError};
pub use crate::imputation::{
    Axis, DATETIME_KEY, FillLocalImputator, ImputationStats, Imputator, ImputatorOptions,
    RecordTable, Value,
};
pub use crate::polar::{
    ConvexPolarHull, HullEdge, HullResult, PolarHull, Slice, convex_hull, convex_hull_slices,
};

fn min_max(f0: f64, f1: f64) -> (f64, f64) {
    if f0 < f1 { (f0, f1) } else { (f1, f0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_orders_values() {
        assert_eq!(min_max(2.0, 1.0), (1.0, 2.0));
        assert_eq!(min_max(-1.0, 3.0), (-1.0, 3.0));
    }
}
