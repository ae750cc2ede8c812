//! Fill functions used by `FillLocalImputator`, together with the time arithmetic that computes
//! their relative positions.
//!
//! A one-sided fill function receives the column name, the value of the nearest present cell and
//! the relative position `mu` of the cell being filled inside its span. A two-sided fill function
//! receives the values of the present cells on both sides of the gap instead.

use crate::imputation::Value;
use chrono::{DateTime, TimeDelta, Utc};

/// Fill function for cells before or after a present cell: `(name, value, mu) -> value`.
pub type FillOneSided = Box<dyn Fn(&str, &Value, f64) -> Value + Send + Sync>;

/// Fill function for cells between two present cells: `(name, left, right, mu) -> value`.
pub type FillTwoSided = Box<dyn Fn(&str, &Value, &Value, f64) -> Value + Send + Sync>;

/// Repeats the nearest present value. Default for filling before and after a present cell.
pub fn keep(_name: &str, value: &Value, _mu: f64) -> Value {
    value.clone()
}

/// Holds the left value across the whole gap. Default for filling between present cells.
pub fn hold_left(_name: &str, left: &Value, _right: &Value, _mu: f64) -> Value {
    left.clone()
}

/// Blends numeric and timestamp values linearly by `mu`, holding the left value for anything
/// which cannot be blended (text, booleans, or mismatched variants).
///
/// # Examples
///
/// ```
/// use sailpolar::Value;
/// use sailpolar::imputation::fill::linear_between;
/// let v = linear_between("bsp", &Value::Float(5.0), &Value::Float(7.0), 0.5);
/// assert_eq!(v, Value::Float(6.0));
/// ```
pub fn linear_between(_name: &str, left: &Value, right: &Value, mu: f64) -> Value {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            let step = ((i128::from(*b) - i128::from(*a)) as f64 * mu).round() as i128;
            Value::Int((i128::from(*a) + step).clamp(i64::MIN.into(), i64::MAX.into()) as i64)
        }
        (Value::DateTime(a), Value::DateTime(b)) => Value::DateTime(lerp_time(*a, *b, mu)),
        (a, b) if a.is_numeric() && b.is_numeric() => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => Value::Float(a + (b - a) * mu),
            _ => left.clone(),
        },
        _ => left.clone(),
    }
}

/// Length of a time span in seconds, keeping nanosecond precision where it fits.
pub(crate) fn seconds(delta: TimeDelta) -> f64 {
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 * 1.0e-9,
        None => delta.num_milliseconds() as f64 * 1.0e-3,
    }
}

/// Affine interpolation between two timestamps, `a` at `mu = 0` and `b` at `mu = 1`.
pub(crate) fn lerp_time(a: DateTime<Utc>, b: DateTime<Utc>, mu: f64) -> DateTime<Utc> {
    let offset = seconds(b - a) * mu;
    a + TimeDelta::nanoseconds((offset * 1.0e9).round() as i64)
}

/// The fractional position of `t` between `start` and `end`, clamped to [0, 1]. A zero length
/// span yields 0.
pub(crate) fn relative_position(t: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let span = seconds(end - start);
    if span == 0.0 {
        return 0.0;
    }
    (seconds(t - start) / span).clamp(0.0, 1.0)
}
