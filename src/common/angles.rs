//! This module contains common constructs for working with wind angles, which throughout the
//! crate are expressed in degrees.

use crate::Point2;

/// Tolerance, in degrees, used when deciding whether an angle sits on the 0°/360° seam.
pub const ANGLE_TOL: f64 = 1.0e-9;

/// Returns true if the angle, in degrees, lies on the zero side of the seam.
pub fn is_zero_angle(angle: f64) -> bool {
    angle.abs() <= ANGLE_TOL
}

/// Returns true if the angle, in degrees, is a full turn, i.e. the 360° side of the seam.
pub fn is_full_turn(angle: f64) -> bool {
    (angle - 360.0).abs() <= ANGLE_TOL
}

/// Projects a polar pair of (wind angle in degrees, boat speed) onto the Cartesian plane, with
/// 0° along the positive x axis and angles increasing counter-clockwise.
///
/// # Arguments
///
/// * `angle`: the wind angle, in degrees
/// * `radius`: the boat speed, used as the radial distance
///
/// returns: Point2
pub fn polar_to_cartesian(angle: f64, radius: f64) -> Point2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Point2::new(radius * cos, radius * sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(0.0, true, false)]
    #[test_case(360.0, false, true)]
    #[test_case(1.0e-12, true, false)]
    #[test_case(359.5, false, false)]
    fn seam_angles(angle: f64, zero: bool, full: bool) {
        assert_eq!(is_zero_angle(angle), zero);
        assert_eq!(is_full_turn(angle), full);
    }

    #[test_case(0.0, 2.0, 2.0, 0.0)]
    #[test_case(90.0, 1.0, 0.0, 1.0)]
    #[test_case(180.0, 3.0, -3.0, 0.0)]
    #[test_case(315.0, 2.0_f64.sqrt(), 1.0, -1.0)]
    fn project_to_cartesian(angle: f64, radius: f64, x: f64, y: f64) {
        let p = polar_to_cartesian(angle, radius);
        assert_relative_eq!(p.x, x, epsilon = 1.0e-10);
        assert_relative_eq!(p.y, y, epsilon = 1.0e-10);
    }
}
