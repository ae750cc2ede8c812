mod angles;

pub use angles::{ANGLE_TOL, is_full_turn, is_zero_angle, polar_to_cartesian};
