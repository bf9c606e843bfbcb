//! Angle and polar-coordinate helpers
//!
//! Pure functions, no side effects. All angles are in radians.

use std::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

/// Fold an angle into [0, 2*pi)
///
/// `rem_euclid` terminates for every finite input regardless of magnitude;
/// NaN propagates and is rejected at the API boundary.
pub fn normalize_angle(theta: f64) -> f64 {
    let v = theta.rem_euclid(TWO_PI);
    // rem_euclid can return 2*pi itself when theta is a tiny negative value
    if v >= TWO_PI {
        v - TWO_PI
    } else {
        v
    }
}

/// Smallest angular distance between two headings, in [0, pi]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let d = (normalize_angle(a) - normalize_angle(b)).abs();
    d.min(TWO_PI - d)
}

/// Polar decomposition of a displacement: (r, theta)
pub fn polar(dx: f64, dy: f64) -> (f64, f64) {
    let r = (dx * dx + dy * dy).sqrt();
    let theta = dy.atan2(dx);
    (r, theta)
}
