//! Geometric math utilities.
//!
//! Small free functions used by the spline queries: near-zero tests, the
//! quadratic formula (for Bezier extrema), and point-to-segment distance.

use crate::basics::PointD;

/// Default epsilon for near-zero tests on coordinates and coefficients.
pub const NEAR_ZERO_EPSILON: f64 = 1e-12;

/// Returns `true` if `v` is within [`NEAR_ZERO_EPSILON`] of zero.
#[inline]
pub fn near_zero(v: f64) -> bool {
    v.abs() < NEAR_ZERO_EPSILON
}

/// Returns `true` if `v` is within `epsilon` of zero.
#[inline]
pub fn near_zero_eps(v: f64, epsilon: f64) -> bool {
    v.abs() < epsilon
}

/// Solve `a*t^2 + b*t + c = 0`.
///
/// Returns both roots (equal when the discriminant vanishes), or `None` when
/// the discriminant is negative. The caller handles the degenerate linear
/// case (`a` near zero) itself.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<[f64; 2]> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    Some([(-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a)])
}

/// Distance from `p` to the closest point on the segment `a`→`b`.
///
/// Falls back to the distance to `a` when the segment is degenerate.
pub fn distance_to_segment(p: PointD, a: PointD, b: PointD) -> f64 {
    let ab = b - a;
    let ab_length_squared = ab.length_squared();

    if near_zero(ab_length_squared) {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / ab_length_squared).clamp(0.0, 1.0);
    let projection = a + t * ab;
    p.distance(projection)
}
