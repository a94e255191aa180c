//! Elliptical-arc to cubic Bezier conversion.
//!
//! Converts an SVG endpoint-parameterized arc (radii, x-axis rotation,
//! large-arc and sweep flags, end point) to a chain of cubic Bezier
//! segments using the standard endpoint-to-center parameterization
//! (W3C SVG implementation notes, appendix B.2). The conversion is a pure
//! function, independent of the tokenizer, so the numerically delicate
//! parts can be tested in isolation.
//!
//! Degenerate inputs never fail: zero radii and zero-length arcs reduce to
//! a straight line segment, and out-of-range radii are scaled up just
//! enough to span the chord.

use crate::basics::PointD;
use crate::math::near_zero_eps;

/// One cubic Bezier segment of an arc approximation. The start point is
/// implicit (the previous segment's end, or the arc start).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub ctrl1: PointD,
    pub ctrl2: PointD,
    pub to: PointD,
}

/// Result of converting an arc command.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcApproximation {
    /// The arc is degenerate (zero radius, zero length, or numerically
    /// unresolvable); draw a straight line to the end point instead.
    Line,
    /// The arc, subdivided so no segment spans more than ~90° of sweep.
    Curves(Vec<CubicSegment>),
}

/// Guards both the zero-length-arc test and the near-zero determinant in
/// the center computation.
const DISTANCE_SQ_EPSILON: f64 = 1e-14;

/// Convert an endpoint-parameterized elliptical arc to cubic segments.
///
/// `rotation` is the x-axis rotation in radians. Radii are taken by
/// absolute value.
pub fn arc_to_cubics(
    start: PointD,
    radius: PointD,
    rotation: f64,
    large_arc: bool,
    sweep: bool,
    end: PointD,
) -> ArcApproximation {
    if near_zero_eps(start.distance_squared(end), DISTANCE_SQ_EPSILON) {
        return ArcApproximation::Line;
    }

    let rx = radius.x.abs();
    let ry = radius.y.abs();
    if near_zero_eps(rx, DISTANCE_SQ_EPSILON) || near_zero_eps(ry, DISTANCE_SQ_EPSILON) {
        return ArcApproximation::Line;
    }

    let sin_rotation = rotation.sin();
    let cos_rotation = rotation.cos();

    // Half the chord, rotated into the ellipse's axis-aligned frame.
    let extent = (start - end) * 0.5;
    let major_axis = extent.rotated(cos_rotation, -sin_rotation);

    // Scale out-of-range radii up to span the chord (eq. 6.2/6.3).
    let lambda = (major_axis.x * major_axis.x) / (rx * rx)
        + (major_axis.y * major_axis.y) / (ry * ry);
    let ellipse_radius = if lambda > 1.0 {
        PointD::new(rx * lambda.sqrt(), ry * lambda.sqrt())
    } else {
        PointD::new(rx, ry)
    };

    // Center in the axis-aligned frame (eq. 5.2).
    let (rx, ry) = (ellipse_radius.x, ellipse_radius.y);
    let k_denom = rx * rx * major_axis.y * major_axis.y + ry * ry * major_axis.x * major_axis.x;
    if near_zero_eps(k_denom, DISTANCE_SQ_EPSILON) {
        return ArcApproximation::Line;
    }

    let mut k = ((rx * rx * ry * ry) / k_denom - 1.0).abs().sqrt();
    if sweep == large_arc {
        k = -k;
    }
    let center_aligned = PointD::new(k * rx * major_axis.y / ry, -k * ry * major_axis.x / rx);
    let center =
        center_aligned.rotated(cos_rotation, sin_rotation) + (start + end) * 0.5;

    // Unit-circle intersections with the start and end points.
    let intersection_start = PointD::new(
        (major_axis.x - center_aligned.x) / rx,
        (major_axis.y - center_aligned.y) / ry,
    );
    let intersection_end = PointD::new(
        (-major_axis.x - center_aligned.x) / rx,
        (-major_axis.y - center_aligned.y) / ry,
    );

    // Start angle (eq. 5.5).
    let n = intersection_start.length();
    if near_zero_eps(n, DISTANCE_SQ_EPSILON) {
        return ArcApproximation::Line;
    }
    let mut theta = (intersection_start.x / n).clamp(-1.0, 1.0).acos();
    if intersection_start.y < 0.0 {
        theta = -theta;
    }

    // Sweep angle (eq. 5.6).
    let n = (intersection_start.length_squared() * intersection_end.length_squared()).sqrt();
    if near_zero_eps(n, DISTANCE_SQ_EPSILON) {
        return ArcApproximation::Line;
    }
    let mut delta_theta = (intersection_start.dot(intersection_end) / n)
        .clamp(-1.0, 1.0)
        .acos();
    if intersection_start.cross(intersection_end) < 0.0 {
        delta_theta = -delta_theta;
    }

    let two_pi = std::f64::consts::PI * 2.0;
    if sweep && delta_theta < 0.0 {
        delta_theta += two_pi;
    } else if !sweep && delta_theta > 0.0 {
        delta_theta -= two_pi;
    }

    // One cubic per quarter-sweep (or less).
    let num_segments =
        (delta_theta.abs() / (std::f64::consts::FRAC_PI_2 + 0.001)).ceil() as usize;
    if num_segments == 0 {
        return ArcApproximation::Line;
    }
    let theta_increment = delta_theta / num_segments as f64;

    let dir = PointD::new(cos_rotation, sin_rotation);
    let mut segments = Vec::with_capacity(num_segments);

    for i in 0..num_segments {
        let theta_start = theta + i as f64 * theta_increment;
        let theta_end = theta + (i + 1) as f64 * theta_increment;

        // Control-point distance for a Bezier approximation of this sweep.
        let theta_half = 0.5 * (theta_end - theta_start);
        let sin_half_theta_half = (theta_half * 0.5).sin();
        let t = (8.0 / 3.0) * sin_half_theta_half * sin_half_theta_half / theta_half.sin();

        let (sin_start, cos_start) = theta_start.sin_cos();
        let point1 = PointD::new(
            rx * (cos_start - t * sin_start),
            ry * (sin_start + t * cos_start),
        );

        let (sin_end, cos_end) = theta_end.sin_cos();
        let point3 = PointD::new(rx * cos_end, ry * sin_end);
        let point2 = point3 + PointD::new(rx * t * sin_end, -ry * t * cos_end);

        segments.push(CubicSegment {
            ctrl1: center + point1.rotated(dir.x, dir.y),
            ctrl2: center + point2.rotated(dir.x, dir.y),
            to: center + point3.rotated(dir.x, dir.y),
        });
    }

    // Pin the chain's end to the requested end point exactly.
    if let Some(last) = segments.last_mut() {
        last.to = end;
    }

    ArcApproximation::Curves(segments)
}
