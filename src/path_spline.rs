//! Piecewise cubic spline path representation.
//!
//! A [PathSpline] is an immutable sequence of [Command]s describing a path
//! made of line segments and cubic Bezier curves, the canonical form every
//! higher-level path source (path-data strings, basic shapes) lowers into.
//! Quadratic curves and elliptical arcs never appear here; they are
//! converted to cubics at construction time by the builder.
//!
//! Splines are built with [crate::spline_builder::SplineBuilder] and never
//! mutated afterward, so derived quantities such as the total arc length can
//! be cached. A spline may be shared freely across threads.

use once_cell::sync::OnceCell;

use crate::basics::{FillRule, PointD, RectD};
use crate::math::{near_zero, solve_quadratic};

// ======================================================================
// Commands
// ======================================================================

/// One drawing command of a spline. Commands that draw (everything except
/// [Command::MoveTo]) start at the end point of the previous command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start a new subpath at the given point.
    MoveTo(PointD),
    /// Straight line from the current point.
    LineTo(PointD),
    /// Cubic Bezier curve from the current point.
    CurveTo {
        ctrl1: PointD,
        ctrl2: PointD,
        to: PointD,
    },
    /// Straight line back to the start of the current subpath.
    ClosePath,
}

impl Command {
    /// The point this command leaves the pen at, if it is stored inline.
    /// [Command::ClosePath] ends at the subpath start, which is not stored
    /// on the command itself.
    #[inline]
    pub fn end_point(&self) -> Option<PointD> {
        match *self {
            Command::MoveTo(point) | Command::LineTo(point) => Some(point),
            Command::CurveTo { to, .. } => Some(to),
            Command::ClosePath => None,
        }
    }
}

/// A vertex of the path with its orientation, used to place markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub point: PointD,
    /// Normalized direction of travel through the vertex, or zero for a
    /// lone [Command::MoveTo] with nothing to orient against.
    pub orientation: PointD,
}

// ======================================================================
// PathSpline
// ======================================================================

/// An immutable path made of lines and cubic Bezier curves.
#[derive(Debug, Clone, Default)]
pub struct PathSpline {
    commands: Vec<Command>,
    length_cache: OnceCell<f64>,
}

impl PartialEq for PathSpline {
    fn eq(&self, other: &Self) -> bool {
        self.commands == other.commands
    }
}

/// Arc-length estimation stops subdividing once the control net exceeds the
/// chord by less than this.
const LENGTH_TOLERANCE: f64 = 0.001;

/// Curve flattening tolerance for hit-testing.
const HIT_TEST_TOLERANCE: f64 = 0.1;

impl PathSpline {
    pub(crate) fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            length_cache: OnceCell::new(),
        }
    }

    #[inline]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// End point of the last command, or `None` for an empty spline.
    pub fn current_point(&self) -> Option<PointD> {
        let last = self.commands.len().checked_sub(1)?;
        Some(self.end_point_of(last))
    }

    /// Total arc length of the path. Line segments contribute their
    /// Euclidean length and curves an adaptive-subdivision estimate;
    /// [Command::MoveTo] and [Command::ClosePath] contribute nothing.
    /// Computed on first use and cached.
    pub fn length(&self) -> f64 {
        *self.length_cache.get_or_init(|| {
            let mut total = 0.0;
            let mut current = PointD::ZERO;

            for command in &self.commands {
                match *command {
                    Command::MoveTo(point) => current = point,
                    Command::LineTo(point) => {
                        total += current.distance(point);
                        current = point;
                    }
                    Command::CurveTo { ctrl1, ctrl2, to } => {
                        total += subdivide_and_measure_cubic(
                            [current, ctrl1, ctrl2, to],
                            LENGTH_TOLERANCE,
                            0,
                        );
                        current = to;
                    }
                    Command::ClosePath => {}
                }
            }

            total
        })
    }

    /// Evaluate the command at `index` at parameter `t` in `[0, 1]`.
    ///
    /// Only drawing segments can be evaluated; calling this on a
    /// [Command::MoveTo] or [Command::ClosePath], or with `index`/`t` out of
    /// range, is a programmer error and panics.
    pub fn point_at(&self, index: usize, t: f64) -> PointD {
        assert!(index < self.commands.len(), "index out of range");
        assert!((0.0..=1.0).contains(&t), "t out of range");

        let start = self.start_point(index);
        match self.commands[index] {
            Command::LineTo(point) => start * (1.0 - t) + point * t,
            Command::CurveTo { ctrl1, ctrl2, to } => {
                cubic_point(start, ctrl1, ctrl2, to, t)
            }
            Command::MoveTo(_) | Command::ClosePath => {
                panic!("point_at is only defined for drawing segments")
            }
        }
    }

    /// Tangent (un-normalized direction of travel) of the command at `index`
    /// at parameter `t`. A [Command::MoveTo] takes the tangent of the
    /// following command at `t = 0`, or zero if it is the last command.
    pub fn tangent_at(&self, index: usize, t: f64) -> PointD {
        assert!(index < self.commands.len(), "index out of range");
        assert!((0.0..=1.0).contains(&t), "t out of range");

        match self.commands[index] {
            Command::MoveTo(_) => {
                if index + 1 < self.commands.len() {
                    self.tangent_at(index + 1, 0.0)
                } else {
                    PointD::ZERO
                }
            }
            Command::LineTo(point) => point - self.start_point(index),
            Command::ClosePath => {
                self.subpath_start(index) - self.start_point(index)
            }
            Command::CurveTo { ctrl1, ctrl2, to } => {
                let start = self.start_point(index);
                cubic_tangent(start, ctrl1, ctrl2, to, t)
            }
        }
    }

    /// Normal of the command at `index` at parameter `t`, the tangent
    /// rotated 90° counter-clockwise.
    #[inline]
    pub fn normal_at(&self, index: usize, t: f64) -> PointD {
        let tangent = self.tangent_at(index, t);
        PointD::new(-tangent.y, tangent.x)
    }

    /// Tight axis-aligned bounding box covering every anchor point and the
    /// true extrema of every curve, or `None` for an empty spline.
    pub fn bounds(&self) -> Option<RectD> {
        let first = self.commands.first()?;
        let mut current = first.end_point().unwrap_or(PointD::ZERO);
        let mut box_ = RectD::from_point(current);

        for (i, command) in self.commands.iter().enumerate() {
            match *command {
                Command::MoveTo(point) | Command::LineTo(point) => {
                    current = point;
                    box_.add_point(point);
                }
                Command::ClosePath => {
                    current = self.subpath_start(i);
                    box_.add_point(current);
                }
                Command::CurveTo { ctrl1, ctrl2, to } => {
                    let start = current;
                    box_.add_point(start);
                    box_.add_point(to);
                    current = to;

                    // Derivative of the cubic in the form at^2 + bt + c:
                    // 3(P1 - P0)(1-t)^2 + 6(P2 - P1)t(1-t) + 3(P3 - P2)t^2
                    let a = (-start + ctrl1 * 3.0 - ctrl2 * 3.0 + to) * 3.0;
                    let b = (start + ctrl2 - ctrl1 * 2.0) * 6.0;
                    let c = (-start + ctrl1) * 3.0;

                    for (a, b, c) in [(a.x, b.x, c.x), (a.y, b.y, c.y)] {
                        if near_zero(a) {
                            if !near_zero(b) {
                                let t = -c / b;
                                if (0.0..=1.0).contains(&t) {
                                    box_.add_point(cubic_point(start, ctrl1, ctrl2, to, t));
                                }
                            }
                        } else if let Some(roots) = solve_quadratic(a, b, c) {
                            for t in roots {
                                if (0.0..=1.0).contains(&t) {
                                    box_.add_point(cubic_point(start, ctrl1, ctrl2, to, t));
                                }
                            }
                        }
                    }
                }
            }
        }

        Some(box_)
    }

    /// Apply `f` to every stored point, producing a new spline. The command
    /// structure is preserved; only coordinates change. Useful for applying
    /// affine transforms.
    pub fn map_points(&self, f: impl Fn(PointD) -> PointD) -> PathSpline {
        let commands = self
            .commands
            .iter()
            .map(|command| match *command {
                Command::MoveTo(point) => Command::MoveTo(f(point)),
                Command::LineTo(point) => Command::LineTo(f(point)),
                Command::CurveTo { ctrl1, ctrl2, to } => Command::CurveTo {
                    ctrl1: f(ctrl1),
                    ctrl2: f(ctrl2),
                    to: f(to),
                },
                Command::ClosePath => Command::ClosePath,
            })
            .collect();
        PathSpline::new(commands)
    }

    /// The vertices of the path with their orientations, used to place
    /// markers. A zero-length close (subpath already back at its start)
    /// produces no extra vertex.
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();

        for (i, command) in self.commands.iter().enumerate() {
            match *command {
                Command::MoveTo(point) => {
                    vertices.push(Vertex {
                        point,
                        orientation: self.tangent_at(i, 0.0).normalized(),
                    });
                }
                Command::LineTo(point) => {
                    vertices.push(Vertex {
                        point,
                        orientation: self.tangent_at(i, 1.0).normalized(),
                    });
                }
                Command::CurveTo { to, .. } => {
                    vertices.push(Vertex {
                        point: to,
                        orientation: self.tangent_at(i, 1.0).normalized(),
                    });
                }
                Command::ClosePath => {
                    let start = self.subpath_start(i);
                    let tangent = self.tangent_at(i, 1.0);
                    if !near_zero(tangent.length_squared()) {
                        vertices.push(Vertex {
                            point: start,
                            orientation: tangent.normalized(),
                        });
                    }
                }
            }
        }

        vertices
    }

    /// Whether `point` falls inside the filled path under the non-zero
    /// winding rule. Points on the outline count as inside.
    #[inline]
    pub fn is_inside(&self, point: PointD) -> bool {
        self.is_inside_with_rule(point, FillRule::NonZero)
    }

    /// Whether `point` falls inside the filled path under the given fill
    /// rule. Points on the outline count as inside.
    pub fn is_inside_with_rule(&self, point: PointD, fill_rule: FillRule) -> bool {
        let mut winding_number = 0;
        let mut current = PointD::ZERO;

        for (i, command) in self.commands.iter().enumerate() {
            match *command {
                Command::MoveTo(p) => current = p,
                Command::LineTo(end) => {
                    if crate::math::distance_to_segment(point, current, end)
                        <= HIT_TEST_TOLERANCE
                    {
                        return true;
                    }
                    winding_number += winding_contribution_line(current, end, point);
                    current = end;
                }
                Command::ClosePath => {
                    let end = self.subpath_start(i);
                    if crate::math::distance_to_segment(point, current, end)
                        <= HIT_TEST_TOLERANCE
                    {
                        return true;
                    }
                    winding_number += winding_contribution_line(current, end, point);
                    current = end;
                }
                Command::CurveTo { ctrl1, ctrl2, to } => {
                    if is_point_on_cubic(point, current, ctrl1, ctrl2, to, HIT_TEST_TOLERANCE, 0)
                    {
                        return true;
                    }
                    winding_number += winding_contribution_curve(
                        current,
                        ctrl1,
                        ctrl2,
                        to,
                        point,
                        HIT_TEST_TOLERANCE,
                        0,
                    );
                    current = to;
                }
            }
        }

        match fill_rule {
            FillRule::NonZero => winding_number != 0,
            FillRule::EvenOdd => winding_number % 2 != 0,
        }
    }

    /// Whether `point` lies within `stroke_width` of the path outline.
    pub fn is_on_path(&self, point: PointD, stroke_width: f64) -> bool {
        let mut current = PointD::ZERO;

        for (i, command) in self.commands.iter().enumerate() {
            match *command {
                Command::MoveTo(p) => current = p,
                Command::LineTo(end) => {
                    if crate::math::distance_to_segment(point, current, end) <= stroke_width {
                        return true;
                    }
                    current = end;
                }
                Command::ClosePath => {
                    let end = self.subpath_start(i);
                    if crate::math::distance_to_segment(point, current, end) <= stroke_width {
                        return true;
                    }
                    current = end;
                }
                Command::CurveTo { ctrl1, ctrl2, to } => {
                    if is_point_on_cubic(point, current, ctrl1, ctrl2, to, stroke_width, 0) {
                        return true;
                    }
                    current = to;
                }
            }
        }

        false
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    /// Start point of the command at `index` (the pen position before it
    /// executes).
    fn start_point(&self, index: usize) -> PointD {
        if let Command::MoveTo(point) = self.commands[index] {
            return point;
        }
        debug_assert!(index > 0, "first command must be a MoveTo");
        self.end_point_of(index - 1)
    }

    /// End point of the command at `index`, resolving [Command::ClosePath]
    /// to its subpath start.
    fn end_point_of(&self, index: usize) -> PointD {
        match self.commands[index].end_point() {
            Some(point) => point,
            None => self.subpath_start(index),
        }
    }

    /// Start of the subpath that the command at `index` belongs to: the
    /// point of the most recent [Command::MoveTo] at or before it.
    fn subpath_start(&self, index: usize) -> PointD {
        for command in self.commands[..=index].iter().rev() {
            if let Command::MoveTo(point) = command {
                return *point;
            }
        }
        PointD::ZERO
    }
}

// ======================================================================
// Cubic Bezier evaluation
// ======================================================================

#[inline]
fn cubic_point(p0: PointD, p1: PointD, p2: PointD, p3: PointD, t: f64) -> PointD {
    let rev_t = 1.0 - t;
    p0 * (rev_t * rev_t * rev_t)
        + p1 * (3.0 * t * rev_t * rev_t)
        + p2 * (3.0 * t * t * rev_t)
        + p3 * (t * t * t)
}

#[inline]
fn cubic_tangent(p0: PointD, p1: PointD, p2: PointD, p3: PointD, t: f64) -> PointD {
    // First derivative: 3(P1-P0)(1-t)^2 + 6(P2-P1)t(1-t) + 3(P3-P2)t^2.
    let rev_t = 1.0 - t;
    ((p1 - p0) * (rev_t * rev_t) + (p2 - p1) * (2.0 * t * rev_t) + (p3 - p2) * (t * t)) * 3.0
}

/// Estimate the length of a cubic by recursive halving, stopping once the
/// control net length agrees with the chord within `tolerance`.
fn subdivide_and_measure_cubic(points: [PointD; 4], tolerance: f64, depth: u32) -> f64 {
    const MAX_DEPTH: u32 = 20;

    let [p0, p1, p2, p3] = points;
    let chord = p0.distance(p3);
    let control_net = p0.distance(p1) + p1.distance(p2) + p2.distance(p3);

    if control_net - chord <= tolerance || depth >= MAX_DEPTH {
        return (chord + control_net) / 2.0;
    }

    let p01 = (p0 + p1) * 0.5;
    let p12 = (p1 + p2) * 0.5;
    let p23 = (p2 + p3) * 0.5;
    let p012 = (p01 + p12) * 0.5;
    let p123 = (p12 + p23) * 0.5;
    let p0123 = (p012 + p123) * 0.5;

    subdivide_and_measure_cubic([p0, p01, p012, p0123], tolerance, depth + 1)
        + subdivide_and_measure_cubic([p0123, p123, p23, p3], tolerance, depth + 1)
}

// ======================================================================
// Hit-testing helpers
// ======================================================================

/// Winding-number contribution of the segment `p0 -> p1` against a
/// horizontal ray cast rightward from `point`.
fn winding_contribution_line(p0: PointD, p1: PointD, point: PointD) -> i32 {
    if p0.y <= point.y {
        if p1.y > point.y {
            // Upward crossing.
            if (p1 - p0).cross(point - p0) > 0.0 {
                return 1;
            }
        }
    } else if p1.y <= point.y {
        // Downward crossing.
        if (p1 - p0).cross(point - p0) < 0.0 {
            return -1;
        }
    }
    0
}

/// Maximum distance of the interior control points from the chord, used as
/// the flatness metric for curve subdivision.
fn is_curve_flat_enough(p0: PointD, p1: PointD, p2: PointD, p3: PointD, tolerance: f64) -> bool {
    crate::math::distance_to_segment(p1, p0, p3) <= tolerance
        && crate::math::distance_to_segment(p2, p0, p3) <= tolerance
}

fn winding_contribution_curve(
    p0: PointD,
    p1: PointD,
    p2: PointD,
    p3: PointD,
    point: PointD,
    tolerance: f64,
    depth: u32,
) -> i32 {
    const MAX_DEPTH: u32 = 10;

    if is_curve_flat_enough(p0, p1, p2, p3, tolerance) || depth >= MAX_DEPTH {
        return winding_contribution_line(p0, p3, point);
    }

    let p01 = (p0 + p1) * 0.5;
    let p12 = (p1 + p2) * 0.5;
    let p23 = (p2 + p3) * 0.5;
    let p012 = (p01 + p12) * 0.5;
    let p123 = (p12 + p23) * 0.5;
    let p0123 = (p012 + p123) * 0.5;

    winding_contribution_curve(p0, p01, p012, p0123, point, tolerance, depth + 1)
        + winding_contribution_curve(p0123, p123, p23, p3, point, tolerance, depth + 1)
}

fn is_point_on_cubic(
    point: PointD,
    p0: PointD,
    p1: PointD,
    p2: PointD,
    p3: PointD,
    tolerance: f64,
    depth: u32,
) -> bool {
    const MAX_DEPTH: u32 = 10;

    if is_curve_flat_enough(p0, p1, p2, p3, tolerance) || depth >= MAX_DEPTH {
        return crate::math::distance_to_segment(point, p0, p3) <= tolerance;
    }

    let p01 = (p0 + p1) * 0.5;
    let p12 = (p1 + p2) * 0.5;
    let p23 = (p2 + p3) * 0.5;
    let p012 = (p01 + p12) * 0.5;
    let p123 = (p12 + p23) * 0.5;
    let p0123 = (p012 + p123) * 0.5;

    is_point_on_cubic(point, p0, p01, p012, p0123, tolerance, depth + 1)
        || is_point_on_cubic(point, p0123, p123, p23, p3, tolerance, depth + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline_builder::SplineBuilder;

    fn near(a: PointD, b: PointD) -> bool {
        (a - b).length() < 1e-9
    }

    fn line_spline() -> PathSpline {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(1.0, 1.0));
        builder.line_to(PointD::new(2.0, 2.0));
        builder.build()
    }

    #[test]
    fn test_empty_spline() {
        let spline = PathSpline::default();
        assert!(spline.empty());
        assert_eq!(spline.size(), 0);
        assert_eq!(spline.length(), 0.0);
        assert_eq!(spline.bounds(), None);
        assert_eq!(spline.current_point(), None);
    }

    #[test]
    fn test_length_of_line_chain() {
        let spline = line_spline();
        assert!((spline.length() - 2.0 * 2.0_f64.sqrt()).abs() < 1e-12);
        // Cached value is stable across calls.
        assert_eq!(spline.length(), spline.length());
    }

    #[test]
    fn test_length_skips_close_path() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(10.0, 0.0));
        builder.line_to(PointD::new(10.0, 10.0));
        builder.line_to(PointD::new(0.0, 10.0));
        builder.close_path();
        let spline = builder.build();

        assert!((spline.length() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_of_circle() {
        let mut builder = SplineBuilder::new();
        builder.circle(PointD::new(5.0, 5.0), 10.0);
        let spline = builder.build();

        // Kappa approximation of a circle is within ~0.03% of 2*pi*r.
        let expected = 2.0 * std::f64::consts::PI * 10.0;
        assert!((spline.length() - expected).abs() < expected * 1e-3);
    }

    #[test]
    fn test_point_at_line_interpolation() {
        let spline = line_spline();
        assert!(near(spline.point_at(1, 0.0), PointD::new(0.0, 0.0)));
        assert!(near(spline.point_at(1, 0.5), PointD::new(0.5, 0.5)));
        assert!(near(spline.point_at(1, 1.0), PointD::new(1.0, 1.0)));
        assert!(near(spline.point_at(2, 0.5), PointD::new(1.5, 1.5)));
    }

    #[test]
    fn test_point_at_curve_evaluation() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.curve_to(
            PointD::new(0.0, 1.0),
            PointD::new(1.0, 1.0),
            PointD::new(1.0, 0.0),
        );
        let spline = builder.build();

        assert!(near(spline.point_at(1, 0.0), PointD::new(0.0, 0.0)));
        assert!(near(spline.point_at(1, 1.0), PointD::new(1.0, 0.0)));
        // Symmetric curve peaks at the midpoint: y = 3/4 from the Bernstein
        // weights at t = 1/2.
        assert!(near(spline.point_at(1, 0.5), PointD::new(0.5, 0.75)));
    }

    #[test]
    #[should_panic(expected = "drawing segments")]
    fn test_point_at_move_to_panics() {
        let spline = line_spline();
        spline.point_at(0, 0.5);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_point_at_index_out_of_range_panics() {
        let spline = line_spline();
        spline.point_at(10, 0.5);
    }

    #[test]
    fn test_tangent_and_normal() {
        let spline = line_spline();
        let tangent = spline.tangent_at(1, 0.5);
        assert!(near(tangent.normalized(), PointD::new(1.0, 1.0).normalized()));

        let normal = spline.normal_at(1, 0.5);
        assert!(near(normal.normalized(), PointD::new(-1.0, 1.0).normalized()));

        // MoveTo forwards to the following segment.
        assert!(near(
            spline.tangent_at(0, 0.0).normalized(),
            PointD::new(1.0, 1.0).normalized()
        ));
    }

    #[test]
    fn test_tangent_of_close_path() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(10.0, 0.0));
        builder.line_to(PointD::new(10.0, 10.0));
        builder.close_path();
        let spline = builder.build();

        // Closing line runs from (10, 10) back to (0, 0).
        let tangent = spline.tangent_at(3, 0.0);
        assert!(near(tangent.normalized(), PointD::new(-1.0, -1.0).normalized()));
    }

    #[test]
    fn test_bounds_of_lines() {
        let spline = line_spline();
        let bounds = spline.bounds().unwrap();
        assert_eq!(bounds, RectD::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn test_bounds_curve_extrema() {
        // Control points at y = 1 but the curve only reaches y = 3/4; a
        // tight box must not include the control points.
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.curve_to(
            PointD::new(0.0, 1.0),
            PointD::new(1.0, 1.0),
            PointD::new(1.0, 0.0),
        );
        let bounds = builder.build().bounds().unwrap();

        assert!((bounds.x1 - 0.0).abs() < 1e-9);
        assert!((bounds.y1 - 0.0).abs() < 1e-9);
        assert!((bounds.x2 - 1.0).abs() < 1e-9);
        assert!((bounds.y2 - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_of_circle() {
        let mut builder = SplineBuilder::new();
        builder.circle(PointD::new(0.0, 0.0), 5.0);
        let bounds = builder.build().bounds().unwrap();

        assert!((bounds.x1 + 5.0).abs() < 1e-6);
        assert!((bounds.y1 + 5.0).abs() < 1e-6);
        assert!((bounds.x2 - 5.0).abs() < 1e-6);
        assert!((bounds.y2 - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_map_points_translation_translates_bounds() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.curve_to(
            PointD::new(0.0, 4.0),
            PointD::new(4.0, 4.0),
            PointD::new(4.0, 0.0),
        );
        builder.close_path();
        let spline = builder.build();

        let offset = PointD::new(17.0, -3.5);
        let translated = spline.map_points(|p| p + offset);

        let bounds = spline.bounds().unwrap();
        let translated_bounds = translated.bounds().unwrap();
        assert!((translated_bounds.x1 - (bounds.x1 + offset.x)).abs() < 1e-9);
        assert!((translated_bounds.y1 - (bounds.y1 + offset.y)).abs() < 1e-9);
        assert!((translated_bounds.x2 - (bounds.x2 + offset.x)).abs() < 1e-9);
        assert!((translated_bounds.y2 - (bounds.y2 + offset.y)).abs() < 1e-9);

        // The original is untouched.
        assert_eq!(spline.bounds().unwrap(), bounds);
    }

    #[test]
    fn test_map_points_does_not_mutate_structure() {
        let spline = line_spline();
        let mapped = spline.map_points(|p| p * 2.0);
        assert_eq!(mapped.size(), spline.size());
        assert!((mapped.length() - 2.0 * spline.length()).abs() < 1e-9);
    }

    #[test]
    fn test_current_point() {
        let spline = line_spline();
        assert_eq!(spline.current_point(), Some(PointD::new(2.0, 2.0)));

        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(1.0, 2.0));
        builder.line_to(PointD::new(5.0, 5.0));
        builder.close_path();
        let closed = builder.build();
        // ClosePath returns the pen to the subpath start.
        assert_eq!(closed.current_point(), Some(PointD::new(1.0, 2.0)));
    }

    #[test]
    fn test_vertices_simple() {
        let spline = line_spline();
        let vertices = spline.vertices();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0].point, PointD::new(0.0, 0.0));
        assert_eq!(vertices[1].point, PointD::new(1.0, 1.0));
        assert_eq!(vertices[2].point, PointD::new(2.0, 2.0));
        assert!(near(vertices[0].orientation, PointD::new(1.0, 1.0).normalized()));
    }

    #[test]
    fn test_vertices_orientation() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(3.0, 4.0));
        let vertices = builder.build().vertices();

        assert_eq!(vertices.len(), 2);
        assert!(near(vertices[0].orientation, PointD::new(0.6, 0.8)));
        assert!(near(vertices[1].orientation, PointD::new(0.6, 0.8)));
    }

    #[test]
    fn test_vertices_close_path() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(10.0, 0.0));
        builder.line_to(PointD::new(10.0, 10.0));
        builder.close_path();
        let vertices = builder.build().vertices();

        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[3].point, PointD::new(0.0, 0.0));
    }

    #[test]
    fn test_vertices_zero_length_close_skipped() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(10.0, 0.0));
        builder.line_to(PointD::new(0.0, 0.0));
        builder.close_path();
        let vertices = builder.build().vertices();

        // The pen is already back at the start; the close adds nothing.
        assert_eq!(vertices.len(), 3);
    }

    #[test]
    fn test_is_inside_square() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(10.0, 0.0));
        builder.line_to(PointD::new(10.0, 10.0));
        builder.line_to(PointD::new(0.0, 10.0));
        builder.close_path();
        let spline = builder.build();

        assert!(spline.is_inside(PointD::new(5.0, 5.0)));
        assert!(!spline.is_inside(PointD::new(15.0, 5.0)));
        assert!(!spline.is_inside(PointD::new(5.0, -5.0)));
        // Points on the outline count as inside.
        assert!(spline.is_inside(PointD::new(10.0, 5.0)));
    }

    #[test]
    fn test_is_inside_circle() {
        let mut builder = SplineBuilder::new();
        builder.circle(PointD::new(0.0, 0.0), 10.0);
        let spline = builder.build();

        assert!(spline.is_inside(PointD::new(0.0, 0.0)));
        assert!(spline.is_inside(PointD::new(6.0, 6.0)));
        assert!(!spline.is_inside(PointD::new(8.0, 8.0)));
    }

    #[test]
    fn test_fill_rules_differ_on_nested_rings() {
        // Two concentric squares wound the same way: non-zero fills the
        // hole, even-odd does not.
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(-10.0, -10.0));
        builder.line_to(PointD::new(10.0, -10.0));
        builder.line_to(PointD::new(10.0, 10.0));
        builder.line_to(PointD::new(-10.0, 10.0));
        builder.close_path();
        builder.move_to(PointD::new(-5.0, -5.0));
        builder.line_to(PointD::new(5.0, -5.0));
        builder.line_to(PointD::new(5.0, 5.0));
        builder.line_to(PointD::new(-5.0, 5.0));
        builder.close_path();
        let spline = builder.build();

        let center = PointD::new(0.0, 0.0);
        assert!(spline.is_inside_with_rule(center, FillRule::NonZero));
        assert!(!spline.is_inside_with_rule(center, FillRule::EvenOdd));

        let ring = PointD::new(7.0, 0.0);
        assert!(spline.is_inside_with_rule(ring, FillRule::NonZero));
        assert!(spline.is_inside_with_rule(ring, FillRule::EvenOdd));
    }

    #[test]
    fn test_is_on_path() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(10.0, 0.0));
        let spline = builder.build();

        assert!(spline.is_on_path(PointD::new(5.0, 0.5), 1.0));
        assert!(!spline.is_on_path(PointD::new(5.0, 2.0), 1.0));
        assert!(!spline.is_on_path(PointD::new(15.0, 0.0), 1.0));
    }

    #[test]
    fn test_equality_ignores_cached_length() {
        let a = line_spline();
        let b = line_spline();
        let _ = a.length();
        assert_eq!(a, b);
    }
}
