//! Incremental construction of [PathSpline] values.
//!
//! The builder is the single entry point for creating splines: the path-data
//! parser drives it command by command, and basic shapes (circles, ellipses,
//! rounded rectangles) call it directly without going through text. All
//! coordinates are absolute; relative-to-absolute conversion happens in the
//! parser. Quadratic curves and elliptical arcs are lowered to cubics here,
//! so the finished spline only ever contains [Command::MoveTo],
//! [Command::LineTo], [Command::CurveTo] and [Command::ClosePath].
//!
//! Drawing before the first `move_to` is a programmer error and panics; the
//! parser guarantees it never does this by rejecting path data that does not
//! start with a move-to command.

use crate::basics::PointD;
use crate::bezier_arc::{arc_to_cubics, ArcApproximation};
use crate::path_spline::{Command, PathSpline};

/// 4/3 * (sqrt(2) - 1), the control-point offset that makes four cubics
/// approximate a circle.
const ARC_MAGIC: f64 = 0.5522847498;

/// Builds a [PathSpline] one command at a time.
#[derive(Debug, Clone, Default)]
pub struct SplineBuilder {
    commands: Vec<Command>,
    current: PointD,
    subpath_start: PointD,
    started: bool,
}

impl SplineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the next drawing command will start from.
    #[inline]
    pub fn current_point(&self) -> PointD {
        self.current
    }

    /// Start a new subpath at `point`. Consecutive move-tos collapse into
    /// one; only the last position matters.
    pub fn move_to(&mut self, point: PointD) -> &mut Self {
        if let Some(last @ Command::MoveTo(_)) = self.commands.last_mut() {
            *last = Command::MoveTo(point);
        } else {
            self.commands.push(Command::MoveTo(point));
        }
        self.current = point;
        self.subpath_start = point;
        self.started = true;
        self
    }

    /// Straight line from the current point to `point`.
    pub fn line_to(&mut self, point: PointD) -> &mut Self {
        assert!(self.started, "line_to without a preceding move_to");
        self.commands.push(Command::LineTo(point));
        self.current = point;
        self
    }

    /// Cubic Bezier curve from the current point.
    pub fn curve_to(&mut self, ctrl1: PointD, ctrl2: PointD, to: PointD) -> &mut Self {
        assert!(self.started, "curve_to without a preceding move_to");
        self.commands.push(Command::CurveTo { ctrl1, ctrl2, to });
        self.current = to;
        self
    }

    /// Quadratic Bezier curve from the current point, stored as the
    /// degree-elevated cubic with identical geometry.
    pub fn quad_to(&mut self, ctrl: PointD, to: PointD) -> &mut Self {
        assert!(self.started, "quad_to without a preceding move_to");
        let ctrl1 = (self.current + ctrl * 2.0) * (1.0 / 3.0);
        let ctrl2 = (to + ctrl * 2.0) * (1.0 / 3.0);
        self.curve_to(ctrl1, ctrl2, to)
    }

    /// Elliptical arc from the current point, lowered to cubic segments.
    /// Degenerate arcs (zero radius, zero length) become a line segment.
    pub fn arc_to(
        &mut self,
        radius: PointD,
        rotation_radians: f64,
        large_arc: bool,
        sweep: bool,
        end: PointD,
    ) -> &mut Self {
        assert!(self.started, "arc_to without a preceding move_to");
        match arc_to_cubics(self.current, radius, rotation_radians, large_arc, sweep, end) {
            ArcApproximation::Line => self.line_to(end),
            ArcApproximation::Curves(segments) => {
                for segment in segments {
                    self.curve_to(segment.ctrl1, segment.ctrl2, segment.to);
                }
                self
            }
        }
    }

    /// Close the current subpath with a line back to its start. The current
    /// point moves back to the subpath start.
    pub fn close_path(&mut self) -> &mut Self {
        assert!(self.started, "close_path without a preceding move_to");
        self.commands.push(Command::ClosePath);
        self.current = self.subpath_start;
        self
    }

    /// Append a full ellipse as four cubic segments plus a close. The
    /// subpath starts at `center + (radius.x, 0)` and runs in the positive
    /// angular direction.
    pub fn ellipse(&mut self, center: PointD, radius: PointD) -> &mut Self {
        let (rx, ry) = (radius.x, radius.y);

        self.move_to(center + PointD::new(rx, 0.0));
        self.curve_to(
            center + PointD::new(rx, ry * ARC_MAGIC),
            center + PointD::new(rx * ARC_MAGIC, ry),
            center + PointD::new(0.0, ry),
        );
        self.curve_to(
            center + PointD::new(-rx * ARC_MAGIC, ry),
            center + PointD::new(-rx, ry * ARC_MAGIC),
            center + PointD::new(-rx, 0.0),
        );
        self.curve_to(
            center + PointD::new(-rx, -ry * ARC_MAGIC),
            center + PointD::new(-rx * ARC_MAGIC, -ry),
            center + PointD::new(0.0, -ry),
        );
        self.curve_to(
            center + PointD::new(rx * ARC_MAGIC, -ry),
            center + PointD::new(rx, -ry * ARC_MAGIC),
            center + PointD::new(rx, 0.0),
        );
        self.close_path()
    }

    /// Append a full circle, an ellipse with equal radii.
    pub fn circle(&mut self, center: PointD, radius: f64) -> &mut Self {
        self.ellipse(center, PointD::new(radius, radius))
    }

    /// Finish the spline. A trailing move-to that starts nothing is
    /// dropped, unless it is the only command.
    pub fn build(mut self) -> PathSpline {
        if self.commands.len() > 1 {
            if let Some(Command::MoveTo(_)) = self.commands.last() {
                self.commands.pop();
            }
        }
        PathSpline::new(self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder() {
        let spline = SplineBuilder::new().build();
        assert!(spline.empty());
    }

    #[test]
    fn test_move_line_close() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(1.0, 2.0));
        builder.line_to(PointD::new(3.0, 4.0));
        builder.close_path();
        let spline = builder.build();

        assert_eq!(
            spline.commands(),
            &[
                Command::MoveTo(PointD::new(1.0, 2.0)),
                Command::LineTo(PointD::new(3.0, 4.0)),
                Command::ClosePath,
            ]
        );
    }

    #[test]
    fn test_consecutive_move_to_collapses() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(1.0, 1.0));
        builder.move_to(PointD::new(2.0, 2.0));
        builder.move_to(PointD::new(3.0, 3.0));
        builder.line_to(PointD::new(4.0, 4.0));
        let spline = builder.build();

        assert_eq!(
            spline.commands(),
            &[
                Command::MoveTo(PointD::new(3.0, 3.0)),
                Command::LineTo(PointD::new(4.0, 4.0)),
            ]
        );
    }

    #[test]
    fn test_trailing_move_to_stripped() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.line_to(PointD::new(1.0, 0.0));
        builder.move_to(PointD::new(5.0, 5.0));
        let spline = builder.build();

        assert_eq!(spline.size(), 2);
        assert_eq!(
            spline.commands().last(),
            Some(&Command::LineTo(PointD::new(1.0, 0.0)))
        );
    }

    #[test]
    fn test_lone_move_to_is_kept() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(5.0, 5.0));
        let spline = builder.build();

        assert_eq!(spline.commands(), &[Command::MoveTo(PointD::new(5.0, 5.0))]);
    }

    #[test]
    fn test_close_path_resets_current_point() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(1.0, 1.0));
        builder.line_to(PointD::new(9.0, 1.0));
        builder.close_path();
        assert_eq!(builder.current_point(), PointD::new(1.0, 1.0));

        // Drawing continues from the subpath start.
        builder.line_to(PointD::new(0.0, 5.0));
        let spline = builder.build();
        assert_eq!(spline.size(), 4);
    }

    #[test]
    fn test_quad_to_elevates_to_cubic() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.quad_to(PointD::new(3.0, 6.0), PointD::new(6.0, 0.0));
        let spline = builder.build();

        match spline.commands()[1] {
            Command::CurveTo { ctrl1, ctrl2, to } => {
                assert_eq!(ctrl1, PointD::new(2.0, 4.0));
                assert_eq!(ctrl2, PointD::new(4.0, 4.0));
                assert_eq!(to, PointD::new(6.0, 0.0));
            }
            ref other => panic!("expected CurveTo, got {other:?}"),
        }

        // The elevated cubic passes through the quadratic's midpoint,
        // B(0.5) = (p0 + 2*ctrl + p2) / 4.
        let mid = spline.point_at(1, 0.5);
        assert!((mid.x - 3.0).abs() < 1e-12);
        assert!((mid.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_arc_to_appends_curves() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(-10.0, 0.0));
        builder.arc_to(PointD::new(10.0, 10.0), 0.0, false, true, PointD::new(10.0, 0.0));
        let spline = builder.build();

        // A half circle subdivides into two cubics.
        assert_eq!(spline.size(), 3);
        assert_eq!(spline.current_point(), Some(PointD::new(10.0, 0.0)));
    }

    #[test]
    fn test_arc_to_zero_radius_is_line() {
        let mut builder = SplineBuilder::new();
        builder.move_to(PointD::new(0.0, 0.0));
        builder.arc_to(PointD::new(0.0, 5.0), 0.0, false, true, PointD::new(10.0, 0.0));
        let spline = builder.build();

        assert_eq!(
            spline.commands(),
            &[
                Command::MoveTo(PointD::new(0.0, 0.0)),
                Command::LineTo(PointD::new(10.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_ellipse_command_shape() {
        let mut builder = SplineBuilder::new();
        builder.ellipse(PointD::new(0.0, 0.0), PointD::new(4.0, 2.0));
        let spline = builder.build();

        // MoveTo, four curves, close.
        assert_eq!(spline.size(), 6);
        assert_eq!(spline.commands()[0], Command::MoveTo(PointD::new(4.0, 0.0)));
        assert_eq!(spline.commands()[5], Command::ClosePath);

        // Quadrant anchor points.
        match spline.commands()[2] {
            Command::CurveTo { to, .. } => assert_eq!(to, PointD::new(-4.0, 0.0)),
            ref other => panic!("expected CurveTo, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "without a preceding move_to")]
    fn test_line_to_before_move_to_panics() {
        let mut builder = SplineBuilder::new();
        builder.line_to(PointD::new(1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "without a preceding move_to")]
    fn test_close_path_before_move_to_panics() {
        let mut builder = SplineBuilder::new();
        builder.close_path();
    }
}
