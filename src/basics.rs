//! Foundation value types for path geometry.
//!
//! `PointD` and `RectD` are plain `f64` value types shared by the parser,
//! the segment builder, and the spline queries. Everything here is cheap to
//! copy and carries no invariants beyond what the constructors establish.

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// ============================================================================
// Angle helpers
// ============================================================================

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

/// Approximate equality within `epsilon`.
#[inline]
pub fn is_equal_eps(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

// ============================================================================
// Fill rule
// ============================================================================

/// Fill rule used when hit-testing the interior of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Inside if the winding number is non-zero.
    #[default]
    NonZero,
    /// Inside if the winding number is odd.
    EvenOdd,
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point (or vector) with `f64` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    /// The origin.
    pub const ZERO: PointD = PointD { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: PointD) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(self, other: PointD) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared Euclidean length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Distance to `other`.
    #[inline]
    pub fn distance(self, other: PointD) -> f64 {
        (other - self).length()
    }

    /// Squared distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: PointD) -> f64 {
        (other - self).length_squared()
    }

    /// Unit-length copy, or the zero vector if the length is zero.
    pub fn normalized(self) -> PointD {
        let len = self.length();
        if len == 0.0 {
            PointD::ZERO
        } else {
            PointD::new(self.x / len, self.y / len)
        }
    }

    /// Rotate by an angle given as its cosine and sine.
    #[inline]
    pub fn rotated(self, cos_a: f64, sin_a: f64) -> PointD {
        PointD::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }
}

impl Add for PointD {
    type Output = PointD;
    #[inline]
    fn add(self, rhs: PointD) -> PointD {
        PointD::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for PointD {
    #[inline]
    fn add_assign(&mut self, rhs: PointD) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for PointD {
    type Output = PointD;
    #[inline]
    fn sub(self, rhs: PointD) -> PointD {
        PointD::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for PointD {
    #[inline]
    fn sub_assign(&mut self, rhs: PointD) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for PointD {
    type Output = PointD;
    #[inline]
    fn neg(self) -> PointD {
        PointD::new(-self.x, -self.y)
    }
}

impl Mul<f64> for PointD {
    type Output = PointD;
    #[inline]
    fn mul(self, rhs: f64) -> PointD {
        PointD::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<PointD> for f64 {
    type Output = PointD;
    #[inline]
    fn mul(self, rhs: PointD) -> PointD {
        rhs * self
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle defined by two corner points, `(x1, y1)` being
/// the minimum corner and `(x2, y2)` the maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectD {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RectD {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// A degenerate rectangle covering a single point.
    pub fn from_point(p: PointD) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Grow the rectangle to contain `p`.
    pub fn add_point(&mut self, p: PointD) {
        if p.x < self.x1 {
            self.x1 = p.x;
        }
        if p.y < self.y1 {
            self.y1 = p.y;
        }
        if p.x > self.x2 {
            self.x2 = p.x;
        }
        if p.y > self.y2 {
            self.y2 = p.y;
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns `true` if the rectangle is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns `true` if the point is inside the rectangle (edges inclusive).
    pub fn hit_test(&self, p: PointD) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }
}
