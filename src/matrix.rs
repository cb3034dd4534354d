//! 2D affine transform
//!
//! A transform is six coefficients `(a, b, c, d, e, f)` mapping a point as:
//!
//! ```text
//! x' = a*x + c*y + e
//! y' = b*x + d*y + f
//! ```
//!
//! Composition is fixed as right-multiplication: applying a new transform `N`
//! to the current transform `C` yields `C ∘ N`, so `N` acts on incoming
//! coordinates first. Every transform-mutating call on the context uses this
//! one rule.

use crate::geometry::Point;

/// A 2D affine transform as six coefficients
///
/// The identity transform is the default.
///
/// # Examples
///
/// ```
/// use softcanvas::{Matrix2D, Point};
///
/// let m = Matrix2D::translation(3.0, 4.0);
/// assert_eq!(m.map_point(Point::new(1.0, 1.0)), Point::new(4.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2D {
  pub a: f32,
  pub b: f32,
  pub c: f32,
  pub d: f32,
  pub e: f32,
  pub f: f32,
}

impl Matrix2D {
  /// The identity transform
  pub const IDENTITY: Self = Self {
    a: 1.0,
    b: 0.0,
    c: 0.0,
    d: 1.0,
    e: 0.0,
    f: 0.0,
  };

  /// Creates a transform from raw coefficients
  pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
    Self { a, b, c, d, e, f }
  }

  /// A pure translation by `(dx, dy)`
  pub const fn translation(dx: f32, dy: f32) -> Self {
    Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
  }

  /// A pure scale by `(sx, sy)` about the origin
  pub const fn scaling(sx: f32, sy: f32) -> Self {
    Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
  }

  /// A pure rotation by `angle` radians about the origin
  ///
  /// Positive angles rotate from the +X axis toward the +Y axis, which is
  /// clockwise on a y-down surface.
  pub fn rotation(angle: f32) -> Self {
    let (sin, cos) = angle.sin_cos();
    Self::new(cos, sin, -sin, cos, 0.0, 0.0)
  }

  /// Returns `self ∘ other`: `other` is applied to coordinates first
  ///
  /// # Examples
  ///
  /// ```
  /// use softcanvas::Matrix2D;
  ///
  /// let m = Matrix2D::scaling(2.0, 2.0).then(Matrix2D::translation(3.0, 0.0));
  /// assert_eq!(m, Matrix2D::new(2.0, 0.0, 0.0, 2.0, 6.0, 0.0));
  /// ```
  #[must_use]
  pub fn then(self, other: Matrix2D) -> Self {
    Self {
      a: self.a * other.a + self.c * other.b,
      b: self.b * other.a + self.d * other.b,
      c: self.a * other.c + self.c * other.d,
      d: self.b * other.c + self.d * other.d,
      e: self.a * other.e + self.c * other.f + self.e,
      f: self.b * other.e + self.d * other.f + self.f,
    }
  }

  /// Maps a point through the transform
  #[inline]
  pub fn map_point(self, p: Point) -> Point {
    Point {
      x: self.a * p.x + self.c * p.y + self.e,
      y: self.b * p.x + self.d * p.y + self.f,
    }
  }

  /// Returns the inverse transform, or `None` when the matrix is singular
  /// or carries non-finite coefficients
  pub fn invert(self) -> Option<Self> {
    let det = self.a * self.d - self.b * self.c;
    if det == 0.0 || !det.is_finite() {
      return None;
    }
    let inv_det = 1.0 / det;
    Some(Self {
      a: self.d * inv_det,
      b: -self.b * inv_det,
      c: -self.c * inv_det,
      d: self.a * inv_det,
      e: (self.c * self.f - self.d * self.e) * inv_det,
      f: (self.b * self.e - self.a * self.f) * inv_det,
    })
  }

  /// Returns true when all six coefficients are finite
  #[inline]
  pub fn is_finite(self) -> bool {
    self.a.is_finite()
      && self.b.is_finite()
      && self.c.is_finite()
      && self.d.is_finite()
      && self.e.is_finite()
      && self.f.is_finite()
  }
}

impl Default for Matrix2D {
  fn default() -> Self {
    Self::IDENTITY
  }
}
