//! Path representation and construction
//!
//! A path is an ordered sequence of segments describing one or more
//! subpaths. All point data is stored in device space: the caller (the
//! drawing context) applies the current transform before appending, so
//! later transform changes never retroactively move existing segments.
//!
//! Degenerate appends (non-finite coordinates, negative arc radii) are
//! silently skipped, leaving the path otherwise valid.

use crate::geometry::Point;

/// A single path segment
///
/// Point fields are device-space coordinates fixed at append time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
  /// Starts a new subpath at the given point
  MoveTo(Point),
  /// Straight line from the current point
  LineTo(Point),
  /// Quadratic Bézier curve from the current point
  QuadraticCurve { control: Point, end: Point },
  /// Cubic Bézier curve from the current point
  CubicCurve {
    control1: Point,
    control2: Point,
    end: Point,
  },
  /// Circular arc around `center`
  ///
  /// `ccw` selects the sweep direction: `false` sweeps with increasing
  /// angle (clockwise on a y-down surface), `true` with decreasing angle.
  Arc {
    center: Point,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    ccw: bool,
  },
  /// Connects the current point back to the subpath start
  ClosePath,
}

/// Signed angular sweep of an arc, normalized per canvas rules
///
/// The result is in `(0, 2π]` for clockwise arcs and `[-2π, 0)` for
/// counterclockwise arcs, except that a zero start/end delta stays zero.
/// Spans of a full turn or more collapse to exactly one full circle.
pub(crate) fn arc_sweep(start_angle: f32, end_angle: f32, ccw: bool) -> f32 {
  let tau = std::f32::consts::TAU;
  if !ccw {
    let delta = end_angle - start_angle;
    if delta >= tau {
      tau
    } else {
      delta.rem_euclid(tau)
    }
  } else {
    let delta = start_angle - end_angle;
    if delta >= tau {
      -tau
    } else {
      -delta.rem_euclid(tau)
    }
  }
}

/// Point on a circle at the given angle
#[inline]
pub(crate) fn arc_point(center: Point, radius: f32, angle: f32) -> Point {
  Point::new(
    center.x + radius * angle.cos(),
    center.y + radius * angle.sin(),
  )
}

/// An ordered sequence of path segments plus builder bookkeeping
///
/// Tracks the current point and the active subpath's start point so that
/// `close()` and implicit moves behave without the caller replaying the
/// segment list.
#[derive(Debug, Clone, Default)]
pub struct Path {
  segments: Vec<PathSegment>,
  current: Option<Point>,
  subpath_start: Option<Point>,
}

impl Path {
  /// Creates an empty path
  pub fn new() -> Self {
    Self::default()
  }

  /// Resets the path to empty, dropping all subpaths
  pub fn clear(&mut self) {
    self.segments.clear();
    self.current = None;
    self.subpath_start = None;
  }

  /// The recorded segments, in append order
  pub fn segments(&self) -> &[PathSegment] {
    &self.segments
  }

  /// Returns true when no segments have been recorded
  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  /// The current point, if a subpath is open
  pub fn current_point(&self) -> Option<Point> {
    self.current
  }

  /// Starts a new subpath at `p`
  pub fn move_to(&mut self, p: Point) {
    if !p.is_finite() {
      return;
    }
    self.segments.push(PathSegment::MoveTo(p));
    self.current = Some(p);
    self.subpath_start = Some(p);
  }

  /// Appends a straight segment to `p`
  ///
  /// With no current point this behaves as `move_to`.
  pub fn line_to(&mut self, p: Point) {
    if !p.is_finite() {
      return;
    }
    if self.current.is_none() {
      self.move_to(p);
      return;
    }
    self.segments.push(PathSegment::LineTo(p));
    self.current = Some(p);
  }

  /// Appends a quadratic curve segment
  ///
  /// With no current point, an implicit move to the control point opens
  /// the subpath first.
  pub fn quad_to(&mut self, control: Point, end: Point) {
    if !control.is_finite() || !end.is_finite() {
      return;
    }
    if self.current.is_none() {
      self.move_to(control);
    }
    self.segments.push(PathSegment::QuadraticCurve { control, end });
    self.current = Some(end);
  }

  /// Appends a cubic curve segment
  pub fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) {
    if !control1.is_finite() || !control2.is_finite() || !end.is_finite() {
      return;
    }
    if self.current.is_none() {
      self.move_to(control1);
    }
    self.segments.push(PathSegment::CubicCurve {
      control1,
      control2,
      end,
    });
    self.current = Some(end);
  }

  /// Appends a circular arc segment
  ///
  /// A connecting line is emitted from any existing current point to the
  /// arc's start point; with no current point the arc opens a new subpath.
  /// Negative radii and non-finite inputs are skipped.
  pub fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32, ccw: bool) {
    if !center.is_finite()
      || !radius.is_finite()
      || radius < 0.0
      || !start_angle.is_finite()
      || !end_angle.is_finite()
    {
      return;
    }
    let start = arc_point(center, radius, start_angle);
    if self.current.is_some() {
      self.line_to(start);
    } else {
      self.move_to(start);
    }
    self.segments.push(PathSegment::Arc {
      center,
      radius,
      start_angle,
      end_angle,
      ccw,
    });
    let sweep = arc_sweep(start_angle, end_angle, ccw);
    self.current = Some(arc_point(center, radius, start_angle + sweep));
  }

  /// Appends a closed rectangular subpath through four device-space corners
  ///
  /// The current point and subpath start end up at `p0`.
  pub fn rect(&mut self, p0: Point, p1: Point, p2: Point, p3: Point) {
    if !p0.is_finite() || !p1.is_finite() || !p2.is_finite() || !p3.is_finite() {
      return;
    }
    self.move_to(p0);
    self.line_to(p1);
    self.line_to(p2);
    self.line_to(p3);
    self.close();
  }

  /// Closes the active subpath
  ///
  /// Connects the current point to the subpath start. A second consecutive
  /// close is a no-op, as is closing with no open subpath.
  pub fn close(&mut self) {
    let start = match self.subpath_start {
      Some(start) => start,
      None => return,
    };
    if matches!(self.segments.last(), Some(PathSegment::ClosePath)) {
      return;
    }
    self.segments.push(PathSegment::ClosePath);
    // The next segment continues from the subpath start.
    self.current = Some(start);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn line_without_current_point_moves() {
    let mut path = Path::new();
    path.line_to(Point::new(5.0, 6.0));
    assert_eq!(path.segments(), &[PathSegment::MoveTo(Point::new(5.0, 6.0))]);
    assert_eq!(path.current_point(), Some(Point::new(5.0, 6.0)));
  }

  #[test]
  fn close_twice_appends_once() {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(10.0, 0.0));
    path.close();
    path.close();
    let closes = path
      .segments()
      .iter()
      .filter(|s| matches!(s, PathSegment::ClosePath))
      .count();
    assert_eq!(closes, 1);
  }

  #[test]
  fn close_resets_current_to_subpath_start() {
    let mut path = Path::new();
    path.move_to(Point::new(2.0, 3.0));
    path.line_to(Point::new(10.0, 3.0));
    path.close();
    assert_eq!(path.current_point(), Some(Point::new(2.0, 3.0)));
  }

  #[test]
  fn close_on_empty_path_is_noop() {
    let mut path = Path::new();
    path.close();
    assert!(path.is_empty());
  }

  #[test]
  fn non_finite_segment_is_skipped() {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(f32::NAN, 1.0));
    path.line_to(Point::new(4.0, 4.0));
    assert_eq!(path.segments().len(), 2);
    assert_eq!(path.current_point(), Some(Point::new(4.0, 4.0)));
  }

  #[test]
  fn negative_radius_arc_is_skipped() {
    let mut path = Path::new();
    path.arc(Point::new(0.0, 0.0), -1.0, 0.0, 1.0, false);
    assert!(path.is_empty());
  }

  #[test]
  fn arc_emits_connecting_line() {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0));
    path.arc(Point::new(0.0, 0.0), 10.0, 0.0, std::f32::consts::PI, false);
    assert!(matches!(path.segments()[1], PathSegment::LineTo(p) if p == Point::new(10.0, 0.0)));
    assert!(matches!(path.segments()[2], PathSegment::Arc { .. }));
  }

  #[test]
  fn arc_sweep_normalization() {
    use std::f32::consts::{PI, TAU};
    assert_eq!(arc_sweep(0.0, PI, false), PI);
    assert_eq!(arc_sweep(0.0, PI, true), -PI);
    // Spans of a full turn or more collapse to one full circle.
    assert_eq!(arc_sweep(0.0, 2.0 * TAU, false), TAU);
    assert_eq!(arc_sweep(0.0, -2.0 * TAU, true), -TAU);
    // Negative deltas wrap into the sweep direction's range.
    assert!((arc_sweep(0.0, -3.0 * PI / 2.0, false) - PI / 2.0).abs() < 1e-6);
  }

  #[test]
  fn rect_is_closed_and_restarts_at_origin_corner() {
    let mut path = Path::new();
    path.rect(
      Point::new(1.0, 1.0),
      Point::new(9.0, 1.0),
      Point::new(9.0, 9.0),
      Point::new(1.0, 9.0),
    );
    assert_eq!(path.segments().len(), 5);
    assert!(matches!(path.segments()[4], PathSegment::ClosePath));
    assert_eq!(path.current_point(), Some(Point::new(1.0, 1.0)));
  }
}
