//! Curve and arc flattening
//!
//! Converts the curved segments of a path into polylines whose maximum
//! deviation from the true curve stays below a device-space tolerance.
//! Flattening is purely arithmetic and deterministic: the same segments and
//! tolerance always produce the same polylines, which keeps golden-output
//! tests stable.
//!
//! Flattening happens lazily, only when a path is consumed by a paint or
//! hit-test operation, never during path construction.

use crate::geometry::Point;
use crate::path::{arc_point, arc_sweep, Path, PathSegment};

/// Device-space flatness tolerance used by all paint operations
pub const FLATNESS_TOLERANCE: f32 = 0.1;

/// Recursion cap for curve subdivision
const MAX_DEPTH: u32 = 16;

/// Upper bound on line segments generated for a single arc
const MAX_ARC_STEPS: u32 = 4096;

/// A flattened subpath
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
  /// Vertices in device space
  pub points: Vec<Point>,
  /// True when the subpath was closed explicitly
  pub closed: bool,
}

/// Flattens every subpath of `path` into polylines
///
/// Curves are subdivided until their control points deviate from the chord
/// by less than `tolerance`; arcs are sampled at an angular step derived
/// from the same tolerance.
pub fn flatten_path(path: &Path, tolerance: f32) -> Vec<Polyline> {
  let mut out = Vec::new();
  let mut points: Vec<Point> = Vec::new();
  let mut subpath_start = Point::ZERO;

  for segment in path.segments() {
    match *segment {
      PathSegment::MoveTo(p) => {
        flush(&mut out, &mut points, false);
        points.push(p);
        subpath_start = p;
      }
      PathSegment::LineTo(p) => push_point(&mut points, p),
      PathSegment::QuadraticCurve { control, end } => {
        if let Some(&cursor) = points.last() {
          flatten_quad(&mut points, cursor, control, end, tolerance, 0);
        }
      }
      PathSegment::CubicCurve {
        control1,
        control2,
        end,
      } => {
        if let Some(&cursor) = points.last() {
          flatten_cubic(&mut points, cursor, control1, control2, end, tolerance, 0);
        }
      }
      PathSegment::Arc {
        center,
        radius,
        start_angle,
        end_angle,
        ccw,
      } => {
        flatten_arc(
          &mut points,
          center,
          radius,
          start_angle,
          end_angle,
          ccw,
          tolerance,
        );
      }
      PathSegment::ClosePath => {
        flush(&mut out, &mut points, true);
        points.push(subpath_start);
      }
    }
  }
  flush(&mut out, &mut points, false);
  out
}

/// Moves the accumulated vertices into a finished polyline
///
/// Single-vertex runs carry no geometry and are dropped.
fn flush(out: &mut Vec<Polyline>, points: &mut Vec<Point>, closed: bool) {
  if points.len() >= 2 {
    out.push(Polyline {
      points: std::mem::take(points),
      closed,
    });
  } else {
    points.clear();
  }
}

/// Appends a vertex, collapsing exact duplicates
fn push_point(points: &mut Vec<Point>, p: Point) {
  if points.last() != Some(&p) {
    points.push(p);
  }
}

/// True when both control points sit within `tolerance` of the chord
fn cubic_flat_enough(p0: Point, c1: Point, c2: Point, end: Point, tolerance: f32) -> bool {
  let dx = end.x - p0.x;
  let dy = end.y - p0.y;
  let len_sq = dx * dx + dy * dy;
  if len_sq <= f32::EPSILON {
    // Degenerate chord: fall back to control distance from the endpoints.
    return p0.distance_to(c1).max(p0.distance_to(c2)) <= tolerance;
  }
  let d1 = ((c1.x - p0.x) * dy - (c1.y - p0.y) * dx).abs();
  let d2 = ((c2.x - p0.x) * dy - (c2.y - p0.y) * dx).abs();
  d1.max(d2) <= tolerance * len_sq.sqrt()
}

/// Recursively subdivides a cubic curve at its midpoint
fn flatten_cubic(
  points: &mut Vec<Point>,
  p0: Point,
  c1: Point,
  c2: Point,
  end: Point,
  tolerance: f32,
  depth: u32,
) {
  if depth >= MAX_DEPTH || cubic_flat_enough(p0, c1, c2, end, tolerance) {
    push_point(points, end);
    return;
  }
  let p01 = p0.midpoint(c1);
  let p12 = c1.midpoint(c2);
  let p23 = c2.midpoint(end);
  let p012 = p01.midpoint(p12);
  let p123 = p12.midpoint(p23);
  let mid = p012.midpoint(p123);
  flatten_cubic(points, p0, p01, p012, mid, tolerance, depth + 1);
  flatten_cubic(points, mid, p123, p23, end, tolerance, depth + 1);
}

/// Recursively subdivides a quadratic curve at its midpoint
fn flatten_quad(
  points: &mut Vec<Point>,
  p0: Point,
  control: Point,
  end: Point,
  tolerance: f32,
  depth: u32,
) {
  let flat = {
    let dx = end.x - p0.x;
    let dy = end.y - p0.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f32::EPSILON {
      p0.distance_to(control) <= tolerance
    } else {
      let d = ((control.x - p0.x) * dy - (control.y - p0.y) * dx).abs();
      d <= tolerance * len_sq.sqrt()
    }
  };
  if depth >= MAX_DEPTH || flat {
    push_point(points, end);
    return;
  }
  let p01 = p0.midpoint(control);
  let p12 = control.midpoint(end);
  let mid = p01.midpoint(p12);
  flatten_quad(points, p0, p01, mid, tolerance, depth + 1);
  flatten_quad(points, mid, p12, end, tolerance, depth + 1);
}

/// Samples an arc at a uniform angular step bounded by the chord deviation
///
/// The cursor is already at the arc's start point when this is called; only
/// the interior and end samples are appended.
fn flatten_arc(
  points: &mut Vec<Point>,
  center: Point,
  radius: f32,
  start_angle: f32,
  end_angle: f32,
  ccw: bool,
  tolerance: f32,
) {
  let sweep = arc_sweep(start_angle, end_angle, ccw);
  if sweep == 0.0 {
    return;
  }
  let steps = arc_steps(radius, sweep.abs(), tolerance);
  for i in 1..=steps {
    let t = i as f32 / steps as f32;
    push_point(points, arc_point(center, radius, start_angle + sweep * t));
  }
}

/// Number of uniform steps keeping chord deviation under `tolerance`
///
/// The sagitta of a chord spanning angle `step` is `r * (1 - cos(step/2))`.
fn arc_steps(radius: f32, sweep: f32, tolerance: f32) -> u32 {
  if radius <= tolerance {
    return 1;
  }
  let max_step = 2.0 * (1.0 - tolerance / radius).acos();
  if max_step <= 0.0 {
    return MAX_ARC_STEPS;
  }
  ((sweep / max_step).ceil() as u32).clamp(1, MAX_ARC_STEPS)
}
