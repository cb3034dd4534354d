//! Stroke outline construction
//!
//! A stroke is painted by building a closed outline polygon around each
//! flattened subpath and filling it with the same nonzero-winding
//! rasterizer as `fill()`. The model is minimal: butt caps and miter
//! joins, with the miter length clamped for near-degenerate angles.
//!
//! Open subpaths produce one outline ring (left side forward, right side
//! backward). Closed subpaths produce two rings whose opposite windings
//! leave the interior hole unfilled.

use crate::flatten::Polyline;
use crate::geometry::Point;

/// Miter scale clamp: joins sharper than this fall back toward bevel
const MITER_SCALE_LIMIT: f32 = 4.0;

/// Builds filled outline polygons for a stroked path
///
/// `width` is the full stroke width in device units; non-positive or
/// non-finite widths produce no outline.
pub fn stroke_outline(polylines: &[Polyline], width: f32) -> Vec<Polyline> {
  if !width.is_finite() || width <= 0.0 {
    return Vec::new();
  }
  let half = width * 0.5;
  let mut outlines = Vec::new();
  for polyline in polylines {
    if polyline.points.len() < 2 {
      continue;
    }
    if polyline.closed {
      stroke_closed(&polyline.points, half, &mut outlines);
    } else {
      stroke_open(&polyline.points, half, &mut outlines);
    }
  }
  outlines
}

/// Unit normal of the edge from `a` to `b`, if the edge has length
fn edge_normal(a: Point, b: Point) -> Option<(f32, f32)> {
  let dx = b.x - a.x;
  let dy = b.y - a.y;
  let len = (dx * dx + dy * dy).sqrt();
  if len <= f32::EPSILON {
    return None;
  }
  Some((-dy / len, dx / len))
}

/// Per-vertex offset direction and scale
///
/// Interior vertices average the adjacent edge normals and stretch by the
/// miter factor `1 / cos(θ/2)`, clamped so near-reversals cannot shoot the
/// join arbitrarily far out.
fn join_offset(prev: (f32, f32), next: (f32, f32)) -> (f32, f32) {
  let mx = prev.0 + next.0;
  let my = prev.1 + next.1;
  let len = (mx * mx + my * my).sqrt();
  if len <= f32::EPSILON {
    // A full reversal: offset along the incoming normal.
    return prev;
  }
  let nx = mx / len;
  let ny = my / len;
  let dot = nx * next.0 + ny * next.1;
  let scale = (1.0 / dot.max(1.0 / MITER_SCALE_LIMIT)).min(MITER_SCALE_LIMIT);
  (nx * scale, ny * scale)
}

/// Edge normals for a vertex run, reusing the previous normal across
/// zero-length edges
fn run_normals(points: &[Point], closed: bool) -> Vec<(f32, f32)> {
  let n = points.len();
  let edge_count = if closed { n } else { n - 1 };
  let mut normals = Vec::with_capacity(edge_count);
  let mut last = (0.0, -1.0);
  for i in 0..edge_count {
    let a = points[i];
    let b = points[(i + 1) % n];
    if let Some(normal) = edge_normal(a, b) {
      last = normal;
    }
    normals.push(last);
  }
  normals
}

/// One outline ring: left offsets forward, right offsets backward
///
/// The squared-off ends of the ring are the butt caps.
fn stroke_open(points: &[Point], half: f32, outlines: &mut Vec<Polyline>) {
  let normals = run_normals(points, false);
  let n = points.len();
  let mut ring = Vec::with_capacity(n * 2);

  for i in 0..n {
    let (ox, oy) = vertex_offset(&normals, i, n, false);
    ring.push(Point::new(
      points[i].x + ox * half,
      points[i].y + oy * half,
    ));
  }
  for i in (0..n).rev() {
    let (ox, oy) = vertex_offset(&normals, i, n, false);
    ring.push(Point::new(
      points[i].x - ox * half,
      points[i].y - oy * half,
    ));
  }
  outlines.push(Polyline {
    points: ring,
    closed: true,
  });
}

/// Two concentric rings with opposite windings
fn stroke_closed(points: &[Point], half: f32, outlines: &mut Vec<Polyline>) {
  let normals = run_normals(points, true);
  let n = points.len();
  let mut outer = Vec::with_capacity(n);
  let mut inner = Vec::with_capacity(n);

  for i in 0..n {
    let (ox, oy) = vertex_offset(&normals, i, n, true);
    outer.push(Point::new(
      points[i].x + ox * half,
      points[i].y + oy * half,
    ));
    inner.push(Point::new(
      points[i].x - ox * half,
      points[i].y - oy * half,
    ));
  }
  inner.reverse();
  outlines.push(Polyline {
    points: outer,
    closed: true,
  });
  outlines.push(Polyline {
    points: inner,
    closed: true,
  });
}

/// Offset direction for vertex `i` given the per-edge normals
fn vertex_offset(normals: &[(f32, f32)], i: usize, n: usize, closed: bool) -> (f32, f32) {
  if closed {
    let prev = normals[(i + n - 1) % n];
    let next = normals[i];
    join_offset(prev, next)
  } else if i == 0 {
    normals[0]
  } else if i == n - 1 {
    normals[n - 2]
  } else {
    join_offset(normals[i - 1], normals[i])
  }
}
