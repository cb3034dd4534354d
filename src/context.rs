//! The drawing context
//!
//! Owns the path and the state stack for its entire lifetime and drives
//! the flattener and rasterizer against a borrowed surface. Incoming
//! coordinates are transformed by the current transform at call time and
//! stored in device space, so transform changes never retroactively move
//! path geometry that was already appended.
//!
//! Paint operations are synchronous and run to completion; the context is
//! exclusive-access by construction (`&mut self`), so no internal locking
//! exists or is needed.

use tracing::trace;

use crate::clip::ClipRegion;
use crate::color::Rgba;
use crate::flatten::{flatten_path, FLATNESS_TOLERANCE};
use crate::geometry::Point;
use crate::matrix::Matrix2D;
use crate::path::Path;
use crate::raster::{fill_spans, point_in_polylines, Span};
use crate::state::{DrawingState, StateStack};
use crate::stroke::stroke_outline;
use crate::surface::Surface;

/// Stateful immediate-mode 2D drawing context
///
/// One context paints to one surface; the surface is borrowed per call and
/// must outlive the context. See [`Canvas`](crate::canvas::Canvas) for the
/// owning handle that bundles the two.
#[derive(Debug, Default)]
pub struct Context {
  path: Path,
  states: StateStack,
}

impl Context {
  /// Creates a context with an empty path and the base drawing state
  pub fn new() -> Self {
    Self {
      path: Path::new(),
      states: StateStack::new(),
    }
  }

  // ==========================================================================
  // State stack
  // ==========================================================================

  /// Pushes a snapshot of the current drawing state
  pub fn save(&mut self) {
    self.states.save();
  }

  /// Pops the most recent snapshot; a no-op at the base state
  pub fn restore(&mut self) {
    self.states.restore();
  }

  /// The active drawing state
  pub fn state(&self) -> &DrawingState {
    self.states.current()
  }

  // ==========================================================================
  // Transform engine
  // ==========================================================================

  /// Composes a translation onto the current transform
  pub fn translate(&mut self, dx: f32, dy: f32) {
    self.compose(Matrix2D::translation(dx, dy));
  }

  /// Composes a scale onto the current transform
  pub fn scale(&mut self, sx: f32, sy: f32) {
    self.compose(Matrix2D::scaling(sx, sy));
  }

  /// Composes a rotation (radians) onto the current transform
  pub fn rotate(&mut self, angle: f32) {
    if !angle.is_finite() {
      return;
    }
    self.compose(Matrix2D::rotation(angle));
  }

  /// Composes an arbitrary matrix onto the current transform
  pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
    self.compose(Matrix2D::new(a, b, c, d, e, f));
  }

  /// Replaces the current transform outright
  pub fn set_transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
    let m = Matrix2D::new(a, b, c, d, e, f);
    if !m.is_finite() {
      return;
    }
    self.states.current_mut().transform = m;
  }

  /// The current transform
  pub fn current_transform(&self) -> Matrix2D {
    self.states.current().transform
  }

  /// Applies the fixed composition rule: `current' = current ∘ incoming`
  fn compose(&mut self, incoming: Matrix2D) {
    if !incoming.is_finite() {
      return;
    }
    let state = self.states.current_mut();
    state.transform = state.transform.then(incoming);
  }

  /// Maps a user-space coordinate pair into device space
  #[inline]
  fn to_device(&self, x: f32, y: f32) -> Point {
    self.states.current().transform.map_point(Point::new(x, y))
  }

  // ==========================================================================
  // Path builder
  // ==========================================================================

  /// Resets the current path to empty
  pub fn begin_path(&mut self) {
    self.path.clear();
  }

  /// Closes the active subpath; consecutive calls are idempotent
  pub fn close_path(&mut self) {
    self.path.close();
  }

  /// Starts a new subpath at the transformed point
  pub fn move_to(&mut self, x: f32, y: f32) {
    let p = self.to_device(x, y);
    self.path.move_to(p);
  }

  /// Appends a straight segment; behaves as `move_to` with no current point
  pub fn line_to(&mut self, x: f32, y: f32) {
    let p = self.to_device(x, y);
    self.path.line_to(p);
  }

  /// Appends a quadratic curve through the transformed control point
  pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
    let control = self.to_device(cpx, cpy);
    let end = self.to_device(x, y);
    self.path.quad_to(control, end);
  }

  /// Appends a cubic curve through the transformed control points
  pub fn bezier_curve_to(
    &mut self,
    cp1x: f32,
    cp1y: f32,
    cp2x: f32,
    cp2y: f32,
    x: f32,
    y: f32,
  ) {
    let control1 = self.to_device(cp1x, cp1y);
    let control2 = self.to_device(cp2x, cp2y);
    let end = self.to_device(x, y);
    self.path.cubic_to(control1, control2, end);
  }

  /// Appends a line tangent into a circular arc joining two control lines
  ///
  /// Degenerate tangent geometry (negative radius, coincident or collinear
  /// control points, an untransformable current point) skips the segment.
  pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
    if !x1.is_finite()
      || !y1.is_finite()
      || !x2.is_finite()
      || !y2.is_finite()
      || !radius.is_finite()
      || radius < 0.0
    {
      return;
    }
    let current = match self.path.current_point() {
      Some(p) => p,
      None => {
        // No subpath yet: the first control point just opens one.
        self.move_to(x1, y1);
        return;
      }
    };
    let inverse = match self.current_transform().invert() {
      Some(m) => m,
      None => return,
    };
    let p0 = inverse.map_point(current);
    let p1 = Point::new(x1, y1);
    let p2 = Point::new(x2, y2);

    let v1 = (p0.x - p1.x, p0.y - p1.y);
    let v2 = (p2.x - p1.x, p2.y - p1.y);
    let l1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let l2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if l1 <= f32::EPSILON || l2 <= f32::EPSILON {
      return;
    }
    let u1 = (v1.0 / l1, v1.1 / l1);
    let u2 = (v2.0 / l2, v2.1 / l2);
    let cross = u1.0 * u2.1 - u1.1 * u2.0;
    if cross.abs() <= 1e-6 {
      // Collinear tangent lines define no arc.
      return;
    }

    let cos_theta = (u1.0 * u2.0 + u1.1 * u2.1).clamp(-1.0, 1.0);
    let half_angle = cos_theta.acos() * 0.5;
    let tangent_dist = radius / half_angle.tan();
    let center_dist = radius / half_angle.sin();

    let t1 = Point::new(p1.x + u1.0 * tangent_dist, p1.y + u1.1 * tangent_dist);
    let t2 = Point::new(p1.x + u2.0 * tangent_dist, p1.y + u2.1 * tangent_dist);
    let bisector_len = ((u1.0 + u2.0).powi(2) + (u1.1 + u2.1).powi(2)).sqrt();
    let center = Point::new(
      p1.x + (u1.0 + u2.0) / bisector_len * center_dist,
      p1.y + (u1.1 + u2.1) / bisector_len * center_dist,
    );

    let start_angle = (t1.y - center.y).atan2(t1.x - center.x);
    let end_angle = (t2.y - center.y).atan2(t2.x - center.x);
    let device_center = self.current_transform().map_point(center);
    self
      .path
      .arc(device_center, radius, start_angle, end_angle, cross > 0.0);
  }

  /// Appends a closed rectangular subpath
  pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    let p0 = self.to_device(x, y);
    let p1 = self.to_device(x + w, y);
    let p2 = self.to_device(x + w, y + h);
    let p3 = self.to_device(x, y + h);
    self.path.rect(p0, p1, p2, p3);
  }

  /// Appends a circular arc segment
  ///
  /// `ccw` selects the sweep direction; spans of a full turn or more draw
  /// the full circle exactly once.
  pub fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32, ccw: bool) {
    let center = self.to_device(x, y);
    self.path.arc(center, radius, start_angle, end_angle, ccw);
  }

  /// Read access to the current path
  pub fn path(&self) -> &Path {
    &self.path
  }

  // ==========================================================================
  // Paint parameters
  // ==========================================================================

  /// Sets the fill color from integer channels and a float alpha
  pub fn set_fill_color(&mut self, r: u8, g: u8, b: u8, a: f32) {
    self.states.current_mut().fill_color = Rgba::new(r, g, b, a);
  }

  /// Sets the stroke color from integer channels and a float alpha
  pub fn set_stroke_color(&mut self, r: u8, g: u8, b: u8, a: f32) {
    self.states.current_mut().stroke_color = Rgba::new(r, g, b, a);
  }

  /// Sets the stroke width in device units
  ///
  /// Non-finite or non-positive widths are ignored.
  pub fn set_line_width(&mut self, width: f32) {
    if width.is_finite() && width > 0.0 {
      self.states.current_mut().line_width = width;
    }
  }

  // ==========================================================================
  // Paint operations
  // ==========================================================================

  /// Fills the current path with the nonzero winding rule
  pub fn fill<S: Surface>(&self, surface: &mut S) {
    let polylines = flatten_path(&self.path, FLATNESS_TOLERANCE);
    self.write_fill(surface, &polylines, self.state().fill_color);
  }

  /// Strokes the current path at the state's line width
  pub fn stroke<S: Surface>(&self, surface: &mut S) {
    let polylines = flatten_path(&self.path, FLATNESS_TOLERANCE);
    let outline = stroke_outline(&polylines, self.state().line_width);
    self.write_fill(surface, &outline, self.state().stroke_color);
  }

  /// Fills a transient rectangle without touching the persistent path
  pub fn fill_rect<S: Surface>(&self, surface: &mut S, x: f32, y: f32, w: f32, h: f32) {
    let rect = self.transient_rect(x, y, w, h);
    let polylines = flatten_path(&rect, FLATNESS_TOLERANCE);
    self.write_fill(surface, &polylines, self.state().fill_color);
  }

  /// Strokes a transient rectangle without touching the persistent path
  pub fn stroke_rect<S: Surface>(&self, surface: &mut S, x: f32, y: f32, w: f32, h: f32) {
    let rect = self.transient_rect(x, y, w, h);
    let polylines = flatten_path(&rect, FLATNESS_TOLERANCE);
    let outline = stroke_outline(&polylines, self.state().line_width);
    self.write_fill(surface, &outline, self.state().stroke_color);
  }

  /// Resets a transient rectangle to transparent black
  pub fn clear_rect<S: Surface>(&self, surface: &mut S, x: f32, y: f32, w: f32, h: f32) {
    let rect = self.transient_rect(x, y, w, h);
    let polylines = flatten_path(&rect, FLATNESS_TOLERANCE);
    let spans = self.clipped_spans(&polylines, surface.width(), surface.height());
    trace!(spans = spans.len(), "clear_rect");
    for span in spans {
      surface.clear_span(span.y as u32, span.x0 as u32, span.x1 as u32);
    }
  }

  /// Intersects the active clip with the filled region of the current path
  ///
  /// The narrowed clip persists until the enclosing `restore()`.
  pub fn clip<S: Surface>(&mut self, surface: &S) {
    let polylines = flatten_path(&self.path, FLATNESS_TOLERANCE);
    let spans = fill_spans(&polylines, surface.width(), surface.height());
    let region = ClipRegion::from_spans(&spans, surface.height());
    let state = self.states.current_mut();
    state.clip = Some(match &state.clip {
      Some(existing) => existing.intersect(&region),
      None => region,
    });
  }

  /// Nonzero-winding containment test against the current path
  ///
  /// Uses the same crossing convention as `fill()`, ignores the clip
  /// region, and never writes to the surface. Coordinates are device
  /// space, unaffected by the current transform.
  pub fn is_point_in_path(&self, x: f32, y: f32) -> bool {
    let polylines = flatten_path(&self.path, FLATNESS_TOLERANCE);
    point_in_polylines(&polylines, x, y)
  }

  /// Reserved focus-ring hook; intentionally a no-op
  pub fn draw_focus_if_needed(&mut self) {}

  // ==========================================================================
  // Internals
  // ==========================================================================

  /// Builds the transient device-space rectangle used by the rect paint ops
  fn transient_rect(&self, x: f32, y: f32, w: f32, h: f32) -> Path {
    let mut rect = Path::new();
    rect.rect(
      self.to_device(x, y),
      self.to_device(x + w, y),
      self.to_device(x + w, y + h),
      self.to_device(x, y + h),
    );
    rect
  }

  /// Rasterizes polylines and intersects the spans with the active clip
  ///
  /// The full span list is materialized before anything is written, so a
  /// paint operation never partially lands.
  fn clipped_spans(
    &self,
    polylines: &[crate::flatten::Polyline],
    width: u32,
    height: u32,
  ) -> Vec<Span> {
    let spans = fill_spans(polylines, width, height);
    match &self.state().clip {
      None => spans,
      Some(region) => {
        let mut out = Vec::with_capacity(spans.len());
        for span in spans {
          region.clip_span(span, &mut out);
        }
        out
      }
    }
  }

  /// Shared fill path for fill/stroke and their rect variants
  fn write_fill<S: Surface>(
    &self,
    surface: &mut S,
    polylines: &[crate::flatten::Polyline],
    color: Rgba,
  ) {
    if color.is_transparent() {
      return;
    }
    let spans = self.clipped_spans(polylines, surface.width(), surface.height());
    trace!(spans = spans.len(), "fill");
    for span in spans {
      surface.fill_span(span.y as u32, span.x0 as u32, span.x1 as u32, color);
    }
  }
}
