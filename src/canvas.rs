//! Owning canvas handle
//!
//! Bundles a surface and its drawing context into one owner with one
//! teardown path: dropping the canvas releases both together. The context
//! never stores a reference to the surface; each paint call lends the
//! surface to the context for its duration, which keeps the pair free of
//! self-references and makes exclusive access a compile-time property.

use tracing::debug;

use crate::context::Context;
use crate::error::Result;
use crate::matrix::Matrix2D;
use crate::state::DrawingState;
use crate::surface::{ImageSurface, Surface};

/// A drawing surface paired with its rendering context
///
/// The full drawing API of [`Context`] is mirrored here with the surface
/// argument filled in, so callers hold a single object per drawing target.
///
/// # Examples
///
/// ```
/// use softcanvas::Canvas;
///
/// let mut canvas = Canvas::create(100, 100, "demo").unwrap();
/// canvas.set_fill_color(255, 0, 0, 1.0);
/// canvas.begin_path();
/// canvas.rect(10.0, 10.0, 30.0, 30.0);
/// canvas.fill();
/// assert!(canvas.is_point_in_path(20.0, 20.0));
/// ```
pub struct Canvas<S: Surface> {
  surface: S,
  ctx: Context,
}

impl Canvas<ImageSurface> {
  /// Creates an in-memory surface and its context as one handle
  ///
  /// The surface is cleared to opaque black and the fill color is then
  /// reset to opaque white, mirroring a freshly presented drawing window.
  ///
  /// # Errors
  ///
  /// Fails only on surface construction (zero dimensions); drawing calls
  /// never raise this error later.
  pub fn create(width: u32, height: u32, title: &str) -> Result<Self> {
    let surface = ImageSurface::new(width, height, title)?;
    debug!(width, height, title, "canvas created");
    Ok(Self::with_surface(surface))
  }
}

impl<S: Surface> Canvas<S> {
  /// Wraps an externally constructed surface
  ///
  /// Runs the same initialization sequence as `create`: paint the whole
  /// surface opaque black, then leave opaque white as the fill color.
  pub fn with_surface(surface: S) -> Self {
    let mut canvas = Self {
      surface,
      ctx: Context::new(),
    };
    let (w, h) = (canvas.surface.width() as f32, canvas.surface.height() as f32);
    canvas.set_fill_color(0, 0, 0, 1.0);
    canvas.fill_rect(0.0, 0.0, w, h);
    canvas.set_fill_color(255, 255, 255, 1.0);
    canvas
  }

  /// Read access to the surface
  pub fn surface(&self) -> &S {
    &self.surface
  }

  /// Consumes the canvas, releasing the context and returning the surface
  pub fn into_surface(self) -> S {
    self.surface
  }

  /// Read access to the context's active drawing state
  pub fn state(&self) -> &DrawingState {
    self.ctx.state()
  }

  /// The context's current transform
  pub fn current_transform(&self) -> Matrix2D {
    self.ctx.current_transform()
  }

  // ==========================================================================
  // State stack
  // ==========================================================================

  /// Pushes a snapshot of the drawing state
  pub fn save(&mut self) {
    self.ctx.save();
  }

  /// Pops the most recent snapshot; a no-op at the base state
  pub fn restore(&mut self) {
    self.ctx.restore();
  }

  // ==========================================================================
  // Transforms
  // ==========================================================================

  /// Composes a scale onto the current transform
  pub fn scale(&mut self, sx: f32, sy: f32) {
    self.ctx.scale(sx, sy);
  }

  /// Composes a rotation (radians) onto the current transform
  pub fn rotate(&mut self, angle: f32) {
    self.ctx.rotate(angle);
  }

  /// Composes a translation onto the current transform
  pub fn translate(&mut self, dx: f32, dy: f32) {
    self.ctx.translate(dx, dy);
  }

  /// Composes an arbitrary matrix onto the current transform
  pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
    self.ctx.transform(a, b, c, d, e, f);
  }

  /// Replaces the current transform outright
  pub fn set_transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
    self.ctx.set_transform(a, b, c, d, e, f);
  }

  // ==========================================================================
  // Path construction
  // ==========================================================================

  /// Resets the current path
  pub fn begin_path(&mut self) {
    self.ctx.begin_path();
  }

  /// Closes the active subpath
  pub fn close_path(&mut self) {
    self.ctx.close_path();
  }

  /// Starts a new subpath
  pub fn move_to(&mut self, x: f32, y: f32) {
    self.ctx.move_to(x, y);
  }

  /// Appends a straight segment
  pub fn line_to(&mut self, x: f32, y: f32) {
    self.ctx.line_to(x, y);
  }

  /// Appends a quadratic curve segment
  pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
    self.ctx.quadratic_curve_to(cpx, cpy, x, y);
  }

  /// Appends a cubic curve segment
  pub fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32) {
    self.ctx.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
  }

  /// Appends a tangent arc between two control lines
  pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
    self.ctx.arc_to(x1, y1, x2, y2, radius);
  }

  /// Appends a closed rectangular subpath
  pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    self.ctx.rect(x, y, w, h);
  }

  /// Appends a circular arc segment
  pub fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32, ccw: bool) {
    self.ctx.arc(x, y, radius, start_angle, end_angle, ccw);
  }

  // ==========================================================================
  // Paint parameters
  // ==========================================================================

  /// Sets the fill color
  pub fn set_fill_color(&mut self, r: u8, g: u8, b: u8, a: f32) {
    self.ctx.set_fill_color(r, g, b, a);
  }

  /// Sets the stroke color
  pub fn set_stroke_color(&mut self, r: u8, g: u8, b: u8, a: f32) {
    self.ctx.set_stroke_color(r, g, b, a);
  }

  /// Sets the stroke width
  pub fn set_line_width(&mut self, width: f32) {
    self.ctx.set_line_width(width);
  }

  // ==========================================================================
  // Paint operations
  // ==========================================================================

  /// Fills the current path
  pub fn fill(&mut self) {
    self.ctx.fill(&mut self.surface);
  }

  /// Strokes the current path
  pub fn stroke(&mut self) {
    self.ctx.stroke(&mut self.surface);
  }

  /// Fills a transient rectangle
  pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    self.ctx.fill_rect(&mut self.surface, x, y, w, h);
  }

  /// Strokes a transient rectangle
  pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    self.ctx.stroke_rect(&mut self.surface, x, y, w, h);
  }

  /// Resets a transient rectangle to transparent black
  pub fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    self.ctx.clear_rect(&mut self.surface, x, y, w, h);
  }

  /// Intersects the active clip with the current path's filled region
  pub fn clip(&mut self) {
    self.ctx.clip(&self.surface);
  }

  /// Nonzero-winding containment test against the current path
  pub fn is_point_in_path(&self, x: f32, y: f32) -> bool {
    self.ctx.is_point_in_path(x, y)
  }

  /// Reserved focus-ring hook; intentionally a no-op
  pub fn draw_focus_if_needed(&mut self) {
    self.ctx.draw_focus_if_needed();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_clears_black_and_leaves_white_fill() {
    let canvas = Canvas::create(16, 16, "init").unwrap();
    assert_eq!(canvas.surface().pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(canvas.surface().pixel(15, 15), Some([0, 0, 0, 255]));
    let fill = canvas.state().fill_color;
    assert_eq!((fill.r, fill.g, fill.b), (255, 255, 255));
    assert_eq!(fill.a, 1.0);
  }

  #[test]
  fn create_rejects_zero_dimensions() {
    assert!(Canvas::create(0, 32, "bad").is_err());
  }

  #[test]
  fn surface_title_is_preserved() {
    let canvas = Canvas::create(8, 8, "window title").unwrap();
    assert_eq!(canvas.surface().title(), "window title");
  }

  #[test]
  fn into_surface_releases_the_pair() {
    let mut canvas = Canvas::create(8, 8, "t").unwrap();
    canvas.set_fill_color(10, 20, 30, 1.0);
    canvas.fill_rect(0.0, 0.0, 8.0, 8.0);
    let surface = canvas.into_surface();
    assert_eq!(surface.pixel(4, 4), Some([10, 20, 30, 255]));
  }
}
