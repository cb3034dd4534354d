//! Degenerate-geometry policy: offending segments are skipped silently,
//! leaving the path valid and paintable

use softcanvas::{Canvas, Context, PathSegment};

fn close_count(ctx: &Context) -> usize {
  ctx
    .path()
    .segments()
    .iter()
    .filter(|s| matches!(s, PathSegment::ClosePath))
    .count()
}

#[test]
fn consecutive_close_path_calls_append_one_segment() {
  let mut ctx = Context::new();
  ctx.move_to(0.0, 0.0);
  ctx.line_to(10.0, 0.0);
  ctx.close_path();
  ctx.close_path();
  assert_eq!(close_count(&ctx), 1);

  // An intervening drawing call re-arms close_path.
  ctx.line_to(10.0, 10.0);
  ctx.close_path();
  assert_eq!(close_count(&ctx), 2);
}

#[test]
fn non_finite_coordinates_skip_only_the_offending_segment() {
  let mut ctx = Context::new();
  ctx.move_to(0.0, 0.0);
  ctx.line_to(f32::NAN, 5.0);
  ctx.line_to(10.0, f32::INFINITY);
  ctx.line_to(10.0, 10.0);

  assert_eq!(ctx.path().segments().len(), 2);
  // The surviving geometry is still queryable.
  assert!(!ctx.is_point_in_path(-5.0, -5.0));
}

#[test]
fn negative_arc_radius_paints_nothing() {
  let mut canvas = Canvas::create(32, 32, "t").unwrap();
  canvas.set_fill_color(255, 0, 0, 1.0);
  canvas.begin_path();
  canvas.arc(16.0, 16.0, -8.0, 0.0, 6.0, false);
  canvas.fill();

  let no_red = canvas
    .surface()
    .data()
    .chunks_exact(4)
    .all(|px| px[0] == 0);
  assert!(no_red);
}

#[test]
fn arc_to_skips_degenerate_tangent_geometry() {
  let mut ctx = Context::new();
  ctx.move_to(0.0, 0.0);
  let baseline = ctx.path().segments().len();

  // Collinear: current point and both control points on one line.
  ctx.arc_to(5.0, 0.0, 10.0, 0.0, 2.0);
  // Coincident control points.
  ctx.arc_to(5.0, 5.0, 5.0, 5.0, 2.0);
  // Negative radius.
  ctx.arc_to(5.0, 5.0, 10.0, 0.0, -2.0);

  assert_eq!(ctx.path().segments().len(), baseline);

  // The path is still usable afterwards.
  ctx.line_to(10.0, 10.0);
  assert_eq!(ctx.path().segments().len(), baseline + 1);
}

#[test]
fn full_turn_arc_spans_draw_the_circle_once() {
  let mut one = Canvas::create(64, 64, "t").unwrap();
  one.begin_path();
  one.arc(32.0, 32.0, 16.0, 0.0, std::f32::consts::TAU, false);
  one.fill();

  let mut many = Canvas::create(64, 64, "t").unwrap();
  many.begin_path();
  many.arc(32.0, 32.0, 16.0, 0.0, 5.0 * std::f32::consts::TAU, false);
  many.fill();

  assert_eq!(one.surface().data(), many.surface().data());
}
