//! Filling and point-in-path queries share one winding convention

use std::f32::consts::PI;

use softcanvas::Canvas;

#[test]
fn filled_rect_contains_its_interior() {
  let mut canvas = Canvas::create(100, 100, "t").unwrap();
  canvas.begin_path();
  canvas.rect(0.0, 0.0, 10.0, 10.0);
  canvas.fill();

  assert!(canvas.is_point_in_path(5.0, 5.0));
  assert!(!canvas.is_point_in_path(-1.0, -1.0));

  // The fill color after create is opaque white.
  assert_eq!(canvas.surface().pixel(5, 5), Some([255, 255, 255, 255]));
  assert_eq!(canvas.surface().pixel(20, 20), Some([0, 0, 0, 255]));
}

#[test]
fn hit_testing_writes_no_pixels() {
  let canvas = {
    let mut canvas = Canvas::create(32, 32, "t").unwrap();
    canvas.begin_path();
    canvas.rect(4.0, 4.0, 8.0, 8.0);
    canvas
  };
  let before = canvas.surface().data().to_vec();
  assert!(canvas.is_point_in_path(8.0, 8.0));
  assert_eq!(canvas.surface().data(), before.as_slice());
}

#[test]
fn opposite_windings_carve_a_hole() {
  let mut canvas = Canvas::create(40, 40, "t").unwrap();
  canvas.set_fill_color(255, 0, 0, 1.0);
  canvas.begin_path();
  // Outer square, clockwise on a y-down surface.
  canvas.move_to(5.0, 5.0);
  canvas.line_to(35.0, 5.0);
  canvas.line_to(35.0, 35.0);
  canvas.line_to(5.0, 35.0);
  canvas.close_path();
  // Inner square, opposite direction.
  canvas.move_to(15.0, 15.0);
  canvas.line_to(15.0, 25.0);
  canvas.line_to(25.0, 25.0);
  canvas.line_to(25.0, 15.0);
  canvas.close_path();
  canvas.fill();

  assert!(canvas.is_point_in_path(10.0, 20.0));
  assert!(!canvas.is_point_in_path(20.0, 20.0));
  assert_eq!(canvas.surface().pixel(10, 20), Some([255, 0, 0, 255]));
  assert_eq!(canvas.surface().pixel(20, 20), Some([0, 0, 0, 255]));
}

#[test]
fn filled_circle_covers_center_not_corners() {
  let mut canvas = Canvas::create(64, 64, "t").unwrap();
  canvas.set_fill_color(0, 0, 255, 1.0);
  canvas.begin_path();
  canvas.arc(32.0, 32.0, 20.0, 0.0, 2.0 * PI, false);
  canvas.fill();

  assert_eq!(canvas.surface().pixel(32, 32), Some([0, 0, 255, 255]));
  assert_eq!(canvas.surface().pixel(2, 2), Some([0, 0, 0, 255]));
  assert!(canvas.is_point_in_path(32.0, 32.0));
  assert!(!canvas.is_point_in_path(2.0, 2.0));
}

#[test]
fn complementary_arc_sweeps_fill_opposite_halves() {
  let mut cw = Canvas::create(64, 64, "t").unwrap();
  cw.begin_path();
  cw.arc(32.0, 32.0, 20.0, 0.0, PI, false);
  cw.close_path();
  cw.fill();
  // Clockwise half arc sweeps through +y (below the center on screen).
  assert!(cw.is_point_in_path(32.0, 42.0));
  assert!(!cw.is_point_in_path(32.0, 22.0));

  let mut ccw = Canvas::create(64, 64, "t").unwrap();
  ccw.begin_path();
  ccw.arc(32.0, 32.0, 20.0, 0.0, PI, true);
  ccw.close_path();
  ccw.fill();
  assert!(ccw.is_point_in_path(32.0, 22.0));
  assert!(!ccw.is_point_in_path(32.0, 42.0));
}

#[test]
fn quadratic_fill_stays_inside_control_hull() {
  let mut canvas = Canvas::create(64, 64, "t").unwrap();
  canvas.set_fill_color(255, 255, 0, 1.0);
  canvas.begin_path();
  canvas.move_to(10.0, 50.0);
  canvas.quadratic_curve_to(32.0, 0.0, 54.0, 50.0);
  canvas.close_path();
  canvas.fill();

  // Under the apex of the curve.
  assert_eq!(canvas.surface().pixel(32, 40), Some([255, 255, 0, 255]));
  // Above the curve, inside the hull's bounding box but outside the fill.
  assert_eq!(canvas.surface().pixel(12, 20), Some([0, 0, 0, 255]));
}
