//! Transient rect operations, stroking, and clearing

use softcanvas::Canvas;

#[test]
fn fill_rect_leaves_the_persistent_path_alone() {
  let mut canvas = Canvas::create(100, 100, "t").unwrap();
  canvas.begin_path();
  canvas.rect(0.0, 0.0, 10.0, 10.0);

  canvas.set_fill_color(255, 0, 0, 1.0);
  canvas.fill_rect(50.0, 50.0, 10.0, 10.0);

  // The transient rect painted but never joined the path.
  assert_eq!(canvas.surface().pixel(55, 55), Some([255, 0, 0, 255]));
  assert!(canvas.is_point_in_path(5.0, 5.0));
  assert!(!canvas.is_point_in_path(55.0, 55.0));
}

#[test]
fn clear_rect_resets_to_transparent_black() {
  let mut canvas = Canvas::create(32, 32, "t").unwrap();
  canvas.set_fill_color(200, 200, 200, 1.0);
  canvas.fill_rect(0.0, 0.0, 32.0, 32.0);

  canvas.clear_rect(8.0, 8.0, 8.0, 8.0);

  assert_eq!(canvas.surface().pixel(10, 10), Some([0, 0, 0, 0]));
  assert_eq!(canvas.surface().pixel(20, 20), Some([200, 200, 200, 255]));
}

#[test]
fn stroke_rect_paints_the_border_not_the_interior() {
  let mut canvas = Canvas::create(64, 64, "t").unwrap();
  canvas.set_stroke_color(255, 255, 0, 1.0);
  canvas.set_line_width(2.0);
  canvas.stroke_rect(10.0, 10.0, 20.0, 20.0);

  assert_eq!(canvas.surface().pixel(10, 20), Some([255, 255, 0, 255]));
  assert_eq!(canvas.surface().pixel(30, 20), Some([255, 255, 0, 255]));
  assert_eq!(canvas.surface().pixel(20, 20), Some([0, 0, 0, 255]));
}

#[test]
fn stroke_width_is_honored() {
  let mut canvas = Canvas::create(64, 64, "t").unwrap();
  canvas.set_stroke_color(255, 0, 255, 1.0);
  canvas.set_line_width(8.0);
  canvas.begin_path();
  canvas.move_to(10.0, 32.0);
  canvas.line_to(54.0, 32.0);
  canvas.stroke();

  // The band spans 8 pixels centered on the line.
  assert_eq!(canvas.surface().pixel(32, 29), Some([255, 0, 255, 255]));
  assert_eq!(canvas.surface().pixel(32, 35), Some([255, 0, 255, 255]));
  assert_eq!(canvas.surface().pixel(32, 26), Some([0, 0, 0, 255]));
  assert_eq!(canvas.surface().pixel(32, 38), Some([0, 0, 0, 255]));
}

#[test]
fn stroke_uses_the_stroke_color_not_the_fill_color() {
  let mut canvas = Canvas::create(32, 32, "t").unwrap();
  canvas.set_fill_color(255, 0, 0, 1.0);
  canvas.set_stroke_color(0, 255, 0, 1.0);
  canvas.set_line_width(4.0);
  canvas.begin_path();
  canvas.move_to(4.0, 16.0);
  canvas.line_to(28.0, 16.0);
  canvas.stroke();

  assert_eq!(canvas.surface().pixel(16, 16), Some([0, 255, 0, 255]));
}

#[test]
fn translucent_fill_blends_with_the_backdrop() {
  let mut canvas = Canvas::create(16, 16, "t").unwrap();
  canvas.set_fill_color(255, 255, 255, 0.5);
  canvas.fill_rect(0.0, 0.0, 16.0, 16.0);

  let [r, g, b, a] = canvas.surface().pixel(8, 8).unwrap();
  assert!(r > 100 && r < 160, "expected half-blend, got {r}");
  assert_eq!(r, g);
  assert_eq!(g, b);
  assert_eq!(a, 255);
}

#[test]
fn degenerate_rects_paint_nothing() {
  let mut canvas = Canvas::create(32, 32, "t").unwrap();
  canvas.set_fill_color(255, 0, 0, 1.0);
  canvas.fill_rect(4.0, 4.0, 0.0, 10.0);
  canvas.fill_rect(4.0, 4.0, f32::NAN, 10.0);

  let no_red = canvas
    .surface()
    .data()
    .chunks_exact(4)
    .all(|px| px[0] == 0);
  assert!(no_red);
}
