//! Demonstration renderer
//!
//! Draws a small scene through the public canvas API and writes the result
//! as a PNG. Useful as smoke coverage for the whole paint pipeline and as
//! a usage example.

use std::f32::consts::PI;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use softcanvas::Canvas;

#[derive(Parser, Debug)]
#[command(name = "softcanvas-demo", about = "Render a demo scene to a PNG file")]
struct Args {
  /// Output PNG path
  #[arg(short, long, default_value = "demo.png")]
  output: PathBuf,

  /// Surface width in pixels
  #[arg(long, default_value_t = 600)]
  width: u32,

  /// Surface height in pixels
  #[arg(long, default_value_t = 600)]
  height: u32,
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let args = Args::parse();
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("softcanvas-demo: {e}");
      ExitCode::FAILURE
    }
  }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
  let mut canvas = Canvas::create(args.width, args.height, "softcanvas demo")?;
  let (w, h) = (args.width as f32, args.height as f32);

  // Backdrop.
  canvas.set_fill_color(24, 26, 32, 1.0);
  canvas.fill_rect(0.0, 0.0, w, h);

  // A ring of rotated squares around the center.
  canvas.save();
  canvas.translate(w / 2.0, h / 2.0);
  for i in 0..12 {
    canvas.save();
    canvas.rotate(i as f32 * PI / 6.0);
    canvas.translate(w * 0.3, 0.0);
    canvas.set_fill_color(80 + (i * 14) as u8, 120, 220 - (i * 12) as u8, 0.9);
    canvas.begin_path();
    canvas.rect(-20.0, -20.0, 40.0, 40.0);
    canvas.fill();
    canvas.restore();
  }
  canvas.restore();

  // A clipped sweep of translucent circles.
  canvas.save();
  canvas.begin_path();
  canvas.rect(w * 0.2, h * 0.2, w * 0.6, h * 0.6);
  canvas.clip();
  for i in 0..6 {
    let t = i as f32 / 5.0;
    canvas.set_fill_color(240, (80.0 + 140.0 * t) as u8, 60, 0.5);
    canvas.begin_path();
    canvas.arc(
      w * (0.25 + 0.5 * t),
      h / 2.0,
      w * 0.12,
      0.0,
      2.0 * PI,
      false,
    );
    canvas.fill();
  }
  canvas.restore();

  // A stroked curve across the scene.
  canvas.set_stroke_color(250, 250, 250, 1.0);
  canvas.set_line_width(3.0);
  canvas.begin_path();
  canvas.move_to(w * 0.1, h * 0.85);
  canvas.bezier_curve_to(w * 0.35, h * 0.55, w * 0.65, h * 1.05, w * 0.9, h * 0.75);
  canvas.stroke();

  let png = canvas.surface().encode_png()?;
  std::fs::write(&args.output, png)?;
  println!("wrote {}", args.output.display());
  Ok(())
}
