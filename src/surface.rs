//! Paint target boundary
//!
//! The rasterizer writes covered pixels through the [`Surface`] trait and
//! never owns the pixels itself. A windowing layer can present its own
//! implementation; the crate ships [`ImageSurface`], a plain pixel buffer
//! with PNG encoding, which is also what the tests paint against.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::color::Rgba;
use crate::error::{EncodeError, Result, SurfaceError};

/// External pixel-backed paint target
///
/// Span writes arrive pre-clipped to the surface bounds with `x0 < x1`.
/// `fill_span` composites source-over; `clear_span` resets pixels to
/// transparent black.
pub trait Surface {
  /// Surface width in pixels
  fn width(&self) -> u32;

  /// Surface height in pixels
  fn height(&self) -> u32;

  /// Composites a horizontal pixel run with the given color
  fn fill_span(&mut self, y: u32, x0: u32, x1: u32, color: Rgba);

  /// Resets a horizontal pixel run to transparent black
  fn clear_span(&mut self, y: u32, x0: u32, x1: u32);
}

/// In-memory surface holding straight (non-premultiplied) RGBA8 pixels
pub struct ImageSurface {
  width: u32,
  height: u32,
  title: String,
  pixels: Vec<u8>,
}

impl ImageSurface {
  /// Creates a surface cleared to transparent black
  ///
  /// # Errors
  ///
  /// Returns [`SurfaceError::InvalidDimensions`] when either dimension is
  /// zero or the pixel buffer size would overflow.
  pub fn new(width: u32, height: u32, title: &str) -> Result<Self> {
    let len = (width as usize)
      .checked_mul(height as usize)
      .and_then(|n| n.checked_mul(4))
      .filter(|_| width > 0 && height > 0)
      .ok_or(SurfaceError::InvalidDimensions { width, height })?;
    Ok(Self {
      width,
      height,
      title: title.to_owned(),
      pixels: vec![0; len],
    })
  }

  /// The title given at construction, for the presenting layer
  pub fn title(&self) -> &str {
    &self.title
  }

  /// Raw straight-RGBA8 pixel data, row major
  pub fn data(&self) -> &[u8] {
    &self.pixels
  }

  /// Reads back one pixel as `[r, g, b, a]`
  ///
  /// Returns `None` outside the surface bounds.
  pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
    if x >= self.width || y >= self.height {
      return None;
    }
    let i = ((y * self.width + x) * 4) as usize;
    Some([
      self.pixels[i],
      self.pixels[i + 1],
      self.pixels[i + 2],
      self.pixels[i + 3],
    ])
  }

  /// Encodes the surface as PNG
  pub fn encode_png(&self) -> Result<Vec<u8>> {
    let img = RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(
      || EncodeError::EncodeFailed {
        format: "PNG".to_string(),
        reason: "failed to create RGBA image".to_string(),
      },
    )?;
    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    img
      .write_to(&mut cursor, ImageFormat::Png)
      .map_err(|e| EncodeError::EncodeFailed {
        format: "PNG".to_string(),
        reason: e.to_string(),
      })?;
    Ok(buffer)
  }
}

/// Source-over blend of one channel on straight-alpha data
#[inline]
fn blend_channel(dst: u8, src: u8, src_alpha: u32) -> u8 {
  let inv = 255 - src_alpha;
  ((src as u32 * src_alpha + dst as u32 * inv) / 255) as u8
}

impl Surface for ImageSurface {
  fn width(&self) -> u32 {
    self.width
  }

  fn height(&self) -> u32 {
    self.height
  }

  fn fill_span(&mut self, y: u32, x0: u32, x1: u32, color: Rgba) {
    if y >= self.height || x0 >= x1 {
      return;
    }
    let x1 = x1.min(self.width);
    let sa = color.alpha_u8() as u32;
    if sa == 0 {
      return;
    }
    let row = (y * self.width) as usize;
    for x in x0..x1 {
      let i = (row + x as usize) * 4;
      if sa == 255 {
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
        self.pixels[i + 3] = 255;
      } else {
        let da = self.pixels[i + 3] as u32;
        self.pixels[i] = blend_channel(self.pixels[i], color.r, sa);
        self.pixels[i + 1] = blend_channel(self.pixels[i + 1], color.g, sa);
        self.pixels[i + 2] = blend_channel(self.pixels[i + 2], color.b, sa);
        self.pixels[i + 3] = (sa + da * (255 - sa) / 255) as u8;
      }
    }
  }

  fn clear_span(&mut self, y: u32, x0: u32, x1: u32) {
    if y >= self.height || x0 >= x1 {
      return;
    }
    let x1 = x1.min(self.width);
    let row = (y * self.width) as usize;
    for x in x0..x1 {
      let i = (row + x as usize) * 4;
      self.pixels[i..i + 4].fill(0);
    }
  }
}
