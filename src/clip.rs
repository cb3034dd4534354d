//! Clip regions
//!
//! A clip region is the rasterized footprint of a filled path, stored as
//! sorted horizontal spans per scanline. Clipping to a new path intersects
//! the regions row by row; painting intersects each outgoing span with the
//! active region before it reaches the surface.
//!
//! Regions are value types: they are cloned into saved drawing states and
//! restored wholesale by `restore()`.

use crate::raster::Span;

/// A rasterized clip region
///
/// Rows outside every stored span reject all painting. An absent region
/// (the default drawing state) means "unclipped".
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRegion {
  /// One sorted, non-overlapping span list per scanline
  rows: Vec<Vec<(i32, i32)>>,
}

impl ClipRegion {
  /// Builds a region from rasterized spans for a surface `height` rows tall
  pub fn from_spans(spans: &[Span], height: u32) -> Self {
    let mut rows = vec![Vec::new(); height as usize];
    for span in spans {
      if span.y >= 0 && (span.y as usize) < rows.len() {
        rows[span.y as usize].push((span.x0, span.x1));
      }
    }
    for row in &mut rows {
      normalize_row(row);
    }
    Self { rows }
  }

  /// Returns the row-wise intersection of two regions
  pub fn intersect(&self, other: &ClipRegion) -> ClipRegion {
    let height = self.rows.len().min(other.rows.len());
    let mut rows = Vec::with_capacity(height);
    for y in 0..height {
      rows.push(intersect_rows(&self.rows[y], &other.rows[y]));
    }
    Self { rows }
  }

  /// Intersects one span with the region, appending surviving pieces
  pub fn clip_span(&self, span: Span, out: &mut Vec<Span>) {
    let row = match self.rows.get(span.y as usize) {
      Some(row) if span.y >= 0 => row,
      _ => return,
    };
    for &(cx0, cx1) in row {
      let x0 = span.x0.max(cx0);
      let x1 = span.x1.min(cx1);
      if x0 < x1 {
        out.push(Span { y: span.y, x0, x1 });
      }
      if cx0 >= span.x1 {
        break;
      }
    }
  }

  /// True when the region rejects all painting
  pub fn is_empty(&self) -> bool {
    self.rows.iter().all(|row| row.is_empty())
  }
}

/// Sorts a span row and merges touching or overlapping runs
fn normalize_row(row: &mut Vec<(i32, i32)>) {
  if row.len() < 2 {
    return;
  }
  row.sort_unstable();
  let mut merged: Vec<(i32, i32)> = Vec::with_capacity(row.len());
  for &(x0, x1) in row.iter() {
    match merged.last_mut() {
      Some(last) if x0 <= last.1 => last.1 = last.1.max(x1),
      _ => merged.push((x0, x1)),
    }
  }
  *row = merged;
}

/// Two-pointer intersection of sorted span rows
fn intersect_rows(a: &[(i32, i32)], b: &[(i32, i32)]) -> Vec<(i32, i32)> {
  let mut out = Vec::new();
  let (mut i, mut j) = (0, 0);
  while i < a.len() && j < b.len() {
    let x0 = a[i].0.max(b[j].0);
    let x1 = a[i].1.min(b[j].1);
    if x0 < x1 {
      out.push((x0, x1));
    }
    if a[i].1 < b[j].1 {
      i += 1;
    } else {
      j += 1;
    }
  }
  out
}
