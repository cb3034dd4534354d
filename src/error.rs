//! Error types for the canvas core
//!
//! Surface construction is the only fatal failure point: it is raised once
//! when a context is created and never during drawing calls. Degenerate
//! geometry (negative radii, coincident control points, non-finite
//! coordinates) is not an error; the offending segment is skipped and the
//! path stays valid.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for canvas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the canvas core
#[derive(Error, Debug)]
pub enum Error {
  /// Surface construction or access error
  #[error("Surface error: {0}")]
  Surface(#[from] SurfaceError),

  /// Image encoding error
  #[error("Encode error: {0}")]
  Encode(#[from] EncodeError),
}

/// Errors raised while constructing a surface
#[derive(Error, Debug)]
pub enum SurfaceError {
  /// Width or height is zero, or the pixel buffer would overflow
  #[error("invalid surface dimensions {width}x{height}")]
  InvalidDimensions { width: u32, height: u32 },
}

/// Errors raised while encoding surface pixels to an image format
#[derive(Error, Debug)]
pub enum EncodeError {
  /// The encoder rejected the pixel buffer
  #[error("failed to encode {format}: {reason}")]
  EncodeFailed { format: String, reason: String },
}
