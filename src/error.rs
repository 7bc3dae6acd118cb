//! Engine error types.
//!
//! Every failure mode is a variant of [`EngineError`]; nothing is swallowed
//! or retried. All errors are local to a single request, and no partial
//! output is ever produced alongside one.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Source bytes are not a valid encoding of any supported input format.
    #[error("unable to decode source image: {0}")]
    DecodeFailed(String),

    /// Requested output format is not one of the five supported encoders.
    #[error("output format {0:?} is not supported")]
    UnsupportedFormat(String),

    /// Rotate degree outside the fixed allowed set.
    #[error("rotate degree {0} is not supported (allowed: 90, 180, 270)")]
    UnsupportedDegree(u32),

    /// Flip axis outside the fixed allowed set.
    #[error("flip axis {0:?} is not supported (allowed: h, v)")]
    UnsupportedAxis(String),

    /// Malformed 24-bit hexadecimal color string.
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),

    /// Watermark asset file missing or undecodable. Fatal: the engine never
    /// composites a placeholder in its stead.
    #[error("watermark asset {} unavailable: {reason}", .path.display())]
    AssetUnavailable { path: PathBuf, reason: String },

    #[error("encode failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("animation decode failed: {0}")]
    AnimationDecode(#[from] gif::DecodingError),

    #[error("animation encode failed: {0}")]
    AnimationEncode(#[from] gif::EncodingError),
}
