//! Parameter types for transform requests.
//!
//! These types describe *what* to do, not *how* to do it — the interface
//! between the calling service (which parses requests) and the engine (which
//! does the pixel work). Everything deserializes with serde so a front end
//! can map a request straight onto [`TransformOptions`].

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The operation the caller selects; each maps to one dispatcher contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Exact resample to the requested box.
    Resize,
    /// Cover the requested box and crop the excess.
    Thumbnail,
    /// Fit entirely within the requested box, preserving aspect ratio.
    Fit,
    /// Lossless orientation change by 90, 180 or 270 degrees.
    Rotate,
    /// Lossless mirror along one axis.
    Flip,
}

/// Supported output encodings. The enum is closed: adding a format means
/// adding a variant, and the encode dispatch match stops compiling until the
/// new arm exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Bmp,
}

impl OutputFormat {
    /// MIME type of the encoded output.
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Gif => "image/gif",
            OutputFormat::Tiff => "image/tiff",
            OutputFormat::Bmp => "image/bmp",
        }
    }
}

/// Parse a format name. Anything outside the supported set — including
/// formats the `image` crate could decode, like `"webp"` — fails with
/// [`EngineError::UnsupportedFormat`].
impl FromStr for OutputFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "gif" => Ok(OutputFormat::Gif),
            "tif" | "tiff" => Ok(OutputFormat::Tiff),
            "bmp" => Ok(OutputFormat::Bmp),
            other => Err(EngineError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Mirror axis for [`Operation::Flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipAxis {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

impl FromStr for FlipAxis {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(FlipAxis::Horizontal),
            "v" => Ok(FlipAxis::Vertical),
            other => Err(EngineError::UnsupportedAxis(other.to_string())),
        }
    }
}

/// Quality setting for lossy encoding (1–100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

impl From<u8> for Quality {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// Caller-supplied transform parameters, treated as read-only input.
///
/// A zero `width` or `height` means "derive from the aspect ratio of the
/// other"; resolution happens in [`crate::scaling::resolve_dimensions`] and
/// never writes back into this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformOptions {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// Consent to enlarge; without it an upscaling request passes through.
    #[serde(default)]
    pub upscale: bool,
    pub format: OutputFormat,
    #[serde(default)]
    pub quality: Quality,
    /// Rotation degree for [`Operation::Rotate`]; must be 90, 180 or 270.
    #[serde(default)]
    pub degree: u32,
    /// Mirror axis for [`Operation::Flip`].
    #[serde(default)]
    pub axis: Option<FlipAxis>,
}

impl TransformOptions {
    /// Options targeting `width`×`height` in `format`, everything else
    /// defaulted.
    pub fn sized(width: u32, height: u32, format: OutputFormat) -> Self {
        Self {
            width,
            height,
            upscale: false,
            format,
            quality: Quality::default(),
            degree: 0,
            axis: None,
        }
    }
}
