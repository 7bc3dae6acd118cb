//! Single-frame operation dispatch and the top-level [`Engine`].
//!
//! Every request is one transient pass: decode → dispatch → (optional)
//! scale → encode. Resize, Thumbnail and Fit consult the scaling policy and
//! may pass the source through verbatim; Rotate and Flip are lossless
//! orientation changes that skip the policy entirely. GIF-bound requests
//! whose source is itself a GIF container take the animation pipeline
//! instead.

use crate::animation;
use crate::codec;
use crate::error::{EngineError, Result};
use crate::options::{FlipAxis, Operation, OutputFormat, TransformOptions};
use crate::scaling::{resolve_dimensions, scale_factor, should_transform};
use crate::watermark::Watermark;
use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Geometry applied when a request resamples — shared between the
/// single-frame path and the per-frame animation pipeline so both agree
/// numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTransform {
    /// Exact resample to the requested box.
    Exact,
    /// Cover the requested box, cropping the excess.
    Cover,
    /// Fit entirely within the requested box, preserving aspect ratio.
    Within,
}

impl FrameTransform {
    pub fn apply(self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        match self {
            FrameTransform::Exact => image.resize_exact(width, height, FilterType::Lanczos3),
            FrameTransform::Cover => image.resize_to_fill(width, height, FilterType::Lanczos3),
            FrameTransform::Within => image.resize(width, height, FilterType::Lanczos3),
        }
    }
}

/// Stateless transformation engine.
///
/// Holds only the immutable watermark pair injected at construction; every
/// call is a pure function over the supplied bytes and options, so one
/// engine is safe to share across threads.
pub struct Engine {
    watermark: Watermark,
}

impl Engine {
    pub fn new(watermark: Watermark) -> Self {
        Self { watermark }
    }

    /// Transform `source` according to `operation` and `options`.
    ///
    /// Returns the re-encoded bytes, or the source verbatim when the scaling
    /// policy declines. Either fully succeeds or fails with no output.
    pub fn process(
        &self,
        source: &[u8],
        operation: Operation,
        options: &TransformOptions,
    ) -> Result<Vec<u8>> {
        match operation {
            Operation::Resize => self.scaled(source, options, FrameTransform::Exact),
            Operation::Thumbnail => self.scaled(source, options, FrameTransform::Cover),
            Operation::Fit => self.scaled(source, options, FrameTransform::Within),
            Operation::Rotate => self.rotated(source, options),
            Operation::Flip => self.flipped(source, options),
        }
    }

    fn scaled(
        &self,
        source: &[u8],
        options: &TransformOptions,
        transform: FrameTransform,
    ) -> Result<Vec<u8>> {
        if options.format == OutputFormat::Gif && codec::is_gif(source) {
            // Animations cover the box even for Fit; fit-within frames would
            // disagree with the container dimensions.
            let frame_transform = match transform {
                FrameTransform::Within => FrameTransform::Cover,
                other => other,
            };
            return animation::transform_animation(source, options, frame_transform);
        }

        let image = codec::decode(source)?;
        let factor = scale_factor(image.width(), image.height(), options.width, options.height);
        if !should_transform(factor, options.upscale) {
            debug!(factor, "scaling policy declined, returning source verbatim");
            return Ok(source.to_vec());
        }

        let (width, height) =
            resolve_dimensions(image.width(), image.height(), options.width, options.height);
        let scaled = transform.apply(&image, width, height);
        codec::encode(&scaled, options.format, options.quality, &self.watermark)
    }

    fn rotated(&self, source: &[u8], options: &TransformOptions) -> Result<Vec<u8>> {
        let image = codec::decode(source)?;
        let rotated = match options.degree {
            90 => image.rotate90(),
            180 => image.rotate180(),
            270 => image.rotate270(),
            other => return Err(EngineError::UnsupportedDegree(other)),
        };
        codec::encode(&rotated, options.format, options.quality, &self.watermark)
    }

    fn flipped(&self, source: &[u8], options: &TransformOptions) -> Result<Vec<u8>> {
        let image = codec::decode(source)?;
        let flipped = match options.axis {
            Some(FlipAxis::Horizontal) => image.fliph(),
            Some(FlipAxis::Vertical) => image.flipv(),
            None => return Err(EngineError::UnsupportedAxis("none".to_string())),
        };
        codec::encode(&flipped, options.format, options.quality, &self.watermark)
    }
}
