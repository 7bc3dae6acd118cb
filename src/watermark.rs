//! Watermark asset pair and compositor.
//!
//! Two fixed PNG variants exist: a plain mark for dark imagery and a colored
//! mark for bright imagery, chosen per image from its dominant color's
//! luminance score. The pair is loaded once, up front, and shared read-only
//! across every encode — a missing or broken asset fails the load, never a
//! later request.

use crate::color::{dominant_color, luminance_score};
use crate::error::{EngineError, Result};
use image::{DynamicImage, RgbaImage};
use std::path::Path;
use tracing::debug;

/// File name of the plain (default) variant.
pub const PLAIN_ASSET: &str = "watermark.png";

/// File name of the colored variant.
pub const COLORED_ASSET: &str = "watermark_colored.png";

/// Constant compositing alpha applied to the mark, out of 255.
const MARK_ALPHA: u32 = 64;

/// Luminance score above which the colored variant is selected. Calibrated
/// against [`luminance_score`]'s legacy scale, range (0, ~2.94].
const COLORED_THRESHOLD: f32 = 1.90;

/// The immutable watermark asset pair.
///
/// Construct once at service start with [`Watermark::load`] and hand it to
/// the engine; it is never mutated and is safe to share across threads.
pub struct Watermark {
    plain: RgbaImage,
    colored: RgbaImage,
}

impl Watermark {
    /// Load both variants from `dir`.
    ///
    /// Fails closed with [`EngineError::AssetUnavailable`] if either file is
    /// missing or undecodable.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            plain: load_asset(&dir.join(PLAIN_ASSET))?,
            colored: load_asset(&dir.join(COLORED_ASSET))?,
        })
    }

    /// Build a watermark from in-memory rasters — for callers that embed
    /// their assets, and for tests.
    pub fn from_images(plain: RgbaImage, colored: RgbaImage) -> Self {
        Self { plain, colored }
    }

    /// Composite the variant matching `base`'s dominant color onto a copy of
    /// `base`.
    ///
    /// The mark is centered by aligning bounding-box centers (a mark larger
    /// than the base still centers, with the overhang clipped) and blended
    /// in "over" mode with its own alpha scaled by 64/255. `base` is left
    /// untouched.
    pub fn stamp(&self, base: &DynamicImage) -> DynamicImage {
        let color = dominant_color(base);
        let score = luminance_score(color);
        let colored = score > COLORED_THRESHOLD;
        let mark = if colored { &self.colored } else { &self.plain };
        debug!(?color, score, colored, "selected watermark variant");

        let mut out = base.to_rgba8();
        let offset_x = (out.width() as i64 - mark.width() as i64) / 2;
        let offset_y = (out.height() as i64 - mark.height() as i64) / 2;
        blend_over(&mut out, mark, offset_x, offset_y);
        DynamicImage::ImageRgba8(out)
    }
}

fn load_asset(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| EngineError::AssetUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(img.to_rgba8())
}

/// Source-over blend of `mark` onto `base` at a signed offset, with the
/// mark's alpha scaled by [`MARK_ALPHA`] / 255.
fn blend_over(base: &mut RgbaImage, mark: &RgbaImage, offset_x: i64, offset_y: i64) {
    let (base_w, base_h) = (base.width() as i64, base.height() as i64);

    for (mx, my, pixel) in mark.enumerate_pixels() {
        let bx = offset_x + mx as i64;
        let by = offset_y + my as i64;
        if bx < 0 || by < 0 || bx >= base_w || by >= base_h {
            continue;
        }

        let alpha = pixel[3] as u32 * MARK_ALPHA / 255;
        if alpha == 0 {
            continue;
        }

        let dst = base.get_pixel_mut(bx as u32, by as u32);
        for c in 0..3 {
            let blended = (pixel[c] as u32 * alpha + dst[c] as u32 * (255 - alpha)) / 255;
            dst[c] = blended as u8;
        }
        let dst_alpha = dst[3] as u32;
        dst[3] = (alpha + dst_alpha * (255 - alpha) / 255).min(255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    fn test_watermark() -> Watermark {
        // distinguishable variants: plain is green, colored is blue
        Watermark::from_images(
            solid(4, 4, [0, 255, 0, 255]),
            solid(4, 4, [0, 0, 255, 255]),
        )
    }

    #[test]
    fn stamp_preserves_dimensions_and_base() {
        let watermark = test_watermark();
        let base = DynamicImage::ImageRgba8(solid(20, 10, [40, 40, 40, 255]));
        let stamped = watermark.stamp(&base);
        assert_eq!((stamped.width(), stamped.height()), (20, 10));
        // base untouched
        assert_eq!(base.to_rgba8().get_pixel(10, 5), &Rgba([40, 40, 40, 255]));
    }

    #[test]
    fn dark_base_gets_plain_variant() {
        let watermark = test_watermark();
        // red 20 → score ≈ 1.19, under the 1.90 threshold
        let base = DynamicImage::ImageRgba8(solid(16, 16, [20, 20, 20, 255]));
        let stamped = watermark.stamp(&base).to_rgba8();
        let center = stamped.get_pixel(8, 8);
        assert!(
            center[1] > center[2],
            "plain (green) mark expected, got {center:?}"
        );
    }

    #[test]
    fn bright_base_gets_colored_variant() {
        let watermark = test_watermark();
        // red 250 → score ≈ 2.9, over the threshold
        let base = DynamicImage::ImageRgba8(solid(16, 16, [250, 250, 250, 255]));
        let stamped = watermark.stamp(&base).to_rgba8();
        let center = stamped.get_pixel(8, 8);
        assert!(
            center[2] > center[1],
            "colored (blue) mark expected, got {center:?}"
        );
    }

    #[test]
    fn stamp_leaves_corners_unmarked() {
        let watermark = test_watermark();
        let base = DynamicImage::ImageRgba8(solid(32, 32, [40, 40, 40, 255]));
        let stamped = watermark.stamp(&base).to_rgba8();
        // mark is 4x4 centered; corners stay the base color
        assert_eq!(stamped.get_pixel(0, 0), &Rgba([40, 40, 40, 255]));
        assert_eq!(stamped.get_pixel(31, 31), &Rgba([40, 40, 40, 255]));
    }

    #[test]
    fn stamp_blends_at_constant_alpha() {
        let watermark = Watermark::from_images(
            solid(4, 4, [255, 255, 255, 255]),
            solid(4, 4, [255, 255, 255, 255]),
        );
        let base = DynamicImage::ImageRgba8(solid(8, 8, [0, 0, 0, 255]));
        let stamped = watermark.stamp(&base).to_rgba8();
        // white mark at alpha 64/255 over black ≈ 64
        let center = stamped.get_pixel(4, 4);
        assert!((center[0] as i32 - 64).abs() <= 1, "got {center:?}");
    }

    #[test]
    fn mark_larger_than_base_still_centers() {
        let watermark = Watermark::from_images(
            solid(16, 16, [255, 255, 255, 255]),
            solid(16, 16, [255, 255, 255, 255]),
        );
        let base = DynamicImage::ImageRgba8(solid(4, 4, [0, 0, 0, 255]));
        let stamped = watermark.stamp(&base).to_rgba8();
        assert_eq!((stamped.width(), stamped.height()), (4, 4));
        // fully covered by the clipped mark
        assert!(stamped.get_pixel(0, 0)[0] > 0);
    }

    #[test]
    fn load_fails_closed_on_missing_assets() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Watermark::load(dir.path());
        assert!(matches!(
            result,
            Err(EngineError::AssetUnavailable { .. })
        ));
    }

    #[test]
    fn load_reads_both_variants() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in [PLAIN_ASSET, COLORED_ASSET] {
            solid(6, 6, [255, 0, 0, 128])
                .save(dir.path().join(name))
                .unwrap();
        }
        let watermark = Watermark::load(dir.path()).unwrap();
        assert_eq!(watermark.plain.dimensions(), (6, 6));
        assert_eq!(watermark.colored.dimensions(), (6, 6));
    }
}
