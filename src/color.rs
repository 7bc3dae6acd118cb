//! Color analysis: hex ↔ RGB conversion, luminance scoring, and dominant
//! color extraction.
//!
//! Everything here is pure and deterministic — the same raster always yields
//! the same dominant color, which is what makes the watermark variant choice
//! reproducible across runs.

use crate::error::EngineError;
use image::DynamicImage;
use std::str::FromStr;

/// An 8-bit-per-channel RGB triple with no alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    /// Render as a 6-digit lowercase hex string (no `#` prefix).
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Parse a 24-bit hexadecimal color: bits 16–23 red, 8–15 green, 0–7 blue.
///
/// Strings that are not valid base-16 or encode more than 24 significant
/// bits fail with [`EngineError::InvalidHex`] — every channel stays a true
/// 8-bit value, with no silent truncation of high-order bits.
///
/// ```
/// # use imagemill::color::Rgb;
/// let rgb: Rgb = "1a2b3c".parse().unwrap();
/// assert_eq!((rgb.red, rgb.green, rgb.blue), (0x1a, 0x2b, 0x3c));
/// ```
impl FromStr for Rgb {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 6 {
            return Err(EngineError::InvalidHex(s.to_string()));
        }
        let value =
            u32::from_str_radix(s, 16).map_err(|_| EngineError::InvalidHex(s.to_string()))?;
        Ok(Rgb {
            red: (value >> 16) as u8,
            green: ((value >> 8) & 0xff) as u8,
            blue: (value & 0xff) as u8,
        })
    }
}

/// Brightness score driving watermark variant selection.
///
/// Scores the red channel on the legacy scale: normalized values at or below
/// 0.03928 map to `v / 12.92`, everything above to `((v + 0.55) / 1.055) * 2`,
/// giving a range of (0, ~2.94]. The variant threshold in
/// [`crate::watermark`] is calibrated against this scale — not against the
/// BT.709 weighted sum, which tops out at 1.0.
pub fn luminance_score(color: Rgb) -> f32 {
    let v = color.red as f32 / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.55) / 1.055) * 2.0
    }
}

/// Extract the most visually representative color of a raster.
///
/// Buckets a subsampled pixel grid into a 16×16×16 histogram and averages
/// the members of the densest bucket. Fully transparent pixels are skipped;
/// a raster with no opaque pixels yields black.
pub fn dominant_color(image: &DynamicImage) -> Rgb {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    // Cap the sample grid at roughly 256 pixels per axis
    let step = (width.max(height) / 256).max(1) as usize;

    let mut counts = vec![0u32; 4096];
    let mut sums = vec![[0u64; 3]; 4096];

    for y in (0..height).step_by(step) {
        for x in (0..width).step_by(step) {
            let pixel = rgba.get_pixel(x, y);
            if pixel[3] == 0 {
                continue;
            }
            let bucket = ((pixel[0] as usize >> 4) << 8)
                | ((pixel[1] as usize >> 4) << 4)
                | (pixel[2] as usize >> 4);
            counts[bucket] += 1;
            sums[bucket][0] += pixel[0] as u64;
            sums[bucket][1] += pixel[1] as u64;
            sums[bucket][2] += pixel[2] as u64;
        }
    }

    let (densest, &count) = match counts
        .iter()
        .enumerate()
        .max_by_key(|&(_, &count)| count)
        .filter(|&(_, &count)| count > 0)
    {
        Some(found) => found,
        None => {
            return Rgb {
                red: 0,
                green: 0,
                blue: 0,
            };
        }
    };

    let sum = sums[densest];
    Rgb {
        red: (sum[0] / count as u64) as u8,
        green: (sum[1] / count as u64) as u8,
        blue: (sum[2] / count as u64) as u8,
    }
}
