//! Fixed 256-color palette and Floyd–Steinberg error-diffusion quantization.
//!
//! Animation frames (and single-frame GIF encodes) are re-quantized against
//! one fixed palette: a 6×6×6 color cube followed by 40 evenly spaced grays.
//! Quantization is per-frame independent — no palette state is shared across
//! frames of an animation.

use image::RgbaImage;
use std::sync::LazyLock;

/// Number of palette entries. GIF's hard ceiling, and exactly what the cube
/// plus gray ramp adds up to.
pub const PALETTE_SIZE: usize = 256;

/// Flat `[r, g, b, r, g, b, ...]` palette bytes, 768 total.
static FIXED_PALETTE: LazyLock<Vec<u8>> = LazyLock::new(|| {
    let mut palette = Vec::with_capacity(PALETTE_SIZE * 3);
    for r in 0..6u16 {
        for g in 0..6u16 {
            for b in 0..6u16 {
                palette.extend_from_slice(&[(r * 51) as u8, (g * 51) as u8, (b * 51) as u8]);
            }
        }
    }
    for i in 0..40u32 {
        let v = (i * 255 / 39) as u8;
        palette.extend_from_slice(&[v, v, v]);
    }
    palette
});

/// The fixed palette as flat RGB bytes, ready for a GIF color table.
pub fn flat_palette() -> &'static [u8] {
    &FIXED_PALETTE
}

/// Quantize an RGBA raster to the fixed palette with Floyd–Steinberg error
/// diffusion, returning one palette index per pixel in row-major order.
///
/// Alpha is ignored; the palette is fully opaque. Error diffuses with the
/// standard kernel (7/16 right, 3/16 down-left, 5/16 down, 1/16 down-right)
/// in a left-to-right scan.
pub fn quantize(image: &RgbaImage) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let w = width as usize;
    let h = height as usize;

    // i16 working channels so diffused error can go negative
    let mut channels: Vec<[i16; 3]> = image
        .pixels()
        .map(|p| [p[0] as i16, p[1] as i16, p[2] as i16])
        .collect();
    let mut indices = vec![0u8; w * h];

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let r = channels[idx][0].clamp(0, 255);
            let g = channels[idx][1].clamp(0, 255);
            let b = channels[idx][2].clamp(0, 255);

            let chosen = nearest_index(r, g, b);
            indices[idx] = chosen as u8;

            let entry = &FIXED_PALETTE[chosen * 3..chosen * 3 + 3];
            let error = [
                r - entry[0] as i16,
                g - entry[1] as i16,
                b - entry[2] as i16,
            ];

            if x + 1 < w {
                diffuse(&mut channels[idx + 1], error, 7);
            }
            if y + 1 < h {
                if x > 0 {
                    diffuse(&mut channels[idx + w - 1], error, 3);
                }
                diffuse(&mut channels[idx + w], error, 5);
                if x + 1 < w {
                    diffuse(&mut channels[idx + w + 1], error, 1);
                }
            }
        }
    }

    indices
}

#[inline]
fn diffuse(pixel: &mut [i16; 3], error: [i16; 3], weight: i16) {
    for c in 0..3 {
        pixel[c] += error[c] * weight / 16;
    }
}

/// Nearest palette entry by squared RGB distance.
#[inline]
fn nearest_index(r: i16, g: i16, b: i16) -> usize {
    let mut best = 0;
    let mut best_dist = i32::MAX;
    for (i, entry) in FIXED_PALETTE.chunks_exact(3).enumerate() {
        let dr = r as i32 - entry[0] as i32;
        let dg = g as i32 - entry[1] as i32;
        let db = b as i32 - entry[2] as i32;
        let dist = dr * dr + dg * dg + db * db;
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
