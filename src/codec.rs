//! Byte-level decode and format-keyed encode dispatch.
//!
//! ## Crate mapping
//!
//! | Path | Crate / encoder |
//! |---|---|
//! | Decode (all inputs) | `image::load_from_memory` (auto-detect) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` + watermark stamp |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → GIF | fixed palette + Floyd–Steinberg ([`crate::palette`]) via the `gif` crate |
//! | Encode → TIFF | `image::codecs::tiff::TiffEncoder` |
//! | Encode → BMP | `image::codecs::bmp::BmpEncoder` |
//!
//! JPEG is the only path that composites the watermark; every other format
//! encodes the raster untouched.

use crate::error::{EngineError, Result};
use crate::options::{OutputFormat, Quality};
use crate::palette;
use crate::watermark::Watermark;
use image::DynamicImage;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use std::io::Cursor;

/// Magic-byte sniff for the animation container.
pub fn is_gif(bytes: &[u8]) -> bool {
    bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a")
}

/// Decode source bytes into a raster, auto-detecting the input format.
/// Multi-frame inputs decode to their first frame.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| EngineError::DecodeFailed(e.to_string()))
}

/// Encode a raster into the requested output format.
///
/// Either fully succeeds or returns an error with no partial output.
pub fn encode(
    image: &DynamicImage,
    format: OutputFormat,
    quality: Quality,
    watermark: &Watermark,
) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match format {
        OutputFormat::Jpeg => {
            let stamped = watermark.stamp(image);
            write_jpeg(&stamped, quality.value(), &mut out)?;
        }
        OutputFormat::Png => {
            image.write_with_encoder(PngEncoder::new(&mut out))?;
        }
        OutputFormat::Gif => {
            return encode_gif_frame(image);
        }
        OutputFormat::Tiff => {
            image.write_with_encoder(TiffEncoder::new(&mut out))?;
        }
        OutputFormat::Bmp => {
            image.write_with_encoder(BmpEncoder::new(&mut out))?;
        }
    }
    Ok(out.into_inner())
}

/// JPEG has no alpha: rasters already in an opaque 8-bit RGB layout encode
/// from their existing buffer, everything else pays one conversion.
fn write_jpeg(image: &DynamicImage, quality: u8, out: &mut Cursor<Vec<u8>>) -> Result<()> {
    let encoder = JpegEncoder::new_with_quality(out, quality);
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb.write_with_encoder(encoder)?,
        other => other.to_rgb8().write_with_encoder(encoder)?,
    }
    Ok(())
}

/// Single full-frame GIF encode against the fixed 256-color palette — the
/// same quantization the animation pipeline applies per frame.
fn encode_gif_frame(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let indices = palette::quantize(&rgba);

    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width as u16, height as u16, &[])?;
        let frame = gif::Frame::from_palette_pixels(
            width as u16,
            height as u16,
            &indices[..],
            palette::flat_palette(),
            None,
        );
        encoder.write_frame(&frame)?;
    }
    Ok(out)
}
