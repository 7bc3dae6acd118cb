//! Animation-aware per-frame pipeline for multi-frame GIF sources.
//!
//! Frames in a GIF may be partial deltas, so each one is first composited
//! over an accumulator canvas before the geometric transform runs — the same
//! scaling the single-frame path would apply, so both paths agree
//! numerically. Transformed frames are re-quantized independently against
//! the fixed palette and re-assembled with their original timing and
//! disposal metadata.

use crate::error::{EngineError, Result};
use crate::options::TransformOptions;
use crate::palette;
use crate::scaling::{resolve_dimensions, scale_factor, should_transform};
use crate::transform::FrameTransform;
use image::{DynamicImage, RgbaImage, imageops};
use std::io::Cursor;
use tracing::debug;

struct OutFrame {
    indices: Vec<u8>,
    delay: u16,
    dispose: gif::DisposalMethod,
}

/// Transform an animated GIF frame by frame and re-assemble the container.
///
/// The scaling policy is evaluated once, against the un-composited first
/// frame's natural size; when it declines, the source bytes are returned
/// verbatim and no further frame is ever decoded.
pub fn transform_animation(
    source: &[u8],
    options: &TransformOptions,
    transform: FrameTransform,
) -> Result<Vec<u8>> {
    let (src_w, src_h) = first_frame_size(source)?;

    let factor = scale_factor(src_w, src_h, options.width, options.height);
    if !should_transform(factor, options.upscale) {
        debug!(factor, "animation pass-through, returning source verbatim");
        return Ok(source.to_vec());
    }

    // Zero dimensions derive from the original first frame's aspect ratio,
    // never from a post-transform frame.
    let (out_w, out_h) = resolve_dimensions(src_w, src_h, options.width, options.height);
    let out_w = out_w.min(u16::MAX as u32);
    let out_h = out_h.min(u16::MAX as u32);

    let mut decoder = frame_decoder(source)?;
    let mut canvas: Option<RgbaImage> = None;
    let mut frames: Vec<OutFrame> = Vec::new();

    while let Some(frame) = decoder.read_next_frame()? {
        let canvas = canvas
            .get_or_insert_with(|| RgbaImage::new(frame.width as u32, frame.height as u32));
        composite_frame(canvas, frame)?;

        let transformed = transform.apply(
            &DynamicImage::ImageRgba8(canvas.clone()),
            out_w,
            out_h,
        );
        frames.push(OutFrame {
            indices: palette::quantize(&transformed.to_rgba8()),
            delay: frame.delay,
            dispose: frame.dispose,
        });
    }

    if frames.is_empty() {
        return Err(EngineError::DecodeFailed("animation has no frames".into()));
    }
    debug!(frames = frames.len(), out_w, out_h, "re-assembling animation");

    encode_animation(&frames, out_w as u16, out_h as u16)
}

/// Decode only the first frame to learn the natural size without paying for
/// the full sequence.
fn first_frame_size(source: &[u8]) -> Result<(u32, u32)> {
    let mut decoder = frame_decoder(source)?;
    match decoder.read_next_frame()? {
        Some(frame) => Ok((frame.width as u32, frame.height as u32)),
        None => Err(EngineError::DecodeFailed("animation has no frames".into())),
    }
}

fn frame_decoder(source: &[u8]) -> Result<gif::Decoder<Cursor<&[u8]>>> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    Ok(options.read_info(Cursor::new(source))?)
}

/// Draw a (possibly partial) frame over the accumulator at its own offset —
/// cumulative disposal, so delta frames see the full prior canvas.
fn composite_frame(canvas: &mut RgbaImage, frame: &gif::Frame<'_>) -> Result<()> {
    let patch = RgbaImage::from_raw(
        frame.width as u32,
        frame.height as u32,
        frame.buffer.to_vec(),
    )
    .ok_or_else(|| EngineError::DecodeFailed("frame buffer size mismatch".into()))?;
    imageops::overlay(canvas, &patch, frame.left as i64, frame.top as i64);
    Ok(())
}

fn encode_animation(frames: &[OutFrame], width: u16, height: u16) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width, height, &[])?;
        encoder.set_repeat(gif::Repeat::Infinite)?;
        for out_frame in frames {
            let mut frame = gif::Frame::from_palette_pixels(
                width,
                height,
                &out_frame.indices[..],
                palette::flat_palette(),
                None,
            );
            frame.delay = out_frame.delay;
            frame.dispose = out_frame.dispose;
            encoder.write_frame(&frame)?;
        }
    }
    Ok(out)
}
