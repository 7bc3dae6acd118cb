//! # imagemill
//!
//! A stateless image-transformation engine: raw encoded bytes in, raw
//! encoded bytes out. Given a source image and a requested operation
//! (resize, thumbnail, fit-within-bounds, rotate, flip), the engine decodes,
//! applies the geometric or palette transform, and re-encodes into one of
//! five output formats — stamping JPEG output with a semi-transparent mark
//! whose variant is chosen from the image's own dominant color.
//!
//! # Architecture: One Pass Per Request
//!
//! ```text
//! decode  →  dispatch (operation)  →  scale / orient  →  encode
//!                 │
//!                 └─ animated GIF requests take a per-frame pipeline:
//!                    composite → transform → re-quantize → re-assemble
//! ```
//!
//! Everything above the pixel primitives is orchestration and policy: the
//! engine composes resample kernels, error-diffusion dithering and format
//! serialization from the `image` and `gif` crates, and owns the decisions
//! layered on top — when to skip work entirely (the downscale-only scaling
//! policy), how animated sources stay numerically in step with the
//! single-frame path, and which watermark variant a given image earns.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`transform`] | Operation dispatch and the top-level [`Engine`] |
//! | [`animation`] | Per-frame GIF pipeline: accumulate, transform, re-quantize, re-assemble |
//! | [`codec`] | Byte-level decode (auto-detect) and format-keyed encode |
//! | [`scaling`] | Pure dimension math: scale factor, pass-through policy, dimension resolution |
//! | [`palette`] | Fixed 256-color palette + Floyd–Steinberg quantization |
//! | [`watermark`] | Watermark asset pair: explicit load, variant selection, compositing |
//! | [`color`] | Hex ↔ RGB conversion, luminance scoring, dominant color |
//! | [`options`] | Request parameter types (serde-deserializable) |
//! | [`error`] | The one [`EngineError`] enum every failure maps to |
//!
//! # Design Decisions
//!
//! ## Downscale-Only By Default
//!
//! A request that would enlarge the source passes through unchanged —
//! original bytes, verbatim, no re-encode — unless the caller explicitly
//! allows upscaling. Enlarging costs quality and work and is almost never
//! what a thumbnail endpoint wants; consent makes it deliberate.
//!
//! ## Injected Watermark Assets
//!
//! The watermark pair is loaded once, up front, by [`Watermark::load`] and
//! handed to [`Engine::new`]. There is no ambient global and no per-encode
//! file read, and a missing asset fails the load rather than silently
//! producing unmarked (or corrupt) output. Tests inject in-memory rasters
//! through [`Watermark::from_images`].
//!
//! ## Stateless and Synchronous
//!
//! Every call runs to completion on the calling thread over caller-supplied
//! bytes; the only shared state is the read-only watermark pair. Callers
//! parallelize by running engine calls on as many threads as they like —
//! there is nothing to lock.
//!
//! # Example
//!
//! ```no_run
//! use imagemill::{Engine, Operation, OutputFormat, TransformOptions, Watermark};
//! use std::path::Path;
//!
//! # fn main() -> imagemill::Result<()> {
//! let watermark = Watermark::load(Path::new("assets"))?;
//! let engine = Engine::new(watermark);
//!
//! let source = std::fs::read("photo.jpg").expect("source image");
//! let options = TransformOptions::sized(640, 480, OutputFormat::Jpeg);
//! let bytes = engine.process(&source, Operation::Thumbnail, &options)?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod codec;
pub mod color;
pub mod error;
pub mod options;
pub mod palette;
pub mod scaling;
pub mod transform;
pub mod watermark;

pub use color::Rgb;
pub use error::{EngineError, Result};
pub use options::{FlipAxis, Operation, OutputFormat, Quality, TransformOptions};
pub use transform::{Engine, FrameTransform};
pub use watermark::Watermark;
