//! Schotter renders generative "gravel" images: a grid of squares whose rotation and
//! horizontal jitter grow row by row, coloured from a perceptual HCL gradient.
//!
//! The public API is render-oriented:
//!
//! - Build or load a [`RenderConfig`] (optionally starting from a [`Preset`])
//! - Pick a gradient from a [`ThemeRegistry`]
//! - Call [`render_image`] for PNG bytes, or [`render_to_dir`] to write them
//!
//! Output is deterministic for a fixed seed; see [`GridRenderer`] for the random draw order.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod color;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod render;

pub use crate::color::gradient::{ColorKeypoint, GradientTable};
pub use crate::color::space::{Hcl, Lab, Srgb};
pub use crate::color::themes::ThemeRegistry;
pub use crate::config::{Background, Preset, RenderConfig};
pub use crate::encode::png::{encode_png_rgba8, unpremultiply_rgba8, write_atomic};
pub use crate::foundation::error::{SchotterError, SchotterResult};
pub use crate::render::geometry::{GridGeometry, linear_row_fraction, row_fraction};
pub use crate::render::grid::{CellPlan, GridRenderer, draw_cell};
pub use crate::render::pipeline::{
    RenderedImage, clock_seed, render_image, render_to_dir, render_to_file, resolve_seed,
    save_png,
};
pub use crate::render::signature::{
    CAPTION_ALPHA, CAPTION_GREY, Signature, sha256_hex, stamp_signature,
};
pub use crate::render::surface::{CpuCanvas, DrawSurface, TransformGuard};
pub use crate::render::text::{FontFace, TextExtent, TextLayoutEngine};
