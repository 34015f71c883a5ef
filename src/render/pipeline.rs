use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    color::themes::ThemeRegistry,
    config::RenderConfig,
    encode::png::write_atomic,
    foundation::error::SchotterResult,
    render::{
        grid::GridRenderer,
        signature::{Signature, stamp_signature},
        surface::{CpuCanvas, DrawSurface},
    },
};

/// A finished render, encoded and ready to write.
#[derive(Clone, Debug)]
pub struct RenderedImage {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Seed the grid was drawn with.
    pub seed: u64,
    /// Final PNG bytes, caption included.
    pub png: Vec<u8>,
    /// The caption, when one was stamped.
    pub signature: Option<Signature>,
}

/// Render one image entirely in memory.
///
/// Steps:
/// 1. [`RenderConfig::validate`] and theme lookup
/// 2. font load, when signing, so a bad font fails before any drawing
/// 3. background and grid via [`GridRenderer`]
/// 4. optional caption via [`stamp_signature`]
/// 5. PNG encoding
#[tracing::instrument(skip(cfg, themes), fields(theme = %cfg.theme))]
pub fn render_image(
    cfg: &RenderConfig,
    themes: &ThemeRegistry,
    seed: u64,
) -> SchotterResult<RenderedImage> {
    cfg.validate()?;
    let table = themes.get(&cfg.theme)?;

    let mut canvas = CpuCanvas::new(cfg.canvas_width, cfg.canvas_height)?;
    if cfg.include_signature {
        canvas.load_font_face(&cfg.font_path, cfg.font_size)?;
    }

    let mut grid = GridRenderer::new(cfg, table, seed)?;
    grid.render(&mut canvas)?;

    let signature = if cfg.include_signature {
        Some(stamp_signature(
            &mut canvas,
            grid.geometry(),
            &cfg.signature_suffix,
        )?)
    } else {
        None
    };

    let png = canvas.encode_png()?;
    Ok(RenderedImage {
        width: cfg.canvas_width,
        height: cfg.canvas_height,
        seed,
        png,
        signature,
    })
}

/// Render and write to `out_dir/`[`RenderConfig::output_file_name`]. Returns the written path.
///
/// Nothing is written unless the whole render succeeds.
pub fn render_to_dir(
    cfg: &RenderConfig,
    themes: &ThemeRegistry,
    seed: u64,
    out_dir: &Path,
) -> SchotterResult<(PathBuf, RenderedImage)> {
    let path = out_dir.join(cfg.output_file_name());
    let image = render_to_file(cfg, themes, seed, &path)?;
    Ok((path, image))
}

/// Render and write the PNG to `path` atomically.
pub fn render_to_file(
    cfg: &RenderConfig,
    themes: &ThemeRegistry,
    seed: u64,
    path: &Path,
) -> SchotterResult<RenderedImage> {
    let image = render_image(cfg, themes, seed)?;
    save_png(path, &image)?;
    Ok(image)
}

/// Write an already rendered image.
pub fn save_png(path: &Path, image: &RenderedImage) -> SchotterResult<()> {
    write_atomic(path, &image.png)
}

/// Seed from the configuration, else from the wall clock.
pub fn resolve_seed(cfg: &RenderConfig) -> u64 {
    cfg.seed.unwrap_or_else(clock_seed)
}

/// Nanoseconds since the Unix epoch, truncated to 64 bits.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
