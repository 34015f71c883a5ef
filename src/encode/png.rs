use std::path::{Path, PathBuf};

use image::ImageEncoder as _;
use rayon::prelude::*;

use crate::foundation::error::{SchotterError, SchotterResult};

/// Convert premultiplied RGBA8 into straight (non-premultiplied) RGBA8.
pub fn unpremultiply_rgba8(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    out.par_chunks_exact_mut(4).for_each(|px| {
        let a = u16::from(px[3]);
        if a == 0 {
            px.copy_from_slice(&[0, 0, 0, 0]);
            return;
        }
        if a == 255 {
            return;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    });
    out
}

/// Encode straight RGBA8 pixels as PNG into memory.
pub fn encode_png_rgba8(width: u32, height: u32, rgba8: &[u8]) -> SchotterResult<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    if rgba8.len() != expected {
        return Err(SchotterError::image_write(format!(
            "pixel buffer is {} bytes, expected {expected} for {width}x{height}",
            rgba8.len()
        )));
    }

    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(rgba8, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| SchotterError::image_write(format!("encode png: {e}")))?;
    Ok(buf)
}

/// Create `path`'s parent directory if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> SchotterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            SchotterError::image_write(format!(
                "create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Write `bytes` to `path` through a sibling temp file and a rename.
///
/// Either the complete file appears at `path` or nothing does.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> SchotterResult<()> {
    ensure_parent_dir(path)?;
    let tmp = temp_path_for(path);

    if let Err(e) = std::fs::write(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(SchotterError::image_write(format!(
            "write '{}': {e}",
            tmp.display()
        )));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(SchotterError::image_write(format!(
            "rename '{}' -> '{}': {e}",
            tmp.display(),
            path.display()
        )));
    }

    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
