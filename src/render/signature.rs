use sha2::Digest as _;

use crate::{
    color::space::Srgb,
    foundation::error::SchotterResult,
    render::{geometry::GridGeometry, surface::DrawSurface},
};

/// Caption colour: mid grey, drawn at half opacity.
pub const CAPTION_GREY: Srgb = Srgb::new(0.5, 0.5, 0.5);
/// Caption opacity.
pub const CAPTION_ALPHA: f64 = 0.5;

/// The caption stamped below a grid, and where it went.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    /// Lowercase hex SHA-256 of the PNG encoding taken before the caption was drawn.
    pub digest: String,
    /// Full caption text: digest followed by the suffix.
    pub text: String,
    /// Left end of the caption.
    pub x: f64,
    /// Caption baseline.
    pub y: f64,
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Hash what `surface` holds so far and draw the caption right-aligned under the grid.
///
/// The digest covers the image without the caption, so it can never describe itself.
#[tracing::instrument(skip_all)]
pub fn stamp_signature<S: DrawSurface + ?Sized>(
    surface: &mut S,
    geometry: &GridGeometry,
    suffix: &str,
) -> SchotterResult<Signature> {
    let png = surface.encode_png()?;
    let digest = sha256_hex(&png);
    let text = format!("{digest}{suffix}");

    let extent = surface.measure_text(&text)?;
    let (x, y) = geometry.caption_origin(surface.width(), extent.width, extent.height);
    tracing::debug!(%digest, x, y, "signature");

    surface.set_color(CAPTION_GREY, CAPTION_ALPHA);
    surface.draw_text(&text, x, y)?;

    Ok(Signature { digest, text, x, y })
}

#[cfg(test)]
#[path = "../../tests/unit/render/signature.rs"]
mod tests;
