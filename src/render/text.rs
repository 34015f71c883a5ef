use std::{path::Path, sync::Arc};

use crate::foundation::error::{SchotterError, SchotterResult};

/// A font loaded from disk, registered with a [`TextLayoutEngine`] and sized for drawing.
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    family: String,
    size_px: f32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("family", &self.family)
            .field("size_px", &self.size_px)
            .finish()
    }
}

impl FontFace {
    /// Primary family name reported by the font data.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Size the face was loaded at.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }
}

/// Width and height of a shaped single-line string, plus the first line's baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    /// Advance width in pixels.
    pub width: f64,
    /// Line height in pixels.
    pub height: f64,
    /// Distance from the layout top to the first baseline.
    pub baseline: f64,
}

/// Stateful helper for shaping text with Parley from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Fresh Parley contexts with no fonts registered.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Read a font file and register it. Any failure is a [`SchotterError::FontLoad`].
    pub fn load_font_file(&mut self, path: &Path, size_px: f32) -> SchotterResult<FontFace> {
        let bytes = std::fs::read(path).map_err(|e| {
            SchotterError::font_load(format!("read font '{}': {e}", path.display()))
        })?;
        self.load_font_bytes(bytes, size_px)
            .map_err(|e| SchotterError::font_load(format!("'{}': {e}", path.display())))
    }

    /// Register font bytes and pick the first family they provide.
    pub fn load_font_bytes(&mut self, bytes: Vec<u8>, size_px: f32) -> SchotterResult<FontFace> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SchotterError::font_load("font size must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SchotterError::font_load("no font families found in font data"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SchotterError::font_load("registered font family has no name"))?
            .to_string();

        Ok(FontFace {
            bytes: Arc::new(bytes),
            family,
            size_px,
        })
    }

    /// Shape `text` as a single unwrapped line.
    pub fn layout_line(&mut self, text: &str, face: &FontFace) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(face.size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Measure `text` without drawing it.
    pub fn measure(&mut self, text: &str, face: &FontFace) -> TextExtent {
        extent_of(&self.layout_line(text, face))
    }
}

pub(crate) fn extent_of(layout: &parley::Layout<()>) -> TextExtent {
    let baseline = layout
        .lines()
        .next()
        .map(|line| f64::from(line.metrics().baseline))
        .unwrap_or(0.0);
    TextExtent {
        width: f64::from(layout.width()),
        height: f64::from(layout.height()),
        baseline,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
