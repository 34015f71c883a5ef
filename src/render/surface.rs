use std::{
    ops::{Deref, DerefMut},
    path::Path,
};

use kurbo::{Affine, BezPath, Point, Rect, Shape as _};

use crate::{
    color::space::Srgb,
    encode::png::{encode_png_rgba8, unpremultiply_rgba8},
    foundation::error::{SchotterError, SchotterResult},
    render::text::{FontFace, TextExtent, TextLayoutEngine, extent_of},
};

/// A stateful 2D drawing surface in the style of an immediate-mode canvas.
///
/// Shapes are added to a current path with [`DrawSurface::draw_rectangle`] and consumed by
/// [`DrawSurface::stroke`] or [`DrawSurface::fill`], using the colour, line width and transform
/// in effect at that moment.
pub trait DrawSurface {
    /// Surface width in pixels.
    fn width(&self) -> u32;
    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Current user-to-device transform.
    fn transform(&self) -> Affine;
    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Colour for subsequent strokes, fills and text. `alpha` is in [0, 1].
    fn set_color(&mut self, color: Srgb, alpha: f64);
    /// Line width for subsequent strokes.
    fn set_line_width(&mut self, width: f64);

    /// Append an axis-aligned rectangle (in user space) to the current path.
    fn draw_rectangle(&mut self, rect: Rect);
    /// Outline the current path, then clear it.
    fn stroke(&mut self);
    /// Fill the current path, then clear it.
    fn fill(&mut self);

    /// Load the font used by [`DrawSurface::measure_text`] and [`DrawSurface::draw_text`].
    ///
    /// Fails with [`SchotterError::FontLoad`]; there is no fallback face.
    fn load_font_face(&mut self, path: &Path, size_px: f32) -> SchotterResult<()>;
    /// Extent of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> SchotterResult<TextExtent>;
    /// Draw `text` with its left end at `x` and its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64) -> SchotterResult<()>;

    /// PNG encoding of everything drawn so far.
    fn encode_png(&mut self) -> SchotterResult<Vec<u8>>;

    /// Rotate the current transform by `degrees` around `(cx, cy)`.
    fn rotate_about(&mut self, degrees: f64, cx: f64, cy: f64) {
        let rot = Affine::rotate_about(degrees.to_radians(), Point::new(cx, cy));
        let t = self.transform() * rot;
        self.set_transform(t);
    }

    /// Cover the whole surface with one opaque colour, ignoring the current transform.
    fn fill_background(&mut self, color: Srgb) {
        let mut s = self.checkpoint();
        s.set_transform(Affine::IDENTITY);
        s.set_color(color, 1.0);
        let (w, h) = (f64::from(s.width()), f64::from(s.height()));
        s.draw_rectangle(Rect::new(0.0, 0.0, w, h));
        s.fill();
    }

    /// Save the current transform; it is restored when the guard drops.
    fn checkpoint(&mut self) -> TransformGuard<'_, Self> {
        TransformGuard::new(self)
    }
}

/// Scoped transform checkpoint returned by [`DrawSurface::checkpoint`].
///
/// Dereferences to the surface. Dropping it restores the transform captured at creation, on
/// every exit path.
pub struct TransformGuard<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
    saved: Affine,
}

impl<'a, S: DrawSurface + ?Sized> TransformGuard<'a, S> {
    fn new(surface: &'a mut S) -> Self {
        let saved = surface.transform();
        Self { surface, saved }
    }

    /// The transform that will be restored.
    pub fn saved(&self) -> Affine {
        self.saved
    }
}

impl<S: DrawSurface + ?Sized> Deref for TransformGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for TransformGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for TransformGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_transform(self.saved);
    }
}

/// [`DrawSurface`] backed by the `vello_cpu` rasterizer.
pub struct CpuCanvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    transform: Affine,
    color: Srgb,
    alpha: f64,
    line_width: f64,
    path: BezPath,
    text: TextLayoutEngine,
    font: Option<(FontFace, vello_cpu::peniko::FontData)>,
}

impl CpuCanvas {
    /// A transparent `width x height` canvas. Both sides must fit in `u16`.
    pub fn new(width: u32, height: u32) -> SchotterResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SchotterError::validation("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SchotterError::validation("canvas height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(SchotterError::validation("canvas width/height must be > 0"));
        }

        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            width: width_u16,
            height: height_u16,
            transform: Affine::IDENTITY,
            color: Srgb::BLACK,
            alpha: 1.0,
            line_width: 1.0,
            path: BezPath::new(),
            text: TextLayoutEngine::new(),
            font: None,
        })
    }

    /// Load the text font from in-memory bytes instead of a file.
    pub fn load_font_bytes(&mut self, bytes: Vec<u8>, size_px: f32) -> SchotterResult<()> {
        let face = self.text.load_font_bytes(bytes, size_px)?;
        self.install_font(face);
        Ok(())
    }

    /// The currently loaded font, if any.
    pub fn font_face(&self) -> Option<&FontFace> {
        self.font.as_ref().map(|(face, _)| face)
    }

    /// Rasterize everything drawn so far into straight (non-premultiplied) RGBA8.
    pub fn snapshot_rgba8(&mut self) -> Vec<u8> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        unpremultiply_rgba8(pixmap.data_as_u8_slice())
    }

    fn install_font(&mut self, face: FontFace) {
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes().as_ref().clone()),
            0,
        );
        self.font = Some((face, data));
    }

    fn paint(&self) -> vello_cpu::peniko::Color {
        let [r, g, b] = self.color.to_rgb8();
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
    }

    fn font(&self) -> SchotterResult<&(FontFace, vello_cpu::peniko::FontData)> {
        self.font
            .as_ref()
            .ok_or_else(|| SchotterError::font_load("no font face loaded"))
    }
}

impl DrawSurface for CpuCanvas {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn set_color(&mut self, color: Srgb, alpha: f64) {
        self.color = color;
        self.alpha = alpha;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn draw_rectangle(&mut self, rect: Rect) {
        self.path.extend(rect.path_elements(0.1));
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        if path.elements().is_empty() || self.line_width <= 0.0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(self.paint());
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(self.line_width));
        self.ctx.stroke_path(&bezpath_to_cpu(&path));
    }

    fn fill(&mut self) {
        let path = std::mem::take(&mut self.path);
        if path.elements().is_empty() {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(self.paint());
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }

    fn load_font_face(&mut self, path: &Path, size_px: f32) -> SchotterResult<()> {
        let face = self.text.load_font_file(path, size_px)?;
        self.install_font(face);
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> SchotterResult<TextExtent> {
        let face = self.font()?.0.clone();
        Ok(self.text.measure(text, &face))
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) -> SchotterResult<()> {
        let (face, font) = self.font()?.clone();
        let layout = self.text.layout_line(text, &face);
        let extent = extent_of(&layout);

        let origin = Affine::translate((x, y - extent.baseline));
        self.ctx.set_transform(affine_to_cpu(self.transform * origin));
        self.ctx.set_paint(self.paint());

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn encode_png(&mut self) -> SchotterResult<Vec<u8>> {
        let rgba = self.snapshot_rgba8();
        encode_png_rgba8(self.width(), self.height(), &rgba)
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
