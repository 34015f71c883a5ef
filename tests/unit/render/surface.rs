use super::*;

fn pixel(rgba: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
}

#[test]
fn new_rejects_oversized_and_empty_canvases() {
    assert!(CpuCanvas::new(70_000, 10).is_err());
    assert!(CpuCanvas::new(10, 70_000).is_err());
    assert!(CpuCanvas::new(0, 10).is_err());
}

#[test]
fn background_covers_every_pixel() {
    let mut c = CpuCanvas::new(8, 6).unwrap();
    c.rotate_about(30.0, 4.0, 3.0);
    c.fill_background(Srgb::WHITE);
    let rgba = c.snapshot_rgba8();
    assert_eq!(rgba.len(), 8 * 6 * 4);
    assert!(rgba.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn background_keeps_the_callers_transform() {
    let mut c = CpuCanvas::new(8, 8).unwrap();
    c.rotate_about(45.0, 4.0, 4.0);
    let before = c.transform();
    c.fill_background(Srgb::BLACK);
    assert_eq!(c.transform(), before);
}

#[test]
fn checkpoint_restores_on_drop() {
    let mut c = CpuCanvas::new(8, 8).unwrap();
    {
        let mut g = c.checkpoint();
        g.rotate_about(10.0, 1.0, 1.0);
        assert_ne!(g.transform(), Affine::IDENTITY);
        assert_eq!(g.saved(), Affine::IDENTITY);
    }
    assert_eq!(c.transform(), Affine::IDENTITY);
}

#[test]
fn checkpoint_restores_on_error_paths() {
    fn failing(surface: &mut CpuCanvas) -> SchotterResult<()> {
        let mut g = surface.checkpoint();
        g.rotate_about(33.0, 2.0, 2.0);
        g.measure_text("no font loaded")?;
        Ok(())
    }

    let mut c = CpuCanvas::new(8, 8).unwrap();
    let err = failing(&mut c).unwrap_err();
    assert!(matches!(err, SchotterError::FontLoad(_)));
    assert_eq!(c.transform(), Affine::IDENTITY);
}

#[test]
fn nested_checkpoints_unwind_in_order() {
    let mut c = CpuCanvas::new(8, 8).unwrap();
    let mut outer = c.checkpoint();
    outer.rotate_about(10.0, 0.0, 0.0);
    let after_outer = outer.transform();
    {
        let mut inner = outer.checkpoint();
        inner.rotate_about(20.0, 0.0, 0.0);
    }
    assert_eq!(outer.transform(), after_outer);
    drop(outer);
    assert_eq!(c.transform(), Affine::IDENTITY);
}

#[test]
fn transparent_fill_is_invisible_but_stroke_is_opaque() {
    let mut c = CpuCanvas::new(32, 32).unwrap();
    c.fill_background(Srgb::BLACK);

    let rect = Rect::new(8.0, 8.0, 24.0, 24.0);
    c.set_color(Srgb::WHITE, 1.0);
    c.set_line_width(2.0);
    c.draw_rectangle(rect);
    c.stroke();
    c.set_color(Srgb::WHITE, 0.0);
    c.draw_rectangle(rect);
    c.fill();

    let rgba = c.snapshot_rgba8();
    assert_eq!(pixel(&rgba, 32, 8, 16), [255, 255, 255, 255]);
    assert_eq!(pixel(&rgba, 32, 16, 16), [0, 0, 0, 255]);
    assert_eq!(pixel(&rgba, 32, 2, 2), [0, 0, 0, 255]);
}

#[test]
fn partial_fill_alpha_blends_over_background() {
    let mut c = CpuCanvas::new(16, 16).unwrap();
    c.fill_background(Srgb::BLACK);
    c.set_color(Srgb::WHITE, 0.5);
    c.draw_rectangle(Rect::new(0.0, 0.0, 16.0, 16.0));
    c.fill();

    let [r, g, b, a] = pixel(&c.snapshot_rgba8(), 16, 8, 8);
    assert_eq!(a, 255);
    assert!((120..=136).contains(&r), "r={r}");
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn stroke_and_fill_consume_the_current_path() {
    let mut c = CpuCanvas::new(16, 16).unwrap();
    c.fill_background(Srgb::BLACK);
    c.set_color(Srgb::WHITE, 1.0);
    c.draw_rectangle(Rect::new(0.0, 0.0, 4.0, 4.0));
    c.fill();
    // Nothing pending: this fill must not repaint the first rectangle elsewhere.
    c.set_color(Srgb::new(1.0, 0.0, 0.0), 1.0);
    c.fill();

    let rgba = c.snapshot_rgba8();
    assert_eq!(pixel(&rgba, 16, 1, 1), [255, 255, 255, 255]);
}

#[test]
fn text_without_a_font_is_a_font_load_error() {
    let mut c = CpuCanvas::new(8, 8).unwrap();
    assert!(c.font_face().is_none());
    assert!(matches!(
        c.draw_text("x", 0.0, 0.0).unwrap_err(),
        SchotterError::FontLoad(_)
    ));
    assert!(matches!(
        c.load_font_face(Path::new("target/missing-font.ttf"), 18.0)
            .unwrap_err(),
        SchotterError::FontLoad(_)
    ));
}

#[test]
fn encode_png_has_canvas_dimensions() {
    let mut c = CpuCanvas::new(12, 7).unwrap();
    c.fill_background(Srgb::WHITE);
    let png = c.encode_png().unwrap();
    let img = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (12, 7));
    assert_eq!(img.get_pixel(3, 3).0, [255, 255, 255, 255]);
}

#[test]
fn draw_text_paints_glyphs_near_the_baseline() {
    let mut c = CpuCanvas::new(160, 40).unwrap();
    c.fill_background(Srgb::BLACK);
    c.load_font_face(Path::new("tests/data/fonts/DejaVuSansMono.ttf"), 18.0)
        .unwrap();
    assert!(c.font_face().is_some());

    let extent = c.measure_text("HHHH").unwrap();
    assert!(extent.width > 20.0 && extent.width < 80.0, "{extent:?}");

    c.set_color(Srgb::WHITE, 1.0);
    c.draw_text("HHHH", 10.0, 30.0).unwrap();
    assert_eq!(c.transform(), Affine::IDENTITY);

    let rgba = c.snapshot_rgba8();
    let lit: Vec<(u32, u32)> = (0..40)
        .flat_map(|y| (0..160).map(move |x| (x, y)))
        .filter(|&(x, y)| pixel(&rgba, 160, x, y)[0] > 128)
        .collect();
    assert!(!lit.is_empty());
    // Capital H sits on the baseline: nothing below it, nothing left of the pen start.
    assert!(lit.iter().all(|&(x, y)| y <= 31 && x >= 10), "{lit:?}");
    assert!(lit.iter().any(|&(_, y)| y >= 27));
    let right = lit.iter().map(|&(x, _)| x).max().unwrap();
    assert!(f64::from(right) <= 10.0 + extent.width + 1.0);
}
