use super::*;

const FIXTURE_FONT: &str = "tests/data/fonts/DejaVuSansMono.ttf";

#[test]
fn missing_font_file_is_a_font_load_error() {
    let mut engine = TextLayoutEngine::new();
    let err = engine
        .load_font_file(Path::new("target/definitely/not/here.ttf"), 18.0)
        .unwrap_err();
    assert!(matches!(err, SchotterError::FontLoad(_)), "{err}");
    assert!(err.to_string().contains("not/here.ttf"));
}

#[test]
fn garbage_bytes_are_a_font_load_error() {
    let mut engine = TextLayoutEngine::new();
    let err = engine
        .load_font_bytes(b"this is not a font".to_vec(), 18.0)
        .unwrap_err();
    assert!(matches!(err, SchotterError::FontLoad(_)), "{err}");
}

#[test]
fn non_positive_size_is_rejected() {
    let mut engine = TextLayoutEngine::new();
    for size in [0.0, -3.0, f32::NAN] {
        let err = engine.load_font_bytes(Vec::new(), size).unwrap_err();
        assert!(matches!(err, SchotterError::FontLoad(_)));
    }
}

#[test]
fn longer_text_measures_wider() {
    let bytes = std::fs::read(FIXTURE_FONT).unwrap();
    let mut engine = TextLayoutEngine::new();
    let face = engine.load_font_bytes(bytes, 18.0).unwrap();
    assert!(!face.family().trim().is_empty());

    let short = engine.measure("abc", &face);
    let long = engine.measure("abcabc", &face);
    assert!(short.width > 0.0);
    assert!(long.width > short.width);
    assert!(short.height > 0.0);
    assert!(short.baseline > 0.0 && short.baseline <= short.height);
}

#[test]
fn font_file_loads_with_its_family_and_size() {
    let mut engine = TextLayoutEngine::new();
    let face = engine.load_font_file(Path::new(FIXTURE_FONT), 18.0).unwrap();
    assert!(face.family().contains("DejaVu"), "{}", face.family());
    assert_eq!(face.size_px(), 18.0);
    assert!(!face.bytes().is_empty());

    // Monospaced: advance grows linearly with length.
    let one = engine.measure("0", &face).width;
    let ten = engine.measure("0123456789", &face).width;
    assert!((ten - 10.0 * one).abs() < 0.5, "one={one} ten={ten}");
}
