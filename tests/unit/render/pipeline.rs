use super::*;
use crate::foundation::error::SchotterError;

fn unsigned_cfg() -> RenderConfig {
    RenderConfig {
        columns: 3,
        rows: 5,
        canvas_width: 96,
        canvas_height: 128,
        include_signature: false,
        ..RenderConfig::default()
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("schotter-unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn unsigned_render_has_no_caption() {
    let themes = ThemeRegistry::builtin().unwrap();
    let img = render_image(&unsigned_cfg(), &themes, 1).unwrap();
    assert_eq!((img.width, img.height, img.seed), (96, 128, 1));
    assert!(img.signature.is_none());
    assert!(img.png.starts_with(b"\x89PNG"));
}

#[test]
fn fixed_seed_renders_identical_bytes() {
    let themes = ThemeRegistry::builtin().unwrap();
    let a = render_image(&unsigned_cfg(), &themes, 77).unwrap();
    let b = render_image(&unsigned_cfg(), &themes, 77).unwrap();
    let c = render_image(&unsigned_cfg(), &themes, 78).unwrap();
    assert_eq!(a.png, b.png);
    assert_ne!(a.png, c.png);
}

#[test]
fn unknown_theme_fails_before_rendering() {
    let themes = ThemeRegistry::builtin().unwrap();
    let cfg = RenderConfig {
        theme: "nope".to_string(),
        ..unsigned_cfg()
    };
    let err = render_image(&cfg, &themes, 0).unwrap_err();
    assert!(matches!(err, SchotterError::UnknownTheme(ref t) if t == "nope"));
}

#[test]
fn missing_font_writes_nothing() {
    let themes = ThemeRegistry::builtin().unwrap();
    let dir = scratch_dir("missing_font");
    let cfg = RenderConfig {
        include_signature: true,
        font_path: PathBuf::from("target/no-such-font.ttf"),
        ..unsigned_cfg()
    };
    let err = render_to_dir(&cfg, &themes, 0, &dir).unwrap_err();
    assert!(matches!(err, SchotterError::FontLoad(_)));
    assert!(!dir.join(cfg.output_file_name()).exists());
}

#[test]
fn render_to_dir_uses_the_configured_file_name() {
    let themes = ThemeRegistry::builtin().unwrap();
    let dir = scratch_dir("file_name");
    let (path, img) = render_to_dir(&unsigned_cfg(), &themes, 5, &dir).unwrap();
    assert_eq!(path, dir.join("mono_96x128_020.png"));
    assert_eq!(std::fs::read(&path).unwrap(), img.png);
}

#[test]
fn configured_seed_wins_over_the_clock() {
    let cfg = RenderConfig {
        seed: Some(1234),
        ..unsigned_cfg()
    };
    assert_eq!(resolve_seed(&cfg), 1234);
}
