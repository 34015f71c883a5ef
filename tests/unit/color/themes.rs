use super::*;
use crate::color::space::Srgb;

#[test]
fn builtin_registry_contains_every_theme() {
    let reg = ThemeRegistry::builtin().unwrap();
    assert_eq!(reg.len(), BUILTIN_THEMES.len());
    for (name, stops) in BUILTIN_THEMES {
        let table = reg.get(name).unwrap();
        assert_eq!(table.keypoints().len(), stops.len(), "{name}");
    }
}

#[test]
fn names_are_sorted() {
    let reg = ThemeRegistry::builtin().unwrap();
    let names: Vec<&str> = reg.names().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"mono"));
}

#[test]
fn unknown_theme_is_an_error() {
    let reg = ThemeRegistry::builtin().unwrap();
    let err = reg.get("Mono").unwrap_err();
    assert!(matches!(err, SchotterError::UnknownTheme(ref n) if n == "Mono"));
    assert!(!reg.contains("nope"));
}

#[test]
fn mono_runs_black_to_white() {
    let reg = ThemeRegistry::builtin().unwrap();
    let mono = reg.get("mono").unwrap();
    assert_eq!(mono.interpolate(0.0), Srgb::BLACK);
    assert_eq!(mono.interpolate(1.0), Srgb::WHITE);
}

#[test]
fn custom_themes_can_be_registered() {
    let mut reg = ThemeRegistry::new();
    assert!(reg.is_empty());
    reg.insert(
        "duo",
        GradientTable::from_hex_stops([("#101010", 0.0), ("#202020", 1.0)]).unwrap(),
    );
    assert!(reg.contains("duo"));
    assert_eq!(reg.get("duo").unwrap().keypoints()[1].color().to_hex(), "#202020");
}
