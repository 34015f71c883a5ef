use std::collections::BTreeMap;

use crate::{
    color::gradient::GradientTable,
    foundation::error::{SchotterError, SchotterResult},
};

/// Built-in theme literals as `(name, [(hex, position), ...])`.
///
/// Most are two-stop gradients from uigradients.com.
const BUILTIN_THEMES: &[(&str, &[(&str, f64)])] = &[
    ("scooter", &[("#36d1dc", 0.0), ("#5b86e5", 1.0)]),
    ("visionsOfGrandeur", &[("#000046", 0.0), ("#1CB5E0", 1.0)]),
    ("blueSkies", &[("#56CCF2", 0.0), ("#2F80ED", 1.0)]),
    ("darkOcean", &[("#373B44", 0.0), ("#4286f4", 1.0)]),
    ("yoda", &[("#FF0099", 0.0), ("#493240", 1.0)]),
    ("amin", &[("#8E2DE2", 0.0), ("#4A00E0", 1.0)]),
    ("harvey", &[("#1f4037", 0.0), ("#99f2c8", 1.0)]),
    ("flare", &[("#f12711", 0.0), ("#f5af19", 1.0)]),
    ("ultraViolet", &[("#654ea3", 0.0), ("#eaafc8", 1.0)]),
    ("sinCityRed", &[("#ED213A", 0.0), ("#93291E", 1.0)]),
    ("eveningNight", &[("#005AA7", 0.0), ("#FFFDE4", 1.0)]),
    ("eXpresso", &[("#3c1053", 0.0), ("#ad5389", 1.0)]),
    ("mono", &[("#000000", 0.0), ("#ffffff", 1.0)]),
    ("black", &[("#000000", 0.0), ("#000000", 1.0)]),
    ("white", &[("#ffffff", 0.0), ("#ffffff", 1.0)]),
    (
        "coolSky",
        &[("#2980B9", 0.0), ("#6DD5FA", 0.5), ("#FFFFFF", 1.0)],
    ),
    (
        "moonlitAsteroid",
        &[("#0f2027", 0.0), ("#203a43", 0.5), ("#2c5364", 1.0)],
    ),
    (
        "jShine",
        &[("#12c2e9", 0.0), ("#c471ed", 0.5), ("#f64f59", 1.0)],
    ),
];

/// Immutable-after-setup mapping from theme name to gradient.
///
/// Built once at startup and handed by reference to whoever needs a lookup. Names are
/// case-sensitive.
#[derive(Clone, Debug, Default)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, GradientTable>,
}

impl ThemeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in theme.
    pub fn builtin() -> SchotterResult<Self> {
        let mut registry = Self::new();
        for (name, stops) in BUILTIN_THEMES {
            let table = GradientTable::from_hex_stops(stops.iter().copied())?;
            registry.insert(*name, table);
        }
        Ok(registry)
    }

    /// Add or replace a theme.
    pub fn insert(&mut self, name: impl Into<String>, table: GradientTable) {
        self.themes.insert(name.into(), table);
    }

    /// Look up a theme by name.
    pub fn get(&self, name: &str) -> SchotterResult<&GradientTable> {
        self.themes
            .get(name)
            .ok_or_else(|| SchotterError::unknown_theme(name))
    }

    /// `true` when `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Number of registered themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/themes.rs"]
mod tests;
