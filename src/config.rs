use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    color::space::Srgb,
    foundation::error::{SchotterError, SchotterResult},
    render::geometry::GridGeometry,
};

/// Flat canvas colour painted before any cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Opaque black.
    #[default]
    Black,
    /// Opaque white.
    White,
}

impl Background {
    /// The background as an sRGB colour.
    pub fn color(self) -> Srgb {
        match self {
            Self::Black => Srgb::BLACK,
            Self::White => Srgb::WHITE,
        }
    }
}

/// Every knob of a single render.
///
/// Missing fields fall back to [`RenderConfig::default`] when deserializing, so a JSON file only
/// has to name what it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Logical grid columns.
    pub columns: u32,
    /// Logical grid rows.
    pub rows: u32,
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Inset applied on every side of a cell, in pixels.
    pub padding: u32,
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Upper bound of the random rotation, in degrees.
    pub max_rotation_degrees: f64,
    /// Upper bound of the horizontal jitter as a fraction of the cell size.
    pub max_offset_fraction: f64,
    /// Fill opacity in [0, 1]. Outlines are always opaque.
    pub fill_alpha: f64,
    /// Key into the theme registry.
    pub theme: String,
    /// Drive rotation and jitter with a logarithmic row fraction instead of a linear one.
    pub use_exponential_row_scale: bool,
    /// Stamp the SHA-256 caption below the grid.
    pub include_signature: bool,
    /// Canvas background.
    pub background: Background,
    /// RNG seed. `None` lets the caller pick one (the CLI uses the wall clock).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Font used for the signature caption.
    pub font_path: PathBuf,
    /// Caption font size in pixels.
    pub font_size: f32,
    /// Text appended after the hex digest in the caption.
    pub signature_suffix: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 24,
            canvas_width: 4096,
            canvas_height: 4096,
            padding: 0,
            stroke_width: 1.0,
            max_rotation_degrees: 90.0,
            max_offset_fraction: 1.0,
            fill_alpha: 0.2,
            theme: "mono".to_string(),
            use_exponential_row_scale: false,
            include_signature: true,
            background: Background::Black,
            seed: None,
            font_path: PathBuf::from("Go-Mono.ttf"),
            font_size: 18.0,
            signature_suffix: " // @BillGlover".to_string(),
        }
    }
}

impl RenderConfig {
    /// Parse a (possibly partial) JSON object.
    pub fn from_json_str(s: &str) -> SchotterResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse render config JSON")?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: &Path) -> SchotterResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Overlay a (possibly partial) JSON object on top of `self`.
    ///
    /// Fields the object names replace the current values; everything else is kept.
    pub fn merged_with_json_str(&self, s: &str) -> SchotterResult<Self> {
        let overlay: serde_json::Value =
            serde_json::from_str(s).context("parse render config JSON")?;
        let serde_json::Value::Object(overlay) = overlay else {
            return Err(SchotterError::validation("render config JSON must be an object"));
        };

        let mut merged = serde_json::to_value(self).context("serialize render config")?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(overlay);
        }
        let cfg: Self = serde_json::from_value(merged).context("parse render config JSON")?;
        Ok(cfg)
    }

    /// [`RenderConfig::merged_with_json_str`] reading the overlay from a file.
    pub fn merged_with_json_file(&self, path: &Path) -> SchotterResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        self.merged_with_json_str(&text)
    }

    /// Check every invariant a render depends on.
    pub fn validate(&self) -> SchotterResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(SchotterError::validation("columns and rows must be > 0"));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(SchotterError::validation(
                "canvas width/height must be > 0",
            ));
        }
        if self.canvas_width > u32::from(u16::MAX) || self.canvas_height > u32::from(u16::MAX) {
            return Err(SchotterError::validation(format!(
                "canvas width/height must be <= {}",
                u16::MAX
            )));
        }
        for (name, value) in [
            ("stroke_width", self.stroke_width),
            ("max_rotation_degrees", self.max_rotation_degrees),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SchotterError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.max_offset_fraction.is_finite() {
            return Err(SchotterError::validation(
                "max_offset_fraction must be finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.fill_alpha) {
            return Err(SchotterError::validation("fill_alpha must be in [0, 1]"));
        }
        if self.theme.trim().is_empty() {
            return Err(SchotterError::validation("theme must be non-empty"));
        }
        if self.include_signature && (!self.font_size.is_finite() || self.font_size <= 0.0) {
            return Err(SchotterError::validation(
                "font_size must be finite and > 0",
            ));
        }

        GridGeometry::new(self)?;
        Ok(())
    }

    /// `{theme}_{width}x{height}_{alphaPercent:03}.png`.
    pub fn output_file_name(&self) -> String {
        // Halves round to even.
        let alpha_percent = (self.fill_alpha * 100.0).round_ties_even() as u32;
        format!(
            "{}_{}x{}_{:03}.png",
            self.theme, self.canvas_width, self.canvas_height, alpha_percent
        )
    }
}

/// Named starting points that replace the old one-program-per-variant layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Black background, linear rows, signed.
    #[default]
    Classic,
    /// White background with black squares.
    Paper,
    /// Logarithmic row progression for rotation and jitter.
    Exponential,
    /// Classic without the signature caption.
    Unsigned,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 4] = [
        Preset::Classic,
        Preset::Paper,
        Preset::Exponential,
        Preset::Unsigned,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Paper => "paper",
            Self::Exponential => "exponential",
            Self::Unsigned => "unsigned",
        }
    }

    /// Resolve a preset by its [`Preset::name`].
    pub fn from_name(name: &str) -> SchotterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| SchotterError::validation(format!("unknown preset '{name}'")))
    }

    /// The configuration this preset stands for.
    pub fn config(self) -> RenderConfig {
        let base = RenderConfig::default();
        match self {
            Self::Classic => base,
            Self::Paper => RenderConfig {
                background: Background::White,
                theme: "black".to_string(),
                ..base
            },
            Self::Exponential => RenderConfig {
                use_exponential_row_scale: true,
                ..base
            },
            Self::Unsigned => RenderConfig {
                include_signature: false,
                ..base
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
