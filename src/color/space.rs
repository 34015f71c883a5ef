//! sRGB, CIE L\*a\*b\* and HCL (cylindrical L\*a\*b\*) colour representations.
//!
//! Gradients blend in HCL so intermediate colours keep a steady perceived lightness instead of
//! dipping through muddy greys the way a raw RGB lerp does. All conversions use the D65 white
//! point and `f64` throughout.

use crate::foundation::error::{SchotterError, SchotterResult};

/// D65 reference white in XYZ.
const D65: [f64; 3] = [0.95047, 1.00000, 1.08883];

/// Chroma below which a colour is treated as achromatic when blending hues.
const ACHROMATIC_CHROMA: f64 = 0.00015;

/// sRGB colour with gamma-encoded components nominally in [0, 1].
///
/// Channels may leave [0, 1] after an HCL round trip; [`Srgb::clamped`] brings them back.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Srgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

/// CIE L\*a\*b\* colour (L in [0, 1] scale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    /// Lightness.
    pub l: f64,
    /// Green-red axis.
    pub a: f64,
    /// Blue-yellow axis.
    pub b: f64,
}

/// HCL colour: hue in degrees [0, 360), chroma, luminance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hcl {
    /// Hue angle in degrees.
    pub h: f64,
    /// Chroma (distance from the grey axis).
    pub c: f64,
    /// Luminance.
    pub l: f64,
}

impl Srgb {
    /// Opaque black.
    pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

    /// Construct from raw channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    pub fn from_hex(s: &str) -> SchotterResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SchotterError::invalid_color(format!(
                "expected a 6-digit hex triplet like '#RRGGBB', got '{s}'"
            )));
        }

        let channel = |range: std::ops::Range<usize>| -> SchotterResult<f64> {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|e| SchotterError::invalid_color(format!("'{s}': {e}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb`, quantized to 8 bits per channel.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantize to 8-bit channels with rounding; out-of-range values saturate.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Clamp every channel into [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// `true` when every channel already lies in [0, 1].
    pub fn is_in_gamut(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// sRGB -> linear -> XYZ -> L\*a\*b\*.
    pub fn to_lab(self) -> Lab {
        let (r, g, b) = (linearize(self.r), linearize(self.g), linearize(self.b));

        let x = 0.412_390_799_265_959_5 * r
            + 0.357_584_339_383_878 * g
            + 0.180_480_788_401_834_3 * b;
        let y = 0.212_639_005_871_510_4 * r
            + 0.715_168_678_767_756 * g
            + 0.072_192_315_360_733_7 * b;
        let z = 0.019_330_818_715_591_85 * r
            + 0.119_194_779_794_626 * g
            + 0.950_532_152_249_660_6 * b;

        let fy = lab_f(y / D65[1]);
        Lab {
            l: 1.16 * fy - 0.16,
            a: 5.0 * (lab_f(x / D65[0]) - fy),
            b: 2.0 * (fy - lab_f(z / D65[2])),
        }
    }

    /// Convert to HCL.
    pub fn to_hcl(self) -> Hcl {
        self.to_lab().to_hcl()
    }

    /// Blend towards `other` in HCL space at fraction `t`, clamped back into gamut.
    pub fn blend_hcl(self, other: Srgb, t: f64) -> Srgb {
        self.to_hcl().blend(other.to_hcl(), t)
    }
}

impl Lab {
    /// L\*a\*b\* -> XYZ -> linear -> sRGB. The result is not clamped.
    pub fn to_srgb(self) -> Srgb {
        let l2 = (self.l + 0.16) / 1.16;
        let x = D65[0] * lab_finv(l2 + self.a / 5.0);
        let y = D65[1] * lab_finv(l2);
        let z = D65[2] * lab_finv(l2 - self.b / 2.0);

        let r = 3.240_969_941_904_521 * x
            - 1.537_383_177_570_093_5 * y
            - 0.498_610_760_293_003_3 * z;
        let g = -0.969_243_636_280_879_8 * x
            + 1.875_967_501_507_720_7 * y
            + 0.041_555_057_407_175_6 * z;
        let b = 0.055_630_079_696_993_6 * x
            - 0.203_976_958_888_976_6 * y
            + 1.056_971_514_242_878_6 * z;

        Srgb::new(delinearize(r), delinearize(g), delinearize(b))
    }

    /// Cylindrical form. Hue is pinned to 0 for (near-)neutral colours.
    pub fn to_hcl(self) -> Hcl {
        let h = if (self.b - self.a).abs() > 1e-4 && self.a.abs() > 1e-4 {
            (self.b.atan2(self.a).to_degrees() + 360.0) % 360.0
        } else {
            0.0
        };
        Hcl {
            h,
            c: (self.a * self.a + self.b * self.b).sqrt(),
            l: self.l,
        }
    }
}

impl Hcl {
    /// Back to L\*a\*b\*.
    pub fn to_lab(self) -> Lab {
        let h = self.h.to_radians();
        Lab {
            l: self.l,
            a: self.c * h.cos(),
            b: self.c * h.sin(),
        }
    }

    /// Back to sRGB. The result is not clamped.
    pub fn to_srgb(self) -> Srgb {
        self.to_lab().to_srgb()
    }

    /// Blend towards `other` at fraction `t` and convert to a clamped sRGB colour.
    ///
    /// Hue follows the shorter arc. When exactly one side is achromatic it borrows the other
    /// side's hue, so a blend towards black or white does not sweep through unrelated hues.
    pub fn blend(self, other: Hcl, t: f64) -> Srgb {
        let (mut h1, mut h2) = (self.h, other.h);
        if self.c <= ACHROMATIC_CHROMA && other.c >= ACHROMATIC_CHROMA {
            h1 = h2;
        } else if other.c <= ACHROMATIC_CHROMA && self.c >= ACHROMATIC_CHROMA {
            h2 = h1;
        }

        Hcl {
            h: interp_angle(h1, h2, t),
            c: self.c + t * (other.c - self.c),
            l: self.l + t * (other.l - self.l),
        }
        .to_srgb()
        .clamped()
    }
}

fn linearize(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn delinearize(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

fn lab_f(t: f64) -> f64 {
    const EPS: f64 = 6.0 * 6.0 * 6.0 / (29.0 * 29.0 * 29.0);
    if t > EPS {
        t.cbrt()
    } else {
        t / 3.0 * 29.0 * 29.0 / (6.0 * 6.0) + 4.0 / 29.0
    }
}

fn lab_finv(t: f64) -> f64 {
    if t > 6.0 / 29.0 {
        t * t * t
    } else {
        3.0 * 6.0 * 6.0 / (29.0 * 29.0) * (t - 4.0 / 29.0)
    }
}

/// Interpolate between two angles (degrees) along the shorter arc; result in [0, 360).
pub(crate) fn interp_angle(a0: f64, a1: f64, t: f64) -> f64 {
    let delta = (((a1 - a0) % 360.0) + 540.0) % 360.0 - 180.0;
    (a0 + t * delta + 360.0) % 360.0
}

#[cfg(test)]
#[path = "../../tests/unit/color/space.rs"]
mod tests;
