use crate::{
    color::space::{Hcl, Srgb},
    foundation::error::{SchotterError, SchotterResult},
};

/// A colour stop at a normalized position along a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorKeypoint {
    position: f64,
    color: Srgb,
    hcl: Hcl,
}

impl ColorKeypoint {
    /// Build a keypoint, caching its HCL form for blending.
    pub fn new(color: Srgb, position: f64) -> Self {
        Self {
            position,
            color,
            hcl: color.to_hcl(),
        }
    }

    /// Parse a `#RRGGBB` colour source into a keypoint.
    pub fn from_hex(hex: &str, position: f64) -> SchotterResult<Self> {
        Ok(Self::new(Srgb::from_hex(hex)?, position))
    }

    /// Normalized location of the stop, nominally in [0, 1].
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Stop colour in sRGB.
    pub fn color(&self) -> Srgb {
        self.color
    }

    /// The cached HCL representation of [`ColorKeypoint::color`].
    pub fn hcl(&self) -> Hcl {
        self.hcl
    }
}

/// Ordered colour keypoints with HCL interpolation between neighbours.
///
/// Keypoints are expected in ascending `position` order. The order is not checked; lookups
/// against an unsorted table scan pairs in stored order and return whatever brackets first.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientTable {
    keypoints: Vec<ColorKeypoint>,
}

impl GradientTable {
    /// Build from keypoints. Fails with [`SchotterError::EmptyTable`] on an empty input.
    pub fn new(keypoints: Vec<ColorKeypoint>) -> SchotterResult<Self> {
        if keypoints.is_empty() {
            return Err(SchotterError::EmptyTable);
        }
        Ok(Self { keypoints })
    }

    /// Build from `(hex colour, position)` pairs.
    pub fn from_hex_stops<'a, I>(stops: I) -> SchotterResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let keypoints = stops
            .into_iter()
            .map(|(hex, pos)| ColorKeypoint::from_hex(hex, pos))
            .collect::<SchotterResult<Vec<_>>>()?;
        Self::new(keypoints)
    }

    /// Keypoints in stored order.
    pub fn keypoints(&self) -> &[ColorKeypoint] {
        &self.keypoints
    }

    /// Sample the gradient at `t`.
    ///
    /// The first adjacent pair with `k_i.position <= t <= k_{i+1}.position` is blended in HCL at
    /// the local fraction. When no pair brackets `t` the last keypoint's colour is returned as
    /// is. That includes `t` below the first keypoint, NaN, and single-keypoint tables.
    pub fn interpolate(&self, t: f64) -> Srgb {
        for pair in self.keypoints.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.position <= t && t <= b.position {
                let span = b.position - a.position;
                if span <= 0.0 {
                    return a.color;
                }
                let u = (t - a.position) / span;
                if u <= 0.0 {
                    return a.color;
                }
                if u >= 1.0 {
                    return b.color;
                }
                return a.hcl.blend(b.hcl, u);
            }
        }

        // `new` rejects empty tables, so a last keypoint always exists.
        self.keypoints[self.keypoints.len() - 1].color
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/gradient.rs"]
mod tests;
