use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the lighting pass colors the faces.
///
/// The presentation layer owns the current mode (typically cycling it with a
/// key press via [`ShadingMode::next`]) and passes it to the scene on every
/// lighting update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// Unlit; presenters draw triangle edges only.
    Wireframe,
    /// A random flat color per face.
    RandomColor,
    /// Single fixed white light, flat gray levels.
    GrayScale,
    /// Multi-light blend evaluated once per face.
    #[default]
    Flat,
    /// Multi-light blend evaluated per vertex normal.
    Smooth,
    /// Ambient + diffuse of the primary light per vertex normal, for textured meshes.
    Gouraud,
}

#[derive(Debug, Clone, Error)]
#[error("unknown shading mode '{0}' (expected one of: wireframe, randomcolor, grayscale, flat, smooth, gouraud)")]
pub struct ParseShadingModeError(pub String);

impl ShadingMode {
    pub const ALL: [ShadingMode; 6] = [
        ShadingMode::Wireframe,
        ShadingMode::RandomColor,
        ShadingMode::GrayScale,
        ShadingMode::Flat,
        ShadingMode::Smooth,
        ShadingMode::Gouraud,
    ];

    /// The following mode, wrapping around after the last one.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            ShadingMode::Wireframe => "wireframe",
            ShadingMode::RandomColor => "randomcolor",
            ShadingMode::GrayScale => "grayscale",
            ShadingMode::Flat => "flat",
            ShadingMode::Smooth => "smooth",
            ShadingMode::Gouraud => "gouraud",
        }
    }

    /// True for modes whose colors depend on the scene's lights.
    pub fn uses_lights(self) -> bool {
        matches!(
            self,
            ShadingMode::Flat | ShadingMode::Smooth | ShadingMode::Gouraud
        )
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShadingMode {
    type Err = ParseShadingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseShadingModeError(s.to_string()))
    }
}
