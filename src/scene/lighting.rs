//! Per-face and per-vertex light evaluation.
//!
//! Light colors are on the 0-255 scale. The multi-light blend divides that
//! scale back out, producing display-range values; the Gouraud model scales the
//! light color directly by an intensity in [0, 1].

use crate::core::color::ColorRGB;
use crate::core::geometry::{Face, FaceColors};
use crate::core::math::vector::Vec3;
use crate::scene::light::Light;
use crate::scene::shading::ShadingMode;
use rand::Rng;

/// Scale of light color channels.
pub const LIGHT_COLOR_SCALE: f64 = 255.0;

/// Ambient reflection coefficient (k_a).
pub const AMBIENT_COEFFICIENT: f64 = 0.005;
/// Ambient light intensity (i_a).
pub const AMBIENT_INTENSITY: f64 = 0.09;
/// Diffuse reflection coefficient (k_d).
pub const DIFFUSE_COEFFICIENT: f64 = 0.005;

/// Base color lit by the ambient term when the scene has no lights.
const AMBIENT_BASE_COLOR: ColorRGB = ColorRGB::splat(LIGHT_COLOR_SCALE as f32);

/// Direction of the single white light used by [`ShadingMode::GrayScale`].
pub fn grayscale_light() -> Vec3 {
    Vec3::new(0.0, 0.5, 1.0)
}

/// Multi-light normalized blend for a unit surface normal.
///
/// Lights facing away (negative intensity) are dropped. Each remaining light
/// is weighted by `i / (sum(i) * max(i) * 255)` and the weighted colors are
/// summed. Returns black when no light has a positive intensity.
pub fn blend_lights(normal: &Vec3, lights: &[Light]) -> ColorRGB {
    let facing: Vec<(f64, &Light)> = lights
        .iter()
        .map(|light| (light.intensity(normal), light))
        .filter(|(intensity, _)| *intensity >= 0.0)
        .collect();

    let magnitude: f64 = facing.iter().map(|(intensity, _)| intensity).sum();
    let max_intensity = facing
        .iter()
        .map(|(intensity, _)| *intensity)
        .fold(0.0, f64::max);

    // Also covers survivors that all sit exactly at zero intensity.
    if magnitude <= 0.0 {
        return ColorRGB::BLACK;
    }

    let denominator = magnitude * max_intensity * LIGHT_COLOR_SCALE;
    facing
        .iter()
        .fold(ColorRGB::BLACK, |color, (intensity, light)| {
            color + light.color * (intensity / denominator) as f32
        })
}

/// Total ambient + diffuse intensity for a unit normal, in [0, 1].
pub fn gouraud_intensity(normal: &Vec3, light: &Light) -> f64 {
    let ambient = AMBIENT_COEFFICIENT * AMBIENT_INTENSITY;
    let diffuse = DIFFUSE_COEFFICIENT * 0.5 * light.intensity(normal);
    (ambient + diffuse.max(0.0)).min(1.0)
}

/// Single-light ambient + diffuse vertex color.
pub fn gouraud(normal: &Vec3, light: &Light) -> ColorRGB {
    light.color * gouraud_intensity(normal, light) as f32
}

/// Ambient-only vertex color for scenes without a primary light.
pub fn ambient_only() -> ColorRGB {
    AMBIENT_BASE_COLOR * (AMBIENT_COEFFICIENT * AMBIENT_INTENSITY) as f32
}

/// Gray level of a face lit by the fixed [`grayscale_light`].
pub fn grayscale(normal: &Vec3) -> ColorRGB {
    let intensity = normal.dot(&grayscale_light()).max(0.0);
    ColorRGB::splat(intensity as f32)
}

/// Computes the colors of one face for the given mode.
///
/// Degenerate faces (no usable normal) get black instead of NaN colors.
pub fn shade_face<R: Rng>(
    face: &Face,
    mode: ShadingMode,
    lights: &[Light],
    rng: &mut R,
) -> FaceColors {
    match mode {
        ShadingMode::Wireframe => FaceColors::Flat(ColorRGB::WHITE),
        ShadingMode::RandomColor => FaceColors::Flat(ColorRGB::new(
            rng.random::<f32>(),
            rng.random::<f32>(),
            rng.random::<f32>(),
        )),
        ShadingMode::GrayScale => FaceColors::Flat(
            face.surface_normal()
                .map_or(ColorRGB::BLACK, |n| grayscale(&n)),
        ),
        ShadingMode::Flat => FaceColors::Flat(
            face.surface_normal()
                .map_or(ColorRGB::BLACK, |n| blend_lights(&n, lights)),
        ),
        ShadingMode::Smooth => FaceColors::PerVertex(std::array::from_fn(|i| {
            face.shading_normal(i)
                .map_or(ColorRGB::BLACK, |n| blend_lights(&n, lights))
        })),
        ShadingMode::Gouraud => FaceColors::PerVertex(std::array::from_fn(|i| {
            match (face.shading_normal(i), lights.first()) {
                (Some(n), Some(light)) => gouraud(&n, light),
                (None, Some(_)) => ColorRGB::BLACK,
                (_, None) => ambient_only(),
            }
        })),
    }
}

/// Whether [`shade_face`] blacks out at least one vertex of `face` for lack
/// of a usable normal.
pub fn lacks_normal(face: &Face, mode: ShadingMode, lights: &[Light]) -> bool {
    match mode {
        ShadingMode::Wireframe | ShadingMode::RandomColor => false,
        ShadingMode::GrayScale | ShadingMode::Flat => face.surface_normal().is_none(),
        ShadingMode::Gouraud if lights.is_empty() => false,
        ShadingMode::Smooth | ShadingMode::Gouraud => {
            (0..3).any(|i| face.shading_normal(i).is_none())
        }
    }
}
