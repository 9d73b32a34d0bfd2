use crate::core::color::ColorRGB;
use crate::core::math::vector::Vec3;

/// A light source contributing to the face colors.
///
/// `position` doubles as the light direction: intensities are the plain dot
/// product of the surface normal with this vector, with no distance falloff.
/// Colors are on the 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: ColorRGB,
    pub position: Vec3,
}

impl Light {
    pub fn new(color: ColorRGB, position: Vec3) -> Self {
        Self { color, position }
    }

    pub fn from_rgb(red: f32, green: f32, blue: f32, position: Vec3) -> Self {
        Self::new(ColorRGB::new(red, green, blue), position)
    }

    /// Raw (unclamped) intensity of this light on a surface with the given unit normal.
    #[inline]
    pub fn intensity(&self, normal: &Vec3) -> f64 {
        normal.dot(&self.position)
    }
}

/// The three-light rig used when no lights are configured: blue from the
/// back-top, red from the front-top and a green light at the origin.
pub fn default_lights() -> Vec<Light> {
    vec![
        Light::from_rgb(0.0, 0.0, 140.0, Vec3::new(0.0, 1.0, -1.0)),
        Light::from_rgb(140.0, 0.0, 0.0, Vec3::new(0.0, 1.0, 1.0)),
        Light::from_rgb(0.0, 140.0, 0.0, Vec3::new(0.0, 0.0, 0.0)),
    ]
}
