use crate::core::math::vector::Vec3;
use nalgebra::{Matrix4, Point2, Point3};

/// Factory for the handful of matrices the presentation side needs.
/// Written out by hand to keep the right-handed convention explicit.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation around the Y-axis.
    pub fn rotation_y(angle_rad: f64) -> Matrix4<f64> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn translation(translation: &Vec3) -> Matrix4<f64> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// View transform of the demo camera: the model is rotated about Y first,
    /// then moved by the accumulated camera offset.
    pub fn camera(offset: &Vec3, rotation_y_rad: f64) -> Matrix4<f64> {
        Self::translation(offset) * Self::rotation_y(rotation_y_rad)
    }
}

/// Applies an affine transform to a position.
#[inline]
pub fn transform_point(matrix: &Matrix4<f64>, p: &Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(*p)).coords
}

/// Converts NDC coordinates to screen coordinates (viewport transform).
/// Note: Y-axis is flipped (NDC +Y is up, screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f64, ndc_y: f64, width: f64, height: f64) -> Point2<f64> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - (ndc_y + 1.0) * 0.5) * height,
    )
}
