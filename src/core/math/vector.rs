use nalgebra::{Point3, Vector2, Vector3};

/// Lengths at or below this value are treated as zero when normalizing.
pub const EPSILON: f64 = 1e-12;

/// Position, normal or light vector in object space.
pub type Vec3 = Vector3<f64>;

/// Texture coordinate (u, v).
pub type Vec2 = Vector2<f64>;

/// Returns `v` scaled to unit length.
///
/// Returns `None` for zero-length (or near zero-length) input, where a plain
/// normalization would divide by zero and produce NaN components.
#[inline]
pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
    v.try_normalize(EPSILON)
}

/// Unit normal of the triangle (p0, p1, p2), oriented by `(p1 - p0) x (p2 - p0)`.
///
/// Returns `None` for degenerate triangles (collinear or coincident points).
pub fn triangle_normal(p0: &Vec3, p1: &Vec3, p2: &Vec3) -> Option<Vec3> {
    let edge1 = p1 - p0;
    let edge2 = p2 - p0;
    try_normalize(&edge1.cross(&edge2))
}

/// Axis-aligned bounding box of a point set as `(min, max)` corners.
pub fn bounding_box<'a, I>(points: I) -> Option<(Point3<f64>, Point3<f64>)>
where
    I: IntoIterator<Item = &'a Vec3>,
{
    let mut points = points.into_iter();
    let first = Point3::from(*points.next()?);

    let bounds = points.fold((first, first), |(min, max), p| {
        (
            Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
            Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
        )
    });
    Some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalized_vector_has_unit_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.2, 7.5, 1e-3),
            Vec3::new(1e-6, -1e-6, 2e-6),
        ] {
            let n = try_normalize(&v).unwrap();
            assert_relative_eq!(n.dot(&n), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_vector_does_not_normalize() {
        assert!(try_normalize(&Vec3::zeros()).is_none());
    }

    #[test]
    fn cross_product_is_orthogonal_to_both_inputs() {
        let pairs = [
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, 2.0)),
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            (Vec3::new(10.0, -3.0, 7.0), Vec3::new(0.1, 0.2, -0.3)),
        ];
        for (a, b) in pairs {
            let c = a.cross(&b);
            assert_relative_eq!(c.dot(&a), 0.0, epsilon = 1e-9);
            assert_relative_eq!(c.dot(&b), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn componentwise_and_scalar_products() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.component_mul(&b), Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 32.0);
        assert_relative_eq!(Vec3::new(3.0, 4.0, 0.0).norm(), 5.0);
    }

    #[test]
    fn triangle_normal_follows_winding() {
        let p0 = Vec3::new(0.0, 0.0, 0.0);
        let p1 = Vec3::new(1.0, 0.0, 0.0);
        let p2 = Vec3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(triangle_normal(&p0, &p1, &p2).unwrap(), Vec3::z());
        assert_relative_eq!(triangle_normal(&p0, &p2, &p1).unwrap(), -Vec3::z());
    }

    #[test]
    fn collinear_triangle_has_no_normal() {
        let p0 = Vec3::new(0.0, 0.0, 0.0);
        let p1 = Vec3::new(1.0, 1.0, 1.0);
        let p2 = Vec3::new(2.0, 2.0, 2.0);
        assert!(triangle_normal(&p0, &p1, &p2).is_none());
    }

    #[test]
    fn bounding_box_covers_all_points() {
        let points = [
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.5),
            Vec3::new(0.0, 0.0, -7.0),
        ];
        let (min, max) = bounding_box(&points).unwrap();
        assert_eq!(min, Point3::new(-1.0, -2.0, -7.0));
        assert_eq!(max, Point3::new(1.0, 4.0, 3.0));
        assert!(bounding_box(&Vec::<Vec3>::new()).is_none());
    }
}
