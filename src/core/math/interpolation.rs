use nalgebra::{Point2, Vector3};

const EPSILON: f64 = 1e-9;

/// Calculates the barycentric coordinates (alpha, beta, gamma) of point p
/// with respect to the screen-space triangle (v1, v2, v3).
///
/// Returns `None` if the triangle is degenerate (area is near zero).
pub fn barycentric_coordinates(
    p: Point2<f64>,
    v1: Point2<f64>,
    v2: Point2<f64>,
    v3: Point2<f64>,
) -> Option<Vector3<f64>> {
    let e1 = v2 - v1;
    let e2 = v3 - v1;
    let p_v1 = p - v1;

    // Twice the signed area of the triangle
    let total_area_x2 = e1.x * e2.y - e1.y * e2.x;
    if total_area_x2.abs() < EPSILON {
        return None;
    }

    let inv_total_area_x2 = 1.0 / total_area_x2;
    let beta = (p_v1.x * e2.y - p_v1.y * e2.x) * inv_total_area_x2;
    let gamma = (e1.x * p_v1.y - e1.y * p_v1.x) * inv_total_area_x2;
    let alpha = 1.0 - beta - gamma;

    Some(Vector3::new(alpha, beta, gamma))
}

/// True when all three weights are non-negative (point inside or on an edge).
#[inline(always)]
pub fn is_inside_triangle(bary: &Vector3<f64>) -> bool {
    bary.x >= -EPSILON && bary.y >= -EPSILON && bary.z >= -EPSILON
}

/// Pixel positions along the segment a-b, both endpoints included (DDA walk).
pub fn line_pixels(a: Point2<f64>, b: Point2<f64>) -> impl Iterator<Item = (i64, i64)> {
    let delta = b - a;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i64;
    let step = delta / steps as f64;

    (0..=steps).map(move |i| {
        let p = a + step * i as f64;
        (p.x.floor() as i64, p.y.floor() as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertices_get_unit_weights() {
        let v1 = Point2::new(0.0, 0.0);
        let v2 = Point2::new(4.0, 0.0);
        let v3 = Point2::new(0.0, 4.0);

        let b = barycentric_coordinates(v2, v1, v2, v3).unwrap();
        assert_relative_eq!(b, Vector3::new(0.0, 1.0, 0.0));

        let centroid = Point2::new(4.0 / 3.0, 4.0 / 3.0);
        let b = barycentric_coordinates(centroid, v1, v2, v3).unwrap();
        assert_relative_eq!(b, Vector3::new(1.0, 1.0, 1.0) / 3.0, epsilon = 1e-12);
        assert!(is_inside_triangle(&b));
    }

    #[test]
    fn outside_point_has_negative_weight() {
        let b = barycentric_coordinates(
            Point2::new(5.0, 5.0),
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        )
        .unwrap();
        assert!(!is_inside_triangle(&b));
    }

    #[test]
    fn degenerate_triangle_is_rejected() {
        let p = Point2::new(1.0, 1.0);
        assert!(barycentric_coordinates(p, p, Point2::new(2.0, 2.0), Point2::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn line_walk_covers_both_endpoints() {
        let pixels: Vec<_> = line_pixels(Point2::new(0.5, 0.5), Point2::new(4.5, 2.5)).collect();
        assert_eq!(pixels.first(), Some(&(0, 0)));
        assert_eq!(pixels.last(), Some(&(4, 2)));
        assert_eq!(pixels.len(), 5);
    }
}
