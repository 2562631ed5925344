use super::Vec2;

/// Euclidean distance between two points.
#[must_use]
pub fn point_to_point_dist(a: &Vec2, b: &Vec2) -> f64 {
    (a - b).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn point_distance() {
        let d = point_to_point_dist(&Vec2::new(0.0, 0.0), &Vec2::new(5.0, 5.0));
        assert!((d - 50.0_f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn point_distance_is_symmetric() {
        let a = Vec2::new(-1200.0, 300.0);
        let b = Vec2::new(1800.0, -3700.0);
        assert!((point_to_point_dist(&a, &b) - 5000.0).abs() < TOL);
        assert!((point_to_point_dist(&b, &a) - 5000.0).abs() < TOL);
    }
}
