use super::{cross_2d, Line2D, Vec2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(p1: &Vec2, d1: &Vec2, p2: &Vec2, d2: &Vec2) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = cross_2d(&delta, d2) / cross;
    let u = cross_2d(&delta, d1) / cross;
    Some((t, u))
}

/// Intersection point of two infinite lines, or `None` when parallel.
#[must_use]
pub fn line_intersection(a: &Line2D, b: &Line2D) -> Option<Vec2> {
    line_line_intersect_2d(&a.point, &a.direction, &b.point, &b.direction)
        .map(|(t, _)| a.point_at(t))
}
