use super::{cross_2d, LineSegment2D, Vec2, LENGTH_TOLERANCE, TOLERANCE};

/// A closed polygon. The closing edge from the last point back to the first
/// is implicit; the first point is never repeated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon2D {
    pub points: Vec<Vec2>,
}

impl Polygon2D {
    #[must_use]
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area (shoelace formula). Positive for counter-clockwise,
    /// negative for clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Returns the polygon with clockwise winding. Zero-area polygons are
    /// returned unchanged.
    #[must_use]
    pub fn into_clockwise(mut self) -> Self {
        if self.signed_area() > TOLERANCE {
            self.points.reverse();
        }
        self
    }

    /// Iterates the edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment2D> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| LineSegment2D::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed turn angle at every vertex, in radians. Positive turns are
    /// counter-clockwise. Vertex `i` turns from edge `i-1` into edge `i`.
    #[must_use]
    pub fn turn_angles(&self) -> Vec<f64> {
        let n = self.points.len();
        if n < 3 {
            return Vec::new();
        }
        (0..n)
            .map(|i| {
                let prev = self.points[(i + n - 1) % n];
                let cur = self.points[i];
                let next = self.points[(i + 1) % n];
                let d_in = cur - prev;
                let d_out = next - cur;
                cross_2d(&d_in, &d_out).atan2(d_in.dot(&d_out))
            })
            .collect()
    }

    /// Side lengths of the smallest-area bounding rectangle aligned with one
    /// of the edges, shorter side first. Ties in area go to the narrower
    /// rectangle. The result does not depend on placement, rotation or
    /// mirroring. `None` without at least one edge of non-zero length.
    #[must_use]
    pub fn oriented_extents(&self) -> Option<(f64, f64)> {
        let mut best: Option<(f64, f64)> = None;
        for edge in self.edges() {
            let length = edge.length();
            if length < TOLERANCE {
                continue;
            }
            let u = (edge.end - edge.start) / length;
            let v = Vec2::new(-u.y, u.x);
            let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
            let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
            for p in &self.points {
                let (a, b) = (p.dot(&u), p.dot(&v));
                u_min = u_min.min(a);
                u_max = u_max.max(a);
                v_min = v_min.min(b);
                v_max = v_max.max(b);
            }
            let (w, h) = (u_max - u_min, v_max - v_min);
            let candidate = if w <= h { (w, h) } else { (h, w) };
            best = match best {
                Some(current) if !is_smaller_box(candidate, current) => Some(current),
                _ => Some(candidate),
            };
        }
        best
    }

    /// Drops consecutive duplicate points (and a duplicated closing point).
    #[must_use]
    pub fn deduplicated(&self, tolerance: f64) -> Self {
        let mut points: Vec<Vec2> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if points.last().is_none_or(|q| (p - q).norm() >= tolerance) {
                points.push(*p);
            }
        }
        while points.len() > 1 && (points[0] - points[points.len() - 1]).norm() < tolerance {
            points.pop();
        }
        Self { points }
    }
}

/// Relative tolerance when comparing bounding box areas.
const AREA_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Whether box `a` beats box `b`: smaller area, or equal area and narrower.
fn is_smaller_box(a: (f64, f64), b: (f64, f64)) -> bool {
    let (area_a, area_b) = (a.0 * a.1, b.0 * b.1);
    let eps = AREA_RELATIVE_TOLERANCE * area_a.max(area_b).max(1.0);
    if (area_a - area_b).abs() > eps {
        return area_a < area_b;
    }
    a.0 < b.0 - LENGTH_TOLERANCE
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Vec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}
