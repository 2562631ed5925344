use crate::error::{GeometryError, Result};

use super::{cross_2d, left_normal, Vec2, TOLERANCE};

/// An infinite line defined by a point and a unit direction.
///
/// The parametric form is: `P(t) = point + t * direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    pub point: Vec2,
    pub direction: Vec2,
}

impl Line2D {
    /// Creates a new line, normalizing the direction.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the direction is zero-length.
    pub fn new(point: Vec2, direction: Vec2) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            point,
            direction: direction / len,
        })
    }

    /// Horizontal line through `point`.
    #[must_use]
    pub fn horizontal(point: Vec2) -> Self {
        Self {
            point,
            direction: Vec2::new(1.0, 0.0),
        }
    }

    /// Vertical line through `point`.
    #[must_use]
    pub fn vertical(point: Vec2) -> Self {
        Self {
            point,
            direction: Vec2::new(0.0, 1.0),
        }
    }

    /// Evaluates the line at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Vec2 {
        self.point + self.direction * t
    }

    /// Signed parameter of the orthogonal projection of `p` onto the line.
    #[must_use]
    pub fn parameter_of(&self, p: &Vec2) -> f64 {
        (p - self.point).dot(&self.direction)
    }

    /// Orthogonal projection of `p` onto the line.
    #[must_use]
    pub fn project(&self, p: &Vec2) -> Vec2 {
        self.point_at(self.parameter_of(p))
    }

    /// Perpendicular distance from `p` to the line.
    #[must_use]
    pub fn distance_to(&self, p: &Vec2) -> f64 {
        cross_2d(&self.direction, &(p - self.point)).abs()
    }

    /// Line through `through` perpendicular to this one.
    #[must_use]
    pub fn perpendicular_through(&self, through: Vec2) -> Self {
        Self {
            point: through,
            direction: left_normal(&self.direction),
        }
    }

    /// Returns `true` if the directions are parallel or anti-parallel.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Self, tolerance: f64) -> bool {
        cross_2d(&self.direction, &other.direction).abs() < tolerance
    }

    /// Returns `true` if both lines describe the same set of points.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tolerance: f64) -> bool {
        self.is_parallel_to(other, tolerance) && self.distance_to(&other.point) < tolerance
    }
}

/// A bounded line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment2D {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment2D {
    #[must_use]
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has zero length.
    pub fn direction(&self) -> Result<Vec2> {
        super::direction(&self.start, &self.end)
    }

    /// The infinite line carrying this segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has zero length.
    pub fn to_line(&self) -> Result<Line2D> {
        Line2D::new(self.start, self.end - self.start)
    }

    /// Segment translated by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_normalizes_direction() {
        let line = Line2D::new(Vec2::new(1.0, 1.0), Vec2::new(0.0, 5.0)).unwrap();
        assert_relative_eq!(line.direction.y, 1.0);
    }

    #[test]
    fn zero_direction_rejected() {
        assert!(Line2D::new(Vec2::zeros(), Vec2::zeros()).is_err());
    }

    #[test]
    fn projection_and_distance() {
        let line = Line2D::horizontal(Vec2::new(0.0, 10.0));
        let p = Vec2::new(42.0, 13.0);
        let foot = line.project(&p);
        assert_relative_eq!(foot.x, 42.0);
        assert_relative_eq!(foot.y, 10.0);
        assert_relative_eq!(line.distance_to(&p), 3.0);
    }

    #[test]
    fn perpendicular_is_orthogonal() {
        let line = Line2D::new(Vec2::zeros(), Vec2::new(1.0, 1.0)).unwrap();
        let perp = line.perpendicular_through(Vec2::new(3.0, 3.0));
        assert_relative_eq!(perp.direction.dot(&line.direction), 0.0, epsilon = 1e-12);
        assert_relative_eq!(perp.point.x, 3.0);
    }

    #[test]
    fn coincident_lines() {
        let a = Line2D::horizontal(Vec2::new(0.0, 2.0));
        let b = Line2D::new(Vec2::new(50.0, 2.0), Vec2::new(-1.0, 0.0)).unwrap();
        assert!(a.coincides_with(&b, 1e-9));
        assert!(!a.coincides_with(&Line2D::horizontal(Vec2::zeros()), 1e-9));
    }

    #[test]
    fn segment_basics() {
        let seg = LineSegment2D::new(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert_relative_eq!(seg.length(), 5.0);
        assert_eq!(seg.translated(Vec2::new(1.0, 1.0)).end, Vec2::new(4.0, 5.0));
        assert!(LineSegment2D::new(Vec2::zeros(), Vec2::zeros()).direction().is_err());
    }
}
