pub mod distance_2d;
pub mod intersect_2d;
pub mod line_2d;
pub mod polygon_2d;

pub use line_2d::{Line2D, LineSegment2D};
pub use polygon_2d::Polygon2D;

use crate::error::{GeometryError, Result};

/// 2D vector type. Points and directions share it.
pub type Vec2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for comparisons of millimeter lengths.
pub const LENGTH_TOLERANCE: f64 = 1e-3;

/// Z component of the 3D cross product of two planar vectors.
#[must_use]
pub fn cross_2d(a: &Vec2, b: &Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vec2) -> Vec2 {
    Vec2::new(-dir.y, dir.x)
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the points coincide.
pub fn direction(a: &Vec2, b: &Vec2) -> Result<Vec2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "zero-length segment at ({}, {})",
            a.x, a.y
        ))
        .into());
    }
    Ok(d / len)
}
