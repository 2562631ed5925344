use std::f64::consts::PI;

use tracing::warn;

use crate::math::intersect_2d::line_intersection;
use crate::math::{cross_2d, Line2D, Polygon2D, Vec2, LENGTH_TOLERANCE};
use crate::units::Angle;

use super::walls::{WallFaces, Winding};
use super::{
    ConstructionIssue, CornerConfig, CornerKind, PerimeterCorner, PerimeterElementId, WallConfig,
};

/// Sine of the largest angle between wall directions still treated as a
/// straight run (0.1°).
const COLINEAR_SINE: f64 = 0.001_745_328_365_898_309;

/// Smallest half-diagonal of a fallback corner shape, in millimeters.
const MIN_FALLBACK_HALF_SIZE: f64 = 1.0;

/// Resolves the corner between `prev` (ending at the corner) and `next`
/// (starting at it).
pub(super) fn resolve_corner(
    config: &CornerConfig,
    point: Vec2,
    prev: (&WallConfig, &WallFaces),
    next: (&WallConfig, &WallFaces),
    winding: Winding,
    issues: &mut Vec<ConstructionIssue>,
) -> PerimeterCorner {
    let (prev_config, prev_faces) = prev;
    let (next_config, next_faces) = next;
    let max_thickness = prev_faces.thickness.max(next_faces.thickness);

    let degenerate = |reason: &str, issues: &mut Vec<ConstructionIssue>| {
        warn!(corner = ?config.id, reason, "falling back to minimal corner shape");
        issues.push(ConstructionIssue::new(
            format!("Corner could not be resolved: {reason}"),
            vec![
                PerimeterElementId::Corner(config.id),
                PerimeterElementId::Wall(prev_config.id),
                PerimeterElementId::Wall(next_config.id),
            ],
        ));
        let outward = next_faces
            .outside_direction
            .or(prev_faces.outside_direction)
            .unwrap_or_else(Vec2::zeros);
        PerimeterCorner {
            id: config.id,
            inside_point: point,
            outside_point: point + outward * max_thickness.value(),
            belongs_to: config.belongs_to,
            interior_angle: Angle(PI),
            exterior_angle: Angle(PI),
            kind: CornerKind::Degenerate,
            polygon: fallback_polygon(point, max_thickness.value() / 2.0),
        }
    };

    let (Some(d_prev), Some(d_next)) = (prev_faces.direction, next_faces.direction) else {
        return degenerate("adjacent wall has zero length", issues);
    };

    let cross = cross_2d(&d_prev, &d_next);
    let dot = d_prev.dot(&d_next);

    let (kind, outside_point, interior) = if cross.abs() < COLINEAR_SINE {
        if dot < 0.0 {
            return degenerate("walls fold back onto each other", issues);
        }
        let outward = next_faces
            .outside_direction
            .unwrap_or_else(|| winding.outside_normal(&d_next));
        (
            CornerKind::Colinear,
            point + outward * max_thickness.value(),
            PI,
        )
    } else {
        let outside = Line2D {
            point: prev_faces.outside_line.start,
            direction: d_prev,
        };
        let other = Line2D {
            point: next_faces.outside_line.start,
            direction: d_next,
        };
        let Some(outside_point) = line_intersection(&outside, &other) else {
            return degenerate("outside faces do not intersect", issues);
        };
        let turn = cross.atan2(dot);
        let interior = PI - winding.sign() * turn;
        let kind = if interior < PI {
            CornerKind::Convex
        } else {
            CornerKind::Concave
        };
        (kind, outside_point, interior)
    };

    let polygon = miter_polygon(&[
        point,
        prev_faces.inside_line.end,
        prev_faces.outside_line.end,
        outside_point,
        next_faces.outside_line.start,
        next_faces.inside_line.start,
    ])
    .unwrap_or_else(|| fallback_polygon(point, max_thickness.value() / 2.0));

    PerimeterCorner {
        id: config.id,
        inside_point: point,
        outside_point,
        belongs_to: config.belongs_to,
        interior_angle: Angle(interior),
        exterior_angle: Angle(2.0 * PI - interior),
        kind,
        polygon,
    }
}

/// Clockwise joint outline through `points` with coincident vertices merged.
/// Inside face ends coincide with the corner point, so a right-angle joint of
/// equal walls collapses to its four distinct vertices. `None` when fewer than
/// three remain.
fn miter_polygon(points: &[Vec2]) -> Option<Polygon2D> {
    let polygon = Polygon2D::new(points.to_vec()).deduplicated(LENGTH_TOLERANCE);
    (polygon.len() >= 3).then(|| polygon.into_clockwise())
}

/// Clockwise diamond centered on `center`.
fn fallback_polygon(center: Vec2, half_size: f64) -> Polygon2D {
    let h = half_size.max(MIN_FALLBACK_HALF_SIZE);
    Polygon2D::new(vec![
        center + Vec2::new(0.0, h),
        center + Vec2::new(h, 0.0),
        center + Vec2::new(0.0, -h),
        center + Vec2::new(-h, 0.0),
    ])
}
