use crate::math::{Line2D, Vec2, TOLERANCE};

use super::SnappingContext;

/// Origin of a guide line, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GuideKind {
    /// Horizontal or vertical line through the reference point.
    Axis,
    /// Continuation of a wall meeting at the reference point.
    Extension,
    /// Line through the reference point square to a wall meeting there.
    Perpendicular,
    /// Horizontal or vertical line through another existing point.
    Alignment,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Guide {
    pub kind: GuideKind,
    pub line: Line2D,
    pub distance: f64,
}

/// Guide lines within `max_distance` of `cursor`, ordered by kind and then
/// distance, with coincident lines removed.
pub(super) fn active_guides(cursor: &Vec2, context: &SnappingContext, max_distance: f64) -> Vec<Guide> {
    let mut guides: Vec<Guide> = Vec::new();
    let mut consider = |kind: GuideKind, line: Line2D| {
        let distance = line.distance_to(cursor);
        if distance <= max_distance {
            guides.push(Guide {
                kind,
                line,
                distance,
            });
        }
    };

    if let Some(reference) = context.reference_point {
        consider(GuideKind::Axis, Line2D::horizontal(reference));
        consider(GuideKind::Axis, Line2D::vertical(reference));

        let wall_lines: Vec<Line2D> = context
            .reference_segments
            .iter()
            .filter_map(|segment| segment.to_line().ok())
            .collect();
        for line in &wall_lines {
            consider(GuideKind::Extension, *line);
        }
        for line in &wall_lines {
            consider(GuideKind::Perpendicular, line.perpendicular_through(reference));
        }
    }

    for point in &context.points {
        if context.reference_point_id == Some(point.id) {
            continue;
        }
        consider(GuideKind::Alignment, Line2D::horizontal(point.position));
        consider(GuideKind::Alignment, Line2D::vertical(point.position));
    }

    // Stable: equal kind and distance keep generation order.
    guides.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then(a.distance.total_cmp(&b.distance))
    });

    let mut unique: Vec<Guide> = Vec::with_capacity(guides.len());
    for guide in guides {
        let duplicate = unique
            .iter()
            .any(|u| u.line.coincides_with(&guide.line, TOLERANCE * 1e4));
        if !duplicate {
            unique.push(guide);
        }
    }
    unique
}
