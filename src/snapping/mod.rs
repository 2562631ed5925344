//! Cursor snapping for the wall drawing tool.
//!
//! Called on every pointer move; pure and deterministic. Point snaps always
//! win over guide lines, and two active guide lines snap to their
//! intersection.

mod candidates;
mod context;

pub use candidates::GuideKind;
pub use context::{SnapPoint, SnappingContext};

use serde::{Deserialize, Serialize};

use crate::math::distance_2d::point_to_point_dist;
use crate::math::intersect_2d::line_intersection;
use crate::math::{Line2D, Vec2, TOLERANCE};
use crate::model::PointId;
use crate::units::Length;

/// Snapping tolerances, in world units (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub point_snap_distance: Length,
    pub line_snap_distance: Length,
    /// Snapped positions closer than this to the reference point are
    /// discarded, so a wall never collapses to zero length.
    pub min_distance: Length,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            point_snap_distance: Length::mm(200.0),
            line_snap_distance: Length::mm(100.0),
            min_distance: Length::mm(50.0),
        }
    }
}

impl SnapConfig {
    #[must_use]
    pub fn with_point_snap_distance(mut self, distance: Length) -> Self {
        self.point_snap_distance = distance;
        self
    }

    #[must_use]
    pub fn with_line_snap_distance(mut self, distance: Length) -> Self {
        self.line_snap_distance = distance;
        self
    }

    #[must_use]
    pub fn with_min_distance(mut self, distance: Length) -> Self {
        self.min_distance = distance;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    Point,
    Line(GuideKind),
    Intersection,
    /// Nothing in range; the raw cursor position.
    Free,
}

/// Outcome of one snapping query.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub position: Vec2,
    /// Guide lines to render, at most two.
    pub lines: Vec<Line2D>,
    pub point_id: Option<PointId>,
    pub kind: SnapKind,
}

impl SnapResult {
    #[must_use]
    pub fn free(position: Vec2) -> Self {
        Self {
            position,
            lines: Vec::new(),
            point_id: None,
            kind: SnapKind::Free,
        }
    }
}

/// Finds the best snap target for `cursor`, or `None` if nothing is within
/// tolerance.
#[must_use]
pub fn find_snap_result(
    cursor: Vec2,
    context: &SnappingContext,
    config: &SnapConfig,
) -> Option<SnapResult> {
    let too_close = |p: &Vec2| {
        context
            .reference_point
            .is_some_and(|r| point_to_point_dist(p, &r) < config.min_distance.value())
    };

    if let Some(result) = snap_to_point(&cursor, context, config, &too_close) {
        return Some(result);
    }

    let guides = candidates::active_guides(&cursor, context, config.line_snap_distance.value());
    for (i, primary) in guides.iter().enumerate() {
        let projected = primary.line.project(&cursor);
        if too_close(&projected) {
            continue;
        }

        let crossing = guides[i + 1..]
            .iter()
            .filter(|other| !primary.line.is_parallel_to(&other.line, TOLERANCE * 1e4))
            .find_map(|other| {
                let p = line_intersection(&primary.line, &other.line)?;
                let near = point_to_point_dist(&p, &cursor) <= config.point_snap_distance.value();
                (near && !too_close(&p)).then_some((p, other.line))
            });

        if let Some((position, other)) = crossing {
            return Some(SnapResult {
                position,
                lines: vec![primary.line, other],
                point_id: None,
                kind: SnapKind::Intersection,
            });
        }

        return Some(SnapResult {
            position: projected,
            lines: vec![primary.line],
            point_id: None,
            kind: SnapKind::Line(primary.kind),
        });
    }

    None
}

/// Like [`find_snap_result`], falling back to the raw cursor position.
#[must_use]
pub fn snap_position(cursor: Vec2, context: &SnappingContext, config: &SnapConfig) -> SnapResult {
    find_snap_result(cursor, context, config).unwrap_or_else(|| SnapResult::free(cursor))
}

/// Nearest existing point within tolerance; ties go to the earlier point.
fn snap_to_point(
    cursor: &Vec2,
    context: &SnappingContext,
    config: &SnapConfig,
    too_close: &impl Fn(&Vec2) -> bool,
) -> Option<SnapResult> {
    let mut best: Option<(&SnapPoint, f64)> = None;
    for point in &context.points {
        if context.reference_point_id == Some(point.id) || too_close(&point.position) {
            continue;
        }
        let d = point_to_point_dist(cursor, &point.position);
        if d > config.point_snap_distance.value() {
            continue;
        }
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((point, d));
        }
    }

    best.map(|(point, _)| SnapResult {
        position: point.position,
        lines: Vec::new(),
        point_id: Some(point.id),
        kind: SnapKind::Point,
    })
}
