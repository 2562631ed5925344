use crate::error::SegmentationError;
use crate::math::Vec2;
use crate::model::{Opening, WallId};
use crate::perimeter::PerimeterWall;
use crate::units::Length;

use super::opening_groups::{group_openings, WallSegment3D};
use super::{segment_wall, ConstructionSegment};

/// Segments of a perimeter wall in construction coordinates.
///
/// Position `0` is where the wall's construction begins, which differs from
/// the inside line's start by the corner extension.
#[derive(Debug, Clone, PartialEq)]
pub struct WallConstructionPlan {
    pub wall_id: WallId,
    /// Point on the inside face where construction begins.
    pub origin: Vec2,
    pub direction: Vec2,
    pub construction_length: Length,
    pub start_extension: Length,
    pub segments: Vec<ConstructionSegment>,
    pub segments_3d: Vec<WallSegment3D>,
}

/// Builds the construction plan of a resolved perimeter wall.
///
/// Openings keep their place relative to the inside line and are shifted by
/// the start extension.
///
/// # Errors
///
/// Fails if an opening falls outside the construction range, e.g. when a
/// corner cut reaches into it, or if openings overlap.
pub fn build_wall_construction_plan(
    wall: &PerimeterWall,
) -> Result<WallConstructionPlan, SegmentationError> {
    let start_extension = wall.construction_extent.start_extension;
    let construction_length = wall.construction_length();

    let shifted: Vec<Opening> = wall
        .openings
        .iter()
        .map(|o| Opening {
            offset_from_start: o.offset_from_start + start_extension,
            ..o.clone()
        })
        .collect();

    let segments = segment_wall(construction_length, &shifted, wall.construction_type)?;
    let segments_3d = group_openings(&segments);

    Ok(WallConstructionPlan {
        wall_id: wall.id,
        origin: wall.inside_line.start - wall.direction * start_extension.value(),
        direction: wall.direction,
        construction_length,
        start_extension,
        segments,
        segments_3d,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ConstructionType, FloorModel, OpeningSpec};
    use approx::assert_relative_eq;

    fn model_with_door(offset: f64) -> (FloorModel, crate::model::PerimeterId) {
        let mut model = FloorModel::new();
        let id = model
            .add_perimeter(
                &[
                    Vec2::new(0.0, 0.0),
                    Vec2::new(5000.0, 0.0),
                    Vec2::new(5000.0, 4000.0),
                    Vec2::new(0.0, 4000.0),
                ],
                Length::mm(400.0),
                ConstructionType::Infill,
            )
            .unwrap();
        let wall = model.perimeter(id).unwrap().walls[0];
        model
            .add_opening(
                wall,
                OpeningSpec::door(Length::mm(offset), Length::mm(900.0), Length::mm(2100.0)),
            )
            .unwrap();
        (model, id)
    }

    #[test]
    fn plan_shifts_openings_by_corner_extension() {
        let (model, id) = model_with_door(2000.0);
        let geometry = model.resolve_perimeter(id).unwrap();
        let plan = build_wall_construction_plan(&geometry.walls[0]).unwrap();

        assert_relative_eq!(plan.construction_length.value(), 5400.0, epsilon = 1e-9);
        assert_relative_eq!(plan.origin.x, -400.0, epsilon = 1e-9);
        let door = plan.segments.iter().find(|s| s.is_opening()).unwrap();
        assert_relative_eq!(door.position().value(), 2400.0, epsilon = 1e-9);
        let total: f64 = plan.segments.iter().map(|s| s.width().value()).sum();
        assert_relative_eq!(total, 5400.0, epsilon = 1e-9);
        assert_eq!(plan.segments_3d.len(), 3);
    }

    #[test]
    fn corner_cut_into_opening_fails() {
        let (model, id) = model_with_door(0.0);
        let mut geometry = model.resolve_perimeter(id).unwrap();
        let wall = &mut geometry.walls[0];
        wall.construction_extent.start_extension = Length::mm(-300.0);
        let err = build_wall_construction_plan(wall).unwrap_err();
        assert!(matches!(err, SegmentationError::NegativeOffset { .. }));
    }
}
