use crate::error::SegmentationError;
use crate::math::LENGTH_TOLERANCE;
use crate::model::{ConstructionType, Opening};
use crate::units::Length;

use super::{segment_wall, ConstructionSegment};

/// Adjacent openings sharing sill and header elevation, framed as one.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningGroup {
    pub position: Length,
    pub width: Length,
    pub sill_height: Length,
    pub header_height: Length,
    pub openings: Vec<Opening>,
}

impl OpeningGroup {
    fn from_opening(position: Length, width: Length, opening: &Opening) -> Self {
        Self {
            position,
            width,
            sill_height: opening.sill(),
            header_height: opening.header_height(),
            openings: vec![opening.clone()],
        }
    }

    fn end(&self) -> Length {
        self.position + self.width
    }

    fn accepts(&self, position: Length, opening: &Opening) -> bool {
        self.end().approx_eq(position, LENGTH_TOLERANCE)
            && self.sill_height.approx_eq(opening.sill(), LENGTH_TOLERANCE)
            && self.header_height.approx_eq(opening.header_height(), LENGTH_TOLERANCE)
    }
}

/// Segment of a wall for 3D construction.
#[derive(Debug, Clone, PartialEq)]
pub enum WallSegment3D {
    Wall {
        position: Length,
        width: Length,
        construction_type: ConstructionType,
    },
    Openings(OpeningGroup),
}

impl WallSegment3D {
    #[must_use]
    pub fn position(&self) -> Length {
        match self {
            Self::Wall { position, .. } => *position,
            Self::Openings(group) => group.position,
        }
    }

    #[must_use]
    pub fn width(&self) -> Length {
        match self {
            Self::Wall { width, .. } => *width,
            Self::Openings(group) => group.width,
        }
    }
}

/// Merges runs of touching openings with identical sill and header heights
/// into single groups. Wall segments pass through unchanged.
#[must_use]
pub fn group_openings(segments: &[ConstructionSegment]) -> Vec<WallSegment3D> {
    let mut result: Vec<WallSegment3D> = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            ConstructionSegment::Wall {
                position,
                width,
                construction_type,
            } => result.push(WallSegment3D::Wall {
                position: *position,
                width: *width,
                construction_type: *construction_type,
            }),
            ConstructionSegment::Opening {
                position,
                width,
                opening,
            } => {
                if let Some(WallSegment3D::Openings(group)) = result.last_mut() {
                    if group.accepts(*position, opening) {
                        group.width = *position + *width - group.position;
                        group.openings.push(opening.clone());
                        continue;
                    }
                }
                result.push(WallSegment3D::Openings(OpeningGroup::from_opening(
                    *position, *width, opening,
                )));
            }
        }
    }
    result
}

/// [`segment_wall`] followed by [`group_openings`].
///
/// # Errors
///
/// Same failures as [`segment_wall`].
pub fn segment_wall_3d(
    wall_length: Length,
    openings: &[Opening],
    construction_type: ConstructionType,
) -> Result<Vec<WallSegment3D>, SegmentationError> {
    let segments = segment_wall(wall_length, openings, construction_type)?;
    Ok(group_openings(&segments))
}
