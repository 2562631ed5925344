//! Segmentation of a wall into wall-body and opening segments.

mod opening_groups;
mod plan;

pub use opening_groups::{group_openings, segment_wall_3d, OpeningGroup, WallSegment3D};
pub use plan::{build_wall_construction_plan, WallConstructionPlan};

use std::cmp::Ordering;

use crate::error::SegmentationError;
use crate::math::LENGTH_TOLERANCE;
use crate::model::{ConstructionType, Opening};
use crate::units::Length;

/// A contiguous piece of a wall, measured along the wall from its start.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionSegment {
    Wall {
        position: Length,
        width: Length,
        construction_type: ConstructionType,
    },
    Opening {
        position: Length,
        width: Length,
        opening: Opening,
    },
}

impl ConstructionSegment {
    #[must_use]
    pub fn position(&self) -> Length {
        match self {
            Self::Wall { position, .. } | Self::Opening { position, .. } => *position,
        }
    }

    #[must_use]
    pub fn width(&self) -> Length {
        match self {
            Self::Wall { width, .. } | Self::Opening { width, .. } => *width,
        }
    }

    #[must_use]
    pub fn end(&self) -> Length {
        self.position() + self.width()
    }

    #[must_use]
    pub fn is_opening(&self) -> bool {
        matches!(self, Self::Opening { .. })
    }
}

/// Splits a wall of `wall_length` into wall-body and opening segments.
///
/// Openings may be given in any order. The returned segments are ordered,
/// contiguous and cover `[0, wall_length]`. Zero-width gaps produce no wall
/// segment; zero-width openings are kept.
///
/// # Errors
///
/// Fails on the first opening (in offset order) that starts before the wall,
/// ends beyond `wall_length`, or starts before the previous opening ends.
pub fn segment_wall(
    wall_length: Length,
    openings: &[Opening],
    construction_type: ConstructionType,
) -> Result<Vec<ConstructionSegment>, SegmentationError> {
    let mut sorted: Vec<&Opening> = openings.iter().collect();
    sorted.sort_by(|a, b| {
        a.offset_from_start
            .partial_cmp(&b.offset_from_start)
            .unwrap_or(Ordering::Equal)
    });

    let mut segments = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut cursor = Length::ZERO;

    for opening in sorted {
        let start = opening.offset_from_start;
        let end = opening.end();

        if start.value() < -LENGTH_TOLERANCE {
            return Err(SegmentationError::NegativeOffset { offset: start });
        }
        if end.value() > wall_length.value() + LENGTH_TOLERANCE {
            return Err(SegmentationError::ExtendsBeyondWall {
                opening_end: end,
                wall_length,
            });
        }
        if start.value() < cursor.value() - LENGTH_TOLERANCE {
            return Err(SegmentationError::OverlapsPrevious {
                opening_start: start,
                previous_end: cursor,
            });
        }

        let gap = start - cursor;
        if gap.value() > LENGTH_TOLERANCE {
            segments.push(ConstructionSegment::Wall {
                position: cursor,
                width: gap,
                construction_type,
            });
        }
        segments.push(ConstructionSegment::Opening {
            position: start,
            width: opening.width,
            opening: opening.clone(),
        });
        cursor = end;
    }

    let rest = wall_length - cursor;
    if rest.value() > LENGTH_TOLERANCE {
        segments.push(ConstructionSegment::Wall {
            position: cursor,
            width: rest,
            construction_type,
        });
    }

    Ok(segments)
}
