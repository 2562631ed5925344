use crate::math::Vec2;
use crate::units::Length;

use super::{CornerKind, CornerOwner, PerimeterCorner};

/// How far a wall's construction reaches past the ends of its inside line.
///
/// Positive values extend the wall into the corner, negative values cut it
/// back before the inside corner point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstructionExtent {
    pub start_extension: Length,
    pub end_extension: Length,
}

impl ConstructionExtent {
    /// Length of the construction along the wall direction.
    #[must_use]
    pub fn construction_length(&self, wall_length: Length) -> Length {
        wall_length + self.start_extension + self.end_extension
    }
}

/// Which end of a wall touches a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WallEnd {
    Start,
    End,
}

/// Extension of a wall at one of its corners.
///
/// Convex corners owned by the wall and concave corners not owned by it
/// cut the joint at the outer edge; every other combination cuts at the
/// inner edge.
pub(super) fn corner_extension(
    corner: &PerimeterCorner,
    wall_end: WallEnd,
    anchor: Vec2,
    direction: Vec2,
) -> Length {
    let owns = match wall_end {
        WallEnd::Start => corner.belongs_to == CornerOwner::Next,
        WallEnd::End => corner.belongs_to == CornerOwner::Previous,
    };
    let use_outer = match corner.kind {
        CornerKind::Convex => owns,
        CornerKind::Concave => !owns,
        CornerKind::Colinear | CornerKind::Degenerate => false,
    };
    let cut_point = if use_outer {
        corner.outside_point
    } else {
        corner.inside_point
    };

    let along = (cut_point - anchor).dot(&direction);
    match wall_end {
        WallEnd::Start => Length::mm(-along),
        WallEnd::End => Length::mm(along),
    }
}
