//! Wall face and corner geometry of a closed perimeter.
//!
//! The boundary polygon is the inside face of the walls. Every wall is
//! offset outward by its thickness, and the joint between two consecutive
//! walls is filled by a miter polygon. Corner ownership decides which of the
//! two walls' construction runs through the joint.

mod corner;
mod extent;
mod walls;

pub use extent::ConstructionExtent;

use tracing::{debug, warn};

use crate::math::{LineSegment2D, Polygon2D, Vec2};
use crate::model::{ConstructionType, CornerId, Opening, WallId};
use crate::units::{Angle, Length};

use extent::{corner_extension, WallEnd};
use walls::Winding;

/// Which adjacent wall's construction owns (extends into) a corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CornerOwner {
    Previous,
    #[default]
    Next,
}

/// Per-wall input of the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct WallConfig {
    pub id: WallId,
    pub thickness: Length,
    pub construction_type: ConstructionType,
    pub openings: Vec<Opening>,
}

/// Per-corner input of the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerConfig {
    pub id: CornerId,
    pub belongs_to: CornerOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerKind {
    /// Interior angle below 180°.
    Convex,
    /// Interior angle above 180°.
    Concave,
    /// Straight run between two walls.
    Colinear,
    /// Could not be resolved; the polygon is a fallback shape.
    Degenerate,
}

/// A resolved wall of a perimeter.
#[derive(Debug, Clone)]
pub struct PerimeterWall {
    pub id: WallId,
    pub thickness: Length,
    pub construction_type: ConstructionType,
    pub openings: Vec<Opening>,
    pub inside_line: LineSegment2D,
    pub outside_line: LineSegment2D,
    /// Unit direction from start to end; zero for zero-length walls.
    pub direction: Vec2,
    /// Unit normal pointing away from the enclosed area; zero for
    /// zero-length walls.
    pub outside_direction: Vec2,
    pub wall_length: Length,
    pub construction_extent: ConstructionExtent,
}

impl PerimeterWall {
    /// Length of the wall's construction including corner extensions.
    #[must_use]
    pub fn construction_length(&self) -> Length {
        self.construction_extent.construction_length(self.wall_length)
    }
}

/// A resolved corner between two consecutive walls.
#[derive(Debug, Clone)]
pub struct PerimeterCorner {
    pub id: CornerId,
    pub inside_point: Vec2,
    pub outside_point: Vec2,
    pub belongs_to: CornerOwner,
    pub interior_angle: Angle,
    pub exterior_angle: Angle,
    pub kind: CornerKind,
    /// Miter polygon filling the joint, clockwise, at least 3 points.
    pub polygon: Polygon2D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerimeterElementId {
    Wall(WallId),
    Corner(CornerId),
}

/// A problem found while resolving a perimeter. Resolution still produces
/// drawable geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionIssue {
    pub description: String,
    pub element_ids: Vec<PerimeterElementId>,
}

impl ConstructionIssue {
    #[must_use]
    pub fn new(description: impl Into<String>, element_ids: Vec<PerimeterElementId>) -> Self {
        Self {
            description: description.into(),
            element_ids,
        }
    }
}

/// Result of [`resolve_perimeter_geometry`].
#[derive(Debug, Clone, Default)]
pub struct PerimeterGeometry {
    pub walls: Vec<PerimeterWall>,
    /// `corners[i]` sits at the start of `walls[i]`.
    pub corners: Vec<PerimeterCorner>,
    pub issues: Vec<ConstructionIssue>,
}

/// Resolves wall faces and corners of a closed perimeter.
///
/// Wall `i` runs from `boundary[i]` to `boundary[i + 1]` (cyclic) and is
/// configured by `walls[i]`; corner `i` sits at `boundary[i]` and is
/// configured by `corners[i]`. Never fails: malformed input is reported in
/// [`PerimeterGeometry::issues`] and the remaining geometry is resolved on a
/// best-effort basis.
#[must_use]
pub fn resolve_perimeter_geometry(
    boundary: &[Vec2],
    walls: &[WallConfig],
    corners: &[CornerConfig],
) -> PerimeterGeometry {
    let n = boundary.len();
    let mut issues = Vec::new();

    if walls.len() != n || corners.len() != n {
        let ids = walls
            .iter()
            .map(|w| PerimeterElementId::Wall(w.id))
            .chain(corners.iter().map(|c| PerimeterElementId::Corner(c.id)))
            .collect();
        warn!(
            points = n,
            walls = walls.len(),
            corners = corners.len(),
            "perimeter inputs disagree in length"
        );
        issues.push(ConstructionIssue::new(
            format!(
                "Perimeter has {n} boundary points but {} walls and {} corners",
                walls.len(),
                corners.len()
            ),
            ids,
        ));
        return PerimeterGeometry {
            issues,
            ..PerimeterGeometry::default()
        };
    }
    if n == 0 {
        return PerimeterGeometry::default();
    }
    if n < 3 {
        issues.push(ConstructionIssue::new(
            format!("Perimeter needs at least 3 walls, got {n}"),
            walls.iter().map(|w| PerimeterElementId::Wall(w.id)).collect(),
        ));
    }

    let winding = Winding::of(boundary).unwrap_or_else(|| {
        if n >= 3 {
            issues.push(ConstructionIssue::new(
                "Perimeter boundary encloses no area",
                walls.iter().map(|w| PerimeterElementId::Wall(w.id)).collect(),
            ));
        }
        Winding::CounterClockwise
    });

    let faces = walls::build_faces(boundary, walls, winding, &mut issues);

    let resolved_corners: Vec<PerimeterCorner> = (0..n)
        .map(|i| {
            let prev = (i + n - 1) % n;
            corner::resolve_corner(
                &corners[i],
                boundary[i],
                (&walls[prev], &faces[prev]),
                (&walls[i], &faces[i]),
                winding,
                &mut issues,
            )
        })
        .collect();

    let resolved_walls = walls
        .iter()
        .zip(&faces)
        .enumerate()
        .map(|(i, (config, face))| {
            let direction = face.direction.unwrap_or_else(Vec2::zeros);
            let construction_extent = ConstructionExtent {
                start_extension: corner_extension(
                    &resolved_corners[i],
                    WallEnd::Start,
                    face.inside_line.start,
                    direction,
                ),
                end_extension: corner_extension(
                    &resolved_corners[(i + 1) % n],
                    WallEnd::End,
                    face.inside_line.end,
                    direction,
                ),
            };
            PerimeterWall {
                id: config.id,
                thickness: config.thickness,
                construction_type: config.construction_type,
                openings: config.openings.clone(),
                inside_line: face.inside_line,
                outside_line: face.outside_line,
                direction,
                outside_direction: face.outside_direction.unwrap_or_else(Vec2::zeros),
                wall_length: Length::mm(face.inside_line.length()),
                construction_extent,
            }
        })
        .collect();

    debug!(walls = n, issues = issues.len(), "perimeter geometry resolved");

    PerimeterGeometry {
        walls: resolved_walls,
        corners: resolved_corners,
        issues,
    }
}
