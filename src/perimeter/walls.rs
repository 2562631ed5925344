use crate::math::polygon_2d::signed_area_2d;
use crate::math::{direction, left_normal, LineSegment2D, Vec2, TOLERANCE};
use crate::units::Length;

use super::{ConstructionIssue, PerimeterElementId, WallConfig};

/// Face geometry of one wall before corner resolution.
#[derive(Debug, Clone)]
pub(super) struct WallFaces {
    pub inside_line: LineSegment2D,
    pub outside_line: LineSegment2D,
    /// `None` for zero-length walls.
    pub direction: Option<Vec2>,
    pub outside_direction: Option<Vec2>,
    pub thickness: Length,
}

/// Winding of the boundary polygon, which fixes the outside side of walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    pub fn of(boundary: &[Vec2]) -> Option<Self> {
        let area = signed_area_2d(boundary);
        if area.abs() < TOLERANCE {
            None
        } else if area < 0.0 {
            Some(Self::Clockwise)
        } else {
            Some(Self::CounterClockwise)
        }
    }

    /// `+1` for counter-clockwise, `-1` for clockwise.
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }

    /// Outward normal for a wall running along `dir`.
    ///
    /// For a clockwise boundary the interior is on the right, so the outside
    /// is the left normal; counter-clockwise is the mirror case.
    pub fn outside_normal(self, dir: &Vec2) -> Vec2 {
        match self {
            Self::Clockwise => left_normal(dir),
            Self::CounterClockwise => -left_normal(dir),
        }
    }
}

/// Computes inside and outside face lines of every wall.
pub(super) fn build_faces(
    boundary: &[Vec2],
    configs: &[WallConfig],
    winding: Winding,
    issues: &mut Vec<ConstructionIssue>,
) -> Vec<WallFaces> {
    let n = boundary.len();
    configs
        .iter()
        .enumerate()
        .map(|(i, config)| {
            let inside_line = LineSegment2D::new(boundary[i], boundary[(i + 1) % n]);
            match direction(&inside_line.start, &inside_line.end) {
                Ok(dir) => {
                    let outside = winding.outside_normal(&dir);
                    WallFaces {
                        inside_line,
                        outside_line: inside_line.translated(outside * config.thickness.value()),
                        direction: Some(dir),
                        outside_direction: Some(outside),
                        thickness: config.thickness,
                    }
                }
                Err(_) => {
                    issues.push(ConstructionIssue::new(
                        format!(
                            "Wall {} has zero length at ({}, {})",
                            i, inside_line.start.x, inside_line.start.y
                        ),
                        vec![PerimeterElementId::Wall(config.id)],
                    ));
                    WallFaces {
                        inside_line,
                        outside_line: inside_line,
                        direction: None,
                        outside_direction: None,
                        thickness: config.thickness,
                    }
                }
            }
        })
        .collect()
}
