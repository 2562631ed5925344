pub mod opening;

pub use opening::{ConstructionType, Opening, OpeningKind, OpeningSpec};

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::error::{ModelError, Result};
use crate::math::{LineSegment2D, Vec2};
use crate::perimeter::{
    resolve_perimeter_geometry, CornerConfig, CornerOwner, PerimeterGeometry, WallConfig,
};
use crate::segmentation::segment_wall;
use crate::units::Length;

slotmap::new_key_type! {
    /// Unique identifier for a point on a floor.
    pub struct PointId;
    /// Unique identifier for a wall.
    pub struct WallId;
    /// Unique identifier for a perimeter corner.
    pub struct CornerId;
    /// Unique identifier for a perimeter.
    pub struct PerimeterId;
    /// Unique identifier for a wall opening.
    pub struct OpeningId;
}

#[derive(Debug, Clone)]
pub struct PointData {
    pub position: Vec2,
}

#[derive(Debug, Clone)]
pub struct WallData {
    pub start: PointId,
    pub end: PointId,
    pub thickness: Length,
    pub construction_type: ConstructionType,
    pub openings: Vec<OpeningId>,
}

#[derive(Debug, Clone)]
pub struct CornerData {
    pub point: PointId,
    pub belongs_to: CornerOwner,
}

/// Ordered corners and walls of a closed perimeter. Wall `i` runs from
/// corner `i` to corner `i + 1`.
#[derive(Debug, Clone)]
pub struct PerimeterData {
    pub corners: Vec<CornerId>,
    pub walls: Vec<WallId>,
}

/// Immutable inputs of the perimeter resolver gathered from the model.
#[derive(Debug, Clone)]
pub struct PerimeterSnapshot {
    pub boundary: Vec<Vec2>,
    pub walls: Vec<WallConfig>,
    pub corners: Vec<CornerConfig>,
}

/// Arena holding the wall, point and opening records of one floor.
///
/// Kernel functions never read it directly; callers take snapshots
/// ([`FloorModel::perimeter_snapshot`], `SnappingContext::from_model`) and
/// pass those in.
#[derive(Debug, Default)]
pub struct FloorModel {
    points: SlotMap<PointId, PointData>,
    walls: SlotMap<WallId, WallData>,
    corners: SlotMap<CornerId, CornerData>,
    perimeters: SlotMap<PerimeterId, PerimeterData>,
    openings: SlotMap<OpeningId, (WallId, OpeningSpec)>,
}

impl FloorModel {
    /// Creates a new, empty floor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Point operations ---

    /// Inserts a point and returns its ID.
    pub fn add_point(&mut self, position: Vec2) -> PointId {
        self.points.insert(PointData { position })
    }

    /// Returns the point data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn point(&self, id: PointId) -> std::result::Result<&PointData, ModelError> {
        self.points
            .get(id)
            .ok_or(ModelError::EntityNotFound("point"))
    }

    /// Moves a point. Walls referencing it follow.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not found, or if the move would
    /// shorten a wall below the end of one of its openings.
    pub fn move_point(&mut self, id: PointId, position: Vec2) -> Result<()> {
        let previous = self.point(id)?.position;
        self.set_point_position(id, position)?;

        let affected = self.walls_at_point(id);
        for wall in affected {
            if let Err(err) = self.validate_wall_openings(wall, &[]) {
                warn!(?wall, %err, "point move rejected");
                self.set_point_position(id, previous)?;
                return Err(err);
            }
        }
        Ok(())
    }

    fn set_point_position(&mut self, id: PointId, position: Vec2) -> Result<()> {
        self.points
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("point"))?
            .position = position;
        Ok(())
    }

    /// Iterates points in insertion order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &PointData)> {
        self.points.iter()
    }

    // --- Wall operations ---

    /// Inserts a wall between two existing points.
    ///
    /// # Errors
    ///
    /// Returns an error if either point is missing, if both ends are the
    /// same point, or if the thickness is not positive.
    pub fn add_wall(
        &mut self,
        start: PointId,
        end: PointId,
        thickness: Length,
        construction_type: ConstructionType,
    ) -> Result<WallId> {
        self.point(start)?;
        self.point(end)?;
        if start == end {
            return Err(ModelError::InvalidInput("wall start and end are the same point".into()).into());
        }
        check_thickness(thickness)?;
        Ok(self.walls.insert(WallData {
            start,
            end,
            thickness,
            construction_type,
            openings: Vec::new(),
        }))
    }

    /// Returns the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn wall(&self, id: WallId) -> std::result::Result<&WallData, ModelError> {
        self.walls.get(id).ok_or(ModelError::EntityNotFound("wall"))
    }

    /// Centerline segment of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of its points is missing.
    pub fn wall_segment(&self, id: WallId) -> Result<LineSegment2D> {
        let wall = self.wall(id)?;
        Ok(LineSegment2D::new(
            self.point(wall.start)?.position,
            self.point(wall.end)?.position,
        ))
    }

    /// Length of a wall between its two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of its points is missing.
    pub fn wall_length(&self, id: WallId) -> Result<Length> {
        Ok(Length::mm(self.wall_segment(id)?.length()))
    }

    /// Walls with `point` as one of their ends, in insertion order.
    #[must_use]
    pub fn walls_at_point(&self, point: PointId) -> Vec<WallId> {
        self.walls
            .iter()
            .filter(|(_, w)| w.start == point || w.end == point)
            .map(|(id, _)| id)
            .collect()
    }

    /// Changes a wall's thickness.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing or the thickness is not positive.
    pub fn set_wall_thickness(&mut self, id: WallId, thickness: Length) -> Result<()> {
        check_thickness(thickness)?;
        self.walls
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("wall"))?
            .thickness = thickness;
        Ok(())
    }

    // --- Opening operations ---

    /// Adds an opening to a wall after validating the wall's full opening
    /// list.
    ///
    /// # Errors
    ///
    /// Returns a segmentation error if the opening overflows the wall or
    /// overlaps another opening; the model is left unchanged.
    pub fn add_opening(&mut self, wall: WallId, spec: OpeningSpec) -> Result<OpeningId> {
        self.validate_wall_openings(wall, &[spec]).inspect_err(|err| {
            warn!(?wall, %err, "opening rejected");
        })?;

        let id = self.openings.insert((wall, spec));
        self.walls
            .get_mut(wall)
            .ok_or(ModelError::EntityNotFound("wall"))?
            .openings
            .push(id);
        debug!(?wall, ?id, "opening added");
        Ok(id)
    }

    /// Removes an opening from its wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening is not found.
    pub fn remove_opening(&mut self, id: OpeningId) -> Result<()> {
        let (wall, _) = self
            .openings
            .remove(id)
            .ok_or(ModelError::EntityNotFound("opening"))?;
        if let Some(data) = self.walls.get_mut(wall) {
            data.openings.retain(|o| *o != id);
        }
        Ok(())
    }

    /// Openings of a wall in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn openings_of(&self, wall: WallId) -> Result<Vec<Opening>> {
        let data = self.wall(wall)?;
        data.openings
            .iter()
            .map(|id| {
                self.openings
                    .get(*id)
                    .map(|(_, spec)| spec.with_id(*id))
                    .ok_or_else(|| ModelError::EntityNotFound("opening").into())
            })
            .collect()
    }

    fn validate_wall_openings(&self, wall: WallId, extra: &[OpeningSpec]) -> Result<()> {
        let data = self.wall(wall)?;
        let mut openings = self.openings_of(wall)?;
        openings.extend(extra.iter().map(|spec| spec.with_id(OpeningId::default())));
        segment_wall(self.wall_length(wall)?, &openings, data.construction_type)?;
        Ok(())
    }

    // --- Perimeter operations ---

    /// Creates a closed perimeter from boundary points, one wall per edge.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidWallCount` for fewer than 3 points, or an
    /// error if the thickness is not positive.
    pub fn add_perimeter(
        &mut self,
        boundary: &[Vec2],
        thickness: Length,
        construction_type: ConstructionType,
    ) -> Result<PerimeterId> {
        if boundary.len() < 3 {
            return Err(ModelError::InvalidWallCount(boundary.len()).into());
        }
        check_thickness(thickness)?;

        let points: Vec<PointId> = boundary.iter().map(|p| self.add_point(*p)).collect();
        let corners = points
            .iter()
            .map(|point| {
                self.corners.insert(CornerData {
                    point: *point,
                    belongs_to: CornerOwner::default(),
                })
            })
            .collect();
        let n = points.len();
        let walls = (0..n)
            .map(|i| {
                self.walls.insert(WallData {
                    start: points[i],
                    end: points[(i + 1) % n],
                    thickness,
                    construction_type,
                    openings: Vec::new(),
                })
            })
            .collect();

        let id = self.perimeters.insert(PerimeterData { corners, walls });
        debug!(?id, walls = n, "perimeter added");
        Ok(id)
    }

    /// Returns the perimeter data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn perimeter(&self, id: PerimeterId) -> std::result::Result<&PerimeterData, ModelError> {
        self.perimeters
            .get(id)
            .ok_or(ModelError::EntityNotFound("perimeter"))
    }

    /// Sets which adjacent wall constructs a corner.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner is not found.
    pub fn set_corner_owner(&mut self, id: CornerId, owner: CornerOwner) -> Result<()> {
        self.corners
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("corner"))?
            .belongs_to = owner;
        Ok(())
    }

    /// Collects the resolver inputs for a perimeter.
    ///
    /// # Errors
    ///
    /// Returns an error if the perimeter or any referenced entity is missing.
    pub fn perimeter_snapshot(&self, id: PerimeterId) -> Result<PerimeterSnapshot> {
        let perimeter = self.perimeter(id)?;

        let mut boundary = Vec::with_capacity(perimeter.corners.len());
        let mut corners = Vec::with_capacity(perimeter.corners.len());
        for corner_id in &perimeter.corners {
            let corner = self
                .corners
                .get(*corner_id)
                .ok_or(ModelError::EntityNotFound("corner"))?;
            boundary.push(self.point(corner.point)?.position);
            corners.push(CornerConfig {
                id: *corner_id,
                belongs_to: corner.belongs_to,
            });
        }

        let walls = perimeter
            .walls
            .iter()
            .map(|wall_id| {
                let wall = self.wall(*wall_id)?;
                Ok(WallConfig {
                    id: *wall_id,
                    thickness: wall.thickness,
                    construction_type: wall.construction_type,
                    openings: self.openings_of(*wall_id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PerimeterSnapshot {
            boundary,
            walls,
            corners,
        })
    }

    /// Snapshots a perimeter and resolves its geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be taken. Geometric problems
    /// are reported as issues in the result instead.
    pub fn resolve_perimeter(&self, id: PerimeterId) -> Result<PerimeterGeometry> {
        let snapshot = self.perimeter_snapshot(id)?;
        Ok(resolve_perimeter_geometry(
            &snapshot.boundary,
            &snapshot.walls,
            &snapshot.corners,
        ))
    }
}

fn check_thickness(thickness: Length) -> std::result::Result<(), ModelError> {
    if thickness.value() > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidInput(format!(
            "wall thickness must be positive, got {thickness}"
        )))
    }
}
