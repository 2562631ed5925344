use crate::error::Result;
use crate::math::{LineSegment2D, Vec2};
use crate::model::{FloorModel, PointId};

/// An existing point the cursor may lock onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub id: PointId,
    pub position: Vec2,
}

/// Everything the snapping engine looks at for one pointer event.
///
/// `points` order is significant: equally distant points resolve to the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnappingContext {
    pub points: Vec<SnapPoint>,
    /// Point the wall being drawn starts from, if any.
    pub reference_point: Option<Vec2>,
    pub reference_point_id: Option<PointId>,
    /// Walls incident to the reference point.
    pub reference_segments: Vec<LineSegment2D>,
}

impl SnappingContext {
    /// Context with free points only, for placing a first point.
    #[must_use]
    pub fn new(points: Vec<SnapPoint>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Sets the reference point and its incident wall segments.
    #[must_use]
    pub fn with_reference(mut self, point: Vec2, segments: Vec<LineSegment2D>) -> Self {
        self.reference_point = Some(point);
        self.reference_segments = segments;
        self
    }

    /// Snapshots the points of a floor and, when drawing from an existing
    /// point, the walls meeting at it.
    ///
    /// # Errors
    ///
    /// Returns an error if `reference` or one of its walls is not in the model.
    pub fn from_model(model: &FloorModel, reference: Option<PointId>) -> Result<Self> {
        let points = model
            .points()
            .map(|(id, data)| SnapPoint {
                id,
                position: data.position,
            })
            .collect();

        let mut context = Self::new(points);
        if let Some(reference) = reference {
            let position = model.point(reference)?.position;
            let segments = model
                .walls_at_point(reference)
                .into_iter()
                .map(|wall| model.wall_segment(wall))
                .collect::<Result<Vec<_>>>()?;
            context = context.with_reference(position, segments);
            context.reference_point_id = Some(reference);
        }
        Ok(context)
    }
}
