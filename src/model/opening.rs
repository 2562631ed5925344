use serde::{Deserialize, Serialize};

use crate::units::Length;

use super::OpeningId;

/// Kind of wall opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpeningKind {
    Door,
    Window,
    Passage,
}

/// Construction system used for a wall body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructionType {
    #[default]
    Infill,
    Strawhenge,
    Modules,
    NonStrawbale,
}

/// An opening placed along a wall, measured from the wall's start.
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub id: OpeningId,
    pub kind: OpeningKind,
    pub offset_from_start: Length,
    pub width: Length,
    pub height: Length,
    pub sill_height: Option<Length>,
}

impl Opening {
    /// Offset of the opening's far edge along the wall.
    #[must_use]
    pub fn end(&self) -> Length {
        self.offset_from_start + self.width
    }

    /// Sill elevation; openings without a sill start at the floor.
    #[must_use]
    pub fn sill(&self) -> Length {
        self.sill_height.unwrap_or(Length::ZERO)
    }

    /// Elevation of the opening's top edge.
    #[must_use]
    pub fn header_height(&self) -> Length {
        self.sill() + self.height
    }
}

/// Parameters of a new opening, before the model assigns an id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningSpec {
    pub kind: OpeningKind,
    pub offset_from_start: Length,
    pub width: Length,
    pub height: Length,
    pub sill_height: Option<Length>,
}

impl OpeningSpec {
    #[must_use]
    pub fn door(offset_from_start: Length, width: Length, height: Length) -> Self {
        Self {
            kind: OpeningKind::Door,
            offset_from_start,
            width,
            height,
            sill_height: None,
        }
    }

    #[must_use]
    pub fn window(
        offset_from_start: Length,
        width: Length,
        height: Length,
        sill_height: Length,
    ) -> Self {
        Self {
            kind: OpeningKind::Window,
            offset_from_start,
            width,
            height,
            sill_height: Some(sill_height),
        }
    }

    /// Attaches an id, producing the stored opening.
    #[must_use]
    pub fn with_id(self, id: OpeningId) -> Opening {
        Opening {
            id,
            kind: self.kind,
            offset_from_start: self.offset_from_start,
            width: self.width,
            height: self.height,
            sill_height: self.sill_height,
        }
    }
}
