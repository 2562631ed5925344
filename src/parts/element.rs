use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{Polygon2D, Vec3};
use crate::units::{Length, Volume};

/// Identifier of a material in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub String);

impl MaterialId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form element tag. Groups pass their tags down to all descendants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub String);

impl Tag {
    pub const FULL_BALE: &'static str = "straw-full-bale";
    pub const PARTIAL_BALE: &'static str = "straw-partial-bale";
    pub const FLAKES: &'static str = "straw-flakes";
    pub const STUFFED: &'static str = "straw-stuffed";

    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

/// Solid shape of a generated element, in element-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned box with the given edge lengths.
    Cuboid { size: Vec3 },
    /// Prism of `thickness` extruded from a polygon.
    Extrusion { polygon: Polygon2D, thickness: Length },
}

impl Shape {
    #[must_use]
    pub fn volume(&self) -> Volume {
        match self {
            Self::Cuboid { size } => Volume(size.x.abs() * size.y.abs() * size.z.abs()),
            Self::Extrusion { polygon, thickness } => Volume(polygon.area() * thickness.value().abs()),
        }
    }

    /// Edge lengths of the tightest box around the shape. Extrusions are
    /// measured in the frame of their outline, so a rotated copy of a profile
    /// has the same size.
    #[must_use]
    pub fn bounding_size(&self) -> Vec3 {
        match self {
            Self::Cuboid { size } => size.abs(),
            Self::Extrusion { polygon, thickness } => {
                let (w, h) = polygon.oriented_extents().unwrap_or((0.0, 0.0));
                Vec3::new(w, h, thickness.value().abs())
            }
        }
    }
}

/// Part description attached to elements that are counted as parts.
#[derive(Debug, Clone, PartialEq)]
pub struct PartInfo {
    pub part_type: String,
    pub description: Option<String>,
    /// Edge lengths. For parts with an outline, `z` is the thickness.
    pub size: Vec3,
    /// Outline of non-rectangular parts.
    pub polygon: Option<Polygon2D>,
}

impl PartInfo {
    /// Derives part info from an element's shape.
    #[must_use]
    pub fn from_shape(part_type: impl Into<String>, shape: &Shape) -> Self {
        let polygon = match shape {
            Shape::Cuboid { .. } => None,
            Shape::Extrusion { polygon, .. } => Some(polygon.clone()),
        };
        Self {
            part_type: part_type.into(),
            description: None,
            size: shape.bounding_size(),
            polygon,
        }
    }

    /// Size used for identity and stock checks. With an outline, the in-plane
    /// extents come from the outline's own frame and `size.z` is kept as the
    /// thickness.
    #[must_use]
    pub fn canonical_size(&self) -> Vec3 {
        match self.polygon.as_ref().and_then(Polygon2D::oriented_extents) {
            Some((w, h)) => Vec3::new(w, h, self.size.z.abs()),
            None => self.size.abs(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionElement {
    pub id: String,
    pub material: MaterialId,
    pub shape: Shape,
    pub tags: Vec<Tag>,
    pub part_info: Option<PartInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionGroup {
    pub id: String,
    pub tags: Vec<Tag>,
    pub children: Vec<ConstructionNode>,
}

/// Node of a generated construction tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionNode {
    Element(ConstructionElement),
    Group(ConstructionGroup),
}

impl ConstructionNode {
    /// Visits every element depth-first, passing the tags inherited from
    /// enclosing groups followed by the element's own tags.
    pub fn visit_elements<F>(&self, visit: &mut F)
    where
        F: FnMut(&ConstructionElement, &[Tag]),
    {
        self.visit_with_tags(&[], visit);
    }

    fn visit_with_tags<F>(&self, inherited: &[Tag], visit: &mut F)
    where
        F: FnMut(&ConstructionElement, &[Tag]),
    {
        match self {
            Self::Element(element) => {
                let mut tags = inherited.to_vec();
                tags.extend(element.tags.iter().cloned());
                visit(element, &tags);
            }
            Self::Group(group) => {
                let mut tags = inherited.to_vec();
                tags.extend(group.tags.iter().cloned());
                for child in &group.children {
                    child.visit_with_tags(&tags, visit);
                }
            }
        }
    }
}
