use serde::{Deserialize, Serialize};

use crate::units::Length;

use super::element::MaterialId;

/// Cross-section of dimensional lumber, stored smaller side first. Deserialization
/// goes through [`CrossSection::new`], so either order is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SidePair")]
pub struct CrossSection {
    pub small: Length,
    pub big: Length,
}

impl CrossSection {
    #[must_use]
    pub fn new(a: Length, b: Length) -> Self {
        Self {
            small: a.min(b),
            big: a.max(b),
        }
    }
}

/// Face size of sheet stock, stored smaller side first. Deserialization
/// goes through [`SheetSize::new`], so either order is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SidePair")]
pub struct SheetSize {
    pub small: Length,
    pub big: Length,
}

impl SheetSize {
    #[must_use]
    pub fn new(a: Length, b: Length) -> Self {
        Self {
            small: a.min(b),
            big: a.max(b),
        }
    }
}

/// Two side lengths as written in a catalog, in any order.
#[derive(Deserialize)]
struct SidePair {
    small: Length,
    big: Length,
}

impl From<SidePair> for CrossSection {
    fn from(pair: SidePair) -> Self {
        Self::new(pair.small, pair.big)
    }
}

impl From<SidePair> for SheetSize {
    fn from(pair: SidePair) -> Self {
        Self::new(pair.small, pair.big)
    }
}

/// Stock configuration of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MaterialKind {
    Dimensional {
        #[serde(default)]
        cross_sections: Vec<CrossSection>,
        #[serde(default)]
        lengths: Vec<Length>,
    },
    Sheet {
        #[serde(default)]
        sizes: Vec<SheetSize>,
        #[serde(default)]
        thicknesses: Vec<Length>,
    },
    Strawbale {
        bale_length: Length,
        bale_width: Length,
        bale_height: Length,
    },
    /// Bulk material measured by volume only.
    Volume,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    #[serde(flatten)]
    pub kind: MaterialKind,
}

impl Material {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            id: MaterialId::new(id),
            name: name.into(),
            kind,
        }
    }
}

/// Materials known to the parts list, looked up by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCatalog {
    materials: Vec<Material>,
}

impl MaterialCatalog {
    #[must_use]
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    #[must_use]
    pub fn get(&self, id: &MaterialId) -> Option<&Material> {
        self.materials.iter().find(|m| &m.id == id)
    }

    /// Adds a material, replacing one with the same id.
    pub fn insert(&mut self, material: Material) {
        if let Some(existing) = self.materials.iter_mut().find(|m| m.id == material.id) {
            *existing = material;
        } else {
            self.materials.push(material);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
