//! Materials list: groups generated construction elements into countable
//! parts per material.

pub mod element;
pub mod label;
pub mod material;
pub mod part_id;
pub mod validate;

pub use element::{
    ConstructionElement, ConstructionGroup, ConstructionNode, MaterialId, PartInfo, Shape, Tag,
};
pub use label::part_label;
pub use material::{CrossSection, Material, MaterialCatalog, MaterialKind, SheetSize};
pub use part_id::{part_id_for, PartId};
pub use validate::{validate_part, PartIssue, DIMENSION_TOLERANCE};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Add;

use tracing::{debug, warn};

use crate::math::{Polygon2D, Vec3};
use crate::units::{Area, Length, Volume};

use part_id::sorted_dimensions;

/// How a piece of straw is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrawCategory {
    FullBale,
    PartialBale,
    Flakes,
    Stuffed,
}

impl StrawCategory {
    fn from_tags(tags: &[Tag]) -> Option<Self> {
        tags.iter().rev().find_map(|tag| match tag.0.as_str() {
            Tag::FULL_BALE => Some(Self::FullBale),
            Tag::PARTIAL_BALE => Some(Self::PartialBale),
            Tag::FLAKES => Some(Self::Flakes),
            Tag::STUFFED => Some(Self::Stuffed),
            _ => None,
        })
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FullBale => "full-bale",
            Self::PartialBale => "partial-bale",
            Self::Flakes => "flakes",
            Self::Stuffed => "stuffed",
        }
    }
}

/// One distinct part of a material and every element cut as it.
#[derive(Debug, Clone, PartialEq)]
pub struct PartItem {
    pub part_id: PartId,
    pub label: String,
    pub part_type: String,
    pub description: Option<String>,
    /// Dimensions sorted ascending.
    pub size: [Length; 3],
    pub polygon: Option<Polygon2D>,
    pub straw_category: Option<StrawCategory>,
    pub quantity: usize,
    pub element_ids: Vec<String>,
    pub total_volume: Volume,
    /// Face area, for sheet materials.
    pub total_area: Option<Area>,
    /// Running length, for dimensional materials.
    pub total_length: Option<Length>,
    pub issues: Vec<PartIssue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialPartItem {
    pub material: MaterialId,
    /// Parts in first-seen order; labels follow this order.
    pub parts: Vec<PartItem>,
    pub total_quantity: usize,
    pub total_volume: Volume,
    pub total_area: Option<Area>,
    pub total_length: Option<Length>,
    /// Volume of elements that carry no part information.
    pub loose_volume: Volume,
}

impl MaterialPartItem {
    fn new(material: MaterialId) -> Self {
        Self {
            material,
            parts: Vec::new(),
            total_quantity: 0,
            total_volume: Volume::ZERO,
            total_area: None,
            total_length: None,
            loose_volume: Volume::ZERO,
        }
    }

    #[must_use]
    pub fn part(&self, id: &PartId) -> Option<&PartItem> {
        self.parts.iter().find(|p| &p.part_id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialPartsList {
    pub materials: BTreeMap<MaterialId, MaterialPartItem>,
    /// Materials referenced by elements but missing from the catalog.
    pub unknown_materials: Vec<MaterialId>,
}

impl MaterialPartsList {
    #[must_use]
    pub fn material(&self, id: &MaterialId) -> Option<&MaterialPartItem> {
        self.materials.get(id)
    }
}

/// Aggregates the elements of construction trees into a parts list.
///
/// Only elements with [`PartInfo`] become parts; the volume of the rest is
/// kept as loose volume of their material. Elements of one material with
/// equal sorted dimensions (and, for non-rectangular parts, congruent
/// outlines) collapse into one part. Straw is counted by [`StrawCategory`]
/// instead, taken from tags or, untagged, by comparing the piece with the
/// configured bale size. Unknown materials are treated as generic and
/// reported.
#[must_use]
pub fn generate_material_parts_list(
    nodes: &[ConstructionNode],
    catalog: &MaterialCatalog,
) -> MaterialPartsList {
    let mut builder = PartsListBuilder::new(catalog);
    for node in nodes {
        node.visit_elements(&mut |element, tags| builder.add(element, tags));
    }
    builder.finish()
}

static GENERIC: MaterialKind = MaterialKind::Generic;

struct PartsListBuilder<'a> {
    catalog: &'a MaterialCatalog,
    materials: BTreeMap<MaterialId, MaterialPartItem>,
    index: HashMap<(MaterialId, PartId), usize>,
    unknown: BTreeSet<MaterialId>,
}

impl<'a> PartsListBuilder<'a> {
    fn new(catalog: &'a MaterialCatalog) -> Self {
        Self {
            catalog,
            materials: BTreeMap::new(),
            index: HashMap::new(),
            unknown: BTreeSet::new(),
        }
    }

    fn add(&mut self, element: &ConstructionElement, tags: &[Tag]) {
        let catalog = self.catalog;
        let kind = match catalog.get(&element.material) {
            Some(material) => &material.kind,
            None => {
                if self.unknown.insert(element.material.clone()) {
                    warn!(material = %element.material, element = %element.id, "unknown material");
                }
                &GENERIC
            }
        };

        let volume = element.shape.volume();
        let entry = self
            .materials
            .entry(element.material.clone())
            .or_insert_with(|| MaterialPartItem::new(element.material.clone()));
        entry.total_volume += volume;

        let part = element.part_info.as_ref().map(|info| match kind {
            MaterialKind::Strawbale {
                bale_length,
                bale_width,
                bale_height,
            } => {
                let bale = Vec3::new(bale_length.value(), bale_width.value(), bale_height.value());
                straw_part(info, tags, &bale)
            }
            _ => regular_part(info, kind),
        });

        let Some(mut part) = part else {
            entry.loose_volume += volume;
            return;
        };

        let area = piece_area(kind, &part);
        let length = piece_length(kind, &part);
        entry.total_quantity += 1;
        accumulate(&mut entry.total_area, area);
        accumulate(&mut entry.total_length, length);

        let key = (element.material.clone(), part.part_id.clone());
        let existing = self.index.get(&key).copied();
        let item = if let Some(i) = existing {
            &mut entry.parts[i]
        } else {
            part.label = part_label(entry.parts.len());
            if !part.issues.is_empty() {
                warn!(
                    material = %element.material,
                    part = %part.part_id,
                    issues = part.issues.len(),
                    "part does not fit the configured stock"
                );
            }
            self.index.insert(key, entry.parts.len());
            entry.parts.push(part);
            let last = entry.parts.len() - 1;
            &mut entry.parts[last]
        };
        item.quantity += 1;
        item.element_ids.push(element.id.clone());
        item.total_volume += volume;
        accumulate(&mut item.total_area, area);
        accumulate(&mut item.total_length, length);
    }

    fn finish(self) -> MaterialPartsList {
        debug!(
            materials = self.materials.len(),
            unknown = self.unknown.len(),
            "generated materials list"
        );
        MaterialPartsList {
            materials: self.materials,
            unknown_materials: self.unknown.into_iter().collect(),
        }
    }
}

/// Empty part record; quantity and totals are filled in by the builder.
fn empty_part(part_id: PartId, part_type: String, dims: [f64; 3]) -> PartItem {
    PartItem {
        part_id,
        label: String::new(),
        part_type,
        description: None,
        size: dims.map(Length),
        polygon: None,
        straw_category: None,
        quantity: 0,
        element_ids: Vec::new(),
        total_volume: Volume::ZERO,
        total_area: None,
        total_length: None,
        issues: Vec::new(),
    }
}

fn regular_part(info: &PartInfo, kind: &MaterialKind) -> PartItem {
    let dims = sorted_dimensions(&info.canonical_size());
    let part_id = part_id_for(info);
    // Rectangular outlines carry no shape information beyond the dimensions.
    let polygon = info
        .polygon
        .as_ref()
        .filter(|p| part_id::polygon_signature(p).is_some())
        .cloned();
    PartItem {
        description: info.description.clone(),
        polygon,
        issues: validate_part(kind, dims),
        ..empty_part(part_id, info.part_type.clone(), dims)
    }
}

fn straw_part(info: &PartInfo, tags: &[Tag], bale: &Vec3) -> PartItem {
    let dims = sorted_dimensions(&info.canonical_size());
    let category = StrawCategory::from_tags(tags).unwrap_or_else(|| {
        let bale = sorted_dimensions(bale);
        let full = dims
            .iter()
            .zip(&bale)
            .all(|(d, b)| (d - b).abs() <= DIMENSION_TOLERANCE);
        if full {
            StrawCategory::FullBale
        } else {
            StrawCategory::PartialBale
        }
    });
    let mut part = empty_part(
        PartId::new(format!("strawbale:{}", category.key())),
        category.key().to_string(),
        dims,
    );
    part.straw_category = Some(category);
    part
}

fn piece_area(kind: &MaterialKind, part: &PartItem) -> Option<Area> {
    match kind {
        MaterialKind::Sheet { .. } => Some(match &part.polygon {
            Some(polygon) => Area(polygon.area()),
            None => part.size[1] * part.size[2],
        }),
        _ => None,
    }
}

fn piece_length(kind: &MaterialKind, part: &PartItem) -> Option<Length> {
    match kind {
        MaterialKind::Dimensional { .. } => Some(part.size[2]),
        _ => None,
    }
}

fn accumulate<T: Copy + Add<Output = T>>(total: &mut Option<T>, value: Option<T>) {
    if let Some(value) = value {
        *total = Some(total.map_or(value, |t| t + value));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use approx::assert_relative_eq;

    fn catalog() -> MaterialCatalog {
        MaterialCatalog::new(vec![
            Material::new(
                "kvh",
                "Structural timber",
                MaterialKind::Dimensional {
                    cross_sections: vec![CrossSection::new(Length::mm(60.0), Length::mm(120.0))],
                    lengths: vec![Length::mm(5000.0)],
                },
            ),
            Material::new(
                "osb",
                "OSB",
                MaterialKind::Sheet {
                    sizes: vec![SheetSize::new(Length::mm(1250.0), Length::mm(2500.0))],
                    thicknesses: vec![Length::mm(18.0)],
                },
            ),
            Material::new(
                "straw",
                "Straw bale",
                MaterialKind::Strawbale {
                    bale_length: Length::mm(800.0),
                    bale_width: Length::mm(460.0),
                    bale_height: Length::mm(360.0),
                },
            ),
        ])
    }

    fn cuboid(id: &str, material: &str, size: Vec3) -> ConstructionNode {
        let shape = Shape::Cuboid { size };
        ConstructionNode::Element(ConstructionElement {
            id: id.into(),
            material: MaterialId::new(material),
            part_info: Some(PartInfo::from_shape("post", &shape)),
            shape,
            tags: Vec::new(),
        })
    }

    fn gusset(id: &str, points: &[(f64, f64)]) -> ConstructionNode {
        let shape = Shape::Extrusion {
            polygon: Polygon2D::new(points.iter().map(|(x, y)| Vec2::new(*x, *y)).collect()),
            thickness: Length::mm(18.0),
        };
        ConstructionNode::Element(ConstructionElement {
            id: id.into(),
            material: MaterialId::new("osb"),
            part_info: Some(PartInfo::from_shape("gusset", &shape)),
            shape,
            tags: Vec::new(),
        })
    }

    fn bale(id: &str, size: Vec3, tags: Vec<Tag>) -> ConstructionNode {
        let shape = Shape::Cuboid { size };
        ConstructionNode::Element(ConstructionElement {
            id: id.into(),
            material: MaterialId::new("straw"),
            part_info: Some(PartInfo::from_shape("bale", &shape)),
            shape,
            tags,
        })
    }

    fn rotated_gusset(id: &str, points: &[(f64, f64)], degrees: f64) -> ConstructionNode {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let turned: Vec<_> = points
            .iter()
            .map(|(x, y)| (x * cos - y * sin, x * sin + y * cos))
            .collect();
        gusset(id, &turned)
    }

    #[test]
    fn congruent_posts_collapse_into_one_part() {
        let nodes = vec![
            cuboid("p1", "kvh", Vec3::new(60.0, 120.0, 2500.0)),
            cuboid("p2", "kvh", Vec3::new(2500.0, 60.0, 120.0)),
            cuboid("p3", "kvh", Vec3::new(60.0, 120.0, 3000.0)),
        ];
        let list = generate_material_parts_list(&nodes, &catalog());
        let kvh = list.material(&MaterialId::new("kvh")).unwrap();

        assert_eq!(kvh.parts.len(), 2);
        assert_eq!(kvh.parts[0].part_id.as_str(), "60x120x2500");
        assert_eq!(kvh.parts[0].label, "A");
        assert_eq!(kvh.parts[0].quantity, 2);
        assert_eq!(kvh.parts[0].element_ids, vec!["p1", "p2"]);
        assert_eq!(kvh.parts[1].label, "B");
        assert_eq!(kvh.total_quantity, 3);
        assert_relative_eq!(kvh.total_length.unwrap().value(), 8000.0);
        assert_relative_eq!(kvh.total_volume.value(), 60.0 * 120.0 * 8000.0);
        assert!(kvh.total_area.is_none());
        assert!(list.unknown_materials.is_empty());
    }

    #[test]
    fn element_order_does_not_change_part_ids() {
        let forward = vec![
            cuboid("p1", "kvh", Vec3::new(60.0, 120.0, 2500.0)),
            cuboid("p2", "kvh", Vec3::new(60.0, 120.0, 3000.0)),
        ];
        let backward: Vec<_> = forward.iter().rev().cloned().collect();
        let ids = |nodes: &[ConstructionNode]| {
            let list = generate_material_parts_list(nodes, &catalog());
            let mut ids: Vec<_> = list.materials[&MaterialId::new("kvh")]
                .parts
                .iter()
                .map(|p| (p.part_id.clone(), p.quantity))
                .collect();
            ids.sort();
            ids
        };
        assert_eq!(ids(&forward), ids(&backward));
    }

    #[test]
    fn mirrored_gussets_are_one_part() {
        let nodes = vec![
            gusset("g1", &[(0.0, 0.0), (400.0, 0.0), (400.0, 100.0), (0.0, 300.0)]),
            gusset("g2", &[(0.0, 0.0), (-400.0, 0.0), (-400.0, 100.0), (0.0, 300.0)]),
        ];
        let list = generate_material_parts_list(&nodes, &catalog());
        let osb = list.material(&MaterialId::new("osb")).unwrap();
        assert_eq!(osb.parts.len(), 1);
        assert_eq!(osb.parts[0].quantity, 2);
        assert!(osb.parts[0].polygon.is_some());
        // Trapezoid area: (300 + 100) / 2 * 400.
        assert_relative_eq!(osb.total_area.unwrap().value(), 2.0 * 80_000.0);
        assert!(osb.parts[0].issues.is_empty());
    }

    #[test]
    fn rotated_gussets_are_one_part() {
        let triangle = [(0.0, 0.0), (400.0, 0.0), (0.0, 300.0)];
        let nodes = vec![
            gusset("g1", &triangle),
            rotated_gusset("g2", &triangle, 30.0),
        ];
        let list = generate_material_parts_list(&nodes, &catalog());
        let osb = list.material(&MaterialId::new("osb")).unwrap();
        assert_eq!(osb.parts.len(), 1, "{:?}", osb.parts);
        let part = &osb.parts[0];
        assert_eq!(part.quantity, 2);
        assert!(part.issues.is_empty(), "{:?}", part.issues);
        assert!(part.part_id.as_str().starts_with("18x240x500/"));
    }

    #[test]
    fn tilted_sheet_is_checked_in_its_own_frame() {
        // 1200 x 2400 panel turned by 45°: the axis box would exceed 1250 x 2500.
        let panel = [(0.0, 0.0), (1200.0, 0.0), (1200.0, 2400.0), (0.0, 2400.0)];
        let nodes = vec![rotated_gusset("p1", &panel, 45.0)];
        let list = generate_material_parts_list(&nodes, &catalog());
        let part = &list.materials[&MaterialId::new("osb")].parts[0];
        assert_eq!(part.part_id.as_str(), "18x1200x2400");
        assert!(part.issues.is_empty(), "{:?}", part.issues);
    }

    #[test]
    fn stock_issues_are_reported_per_part() {
        let nodes = vec![cuboid("p1", "kvh", Vec3::new(80.0, 120.0, 6000.0))];
        let list = generate_material_parts_list(&nodes, &catalog());
        let part = &list.materials[&MaterialId::new("kvh")].parts[0];
        assert_eq!(part.issues.len(), 2);
    }

    #[test]
    fn straw_is_counted_by_category() {
        let full = Vec3::new(800.0, 460.0, 360.0);
        let nodes = vec![ConstructionNode::Group(ConstructionGroup {
            id: "infill".into(),
            tags: Vec::new(),
            children: vec![
                bale("b1", full, Vec::new()),
                bale("b2", Vec3::new(460.0, 360.0, 800.0), Vec::new()),
                bale("b3", Vec3::new(500.0, 460.0, 360.0), Vec::new()),
                ConstructionNode::Group(ConstructionGroup {
                    id: "gaps".into(),
                    tags: vec![Tag::new(Tag::STUFFED)],
                    children: vec![bale("s1", Vec3::new(100.0, 460.0, 360.0), Vec::new())],
                }),
                bale("f1", Vec3::new(80.0, 460.0, 360.0), vec![Tag::new(Tag::FLAKES)]),
            ],
        })];
        let list = generate_material_parts_list(&nodes, &catalog());
        let straw = list.material(&MaterialId::new("straw")).unwrap();

        let count = |category: StrawCategory| {
            straw
                .parts
                .iter()
                .find(|p| p.straw_category == Some(category))
                .map_or(0, |p| p.quantity)
        };
        assert_eq!(count(StrawCategory::FullBale), 2);
        assert_eq!(count(StrawCategory::PartialBale), 1);
        assert_eq!(count(StrawCategory::Stuffed), 1);
        assert_eq!(count(StrawCategory::Flakes), 1);
        assert_eq!(straw.total_quantity, 5);
        assert_eq!(
            straw.parts[0].part_id,
            PartId::new("strawbale:full-bale")
        );
    }

    #[test]
    fn straw_without_part_info_is_loose_volume() {
        let nodes = vec![ConstructionNode::Element(ConstructionElement {
            id: "loose".into(),
            material: MaterialId::new("straw"),
            shape: Shape::Cuboid {
                size: Vec3::new(100.0, 100.0, 100.0),
            },
            tags: vec![Tag::new(Tag::STUFFED)],
            part_info: None,
        })];
        let list = generate_material_parts_list(&nodes, &catalog());
        let straw = &list.materials[&MaterialId::new("straw")];
        assert!(straw.parts.is_empty());
        assert_eq!(straw.total_quantity, 0);
        assert_relative_eq!(straw.loose_volume.value(), 1_000_000.0);
    }

    #[test]
    fn unknown_materials_are_reported_once() {
        let nodes = vec![
            cuboid("x1", "steel", Vec3::new(10.0, 10.0, 100.0)),
            cuboid("x2", "steel", Vec3::new(10.0, 10.0, 100.0)),
        ];
        let list = generate_material_parts_list(&nodes, &catalog());
        assert_eq!(list.unknown_materials, vec![MaterialId::new("steel")]);
        assert_eq!(list.materials[&MaterialId::new("steel")].parts[0].quantity, 2);
    }

    #[test]
    fn elements_without_part_info_count_as_loose_volume() {
        let nodes = vec![ConstructionNode::Element(ConstructionElement {
            id: "fill".into(),
            material: MaterialId::new("kvh"),
            shape: Shape::Cuboid {
                size: Vec3::new(10.0, 10.0, 10.0),
            },
            tags: Vec::new(),
            part_info: None,
        })];
        let list = generate_material_parts_list(&nodes, &catalog());
        let kvh = &list.materials[&MaterialId::new("kvh")];
        assert!(kvh.parts.is_empty());
        assert_eq!(kvh.total_quantity, 0);
        assert_relative_eq!(kvh.loose_volume.value(), 1000.0);
    }

    #[test]
    fn output_is_deterministic() {
        let nodes = vec![
            cuboid("p1", "kvh", Vec3::new(60.0, 120.0, 2500.0)),
            gusset("g1", &[(0.0, 0.0), (400.0, 0.0), (0.0, 300.0)]),
            bale("b1", Vec3::new(800.0, 460.0, 360.0), Vec::new()),
        ];
        let a = generate_material_parts_list(&nodes, &catalog());
        let b = generate_material_parts_list(&nodes, &catalog());
        assert_eq!(a, b);
        let keys: Vec<_> = a.materials.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["kvh", "osb", "straw"]);
    }
}
