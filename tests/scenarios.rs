#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use wallkit::error::SegmentationError;
use wallkit::math::{Polygon2D, Vec2, Vec3};
use wallkit::model::{ConstructionType, OpeningId, OpeningSpec};
use wallkit::parts::{
    ConstructionElement, ConstructionGroup, ConstructionNode, Material, MaterialCatalog,
    MaterialId, MaterialKind, PartInfo, Shape, Tag,
};
use wallkit::perimeter::CornerKind;
use wallkit::segmentation::{build_wall_construction_plan, ConstructionSegment};
use wallkit::snapping::{SnapConfig, SnapKind, SnapPoint, SnappingContext};
use wallkit::units::Length;
use wallkit::{
    find_snap_result, generate_material_parts_list, segment_wall, FloorModel, KernelConfig,
    KernelError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn window(offset: f64, width: f64) -> wallkit::model::Opening {
    OpeningSpec::window(
        Length::mm(offset),
        Length::mm(width),
        Length::mm(1200.0),
        Length::mm(800.0),
    )
    .with_id(OpeningId::default())
}

fn span(segment: &ConstructionSegment) -> (bool, f64, f64) {
    (
        segment.is_opening(),
        segment.position().value(),
        segment.width().value(),
    )
}

#[test]
fn single_opening_splits_wall_in_three() {
    init_tracing();
    let segments = segment_wall(
        Length::mm(5000.0),
        &[window(2000.0, 800.0)],
        ConstructionType::Infill,
    )
    .unwrap();

    let spans: Vec<_> = segments.iter().map(span).collect();
    assert_eq!(
        spans,
        vec![
            (false, 0.0, 2000.0),
            (true, 2000.0, 800.0),
            (false, 2800.0, 2200.0)
        ]
    );
}

#[test]
fn opening_past_wall_end_is_rejected() {
    let err = segment_wall(
        Length::mm(3000.0),
        &[window(2500.0, 800.0)],
        ConstructionType::Infill,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Opening extends beyond wall length: opening ends at 3300mm but wall is only 3000mm long"
    );
}

#[test]
fn overlapping_openings_are_rejected() {
    let err = segment_wall(
        Length::mm(5000.0),
        &[window(1000.0, 1000.0), window(1500.0, 800.0)],
        ConstructionType::Infill,
    )
    .unwrap_err();
    assert_eq!(
        err,
        SegmentationError::OverlapsPrevious {
            opening_start: Length::mm(1500.0),
            previous_end: Length::mm(2000.0),
        }
    );
    assert!(err
        .to_string()
        .contains("opening starts at 1500mm but previous segment ends at 2000mm"));
}

#[test]
fn rectangular_perimeter_resolves_square_miters() {
    init_tracing();
    let thickness = 400.0;
    let mut model = FloorModel::new();
    let perimeter = model
        .add_perimeter(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(4000.0, 0.0),
                Vec2::new(4000.0, 3000.0),
                Vec2::new(0.0, 3000.0),
            ],
            Length::mm(thickness),
            ConstructionType::Infill,
        )
        .unwrap();

    let geometry = model.resolve_perimeter(perimeter).unwrap();
    assert!(geometry.issues.is_empty());
    assert_eq!(geometry.corners.len(), 4);

    let n = geometry.walls.len();
    for (i, corner) in geometry.corners.iter().enumerate() {
        assert_eq!(corner.kind, CornerKind::Convex);
        // The six miter points collapse to the four distinct joint vertices.
        assert_eq!(corner.polygon.len(), 4);
        assert!(corner.polygon.is_clockwise());
        assert!(corner.polygon.edges().all(|e| e.length() > 1e-3));
        assert_relative_eq!(corner.polygon.area(), thickness * thickness, epsilon = 1e-6);

        let offset = corner.outside_point - corner.inside_point;
        let prev = &geometry.walls[(i + n - 1) % n];
        let next = &geometry.walls[i];
        assert_relative_eq!(offset.dot(&prev.outside_direction), thickness, epsilon = 1e-9);
        assert_relative_eq!(offset.dot(&next.outside_direction), thickness, epsilon = 1e-9);
    }

    // Opposite corners mirror each other across the rectangle's center.
    let a = geometry.corners[0].outside_point;
    let c = geometry.corners[2].outside_point;
    assert_relative_eq!(a.x, -400.0, epsilon = 1e-9);
    assert_relative_eq!(a.y, -400.0, epsilon = 1e-9);
    assert_relative_eq!(c.x, 4400.0, epsilon = 1e-9);
    assert_relative_eq!(c.y, 3400.0, epsilon = 1e-9);
}

#[test]
fn point_snap_locks_onto_nearby_point() {
    let mut model = FloorModel::new();
    let id = model.add_point(Vec2::new(5.0, 5.0));
    let context = SnappingContext::new(vec![SnapPoint {
        id,
        position: Vec2::new(5.0, 5.0),
    }]);
    let config = SnapConfig::default().with_point_snap_distance(Length::mm(200.0));

    let result = find_snap_result(Vec2::zeros(), &context, &config).unwrap();
    assert_eq!(result.kind, SnapKind::Point);
    assert_eq!(result.point_id, Some(id));
    assert_relative_eq!(result.position.x, 5.0);
    assert_relative_eq!(result.position.y, 5.0);
}

#[test]
fn model_rejects_overflowing_opening() {
    let mut model = FloorModel::new();
    let a = model.add_point(Vec2::new(0.0, 0.0));
    let b = model.add_point(Vec2::new(3000.0, 0.0));
    let wall = model
        .add_wall(a, b, Length::mm(300.0), ConstructionType::Infill)
        .unwrap();

    let err = model
        .add_opening(
            wall,
            OpeningSpec::door(Length::mm(2500.0), Length::mm(800.0), Length::mm(2000.0)),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        KernelError::Segmentation(SegmentationError::ExtendsBeyondWall { .. })
    ));
    assert!(model.openings_of(wall).unwrap().is_empty());
}

/// Drawing a floor, resolving it and taking off the posts of every wall.
#[test]
fn floor_to_materials_list() {
    init_tracing();
    let config = KernelConfig::from_json_str(
        r#"{
            "materials": [
                {"id": "kvh", "name": "Structural timber", "type": "dimensional",
                 "cross_sections": [{"small": 60, "big": 120}], "lengths": [5000]}
            ]
        }"#,
    )
    .unwrap();

    let mut model = FloorModel::new();
    let perimeter = model
        .add_perimeter(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(4000.0, 0.0),
                Vec2::new(4000.0, 3000.0),
                Vec2::new(0.0, 3000.0),
            ],
            Length::mm(400.0),
            ConstructionType::Infill,
        )
        .unwrap();
    let first_wall = model.perimeter(perimeter).unwrap().walls[0];
    model
        .add_opening(
            first_wall,
            OpeningSpec::window(
                Length::mm(1000.0),
                Length::mm(1000.0),
                Length::mm(1200.0),
                Length::mm(800.0),
            ),
        )
        .unwrap();

    let geometry = model.resolve_perimeter(perimeter).unwrap();
    let plans: Vec<_> = geometry
        .walls
        .iter()
        .map(|wall| build_wall_construction_plan(wall).unwrap())
        .collect();

    // The first wall owns its start corner: construction starts 400 before
    // the inside corner.
    let spans: Vec<_> = plans[0].segments.iter().map(span).collect();
    assert_eq!(
        spans,
        vec![
            (false, 0.0, 1400.0),
            (true, 1400.0, 1000.0),
            (false, 2400.0, 2000.0)
        ]
    );

    // One post at each end of every wall-body segment.
    let mut nodes = Vec::new();
    for plan in &plans {
        let mut children = Vec::new();
        for segment in plan.segments.iter().filter(|s| !s.is_opening()) {
            for end in ["start", "end"] {
                let shape = Shape::Cuboid {
                    size: Vec3::new(60.0, 120.0, 2500.0),
                };
                children.push(ConstructionNode::Element(ConstructionElement {
                    id: format!("{:?}-{}-{end}", plan.wall_id, segment.position()),
                    material: MaterialId::new("kvh"),
                    part_info: Some(PartInfo::from_shape("post", &shape)),
                    shape,
                    tags: Vec::new(),
                }));
            }
        }
        nodes.push(ConstructionNode::Group(ConstructionGroup {
            id: format!("{:?}", plan.wall_id),
            tags: vec![Tag::new("wall")],
            children,
        }));
    }

    let list = generate_material_parts_list(&nodes, &config.materials);
    let kvh = list.material(&MaterialId::new("kvh")).unwrap();
    // Five wall-body segments: two on the first wall, one on each other wall.
    assert_eq!(kvh.total_quantity, 10);
    assert_eq!(kvh.parts.len(), 1);
    assert_eq!(kvh.parts[0].label, "A");
    assert!(kvh.parts[0].issues.is_empty());
    assert!(list.unknown_materials.is_empty());

    let again = generate_material_parts_list(&nodes, &config.materials);
    assert_eq!(list, again);
}

#[test]
fn irregular_sheet_parts_group_regardless_of_placement() {
    let catalog = MaterialCatalog::new(vec![Material::new(
        "osb",
        "OSB",
        MaterialKind::Sheet {
            sizes: Vec::new(),
            thicknesses: vec![Length::mm(18.0)],
        },
    )]);
    let outline = |points: &[(f64, f64)]| {
        Polygon2D::new(points.iter().map(|(x, y)| Vec2::new(*x, *y)).collect())
    };
    let shapes = [
        outline(&[(0.0, 0.0), (600.0, 0.0), (600.0, 200.0), (0.0, 450.0)]),
        outline(&[(5000.0, 0.0), (5000.0, 600.0), (4800.0, 600.0), (4550.0, 0.0)]),
    ];
    let nodes: Vec<_> = shapes
        .iter()
        .enumerate()
        .map(|(i, polygon)| {
            let shape = Shape::Extrusion {
                polygon: polygon.clone(),
                thickness: Length::mm(18.0),
            };
            ConstructionNode::Element(ConstructionElement {
                id: format!("panel-{i}"),
                material: MaterialId::new("osb"),
                part_info: Some(PartInfo::from_shape("panel", &shape)),
                shape,
                tags: Vec::new(),
            })
        })
        .collect();

    let list = generate_material_parts_list(&nodes, &catalog);
    let osb = list.material(&MaterialId::new("osb")).unwrap();
    assert_eq!(osb.parts.len(), 1);
    assert_eq!(osb.parts[0].quantity, 2);
}
