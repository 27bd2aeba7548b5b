//! Property tests for shape geometry: flips, identity, transform
//! composition and bounds under translation.

mod common;

use cadshape::shapes::{Line, Shape, ShapeKind, ShapeType};
use cadshape::types::{BoundingBox2D, Transform, Vector2, Vector3};
use cadshape::Drawing;
use common::builders::{all_shapes, create_all_shapes_drawing};
use common::comparison::{assert_bounds_eq, assert_shape_approx_eq, assert_vec3_eq, TOL};
use proptest::prelude::*;
use std::f64::consts::PI;

/// Similarity transform: optional mirror, uniform scale, rotation about Z,
/// then a translation.
fn conformal(mirror: bool, scale: f64, angle: f64, dx: f64, dy: f64, dz: f64) -> Transform {
    let base = if mirror {
        Transform::from_scaling(Vector3::new(-1.0, 1.0, 1.0))
    } else {
        Transform::identity()
    };
    base.then(&Transform::from_scale(scale))
        .then(&Transform::from_rotation_z(angle))
        .then(&Transform::from_translation(Vector3::new(dx, dy, dz)))
}

fn conformal_strategy() -> impl Strategy<Value = Transform> {
    (
        any::<bool>(),
        0.25f64..4.0,
        -PI..PI,
        -100.0f64..100.0,
        -100.0f64..100.0,
        -10.0f64..10.0,
    )
        .prop_map(|(mirror, scale, angle, dx, dy, dz)| conformal(mirror, scale, angle, dx, dy, dz))
}

fn shape_strategy() -> impl Strategy<Value = ShapeType> {
    let shapes = all_shapes();
    (0..shapes.len()).prop_map(move |i| shapes[i].clone())
}

fn transformed(shape: &ShapeType, transform: &Transform) -> ShapeType {
    let mut out = shape.clone();
    out.transform(transform, transform.is_right_handed());
    out
}

#[test]
fn test_flips_are_involutions() {
    for shape in all_shapes() {
        let flips: [fn(&mut ShapeType); 3] = [ShapeType::flip_x, ShapeType::flip_y, ShapeType::flip_z];
        for flip in flips {
            let mut twice = shape.clone();
            flip(&mut twice);
            flip(&mut twice);
            assert_shape_approx_eq(&twice, &shape, TOL);
        }
    }
}

#[test]
fn test_identity_transform_leaves_shapes_unchanged() {
    for shape in all_shapes() {
        let mut moved = shape.clone();
        moved.transform(&Transform::identity(), true);
        assert_eq!(moved, shape, "{}", shape.kind());
    }
}

#[test]
fn test_zero_length_line_bounds() {
    let p = Vector3::new(3.0, -4.0, 1.0);
    let line = ShapeType::Line(Line::from_points(p, p));
    let bounds = line.bounding_rect().unwrap();
    assert_eq!(bounds.min, Vector2::new(3.0, -4.0));
    assert_eq!(bounds.max, Vector2::new(3.0, -4.0));
    assert_eq!(bounds.width(), 0.0);
}

/// Placement of the kinds that carry one; these may reach the same
/// placement through different parameters.
fn placement(shape: &ShapeType) -> Option<Transform> {
    match shape {
        ShapeType::Insert(insert) => Some(insert.placement()),
        ShapeType::Underlay(underlay) => Some(underlay.placement()),
        _ => None,
    }
}

#[test]
fn test_flip_matches_mirror_transform() {
    let mirrors: [(fn(&mut ShapeType), Vector3); 2] = [
        (ShapeType::flip_x, Vector3::new(-1.0, 1.0, 1.0)),
        (ShapeType::flip_y, Vector3::new(1.0, -1.0, 1.0)),
    ];
    let probes = [
        Vector3::ZERO,
        Vector3::UNIT_X,
        Vector3::UNIT_Y,
        Vector3::new(2.0, -3.0, 4.0),
    ];

    for shape in all_shapes() {
        for (flip, scale) in mirrors {
            let mut flipped = shape.clone();
            flip(&mut flipped);
            let mirrored = transformed(&shape, &Transform::from_scaling(scale));

            match (placement(&flipped), placement(&mirrored)) {
                (Some(a), Some(b)) => {
                    for p in probes {
                        assert_vec3_eq(&a.apply(p), &b.apply(p), 1e-9);
                    }
                    assert_eq!(flipped.common(), mirrored.common());
                }
                _ => assert_shape_approx_eq(&flipped, &mirrored, 1e-9),
            }
        }
    }
}

#[test]
fn test_drawing_flip_leaves_block_definitions() {
    let drawing = create_all_shapes_drawing();
    let mut flipped = drawing.clone();
    flipped.flip_y();
    for (a, b) in drawing.shapes().iter().zip(flipped.shapes()) {
        let mut expected = a.clone();
        if expected.kind() != ShapeKind::Block {
            expected.flip_y();
        }
        assert_eq!(&expected, b);
    }
}

#[test]
fn test_drawing_flip_mirrors_inserted_geometry() {
    let mut drawing = Drawing::new();
    for shape in all_shapes()
        .into_iter()
        .filter(|s| matches!(s.kind(), ShapeKind::Block | ShapeKind::Insert))
    {
        drawing.add_shape(shape);
    }
    let before = drawing.bounding_rect().unwrap();

    drawing.flip_x();
    let after = drawing.bounding_rect();
    let expected = BoundingBox2D::new(
        Vector2::new(-before.max.x, before.min.y),
        Vector2::new(-before.min.x, before.max.y),
    );
    assert_bounds_eq(after, Some(expected), 1e-9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_transform_composition(
        shape in shape_strategy(),
        first in conformal_strategy(),
        second in conformal_strategy(),
    ) {
        let stepwise = transformed(&transformed(&shape, &first), &second);
        let combined = transformed(&shape, &first.then(&second));
        assert_shape_approx_eq(&stepwise, &combined, 1e-6);
    }

    #[test]
    fn prop_translation_moves_bounds(
        shape in shape_strategy(),
        dx in -500.0f64..500.0,
        dy in -500.0f64..500.0,
    ) {
        let moved = transformed(&shape, &Transform::from_translation(Vector3::new(dx, dy, 0.0)));
        let expected = shape.bounding_rect().map(|b| {
            BoundingBox2D::new(
                b.min + Vector2::new(dx, dy),
                b.max + Vector2::new(dx, dy),
            )
        });
        assert_bounds_eq(moved.bounding_rect(), expected, 1e-6);
    }

    #[test]
    fn prop_drawing_translation_moves_resolved_bounds(
        dx in -50.0f64..50.0,
        dy in -50.0f64..50.0,
    ) {
        let mut drawing = Drawing::new();
        for shape in all_shapes() {
            drawing.add_shape(shape);
        }
        let before = drawing.bounding_rect().unwrap();

        drawing.transform(&Transform::from_translation(Vector3::new(dx, dy, 0.0)), true);
        let total = drawing.bounding_rect().unwrap();
        let shift = Vector2::new(dx, dy);
        assert_bounds_eq(
            Some(total),
            Some(BoundingBox2D::new(before.min + shift, before.max + shift)),
            1e-6,
        );

        for shape in drawing.shapes().iter().filter(|s| s.kind() != ShapeKind::Block) {
            if let Some(bounds) = shape.bounding_rect() {
                prop_assert!(
                    bounds.min.x >= total.min.x - 1e-9
                        && bounds.min.y >= total.min.y - 1e-9
                        && bounds.max.x <= total.max.x + 1e-9
                        && bounds.max.y <= total.max.y + 1e-9,
                    "{} outside drawing bounds",
                    shape.kind()
                );
            }
        }
    }
}
