use proptest::prelude::*;
use shapekit_core::Vec3;
use shapekit_editor::snapping::snap_value;
use shapekit_editor::{ShapeKind, ShapeObject};

fn point() -> impl Strategy<Value = Vec3> {
    (-20.0..20.0f64, -20.0..20.0f64, -2.0..2.0f64).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn build(kind: ShapeKind, points: &[Vec3]) -> ShapeObject {
    let mut shape = ShapeObject::new(kind, "Shape1");
    for p in points {
        let local = shape.transform().inverse_transform_point(p);
        let _ = shape.insert_point(None, local, true);
    }
    shape
}

proptest! {
    #[test]
    fn prop_accepted_points_keep_minimum_spacing(points in prop::collection::vec(point(), 0..24)) {
        let shape = build(ShapeKind::AiPath, &points);
        let min = shape.min_point_distance();
        let world = shape.world_points();
        for i in 0..world.len() {
            for j in (i + 1)..world.len() {
                let d = world[i] - world[j];
                prop_assert!(
                    d.x.abs() >= min - 1e-9 || d.y.abs() >= min - 1e-9 || d.z.abs() >= min - 1e-9,
                    "points {} and {} are too close", i, j
                );
            }
        }
        prop_assert!(shape.points().first().map_or(true, |p| *p == Vec3::zeros()));
    }

    #[test]
    fn prop_reverse_twice_restores_open_shape(points in prop::collection::vec(point(), 2..12)) {
        let mut shape = build(ShapeKind::AiPath, &points);
        let before = shape.world_points();
        shape.reverse_shape();
        shape.reverse_shape();
        let after = shape.world_points();
        prop_assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn prop_snapped_values_are_fixed_points(value in -1000.0..1000.0f64, step in 1..8u32) {
        let step = step as f64 * 0.25;
        let snapped = snap_value(value, step);
        prop_assert!((snapped - value).abs() <= step * 0.5 + 1e-9);
        prop_assert!((snap_value(snapped, step) - snapped).abs() < 1e-9);
    }
}
