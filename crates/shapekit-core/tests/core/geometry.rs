use proptest::prelude::*;
use shapekit_core::{
    line_line_intersect, point_lineseg_2d, point_to_line_distance, ray_aabb,
    ray_to_line_distance, Aabb, Vec2, Vec3,
};

#[test]
fn test_skew_lines_closest_points() {
    // X axis and a line parallel to Y lifted to z = 2
    let hit = line_line_intersect(
        &Vec3::new(-1.0, 0.0, 0.0),
        &Vec3::new(1.0, 0.0, 0.0),
        &Vec3::new(3.0, -1.0, 2.0),
        &Vec3::new(3.0, 1.0, 2.0),
    )
    .unwrap();
    assert!((hit.pa - Vec3::new(3.0, 0.0, 0.0)).norm() < 1e-9);
    assert!((hit.pb - Vec3::new(3.0, 0.0, 2.0)).norm() < 1e-9);
    assert!((hit.ua - 2.0).abs() < 1e-9);
    assert!((hit.ub - 0.5).abs() < 1e-9);
}

#[test]
fn test_parallel_lines_have_no_intersection() {
    let hit = line_line_intersect(
        &Vec3::zeros(),
        &Vec3::new(1.0, 0.0, 0.0),
        &Vec3::new(0.0, 1.0, 0.0),
        &Vec3::new(5.0, 1.0, 0.0),
    );
    assert!(hit.is_none());
}

#[test]
fn test_ray_to_segment_from_above() {
    let (distance, on_ray) = ray_to_line_distance(
        &Vec3::new(2.0, 1.0, 10.0),
        &Vec3::new(2.0, 1.0, -10.0),
        &Vec3::zeros(),
        &Vec3::new(4.0, 0.0, 0.0),
    )
    .unwrap();
    assert!((distance - 1.0).abs() < 1e-9);
    assert!((on_ray - Vec3::new(2.0, 1.0, 0.0)).norm() < 1e-9);
}

#[test]
fn test_ray_past_segment_end_measures_endpoint() {
    let (distance, _) = ray_to_line_distance(
        &Vec3::new(7.0, 0.0, 10.0),
        &Vec3::new(7.0, 0.0, -10.0),
        &Vec3::zeros(),
        &Vec3::new(4.0, 0.0, 0.0),
    )
    .unwrap();
    assert!((distance - 3.0).abs() < 1e-9);
}

#[test]
fn test_segment_behind_ray_is_ignored() {
    let hit = ray_to_line_distance(
        &Vec3::new(2.0, 0.0, -1.0),
        &Vec3::new(2.0, 0.0, -10.0),
        &Vec3::zeros(),
        &Vec3::new(4.0, 0.0, 0.0),
    );
    assert!(hit.is_none());
}

#[test]
fn test_ray_box_entry_and_miss() {
    let bbox = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
    let down = Vec3::new(0.0, 0.0, -1.0);

    let entry = ray_aabb(&Vec3::new(0.5, 0.0, 5.0), &down, &bbox).unwrap();
    assert!((entry - Vec3::new(0.5, 0.0, 1.0)).norm() < 1e-9);

    assert!(ray_aabb(&Vec3::new(3.0, 0.0, 5.0), &down, &bbox).is_none());
    assert_eq!(ray_aabb(&Vec3::zeros(), &down, &bbox), Some(Vec3::zeros()));
}

#[test]
fn test_point_lineseg_2d_parameter() {
    let (d, t) = point_lineseg_2d(
        &Vec2::new(3.0, 2.0),
        &Vec2::new(0.0, 0.0),
        &Vec2::new(4.0, 0.0),
    );
    assert!((d - 2.0).abs() < 1e-9);
    assert!((t - 0.75).abs() < 1e-9);
}

fn coord() -> impl Strategy<Value = f64> {
    -100.0..100.0f64
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn prop_closest_point_lies_on_segment(a in vec3(), b in vec3(), p in vec3()) {
        let (d, closest) = point_to_line_distance(&a, &b, &p);
        prop_assert!(d >= 0.0);
        prop_assert!((d - (p - closest).norm()).abs() < 1e-9);
        let along = (closest - a).norm() + (b - closest).norm();
        prop_assert!((along - (b - a).norm()).abs() < 1e-6);
        // No endpoint is closer than the reported point
        prop_assert!(d <= (p - a).norm() + 1e-9);
        prop_assert!(d <= (p - b).norm() + 1e-9);
    }
}
