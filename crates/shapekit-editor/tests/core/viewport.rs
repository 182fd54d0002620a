use shapekit_core::{Ray, Vec2, Vec3, WorldTransform};
use shapekit_editor::{AxisConstraint, Camera, FlatGround, SceneQuery, SnappingPreferences, Viewport};
use shapekit_settings::ViewportSettings;

#[derive(Debug)]
struct NoSurface;

impl SceneQuery for NoSurface {
    fn raycast(&self, _ray: &Ray) -> Option<Vec3> {
        None
    }
}

fn screen_center(view: &Viewport) -> Vec2 {
    let (w, h) = view.camera().size();
    Vec2::new(w as f64 * 0.5, h as f64 * 0.5)
}

#[test]
fn test_oblique_camera_center_hits_target() {
    let settings = ViewportSettings::default();
    let camera = Camera::look_at(Vec3::new(0.0, -10.0, 10.0), Vec3::zeros(), &settings);
    let mut view = Viewport::new(camera, Box::new(FlatGround::default()));
    let center = screen_center(&view);

    let hit = view
        .map_view_to_cp(&center, &SnappingPreferences::default())
        .unwrap();
    assert!(hit.norm() < 1e-9);
}

#[test]
fn test_terrain_follows_scene_surface() {
    let settings = ViewportSettings::default();
    let camera = Camera::top_down(Vec3::zeros(), 20.0, &settings);
    let mut view = Viewport::new(camera, Box::new(FlatGround { elevation: 2.0 }));
    view.set_axis_constraint(AxisConstraint::Terrain);
    let target = Vec3::new(3.0, 4.0, 2.0);
    let screen = view.world_to_view(&target).unwrap();

    let hit = view
        .map_view_to_cp(&screen, &SnappingPreferences::default())
        .unwrap();
    assert!((hit - target).norm() < 1e-6);
}

#[test]
fn test_terrain_miss_falls_back_to_construction_plane() {
    let settings = ViewportSettings::default();
    let camera = Camera::top_down(Vec3::zeros(), 20.0, &settings);
    let mut view = Viewport::new(camera, Box::new(NoSurface));
    view.set_axis_constraint(AxisConstraint::Terrain);
    view.set_construction_matrix(&WorldTransform::from_position(Vec3::new(0.0, 0.0, 1.0)));
    let target = Vec3::new(3.0, 4.0, 1.0);
    let screen = view.world_to_view(&target).unwrap();

    let hit = view
        .map_view_to_cp(&screen, &SnappingPreferences::default())
        .unwrap();
    assert!((hit - target).norm() < 1e-6);
}

#[test]
fn test_negative_selection_tolerance_is_clamped() {
    let mut view = Viewport::from_settings(&ViewportSettings::default(), Vec3::zeros(), 10.0);
    view.set_selection_tolerance(-1.0);
    assert_eq!(view.selection_tolerance(), 0.0);
}
