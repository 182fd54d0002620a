use shapekit_core::Vec3;
use shapekit_editor::snapping::snap_value;
use shapekit_editor::{SnapMode, SnappingPreferences};
use shapekit_settings::SnappingSettings;

fn prefs() -> SnappingPreferences {
    SnappingPreferences::from_settings(&SnappingSettings::default())
}

#[test]
fn test_halves_round_up() {
    assert_eq!(snap_value(2.5, 1.0), 3.0);
    assert_eq!(snap_value(-2.5, 1.0), -2.0);
    assert_eq!(snap_value(0.74, 0.5), 0.5);
}

#[test]
fn test_grid_snap_uses_scaled_step() {
    let mut prefs = prefs();
    prefs.grid_size = 0.5;
    prefs.grid_scale = 2.0;
    let snapped = prefs.snap(&Vec3::new(1.4, -0.6, 2.5), false);
    assert_eq!(snapped, Vec3::new(1.0, -1.0, 3.0));
}

#[test]
fn test_disabled_grid_only_snaps_when_forced() {
    let mut prefs = prefs();
    prefs.grid_snapping = false;
    let v = Vec3::new(1.4, 2.6, 0.2);
    assert_eq!(prefs.snap(&v, false), v);
    assert_eq!(prefs.snap(&v, true), Vec3::new(1.0, 3.0, 0.0));
}

#[test]
fn test_tiny_grid_disables_snapping() {
    let mut prefs = prefs();
    prefs.grid_size = 0.0001;
    let v = Vec3::new(1.23456, 0.0, 0.0);
    assert_eq!(prefs.snap(&v, true), v);
    assert_eq!(prefs.snap_length(1.23456), 1.23456);
}

#[test]
fn test_angle_snap() {
    let prefs = prefs();
    assert_eq!(prefs.snap_angle(12.4), 10.0);
    assert_eq!(prefs.snap_angle(12.5), 15.0);
}

#[test]
fn test_terrain_and_geometry_are_exclusive() {
    let mut prefs = prefs();
    prefs.set_snap_to_terrain(true);
    prefs.set_snap_to_normal(true);
    prefs.set_snap_to_geometry(true);
    assert!(prefs.is_snap_to_geometry());
    assert!(!prefs.is_snap_to_terrain());
    assert!(prefs.snap_mode().contains(SnapMode::SURFACE_NORMAL));
}
