use shapekit_core::{ObjectId, Ray, Vec3};
use shapekit_editor::{EditorState, ShapeKind, Viewport};
use shapekit_settings::ViewportSettings;

fn square(editor: &mut EditorState, kind: ShapeKind) -> ObjectId {
    let id = editor.create_shape(kind).unwrap();
    for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)] {
        editor
            .insert_point(id, None, Vec3::new(x, y, 0.0), true)
            .unwrap();
    }
    id
}

fn ray_down(x: f64, y: f64) -> Ray {
    Ray::new(Vec3::new(x, y, 10.0), Vec3::new(0.0, 0.0, -1.0))
}

#[test]
fn test_equal_distances_keep_first_edge() {
    let mut editor = EditorState::default();
    let id = square(&mut editor, ShapeKind::Area);
    let hit = editor
        .shape(id)
        .unwrap()
        .nearest_edge_by_pos(&Vec3::new(2.0, 2.0, 0.0))
        .unwrap();
    assert_eq!((hit.first, hit.second), (0, 1));
    assert_eq!(hit.distance, 2.0);
}

#[test]
fn test_closing_edge_reports_second_as_zero() {
    let mut editor = EditorState::default();
    let id = square(&mut editor, ShapeKind::Area);
    let hit = editor
        .shape(id)
        .unwrap()
        .nearest_edge_by_ray(&ray_down(0.0, 2.0))
        .unwrap();
    assert_eq!((hit.first, hit.second), (3, 0));
    assert!(hit.distance < 1e-6);
}

#[test]
fn test_open_shape_skips_closing_edge() {
    let mut editor = EditorState::default();
    let id = square(&mut editor, ShapeKind::AiPath);
    let shape = editor.shape(id).unwrap();
    assert!(!shape.is_closed());
    let hit = shape.nearest_edge_by_ray(&ray_down(-0.5, 2.0)).unwrap();
    assert_ne!(hit.first, 3);
}

#[test]
fn test_nearest_point_by_ray() {
    let mut editor = EditorState::default();
    let id = square(&mut editor, ShapeKind::Area);
    let (index, distance) = editor
        .shape(id)
        .unwrap()
        .nearest_point_by_ray(&ray_down(3.8, 4.1))
        .unwrap();
    assert_eq!(index, 2);
    assert!(distance < 0.25);
}

#[test]
fn test_hit_test_on_outline_and_roof() {
    let mut editor = EditorState::default();
    let id = square(&mut editor, ShapeKind::Area);
    editor.set_height(id, 3.0).unwrap();
    let view = Viewport::from_settings(&ViewportSettings::default(), Vec3::new(2.0, 2.0, 0.0), 20.0);
    let shape = editor.shape(id).unwrap();

    let outline = view.view_to_world_ray(&view.world_to_view(&Vec3::new(2.0, 0.0, 0.0)).unwrap());
    assert!(shape.hit_test(&outline, &view, 0.8).is_some());

    let inside = view.view_to_world_ray(&view.world_to_view(&Vec3::new(2.0, 2.0, 0.0)).unwrap());
    assert!(shape.hit_test(&inside, &view, 0.8).is_none());
}

#[test]
fn test_empty_shape_is_never_hit() {
    let mut editor = EditorState::default();
    let id = editor.create_shape(ShapeKind::Area).unwrap();
    let view = Viewport::from_settings(&ViewportSettings::default(), Vec3::zeros(), 20.0);
    let shape = editor.shape(id).unwrap();
    assert!(shape.hit_test(&ray_down(0.0, 0.0), &view, 0.8).is_none());
    assert!(shape.nearest_edge_by_ray(&ray_down(0.0, 0.0)).is_none());
}
