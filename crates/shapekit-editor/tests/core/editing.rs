use shapekit_core::{ObjectId, Vec3};
use shapekit_editor::{EditorState, ShapeError, ShapeKind};

fn shape_with(editor: &mut EditorState, kind: ShapeKind, points: &[Vec3]) -> ObjectId {
    let id = editor.create_shape(kind).unwrap();
    for p in points {
        let local = editor.shape(id).unwrap().transform().inverse_transform_point(p);
        editor.insert_point(id, None, local, true).unwrap();
    }
    id
}

#[test]
fn test_build_closed_area() {
    let mut editor = EditorState::default();
    let id = editor.create_shape(ShapeKind::Area).unwrap();
    for p in [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(5.0, 0.0, 0.0),
        Vec3::new(5.0, 5.0, 0.0),
    ] {
        editor.insert_point(id, None, p, true).unwrap();
    }
    editor.set_closed(id, true).unwrap();

    let shape = editor.shape(id).unwrap();
    assert_eq!(shape.point_count(), 3);
    assert!(shape.is_closed());
    assert_eq!(shape.local_bounds().min, Vec3::zeros());
    assert_eq!(shape.local_bounds().max, Vec3::new(5.0, 5.0, 0.0));
    assert_eq!(shape.point(0), Some(Vec3::zeros()));
}

#[test]
fn test_first_point_stays_at_local_origin() {
    let mut editor = EditorState::default();
    let id = shape_with(
        &mut editor,
        ShapeKind::AiPath,
        &[Vec3::new(10.0, 4.0, 1.0), Vec3::new(14.0, 4.0, 1.0)],
    );
    let shape = editor.shape(id).unwrap();
    assert_eq!(shape.point(0), Some(Vec3::zeros()));
    assert_eq!(shape.position(), Vec3::new(10.0, 4.0, 1.0));
    assert_eq!(shape.world_point(1), Some(Vec3::new(14.0, 4.0, 1.0)));
}

#[test]
fn test_point_too_close_is_rejected() {
    let mut editor = EditorState::default();
    let id = shape_with(
        &mut editor,
        ShapeKind::Area,
        &[Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 0.0)],
    );
    let err = editor
        .insert_point(id, None, Vec3::new(5.05, 0.05, 0.0), true)
        .unwrap_err();
    assert_eq!(err, ShapeError::PointTooClose { index: 1 });
    assert_eq!(err.conflicting_index(), Some(1));
    assert_eq!(editor.shape(id).unwrap().point_count(), 3);
    // A rejected edit leaves nothing to undo
    assert_eq!(editor.undo.undo_description(), Some("Insert Point"));
    assert_eq!(editor.undo.undo_count(), 4);
}

#[test]
fn test_close_on_one_axis_only_is_allowed() {
    let mut editor = EditorState::default();
    let id = shape_with(
        &mut editor,
        ShapeKind::Area,
        &[Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 0.0)],
    );
    assert_eq!(
        editor.insert_point(id, None, Vec3::new(5.05, 2.0, 0.0), true),
        Ok(3)
    );
}

#[test]
fn test_move_point_onto_neighbour_is_rejected() {
    let mut editor = EditorState::default();
    let id = shape_with(
        &mut editor,
        ShapeKind::AiPath,
        &[Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)],
    );
    let err = editor
        .set_point(id, 2, Vec3::new(5.0, 0.05, 0.0))
        .unwrap_err();
    assert_eq!(err.conflicting_index(), Some(1));
    assert_eq!(
        editor.shape(id).unwrap().world_point(2),
        Some(Vec3::new(10.0, 0.0, 0.0))
    );
}

#[test]
fn test_remove_respects_minimum() {
    let mut editor = EditorState::default();
    let id = shape_with(
        &mut editor,
        ShapeKind::AiShape,
        &[Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 0.0)],
    );
    assert_eq!(
        editor.remove_point(id, 1),
        Err(ShapeError::TooFewPoints { min: 3 })
    );
}

#[test]
fn test_point_limit() {
    let mut editor = EditorState::default();
    let id = shape_with(
        &mut editor,
        ShapeKind::OccluderPlane,
        &[Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0)],
    );
    assert_eq!(
        editor.insert_point(id, None, Vec3::new(9.0, 0.0, 0.0), true),
        Err(ShapeError::TooManyPoints { max: 2 })
    );
}

#[test]
fn test_reverse_closed_shape_keeps_first_point() {
    let mut editor = EditorState::default();
    let a = Vec3::zeros();
    let b = Vec3::new(5.0, 0.0, 0.0);
    let c = Vec3::new(5.0, 5.0, 0.0);
    let d = Vec3::new(0.0, 5.0, 0.0);
    let id = shape_with(&mut editor, ShapeKind::Area, &[a, b, c, d]);
    editor.set_closed(id, true).unwrap();

    editor.reverse_shape(id).unwrap();
    assert_eq!(editor.shape(id).unwrap().world_points(), vec![a, d, c, b]);

    editor.reverse_shape(id).unwrap();
    assert_eq!(editor.shape(id).unwrap().world_points(), vec![a, b, c, d]);
}

#[test]
fn test_reverse_open_shape() {
    let mut editor = EditorState::default();
    let a = Vec3::zeros();
    let b = Vec3::new(5.0, 0.0, 0.0);
    let c = Vec3::new(5.0, 5.0, 0.0);
    let id = shape_with(&mut editor, ShapeKind::AiPath, &[a, b, c]);

    editor.reverse_shape(id).unwrap();
    let points = editor.shape(id).unwrap().world_points();
    assert_eq!(points, vec![c, b, a]);
    assert_eq!(editor.shape(id).unwrap().position(), c);
}

#[test]
fn test_reset_flattens_shape() {
    let mut editor = EditorState::default();
    let id = shape_with(
        &mut editor,
        ShapeKind::AiPath,
        &[Vec3::zeros(), Vec3::new(5.0, 0.0, 2.0)],
    );
    editor.reset_shape(id).unwrap();
    let shape = editor.shape(id).unwrap();
    assert!(shape.points().iter().all(|p| p.z == 0.0));
}

#[test]
fn test_clone_gets_fresh_id_and_name() {
    let mut editor = EditorState::default();
    let id = shape_with(
        &mut editor,
        ShapeKind::AiPath,
        &[Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0)],
    );
    let copy = editor.clone_object(id).unwrap();
    assert_ne!(copy, id);
    let original = editor.shape(id).unwrap();
    let cloned = editor.shape(copy).unwrap();
    assert_ne!(original.name(), cloned.name());
    assert_eq!(original.world_points(), cloned.world_points());
}
