use shapekit_core::{ObjectId, Vec3};
use shapekit_editor::commit::VolumeId;
use shapekit_editor::{
    AreaParams, EditorState, EngineServices, InMemoryServices, NavigationAreaType, ShapeKind,
};
use shapekit_settings::Config;

fn editor() -> (EditorState, InMemoryServices) {
    let (services, handles) = EngineServices::in_memory();
    (EditorState::new(&Config::default(), services), handles)
}

fn add_points(editor: &mut EditorState, id: ObjectId, points: &[(f64, f64)]) {
    for &(x, y) in points {
        let world = Vec3::new(x, y, 0.0);
        let local = editor.shape(id).unwrap().transform().inverse_transform_point(&world);
        editor.insert_point(id, None, local, true).unwrap();
    }
}

const TRIANGLE: [(f64, f64); 3] = [(0.0, 0.0), (6.0, 0.0), (3.0, 5.0)];

#[test]
fn test_ai_path_registers_without_height() {
    let (mut editor, handles) = editor();
    let id = editor.create_shape(ShapeKind::AiPath).unwrap();
    add_points(&mut editor, id, &TRIANGLE);
    editor.set_height(id, 5.0).unwrap();

    let record = handles.navigation.shape("AIPath1").unwrap();
    assert_eq!(record.area_type, NavigationAreaType::Path);
    assert_eq!(record.height, 0.0);
    assert_eq!(record.points.len(), 3);
    assert!(!record.closed);
}

#[test]
fn test_name_clash_marks_shape_failed() {
    let (mut editor, handles) = editor();
    handles
        .navigation
        .reserve_name("AIShape1", NavigationAreaType::Generic);
    let id = editor.create_shape(ShapeKind::AiShape).unwrap();
    add_points(&mut editor, id, &TRIANGLE);

    let shape = editor.shape(id).unwrap();
    assert_eq!(shape.point_count(), 3);
    assert!(!shape.last_update_succeeded());
    assert_eq!(
        shape.status_label().as_deref(),
        Some("Error! AIShape1 (see log)")
    );

    editor.set_name(id, "Guard Zone").unwrap();
    assert!(editor.shape(id).unwrap().last_update_succeeded());
    assert!(handles.navigation.shape("Guard Zone").is_some());
}

#[test]
fn test_rejected_navigation_shape_keeps_points() {
    let (mut editor, handles) = editor();
    handles.navigation.set_reject_shapes(true);
    let id = editor.create_shape(ShapeKind::AiShape).unwrap();
    add_points(&mut editor, id, &TRIANGLE);
    assert!(!editor.shape(id).unwrap().last_update_succeeded());
    assert_eq!(editor.shape(id).unwrap().point_count(), 3);
    assert!(handles.navigation.shape_names().is_empty());
}

#[test]
fn test_vis_area_needs_three_points() {
    let (mut editor, handles) = editor();
    let id = editor.create_shape(ShapeKind::VisArea).unwrap();
    add_points(&mut editor, id, &TRIANGLE[..2]);
    assert!(handles.vis_areas.is_empty());

    add_points(&mut editor, id, &TRIANGLE[2..]);
    editor.set_height(id, 4.0).unwrap();
    let area = handles.vis_areas.area_by_name("VisArea1").unwrap();
    assert_eq!(area.points.len(), 3);
    assert_eq!(area.info.height, 4.0);

    editor.delete_object(id).unwrap();
    assert!(handles.vis_areas.is_empty());
}

#[test]
fn test_entity_area_forwards_properties_and_targets() {
    let (mut editor, handles) = editor();
    let id = editor.create_shape(ShapeKind::Area).unwrap();
    let target = ObjectId::new();
    add_points(&mut editor, id, &TRIANGLE);
    editor
        .set_area_params(
            id,
            AreaParams {
                width: 2.0,
                area_id: 7,
                group_id: 3,
                priority: 1,
                inner_fade_distance: 0.5,
            },
        )
        .unwrap();
    editor.add_target(id, target).unwrap();
    editor.set_roof_obstructs_sound(id, true).unwrap();

    let area = handles.entity_areas.area(id).unwrap();
    assert_eq!(area.area_id, 7);
    assert_eq!(area.group_id, 3);
    assert_eq!(area.proximity, 2.0);
    assert_eq!(area.entities, vec![target]);
    // Three sides, then roof and floor
    assert_eq!(area.obstruction, vec![false, false, false, true, false]);
    assert!(area.closed);
}

#[test]
fn test_game_volume_registers_area_and_volume() {
    let (mut editor, handles) = editor();
    let id = editor.create_shape(ShapeKind::GameVolume).unwrap();
    add_points(&mut editor, id, &TRIANGLE);
    assert_eq!(handles.game_volumes.volume(id).unwrap().points.len(), 3);
    assert!(handles.entity_areas.area(id).is_some());

    editor.delete_object(id).unwrap();
    assert!(handles.game_volumes.is_empty());
    assert!(handles.entity_areas.is_empty());
}

#[test]
fn test_navigation_area_defers_while_editing() {
    let (mut editor, handles) = editor();
    let id = editor.create_shape(ShapeKind::NavigationArea).unwrap();
    add_points(&mut editor, id, &TRIANGLE);
    assert_eq!(handles.navigation.volume_count(), 1);
    // First volume handed out by the store
    let volume = VolumeId(1);

    editor.set_in_edit_mode(id, true).unwrap();
    editor.set_point(id, 2, Vec3::new(3.0, 8.0, 0.0)).unwrap();
    let points = handles.navigation.volume_points(volume).unwrap();
    assert_eq!(points[2], Vec3::new(3.0, 5.0, 0.0));

    editor.set_in_edit_mode(id, false).unwrap();
    let points = handles.navigation.volume_points(volume).unwrap();
    assert_eq!(points[2], Vec3::new(3.0, 8.0, 0.0));
}
