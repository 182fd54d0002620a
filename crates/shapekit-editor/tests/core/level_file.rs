use shapekit_core::{ObjectId, Vec3};
use shapekit_editor::{EditorState, EngineServices, LevelFile, ShapeKind};
use shapekit_settings::Config;
use tempfile::tempdir;

fn populated() -> (EditorState, ObjectId, ObjectId) {
    let mut editor = EditorState::default();
    let area = editor.create_shape(ShapeKind::Area).unwrap();
    for (x, y) in [(10.0, 10.0), (14.0, 10.0), (14.0, 13.0)] {
        let world = Vec3::new(x, y, 1.0);
        let local = editor.shape(area).unwrap().transform().inverse_transform_point(&world);
        editor.insert_point(area, None, local, true).unwrap();
    }
    editor.set_height(area, 3.0).unwrap();
    editor.set_side_obstructs_sound(area, 1, true).unwrap();

    let path = editor.create_shape(ShapeKind::AiPath).unwrap();
    for x in [0.0, 5.0] {
        editor
            .insert_point(path, None, Vec3::new(x, 0.0, 0.0), true)
            .unwrap();
    }
    editor.add_target(area, path).unwrap();
    (editor, area, path)
}

#[test]
fn test_save_and_load_level() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("level.json");
    let (editor, area, path) = populated();

    LevelFile::from_editor("Test Level", &editor)
        .save_to_file(&file)
        .unwrap();
    let level = LevelFile::load_from_file(&file).unwrap();
    assert_eq!(level.metadata.name, "Test Level");
    assert_eq!(level.shapes.len(), 2);

    let (services, handles) = EngineServices::in_memory();
    let mut loaded = EditorState::new(&Config::default(), services);
    assert_eq!(level.restore_into(&mut loaded).unwrap(), 2);

    let original = editor.shape(area).unwrap();
    let restored = loaded.shape(area).unwrap();
    assert_eq!(restored.world_points(), original.world_points());
    assert_eq!(restored.height(), 3.0);
    assert!(restored.obstruction().sides[1]);
    assert_eq!(restored.targets(), &[path]);

    let order: Vec<_> = loaded.objects.iter().map(|o| o.id()).collect();
    assert_eq!(order, vec![area, path]);
    assert!(!loaded.undo.can_undo());
    assert!(handles.entity_areas.area(area).is_some());
    assert!(handles.navigation.shape("AIPath1").is_some());
}

#[test]
fn test_corrupt_file_fails_to_load() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "{ not json").unwrap();
    assert!(LevelFile::load_from_file(&file).is_err());
}

#[test]
fn test_non_finite_point_rejects_whole_level() {
    let (editor, _, _) = populated();
    let mut level = LevelFile::from_editor("Bad", &editor);
    level.shapes[1].points[1].x = f64::NAN;

    let mut target = EditorState::default();
    assert!(level.restore_into(&mut target).is_err());
    assert!(target.objects.is_empty());
}

#[test]
fn test_names_resume_after_loaded_shapes() {
    let (editor, _, _) = populated();
    let level = LevelFile::from_editor("Names", &editor);
    let mut target = EditorState::default();
    level.restore_into(&mut target).unwrap();

    let id = target.create_shape(ShapeKind::AiPath).unwrap();
    assert_eq!(target.shape(id).unwrap().name(), "AIPath2");
}
