use shapekit_core::{ObjectId, Vec3};
use shapekit_editor::{EditorSession, MouseEvent, MouseEventKind, ShapeKind};

fn path(session: &mut EditorSession, xs: &[f64]) -> ObjectId {
    let id = session.editor.create_shape(ShapeKind::AiPath).unwrap();
    for &x in xs {
        let world = Vec3::new(x, 0.0, 0.0);
        let local = session
            .editor
            .shape(id)
            .unwrap()
            .transform()
            .inverse_transform_point(&world);
        session.editor.insert_point(id, None, local, true).unwrap();
    }
    id
}

fn down(session: &EditorSession, x: f64) -> MouseEvent {
    let screen = session.view.world_to_view(&Vec3::new(x, 0.0, 0.0)).unwrap();
    MouseEvent::new(MouseEventKind::LeftDown, screen)
}

#[test]
fn test_split_then_undo() {
    let mut session = EditorSession::default();
    let id = path(&mut session, &[0.0, 4.0, 8.0]);
    session.split_shape(id);
    let event = down(&session, 4.0);
    session.mouse_event(&event);

    assert!(!session.tools.is_active());
    assert_eq!(session.editor.objects.len(), 2);

    assert_eq!(session.undo(), Some("Split Shape".to_string()));
    assert_eq!(session.editor.objects.len(), 1);
    assert_eq!(session.editor.shape(id).unwrap().point_count(), 3);
}

#[test]
fn test_merge_selected_paths() {
    let mut session = EditorSession::default();
    let a = path(&mut session, &[-8.0, -2.0]);
    let b = path(&mut session, &[2.0, 8.0]);
    session.editor.objects.select(a);
    session.editor.objects.select(b);

    session.merge_shapes();
    let first = down(&session, -5.0);
    let second = down(&session, 5.0);
    session.mouse_event(&first);
    session.mouse_event(&second);

    assert!(!session.tools.is_active());
    assert!(session.editor.shape(b).is_none());
    assert_eq!(session.editor.shape(a).unwrap().point_count(), 4);
}
