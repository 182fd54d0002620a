use shapekit_core::{ObjectId, Vec3};
use shapekit_editor::{EditorSession, Key, MouseEvent, MouseEventKind, ShapeKind};

fn session_with_path() -> (EditorSession, ObjectId) {
    let mut session = EditorSession::default();
    let id = session.editor.create_shape(ShapeKind::AiPath).unwrap();
    for x in [0.0, 4.0, 8.0] {
        session
            .editor
            .insert_point(id, None, Vec3::new(x, 0.0, 0.0), true)
            .unwrap();
    }
    (session, id)
}

fn at(session: &EditorSession, kind: MouseEventKind, x: f64, y: f64) -> MouseEvent {
    let screen = session.view.world_to_view(&Vec3::new(x, y, 0.0)).unwrap();
    MouseEvent::new(kind, screen)
}

#[test]
fn test_drag_point_is_one_undo_step() {
    let (mut session, id) = session_with_path();
    session.edit_shape(id);
    let before = session.editor.undo.undo_count();

    let events = [
        at(&session, MouseEventKind::LeftDown, 4.0, 0.0),
        at(&session, MouseEventKind::Move, 4.0, 1.5),
        at(&session, MouseEventKind::Move, 4.0, 3.0),
        at(&session, MouseEventKind::LeftUp, 4.0, 3.0),
    ];
    for event in &events {
        session.mouse_event(event);
    }

    let shape = session.editor.shape(id).unwrap();
    assert_eq!(shape.world_point(1), Some(Vec3::new(4.0, 3.0, 0.0)));
    assert_eq!(session.editor.undo.undo_count(), before + 1);
    assert_eq!(session.editor.undo.undo_description(), Some("Shape Modify"));

    session.undo();
    let shape = session.editor.shape(id).unwrap();
    assert_eq!(shape.world_point(1), Some(Vec3::new(4.0, 0.0, 0.0)));
}

#[test]
fn test_ctrl_click_inserts_on_edge() {
    let (mut session, id) = session_with_path();
    session.edit_shape(id);

    let down = at(&session, MouseEventKind::LeftDown, 2.0, 0.0).with_ctrl();
    let up = at(&session, MouseEventKind::LeftUp, 2.0, 0.0);
    session.mouse_event(&down);
    session.mouse_event(&up);

    let shape = session.editor.shape(id).unwrap();
    assert_eq!(shape.point_count(), 4);
    let inserted = shape.world_point(1).unwrap();
    assert!((inserted - Vec3::new(2.0, 0.0, 0.0)).norm() < 1e-6);
    assert!(!session.editor.undo.is_recording());
}

#[test]
fn test_delete_key_removes_selected_point() {
    let (mut session, id) = session_with_path();
    session.edit_shape(id);
    session.mouse_event(&at(&session, MouseEventKind::LeftDown, 8.0, 0.0));
    session.mouse_event(&at(&session, MouseEventKind::LeftUp, 8.0, 0.0));
    assert_eq!(session.editor.shape(id).unwrap().selected_point(), Some(2));

    session.key_event(Key::Delete);
    let shape = session.editor.shape(id).unwrap();
    assert_eq!(shape.point_count(), 2);
    assert_eq!(shape.selected_point(), None);
    assert_eq!(session.editor.undo.undo_description(), Some("Delete Point"));
}

#[test]
fn test_leaving_tool_ends_edit_mode() {
    let (mut session, id) = session_with_path();
    session.edit_shape(id);
    assert!(session.editor.shape(id).unwrap().is_in_edit_mode());

    session.clear_tool();
    assert!(!session.editor.shape(id).unwrap().is_in_edit_mode());
    assert!(!session.tools.is_active());
}

#[test]
fn test_delete_during_drag_is_its_own_step() {
    let (mut session, id) = session_with_path();
    session.edit_shape(id);
    let down = at(&session, MouseEventKind::LeftDown, 4.0, 0.0);
    let drag = at(&session, MouseEventKind::Move, 4.0, 1.5);
    session.mouse_event(&down);
    session.mouse_event(&drag);
    assert!(session.editor.undo.is_recording());

    session.delete_object(id).unwrap();
    assert!(session.editor.shape(id).is_none());
    assert!(!session.tools.is_active());
    assert!(!session.editor.undo.is_recording());
    assert_eq!(session.editor.undo.undo_description(), Some("Delete Object"));

    // The drag was rolled back before the shape was stored for undo.
    assert_eq!(session.undo(), Some("Delete Object".to_string()));
    let shape = session.editor.shape(id).unwrap();
    assert_eq!(shape.world_point(1), Some(Vec3::new(4.0, 0.0, 0.0)));
}
