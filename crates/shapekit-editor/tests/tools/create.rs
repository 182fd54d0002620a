use shapekit_core::Vec3;
use shapekit_editor::{EditorSession, MouseEvent, MouseEventKind, ShapeKind, ToolResponse};

fn at(session: &EditorSession, kind: MouseEventKind, x: f64, y: f64) -> MouseEvent {
    let screen = session.view.world_to_view(&Vec3::new(x, y, 0.0)).unwrap();
    MouseEvent::new(kind, screen)
}

fn click(session: &mut EditorSession, x: f64, y: f64) {
    for kind in [MouseEventKind::Move, MouseEventKind::LeftDown, MouseEventKind::LeftUp] {
        let event = at(session, kind, x, y);
        session.mouse_event(&event);
    }
}

#[test]
fn test_create_path_through_session() {
    let mut session = EditorSession::default();
    session.create_shape(ShapeKind::AiPath);
    assert_eq!(session.tools.active_name(), Some("Create Shape"));

    for (x, y) in [(0.0, 0.0), (6.0, 0.0), (6.0, 6.0)] {
        click(&mut session, x, y);
    }
    let finish = at(&session, MouseEventKind::LeftDoubleClick, 6.0, 6.0);
    assert_eq!(session.mouse_event(&finish), ToolResponse::Finished);
    assert!(!session.tools.is_active());

    let shape = session.editor.objects.iter().next().unwrap();
    assert_eq!(shape.name(), "AIPath1");
    assert!(!shape.is_closed());
    assert_eq!(
        shape.world_points(),
        vec![
            Vec3::new(0.0, 0.0, 0.1),
            Vec3::new(6.0, 0.0, 0.1),
            Vec3::new(6.0, 6.0, 0.1)
        ]
    );
    assert_eq!(session.undo(), Some("Create Shape".to_string()));
    assert!(session.editor.objects.is_empty());
}

#[test]
fn test_escape_aborts_creation() {
    let mut session = EditorSession::default();
    session.create_shape(ShapeKind::Area);
    click(&mut session, 0.0, 0.0);
    click(&mut session, 6.0, 0.0);
    assert_eq!(session.editor.objects.len(), 1);

    session.key_event(shapekit_editor::Key::Escape);
    assert!(session.editor.objects.is_empty());
    assert!(!session.editor.undo.can_undo());
}
