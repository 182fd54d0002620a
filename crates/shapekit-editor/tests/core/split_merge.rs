use shapekit_core::{ObjectId, Vec3};
use shapekit_editor::{EditorState, ShapeError, ShapeKind};

fn shape(editor: &mut EditorState, kind: ShapeKind, points: &[(f64, f64)]) -> ObjectId {
    let id = editor.create_shape(kind).unwrap();
    for &(x, y) in points {
        let world = Vec3::new(x, y, 0.0);
        let local = editor.shape(id).unwrap().transform().inverse_transform_point(&world);
        editor.insert_point(id, None, local, true).unwrap();
    }
    id
}

fn world(editor: &EditorState, id: ObjectId) -> Vec<(f64, f64)> {
    editor
        .shape(id)
        .unwrap()
        .world_points()
        .iter()
        .map(|p| (p.x, p.y))
        .collect()
}

fn other_than(editor: &EditorState, id: ObjectId) -> ObjectId {
    editor.objects.iter().map(|o| o.id()).find(|o| *o != id).unwrap()
}

#[test]
fn test_split_at_vertex() {
    let mut editor = EditorState::default();
    let id = shape(
        &mut editor,
        ShapeKind::AiPath,
        &[(0.0, 0.0), (4.0, 0.0), (8.0, 0.0), (12.0, 0.0)],
    );
    let piece = editor.split_at_point(id, 2, true, Vec3::zeros()).unwrap();

    assert_eq!(world(&editor, id), vec![(0.0, 0.0), (4.0, 0.0), (8.0, 0.0)]);
    assert_eq!(world(&editor, piece), vec![(8.0, 0.0), (12.0, 0.0)]);
    assert_eq!(editor.shape(piece).unwrap().name(), "AIPath2");
    assert_eq!(editor.shape(piece).unwrap().point(0), Some(Vec3::zeros()));
}

#[test]
fn test_split_on_edge_inserts_point() {
    let mut editor = EditorState::default();
    let id = shape(
        &mut editor,
        ShapeKind::AiPath,
        &[(0.0, 0.0), (4.0, 0.0), (8.0, 0.0)],
    );
    let piece = editor
        .split_at_point(id, 0, false, Vec3::new(2.0, 0.0, 0.0))
        .unwrap();

    assert_eq!(world(&editor, id), vec![(0.0, 0.0), (2.0, 0.0)]);
    assert_eq!(world(&editor, piece), vec![(2.0, 0.0), (4.0, 0.0), (8.0, 0.0)]);
}

#[test]
fn test_split_at_endpoint_is_rejected() {
    let mut editor = EditorState::default();
    let id = shape(
        &mut editor,
        ShapeKind::AiPath,
        &[(0.0, 0.0), (4.0, 0.0), (8.0, 0.0)],
    );
    let before = editor.undo.undo_count();
    assert_eq!(
        editor.split_at_point(id, 2, true, Vec3::zeros()),
        Err(ShapeError::SplitAtEndpoint { index: 2 })
    );
    assert_eq!(editor.objects.len(), 1);
    assert_eq!(editor.undo.undo_count(), before);
}

#[test]
fn test_split_leaving_small_piece_is_rejected() {
    let mut editor = EditorState::default();
    let id = shape(
        &mut editor,
        ShapeKind::AiShape,
        &[(0.0, 0.0), (4.0, 0.0), (8.0, 0.0), (8.0, 4.0)],
    );
    assert_eq!(
        editor.split_at_point(id, 1, true, Vec3::zeros()),
        Err(ShapeError::TooFewPoints { min: 3 })
    );
    assert_eq!(editor.shape(id).unwrap().point_count(), 4);
}

#[test]
fn test_undo_split_removes_piece() {
    let mut editor = EditorState::default();
    let id = shape(
        &mut editor,
        ShapeKind::AiPath,
        &[(0.0, 0.0), (4.0, 0.0), (8.0, 0.0)],
    );
    let piece = editor.split_at_point(id, 1, true, Vec3::zeros()).unwrap();
    assert_eq!(editor.undo(), Some("Split Shape".to_string()));

    assert!(editor.shape(piece).is_none());
    assert_eq!(
        world(&editor, id),
        vec![(0.0, 0.0), (4.0, 0.0), (8.0, 0.0)]
    );
}

fn merge_pair(b: &[(f64, f64)]) -> (EditorState, ObjectId, ObjectId) {
    let mut editor = EditorState::default();
    let a = shape(&mut editor, ShapeKind::AiPath, &[(0.0, 0.0), (4.0, 0.0)]);
    let b = shape(&mut editor, ShapeKind::AiPath, b);
    for id in [a, b] {
        editor.objects.find_mut(id).unwrap().set_merge_index(Some(0));
    }
    (editor, a, b)
}

#[test]
fn test_merge_walks_other_backwards_by_default() {
    let (mut editor, a, b) = merge_pair(&[(0.0, 2.0), (4.0, 2.0)]);
    assert_eq!(editor.merge(a, b), Ok(2));

    assert_eq!(
        world(&editor, a),
        vec![(0.0, 0.0), (0.0, 2.0), (4.0, 2.0), (4.0, 0.0)]
    );
    assert!(editor.shape(b).is_none());
    assert_eq!(editor.drain_deleted(), vec![b]);
}

#[test]
fn test_merge_flips_when_shorter() {
    let (mut editor, a, b) = merge_pair(&[(4.0, 2.0), (0.0, 2.0)]);
    assert_eq!(editor.merge(a, b), Ok(2));

    assert_eq!(
        world(&editor, a),
        vec![(0.0, 0.0), (0.0, 2.0), (4.0, 2.0), (4.0, 0.0)]
    );
}

#[test]
fn test_merge_skips_coincident_points() {
    let (mut editor, a, b) = merge_pair(&[(4.0, 0.0), (8.0, 0.0)]);
    assert_eq!(editor.merge(a, b), Ok(1));
    assert_eq!(world(&editor, a), vec![(0.0, 0.0), (8.0, 0.0), (4.0, 0.0)]);
}

#[test]
fn test_merge_needs_both_edges() {
    let (mut editor, a, b) = merge_pair(&[(0.0, 2.0), (4.0, 2.0)]);
    editor.objects.find_mut(b).unwrap().set_merge_index(None);
    assert_eq!(editor.merge(a, b), Err(ShapeError::MergeIndexMissing));
    assert_eq!(editor.merge(a, a), Err(ShapeError::SameObject));
    assert_eq!(editor.objects.len(), 2);
}

#[test]
fn test_undo_merge_restores_both() {
    let (mut editor, a, b) = merge_pair(&[(0.0, 2.0), (4.0, 2.0)]);
    editor.merge(a, b).unwrap();
    assert_eq!(editor.undo(), Some("Merge Shapes".to_string()));

    assert_eq!(world(&editor, a), vec![(0.0, 0.0), (4.0, 0.0)]);
    assert_eq!(world(&editor, b), vec![(0.0, 2.0), (4.0, 2.0)]);
    assert_eq!(other_than(&editor, a), b);
}
