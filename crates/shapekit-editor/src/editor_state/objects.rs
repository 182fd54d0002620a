//! Object creation, deletion, cloning, split and merge.

use shapekit_core::{ObjectId, Vec3};
use tracing::info;

use super::EditorState;
use crate::error::ShapeError;
use crate::shape::{ShapeKind, ShapeObject};
use crate::undo::UndoRecord;

impl EditorState {
    /// Adds an empty shape named after its kind.
    pub fn create_shape(&mut self, kind: ShapeKind) -> Result<ObjectId, ShapeError> {
        let name = self.objects.unique_name(kind.name_prefix());
        let mut shape = ShapeObject::new(kind, name);
        shape.apply_edit_settings(&self.settings);
        self.add_object(shape, "Create Shape")
    }

    /// Adds a prepared object and commits it.
    pub fn add_object(
        &mut self,
        object: ShapeObject,
        description: &str,
    ) -> Result<ObjectId, ShapeError> {
        self.transaction(description, |editor| {
            let id = editor.objects.insert(object);
            editor.commit_shape(id)?;
            editor.undo.record(UndoRecord::ObjectCreated { id });
            Ok(id)
        })
    }

    /// Deletes an object and releases its engine registrations.
    pub fn delete_object(&mut self, id: ObjectId) -> Result<(), ShapeError> {
        self.transaction("Delete Object", |editor| editor.remove_object(id))
    }

    fn remove_object(&mut self, id: ObjectId) -> Result<(), ShapeError> {
        let (index, mut object) = self
            .objects
            .remove(id)
            .ok_or(ShapeError::ObjectNotFound(id))?;
        object.release(&mut self.services);
        self.undo.record(UndoRecord::ObjectDeleted { object, index });
        Ok(())
    }

    /// Copies a shape under a fresh id and name; the copy links to the same
    /// targets.
    pub fn clone_object(&mut self, id: ObjectId) -> Result<ObjectId, ShapeError> {
        let source = self.objects.find(id).ok_or(ShapeError::ObjectNotFound(id))?;
        let name = self.objects.unique_name(source.kind().name_prefix());
        let copy = source.duplicate(ObjectId::new(), name);
        self.add_object(copy, "Clone Object")
    }

    /// Splits a shape at `index`; returns the id of the new second piece.
    ///
    /// See [`ShapeObject::split_at_point`] for the meaning of `snap` and
    /// `point`.
    pub fn split_at_point(
        &mut self,
        id: ObjectId,
        index: usize,
        snap: bool,
        point: Vec3,
    ) -> Result<ObjectId, ShapeError> {
        self.transaction("Split Shape", |editor| {
            let shape = editor
                .objects
                .find(id)
                .ok_or(ShapeError::ObjectNotFound(id))?;
            let name = editor.objects.unique_name(shape.kind().name_prefix());

            let shape = editor
                .objects
                .find_mut(id)
                .ok_or(ShapeError::ObjectNotFound(id))?;
            editor.undo.store_shape(shape);
            let piece = shape.split_at_point(index, snap, point, ObjectId::new(), name)?;
            shape.update_game_area(&mut editor.services);

            let piece_id = editor.objects.insert(piece);
            editor.commit_shape(piece_id)?;
            editor.undo.record(UndoRecord::ObjectCreated { id: piece_id });
            info!(%id, piece = %piece_id, index, "Shape split");
            Ok(piece_id)
        })
    }

    /// Splices `other` into `id` at their merge edges and deletes `other`.
    pub fn merge(&mut self, id: ObjectId, other: ObjectId) -> Result<usize, ShapeError> {
        if id == other {
            return Err(ShapeError::SameObject);
        }
        self.transaction("Merge Shapes", |editor| {
            for check in [id, other] {
                if !editor.objects.contains(check) {
                    return Err(ShapeError::ObjectNotFound(check));
                }
            }
            let (shape, donor) = editor
                .objects
                .find_pair_mut(id, other)
                .ok_or(ShapeError::ObjectNotFound(other))?;
            editor.undo.store_shape(shape);
            editor.undo.store_shape(donor);
            let inserted = shape.merge_from(donor)?;
            shape.update_game_area(&mut editor.services);

            editor.remove_object(other)?;
            info!(%id, %other, inserted, "Shapes merged");
            Ok(inserted)
        })
    }
}
