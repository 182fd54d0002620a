//! Point list edits.

use shapekit_core::{ObjectId, Vec3};

use super::EditorState;
use crate::error::ShapeError;

impl EditorState {
    /// Inserts a local-space point; see [`crate::shape::ShapeObject::insert_point`].
    pub fn insert_point(
        &mut self,
        id: ObjectId,
        index: Option<usize>,
        point: Vec3,
        modifying: bool,
    ) -> Result<usize, ShapeError> {
        self.modify_shape(id, "Insert Point", |shape| {
            shape.insert_point(index, point, modifying)
        })
    }

    pub fn set_point(&mut self, id: ObjectId, index: usize, point: Vec3) -> Result<(), ShapeError> {
        self.modify_shape(id, "Move Point", |shape| shape.set_point(index, point))
    }

    pub fn remove_point(&mut self, id: ObjectId, index: usize) -> Result<(), ShapeError> {
        self.modify_shape(id, "Remove Point", |shape| shape.remove_point(index))
    }

    pub fn clear_points(&mut self, id: ObjectId) -> Result<(), ShapeError> {
        self.modify_shape(id, "Clear Points", |shape| {
            shape.clear_points();
            Ok(())
        })
    }

    pub fn reverse_shape(&mut self, id: ObjectId) -> Result<(), ShapeError> {
        self.modify_shape(id, "Reverse Shape", |shape| {
            shape.reverse_shape();
            Ok(())
        })
    }

    pub fn reset_shape(&mut self, id: ObjectId) -> Result<(), ShapeError> {
        self.modify_shape(id, "Reset Shape", |shape| {
            shape.reset_shape();
            Ok(())
        })
    }

    /// Snaps every point to the world grid, even with grid snapping off.
    ///
    /// Points that would collide after snapping keep their position.
    pub fn align_to_grid(&mut self, id: ObjectId) -> Result<(), ShapeError> {
        let snapping = self.snapping.clone();
        self.modify_shape(id, "Align To Grid", |shape| {
            let snapped: Vec<Vec3> = shape
                .world_points()
                .iter()
                .map(|p| snapping.snap(p, true))
                .collect();
            for (i, world) in snapped.iter().enumerate() {
                let local = shape.transform().inverse_transform_point(world);
                if let Err(err) = shape.set_point(i, local) {
                    tracing::debug!(shape = %shape.name(), index = i, "Grid alignment skipped: {}", err);
                }
            }
            Ok(())
        })
    }

    /// Selects a point for editing; not recorded for undo.
    pub fn select_point(&mut self, id: ObjectId, index: Option<usize>) -> Result<(), ShapeError> {
        let shape = self
            .objects
            .find_mut(id)
            .ok_or(ShapeError::ObjectNotFound(id))?;
        shape.select_point(index);
        Ok(())
    }

    /// Enters or leaves point editing; leaving flushes deferred commits.
    pub fn set_in_edit_mode(&mut self, id: ObjectId, editing: bool) -> Result<(), ShapeError> {
        let shape = self
            .objects
            .find_mut(id)
            .ok_or(ShapeError::ObjectNotFound(id))?;
        shape.set_in_edit_mode(editing, &mut self.services);
        Ok(())
    }
}
