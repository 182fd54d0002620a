//! Shape property setters.

use shapekit_core::ObjectId;

use super::EditorState;
use crate::error::ShapeError;
use crate::shape::AreaParams;

impl EditorState {
    /// Opens or closes the outline. Closing commits the shape.
    pub fn set_closed(&mut self, id: ObjectId, closed: bool) -> Result<(), ShapeError> {
        self.transaction("Set Closed", |editor| {
            let shape = editor
                .objects
                .find_mut(id)
                .ok_or(ShapeError::ObjectNotFound(id))?;
            editor.undo.store_shape(shape);
            shape.set_closed(closed);
            if closed {
                shape.update_game_area(&mut editor.services);
            }
            Ok(())
        })
    }

    pub fn set_height(&mut self, id: ObjectId, height: f64) -> Result<(), ShapeError> {
        self.modify_shape(id, "Set Height", |shape| {
            shape.set_height(height);
            Ok(())
        })
    }

    pub fn set_per_vertex_height(&mut self, id: ObjectId, enabled: bool) -> Result<(), ShapeError> {
        self.modify_shape(id, "Set Height Mode", |shape| {
            shape.set_per_vertex_height(enabled);
            Ok(())
        })
    }

    /// Renames a shape; navigation shapes are re-registered under the new name.
    pub fn set_name(&mut self, id: ObjectId, name: &str) -> Result<(), ShapeError> {
        let name = name.to_string();
        self.modify_shape(id, "Rename", |shape| {
            shape.set_name_raw(name);
            Ok(())
        })
    }

    pub fn add_target(&mut self, id: ObjectId, target: ObjectId) -> Result<(), ShapeError> {
        self.modify_shape(id, "Add Target", |shape| {
            if !shape.targets().contains(&target) {
                shape.targets_mut().push(target);
            }
            Ok(())
        })
    }

    pub fn remove_target(&mut self, id: ObjectId, target: ObjectId) -> Result<(), ShapeError> {
        self.modify_shape(id, "Remove Target", |shape| {
            shape.targets_mut().retain(|t| *t != target);
            Ok(())
        })
    }

    pub fn set_area_params(&mut self, id: ObjectId, area: AreaParams) -> Result<(), ShapeError> {
        self.modify_shape(id, "Area Properties", |shape| {
            shape.set_area_params(area);
            Ok(())
        })
    }

    /// Marks whether the edge starting at `side` blocks sound.
    pub fn set_side_obstructs_sound(
        &mut self,
        id: ObjectId,
        side: usize,
        obstructs: bool,
    ) -> Result<(), ShapeError> {
        self.modify_shape(id, "Sound Obstruction", |shape| {
            let len = shape.point_count();
            if shape.set_side_obstructs_sound(side, obstructs) {
                Ok(())
            } else {
                Err(ShapeError::IndexOutOfRange { index: side, len })
            }
        })
    }

    pub fn set_roof_obstructs_sound(&mut self, id: ObjectId, obstructs: bool) -> Result<(), ShapeError> {
        self.modify_shape(id, "Sound Obstruction", |shape| {
            shape.set_roof_obstructs_sound(obstructs);
            Ok(())
        })
    }

    pub fn set_floor_obstructs_sound(
        &mut self,
        id: ObjectId,
        obstructs: bool,
    ) -> Result<(), ShapeError> {
        self.modify_shape(id, "Sound Obstruction", |shape| {
            shape.set_floor_obstructs_sound(obstructs);
            Ok(())
        })
    }
}
