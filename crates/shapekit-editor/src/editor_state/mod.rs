//! Editor state shared by tools and the session.
//!
//! Every mutation goes through here so it is recorded for undo and pushed
//! to the engine afterwards. Split into submodules:
//! - `points`: point list edits on a single shape
//! - `objects`: creation, deletion, cloning, split and merge
//! - `properties`: name, height, topology, targets and area parameters

mod objects;
mod points;
mod properties;

use shapekit_core::ObjectId;
use shapekit_settings::{Config, ShapeEditSettings};

use crate::commit::EngineServices;
use crate::error::ShapeError;
use crate::object_manager::ObjectManager;
use crate::shape::ShapeObject;
use crate::snapping::SnappingPreferences;
use crate::undo::UndoManager;

/// Objects, history, snapping and engine services of one editing session.
#[derive(Debug)]
pub struct EditorState {
    pub objects: ObjectManager,
    pub undo: UndoManager,
    pub snapping: SnappingPreferences,
    pub services: EngineServices,
    pub settings: ShapeEditSettings,
}

impl EditorState {
    pub fn new(config: &Config, services: EngineServices) -> Self {
        Self {
            objects: ObjectManager::new(),
            undo: UndoManager::with_depth(config.shape_edit.undo_depth),
            snapping: SnappingPreferences::from_settings(&config.snapping),
            services,
            settings: config.shape_edit.clone(),
        }
    }

    pub fn shape(&self, id: ObjectId) -> Option<&ShapeObject> {
        self.objects.find(id)
    }

    /// Runs `f` inside an undo transaction, opening and accepting one under
    /// `description` unless a transaction is already recording.
    pub fn transaction<T>(
        &mut self,
        description: &str,
        f: impl FnOnce(&mut Self) -> Result<T, ShapeError>,
    ) -> Result<T, ShapeError> {
        let own = !self.undo.is_recording();
        if own {
            self.undo.begin();
        }
        let result = f(self);
        if own {
            self.undo.accept(description, &self.objects);
        }
        result
    }

    /// Stores undo for one shape, applies `f` and commits on success.
    pub(crate) fn modify_shape<T>(
        &mut self,
        id: ObjectId,
        description: &str,
        f: impl FnOnce(&mut ShapeObject) -> Result<T, ShapeError>,
    ) -> Result<T, ShapeError> {
        self.transaction(description, |editor| {
            let shape = editor
                .objects
                .find_mut(id)
                .ok_or(ShapeError::ObjectNotFound(id))?;
            editor.undo.store_shape(shape);
            let value = f(shape)?;
            shape.update_game_area(&mut editor.services);
            Ok(value)
        })
    }

    /// Pushes a shape's current geometry to the engine.
    pub fn commit_shape(&mut self, id: ObjectId) -> Result<(), ShapeError> {
        let shape = self
            .objects
            .find_mut(id)
            .ok_or(ShapeError::ObjectNotFound(id))?;
        shape.update_game_area(&mut self.services);
        Ok(())
    }

    pub fn begin_undo(&mut self) {
        self.undo.begin();
    }

    pub fn accept_undo(&mut self, description: &str) {
        self.undo.accept(description, &self.objects);
    }

    pub fn cancel_undo(&mut self) {
        self.undo.cancel(&mut self.objects, &mut self.services);
    }

    /// Reverts the newest transaction; returns its description.
    pub fn undo(&mut self) -> Option<String> {
        self.undo.undo(&mut self.objects, &mut self.services)
    }

    pub fn redo(&mut self) -> Option<String> {
        self.undo.redo(&mut self.objects, &mut self.services)
    }

    /// Ids of objects removed since the last call.
    pub fn drain_deleted(&mut self) -> Vec<ObjectId> {
        self.objects.drain_removed()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&Config::default(), EngineServices::new())
    }
}
