//! Undo/redo transactions for shape edits.
//!
//! Edits are grouped between [`UndoManager::begin`] and
//! [`UndoManager::accept`] (or [`UndoManager::cancel`], which rolls the
//! group back). A shape's state is snapshotted the first time it is stored
//! within a transaction; creating and deleting objects is recorded as well.

use shapekit_core::ObjectId;
use tracing::{debug, warn};

use crate::commit::EngineServices;
use crate::object_manager::ObjectManager;
use crate::shape::{ShapeObject, ShapeSnapshot};

/// One reversible change.
#[derive(Debug)]
pub enum UndoRecord {
    /// State of a shape before the transaction touched it.
    ShapeModified { id: ObjectId, snapshot: ShapeSnapshot },
    /// An object was added.
    ObjectCreated { id: ObjectId },
    /// An object was removed from `index` in creation order.
    ObjectDeleted { object: ShapeObject, index: usize },
}

impl UndoRecord {
    pub fn object_id(&self) -> ObjectId {
        match self {
            Self::ShapeModified { id, .. } | Self::ObjectCreated { id } => *id,
            Self::ObjectDeleted { object, .. } => object.id(),
        }
    }

    /// Reverts the change and returns the record that re-applies it.
    fn apply(
        self,
        objects: &mut ObjectManager,
        services: &mut EngineServices,
    ) -> Option<UndoRecord> {
        match self {
            Self::ShapeModified { id, snapshot } => {
                let Some(shape) = objects.find_mut(id) else {
                    warn!(%id, "Undo target no longer exists");
                    return None;
                };
                let current = shape.snapshot();
                shape.restore(snapshot);
                shape.update_game_area(services);
                Some(Self::ShapeModified {
                    id,
                    snapshot: current,
                })
            }
            Self::ObjectCreated { id } => {
                let (index, mut object) = objects.remove(id)?;
                object.release(services);
                Some(Self::ObjectDeleted { object, index })
            }
            Self::ObjectDeleted { object, index } => {
                let id = objects.insert_at(index, object);
                if let Some(shape) = objects.find_mut(id) {
                    shape.update_game_area(services);
                }
                Some(Self::ObjectCreated { id })
            }
        }
    }
}

#[derive(Debug)]
struct Transaction {
    description: String,
    records: Vec<UndoRecord>,
}

impl Transaction {
    fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            records: Vec::new(),
        }
    }

    /// Applies records newest first; the result re-applies them.
    fn revert(self, objects: &mut ObjectManager, services: &mut EngineServices) -> Self {
        let records = self
            .records
            .into_iter()
            .rev()
            .filter_map(|record| record.apply(objects, services))
            .collect();
        Self {
            description: self.description,
            records,
        }
    }
}

/// Undo and redo stacks of shape transactions.
#[derive(Debug)]
pub struct UndoManager {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    max_depth: usize,
    current: Option<Transaction>,
}

impl UndoManager {
    /// Create a new undo manager with default depth (100)
    pub fn new() -> Self {
        Self::with_depth(100)
    }

    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            current: None,
        }
    }

    /// Opens a transaction. Opening one while another is recording keeps
    /// the existing one.
    pub fn begin(&mut self) {
        if self.current.is_some() {
            warn!("Undo transaction already recording");
            return;
        }
        self.current = Some(Transaction::new(String::new()));
    }

    pub fn is_recording(&self) -> bool {
        self.current.is_some()
    }

    /// Snapshots `shape` unless it was already stored in this transaction.
    pub fn store_shape(&mut self, shape: &ShapeObject) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        let id = shape.id();
        let stored = current
            .records
            .iter()
            .any(|r| matches!(r, UndoRecord::ShapeModified { id: other, .. } if *other == id));
        if !stored {
            current.records.push(UndoRecord::ShapeModified {
                id,
                snapshot: shape.snapshot(),
            });
        }
    }

    /// Adds a record to the open transaction; dropped when not recording.
    pub fn record(&mut self, record: UndoRecord) {
        match self.current.as_mut() {
            Some(current) => current.records.push(record),
            None => debug!(id = %record.object_id(), "Change made outside an undo transaction"),
        }
    }

    /// Closes the transaction and pushes it onto the undo stack.
    ///
    /// Snapshots of shapes that ended up unchanged are discarded; a
    /// transaction with nothing left is not kept.
    pub fn accept(&mut self, description: &str, objects: &ObjectManager) {
        let Some(mut transaction) = self.current.take() else {
            return;
        };
        transaction.records.retain(|record| match record {
            UndoRecord::ShapeModified { id, snapshot } => objects
                .find(*id)
                .map_or(true, |shape| shape.snapshot() != *snapshot),
            _ => true,
        });
        if transaction.records.is_empty() {
            return;
        }

        transaction.description = description.to_string();
        debug!(description, records = transaction.records.len(), "Undo accepted");
        self.redo_stack.clear();
        self.undo_stack.push(transaction);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }

    /// Closes the transaction and rolls back everything it recorded.
    pub fn cancel(&mut self, objects: &mut ObjectManager, services: &mut EngineServices) {
        if let Some(transaction) = self.current.take() {
            transaction.revert(objects, services);
        }
    }

    /// Reverts the newest transaction; returns its description.
    pub fn undo(
        &mut self,
        objects: &mut ObjectManager,
        services: &mut EngineServices,
    ) -> Option<String> {
        if self.is_recording() {
            warn!("Cannot undo while a transaction is recording");
            return None;
        }
        let transaction = self.undo_stack.pop()?;
        let redo = transaction.revert(objects, services);
        let description = redo.description.clone();
        self.redo_stack.push(redo);
        Some(description)
    }

    /// Re-applies the newest undone transaction; returns its description.
    pub fn redo(
        &mut self,
        objects: &mut ObjectManager,
        services: &mut EngineServices,
    ) -> Option<String> {
        if self.is_recording() {
            warn!("Cannot redo while a transaction is recording");
            return None;
        }
        let transaction = self.redo_stack.pop()?;
        let undo = transaction.revert(objects, services);
        let description = undo.description.clone();
        self.undo_stack.push(undo);
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|t| t.description.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|t| t.description.as_str())
    }

    /// Drops all history; an open transaction is discarded without rollback.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current = None;
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}
