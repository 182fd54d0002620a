//! Trigger and sound areas backed by an entity area component.

use shapekit_core::{ObjectId, Vec3};

use super::{CommitInput, CommitStrategy, EngineServices};
use crate::error::CommitError;

/// Area components of the engine's entity system, keyed by the owning
/// entity.
pub trait EntityAreaRegistry {
    /// Local-space outline. `obstruction` is `[sides..., roof, floor]`.
    fn set_points(
        &mut self,
        entity: ObjectId,
        points: &[Vec3],
        obstruction: &[bool],
        closed: bool,
        height: f64,
    );
    fn set_proximity(&mut self, entity: ObjectId, width: f64);
    fn set_id(&mut self, entity: ObjectId, id: i32);
    fn set_group(&mut self, entity: ObjectId, group: i32);
    fn set_priority(&mut self, entity: ObjectId, priority: i32);
    fn set_inner_fade_distance(&mut self, entity: ObjectId, distance: f64);
    /// Unlinks every target entity.
    fn remove_entities(&mut self, entity: ObjectId);
    fn add_entity(&mut self, entity: ObjectId, target: ObjectId);
    /// Drops the component.
    fn release(&mut self, entity: ObjectId);
}

#[derive(Debug, Clone, Default)]
pub struct EntityAreaCommit;

impl EntityAreaCommit {
    pub fn new() -> Self {
        Self
    }
}

impl CommitStrategy for EntityAreaCommit {
    fn commit(
        &mut self,
        input: &CommitInput<'_>,
        services: &mut EngineServices,
    ) -> Result<(), CommitError> {
        let Some(areas) = services.entity_areas.as_deref_mut() else {
            return Ok(());
        };
        if input.points.len() < 2 {
            return Ok(());
        }

        let entity = input.id;
        areas.set_points(
            entity,
            input.points,
            &input.obstruction.flattened(),
            input.closed,
            input.height,
        );
        areas.set_proximity(entity, input.area.width);
        areas.set_id(entity, input.area.area_id);
        areas.set_group(entity, input.area.group_id);
        areas.set_priority(entity, input.area.priority);
        areas.set_inner_fade_distance(entity, input.area.inner_fade_distance);

        areas.remove_entities(entity);
        for target in input.targets {
            areas.add_entity(entity, *target);
        }
        Ok(())
    }

    fn release(&mut self, id: ObjectId, services: &mut EngineServices) {
        if let Some(areas) = services.entity_areas.as_deref_mut() {
            areas.release(id);
        }
    }

    fn clone_box(&self) -> Box<dyn CommitStrategy> {
        Box::new(Self)
    }
}
