//! Game volumes: an entity area plus a volume registered with the game.

use shapekit_core::{ObjectId, Vec3};

use super::{CommitInput, CommitStrategy, EngineServices, EntityAreaCommit};
use crate::error::CommitError;

/// Volume description sent to the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameVolumeInfo {
    /// Local-space points.
    pub points: Vec<Vec3>,
    pub height: f64,
    pub closed: bool,
}

/// The game's volume registry.
pub trait GameVolumesEdit {
    fn set_volume(&mut self, entity: ObjectId, info: &GameVolumeInfo);
    fn destroy_volume(&mut self, entity: ObjectId);
}

#[derive(Debug, Clone, Default)]
pub struct GameVolumeCommit {
    area: EntityAreaCommit,
}

impl GameVolumeCommit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommitStrategy for GameVolumeCommit {
    fn commit(
        &mut self,
        input: &CommitInput<'_>,
        services: &mut EngineServices,
    ) -> Result<(), CommitError> {
        self.area.commit(input, services)?;

        if let Some(volumes) = services.game_volumes.as_deref_mut() {
            let info = GameVolumeInfo {
                points: input.points.to_vec(),
                height: input.height,
                closed: input.closed,
            };
            volumes.set_volume(input.id, &info);
        }
        Ok(())
    }

    fn release(&mut self, id: ObjectId, services: &mut EngineServices) {
        self.area.release(id, services);
        if let Some(volumes) = services.game_volumes.as_deref_mut() {
            volumes.destroy_volume(id);
        }
    }

    fn clone_box(&self) -> Box<dyn CommitStrategy> {
        Box::new(Self::new())
    }
}
