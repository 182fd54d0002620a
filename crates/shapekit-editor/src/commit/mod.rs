//! Commit adapters.
//!
//! After every structural edit a shape pushes its geometry to the engine
//! through its [`CommitStrategy`]. Each strategy talks to one engine service
//! held in [`EngineServices`]; a service that is not attached is skipped, so
//! the editor works headless.

pub mod entity_area;
pub mod game_volume;
pub mod memory;
pub mod navigation;
pub mod vis_area;

use std::fmt;

use shapekit_core::{ObjectId, Vec3, WorldTransform};

use crate::error::CommitError;
use crate::shape::{AreaParams, SoundObstruction};

pub use entity_area::{EntityAreaCommit, EntityAreaRegistry};
pub use game_volume::{GameVolumeCommit, GameVolumeInfo, GameVolumesEdit};
pub use memory::{
    EntityAreaRecord, InMemoryEntityAreas, InMemoryGameVolumes, InMemoryNavigation,
    InMemoryVisAreas, NavigationShapeRecord, VisAreaRecord,
};
pub use navigation::{
    NavigationAreaCommit, NavigationAreaType, NavigationShapeCommit, NavigationShapeParams,
    NavigationSystem, VolumeId,
};
pub use vis_area::{VisAreaCommit, VisAreaHandle, VisAreaInfo, VisAreaKind, VisAreaManager};

/// Borrowed view of the shape state a commit needs.
#[derive(Debug, Clone, Copy)]
pub struct CommitInput<'a> {
    pub id: ObjectId,
    pub name: &'a str,
    pub transform: &'a WorldTransform,
    /// Local-space points.
    pub points: &'a [Vec3],
    pub closed: bool,
    pub height: f64,
    pub obstruction: &'a SoundObstruction,
    pub area: &'a AreaParams,
    pub targets: &'a [ObjectId],
    /// The shape is being created or its points are being dragged.
    pub deferred: bool,
}

impl CommitInput<'_> {
    pub fn world_points(&self) -> Vec<Vec3> {
        self.points
            .iter()
            .map(|p| self.transform.transform_point(p))
            .collect()
    }
}

/// Pushes shape geometry into one engine service.
pub trait CommitStrategy: fmt::Debug {
    /// Registers or updates the engine-side representation.
    fn commit(
        &mut self,
        input: &CommitInput<'_>,
        services: &mut EngineServices,
    ) -> Result<(), CommitError>;

    /// Removes everything registered for the object.
    fn release(&mut self, id: ObjectId, services: &mut EngineServices);

    /// A fresh strategy with the same configuration and no engine state.
    fn clone_box(&self) -> Box<dyn CommitStrategy>;

    /// Whether a deferred commit is waiting for edit mode to end.
    fn has_pending_update(&self) -> bool {
        false
    }
}

/// Engine services the commit strategies call into.
#[derive(Default)]
pub struct EngineServices {
    pub navigation: Option<Box<dyn NavigationSystem>>,
    pub vis_areas: Option<Box<dyn VisAreaManager>>,
    pub entity_areas: Option<Box<dyn EntityAreaRegistry>>,
    pub game_volumes: Option<Box<dyn GameVolumesEdit>>,
}

impl EngineServices {
    /// No services attached; every commit is a no-op.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_navigation(mut self, navigation: impl NavigationSystem + 'static) -> Self {
        self.navigation = Some(Box::new(navigation));
        self
    }

    pub fn with_vis_areas(mut self, vis_areas: impl VisAreaManager + 'static) -> Self {
        self.vis_areas = Some(Box::new(vis_areas));
        self
    }

    pub fn with_entity_areas(mut self, entity_areas: impl EntityAreaRegistry + 'static) -> Self {
        self.entity_areas = Some(Box::new(entity_areas));
        self
    }

    pub fn with_game_volumes(mut self, game_volumes: impl GameVolumesEdit + 'static) -> Self {
        self.game_volumes = Some(Box::new(game_volumes));
        self
    }

    /// All services backed by in-memory stores, plus handles to inspect them.
    pub fn in_memory() -> (Self, InMemoryServices) {
        let handles = InMemoryServices::default();
        let services = Self::new()
            .with_navigation(handles.navigation.clone())
            .with_vis_areas(handles.vis_areas.clone())
            .with_entity_areas(handles.entity_areas.clone())
            .with_game_volumes(handles.game_volumes.clone());
        (services, handles)
    }
}

impl fmt::Debug for EngineServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineServices")
            .field("navigation", &self.navigation.is_some())
            .field("vis_areas", &self.vis_areas.is_some())
            .field("entity_areas", &self.entity_areas.is_some())
            .field("game_volumes", &self.game_volumes.is_some())
            .finish()
    }
}

/// Inspection handles returned by [`EngineServices::in_memory`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryServices {
    pub navigation: InMemoryNavigation,
    pub vis_areas: InMemoryVisAreas,
    pub entity_areas: InMemoryEntityAreas,
    pub game_volumes: InMemoryGameVolumes,
}
