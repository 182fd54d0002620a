//! Indoor visibility areas, portals and occluders.

use serde::{Deserialize, Serialize};
use shapekit_core::{ObjectId, Vec3};

use super::{CommitInput, CommitStrategy, EngineServices};
use crate::error::CommitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisAreaKind {
    Area,
    Portal,
    OccluderArea,
    OccluderPlane,
}

impl VisAreaKind {
    /// Points needed before the engine accepts the outline.
    pub fn min_points(&self) -> usize {
        match self {
            Self::Area | Self::Portal => 3,
            Self::OccluderArea => 4,
            Self::OccluderPlane => 2,
        }
    }
}

/// Engine handle of a vis-area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisAreaHandle(pub u64);

/// Rendering parameters passed with every vis-area update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisAreaInfo {
    pub height: f64,
    pub ambient_color: Vec3,
    pub affected_by_out_lights: bool,
    pub ignore_sky_color: bool,
    pub sky_only: bool,
    pub view_dist_ratio: f64,
    pub double_side: bool,
    pub use_in_indoors: bool,
    pub ocean_is_visible: bool,
    pub portal_blending: f64,
}

impl Default for VisAreaInfo {
    fn default() -> Self {
        Self {
            height: 0.0,
            ambient_color: Vec3::zeros(),
            affected_by_out_lights: false,
            ignore_sky_color: false,
            sky_only: false,
            view_dist_ratio: 100.0,
            double_side: true,
            use_in_indoors: true,
            ocean_is_visible: false,
            portal_blending: 0.5,
        }
    }
}

/// The 3D engine's vis-area registry.
pub trait VisAreaManager {
    fn create_vis_area(&mut self, kind: VisAreaKind) -> VisAreaHandle;
    /// `points` are in world space.
    fn update_vis_area(
        &mut self,
        handle: VisAreaHandle,
        name: &str,
        points: &[Vec3],
        info: &VisAreaInfo,
    );
    fn delete_vis_area(&mut self, handle: VisAreaHandle);
}

#[derive(Debug, Clone)]
pub struct VisAreaCommit {
    kind: VisAreaKind,
    handle: Option<VisAreaHandle>,
    info: VisAreaInfo,
}

impl VisAreaCommit {
    pub fn new(kind: VisAreaKind) -> Self {
        Self {
            kind,
            handle: None,
            info: VisAreaInfo::default(),
        }
    }

    pub fn kind(&self) -> VisAreaKind {
        self.kind
    }

    pub fn handle(&self) -> Option<VisAreaHandle> {
        self.handle
    }

    pub fn info(&self) -> &VisAreaInfo {
        &self.info
    }

    /// Parameters for later commits; `height` is always taken from the shape.
    pub fn set_info(&mut self, info: VisAreaInfo) {
        self.info = info;
    }
}

impl CommitStrategy for VisAreaCommit {
    fn commit(
        &mut self,
        input: &CommitInput<'_>,
        services: &mut EngineServices,
    ) -> Result<(), CommitError> {
        let Some(vis_areas) = services.vis_areas.as_deref_mut() else {
            return Ok(());
        };
        if input.points.len() < self.kind.min_points() {
            return Ok(());
        }

        let handle = match self.handle {
            Some(handle) => handle,
            None => {
                let handle = vis_areas.create_vis_area(self.kind);
                self.handle = Some(handle);
                handle
            }
        };
        self.info.height = input.height;
        vis_areas.update_vis_area(handle, input.name, &input.world_points(), &self.info);
        Ok(())
    }

    fn release(&mut self, _id: ObjectId, services: &mut EngineServices) {
        let Some(vis_areas) = services.vis_areas.as_deref_mut() else {
            return;
        };
        if let Some(handle) = self.handle.take() {
            vis_areas.delete_vis_area(handle);
        }
    }

    fn clone_box(&self) -> Box<dyn CommitStrategy> {
        let mut copy = Self::new(self.kind);
        copy.info = self.info.clone();
        Box::new(copy)
    }
}
