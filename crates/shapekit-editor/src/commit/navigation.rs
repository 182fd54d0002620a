//! AI navigation shapes and navigation-mesh volumes.

use serde::{Deserialize, Serialize};
use shapekit_core::{ObjectId, Vec3};
use tracing::debug;

use super::{CommitInput, CommitStrategy, EngineServices};
use crate::error::CommitError;

/// How the navigation system interprets a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationAreaType {
    Path,
    Generic,
    OcclusionPlane,
    Territory,
}

/// Handle to a navigation-mesh volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeId(pub u32);

/// Arguments for [`NavigationSystem::create_navigation_shape`].
#[derive(Debug, Clone, Copy)]
pub struct NavigationShapeParams<'a> {
    pub name: &'a str,
    pub area_type: NavigationAreaType,
    /// World-space points.
    pub points: &'a [Vec3],
    pub height: f64,
    pub closed: bool,
}

/// The engine's AI navigation system.
pub trait NavigationSystem {
    fn does_navigation_shape_exist(&self, name: &str, area_type: NavigationAreaType) -> bool;

    /// Returns `false` when the system refuses the shape.
    fn create_navigation_shape(&mut self, params: &NavigationShapeParams<'_>) -> bool;

    fn delete_navigation_shape(&mut self, name: &str);

    fn create_volume(&mut self, points: &[Vec3], height: f64) -> Option<VolumeId>;

    fn set_volume(&mut self, volume: VolumeId, points: &[Vec3], height: f64) -> bool;

    fn destroy_volume(&mut self, volume: VolumeId);

    fn validate_volume(&self, volume: VolumeId) -> bool;
}

/// Registers a named navigation shape (AI paths, shapes, occlusion planes
/// and territories).
///
/// The shape is re-registered on every commit: the previous registration is
/// removed first, then the current name is checked for conflicts.
#[derive(Debug, Clone)]
pub struct NavigationShapeCommit {
    area_type: NavigationAreaType,
    last_name: Option<String>,
    last_succeeded: bool,
}

impl NavigationShapeCommit {
    pub fn new(area_type: NavigationAreaType) -> Self {
        Self {
            area_type,
            last_name: None,
            last_succeeded: true,
        }
    }

    pub fn area_type(&self) -> NavigationAreaType {
        self.area_type
    }

    /// Name the shape is currently registered under.
    pub fn registered_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    // Territories always replace their previous registration and never
    // fail on a name clash.
    fn commit_territory(
        &mut self,
        input: &CommitInput<'_>,
        navigation: &mut dyn NavigationSystem,
    ) -> Result<(), CommitError> {
        if let Some(last) = self.last_name.take() {
            navigation.delete_navigation_shape(&last);
        }
        self.last_name = Some(input.name.to_string());

        let points = input.world_points();
        let params = NavigationShapeParams {
            name: input.name,
            area_type: self.area_type,
            points: &points,
            height: input.height,
            closed: input.closed,
        };
        navigation.create_navigation_shape(&params);
        self.last_succeeded = true;
        Ok(())
    }
}

impl CommitStrategy for NavigationShapeCommit {
    fn commit(
        &mut self,
        input: &CommitInput<'_>,
        services: &mut EngineServices,
    ) -> Result<(), CommitError> {
        let Some(navigation) = services.navigation.as_deref_mut() else {
            return Ok(());
        };
        if self.area_type == NavigationAreaType::Territory {
            return self.commit_territory(input, navigation);
        }

        if let Some(last) = self.last_name.take() {
            if self.last_succeeded {
                navigation.delete_navigation_shape(&last);
            }
        }

        if navigation.does_navigation_shape_exist(input.name, self.area_type) {
            self.last_succeeded = false;
            return Err(CommitError::NameInUse {
                name: input.name.to_string(),
            });
        }

        let points = input.world_points();
        if points.is_empty() {
            self.last_succeeded = true;
            return Ok(());
        }

        let height = match self.area_type {
            NavigationAreaType::Path => 0.0,
            _ => input.height,
        };
        let params = NavigationShapeParams {
            name: input.name,
            area_type: self.area_type,
            points: &points,
            height,
            closed: input.closed,
        };
        if !navigation.create_navigation_shape(&params) {
            self.last_succeeded = false;
            return Err(CommitError::ShapeRejected {
                name: input.name.to_string(),
            });
        }

        debug!(shape = %input.name, points = points.len(), "Navigation shape registered");
        self.last_name = Some(input.name.to_string());
        self.last_succeeded = true;
        Ok(())
    }

    fn release(&mut self, _id: ObjectId, services: &mut EngineServices) {
        let Some(navigation) = services.navigation.as_deref_mut() else {
            return;
        };
        if let Some(last) = self.last_name.take() {
            if self.last_succeeded {
                navigation.delete_navigation_shape(&last);
            }
        }
    }

    fn clone_box(&self) -> Box<dyn CommitStrategy> {
        Box::new(Self::new(self.area_type))
    }
}

/// Keeps a navigation-mesh volume in sync with the shape.
///
/// Commits are held back while the shape is being created or dragged and
/// flushed when editing ends.
#[derive(Debug, Clone, Default)]
pub struct NavigationAreaCommit {
    volume: Option<VolumeId>,
    pending: bool,
}

impl NavigationAreaCommit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume(&self) -> Option<VolumeId> {
        self.volume
    }
}

impl CommitStrategy for NavigationAreaCommit {
    fn commit(
        &mut self,
        input: &CommitInput<'_>,
        services: &mut EngineServices,
    ) -> Result<(), CommitError> {
        if input.deferred {
            self.pending = true;
            return Ok(());
        }
        self.pending = false;

        let Some(navigation) = services.navigation.as_deref_mut() else {
            return Ok(());
        };

        let points = input.world_points();
        if points.len() > 2 {
            match self.volume.filter(|v| navigation.validate_volume(*v)) {
                Some(volume) => {
                    if !navigation.set_volume(volume, &points, input.height) {
                        return Err(CommitError::VolumeRejected {
                            name: input.name.to_string(),
                        });
                    }
                }
                None => {
                    self.volume = navigation.create_volume(&points, input.height);
                    if self.volume.is_none() {
                        return Err(CommitError::VolumeRejected {
                            name: input.name.to_string(),
                        });
                    }
                }
            }
        } else if let Some(volume) = self.volume.take() {
            navigation.destroy_volume(volume);
        }
        Ok(())
    }

    fn release(&mut self, _id: ObjectId, services: &mut EngineServices) {
        self.pending = false;
        let Some(navigation) = services.navigation.as_deref_mut() else {
            return;
        };
        if let Some(volume) = self.volume.take() {
            navigation.destroy_volume(volume);
        }
    }

    fn clone_box(&self) -> Box<dyn CommitStrategy> {
        Box::new(Self::new())
    }

    fn has_pending_update(&self) -> bool {
        self.pending
    }
}
