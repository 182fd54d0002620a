//! In-memory engine services.
//!
//! Each service is a cheap handle around shared state: one clone is boxed
//! into [`EngineServices`](super::EngineServices) and the others inspect
//! what the editor registered.

use std::collections::HashMap;

use shapekit_core::{ObjectId, Shared, Vec3};

use super::{
    EntityAreaRegistry, GameVolumeInfo, GameVolumesEdit, NavigationAreaType,
    NavigationShapeParams, NavigationSystem, VisAreaHandle, VisAreaInfo, VisAreaKind,
    VisAreaManager, VolumeId,
};

/// A registered navigation shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationShapeRecord {
    pub area_type: NavigationAreaType,
    pub points: Vec<Vec3>,
    pub height: f64,
    pub closed: bool,
}

#[derive(Debug, Default)]
struct NavigationStore {
    shapes: HashMap<String, NavigationShapeRecord>,
    volumes: HashMap<VolumeId, (Vec<Vec3>, f64)>,
    next_volume: u32,
    reject_shapes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryNavigation {
    store: Shared<NavigationStore>,
}

impl InMemoryNavigation {
    pub fn shape(&self, name: &str) -> Option<NavigationShapeRecord> {
        self.store.borrow().shapes.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn shape_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.store.borrow().shapes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Occupies `name` as if another object had registered it.
    pub fn reserve_name(&self, name: &str, area_type: NavigationAreaType) {
        self.store.borrow_mut().shapes.insert(
            name.to_string(),
            NavigationShapeRecord {
                area_type,
                points: Vec::new(),
                height: 0.0,
                closed: false,
            },
        );
    }

    /// Makes every following `create_navigation_shape` fail.
    pub fn set_reject_shapes(&self, reject: bool) {
        self.store.borrow_mut().reject_shapes = reject;
    }

    pub fn volume_count(&self) -> usize {
        self.store.borrow().volumes.len()
    }

    pub fn volume_points(&self, volume: VolumeId) -> Option<Vec<Vec3>> {
        self.store
            .borrow()
            .volumes
            .get(&volume)
            .map(|(points, _)| points.clone())
    }
}

impl NavigationSystem for InMemoryNavigation {
    fn does_navigation_shape_exist(&self, name: &str, area_type: NavigationAreaType) -> bool {
        self.store
            .borrow()
            .shapes
            .get(name)
            .is_some_and(|shape| shape.area_type == area_type)
    }

    fn create_navigation_shape(&mut self, params: &NavigationShapeParams<'_>) -> bool {
        let mut store = self.store.borrow_mut();
        if store.reject_shapes {
            return false;
        }
        store.shapes.insert(
            params.name.to_string(),
            NavigationShapeRecord {
                area_type: params.area_type,
                points: params.points.to_vec(),
                height: params.height,
                closed: params.closed,
            },
        );
        true
    }

    fn delete_navigation_shape(&mut self, name: &str) {
        self.store.borrow_mut().shapes.remove(name);
    }

    fn create_volume(&mut self, points: &[Vec3], height: f64) -> Option<VolumeId> {
        let mut store = self.store.borrow_mut();
        store.next_volume += 1;
        let id = VolumeId(store.next_volume);
        store.volumes.insert(id, (points.to_vec(), height));
        Some(id)
    }

    fn set_volume(&mut self, volume: VolumeId, points: &[Vec3], height: f64) -> bool {
        match self.store.borrow_mut().volumes.get_mut(&volume) {
            Some(entry) => {
                *entry = (points.to_vec(), height);
                true
            }
            None => false,
        }
    }

    fn destroy_volume(&mut self, volume: VolumeId) {
        self.store.borrow_mut().volumes.remove(&volume);
    }

    fn validate_volume(&self, volume: VolumeId) -> bool {
        self.store.borrow().volumes.contains_key(&volume)
    }
}

/// A registered vis-area.
#[derive(Debug, Clone, PartialEq)]
pub struct VisAreaRecord {
    pub kind: VisAreaKind,
    pub name: String,
    pub points: Vec<Vec3>,
    pub info: VisAreaInfo,
}

#[derive(Debug, Default)]
struct VisAreaStore {
    areas: HashMap<VisAreaHandle, VisAreaRecord>,
    next_handle: u64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryVisAreas {
    store: Shared<VisAreaStore>,
}

impl InMemoryVisAreas {
    pub fn area(&self, handle: VisAreaHandle) -> Option<VisAreaRecord> {
        self.store.borrow().areas.get(&handle).cloned()
    }

    pub fn area_by_name(&self, name: &str) -> Option<VisAreaRecord> {
        self.store
            .borrow()
            .areas
            .values()
            .find(|area| area.name == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VisAreaManager for InMemoryVisAreas {
    fn create_vis_area(&mut self, kind: VisAreaKind) -> VisAreaHandle {
        let mut store = self.store.borrow_mut();
        store.next_handle += 1;
        let handle = VisAreaHandle(store.next_handle);
        store.areas.insert(
            handle,
            VisAreaRecord {
                kind,
                name: String::new(),
                points: Vec::new(),
                info: VisAreaInfo::default(),
            },
        );
        handle
    }

    fn update_vis_area(
        &mut self,
        handle: VisAreaHandle,
        name: &str,
        points: &[Vec3],
        info: &VisAreaInfo,
    ) {
        if let Some(area) = self.store.borrow_mut().areas.get_mut(&handle) {
            area.name = name.to_string();
            area.points = points.to_vec();
            area.info = info.clone();
        }
    }

    fn delete_vis_area(&mut self, handle: VisAreaHandle) {
        self.store.borrow_mut().areas.remove(&handle);
    }
}

/// State of one entity area component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityAreaRecord {
    pub points: Vec<Vec3>,
    pub obstruction: Vec<bool>,
    pub closed: bool,
    pub height: f64,
    pub proximity: f64,
    pub area_id: i32,
    pub group_id: i32,
    pub priority: i32,
    pub inner_fade_distance: f64,
    pub entities: Vec<ObjectId>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityAreas {
    store: Shared<HashMap<ObjectId, EntityAreaRecord>>,
}

impl InMemoryEntityAreas {
    pub fn area(&self, entity: ObjectId) -> Option<EntityAreaRecord> {
        self.store.borrow().get(&entity).cloned()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_area(&self, entity: ObjectId, f: impl FnOnce(&mut EntityAreaRecord)) {
        f(self.store.borrow_mut().entry(entity).or_default());
    }
}

impl EntityAreaRegistry for InMemoryEntityAreas {
    fn set_points(
        &mut self,
        entity: ObjectId,
        points: &[Vec3],
        obstruction: &[bool],
        closed: bool,
        height: f64,
    ) {
        self.with_area(entity, |area| {
            area.points = points.to_vec();
            area.obstruction = obstruction.to_vec();
            area.closed = closed;
            area.height = height;
        });
    }

    fn set_proximity(&mut self, entity: ObjectId, width: f64) {
        self.with_area(entity, |area| area.proximity = width);
    }

    fn set_id(&mut self, entity: ObjectId, id: i32) {
        self.with_area(entity, |area| area.area_id = id);
    }

    fn set_group(&mut self, entity: ObjectId, group: i32) {
        self.with_area(entity, |area| area.group_id = group);
    }

    fn set_priority(&mut self, entity: ObjectId, priority: i32) {
        self.with_area(entity, |area| area.priority = priority);
    }

    fn set_inner_fade_distance(&mut self, entity: ObjectId, distance: f64) {
        self.with_area(entity, |area| area.inner_fade_distance = distance);
    }

    fn remove_entities(&mut self, entity: ObjectId) {
        self.with_area(entity, |area| area.entities.clear());
    }

    fn add_entity(&mut self, entity: ObjectId, target: ObjectId) {
        self.with_area(entity, |area| area.entities.push(target));
    }

    fn release(&mut self, entity: ObjectId) {
        self.store.borrow_mut().remove(&entity);
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryGameVolumes {
    store: Shared<HashMap<ObjectId, GameVolumeInfo>>,
}

impl InMemoryGameVolumes {
    pub fn volume(&self, entity: ObjectId) -> Option<GameVolumeInfo> {
        self.store.borrow().get(&entity).cloned()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameVolumesEdit for InMemoryGameVolumes {
    fn set_volume(&mut self, entity: ObjectId, info: &GameVolumeInfo) {
        self.store.borrow_mut().insert(entity, info.clone());
    }

    fn destroy_volume(&mut self, entity: ObjectId) {
        self.store.borrow_mut().remove(&entity);
    }
}
