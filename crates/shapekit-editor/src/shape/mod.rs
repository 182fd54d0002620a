//! Shape objects.
//!
//! A [`ShapeObject`] is an ordered list of local-space points with open or
//! closed topology, an optional height extrusion and per-edge sound flags.
//! Its world placement is a [`WorldTransform`] whose origin tracks the first
//! point: after every structural edit `points[0]` is moved to the local
//! origin and the transform absorbs the offset.
//!
//! What happens to the geometry outside the editor is decided by the
//! shape's [`CommitStrategy`], chosen from its [`ShapeKind`].

pub mod edit;
pub mod fill;
pub mod obstruction;
pub mod picking;

use serde::{Deserialize, Serialize};
use shapekit_core::{Aabb, ObjectId, Vec3, WorldTransform};
use shapekit_settings::ShapeEditSettings;

use crate::commit::{
    CommitInput, CommitStrategy, EngineServices, EntityAreaCommit, GameVolumeCommit,
    NavigationAreaCommit, NavigationAreaType, NavigationShapeCommit, VisAreaCommit, VisAreaKind,
};

pub use fill::FillMesh;
pub use obstruction::SoundObstruction;
pub use picking::EdgeHit;

/// The kind of area a shape represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Generic trigger or sound area backed by an entity area component.
    Area,
    AiPath,
    AiShape,
    AiOcclusionPlane,
    AiTerritory,
    NavigationArea,
    GameVolume,
    VisArea,
    Portal,
    OccluderArea,
    OccluderPlane,
}

impl ShapeKind {
    pub fn min_points(&self) -> usize {
        match self {
            Self::Area | Self::AiPath | Self::OccluderPlane => 2,
            Self::OccluderArea => 4,
            _ => 3,
        }
    }

    pub fn max_points(&self) -> usize {
        match self {
            Self::VisArea | Self::Portal => 100,
            Self::OccluderArea => 4,
            Self::OccluderPlane => 2,
            _ => 1000,
        }
    }

    pub fn default_closed(&self) -> bool {
        !matches!(self, Self::AiPath | Self::OccluderPlane)
    }

    /// Whether the extruded cap follows each point's Z.
    pub fn per_vertex_height(&self) -> bool {
        !matches!(self, Self::AiTerritory)
    }

    /// Whether every point is kept at the first point's Z.
    pub fn force_2d(&self) -> bool {
        matches!(self, Self::AiOcclusionPlane)
    }

    /// Prefix used for generated object names.
    pub fn name_prefix(&self) -> &'static str {
        match self {
            Self::Area => "Shape",
            Self::AiPath => "AIPath",
            Self::AiShape => "AIShape",
            Self::AiOcclusionPlane => "AIOcclusionPlane",
            Self::AiTerritory => "AITerritory",
            Self::NavigationArea => "NavigationArea",
            Self::GameVolume => "GameVolume",
            Self::VisArea => "VisArea",
            Self::Portal => "Portal",
            Self::OccluderArea => "OccluderArea",
            Self::OccluderPlane => "OccluderPlane",
        }
    }

    /// A fresh commit strategy for this kind.
    pub fn commit_strategy(&self) -> Box<dyn CommitStrategy> {
        match self {
            Self::Area => Box::new(EntityAreaCommit::new()),
            Self::AiPath => Box::new(NavigationShapeCommit::new(NavigationAreaType::Path)),
            Self::AiShape => Box::new(NavigationShapeCommit::new(NavigationAreaType::Generic)),
            Self::AiOcclusionPlane => {
                Box::new(NavigationShapeCommit::new(NavigationAreaType::OcclusionPlane))
            }
            Self::AiTerritory => Box::new(NavigationShapeCommit::new(NavigationAreaType::Territory)),
            Self::NavigationArea => Box::new(NavigationAreaCommit::new()),
            Self::GameVolume => Box::new(GameVolumeCommit::new()),
            Self::VisArea => Box::new(VisAreaCommit::new(VisAreaKind::Area)),
            Self::Portal => Box::new(VisAreaCommit::new(VisAreaKind::Portal)),
            Self::OccluderArea => Box::new(VisAreaCommit::new(VisAreaKind::OccluderArea)),
            Self::OccluderPlane => Box::new(VisAreaCommit::new(VisAreaKind::OccluderPlane)),
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name_prefix())
    }
}

/// Entity area properties forwarded to the area component.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaParams {
    /// Proximity width around the area.
    pub width: f64,
    pub area_id: i32,
    pub group_id: i32,
    pub priority: i32,
    pub inner_fade_distance: f64,
}

/// Undo-able state of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSnapshot {
    pub name: String,
    pub transform: WorldTransform,
    pub points: Vec<Vec3>,
    pub closed: bool,
    pub height: f64,
    pub per_vertex_height: bool,
    pub obstruction: SoundObstruction,
    pub targets: Vec<ObjectId>,
    pub area: AreaParams,
}

/// An editable shape or area object.
#[derive(Debug)]
pub struct ShapeObject {
    id: ObjectId,
    name: String,
    kind: ShapeKind,
    transform: WorldTransform,
    points: Vec<Vec3>,
    closed: bool,
    height: f64,
    per_vertex_height: bool,
    force_2d: bool,
    bbox: Aabb,
    /// World Z of the lowest point, valid while `height != 0`.
    lowest_height: f64,
    obstruction: SoundObstruction,
    selected_point: Option<usize>,
    merge_index: Option<usize>,
    min_point_distance: f64,
    z_offset: f64,
    in_edit_mode: bool,
    being_created: bool,
    selected: bool,
    targets: Vec<ObjectId>,
    area: AreaParams,
    last_update_succeeded: bool,
    commit: Box<dyn CommitStrategy>,
}

impl ShapeObject {
    /// Creates an empty shape of `kind` at the world origin.
    pub fn new(kind: ShapeKind, name: impl Into<String>) -> Self {
        Self::with_id(ObjectId::new(), kind, name)
    }

    pub fn with_id(id: ObjectId, kind: ShapeKind, name: impl Into<String>) -> Self {
        let defaults = ShapeEditSettings::default();
        Self {
            id,
            name: name.into(),
            kind,
            transform: WorldTransform::identity(),
            points: Vec::new(),
            closed: kind.default_closed(),
            height: 0.0,
            per_vertex_height: kind.per_vertex_height(),
            force_2d: kind.force_2d(),
            bbox: Aabb::zero(),
            lowest_height: 0.0,
            obstruction: SoundObstruction::default(),
            selected_point: None,
            merge_index: None,
            min_point_distance: defaults.min_point_distance,
            z_offset: defaults.z_offset,
            in_edit_mode: false,
            being_created: false,
            selected: false,
            targets: Vec::new(),
            area: AreaParams::default(),
            last_update_succeeded: true,
            commit: kind.commit_strategy(),
        }
    }

    /// Applies point spacing and placement offsets from settings.
    pub fn apply_edit_settings(&mut self, settings: &ShapeEditSettings) {
        self.min_point_distance = settings.min_point_distance;
        self.z_offset = settings.z_offset;
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name_raw(&mut self, name: String) {
        self.name = name;
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn min_points(&self) -> usize {
        self.kind.min_points()
    }

    pub fn max_points(&self) -> usize {
        self.kind.max_points()
    }

    pub fn transform(&self) -> &WorldTransform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: WorldTransform) {
        self.transform = transform;
        self.calc_bbox();
    }

    /// World position of the object pivot (the first point).
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.calc_bbox();
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// A point transformed to world space.
    pub fn world_point(&self, index: usize) -> Option<Vec3> {
        self.points
            .get(index)
            .map(|p| self.transform.transform_point(p))
    }

    pub fn world_points(&self) -> Vec<Vec3> {
        self.points
            .iter()
            .map(|p| self.transform.transform_point(p))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.calc_bbox();
    }

    pub fn per_vertex_height(&self) -> bool {
        self.per_vertex_height
    }

    pub fn set_per_vertex_height(&mut self, enabled: bool) {
        self.per_vertex_height = enabled;
        self.calc_bbox();
    }

    pub fn is_force_2d(&self) -> bool {
        self.force_2d
    }

    /// Local bounding box, including the height extrusion.
    pub fn local_bounds(&self) -> &Aabb {
        &self.bbox
    }

    /// World Z of the lowest point.
    pub fn lowest_height(&self) -> f64 {
        self.lowest_height
    }

    pub fn obstruction(&self) -> &SoundObstruction {
        &self.obstruction
    }

    /// Marks whether the edge starting at `index` blocks sound.
    pub fn set_side_obstructs_sound(&mut self, index: usize, obstructs: bool) -> bool {
        self.obstruction.set_side(index, obstructs)
    }

    pub fn set_roof_obstructs_sound(&mut self, obstructs: bool) {
        self.obstruction.roof = obstructs;
    }

    pub fn set_floor_obstructs_sound(&mut self, obstructs: bool) {
        self.obstruction.floor = obstructs;
    }

    pub fn min_point_distance(&self) -> f64 {
        self.min_point_distance
    }

    /// Height added above the surface when placing points.
    pub fn z_offset(&self) -> f64 {
        self.z_offset
    }

    pub fn selected_point(&self) -> Option<usize> {
        self.selected_point
    }

    /// Selects a point for editing; out-of-range indices clear the selection.
    pub fn select_point(&mut self, index: Option<usize>) {
        self.selected_point = index.filter(|&i| i < self.points.len());
    }

    pub fn merge_index(&self) -> Option<usize> {
        self.merge_index
    }

    pub fn set_merge_index(&mut self, index: Option<usize>) {
        self.merge_index = index;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Changing selection always clears the merge edge.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.merge_index = None;
    }

    pub fn is_in_edit_mode(&self) -> bool {
        self.in_edit_mode
    }

    pub fn is_being_created(&self) -> bool {
        self.being_created
    }

    pub(crate) fn set_being_created(&mut self, creating: bool) {
        self.being_created = creating;
    }

    pub fn targets(&self) -> &[ObjectId] {
        &self.targets
    }

    pub(crate) fn targets_mut(&mut self) -> &mut Vec<ObjectId> {
        &mut self.targets
    }

    pub fn area_params(&self) -> &AreaParams {
        &self.area
    }

    pub fn set_area_params(&mut self, area: AreaParams) {
        self.area = area;
    }

    pub fn last_update_succeeded(&self) -> bool {
        self.last_update_succeeded
    }

    /// In-viewport label shown when the last engine commit failed.
    pub fn status_label(&self) -> Option<String> {
        if self.last_update_succeeded {
            None
        } else {
            Some(format!("Error! {} (see log)", self.name))
        }
    }

    pub fn commit_strategy(&self) -> &dyn CommitStrategy {
        self.commit.as_ref()
    }

    /// Pushes the current geometry to the engine through the commit strategy.
    ///
    /// Failures are logged and recorded; the point data is kept either way.
    pub fn update_game_area(&mut self, services: &mut EngineServices) {
        let input = CommitInput {
            id: self.id,
            name: &self.name,
            transform: &self.transform,
            points: &self.points,
            closed: self.closed,
            height: self.height,
            obstruction: &self.obstruction,
            area: &self.area,
            targets: &self.targets,
            deferred: self.in_edit_mode || self.being_created,
        };
        match self.commit.commit(&input, services) {
            Ok(()) => self.last_update_succeeded = true,
            Err(err) => {
                tracing::error!(shape = %self.name, "{}", err);
                self.last_update_succeeded = false;
            }
        }
    }

    /// Removes everything the commit strategy registered with the engine.
    pub fn release(&mut self, services: &mut EngineServices) {
        self.commit.release(self.id, services);
    }

    /// Enters or leaves point editing; leaving flushes a deferred commit.
    pub fn set_in_edit_mode(&mut self, editing: bool, services: &mut EngineServices) {
        self.in_edit_mode = editing;
        if !editing && self.commit.has_pending_update() {
            self.update_game_area(services);
        }
    }

    pub fn snapshot(&self) -> ShapeSnapshot {
        ShapeSnapshot {
            name: self.name.clone(),
            transform: self.transform,
            points: self.points.clone(),
            closed: self.closed,
            height: self.height,
            per_vertex_height: self.per_vertex_height,
            obstruction: self.obstruction.clone(),
            targets: self.targets.clone(),
            area: self.area.clone(),
        }
    }

    /// Restores a snapshot; the caller re-commits.
    pub fn restore(&mut self, snapshot: ShapeSnapshot) {
        self.name = snapshot.name;
        self.transform = snapshot.transform;
        self.points = snapshot.points;
        self.closed = snapshot.closed;
        self.height = snapshot.height;
        self.per_vertex_height = snapshot.per_vertex_height;
        self.obstruction = snapshot.obstruction;
        self.targets = snapshot.targets;
        self.area = snapshot.area;
        if self.obstruction.sides.len() != self.points.len() {
            self.obstruction.sides.resize(self.points.len(), false);
        }
        self.select_point(self.selected_point);
        self.calc_bbox();
    }

    /// Copy of this shape under a new identity.
    ///
    /// Geometry, topology, height, sound flags and targets are copied; the
    /// copy links to the same targets. Nothing is registered with the engine
    /// until the copy is committed.
    pub fn duplicate(&self, id: ObjectId, name: impl Into<String>) -> Self {
        let mut copy = Self::with_id(id, self.kind, name);
        copy.transform = self.transform;
        copy.points = self.points.clone();
        copy.closed = self.closed;
        copy.height = self.height;
        copy.per_vertex_height = self.per_vertex_height;
        copy.obstruction = self.obstruction.clone();
        copy.targets = self.targets.clone();
        copy.area = self.area.clone();
        copy.min_point_distance = self.min_point_distance;
        copy.z_offset = self.z_offset;
        copy.commit = self.commit.clone_box();
        copy.calc_bbox();
        copy
    }
}
