//! Level persistence.
//!
//! Shapes are saved as a JSON document with a format version, timestamps
//! and one record per shape. Loading validates transforms and point data
//! before anything is added to the editor.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shapekit_core::{ObjectId, Vec3, WorldTransform};
use std::path::Path;
use tracing::{info, warn};

use crate::editor_state::EditorState;
use crate::shape::{AreaParams, ShapeKind, ShapeObject, ShapeSnapshot, SoundObstruction};

/// Level file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete level file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub version: String,
    pub metadata: LevelMetadata,
    pub shapes: Vec<ShapeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Serialized shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: ObjectId,
    pub name: String,
    pub kind: ShapeKind,
    pub transform: WorldTransform,
    /// Local-space points; the first one sits at the local origin.
    pub points: Vec<Vec3>,
    pub closed: bool,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub per_vertex_height: bool,
    #[serde(default)]
    pub obstruction: SoundObstruction,
    #[serde(default)]
    pub targets: Vec<ObjectId>,
    #[serde(default)]
    pub area: AreaParams,
}

impl ShapeRecord {
    pub fn from_shape(shape: &ShapeObject) -> Self {
        let snapshot = shape.snapshot();
        Self {
            id: shape.id(),
            name: snapshot.name,
            kind: shape.kind(),
            transform: snapshot.transform,
            points: snapshot.points,
            closed: snapshot.closed,
            height: snapshot.height,
            per_vertex_height: snapshot.per_vertex_height,
            obstruction: snapshot.obstruction,
            targets: snapshot.targets,
            area: snapshot.area,
        }
    }

    /// Rebuilds the shape. Nothing is committed to the engine.
    pub fn to_shape(&self) -> Result<ShapeObject> {
        let tm = &self.transform;
        WorldTransform::new(tm.position, tm.rotation, tm.scale)
            .with_context(|| format!("Invalid transform on shape '{}'", self.name))?;
        if let Some(i) = self
            .points
            .iter()
            .position(|p| !p.iter().all(|c| c.is_finite()))
        {
            bail!("Point {} of shape '{}' is not finite", i, self.name);
        }
        if self.points.len() > self.kind.max_points() {
            bail!(
                "Shape '{}' has {} points, more than the {} allowed",
                self.name,
                self.points.len(),
                self.kind.max_points()
            );
        }

        let mut shape = ShapeObject::with_id(self.id, self.kind, self.name.clone());
        shape.restore(ShapeSnapshot {
            name: self.name.clone(),
            transform: self.transform,
            points: self.points.clone(),
            closed: self.closed,
            height: self.height,
            per_vertex_height: self.per_vertex_height,
            obstruction: self.obstruction.clone(),
            targets: self.targets.clone(),
            area: self.area.clone(),
        });
        Ok(shape)
    }
}

impl LevelFile {
    /// Create an empty level file
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LevelMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            shapes: Vec::new(),
        }
    }

    /// Captures every shape in the editor, in creation order.
    pub fn from_editor(name: impl Into<String>, editor: &EditorState) -> Self {
        let mut file = Self::new(name);
        file.shapes = editor.objects.iter().map(ShapeRecord::from_shape).collect();
        file
    }

    /// Save level to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize level")?;
        std::fs::write(path.as_ref(), json).context("Failed to write level file")?;
        info!(path = %path.as_ref().display(), shapes = self.shapes.len(), "Level saved");
        Ok(())
    }

    /// Load level from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read level file")?;
        let mut level: LevelFile =
            serde_json::from_str(&content).context("Failed to parse level file")?;
        level.metadata.modified = Utc::now();
        Ok(level)
    }

    /// Adds every shape to `editor` and commits it to the engine.
    ///
    /// All records are validated first; on error the editor is unchanged.
    /// Loading is not undoable and clears the undo history.
    pub fn restore_into(&self, editor: &mut EditorState) -> Result<usize> {
        let mut shapes = Vec::with_capacity(self.shapes.len());
        for record in &self.shapes {
            if editor.objects.contains(record.id) {
                bail!("Shape '{}' ({}) is already loaded", record.name, record.id);
            }
            let mut shape = record.to_shape()?;
            shape.apply_edit_settings(&editor.settings);
            if let Some((a, b)) = shape.spacing_conflict() {
                bail!(
                    "Points {} and {} of shape '{}' are closer than {}",
                    a,
                    b,
                    record.name,
                    shape.min_point_distance()
                );
            }
            let count = shape.point_count();
            if count > 0 && count < shape.min_points() {
                warn!(
                    shape = %record.name,
                    points = count,
                    min = shape.min_points(),
                    "Loaded shape has too few points"
                );
            }
            shapes.push(shape);
        }

        let count = shapes.len();
        for shape in shapes {
            let id = editor.objects.insert(shape);
            editor
                .commit_shape(id)
                .with_context(|| format!("Failed to commit shape {}", id))?;
        }
        editor.undo.clear();
        info!(level = %self.metadata.name, shapes = count, "Level loaded");
        Ok(count)
    }
}
