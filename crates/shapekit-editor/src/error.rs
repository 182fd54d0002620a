//! Error types for shape editing.
//!
//! Editing rejections are ordinary values: the shape is left untouched, the
//! rejection is logged where it happens, and tools simply wait for the next
//! input event. Nothing here is meant to abort an editing session.

use shapekit_core::ObjectId;
use thiserror::Error;

/// A shape mutation that could not be applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The shape already holds its maximum number of points
    #[error("Shape already has the maximum of {max} points")]
    TooManyPoints {
        /// The point limit for this kind of shape.
        max: usize,
    },

    /// Removing a point would drop below the minimum point count
    #[error("Shape needs at least {min} points")]
    TooFewPoints {
        /// The minimum point count for this kind of shape.
        min: usize,
    },

    /// The new position lies within the minimum point distance of another point
    #[error("The point is too close to point {index}")]
    PointTooClose {
        /// Index of the conflicting point.
        index: usize,
    },

    /// Point index outside the point list
    #[error("Point index {index} out of range for {len} points")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The current number of points.
        len: usize,
    },

    /// A shape cannot be split at its first or last point
    #[error("Cannot split a shape at its end point {index}")]
    SplitAtEndpoint {
        /// The rejected split index.
        index: usize,
    },

    /// Merging needs an edge selected on both shapes
    #[error("Both shapes need a selected merge edge")]
    MergeIndexMissing,

    /// A shape cannot be merged with itself
    #[error("Cannot merge a shape with itself")]
    SameObject,

    /// No object with this id exists
    #[error("Object {0} not found")]
    ObjectNotFound(ObjectId),

    /// Fill triangulation failed
    #[error("Triangulation failed: {0}")]
    Triangulation(String),
}

impl ShapeError {
    /// Index of the existing point that blocked the operation, if any.
    pub fn conflicting_index(&self) -> Option<usize> {
        match self {
            Self::PointTooClose { index } => Some(*index),
            _ => None,
        }
    }
}

/// Failure reported while pushing a shape into an engine service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommitError {
    /// Another navigation shape already uses this name
    #[error("'{name}' already exists in the navigation system, please rename it")]
    NameInUse {
        /// The conflicting name.
        name: String,
    },

    /// The navigation system refused to create the shape
    #[error("Navigation system rejected shape '{name}'")]
    ShapeRejected {
        /// The shape name.
        name: String,
    },

    /// The navigation system refused to update a volume
    #[error("Navigation volume for '{name}' could not be updated")]
    VolumeRejected {
        /// The shape name.
        name: String,
    },
}
