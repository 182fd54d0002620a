//! Error handling for ShapeKit core
//!
//! Geometric routines never fail on degenerate input (they return `None`
//! instead); these errors cover values that cannot be represented at all,
//! such as a transform with a zero scale axis.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate or parameter was NaN or infinite
    #[error("Non-finite value in {what}")]
    NonFinite {
        /// Name of the offending value.
        what: String,
    },

    /// A transform scale component is zero, so the transform cannot be inverted
    #[error("Degenerate scale on {axis} axis")]
    DegenerateScale {
        /// The axis ('x', 'y' or 'z') with zero scale.
        axis: char,
    },
}

/// Result type for core geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;
