//! Shared types used across ShapeKit crates.

pub mod aliases;
pub mod ids;

pub use aliases::*;
pub use ids::ObjectId;
