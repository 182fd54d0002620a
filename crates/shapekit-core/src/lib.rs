//! # ShapeKit Core
//!
//! Math types, geometric primitives and identifiers shared by every ShapeKit crate.
//!
//! - [`math`]: vectors, bounding boxes, planes, rays and object transforms
//! - [`geometry`]: point/line/ray distance and intersection routines used for picking
//! - [`types`]: object identifiers and shared-ownership aliases
//! - [`error`]: error types for invalid geometric input

pub mod error;
pub mod geometry;
pub mod math;
pub mod types;

pub use error::{GeometryError, Result};
pub use geometry::{
    line_line_intersect, point_lineseg_2d, point_to_line_distance, ray_aabb,
    ray_to_line_distance, LineLineIntersection, RAY_DISTANCE,
};
pub use math::{Aabb, Plane, Quat, Ray, Vec2, Vec3, WorldTransform, EPSILON};
pub use types::{shared, ObjectId, Shared};
