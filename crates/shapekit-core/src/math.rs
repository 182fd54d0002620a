//! Math types for shape editing.
//!
//! World space is right-handed with Z up. Shapes store their points in the
//! local space of a [`WorldTransform`]; everything the viewport and external
//! systems see goes through `transform_point`.

use nalgebra::{UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// 3D vector used for points, directions and offsets.
pub type Vec3 = Vector3<f64>;

/// 2D vector used for screen-space coordinates.
pub type Vec2 = Vector2<f64>;

/// Rotation quaternion.
pub type Quat = UnitQuaternion<f64>;

/// Tolerance for "effectively zero" comparisons.
pub const EPSILON: f64 = 1e-6;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A degenerate box at the origin.
    pub fn zero() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros())
    }

    /// An inverted box that any added point will replace.
    pub fn empty() -> Self {
        Self::new(
            Vec3::repeat(f64::INFINITY),
            Vec3::repeat(f64::NEG_INFINITY),
        )
    }

    /// Resets to the inverted state.
    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    /// True while no point has been added since the last reset.
    pub fn is_reset(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grows the box to contain `p`.
    pub fn add(&mut self, p: &Vec3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Box enclosing all points, or a zero box if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.add(p);
        }
        if bbox.is_reset() {
            Self::zero()
        } else {
            bbox
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True if any extent is below [`EPSILON`].
    pub fn is_zero_volume(&self) -> bool {
        let size = self.size();
        size.x < EPSILON || size.y < EPSILON || size.z < EPSILON
    }

    pub fn contains_point(&self, p: &Vec3) -> bool {
        p.x >= self.min.x
            && p.y >= self.min.y
            && p.z >= self.min.z
            && p.x <= self.max.x
            && p.y <= self.max.y
            && p.z <= self.max.z
    }

    /// Box grown by `amount` on every side.
    pub fn expanded(&self, amount: f64) -> Self {
        let d = Vec3::repeat(amount);
        Self::new(self.min - d, self.max + d)
    }

    /// World-space box enclosing this local box after `tm`.
    pub fn transformed(&self, tm: &WorldTransform) -> Self {
        let mut out = Self::empty();
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.add(&tm.transform_point(&corner));
        }
        out
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::zero()
    }
}

/// Position, rotation and per-axis scale of an object.
///
/// Points map to world space as `position + rotation * (p * scale)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl WorldTransform {
    /// Creates a transform, rejecting zero or non-finite scale.
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Result<Self> {
        if !position.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite {
                what: "position".to_string(),
            });
        }
        for (axis, s) in ['x', 'y', 'z'].into_iter().zip(scale.iter()) {
            if !s.is_finite() {
                return Err(GeometryError::NonFinite {
                    what: format!("scale.{}", axis),
                });
            }
            if s.abs() < EPSILON {
                return Err(GeometryError::DegenerateScale { axis });
            }
        }
        Ok(Self {
            position,
            rotation,
            scale,
        })
    }

    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::repeat(1.0),
        }
    }

    /// Identity rotation and scale at `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn transform_point(&self, p: &Vec3) -> Vec3 {
        self.position + self.transform_vector(p)
    }

    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        self.rotation * v.component_mul(&self.scale)
    }

    pub fn inverse_transform_point(&self, p: &Vec3) -> Vec3 {
        self.inverse_transform_vector(&(p - self.position))
    }

    pub fn inverse_transform_vector(&self, v: &Vec3) -> Vec3 {
        (self.rotation.inverse() * v).component_div(&self.scale)
    }

    /// The three local axes expressed in world space (rotation only).
    pub fn axes(&self) -> (Vec3, Vec3, Vec3) {
        (
            self.rotation * Vec3::x(),
            self.rotation * Vec3::y(),
            self.rotation * Vec3::z(),
        )
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray; the direction is normalized when it is not zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize(EPSILON).unwrap_or(direction);
        Self { origin, direction }
    }

    pub fn point_at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Plane satisfying `normal · p + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f64,
}

impl Plane {
    /// Plane through `point` facing `normal`.
    pub fn from_point_normal(point: &Vec3, normal: &Vec3) -> Self {
        let normal = normal.try_normalize(EPSILON).unwrap_or_else(Vec3::z);
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Signed distance of `p` from the plane.
    pub fn distance_to(&self, p: &Vec3) -> f64 {
        self.normal.dot(p) + self.d
    }

    /// The same plane facing the other way.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            d: -self.d,
        }
    }

    /// Intersection of `ray` with the plane.
    ///
    /// With `single_sided`, rays that approach from behind the plane (moving
    /// along the normal) are rejected. Hits behind the ray origin and rays
    /// parallel to the plane never intersect.
    pub fn intersect_ray(&self, ray: &Ray, single_sided: bool) -> Option<Vec3> {
        let cosine = self.normal.dot(&ray.direction);
        if cosine.abs() < EPSILON {
            return None;
        }
        if single_sided && cosine > 0.0 {
            return None;
        }
        let t = -self.distance_to(&ray.origin) / cosine;
        if t < 0.0 {
            return None;
        }
        Some(ray.point_at(t))
    }
}
