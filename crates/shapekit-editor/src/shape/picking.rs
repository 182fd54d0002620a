//! Ray and position picking against shape edges and points.

use shapekit_core::{point_to_line_distance, ray_to_line_distance, Aabb, Ray, Vec3, RAY_DISTANCE};
use smallvec::SmallVec;

use super::ShapeObject;
use crate::viewport::Viewport;

/// Nearest edge found by a pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    /// Index of the edge's first point.
    pub first: usize,
    /// Index of the edge's second point; `0` for the closing edge.
    pub second: usize,
    pub distance: f64,
    /// World-space point the distance was measured from.
    pub point: Vec3,
}

/// Edges in point order. The closing edge is only visited on closed shapes.
pub(crate) fn edge_pairs(len: usize, closed: bool) -> impl Iterator<Item = (usize, usize)> {
    (0..len).filter_map(move |i| {
        let j = if i + 1 < len { i + 1 } else { 0 };
        if !closed && j == 0 && i != 0 {
            None
        } else {
            Some((i, j))
        }
    })
}

impl ShapeObject {
    /// Edge closest to a picking ray.
    ///
    /// Ties keep the edge met first in point order.
    pub fn nearest_edge_by_ray(&self, ray: &Ray) -> Option<EdgeHit> {
        let world = self.world_points();
        let src = ray.origin;
        let trg = ray.point_at(RAY_DISTANCE);

        let mut best: Option<EdgeHit> = None;
        for (i, j) in edge_pairs(world.len(), self.closed) {
            let Some((distance, point)) = ray_to_line_distance(&src, &trg, &world[i], &world[j])
            else {
                continue;
            };
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(EdgeHit {
                    first: i,
                    second: j,
                    distance,
                    point,
                });
            }
        }
        best
    }

    /// Edge closest to a world position; `point` is the closest point on the edge.
    pub fn nearest_edge_by_pos(&self, pos: &Vec3) -> Option<EdgeHit> {
        let world = self.world_points();
        let mut best: Option<EdgeHit> = None;
        for (i, j) in edge_pairs(world.len(), self.closed) {
            let (distance, point) = point_to_line_distance(&world[i], &world[j], pos);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(EdgeHit {
                    first: i,
                    second: j,
                    distance,
                    point,
                });
            }
        }
        best
    }

    /// Point closest to a picking ray, with its distance from the ray.
    pub fn nearest_point_by_ray(&self, ray: &Ray) -> Option<(usize, f64)> {
        let src = ray.origin;
        let trg = ray.point_at(RAY_DISTANCE);
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.world_points().iter().enumerate() {
            let (distance, _) = point_to_line_distance(&src, &trg, p);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        best
    }

    /// Top of the extrusion above a world-space point.
    pub(crate) fn roof_point(&self, world: &Vec3) -> Vec3 {
        if self.per_vertex_height {
            Vec3::new(world.x, world.y, world.z + self.height)
        } else {
            Vec3::new(world.x, world.y, self.lowest_height + self.height)
        }
    }

    /// Tests a picking ray against the outline and, when extruded, the roof
    /// and vertical edges.
    ///
    /// A hit needs the ray within `close_distance` percent of the screen
    /// scale at the hit point, plus the viewport selection tolerance.
    /// Returns the distance from the ray origin.
    pub fn hit_test(&self, ray: &Ray, view: &Viewport, close_distance: f64) -> Option<f64> {
        let world = self.world_points();
        if world.is_empty() {
            return None;
        }

        let mut segments: SmallVec<[(Vec3, Vec3); 16]> = edge_pairs(world.len(), self.closed)
            .map(|(i, j)| (world[i], world[j]))
            .collect();
        if self.height > 0.0 {
            let roof: SmallVec<[Vec3; 8]> = world.iter().map(|p| self.roof_point(p)).collect();
            segments.extend(edge_pairs(roof.len(), self.closed).map(|(i, j)| (roof[i], roof[j])));
            segments.extend(world.iter().zip(roof.iter()).map(|(p, r)| (*p, *r)));
        }

        let src = ray.origin;
        let trg = ray.point_at(RAY_DISTANCE);
        let mut best: Option<(f64, Vec3)> = None;
        for (a, b) in &segments {
            if let Some((distance, point)) = ray_to_line_distance(&src, &trg, a, b) {
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, point));
                }
            }
        }

        let (distance, point) = best?;
        let threshold =
            close_distance * view.screen_scale_factor(&point) * 0.01 + view.selection_tolerance();
        (distance < threshold).then(|| (src - point).norm())
    }

    /// World-space bounds, inflated by one unit for picking.
    pub fn world_bounds(&self) -> Aabb {
        self.bbox.transformed(&self.transform).expanded(1.0)
    }
}
