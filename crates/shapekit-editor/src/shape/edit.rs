//! Point list mutation.
//!
//! These methods change geometry only. Undo recording and engine commits
//! are layered on top by [`crate::editor_state::EditorState`].

use shapekit_core::{Aabb, ObjectId, Vec3, EPSILON};
use tracing::{debug, warn};

use super::ShapeObject;
use crate::error::ShapeError;

/// True when `a` and `b` are closer than `min` on every axis.
fn too_close(a: &Vec3, b: &Vec3, min: f64) -> bool {
    (a.x - b.x).abs() < min && (a.y - b.y).abs() < min && (a.z - b.z).abs() < min
}

impl ShapeObject {
    fn check_spacing(
        &self,
        point: &Vec3,
        candidates: usize,
        skip: Option<usize>,
    ) -> Result<(), ShapeError> {
        if self.min_point_distance <= EPSILON {
            return Ok(());
        }
        let conflict = self.points[..candidates]
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .find(|(_, p)| too_close(p, point, self.min_point_distance))
            .map(|(i, _)| i);
        match conflict {
            Some(index) => Err(ShapeError::PointTooClose { index }),
            None => Ok(()),
        }
    }

    /// First pair of points closer than the minimum point distance.
    pub(crate) fn spacing_conflict(&self) -> Option<(usize, usize)> {
        if self.min_point_distance <= EPSILON {
            return None;
        }
        self.points.iter().enumerate().find_map(|(i, a)| {
            self.points[i + 1..]
                .iter()
                .position(|b| too_close(a, b, self.min_point_distance))
                .map(|j| (i, i + 1 + j))
        })
    }

    fn flatten_z(&self, mut point: Vec3) -> Vec3 {
        if self.force_2d {
            if let Some(first) = self.points.first() {
                point.z = first.z;
            }
        }
        point
    }

    /// Inserts a local-space point before `index`, or appends when `index`
    /// is `None` or past the end. Returns the new point's index.
    ///
    /// When `modifying` is false the shape is being built interactively and
    /// its last point is a cursor placeholder, so it is left out of the
    /// spacing check.
    pub fn insert_point(
        &mut self,
        index: Option<usize>,
        point: Vec3,
        modifying: bool,
    ) -> Result<usize, ShapeError> {
        let count = self.points.len();
        if count >= self.max_points() {
            debug!(shape = %self.name, max = self.max_points(), "Shape is at its point limit");
            return Err(ShapeError::TooManyPoints {
                max: self.max_points(),
            });
        }

        if count > 0 {
            let candidates = if modifying { count } else { count - 1 };
            if let Err(err) = self.check_spacing(&point, candidates, None) {
                warn!(shape = %self.name, "The point is too close to another point!");
                return Err(err);
            }
        }

        let point = self.flatten_z(point);
        let new_index = match index {
            Some(i) if i < count => {
                self.points.insert(i, point);
                self.obstruction.insert_side(i);
                i
            }
            _ => {
                self.points.push(point);
                self.obstruction.insert_side(count);
                count
            }
        };

        if let Some(sel) = self.selected_point {
            if sel >= new_index && new_index < count {
                self.selected_point = Some(sel + 1);
            }
        }
        self.calc_bbox();
        Ok(new_index)
    }

    /// Moves a point. Rejected without change if it would land within the
    /// minimum distance of another point.
    pub fn set_point(&mut self, index: usize, point: Vec3) -> Result<(), ShapeError> {
        let count = self.points.len();
        if index >= count {
            return Err(ShapeError::IndexOutOfRange { index, len: count });
        }
        let point = self.flatten_z(point);
        self.check_spacing(&point, count, Some(index))?;
        self.points[index] = point;
        self.calc_bbox();
        Ok(())
    }

    /// Removes a point unless that would leave fewer than the minimum.
    pub fn remove_point(&mut self, index: usize) -> Result<(), ShapeError> {
        let count = self.points.len();
        if index >= count {
            return Err(ShapeError::IndexOutOfRange { index, len: count });
        }
        if count <= self.min_points() {
            debug!(shape = %self.name, min = self.min_points(), "Cannot remove point below minimum");
            return Err(ShapeError::TooFewPoints {
                min: self.min_points(),
            });
        }
        self.points.remove(index);
        self.obstruction.remove_side(index);
        self.selected_point = match self.selected_point {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        self.calc_bbox();
        Ok(())
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
        self.obstruction.clear_sides();
        self.selected_point = None;
        self.calc_bbox();
    }

    /// Reverses point order. Closed shapes keep their first point.
    pub fn reverse_shape(&mut self) {
        self.points.reverse();
        if self.closed && !self.points.is_empty() {
            self.points.rotate_right(1);
        }
        self.obstruction.reverse(self.closed);
        self.selected_point = None;
        self.calc_bbox();
    }

    /// Flattens the shape onto its local Z = 0 plane.
    pub fn reset_shape(&mut self) {
        for p in &mut self.points {
            p.z = 0.0;
        }
        self.calc_bbox();
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Drops the trailing creation placeholder.
    pub(crate) fn pop_point(&mut self) -> Option<Vec3> {
        let p = self.points.pop()?;
        let count = self.points.len();
        self.obstruction.remove_side(count);
        if self.selected_point.is_some_and(|sel| sel >= count) {
            self.selected_point = None;
        }
        self.calc_bbox();
        Some(p)
    }

    /// Keeps points `[0, len)`.
    pub(crate) fn truncate_points(&mut self, len: usize) {
        self.points.truncate(len);
        self.obstruction.sides.truncate(len);
        self.select_point(self.selected_point);
        self.calc_bbox();
    }

    /// Drops the first `count` points.
    pub(crate) fn drop_leading_points(&mut self, count: usize) {
        let count = count.min(self.points.len());
        self.points.drain(..count);
        self.obstruction.sides.drain(..count);
        self.selected_point = None;
        self.calc_bbox();
    }

    /// Splits the shape at point `index`.
    ///
    /// With `snap` the split happens exactly on that vertex, which must not
    /// be the first or last point. Otherwise `point` is first inserted after
    /// `index` and the split happens there. This shape keeps the points up to
    /// and including the split point; the returned shape (a duplicate under
    /// `id` and `name`) keeps the split point and everything after it.
    pub fn split_at_point(
        &mut self,
        index: usize,
        snap: bool,
        point: Vec3,
        id: ObjectId,
        name: impl Into<String>,
    ) -> Result<ShapeObject, ShapeError> {
        let count = self.points.len();
        if index >= count {
            return Err(ShapeError::IndexOutOfRange { index, len: count });
        }

        let (split, new_count) = if snap {
            if index == 0 || index == count - 1 {
                debug!(shape = %self.name, index, "Cannot split at an end point");
                return Err(ShapeError::SplitAtEndpoint { index });
            }
            (index, count)
        } else {
            (index + 1, count + 1)
        };

        let min = self.min_points();
        if split + 1 < min || new_count - split < min {
            debug!(shape = %self.name, index, min, "Split would leave a piece too small");
            return Err(ShapeError::TooFewPoints { min });
        }

        if !snap {
            self.insert_point(Some(split), point, false)?;
        }

        let mut piece = self.duplicate(id, name);
        self.truncate_points(split + 1);
        piece.drop_leading_points(split);
        Ok(piece)
    }

    /// Splices `other` into this shape between the two selected merge edges.
    ///
    /// With `a0 -> a1` the merge edge of this shape and `b0 -> b1` the merge
    /// edge of `other`, the default orientation connects `a0` to `b0` and
    /// `b1` to `a1`, walking `other` backwards. If connecting `a0` to `b1`
    /// and `b0` to `a1` is strictly shorter, `other` is walked forwards
    /// instead. Points that land on existing ones are skipped. Returns the
    /// number of points inserted; `other` is left for the caller to delete.
    pub fn merge_from(&mut self, other: &mut ShapeObject) -> Result<usize, ShapeError> {
        if self.id == other.id {
            return Err(ShapeError::SameObject);
        }
        let (Some(mi), Some(other_mi)) = (self.merge_index, other.merge_index) else {
            debug!(shape = %self.name, "Merge needs a selected edge on both shapes");
            return Err(ShapeError::MergeIndexMissing);
        };
        let n = self.points.len();
        let m = other.points.len();
        if mi >= n {
            return Err(ShapeError::IndexOutOfRange { index: mi, len: n });
        }
        if other_mi >= m {
            return Err(ShapeError::IndexOutOfRange {
                index: other_mi,
                len: m,
            });
        }

        let index = mi + 1;
        let tm = &self.transform;
        let p0 = tm.transform_point(&self.points[mi]);
        let p1 = tm.transform_point(&self.points[index % n]);
        let other_tm = &other.transform;
        let p2 = other_tm.transform_point(&other.points[other_mi]);
        let p3 = other_tm.transform_point(&other.points[(other_mi + 1) % m]);

        let sum1 = (p0 - p2).norm() + (p1 - p3).norm();
        let sum2 = (p0 - p3).norm() + (p1 - p2).norm();
        let reversed = sum2 < sum1;

        let world = other.world_points();
        let order = (0..m).map(|k| {
            if reversed {
                (other_mi + 1 + k) % m
            } else {
                (other_mi + m - k) % m
            }
        });

        let mut inserted = 0;
        for i in order {
            let local = self.transform.inverse_transform_point(&world[i]);
            match self.insert_point(Some(index + inserted), local, true) {
                Ok(_) => inserted += 1,
                Err(ShapeError::TooManyPoints { .. }) => break,
                Err(_) => {}
            }
        }

        other.set_merge_index(None);
        Ok(inserted)
    }

    /// Recenters on the first point and rebuilds the local bounding box.
    ///
    /// If `points[0]` is off the local origin, the transform moves by the
    /// old `points[0]` (in world space) and every point shifts back by it,
    /// so world positions are unchanged.
    pub fn calc_bbox(&mut self) {
        let Some(&center) = self.points.first() else {
            self.bbox = Aabb::zero();
            return;
        };

        if center != Vec3::zeros() {
            self.transform.position += self.transform.transform_vector(&center);
            for p in &mut self.points {
                *p -= center;
            }
        }

        self.bbox = Aabb::from_points(self.points.iter());

        if self.height != 0.0 {
            let mut world = self.bbox.transformed(&self.transform);
            self.lowest_height = world.min.z;
            if self.per_vertex_height {
                self.bbox.max.z += self.height;
            } else {
                world.max.z = world.max.z.max(self.lowest_height + self.height);
                let top = self.transform.inverse_transform_point(&world.max);
                self.bbox.max.z = self.bbox.max.z.max(top.z);
            }
        }
    }
}
