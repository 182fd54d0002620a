//! Geometric primitives for viewport picking.
//!
//! Pure functions with no side effects. Cases with no answer (parallel lines,
//! hits behind a ray origin, missed boxes) return `None`; callers must check
//! before using outputs.

use crate::math::{Aabb, Vec2, Vec3, EPSILON};

/// Length used to turn a picking ray into a finite line segment.
pub const RAY_DISTANCE: f64 = 100_000.0;

/// Closest points between two infinite 3D lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLineIntersection {
    /// Closest point on the first line (`p1 + ua * (p2 - p1)`).
    pub pa: Vec3,
    /// Closest point on the second line (`p3 + ub * (p4 - p3)`).
    pub pb: Vec3,
    pub ua: f64,
    pub ub: f64,
}

/// Distance from `p` to the segment `[a, b]` and the closest point on it.
///
/// A zero-length segment yields the distance to `a`.
pub fn point_to_line_distance(a: &Vec3, b: &Vec3, p: &Vec3) -> (f64, Vec3) {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < EPSILON * EPSILON {
        return ((p - a).norm(), *a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    ((p - closest).norm(), closest)
}

/// Shortest connection between the lines `p1p2` and `p3p4`.
///
/// Returns `None` when either line is degenerate or the lines are parallel.
pub fn line_line_intersect(
    p1: &Vec3,
    p2: &Vec3,
    p3: &Vec3,
    p4: &Vec3,
) -> Option<LineLineIntersection> {
    let p13 = p1 - p3;
    let p43 = p4 - p3;
    let p21 = p2 - p1;
    if p43.norm_squared() < EPSILON * EPSILON || p21.norm_squared() < EPSILON * EPSILON {
        return None;
    }

    let d1343 = p13.dot(&p43);
    let d4321 = p43.dot(&p21);
    let d1321 = p13.dot(&p21);
    let d4343 = p43.dot(&p43);
    let d2121 = p21.dot(&p21);

    let denom = d2121 * d4343 - d4321 * d4321;
    // Relative test: |p21 x p43|^2 against the product of squared lengths.
    if denom.abs() <= EPSILON * EPSILON * d2121 * d4343 {
        return None;
    }
    let numer = d1343 * d4321 - d1321 * d4343;

    let ua = numer / denom;
    let ub = (d1343 + d4321 * ua) / d4343;

    Some(LineLineIntersection {
        pa: p1 + p21 * ua,
        pb: p3 + p43 * ub,
        ua,
        ub,
    })
}

/// Distance between a picking ray and the segment `[pi, pj]`.
///
/// The ray runs from `ray_src` through `ray_trg`. Returns the distance and the
/// point on the ray it was measured from, or `None` if the lines are parallel
/// or the closest approach lies behind the ray origin. When the closest point
/// on the segment's line falls outside the segment, the distance from the
/// nearer endpoint to the ray is used instead.
pub fn ray_to_line_distance(
    ray_src: &Vec3,
    ray_trg: &Vec3,
    pi: &Vec3,
    pj: &Vec3,
) -> Option<(f64, Vec3)> {
    let hit = line_line_intersect(pi, pj, ray_src, ray_trg)?;
    if hit.ub < 0.0 {
        return None;
    }

    let result = if hit.ua < 0.0 {
        point_to_line_distance(ray_src, ray_trg, pi)
    } else if hit.ua > 1.0 {
        point_to_line_distance(ray_src, ray_trg, pj)
    } else {
        let on_ray = ray_src + (ray_trg - ray_src) * hit.ub;
        ((hit.pb - hit.pa).norm(), on_ray)
    };
    Some(result)
}

/// Slab test of a ray against a box.
///
/// Returns the entry point, or the origin itself when it starts inside.
pub fn ray_aabb(origin: &Vec3, dir: &Vec3, bbox: &Aabb) -> Option<Vec3> {
    if bbox.contains_point(origin) {
        return Some(*origin);
    }

    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < EPSILON {
            if o < bbox.min[axis] || o > bbox.max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (bbox.min[axis] - o) / d;
        let mut t1 = (bbox.max[axis] - o) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(origin + dir * t_min.max(0.0))
}

/// Distance from `p` to the 2D segment `[a, b]` and the segment parameter of
/// the closest point.
pub fn point_lineseg_2d(p: &Vec2, a: &Vec2, b: &Vec2) -> (f64, f64) {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < EPSILON * EPSILON {
        return ((p - a).norm(), 0.0);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    ((p - (a + ab * t)).norm(), t)
}
