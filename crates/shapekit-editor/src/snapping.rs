//! Grid, angle and scale snapping.
//!
//! All rounding goes through [`snap_value`], which rounds half up
//! (`floor(x / step + 0.5) * step`): `2.5` snaps to `3` and `-2.5` to `-2`
//! on a unit grid.

use shapekit_core::{Vec3, WorldTransform};
use shapekit_settings::{SnapModeSetting, SnappingSettings};

/// Grid steps below this size disable grid snapping.
pub const MIN_GRID_SIZE: f64 = 0.001;

const MIN_INCREMENT: f64 = 1e-6;

/// Rounds `value` to the nearest multiple of `step`, halves rounding up.
pub fn snap_value(value: f64, step: f64) -> f64 {
    (value / step + 0.5).floor() * step
}

/// Surface snapping flags.
///
/// Terrain and geometry snapping are mutually exclusive; surface-normal
/// alignment combines with either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapMode(u8);

impl SnapMode {
    pub const NONE: SnapMode = SnapMode(0);
    pub const TERRAIN: SnapMode = SnapMode(1);
    pub const GEOMETRY: SnapMode = SnapMode(1 << 1);
    pub const SURFACE_NORMAL: SnapMode = SnapMode(1 << 2);

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, other: SnapMode) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    fn set(&mut self, flag: SnapMode, enabled: bool) {
        if enabled {
            self.0 |= flag.0;
        } else {
            self.0 &= !flag.0;
        }
    }
}

/// Snapping configuration and the quantization operations built on it.
#[derive(Debug, Clone, PartialEq)]
pub struct SnappingPreferences {
    pub grid_size: f64,
    pub grid_scale: f64,
    pub grid_major_line: u32,
    /// Angle increment in degrees.
    pub angle_snap: f64,
    pub scale_snap: f64,
    pub grid_snapping: bool,
    pub angle_snapping: bool,
    pub scale_snapping: bool,
    snap_mode: SnapMode,
    pivot_snapping: bool,
    /// Frame used by [`SnappingPreferences::snap_zoomed`], normally the active
    /// manipulator's matrix.
    pub manipulator: WorldTransform,
}

impl SnappingPreferences {
    /// Builds the live preferences from persisted settings.
    pub fn from_settings(settings: &SnappingSettings) -> Self {
        let mut prefs = Self {
            grid_size: settings.grid_size,
            grid_scale: settings.grid_scale,
            grid_major_line: settings.grid_major_line,
            angle_snap: settings.angle_snap,
            scale_snap: settings.scale_snap,
            grid_snapping: settings.grid_snapping,
            angle_snapping: settings.angle_snapping,
            scale_snapping: settings.scale_snapping,
            snap_mode: SnapMode::NONE,
            pivot_snapping: settings.pivot_snapping,
            manipulator: WorldTransform::identity(),
        };
        match settings.snap_mode {
            SnapModeSetting::None => {}
            SnapModeSetting::Terrain => prefs.set_snap_to_terrain(true),
            SnapModeSetting::Geometry => prefs.set_snap_to_geometry(true),
        }
        prefs.set_snap_to_normal(settings.snap_to_normal);
        prefs
    }

    /// Effective grid step (`grid_size * grid_scale`).
    pub fn grid_step(&self) -> f64 {
        self.grid_size * self.grid_scale
    }

    fn grid_active(&self, force: bool) -> bool {
        (self.grid_snapping || force) && self.grid_step() >= MIN_GRID_SIZE
    }

    /// Rounds a length to the grid.
    pub fn snap_length(&self, length: f64) -> f64 {
        if !self.grid_active(false) {
            return length;
        }
        snap_value(length, self.grid_step())
    }

    /// Rounds an angle (degrees) to the angle increment.
    pub fn snap_angle(&self, angle: f64) -> f64 {
        if !self.angle_snapping || self.angle_snap < MIN_INCREMENT {
            return angle;
        }
        snap_value(angle, self.angle_snap)
    }

    /// Rounds each component of a set of Euler angles (degrees).
    pub fn snap_angles(&self, angles: &Vec3) -> Vec3 {
        angles.map(|a| self.snap_angle(a))
    }

    pub fn snap_scale(&self, scale: f64) -> f64 {
        if !self.scale_snapping || self.scale_snap < MIN_INCREMENT {
            return scale;
        }
        snap_value(scale, self.scale_snap)
    }

    /// Axis-aligned world grid snap. `force` ignores the grid enable flag.
    pub fn snap(&self, v: &Vec3, force: bool) -> Vec3 {
        if !self.grid_active(force) {
            return *v;
        }
        let step = self.grid_step();
        v.map(|c| snap_value(c, step))
    }

    /// Snaps in the manipulator's local frame with the step scaled by `zoom`.
    pub fn snap_zoomed(&self, v: &Vec3, zoom: f64) -> Vec3 {
        let step = self.grid_step() * zoom;
        if !self.grid_snapping || step < MIN_GRID_SIZE {
            return *v;
        }
        let local = self.manipulator.inverse_transform_point(v);
        let snapped = local.map(|c| snap_value(c, step));
        self.manipulator.transform_point(&snapped)
    }

    /// Snaps within the plane spanned by `axis_x` and `axis_y`.
    ///
    /// The component along the plane normal is dropped.
    pub fn snap_plane(&self, v: &Vec3, axis_x: &Vec3, axis_y: &Vec3) -> Vec3 {
        let mut x = v.dot(axis_x);
        let mut y = v.dot(axis_y);
        if self.grid_active(false) {
            let step = self.grid_step();
            x = snap_value(x, step);
            y = snap_value(y, step);
        }
        axis_x * x + axis_y * y
    }

    /// Full 3D snap in the frame defined by `axis_x`, `axis_y` and their cross product.
    pub fn snap_3d(&self, pos: &Vec3, axis_x: &Vec3, axis_y: &Vec3, zoom: f64) -> Vec3 {
        let step = self.grid_step() * zoom;
        if !self.grid_snapping || step < MIN_GRID_SIZE {
            return *pos;
        }
        let axis_z = axis_x.cross(axis_y);
        [axis_x, axis_y, &axis_z]
            .into_iter()
            .map(|axis| axis * snap_value(pos.dot(axis), step))
            .fold(Vec3::zeros(), |acc, v| acc + v)
    }

    pub fn snap_mode(&self) -> SnapMode {
        self.snap_mode
    }

    pub fn is_snap_to_terrain(&self) -> bool {
        self.snap_mode.contains(SnapMode::TERRAIN)
    }

    pub fn is_snap_to_geometry(&self) -> bool {
        self.snap_mode.contains(SnapMode::GEOMETRY)
    }

    pub fn is_snap_to_normal(&self) -> bool {
        self.snap_mode.contains(SnapMode::SURFACE_NORMAL)
    }

    /// Enables terrain snapping, clearing geometry snapping.
    pub fn set_snap_to_terrain(&mut self, enabled: bool) {
        if enabled {
            self.snap_mode.set(SnapMode::GEOMETRY, false);
        }
        self.snap_mode.set(SnapMode::TERRAIN, enabled);
    }

    /// Enables geometry snapping, clearing terrain snapping.
    pub fn set_snap_to_geometry(&mut self, enabled: bool) {
        if enabled {
            self.snap_mode.set(SnapMode::TERRAIN, false);
        }
        self.snap_mode.set(SnapMode::GEOMETRY, enabled);
    }

    pub fn set_snap_to_normal(&mut self, enabled: bool) {
        self.snap_mode.set(SnapMode::SURFACE_NORMAL, enabled);
    }

    pub fn pivot_snapping(&self) -> bool {
        self.pivot_snapping
    }

    pub fn set_pivot_snapping(&mut self, enabled: bool) {
        self.pivot_snapping = enabled;
    }
}

impl Default for SnappingPreferences {
    fn default() -> Self {
        Self::from_settings(&SnappingSettings::default())
    }
}
