//! Viewport projection.
//!
//! Converts cursor positions (pixels, origin top-left) into world rays and
//! into 3D points constrained to a construction plane or axis. The
//! construction plane is anchored at the construction matrix, which tools
//! set to the shape's transform at the drag anchor.

use nalgebra::{Isometry3, Perspective3, Point3};
use shapekit_core::{point_lineseg_2d, Plane, Ray, Vec2, Vec3, WorldTransform, EPSILON};
use shapekit_settings::ViewportSettings;

use crate::snapping::SnappingPreferences;

/// Perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    /// Vertical field of view in radians.
    fov_y: f64,
    near: f64,
    far: f64,
    width: u32,
    height: u32,
}

impl Camera {
    /// Creates a camera at `position` looking at `target`.
    pub fn look_at(position: Vec3, target: Vec3, settings: &ViewportSettings) -> Self {
        let direction = (target - position)
            .try_normalize(EPSILON)
            .unwrap_or_else(|| -Vec3::z());
        Self {
            position,
            direction,
            up: Vec3::z(),
            fov_y: settings.fov_degrees.to_radians(),
            near: settings.near_plane,
            far: settings.far_plane,
            width: settings.width,
            height: settings.height,
        }
    }

    /// Camera `height` units above `center` looking straight down, +Y up on screen.
    pub fn top_down(center: Vec3, height: f64, settings: &ViewportSettings) -> Self {
        Self::look_at(center + Vec3::new(0.0, 0.0, height), center, settings)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn near_plane(&self) -> f64 {
        self.near
    }

    pub fn far_plane(&self) -> f64 {
        self.far
    }

    /// Viewport size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Moves the camera, keeping its orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Up vector used for the view matrix; falls back to +Y when looking along Z.
    fn up_vector(&self) -> Vec3 {
        if self.direction.dot(&self.up).abs() > 0.999 {
            Vec3::y()
        } else {
            self.up
        }
    }

    fn view(&self) -> Isometry3<f64> {
        let eye = Point3::from(self.position);
        let target = Point3::from(self.position + self.direction);
        Isometry3::look_at_rh(&eye, &target, &self.up_vector())
    }

    fn projection(&self) -> Perspective3<f64> {
        let aspect = self.width as f64 / self.height.max(1) as f64;
        Perspective3::new(aspect, self.fov_y, self.near, self.far)
    }

    fn to_ndc(&self, point: &Vec2) -> (f64, f64) {
        let x = 2.0 * point.x / self.width as f64 - 1.0;
        let y = 1.0 - 2.0 * point.y / self.height as f64;
        (x, y)
    }

    fn from_ndc(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(
            (x + 1.0) * 0.5 * self.width as f64,
            (1.0 - y) * 0.5 * self.height as f64,
        )
    }
}

/// Axis or plane that dragged points are confined to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisConstraint {
    X,
    Y,
    Z,
    #[default]
    XY,
    XZ,
    YZ,
    /// Follow the scene surface under the cursor.
    Terrain,
}

impl AxisConstraint {
    fn single_axis(&self, x: Vec3, y: Vec3, z: Vec3) -> Option<Vec3> {
        match self {
            Self::X => Some(x),
            Self::Y => Some(y),
            Self::Z => Some(z),
            _ => None,
        }
    }
}

/// Scene surface queries needed for terrain snapping.
pub trait SceneQuery: std::fmt::Debug {
    /// First surface hit along `ray`.
    fn raycast(&self, ray: &Ray) -> Option<Vec3>;
}

/// Infinite horizontal ground at a fixed elevation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlatGround {
    pub elevation: f64,
}

impl SceneQuery for FlatGround {
    fn raycast(&self, ray: &Ray) -> Option<Vec3> {
        Plane::from_point_normal(&Vec3::new(0.0, 0.0, self.elevation), &Vec3::z())
            .intersect_ray(ray, false)
    }
}

/// A camera plus the construction plane state used by edit tools.
#[derive(Debug)]
pub struct Viewport {
    camera: Camera,
    construction_matrix: WorldTransform,
    construction_plane: Plane,
    axis_constraint: AxisConstraint,
    selection_tolerance: f64,
    scene: Box<dyn SceneQuery>,
}

impl Viewport {
    pub fn new(camera: Camera, scene: Box<dyn SceneQuery>) -> Self {
        Self {
            camera,
            construction_matrix: WorldTransform::identity(),
            construction_plane: Plane::from_point_normal(&Vec3::zeros(), &Vec3::z()),
            axis_constraint: AxisConstraint::default(),
            selection_tolerance: 0.0,
            scene,
        }
    }

    /// Top-down viewport over flat ground at z = 0, configured from settings.
    pub fn from_settings(settings: &ViewportSettings, center: Vec3, height: f64) -> Self {
        let mut viewport = Self::new(
            Camera::top_down(center, height, settings),
            Box::new(FlatGround::default()),
        );
        viewport.selection_tolerance = settings.selection_tolerance;
        viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn axis_constraint(&self) -> AxisConstraint {
        self.axis_constraint
    }

    pub fn set_axis_constraint(&mut self, axis: AxisConstraint) {
        self.axis_constraint = axis;
    }

    /// Extra world-space pick tolerance added to every hit test.
    pub fn selection_tolerance(&self) -> f64 {
        self.selection_tolerance
    }

    pub fn set_selection_tolerance(&mut self, tolerance: f64) {
        self.selection_tolerance = tolerance.max(0.0);
    }

    pub fn construction_matrix(&self) -> &WorldTransform {
        &self.construction_matrix
    }

    /// Anchors the construction plane. Scale is ignored.
    pub fn set_construction_matrix(&mut self, tm: &WorldTransform) {
        self.construction_matrix = WorldTransform {
            scale: Vec3::repeat(1.0),
            ..*tm
        };
    }

    pub fn construction_plane(&self) -> &Plane {
        &self.construction_plane
    }

    /// World ray through a cursor position, starting on the near plane.
    pub fn view_to_world_ray(&self, point: &Vec2) -> Ray {
        let (x, y) = self.camera.to_ndc(point);
        let projection = self.camera.projection();
        let view = self.camera.view();
        let near = view.inverse_transform_point(&projection.unproject_point(&Point3::new(x, y, -1.0)));
        let far = view.inverse_transform_point(&projection.unproject_point(&Point3::new(x, y, 1.0)));
        Ray::new(near.coords, far.coords - near.coords)
    }

    /// Projects a world point to pixels; `None` if it lies behind the near plane.
    pub fn world_to_view(&self, p: &Vec3) -> Option<Vec2> {
        let in_view = self.camera.view().transform_point(&Point3::from(*p));
        if in_view.z > -self.camera.near {
            return None;
        }
        let ndc = self.camera.projection().project_point(&in_view);
        Some(self.camera.from_ndc(ndc.x, ndc.y))
    }

    /// Surface point under the cursor, if the scene reports one.
    pub fn view_to_world(&self, point: &Vec2) -> Option<Vec3> {
        self.scene.raycast(&self.view_to_world_ray(point))
    }

    /// World units per unit of view depth at `p`; scales pick tolerances so
    /// handles keep a constant apparent size.
    pub fn screen_scale_factor(&self, p: &Vec3) -> f64 {
        let depth = (p - self.camera.position).dot(&self.camera.direction);
        depth.max(self.camera.near)
    }

    /// Rebuilds the construction plane for `axis` through the construction
    /// matrix origin, facing the camera.
    ///
    /// A single-axis constraint uses whichever of the two other axes is
    /// closer to the view direction as the plane normal.
    pub fn make_construction_plane(&mut self, axis: AxisConstraint) {
        let center = Vec2::new(
            self.camera.width as f64 * 0.5,
            self.camera.height as f64 * 0.5,
        );
        let ray_dir = self.view_to_world_ray(&center).direction;
        let (x, y, z) = self.construction_matrix.axes();

        let pick = |a: Vec3, b: Vec3| {
            if ray_dir.dot(&a).abs() > ray_dir.dot(&b).abs() {
                a
            } else {
                b
            }
        };
        let mut normal = match axis {
            AxisConstraint::X => pick(y, z),
            AxisConstraint::Y => pick(x, z),
            AxisConstraint::Z => pick(x, y),
            AxisConstraint::XY | AxisConstraint::Terrain => z,
            AxisConstraint::XZ => y,
            AxisConstraint::YZ => x,
        };
        if ray_dir.dot(&normal) > 0.0 {
            normal = -normal;
        }
        self.construction_plane =
            Plane::from_point_normal(&self.construction_matrix.position, &normal);
    }

    /// Maps a cursor position to a snapped point on the construction plane
    /// for the current axis constraint.
    ///
    /// Terrain constraint uses the scene surface and falls back to the XY
    /// plane when nothing is hit. Returns `None` if the ray misses the plane
    /// from both sides.
    pub fn map_view_to_cp(&mut self, point: &Vec2, snapping: &SnappingPreferences) -> Option<Vec3> {
        let axis = self.axis_constraint;
        if axis == AxisConstraint::Terrain {
            if let Some(hit) = self.view_to_world(point) {
                return Some(snapping.snap(&hit, false));
            }
        }

        self.make_construction_plane(axis);
        let ray = self.view_to_world_ray(point);
        let hit = self
            .construction_plane
            .intersect_ray(&ray, true)
            .or_else(|| self.construction_plane.flipped().intersect_ray(&ray, true))?;
        Some(snapping.snap(&hit, false))
    }

    /// Drag offset between two construction-plane points, projected onto
    /// the constraint axis for single-axis constraints.
    pub fn cp_vector(&self, p1: &Vec3, p2: &Vec3) -> Vec3 {
        let v = p2 - p1;
        let (x, y, z) = self.construction_matrix.axes();
        match self.axis_constraint.single_axis(x, y, z) {
            Some(axis) => axis * axis.dot(&v),
            None => v,
        }
    }

    /// Screen-space pixel distance from `point` to the projected segment `[a, b]`.
    ///
    /// Segment ends behind the near plane are clipped to it before projecting.
    /// `None` when the whole segment is behind the camera.
    pub fn edge_screen_distance(&self, point: &Vec2, a: &Vec3, b: &Vec3) -> Option<f64> {
        let view = self.camera.view();
        let limit = -(self.camera.near + EPSILON);
        let mut va = view.transform_point(&Point3::from(*a));
        let mut vb = view.transform_point(&Point3::from(*b));
        if va.z > limit && vb.z > limit {
            return None;
        }
        if va.z > limit {
            let t = (limit - vb.z) / (va.z - vb.z);
            va = vb + (va - vb) * t;
        } else if vb.z > limit {
            let t = (limit - va.z) / (vb.z - va.z);
            vb = va + (vb - va) * t;
        }
        let projection = self.camera.projection();
        let pa = projection.project_point(&va);
        let pb = projection.project_point(&vb);
        let sa = self.camera.from_ndc(pa.x, pa.y);
        let sb = self.camera.from_ndc(pb.x, pb.y);
        Some(point_lineseg_2d(point, &sa, &sb).0)
    }
}
