//! Point editing on a single shape.
//!
//! Click a point to select it and drag to move it. Ctrl-click on an edge
//! inserts a point there and starts dragging it. Double-click or Delete
//! removes a point.

use shapekit_core::{ObjectId, Vec2, Vec3, WorldTransform};
use tracing::debug;

use super::{pick_tolerance, EditTool, Key, MouseEvent, MouseEventKind, ToolContext, ToolResponse};

const PICK_FACTOR: f64 = 0.01;

/// Where the edit tool is in its interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditShapeState {
    Idle,
    PointSelected(usize),
    Dragging(usize),
}

#[derive(Debug)]
pub struct EditShapeTool {
    shape: ObjectId,
    modifying: bool,
    mouse_down: Vec2,
    /// World position of the dragged point when the drag started.
    drag_origin: Vec3,
}

impl EditShapeTool {
    pub fn new(shape: ObjectId) -> Self {
        Self {
            shape,
            modifying: false,
            mouse_down: Vec2::zeros(),
            drag_origin: Vec3::zeros(),
        }
    }

    pub fn shape(&self) -> ObjectId {
        self.shape
    }

    pub fn state(&self, ctx: &ToolContext<'_>) -> EditShapeState {
        let selected = ctx
            .editor
            .shape(self.shape)
            .and_then(|shape| shape.selected_point());
        match selected {
            Some(index) if self.modifying => EditShapeState::Dragging(index),
            Some(index) => EditShapeState::PointSelected(index),
            None => EditShapeState::Idle,
        }
    }

    /// Selects `index` and anchors the construction plane on it.
    fn start_drag(&mut self, ctx: &mut ToolContext<'_>, index: usize) {
        if ctx.editor.select_point(self.shape, Some(index)).is_err() {
            return;
        }
        if let Some(world) = ctx
            .editor
            .shape(self.shape)
            .and_then(|shape| shape.world_point(index))
        {
            self.drag_origin = world;
            ctx.view
                .set_construction_matrix(&WorldTransform::from_position(world));
        }
    }

    fn insert_on_edge(&mut self, ctx: &mut ToolContext<'_>, second: usize, local: Vec3) {
        // The closing edge inserts at the end.
        let index = if second == 0 { None } else { Some(second) };
        self.modifying = true;
        ctx.editor.begin_undo();
        let inserted = match ctx.editor.insert_point(self.shape, index, local, true) {
            Ok(i) => Some(i),
            Err(err) => {
                debug!(shape = %self.shape, "Point not inserted: {}", err);
                err.conflicting_index()
            }
        };
        match inserted {
            Some(i) => self.start_drag(ctx, i),
            None => {
                self.modifying = false;
                ctx.editor.cancel_undo();
            }
        }
    }

    fn drag_to(&mut self, ctx: &mut ToolContext<'_>, index: usize, point: &Vec2) {
        let Some(shape) = ctx.editor.shape(self.shape) else {
            return;
        };
        let transform = *shape.transform();
        let z_offset = shape.z_offset();

        let snapping = &ctx.editor.snapping;
        let Some(start) = ctx.view.map_view_to_cp(&self.mouse_down, snapping) else {
            return;
        };
        let Some(current) = ctx.view.map_view_to_cp(point, snapping) else {
            return;
        };

        let mut target = self.drag_origin + ctx.view.cp_vector(&start, &current);
        if snapping.is_snap_to_terrain() {
            target = current;
            target.z += z_offset;
        }
        let target = snapping.snap(&target, false);
        let local = transform.inverse_transform_point(&target);
        if let Err(err) = ctx.editor.set_point(self.shape, index, local) {
            debug!(shape = %self.shape, index, "Point not moved: {}", err);
        }
    }

    fn remove_point(&mut self, ctx: &mut ToolContext<'_>, index: usize, description: &str) {
        let id = self.shape;
        let result = ctx.editor.transaction(description, |editor| {
            editor.remove_point(id, index)?;
            editor.select_point(id, None)
        });
        if let Err(err) = result {
            debug!(shape = %id, index, "Point not removed: {}", err);
        }
    }
}

impl EditTool for EditShapeTool {
    fn name(&self) -> &'static str {
        "Edit Shape"
    }

    fn activate(&mut self, ctx: &mut ToolContext<'_>) {
        if let Err(err) = ctx.editor.set_in_edit_mode(self.shape, true) {
            debug!(shape = %self.shape, "Edit mode not entered: {}", err);
        }
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if let Err(err) = ctx.editor.select_point(self.shape, None) {
            debug!(shape = %self.shape, "Selection not cleared: {}", err);
        }
        if ctx.editor.undo.is_recording() {
            ctx.editor.cancel_undo();
        }
        self.modifying = false;
        if let Err(err) = ctx.editor.set_in_edit_mode(self.shape, false) {
            debug!(shape = %self.shape, "Edit mode not left: {}", err);
        }
    }

    fn mouse_event(&mut self, ctx: &mut ToolContext<'_>, event: &MouseEvent) -> ToolResponse {
        if event.kind == MouseEventKind::LeftDown {
            self.mouse_down = event.point;
        }

        let ray = ctx.view.view_to_world_ray(&event.point);
        let close = ctx.editor.settings.close_distance;
        let Some(shape) = ctx.editor.shape(self.shape) else {
            return ToolResponse::Finished;
        };
        let transform = *shape.transform();
        let edge = shape.nearest_edge_by_ray(&ray);
        let edge_tolerance = edge
            .map(|e| pick_tolerance(close, ctx.view.screen_scale_factor(&e.point), PICK_FACTOR, ctx.view));

        if event.modifiers.ctrl && !self.modifying {
            if let (Some(edge), Some(tolerance)) = (edge, edge_tolerance) {
                if edge.distance < tolerance && event.kind == MouseEventKind::LeftDown {
                    let local = transform.inverse_transform_point(&edge.point);
                    self.insert_on_edge(ctx, edge.second, local);
                }
            }
            return ToolResponse::Handled;
        }

        let hit = shape
            .nearest_point_by_ray(&ray)
            .filter(|(index, distance)| {
                let tolerance = edge_tolerance.unwrap_or_else(|| {
                    let anchor = shape.world_point(*index).unwrap_or_else(Vec3::zeros);
                    pick_tolerance(close, ctx.view.screen_scale_factor(&anchor), PICK_FACTOR, ctx.view)
                });
                *distance <= tolerance
            })
            .map(|(index, _)| index);
        let selected = shape.selected_point();

        match hit {
            Some(index) => {
                if event.kind == MouseEventKind::LeftDown && !self.modifying {
                    self.modifying = true;
                    ctx.editor.begin_undo();
                    self.start_drag(ctx, index);
                }
                if event.kind == MouseEventKind::LeftDoubleClick {
                    if self.modifying {
                        self.modifying = false;
                        ctx.editor.accept_undo("Shape Modify");
                    }
                    self.remove_point(ctx, index, "Remove Point");
                }
            }
            None => {
                if event.kind == MouseEventKind::LeftDown {
                    if let Err(err) = ctx.editor.select_point(self.shape, None) {
                        debug!(shape = %self.shape, "Selection not cleared: {}", err);
                    }
                }
            }
        }

        if self.modifying && event.kind == MouseEventKind::LeftUp {
            self.modifying = false;
            ctx.editor.accept_undo("Shape Modify");
        }

        if self.modifying && event.kind == MouseEventKind::Move {
            if let Some(index) = selected {
                self.drag_to(ctx, index, &event.point);
            }
        }
        ToolResponse::Handled
    }

    fn key_event(&mut self, ctx: &mut ToolContext<'_>, key: Key) -> ToolResponse {
        match key {
            Key::Escape => ToolResponse::Finished,
            Key::Delete => {
                let selected = ctx
                    .editor
                    .shape(self.shape)
                    .and_then(|shape| shape.selected_point());
                if let (false, Some(index)) = (self.modifying, selected) {
                    self.remove_point(ctx, index, "Delete Point");
                }
                ToolResponse::Handled
            }
            Key::Other => ToolResponse::Ignored,
        }
    }

    fn on_object_deleted(&mut self, id: ObjectId) -> bool {
        id == self.shape
    }
}
