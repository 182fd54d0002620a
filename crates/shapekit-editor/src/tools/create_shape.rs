//! Interactive shape creation.
//!
//! The shape is added when the tool activates and built point by point:
//! its last point is a placeholder that follows the cursor, and each click
//! fixes the placeholder and appends a new one. Double-click finishes, as
//! does reaching the point limit. Creation is one undo step; aborting rolls
//! it back and the shape disappears.

use shapekit_core::{ObjectId, Vec2, Vec3, WorldTransform};
use tracing::{debug, info, warn};

use super::{EditTool, MouseEvent, MouseEventKind, ToolContext, ToolResponse};
use crate::shape::{ShapeKind, ShapeObject};
use crate::viewport::AxisConstraint;

#[derive(Debug)]
pub struct CreateShapeTool {
    kind: ShapeKind,
    shape: Option<ObjectId>,
    completed: bool,
}

impl CreateShapeTool {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            shape: None,
            completed: false,
        }
    }

    /// The shape under construction.
    pub fn shape(&self) -> Option<ObjectId> {
        self.shape
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The first point follows the scene surface; later ones stay on the
    /// horizontal plane through the shape origin.
    fn cursor_position(ctx: &mut ToolContext<'_>, point: &Vec2, count: usize) -> Option<Vec3> {
        let axis = if count < 2 {
            AxisConstraint::Terrain
        } else {
            AxisConstraint::XY
        };
        let previous = ctx.view.axis_constraint();
        ctx.view.set_axis_constraint(axis);
        let pos = ctx.view.map_view_to_cp(point, &ctx.editor.snapping);
        ctx.view.set_axis_constraint(previous);
        pos
    }

    fn end_creation(&mut self, ctx: &mut ToolContext<'_>, id: ObjectId) -> ToolResponse {
        if let Some(shape) = ctx.editor.objects.find_mut(id) {
            shape.set_being_created(false);
            info!(shape = %shape.name(), points = shape.point_count(), "Shape created");
        }
        if let Err(err) = ctx.editor.commit_shape(id) {
            warn!(shape = %id, "Created shape not committed: {}", err);
        }
        ctx.editor.accept_undo("Create Shape");
        self.completed = true;
        ToolResponse::Finished
    }
}

impl EditTool for CreateShapeTool {
    fn name(&self) -> &'static str {
        "Create Shape"
    }

    fn activate(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.editor.begin_undo();
        let name = ctx.editor.objects.unique_name(self.kind.name_prefix());
        let mut shape = ShapeObject::new(self.kind, name);
        shape.apply_edit_settings(&ctx.editor.settings);
        shape.set_being_created(true);
        match ctx.editor.add_object(shape, "Create Shape") {
            Ok(id) => self.shape = Some(id),
            Err(err) => warn!(kind = %self.kind, "Shape not created: {}", err),
        }
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if !self.completed && ctx.editor.undo.is_recording() {
            debug!(kind = %self.kind, "Shape creation aborted");
            ctx.editor.cancel_undo();
        }
        self.shape = None;
    }

    fn mouse_event(&mut self, ctx: &mut ToolContext<'_>, event: &MouseEvent) -> ToolResponse {
        if event.kind == MouseEventKind::LeftUp {
            return ToolResponse::Ignored;
        }
        let Some(id) = self.shape else {
            return ToolResponse::Finished;
        };
        let Some(shape) = ctx.editor.shape(id) else {
            return ToolResponse::Finished;
        };
        let count = shape.point_count();
        let min = shape.min_points();
        let max = shape.max_points();
        let z_offset = shape.z_offset();
        ctx.view
            .set_construction_matrix(&WorldTransform::from_position(shape.position()));

        let Some(mut pos) = Self::cursor_position(ctx, &event.point, count) else {
            return ToolResponse::Handled;
        };
        let Some(shape) = ctx.editor.objects.find_mut(id) else {
            return ToolResponse::Finished;
        };
        if count < 2 {
            shape.set_position(pos);
        }
        pos.z += z_offset;

        if count == 0 {
            if let Err(err) = shape.insert_point(None, Vec3::zeros(), false) {
                warn!(shape = %shape.name(), "Placeholder point not added: {}", err);
                return ToolResponse::Finished;
            }
        } else {
            let local = shape.transform().inverse_transform_point(&pos);
            if let Err(err) = shape.set_point(count - 1, local) {
                debug!(shape = %shape.name(), "Placeholder not moved: {}", err);
            }
        }

        match event.kind {
            MouseEventKind::LeftDoubleClick => {
                if shape.point_count() > min {
                    shape.pop_point();
                    return self.end_creation(ctx, id);
                }
                debug!(shape = %shape.name(), min, "Too few points to create shape");
                return ToolResponse::Finished;
            }
            MouseEventKind::LeftDown => {
                if shape.point_count() >= max {
                    return self.end_creation(ctx, id);
                }
                let local = shape.transform().inverse_transform_point(&pos);
                if let Err(err) = shape.insert_point(None, local, false) {
                    debug!(shape = %shape.name(), "Point not added: {}", err);
                }
                if let Err(err) = ctx.editor.commit_shape(id) {
                    debug!(shape = %id, "Shape not committed: {}", err);
                }
            }
            _ => {}
        }
        ToolResponse::Handled
    }

    fn on_object_deleted(&mut self, id: ObjectId) -> bool {
        if self.shape == Some(id) {
            self.shape = None;
            return true;
        }
        false
    }
}
