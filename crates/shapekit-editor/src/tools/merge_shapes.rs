//! Merges two selected shapes at picked edges.

use shapekit_core::ObjectId;
use tracing::{debug, info};

use super::{pick_tolerance, EditTool, MouseEvent, MouseEventKind, ToolContext, ToolResponse};

const PICK_FACTOR: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    NoneSelected,
    /// An edge of this shape is chosen; waiting for an edge on another shape.
    OneEdgeSelected(ObjectId),
}

/// Picks an edge on one selected shape, then an edge on another, and
/// splices the second shape into the first.
#[derive(Debug, Default)]
pub struct MergeShapesTool {
    first: Option<ObjectId>,
}

impl MergeShapesTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MergeState {
        match self.first {
            Some(id) => MergeState::OneEdgeSelected(id),
            None => MergeState::NoneSelected,
        }
    }

    fn set_merge_index(ctx: &mut ToolContext<'_>, id: ObjectId, index: Option<usize>) {
        if let Some(shape) = ctx.editor.objects.find_mut(id) {
            shape.set_merge_index(index);
        }
    }
}

impl EditTool for MergeShapesTool {
    fn name(&self) -> &'static str {
        "Merge Shapes"
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(first) = self.first.take() {
            Self::set_merge_index(ctx, first, None);
        }
        if ctx.editor.undo.is_recording() {
            ctx.editor.cancel_undo();
        }
    }

    fn mouse_event(&mut self, ctx: &mut ToolContext<'_>, event: &MouseEvent) -> ToolResponse {
        if !matches!(event.kind, MouseEventKind::LeftDown | MouseEventKind::Move) {
            return ToolResponse::Ignored;
        }
        let ray = ctx.view.view_to_world_ray(&event.point);
        let close = ctx.editor.settings.close_distance;

        let picked = ctx.editor.objects.selected_ids().iter().find_map(|id| {
            let shape = ctx.editor.shape(*id)?;
            let edge = shape.nearest_edge_by_ray(&ray)?;
            let tolerance = pick_tolerance(
                close,
                ctx.view.screen_scale_factor(&edge.point),
                PICK_FACTOR,
                ctx.view,
            );
            (edge.distance < tolerance).then_some((*id, edge.first))
        });
        let Some((id, edge)) = picked else {
            return ToolResponse::Handled;
        };
        if event.kind != MouseEventKind::LeftDown {
            return ToolResponse::Handled;
        }

        Self::set_merge_index(ctx, id, Some(edge));
        match self.first {
            Some(first) if first != id => match ctx.editor.merge(first, id) {
                Ok(inserted) => {
                    info!(shape = %first, other = %id, inserted, "Merge complete");
                    Self::set_merge_index(ctx, first, None);
                    self.first = None;
                    return ToolResponse::Finished;
                }
                Err(err) => {
                    debug!(shape = %first, other = %id, "Merge rejected: {}", err);
                    Self::set_merge_index(ctx, id, None);
                }
            },
            _ => self.first = Some(id),
        }
        ToolResponse::Handled
    }

    fn on_object_deleted(&mut self, id: ObjectId) -> bool {
        if self.first == Some(id) {
            self.first = None;
        }
        false
    }
}
