//! Splits a shape in two at a picked vertex or edge point.

use shapekit_core::{point_to_line_distance, ObjectId, Vec3};
use tracing::{debug, info};

use super::{pick_tolerance, EditTool, MouseEvent, MouseEventKind, ToolContext, ToolResponse};

const PICK_FACTOR: f64 = 0.04;

/// An edge is a candidate when its projection is this close to the cursor.
const EDGE_PICK_PIXELS: f64 = 20.0;

/// What a click would split at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitCandidate {
    NoCandidate,
    /// Exactly on an existing vertex.
    Vertex(usize),
    /// On the edge starting at `index`; `point` is in shape-local space
    /// and is inserted before splitting.
    Edge { index: usize, point: Vec3 },
}

#[derive(Debug)]
pub struct SplitShapeTool {
    shape: ObjectId,
    candidate: SplitCandidate,
}

impl SplitShapeTool {
    pub fn new(shape: ObjectId) -> Self {
        Self {
            shape,
            candidate: SplitCandidate::NoCandidate,
        }
    }

    pub fn candidate(&self) -> SplitCandidate {
        self.candidate
    }
}

impl EditTool for SplitShapeTool {
    fn name(&self) -> &'static str {
        "Split Shape"
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
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
        let Some(shape) = ctx.editor.shape(self.shape) else {
            return ToolResponse::Finished;
        };

        self.candidate = match shape.nearest_edge_by_ray(&ray) {
            Some(edge) => {
                let tolerance = pick_tolerance(
                    close,
                    ctx.view.screen_scale_factor(&edge.point),
                    PICK_FACTOR,
                    ctx.view,
                );
                // Picked in screen space; the split point is moved onto the edge.
                let on_edge = match (shape.world_point(edge.first), shape.world_point(edge.second)) {
                    (Some(a), Some(b)) => ctx
                        .view
                        .edge_screen_distance(&event.point, &a, &b)
                        .filter(|d| *d < EDGE_PICK_PIXELS)
                        .map(|_| point_to_line_distance(&a, &b, &edge.point).1),
                    _ => None,
                };
                if let Some(world) = on_edge {
                    let local = shape.transform().inverse_transform_point(&world);
                    let near = |i: usize| shape.point(i).is_some_and(|p| (local - p).norm() < tolerance);
                    if near(edge.first) {
                        SplitCandidate::Vertex(edge.first)
                    } else if near(edge.second) {
                        SplitCandidate::Vertex(edge.second)
                    } else {
                        SplitCandidate::Edge {
                            index: edge.first,
                            point: local,
                        }
                    }
                } else {
                    SplitCandidate::NoCandidate
                }
            }
            None => SplitCandidate::NoCandidate,
        };

        if event.kind == MouseEventKind::LeftDown {
            let (index, snap, point) = match self.candidate {
                SplitCandidate::Vertex(index) => (index, true, Vec3::zeros()),
                SplitCandidate::Edge { index, point } => (index, false, point),
                SplitCandidate::NoCandidate => return ToolResponse::Handled,
            };
            match ctx.editor.split_at_point(self.shape, index, snap, point) {
                Ok(piece) => {
                    info!(shape = %self.shape, %piece, "Split complete");
                    return ToolResponse::Finished;
                }
                Err(err) => debug!(shape = %self.shape, index, "Split rejected: {}", err),
            }
        }
        ToolResponse::Handled
    }

    fn on_object_deleted(&mut self, id: ObjectId) -> bool {
        id == self.shape
    }
}
