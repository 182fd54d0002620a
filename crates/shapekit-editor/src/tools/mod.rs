//! Interactive shape tools.
//!
//! Tools are state machines re-entered once per input event; all of their
//! state lives in fields. The [`ToolManager`] owns the active tool and drops
//! it when the tool reports [`ToolResponse::Finished`], after giving it a
//! chance to roll back any open undo transaction in
//! [`EditTool::deactivate`].

pub mod create_shape;
pub mod edit_shape;
pub mod merge_shapes;
pub mod split_shape;

use std::fmt;

use shapekit_core::{ObjectId, Vec2};
use tracing::debug;

use crate::editor_state::EditorState;
use crate::viewport::Viewport;

pub use create_shape::CreateShapeTool;
pub use edit_shape::EditShapeTool;
pub use merge_shapes::MergeShapesTool;
pub use split_shape::{SplitCandidate, SplitShapeTool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    LeftDown,
    LeftUp,
    LeftDoubleClick,
    Move,
}

/// Keyboard modifiers held during a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// A mouse event in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub point: Vec2,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, point: Vec2) -> Self {
        Self {
            kind,
            point,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Other,
}

/// What a tool did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolResponse {
    /// Not relevant to this tool.
    Ignored,
    Handled,
    /// The tool is done and should be removed.
    Finished,
}

/// Everything a tool may touch while handling an event.
pub struct ToolContext<'a> {
    pub editor: &'a mut EditorState,
    pub view: &'a mut Viewport,
}

/// An interactive tool driven by viewport input.
pub trait EditTool: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Called once when the tool becomes active.
    fn activate(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Called once when the tool is removed, whatever the reason.
    fn deactivate(&mut self, _ctx: &mut ToolContext<'_>) {}

    fn mouse_event(&mut self, ctx: &mut ToolContext<'_>, event: &MouseEvent) -> ToolResponse;

    fn key_event(&mut self, _ctx: &mut ToolContext<'_>, key: Key) -> ToolResponse {
        match key {
            Key::Escape => ToolResponse::Finished,
            _ => ToolResponse::Ignored,
        }
    }

    /// An object was deleted. Returns true if the tool can no longer work.
    fn on_object_deleted(&mut self, _id: ObjectId) -> bool {
        false
    }
}

/// Owns the single active tool.
#[derive(Debug, Default)]
pub struct ToolManager {
    active: Option<Box<dyn EditTool>>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active tool. The previous one is deactivated first.
    pub fn set_tool(&mut self, ctx: &mut ToolContext<'_>, mut tool: Box<dyn EditTool>) {
        self.clear(ctx);
        debug!(tool = tool.name(), "Tool activated");
        tool.activate(ctx);
        self.active = Some(tool);
    }

    /// Deactivates and drops the active tool.
    pub fn clear(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(mut tool) = self.active.take() {
            tool.deactivate(ctx);
            debug!(tool = tool.name(), "Tool deactivated");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.active.as_ref().map(|t| t.name())
    }

    pub fn mouse_event(&mut self, ctx: &mut ToolContext<'_>, event: &MouseEvent) -> ToolResponse {
        let Some(tool) = self.active.as_mut() else {
            return ToolResponse::Ignored;
        };
        let response = tool.mouse_event(ctx, event);
        if response == ToolResponse::Finished {
            self.clear(ctx);
        }
        response
    }

    pub fn key_event(&mut self, ctx: &mut ToolContext<'_>, key: Key) -> ToolResponse {
        let Some(tool) = self.active.as_mut() else {
            return ToolResponse::Ignored;
        };
        let response = tool.key_event(ctx, key);
        if response == ToolResponse::Finished {
            self.clear(ctx);
        }
        response
    }

    /// Forwards object deletions; a tool that loses its shape is removed.
    pub fn objects_deleted(&mut self, ctx: &mut ToolContext<'_>, ids: &[ObjectId]) {
        let Some(tool) = self.active.as_mut() else {
            return;
        };
        let lost = ids
            .iter()
            .fold(false, |lost, id| tool.on_object_deleted(*id) || lost);
        if lost {
            self.clear(ctx);
        }
    }
}

/// Pick tolerance for a candidate at view depth `scale`.
pub(crate) fn pick_tolerance(close_distance: f64, scale: f64, factor: f64, view: &Viewport) -> f64 {
    close_distance * scale * factor + view.selection_tolerance()
}
