//! An editing session: editor state, one viewport and the active tool.

use shapekit_core::{ObjectId, Vec3};
use shapekit_settings::Config;
use tracing::info;

use crate::commit::EngineServices;
use crate::editor_state::EditorState;
use crate::error::ShapeError;
use crate::shape::ShapeKind;
use crate::tools::{
    CreateShapeTool, EditShapeTool, EditTool, Key, MergeShapesTool, MouseEvent, SplitShapeTool,
    ToolContext, ToolManager, ToolResponse,
};
use crate::viewport::Viewport;

/// Camera height used for the default top-down viewport.
const DEFAULT_VIEW_HEIGHT: f64 = 50.0;

#[derive(Debug)]
pub struct EditorSession {
    pub editor: EditorState,
    pub view: Viewport,
    pub tools: ToolManager,
}

impl EditorSession {
    pub fn new(config: &Config, services: EngineServices) -> Self {
        Self {
            editor: EditorState::new(config, services),
            view: Viewport::from_settings(&config.viewport, Vec3::zeros(), DEFAULT_VIEW_HEIGHT),
            tools: ToolManager::new(),
        }
    }

    pub fn with_viewport(editor: EditorState, view: Viewport) -> Self {
        Self {
            editor,
            view,
            tools: ToolManager::new(),
        }
    }

    pub fn set_tool(&mut self, tool: Box<dyn EditTool>) {
        let mut ctx = ToolContext {
            editor: &mut self.editor,
            view: &mut self.view,
        };
        self.tools.set_tool(&mut ctx, tool);
    }

    pub fn clear_tool(&mut self) {
        let mut ctx = ToolContext {
            editor: &mut self.editor,
            view: &mut self.view,
        };
        self.tools.clear(&mut ctx);
    }

    pub fn edit_shape(&mut self, id: ObjectId) {
        self.set_tool(Box::new(EditShapeTool::new(id)));
    }

    pub fn split_shape(&mut self, id: ObjectId) {
        self.set_tool(Box::new(SplitShapeTool::new(id)));
    }

    pub fn merge_shapes(&mut self) {
        self.set_tool(Box::new(MergeShapesTool::new()));
    }

    pub fn create_shape(&mut self, kind: ShapeKind) {
        self.set_tool(Box::new(CreateShapeTool::new(kind)));
    }

    pub fn mouse_event(&mut self, event: &MouseEvent) -> ToolResponse {
        let mut ctx = ToolContext {
            editor: &mut self.editor,
            view: &mut self.view,
        };
        let response = self.tools.mouse_event(&mut ctx, event);
        self.dispatch_deleted();
        response
    }

    pub fn key_event(&mut self, key: Key) -> ToolResponse {
        let mut ctx = ToolContext {
            editor: &mut self.editor,
            view: &mut self.view,
        };
        let response = self.tools.key_event(&mut ctx, key);
        self.dispatch_deleted();
        response
    }

    /// Deletes an object as its own undo step.
    ///
    /// A tool working on the object is removed first, and any transaction
    /// still open (a drag in progress) is rolled back so the deletion is not
    /// recorded into it.
    pub fn delete_object(&mut self, id: ObjectId) -> Result<(), ShapeError> {
        if !self.editor.objects.contains(id) {
            return Err(ShapeError::ObjectNotFound(id));
        }
        let mut ctx = ToolContext {
            editor: &mut self.editor,
            view: &mut self.view,
        };
        self.tools.objects_deleted(&mut ctx, &[id]);
        if self.editor.undo.is_recording() {
            self.clear_tool();
        }
        if self.editor.undo.is_recording() {
            self.editor.cancel_undo();
        }
        let result = self.editor.delete_object(id);
        self.dispatch_deleted();
        result
    }

    pub fn undo(&mut self) -> Option<String> {
        let description = self.editor.undo();
        if let Some(description) = &description {
            info!("Undo: {}", description);
        }
        self.dispatch_deleted();
        description
    }

    pub fn redo(&mut self) -> Option<String> {
        let description = self.editor.redo();
        if let Some(description) = &description {
            info!("Redo: {}", description);
        }
        self.dispatch_deleted();
        description
    }

    /// Tells the active tool about objects removed since the last dispatch.
    fn dispatch_deleted(&mut self) {
        let deleted = self.editor.drain_deleted();
        if deleted.is_empty() {
            return;
        }
        let mut ctx = ToolContext {
            editor: &mut self.editor,
            view: &mut self.view,
        };
        self.tools.objects_deleted(&mut ctx, &deleted);
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(&Config::default(), EngineServices::new())
    }
}
