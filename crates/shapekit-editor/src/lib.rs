//! # ShapeKit Editor
//!
//! Interactive editing of shape and area objects: ordered point lists with
//! open/closed topology and height extrusion, used as the source geometry for
//! trigger areas, navigation areas, visibility areas and game volumes.
//!
//! ## Layers
//!
//! 1. [`snapping`] - grid/angle/scale quantization and snap-mode flags
//! 2. [`viewport`] - camera rays and construction-plane projection
//! 3. [`shape`] - the shape object, its mutation operations and picking
//! 4. [`commit`] - adapters that push shape geometry into engine services
//! 5. [`undo`], [`object_manager`], [`editor_state`] - editor collaborators
//! 6. [`tools`] - mouse-driven edit, split, merge and create tools
//! 7. [`session`] - wires an editor, a viewport and the active tool together
//! 8. [`level_file`] - JSON persistence of shapes

pub mod commit;
pub mod editor_state;
pub mod error;
pub mod level_file;
pub mod object_manager;
pub mod session;
pub mod shape;
pub mod snapping;
pub mod tools;
pub mod undo;
pub mod viewport;

pub use commit::{
    CommitStrategy, EngineServices, InMemoryEntityAreas, InMemoryGameVolumes,
    InMemoryNavigation, InMemoryServices, InMemoryVisAreas, NavigationAreaType, VisAreaKind,
};
pub use editor_state::EditorState;
pub use error::{CommitError, ShapeError};
pub use level_file::{LevelFile, ShapeRecord};
pub use object_manager::ObjectManager;
pub use session::EditorSession;
pub use shape::{AreaParams, EdgeHit, FillMesh, ShapeKind, ShapeObject, ShapeSnapshot, SoundObstruction};
pub use snapping::{SnapMode, SnappingPreferences};
pub use tools::{
    CreateShapeTool, EditShapeTool, EditTool, Key, MergeShapesTool, Modifiers, MouseEvent,
    MouseEventKind, SplitCandidate, SplitShapeTool, ToolContext, ToolManager, ToolResponse,
};
pub use undo::{UndoManager, UndoRecord};
pub use viewport::{AxisConstraint, Camera, FlatGround, SceneQuery, Viewport};
