//! # ShapeKit
//!
//! Shape and area editing for a level editor: ordered point lists with
//! open/closed topology and height extrusion, edited through mouse-driven
//! tools and committed to engine services.
//!
//! ## Architecture
//!
//! ShapeKit is organized as a workspace with multiple crates:
//!
//! 1. **shapekit-core** - Math types, geometric primitives, object ids
//! 2. **shapekit-settings** - Snapping, editing and viewport configuration
//! 3. **shapekit-editor** - Shapes, tools, undo, commit adapters, level files
//! 4. **shapekit** - Headless binary that integrates all crates

pub use shapekit_core::{Aabb, ObjectId, Vec2, Vec3, WorldTransform};
pub use shapekit_editor::{
    EditorSession, EditorState, EngineServices, InMemoryServices, LevelFile, ShapeKind,
    ShapeObject,
};
pub use shapekit_settings::Config;

use std::fmt;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build timestamp, UTC, stamped by the build script
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Cargo profile the binary was built with
pub const BUILD_PROFILE: &str = env!("BUILD_PROFILE");

/// Used when `RUST_LOG` is unset, empty or unparsable.
const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the log filter from `RUST_LOG`-style directives.
fn log_filter(directives: Option<&str>) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// One line of the session report.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSummary {
    pub name: String,
    pub kind: ShapeKind,
    pub points: usize,
    pub closed: bool,
    pub bounds: Aabb,
    pub fill_triangles: usize,
    pub status: Option<String>,
}

impl ShapeSummary {
    pub fn from_shape(shape: &ShapeObject) -> Self {
        let fill_triangles = match shape.fill_mesh() {
            Ok(mesh) => mesh.triangle_count(),
            Err(err) => {
                tracing::warn!(shape = %shape.name(), "Fill failed: {}", err);
                0
            }
        };
        Self {
            name: shape.name().to_string(),
            kind: shape.kind(),
            points: shape.point_count(),
            closed: shape.is_closed(),
            bounds: shape.local_bounds().transformed(shape.transform()),
            fill_triangles,
            status: shape.status_label(),
        }
    }
}

impl fmt::Display for ShapeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} points, {}, bounds ({:.2}, {:.2}, {:.2})..({:.2}, {:.2}, {:.2}), {} fill triangles",
            self.name,
            self.kind,
            self.points,
            if self.closed { "closed" } else { "open" },
            self.bounds.min.x,
            self.bounds.min.y,
            self.bounds.min.z,
            self.bounds.max.x,
            self.bounds.max.y,
            self.bounds.max.z,
            self.fill_triangles,
        )?;
        if let Some(status) = &self.status {
            write!(f, " - {}", status)?;
        }
        Ok(())
    }
}

/// Summaries of every shape in creation order.
pub fn summarize(editor: &EditorState) -> Vec<ShapeSummary> {
    editor.objects.iter().map(ShapeSummary::from_shape).collect()
}
