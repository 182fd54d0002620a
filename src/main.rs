//! Headless editing session.
//!
//! Loads a configuration, loads a level or builds a small demo one against
//! in-memory engine services, prints a report and optionally saves the level.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use shapekit::{
    init_logging, summarize, Config, EditorSession, EngineServices, InMemoryServices, LevelFile,
    ShapeKind, Vec3, BUILD_DATE, BUILD_PROFILE, VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "shapekit")]
#[command(about = "Headless shape and area editing session", version)]
struct Cli {
    /// Configuration file (.json or .toml); the platform config is used otherwise
    #[arg(short, long, conflicts_with = "defaults")]
    config: Option<PathBuf>,

    /// Ignore any config file and use built-in defaults
    #[arg(long)]
    defaults: bool,

    /// Level file to load; a demo level is built when omitted
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// Where to save the level after the session
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    if cli.defaults {
        return Ok(Config::default());
    }
    match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load_or_default().context("Failed to load config"),
    }
}

fn build_demo_level(session: &mut EditorSession) -> Result<()> {
    let shapes: [(ShapeKind, &[(f64, f64)]); 3] = [
        (
            ShapeKind::Area,
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 6.0), (0.0, 6.0)],
        ),
        (
            ShapeKind::NavigationArea,
            &[(20.0, 0.0), (32.0, 0.0), (26.0, 9.0)],
        ),
        (ShapeKind::AiPath, &[(0.0, 12.0), (8.0, 14.0), (16.0, 12.0)]),
    ];

    let editor = &mut session.editor;
    for (kind, points) in shapes {
        let id = editor.create_shape(kind)?;
        for &(x, y) in points {
            // Points are local; the shape recenters on its first point.
            let local = editor
                .shape(id)
                .map(|shape| shape.transform().inverse_transform_point(&Vec3::new(x, y, 0.0)))
                .with_context(|| format!("Shape {} vanished while building the demo", id))?;
            editor.insert_point(id, None, local, true)?;
        }
        if kind.default_closed() {
            editor.set_closed(id, true)?;
        }
        if kind == ShapeKind::Area {
            editor.set_height(id, 4.0)?;
        }
    }
    editor.undo.clear();
    Ok(())
}

fn report(session: &EditorSession, handles: &InMemoryServices) {
    for summary in summarize(&session.editor) {
        println!("{}", summary);
    }
    println!(
        "engine: {} navigation volumes, {} vis areas, {} entity areas, {} game volumes",
        handles.navigation.volume_count(),
        handles.vis_areas.len(),
        handles.entity_areas.len(),
        handles.game_volumes.len(),
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    info!(
        version = VERSION,
        built = BUILD_DATE,
        profile = BUILD_PROFILE,
        "ShapeKit starting"
    );

    let config = load_config(&cli)?;
    let (services, handles) = EngineServices::in_memory();
    let mut session = EditorSession::new(&config, services);

    let level_name = match &cli.level {
        Some(path) => {
            let level = LevelFile::load_from_file(path)
                .with_context(|| format!("Failed to load level {}", path.display()))?;
            level.restore_into(&mut session.editor)?;
            level.metadata.name
        }
        None => {
            build_demo_level(&mut session)?;
            "Demo".to_string()
        }
    };

    report(&session, &handles);

    if let Some(out) = &cli.out {
        LevelFile::from_editor(level_name, &session.editor).save_to_file(out)?;
    }
    Ok(())
}
