//! Scripted demo.
//!
//! Loads a script manifest against an in-process runtime, lets the static
//! `init()` build the scene and runs it headlessly with a wandering pointer.

mod classes;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use engine_app::{EngineConfig, Platform, TickLoop, World};
use engine_math::Vec2;
use engine_ui::Pointer;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_MANIFEST: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scripts.json");

#[derive(Parser)]
#[command(name = "scripted", about = "Script classes driving entities, headless")]
struct Args {
    /// Engine configuration file (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Script manifest. Overrides the `scripts` entry of the config.
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Stop after this many ticks.
    #[arg(long, default_value_t = 120)]
    ticks: u64,
}

/// Moves the pointer in a circle around the window centre.
struct Orbit {
    frame: u64,
}

impl Platform for Orbit {
    fn draw(&mut self, _world: &mut World) -> anyhow::Result<()> {
        self.frame += 1;
        Ok(())
    }

    fn update_window(&mut self, world: &mut World) -> anyhow::Result<()> {
        let angle = self.frame as f32 * 0.1;
        if let Some(pointer) = world.resource_mut::<Pointer>() {
            pointer.move_to(Vec2::new(640.0, 360.0) + Vec2::new(angle.cos(), angle.sin()) * 100.0);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("scripted=info".parse()?)
                .add_directive("script=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    config.tick.max_ticks = args.ticks;
    let manifest = args
        .manifest
        .or_else(|| config.scripts.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));

    let mut world = World::with_config(&config.ecs);
    engine_app::install_window(&mut world, &config.window);
    engine_ui::init(&mut world)?;
    components::register(&mut world)?;

    match engine_script::load_from_path(&mut world, classes::runtime(), &manifest)? {
        Some(report) => info!(
            types = report.types.len(),
            failed = ?report.failed,
            "script classes registered"
        ),
        None => info!(path = %manifest.display(), "running without scripts"),
    }

    let mut tick_loop = TickLoop::new(config.tick, world);
    let reason = tick_loop.run(&mut Orbit { frame: 0 });
    info!(?reason, ticks = tick_loop.tick_id(), "scripted demo finished");
    Ok(())
}
