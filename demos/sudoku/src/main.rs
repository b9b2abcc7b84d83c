//! Sudoku demo.
//!
//! Builds a 9×9 board of UI cells and plays it headlessly: a synthetic
//! pointer clicks through the open cells, each click cycling a digit.

mod board;
mod platform;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use engine_app::{EngineConfig, TickLoop, World};
use engine_ui::{HeadlessRenderer, Visuals};
use tracing::info;
use tracing_subscriber::EnvFilter;

use board::Board;
use platform::Clicker;

#[derive(Parser)]
#[command(name = "sudoku", about = "Headless sudoku board driven by synthetic clicks")]
struct Args {
    /// Engine configuration file (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,

    /// Window width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Number of cells to click.
    #[arg(long, default_value_t = 20)]
    clicks: usize,

    /// Frames between clicks.
    #[arg(long, default_value_t = 2)]
    interval: u64,

    /// Puzzle as 81 characters, `.` for empty cells.
    #[arg(long, default_value = board::PUZZLE)]
    puzzle: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sudoku=info".parse()?))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.tick.max_ticks = ticks;
    }
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }

    let mut world = World::with_config(&config.ecs);
    engine_app::install_window(&mut world, &config.window);
    world.insert_resource(Visuals::new(HeadlessRenderer::new()));
    engine_ui::init(&mut world)?;
    components::register(&mut world)?;

    let puzzle = Board::parse(&args.puzzle)?;
    let targets: Vec<_> = puzzle.open_cells().take(args.clicks).collect();
    board::build(&mut world, puzzle)?;

    let mut clicker = Clicker::new(targets, args.interval);
    let mut tick_loop = TickLoop::new(config.tick, world);
    let reason = tick_loop.run(&mut clicker);

    if let Some(board) = tick_loop.world().resource::<Board>() {
        info!(
            ?reason,
            clicks = clicker.clicked(),
            filled = board.filled(),
            conflicts = board.conflicts(),
            solved = board.is_solved(),
            "sudoku finished"
        );
        println!("{board}");
    }
    Ok(())
}
