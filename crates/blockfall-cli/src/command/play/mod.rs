use std::path::PathBuf;

use blockfall_engine::{GameConfig, PieceSeed, render::TARGET_FPS};
use ratatui_runtime::Runtime;

use crate::util;

use self::app::PlayApp;

mod app;
mod input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// JSON file overriding timing and scoring settings
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Frames per second
    #[clap(
        long,
        default_value_t = TARGET_FPS,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    pub(crate) fps: u32,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, config, fps } = arg;

    let config = match config {
        Some(path) => util::read_game_config_file(path)?,
        None => GameConfig::default(),
    };
    let seed = seed.map_or_else(PieceSeed::random, PieceSeed::from);

    let mut app = PlayApp::new(config, seed, *fps);
    Runtime::new().run(&mut app)?;

    let session = app.session();
    println!("Score: {} (seed: {})", session.score(), session.seed());
    Ok(())
}
