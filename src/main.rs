use anyhow::{Context, Result};
use tracing::info;

use maze_chase::app::App;
use maze_chase::config::GameConfig;
use maze_chase::constants::RAW_BOARD;
use maze_chase::game::Game;
use maze_chase::platform;

pub fn main() -> Result<()> {
    platform::init_tracing().context("Could not set global default subscriber")?;

    let game = Game::new(&RAW_BOARD, GameConfig::default()).context("Failed to load the built-in board")?;
    let (renderer, input) = platform::sdl::init("Maze Chase", game.pixel_size()).context("Failed to start SDL")?;

    info!("Starting game loop ({:?})", game.config().tick_period);
    let mut app = App::new(game, renderer, input);
    app.run().context("Game loop failed")?;

    info!("Exiting");
    Ok(())
}

