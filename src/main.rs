//! Play As Gobo: a small 2D action game
//!
//! Grow by eating enemies, stomp the ones that jump at you, and drop bombs
//! before they reach the finish line and shrink you away.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod assets;
mod audio;
mod config;
mod game;
mod input;
mod menu;
mod ui;

use app::{Game, GameError};
use config::GameConfig;
use log::error;
use macroquad::prelude::*;

fn window_conf() -> Conf {
    // Errors are reported properly once logging is up in `run`
    let config = GameConfig::load(GameConfig::default_path()).unwrap_or_default();
    Conf {
        window_title: "Play as Gobo!".to_owned(),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

async fn run() -> Result<(), GameError> {
    let config = GameConfig::load_or_create(GameConfig::default_path())?;
    let mut game = Game::new(config).await?;
    game.run().await
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Play As Gobo v{}", VERSION);

    if let Err(e) = run().await {
        error!("Game initialization error: {}", e);
        std::process::exit(-1);
    }
}
