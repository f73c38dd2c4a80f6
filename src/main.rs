use anyhow::{Context, Result};
use pacman_tick::app::App;
use pacman_tick::config::Config;
use pacman_tick::constants::LOOP_TIME;
use pacman_tick::logging::setup_logging;
use tracing::info;

/// The main entry point of the application.
///
/// This function initializes logging, loads the configuration, creates the window and
/// game, and then enters the main game loop.
pub fn main() -> Result<()> {
    setup_logging();

    let config = Config::load().context("Could not load configuration")?;
    let mut app = App::new(config).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run().context("Frame failed")? {}

    Ok(())
}
