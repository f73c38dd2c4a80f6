//! Plays the game headlessly with the autopilot and prints a JSON summary.
//!
//! Usage: `simulate [SECONDS] [SEED]`

use std::env;

use anyhow::{Context, Result};
use pacman_tick::autopilot;
use pacman_tick::config::Config;
use pacman_tick::constants::LOOP_TIME;
use pacman_tick::events::{GameCommand, StageTransition};
use pacman_tick::game::Game;
use pacman_tick::highscore::MemoryStore;
use pacman_tick::logging::setup_logging;
use pacman_tick::systems::GameStage;
use serde::Serialize;
use tracing::{debug, info};

const DEFAULT_SECONDS: f32 = 120.0;

#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: Option<u64>,
    seconds: f32,
    score: u32,
    high_score: u32,
    level: u32,
    lives: u8,
    levels_cleared: u32,
    deaths: u32,
    ghosts_eaten: u32,
    game_over: bool,
}

fn main() -> Result<()> {
    setup_logging();

    let mut args = env::args().skip(1);
    let seconds = match args.next() {
        Some(arg) => arg.parse::<f32>().with_context(|| format!("Invalid number of seconds: {arg}"))?,
        None => DEFAULT_SECONDS,
    };
    let seed = args
        .next()
        .map(|arg| arg.parse::<u64>().with_context(|| format!("Invalid seed: {arg}")))
        .transpose()?;

    let mut config = Config::load().context("Could not load configuration")?;
    if seed.is_some() {
        config.seed = seed;
    }

    let mut summary = Summary {
        seed: config.seed,
        ..Default::default()
    };

    let mut game = Game::new(config, Box::new(MemoryStore::new())).context("Could not create game")?;

    let dt = LOOP_TIME.as_secs_f32();
    let frames = (seconds.max(0.0) / dt).ceil() as u64;
    info!(seconds, frames, "Starting headless simulation");

    for frame in 0..frames {
        let snapshot = game.snapshot();
        if let Some(direction) = autopilot::next_direction(&snapshot) {
            game.command(GameCommand::MovePlayer(direction));
        }

        if game.tick(dt) {
            break;
        }
        summary.seconds = (frame + 1) as f32 * dt;

        for transition in game.take_transitions() {
            debug!(?transition, "Stage transition");
            match transition {
                StageTransition::LevelCleared { level } => {
                    summary.levels_cleared += 1;
                    info!(level, score = game.score(), "Level cleared");
                }
                StageTransition::PlayerDied { lives_left } => {
                    summary.deaths += 1;
                    info!(lives_left, "Pac-Man died");
                }
                StageTransition::GhostEaten { .. } => summary.ghosts_eaten += 1,
                StageTransition::GameOver { score } => info!(score, "Game over"),
            }
        }

        if game.stage() == GameStage::GameOver {
            summary.game_over = true;
            break;
        }
    }

    summary.score = game.score();
    summary.high_score = game.high_score();
    summary.level = game.level();
    summary.lives = game.lives();

    println!("{}", serde_json::to_string_pretty(&summary).context("Could not serialize summary")?);
    Ok(())
}
