//! Pac-Man simulation library crate.
//!
//! The simulation core is headless; the SDL2 front-end lives behind the `desktop` feature.

#[cfg(feature = "desktop")]
pub mod app;
pub mod autopilot;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod highscore;
pub mod input;
pub mod logging;
pub mod map;
pub mod render;
pub mod systems;
