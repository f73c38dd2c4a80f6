//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The longest slice of time a single schedule run may simulate, in seconds.
pub const MAX_STEP: f32 = 1.0 / 60.0;
/// Frame times above this are clamped, so a stalled driver cannot fast-forward the game.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// The size of each cell, in pixels.
pub const CELL_SIZE: u32 = 20;
/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(19, 21);

/// Height of the HUD strip drawn above the board, in pixels.
pub const HUD_TOP_HEIGHT: u32 = 32;
/// Height of the HUD strip drawn below the board, in pixels.
pub const HUD_BOTTOM_HEIGHT: u32 = 24;

/// The offset of the game board from the top-left corner of the window, in pixels.
pub const BOARD_PIXEL_OFFSET: UVec2 = UVec2::new(0, HUD_TOP_HEIGHT);
/// The size of the game board, in pixels.
pub const BOARD_PIXEL_SIZE: UVec2 = UVec2::new(BOARD_CELL_SIZE.x * CELL_SIZE, BOARD_CELL_SIZE.y * CELL_SIZE);
/// The size of the canvas, in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(
    BOARD_PIXEL_SIZE.x,
    BOARD_PIXEL_SIZE.y + HUD_TOP_HEIGHT + HUD_BOTTOM_HEIGHT,
);

/// Points awarded for a regular pellet.
pub const PELLET_SCORE: u32 = 10;
/// Points awarded for a power pellet.
pub const POWER_PELLET_SCORE: u32 = 50;
/// Bonus for the first ghost eaten in a power window; doubles for each subsequent ghost.
pub const GHOST_BASE_SCORE: u32 = 200;
/// The streak value at which the ghost bonus stops doubling (200 << 3 = 1600).
pub const GHOST_STREAK_CAP: u32 = 3;

/// Distance between two actor centres, in tiles, below which they collide.
pub const COLLISION_DISTANCE: f32 = 0.5;

/// Shortest power mode a high level can shrink to, in seconds.
pub const MIN_POWER_DURATION: f32 = 2.0;
/// Power mode shrinks by this many seconds per level.
pub const POWER_DURATION_STEP: f32 = 0.5;
/// Frightened ghosts flash during this many final seconds of power mode.
pub const FRIGHTENED_FLASH_TIME: f32 = 2.0;

/// Speed bonus per level above the first.
pub const LEVEL_SPEED_STEP: f32 = 0.05;
/// Upper bound on the level speed multiplier.
pub const MAX_LEVEL_SPEED: f32 = 1.25;

/// Ghost speed multiplier while frightened.
pub const FRIGHTENED_SPEED_FACTOR: f32 = 0.5;
/// Ghost speed multiplier on tunnel tiles.
pub const TUNNEL_SPEED_FACTOR: f32 = 0.5;
/// Ghost speed multiplier while walking out of the house.
pub const HOUSE_SPEED_FACTOR: f32 = 0.5;

/// Minimum pointer travel, in pixels, before a drag counts as a swipe.
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Storage key under which the high score is persisted.
pub const HIGH_SCORE_KEY: &str = "pacman_high_score";

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty tile.
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet (a "dot").
    Pellet,
    /// A power pellet.
    PowerPellet,
    /// An empty tile inside the side tunnel, where ghosts slow down.
    Tunnel,
    /// The ghost house gate. Only ghosts leaving the house may cross it.
    Door,
}

impl MapTile {
    /// Returns true for tiles that still hold something to eat.
    pub fn is_edible(self) -> bool {
        matches!(self, MapTile::Pellet | MapTile::PowerPellet)
    }

    /// Points awarded for eating this tile's contents, if any.
    pub fn score_value(self) -> Option<u32> {
        match self {
            MapTile::Pellet => Some(PELLET_SCORE),
            MapTile::PowerPellet => Some(POWER_PELLET_SCORE),
            _ => None,
        }
    }
}

/// The raw layout of the game board, as a 2D array of characters.
///
/// `X` marks Pac-Man's start, `B` the house exit (and Blinky's start), `G` the three
/// in-house ghost starts in reading order, `=` the house door and `T` the tunnel.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "###################",
    "#........#........#",
    "#o##.###.#.###.##o#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.### # ###.####",
    "####.#   B   #.####",
    "####.# ##=## #.####",
    "TTTT.  #GGG#  .TTTT",
    "####.# ##### #.####",
    "####.#   .   #.####",
    "####.# ##### #.####",
    "#........#........#",
    "#.##.###...###.##.#",
    "#o.#....#X#....#.o#",
    "##.#.#..#.#..#.#.##",
    "#....#.......#....#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];
