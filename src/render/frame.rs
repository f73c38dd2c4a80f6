//! Turns a [`GameSnapshot`] into an ordered list of draw commands.
//!
//! Building a frame never touches the game; the same snapshot and time always produce
//! the same frame.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::constants::{MapTile, BOARD_PIXEL_OFFSET, BOARD_PIXEL_SIZE, CANVAS_SIZE, CELL_SIZE, FRIGHTENED_FLASH_TIME};
use crate::game::{GameSnapshot, GhostView};
use crate::map::direction::Direction;
use crate::systems::{GameStage, Ghost};

/// Width of one glyph of the built-in 8x8 font, in pixels.
pub const GLYPH_SIZE: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(0, 0, 0);
pub const WALL: Rgb = Rgb(33, 33, 222);
pub const DOOR: Rgb = Rgb(255, 184, 222);
pub const PELLET: Rgb = Rgb(255, 184, 151);
pub const PACMAN: Rgb = Rgb(255, 255, 0);
pub const TEXT: Rgb = Rgb(255, 255, 255);
pub const GAME_OVER: Rgb = Rgb(255, 0, 0);
pub const FRIGHTENED: Rgb = Rgb(33, 33, 255);
pub const FRIGHTENED_FLASH: Rgb = Rgb(222, 222, 255);

/// One immediate-mode drawing operation, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Rgb,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
    },
    /// A pie with a wedge cut out toward `facing`; `mouth` is the opening from 0 (shut) to 1.
    Pacman {
        center: Vec2,
        radius: f32,
        facing: Direction,
        mouth: f32,
    },
    /// A ghost body with eyes. Pupils look toward `pupils`; frightened ghosts have none.
    Ghost {
        center: Vec2,
        radius: f32,
        body: Rgb,
        pupils: Option<Direction>,
    },
    Text {
        origin: Vec2,
        text: String,
        color: Rgb,
    },
}

/// Everything drawn in one frame, back to front.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Builds the full frame for `snapshot`. `time` is wall-clock seconds, used only for
    /// pulsing pellets and flashing ghosts.
    pub fn build(snapshot: &GameSnapshot, time: f32) -> Frame {
        let mut frame = Frame::default();
        frame.commands.push(DrawCommand::Clear(BACKGROUND));
        frame.draw_maze(snapshot, time);
        frame.draw_pacman(snapshot);
        for ghost in &snapshot.ghosts {
            frame.draw_ghost(ghost, snapshot, time);
        }
        frame.draw_hud(snapshot);
        frame
    }

    fn draw_maze(&mut self, snapshot: &GameSnapshot, time: f32) {
        let cell = CELL_SIZE as f32;
        for (position, tile) in snapshot.map.tiles() {
            let center = tile_to_pixel(position.as_vec2());
            match tile {
                MapTile::Wall => self.commands.push(DrawCommand::Rect {
                    origin: center - Vec2::splat(cell / 2.0),
                    size: Vec2::splat(cell),
                    color: WALL,
                }),
                MapTile::Door => self.commands.push(DrawCommand::Rect {
                    origin: center - Vec2::new(cell / 2.0, 2.0),
                    size: Vec2::new(cell, 4.0),
                    color: DOOR,
                }),
                MapTile::Pellet => self.commands.push(DrawCommand::Circle {
                    center,
                    radius: 2.0,
                    color: PELLET,
                }),
                MapTile::PowerPellet => self.commands.push(DrawCommand::Circle {
                    center,
                    radius: 5.0 + 1.5 * (time * 6.0).sin(),
                    color: PELLET,
                }),
                MapTile::Empty | MapTile::Tunnel => {}
            }
        }
    }

    fn draw_pacman(&mut self, snapshot: &GameSnapshot) {
        if snapshot.stage == GameStage::GameOver {
            return;
        }
        let pacman = &snapshot.pacman;
        let mouth = if pacman.moving {
            (pacman.animation * TAU / 2.0).sin().abs()
        } else {
            0.5
        };
        self.commands.push(DrawCommand::Pacman {
            center: tile_to_pixel(pacman.center),
            radius: CELL_SIZE as f32 * 0.45,
            facing: pacman.direction,
            mouth,
        });
    }

    fn draw_ghost(&mut self, view: &GhostView, snapshot: &GameSnapshot, time: f32) {
        let (body, pupils) = if view.mode.is_frightened() {
            let flashing = snapshot.power.remaining < FRIGHTENED_FLASH_TIME && (time * 8.0) as i32 % 2 == 0;
            (if flashing { FRIGHTENED_FLASH } else { FRIGHTENED }, None)
        } else {
            (ghost_color(view.ghost), Some(view.direction))
        };

        self.commands.push(DrawCommand::Ghost {
            center: tile_to_pixel(view.center),
            radius: CELL_SIZE as f32 * 0.45,
            body,
            pupils,
        });
    }

    fn draw_hud(&mut self, snapshot: &GameSnapshot) {
        let right = CANVAS_SIZE.x as f32 - GLYPH_SIZE;

        self.text(Vec2::new(GLYPH_SIZE, 6.0), format!("SCORE {}", format_score(snapshot.score)), TEXT);
        let high = format!("HIGH {}", format_score(snapshot.high_score));
        self.text(Vec2::new(right - text_width(&high), 6.0), high, TEXT);

        self.text(Vec2::new(GLYPH_SIZE, 18.0), format!("LEVEL {}", snapshot.level), TEXT);
        if snapshot.power.active {
            let power = format!("POWER {:.1}", snapshot.power.remaining.max(0.0));
            self.text(Vec2::new(right - text_width(&power), 18.0), power, FRIGHTENED_FLASH);
        }

        let strip_center = (BOARD_PIXEL_OFFSET.y + BOARD_PIXEL_SIZE.y) as f32 + (CANVAS_SIZE.y - BOARD_PIXEL_OFFSET.y - BOARD_PIXEL_SIZE.y) as f32 / 2.0;
        // The life in play is not shown
        for i in 0..snapshot.lives.saturating_sub(1) {
            self.commands.push(DrawCommand::Pacman {
                center: Vec2::new(16.0 + i as f32 * 20.0, strip_center),
                radius: 7.0,
                facing: Direction::Left,
                mouth: 0.5,
            });
        }

        let banner = match snapshot.stage {
            GameStage::GameOver => Some(("GAME OVER", GAME_OVER)),
            _ if snapshot.paused => Some(("PAUSED", TEXT)),
            GameStage::Starting { .. } => Some(("READY!", PACMAN)),
            GameStage::Playing => None,
        };
        if let Some((text, color)) = banner {
            // Centred on the row below the ghost house
            let y = BOARD_PIXEL_OFFSET.y as f32 + 11.0 * CELL_SIZE as f32 + (CELL_SIZE as f32 - GLYPH_SIZE) / 2.0;
            let x = (CANVAS_SIZE.x as f32 - text_width(text)) / 2.0;
            self.text(Vec2::new(x, y), text.to_string(), color);
        }
    }

    fn text(&mut self, origin: Vec2, text: String, color: Rgb) {
        self.commands.push(DrawCommand::Text { origin, text, color });
    }
}

/// Canvas pixel at the centre of a position given in tile coordinates.
pub fn tile_to_pixel(tile: Vec2) -> Vec2 {
    BOARD_PIXEL_OFFSET.as_vec2() + (tile + Vec2::splat(0.5)) * CELL_SIZE as f32
}

/// Scores are shown zero-padded to six digits.
pub fn format_score(score: u32) -> String {
    format!("{score:06}")
}

fn text_width(text: &str) -> f32 {
    text.chars().count() as f32 * GLYPH_SIZE
}

pub fn ghost_color(ghost: Ghost) -> Rgb {
    match ghost {
        Ghost::Blinky => Rgb(255, 0, 0),
        Ghost::Pinky => Rgb(255, 184, 255),
        Ghost::Inky => Rgb(0, 255, 255),
        Ghost::Clyde => Rgb(255, 184, 82),
    }
}
