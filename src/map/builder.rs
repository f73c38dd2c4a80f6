//! Map construction and the tile grid the simulation runs on.

use crate::constants::MapTile;
use crate::error::ParseError;
use crate::map::direction::Direction;
use crate::map::parser::MapTileParser;
use bevy_ecs::resource::Resource;
use glam::IVec2;
use tracing::debug;

/// Who is trying to enter a tile. The house door is only open to ghosts on their way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Pacman,
    Ghost,
    LeavingHouse,
}

/// The starting positions of the entities in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartPositions {
    pub pacman: IVec2,
    /// Blinky's start, also the tile ghosts walk to when leaving the house.
    pub house_exit: IVec2,
    pub house_door: IVec2,
    /// Pinky, Inky and Clyde, in reading order.
    pub house: [IVec2; 3],
}

impl StartPositions {
    /// Where an eaten ghost waits before leaving again: the middle of the house.
    pub fn house_center(&self) -> IVec2 {
        self.house[1]
    }
}

/// The main map structure containing the game board and its pellet bookkeeping.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Map {
    width: i32,
    height: i32,
    tiles: Vec<MapTile>,
    /// The layout as first parsed, used to regenerate the maze on level clear.
    pristine: Vec<MapTile>,
    dots_remaining: u32,
    total_dots: u32,
    /// A mapping of the starting positions of the entities.
    pub start_positions: StartPositions,
}

impl Map {
    /// Creates a new `Map` instance from a raw board layout.
    pub fn new(raw_board: &[&str]) -> Result<Map, ParseError> {
        let parsed = MapTileParser::parse_board(raw_board)?;
        let total_dots = parsed.tiles.iter().filter(|tile| tile.is_edible()).count() as u32;

        debug!(
            width = parsed.width,
            height = parsed.height,
            total_dots,
            "Map parsed"
        );

        Ok(Map {
            width: parsed.width,
            height: parsed.height,
            pristine: parsed.tiles.clone(),
            tiles: parsed.tiles,
            dots_remaining: total_dots,
            total_dots,
            start_positions: StartPositions {
                pacman: parsed.pacman_start,
                house_exit: parsed.house_exit,
                house_door: parsed.house_door,
                house: parsed.ghost_starts,
            },
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Pellets and power pellets left on the board.
    pub fn dots_remaining(&self) -> u32 {
        self.dots_remaining
    }

    /// Pellets and power pellets the board started with.
    pub fn total_dots(&self) -> u32 {
        self.total_dots
    }

    fn index(&self, position: IVec2) -> Option<usize> {
        if position.x < 0 || position.y < 0 || position.x >= self.width || position.y >= self.height {
            return None;
        }
        Some((position.y * self.width + position.x) as usize)
    }

    /// The tile at `position`, or `None` outside the board.
    pub fn tile(&self, position: IVec2) -> Option<MapTile> {
        self.index(position).map(|i| self.tiles[i])
    }

    /// Iterates over every tile along with its grid position, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (IVec2::new(i as i32 % width, i as i32 / width), *tile))
    }

    /// Whether `traversal` may stand on `position`.
    pub fn is_passable(&self, position: IVec2, traversal: Traversal) -> bool {
        match self.tile(position) {
            None | Some(MapTile::Wall) => false,
            Some(MapTile::Door) => traversal == Traversal::LeavingHouse,
            Some(_) => true,
        }
    }

    /// The neighbouring tile in `direction`, wrapping horizontally. Vertical edges are closed.
    pub fn neighbor(&self, position: IVec2, direction: Direction) -> Option<IVec2> {
        let next = position + direction.as_ivec2();
        if next.y < 0 || next.y >= self.height {
            return None;
        }
        Some(IVec2::new(next.x.rem_euclid(self.width), next.y))
    }

    /// The tile reached by stepping once in `direction`, if `traversal` may enter it.
    pub fn step(&self, position: IVec2, direction: Direction, traversal: Traversal) -> Option<IVec2> {
        self.neighbor(position, direction)
            .filter(|next| self.is_passable(*next, traversal))
    }

    pub fn is_tunnel(&self, position: IVec2) -> bool {
        self.tile(position) == Some(MapTile::Tunnel)
    }

    /// Removes the pellet at `position`, returning what was eaten.
    ///
    /// Each pellet can be consumed exactly once; afterwards the tile is empty.
    pub fn consume(&mut self, position: IVec2) -> Option<MapTile> {
        let index = self.index(position)?;
        let tile = self.tiles[index];
        if !tile.is_edible() {
            return None;
        }

        self.tiles[index] = MapTile::Empty;
        self.dots_remaining -= 1;
        Some(tile)
    }

    /// Restores every pellet, as at the start of a level.
    pub fn regenerate(&mut self) {
        self.tiles.clone_from(&self.pristine);
        self.dots_remaining = self.total_dots;
    }

    /// The horizontal distance between two columns, taking the tunnel into account.
    pub fn wrapped_dx(&self, a: f32, b: f32) -> f32 {
        let dx = (a - b).abs();
        dx.min(self.width as f32 - dx)
    }
}
