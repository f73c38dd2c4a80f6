//! Map parsing functionality for converting raw board layouts into structured data.

use crate::constants::MapTile;
use crate::error::ParseError;
use glam::IVec2;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMap {
    /// Board width, in tiles.
    pub width: i32,
    /// Board height, in tiles.
    pub height: i32,
    /// Tiles in row-major order.
    pub tiles: Vec<MapTile>,
    /// Pac-Man's starting position.
    pub pacman_start: IVec2,
    /// The tile just outside the house door; Blinky starts here.
    pub house_exit: IVec2,
    /// The single house door tile.
    pub house_door: IVec2,
    /// The in-house ghost starts, in reading order.
    pub ghost_starts: [IVec2; 3],
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// Marker characters (`X`, `B`, `G`) stand on empty floor.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            'o' => Ok(MapTile::PowerPellet),
            ' ' | 'X' | 'B' | 'G' => Ok(MapTile::Empty),
            'T' => Ok(MapTile::Tunnel),
            '=' => Ok(MapTile::Door),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty or ragged, contains unknown characters,
    /// or lacks exactly one Pac-Man start, one house exit, one door and three ghost starts.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = raw_board.first().map(|row| row.chars().count()).ok_or(ParseError::EmptyBoard)?;
        if width == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let mut tiles = Vec::with_capacity(width * raw_board.len());
        let mut pacman_start = None;
        let mut house_exit = None;
        let mut doors = Vec::new();
        let mut ghost_starts = Vec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                let position = IVec2::new(x as i32, y as i32);

                // Track special positions
                match character {
                    'X' => pacman_start = Some(position),
                    'B' => house_exit = Some(position),
                    'G' => ghost_starts.push(position),
                    '=' => doors.push(position),
                    _ => {}
                }

                tiles.push(tile);
            }
        }

        let pacman_start = pacman_start.ok_or(ParseError::MissingPacmanStart)?;
        let house_exit = house_exit.ok_or(ParseError::MissingHouseExit)?;
        if doors.len() != 1 {
            return Err(ParseError::InvalidHouseDoorCount(doors.len()));
        }
        let ghost_starts: [IVec2; 3] = ghost_starts
            .as_slice()
            .try_into()
            .map_err(|_| ParseError::InvalidGhostStartCount(ghost_starts.len()))?;

        Ok(ParsedMap {
            width: width as i32,
            height: raw_board.len() as i32,
            tiles,
            pacman_start,
            house_exit,
            house_door: doors[0],
            ghost_starts,
        })
    }
}
