//! Map parsing functionality for converting raw board layouts into structured data.

use glam::UVec2;
use tracing::warn;

use crate::constants::{GhostColor, MapTile};
use crate::error::ParseError;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMap {
    /// The tile layout, row-major.
    tiles: Vec<MapTile>,
    /// The size of the board, in tiles.
    size: UVec2,
    /// The player's starting tile.
    pub player_start: UVec2,
}

impl ParsedMap {
    /// The size of the board, in tiles.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Returns the tile at the given column and row, if it is on the board.
    pub fn tile(&self, col: u32, row: u32) -> Option<MapTile> {
        if col >= self.size.x || row >= self.size.y {
            return None;
        }
        self.tiles.get((row * self.size.x + col) as usize).copied()
    }

    /// Iterates over every tile in grid-scan order (row by row, left to right).
    pub fn iter(&self) -> impl Iterator<Item = (UVec2, MapTile)> + '_ {
        let width = self.size.x;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, tile)| (UVec2::new(index as u32 % width, index as u32 / width), *tile))
    }

    /// Number of pellet tiles on the board.
    pub fn pellet_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == MapTile::Pellet).count()
    }

    /// Writes the board back out in its textual form.
    pub fn to_raw(&self) -> Vec<String> {
        self.tiles
            .chunks(self.size.x as usize)
            .map(|row| row.iter().map(|tile| MapTileParser::to_character(*tile)).collect())
            .collect()
    }
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// Returns `None` for characters outside the legend.
    pub fn parse_character(c: char) -> Option<MapTile> {
        match c {
            'X' => Some(MapTile::Wall),
            ' ' => Some(MapTile::Pellet),
            'O' => Some(MapTile::Empty),
            'P' => Some(MapTile::PlayerSpawn),
            'b' => Some(MapTile::EnemySpawn(GhostColor::Blue)),
            'o' => Some(MapTile::EnemySpawn(GhostColor::Orange)),
            'p' => Some(MapTile::EnemySpawn(GhostColor::Pink)),
            'r' => Some(MapTile::EnemySpawn(GhostColor::Red)),
            _ => None,
        }
    }

    /// The legend character for a tile.
    pub fn to_character(tile: MapTile) -> char {
        match tile {
            MapTile::Wall => 'X',
            MapTile::Pellet => ' ',
            MapTile::Empty => 'O',
            MapTile::PlayerSpawn => 'P',
            MapTile::EnemySpawn(color) => color.marker(),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// Characters outside the legend become empty tiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty or not rectangular, if it does not hold exactly
    /// one player spawn, or if it holds no pellets.
    pub fn parse_board<S: AsRef<str>>(raw_board: &[S]) -> Result<ParsedMap, ParseError> {
        let width = raw_board.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let mut tiles = Vec::with_capacity(width * raw_board.len());
        let mut player_start: Option<UVec2> = None;

        for (y, line) in raw_board.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character).unwrap_or_else(|| {
                    warn!(character = ?character, col = x, row = y, "Unknown board character, treating as empty");
                    MapTile::Empty
                });

                if tile == MapTile::PlayerSpawn {
                    if player_start.is_some() {
                        return Err(ParseError::DuplicatePlayerSpawn { col: x, row: y });
                    }
                    player_start = Some(UVec2::new(x as u32, y as u32));
                }

                tiles.push(tile);
            }
        }

        let player_start = player_start.ok_or(ParseError::MissingPlayerSpawn)?;
        if !tiles.contains(&MapTile::Pellet) {
            return Err(ParseError::NoPellets);
        }

        Ok(ParsedMap {
            tiles,
            size: UVec2::new(width as u32, raw_board.len() as u32),
            player_start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BOARD_CELL_SIZE, RAW_BOARD};

    #[test]
    fn test_parse_character() {
        assert_eq!(MapTileParser::parse_character('X'), Some(MapTile::Wall));
        assert_eq!(MapTileParser::parse_character(' '), Some(MapTile::Pellet));
        assert_eq!(MapTileParser::parse_character('O'), Some(MapTile::Empty));
        assert_eq!(MapTileParser::parse_character('P'), Some(MapTile::PlayerSpawn));
        assert_eq!(
            MapTileParser::parse_character('r'),
            Some(MapTile::EnemySpawn(GhostColor::Red))
        );
        assert_eq!(MapTileParser::parse_character('#'), None);
    }

    #[test]
    fn test_parse_board() {
        let parsed = MapTileParser::parse_board(&RAW_BOARD).unwrap();

        assert_eq!(parsed.size(), BOARD_CELL_SIZE);
        assert_eq!(parsed.player_start, UVec2::new(9, 15));
        assert_eq!(parsed.tile(0, 0), Some(MapTile::Wall));
        assert_eq!(parsed.tile(9, 8), Some(MapTile::EnemySpawn(GhostColor::Red)));
        assert_eq!(parsed.tile(19, 0), None);
    }

    #[test]
    fn test_iter_is_grid_scan_order() {
        let parsed = MapTileParser::parse_board(&["X P", " OX"]).unwrap();
        let positions: Vec<UVec2> = parsed.iter().map(|(position, _)| position).collect();

        assert_eq!(
            positions,
            vec![
                UVec2::new(0, 0),
                UVec2::new(1, 0),
                UVec2::new(2, 0),
                UVec2::new(0, 1),
                UVec2::new(1, 1),
                UVec2::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_unknown_character_is_empty() {
        let parsed = MapTileParser::parse_board(&["XP #"]).unwrap();
        assert_eq!(parsed.tile(3, 0), Some(MapTile::Empty));
    }
}
