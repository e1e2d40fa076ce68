//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;
use strum_macros::{Display, EnumIter};

/// The nominal delay between the end of one tick and the start of the next.
pub const LOOP_TIME: Duration = Duration::from_millis(50);

/// The size of each tile, in pixels.
pub const TILE_SIZE: u32 = 32;
/// The size of the game board, in tiles.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(19, 21);
/// The size of the game board, in pixels.
pub const BOARD_PIXEL_SIZE: UVec2 = UVec2::new(BOARD_CELL_SIZE.x * TILE_SIZE, BOARD_CELL_SIZE.y * TILE_SIZE);

/// The row enemies leave their enclosure through; a horizontally moving enemy on this row is turned upward.
pub const ENCLOSURE_EXIT_ROW: u32 = 9;

/// Lives the player starts each game with.
pub const STARTING_LIVES: u8 = 3;
/// Points awarded per pellet.
pub const PELLET_SCORE: u32 = 10;

/// The identity (and color) of an enemy, as given by its spawn marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum GhostColor {
    Blue,
    Orange,
    Pink,
    Red,
}

impl GhostColor {
    /// The board character that spawns this enemy.
    pub fn marker(self) -> char {
        match self {
            GhostColor::Blue => 'b',
            GhostColor::Orange => 'o',
            GhostColor::Pink => 'p',
            GhostColor::Red => 'r',
        }
    }
}

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty tile, without a pellet.
    Empty,
    /// A wall tile.
    Wall,
    /// An open tile holding a pellet.
    Pellet,
    /// The player's starting tile.
    PlayerSpawn,
    /// An enemy's starting tile.
    EnemySpawn(GhostColor),
}

/// The raw layout of the game board, as a 2D array of characters.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "XXXXXXXXXXXXXXXXXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X                 X",
    "X XX X XXXXX X XX X",
    "X    X       X    X",
    "XXXX XXXX XXXX XXXX",
    "OOOX X       X XOOO",
    "XXXX X XXrXX X XXXX",
    "O       bpo       O",
    "XXXX X XXXXX X XXXX",
    "OOOX X       X XOOO",
    "XXXX X XXXXX X XXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X  X     P     X  X",
    "XX X X XXXXX X X XX",
    "X    X   X   X    X",
    "X XXXXXX X XXXXXX X",
    "X                 X",
    "XXXXXXXXXXXXXXXXXXX",
];
