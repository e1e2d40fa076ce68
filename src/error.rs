//! Centralized error types for the game.
//!
//! Only the board blueprint can be malformed; everything that happens inside a tick is total.
//! Systems that observe an inconsistent world report it as [`GameError::InvalidState`] through
//! the world's `Events<GameError>` channel rather than panicking.

use bevy_ecs::event::Event;

/// Main error type for the game.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Structural problems with a board blueprint, raised at load time.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Board has no tiles")]
    EmptyBoard,
    #[error("Row {row} has {found} tiles, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Board has no player spawn")]
    MissingPlayerSpawn,
    #[error("Board has a second player spawn at column {col}, row {row}")]
    DuplicatePlayerSpawn { col: usize, row: usize },
    #[error("Board has no pellets")]
    NoPellets,
    #[error("Tile size must be a positive multiple of 8, got {0}")]
    InvalidTileSize(u32),
    #[error("Exit row {row} is outside a board of {height} rows")]
    ExitRowOutOfBounds { row: u32, height: usize },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
