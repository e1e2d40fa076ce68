//! Map construction and tile-to-pixel geometry.

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2};
use tracing::debug;

use crate::config::GameConfig;
use crate::error::ParseError;
use crate::map::parser::{MapTileParser, ParsedMap};

/// The board the session is played on: the parsed blueprint plus its pixel geometry.
#[derive(Resource, Debug, Clone)]
pub struct Map {
    parsed: ParsedMap,
    tile_size: u32,
    exit_row: Option<u32>,
}

impl Map {
    /// Parses `raw_board` and validates it against the given tile size and exit row.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the blueprint is malformed, the tile size is not a positive
    /// multiple of 8 or is too large for the board's pixel extent to fit an `i32`, or the exit row
    /// lies outside the board.
    pub fn new<S: AsRef<str>>(raw_board: &[S], tile_size: u32, exit_row: Option<u32>) -> Result<Map, ParseError> {
        if tile_size == 0 || tile_size % 8 != 0 {
            return Err(ParseError::InvalidTileSize(tile_size));
        }

        let parsed = MapTileParser::parse_board(raw_board)?;

        // One spare tile on each axis keeps edge and step arithmetic in range.
        let extent = parsed.size().max_element().saturating_add(2);
        let fits = extent
            .checked_mul(tile_size)
            .is_some_and(|pixels| i32::try_from(pixels).is_ok());
        if !fits {
            return Err(ParseError::InvalidTileSize(tile_size));
        }

        if let Some(row) = exit_row {
            if row >= parsed.size().y {
                return Err(ParseError::ExitRowOutOfBounds {
                    row,
                    height: parsed.size().y as usize,
                });
            }
        }

        debug!(
            width = parsed.size().x,
            height = parsed.size().y,
            tile_size,
            pellets = parsed.pellet_count(),
            "Board parsed"
        );

        Ok(Map {
            parsed,
            tile_size,
            exit_row,
        })
    }

    /// Builds a map using the geometry from a session configuration.
    pub fn with_config<S: AsRef<str>>(raw_board: &[S], config: &GameConfig) -> Result<Map, ParseError> {
        Self::new(raw_board, config.tile_size, config.exit_row)
    }

    /// The parsed tile layout.
    pub fn tiles(&self) -> &ParsedMap {
        &self.parsed
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Distance a moving entity covers per tick: a quarter tile.
    pub fn step(&self) -> i32 {
        (self.tile_size / 4) as i32
    }

    /// The top-left pixel of a tile.
    pub fn to_pixel(&self, cell: UVec2) -> IVec2 {
        (cell * self.tile_size).as_ivec2()
    }

    /// The size of the whole board, in pixels.
    pub fn pixel_size(&self) -> IVec2 {
        (self.parsed.size() * self.tile_size).as_ivec2()
    }

    /// The pixel y of the enclosure exit row, if the board has one.
    pub fn exit_row_y(&self) -> Option<i32> {
        self.exit_row.map(|row| (row * self.tile_size) as i32)
    }

    /// The edge length of a pellet square.
    pub fn pellet_size(&self) -> i32 {
        (self.tile_size / 8) as i32
    }

    /// The top-left pixel of the pellet centered in a tile.
    pub fn pellet_pixel(&self, cell: UVec2) -> IVec2 {
        let inset = (self.tile_size as i32 - self.pellet_size()) / 2;
        self.to_pixel(cell) + IVec2::splat(inset)
    }
}
