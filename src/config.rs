//! Session configuration.

use std::time::Duration;

use crate::constants::{ENCLOSURE_EXIT_ROW, LOOP_TIME, PELLET_SCORE, STARTING_LIVES, TILE_SIZE};

/// Tunables for a single game session.
///
/// The defaults describe the built-in maze. `exit_row` is map metadata: it only makes sense for
/// a board whose enemy enclosure opens upward from that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Edge length of one tile, in pixels.
    pub tile_size: u32,
    /// Row on which horizontally moving enemies are turned upward. `None` disables the rule.
    pub exit_row: Option<u32>,
    pub starting_lives: u8,
    pub pellet_score: u32,
    /// Delay between the end of one tick and the start of the next.
    pub tick_period: Duration,
    /// Seed for the enemy random walk. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            exit_row: Some(ENCLOSURE_EXIT_ROW),
            starting_lives: STARTING_LIVES,
            pellet_score: PELLET_SCORE,
            tick_period: LOOP_TIME,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Returns a copy of this configuration with a fixed random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
