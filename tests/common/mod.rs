#![allow(dead_code)]

use bevy_ecs::{
    event::Events,
    query::With,
    world::World,
};
use glam::IVec2;
use maze_chase::{
    config::GameConfig,
    error::{GameError, GameResult},
    game::Game,
    map::{builder::Map, direction::Direction},
    render::Renderer,
    systems::{
        collision::Bounds,
        components::{
            GameRng, Ghost, PelletValue, PlayerControlled, Position, ScoreResource, SpriteTag, Velocity,
        },
        state::{load_level, GameStage, PlayerLives},
    },
};

/// A one-row corridor: the player in the middle, a pellet on each side.
pub const CORRIDOR: [&str; 3] = ["XXXXX", "X P X", "XXXXX"];

/// The player in a corner with open tiles to the right.
pub const CORNER: [&str; 3] = ["XXXXX", "XP  X", "XXXXX"];

/// Three pellets to the left of the player.
pub const PELLET_ROW: [&str; 3] = ["XXXXXX", "X   PX", "XXXXXX"];

/// A corridor shared with one ghost.
pub const HAUNTED: [&str; 3] = ["XXXXXXX", "X P  rX", "XXXXXXX"];

/// An open room with a ghost on row 2.
pub const ROOM: [&str; 5] = ["XXXXXXX", "X     X", "X  r  X", "X P   X", "XXXXXXX"];

pub const TEST_SEED: u64 = 0x5EED;

/// Default geometry, a fixed seed and no enclosure exit row.
pub fn test_config() -> GameConfig {
    GameConfig {
        exit_row: None,
        ..GameConfig::default().with_seed(TEST_SEED)
    }
}

pub fn new_game(board: &[&str]) -> Game {
    Game::new(board, test_config()).expect("test board should load")
}

/// A world holding the same resources a [`Game`] sets up, with the level loaded.
pub fn create_test_world(board: &[&str], config: &GameConfig) -> World {
    let mut world = World::default();
    world.init_resource::<Events<GameError>>();
    world.insert_resource(Map::with_config(board, config).expect("test board should load"));
    world.insert_resource(GameStage::Running);
    world.insert_resource(ScoreResource::default());
    world.insert_resource(PlayerLives(config.starting_lives));
    world.insert_resource(PelletValue(config.pellet_score));
    world.insert_resource(GameRng::seeded(config.seed.unwrap_or(TEST_SEED)));
    load_level(&mut world);
    world
}

pub fn player_position(world: &mut World) -> IVec2 {
    world
        .query_filtered::<&Position, With<PlayerControlled>>()
        .single(world)
        .expect("exactly one player")
        .0
}

pub fn player_velocity(world: &mut World) -> Velocity {
    *world
        .query_filtered::<&Velocity, With<PlayerControlled>>()
        .single(world)
        .expect("exactly one player")
}

pub fn set_player_position(world: &mut World, position: IVec2) {
    let mut query = world.query_filtered::<&mut Position, With<PlayerControlled>>();
    query.single_mut(world).expect("exactly one player").0 = position;
}

pub fn ghost_positions(world: &mut World) -> Vec<IVec2> {
    world
        .query_filtered::<&Position, With<Ghost>>()
        .iter(world)
        .map(|position| position.0)
        .collect()
}

/// Places every ghost at `position`, moving in `direction`.
pub fn place_ghosts(world: &mut World, position: IVec2, direction: Direction) {
    let mut query = world.query_filtered::<(&mut Position, &mut Velocity), With<Ghost>>();
    for (mut ghost_position, mut velocity) in query.iter_mut(world) {
        ghost_position.0 = position;
        velocity.direction = direction;
        velocity.halted = false;
    }
}

/// Puts every ghost on top of the player.
pub fn catch_player(world: &mut World) {
    let player = player_position(world);
    place_ghosts(world, player, Direction::Left);
}

pub fn error_count(world: &World) -> usize {
    world.resource::<Events<GameError>>().len()
}

/// One call made on a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear,
    Sprite(SpriteTag, Bounds),
    Square(Bounds),
    Text(String, IVec2),
    Present,
}

/// A renderer that remembers every call it receives.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn frames(&self) -> usize {
        self.calls.iter().filter(|call| **call == DrawCall::Present).count()
    }

    /// The most recent status line drawn.
    pub fn last_text(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            DrawCall::Text(text, _) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) -> GameResult<()> {
        self.calls.push(DrawCall::Clear);
        Ok(())
    }

    fn draw_sprite(&mut self, tag: SpriteTag, rect: Bounds) -> GameResult<()> {
        self.calls.push(DrawCall::Sprite(tag, rect));
        Ok(())
    }

    fn fill_square(&mut self, rect: Bounds) -> GameResult<()> {
        self.calls.push(DrawCall::Square(rect));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: IVec2) -> GameResult<()> {
        self.calls.push(DrawCall::Text(text.to_string(), at));
        Ok(())
    }

    fn present(&mut self) -> GameResult<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}
