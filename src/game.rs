//! This module contains the main game logic and state.

use bevy_ecs::event::Events;
use bevy_ecs::query::{QueryFilter, With};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule};
use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use glam::{IVec2, UVec2};
use tracing::{error, info};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::input::InputEvent;
use crate::map::builder::Map;
use crate::render::{EntityView, RenderSnapshot};
use crate::systems::{
    ghost_collision_system, ghost_movement_system, is_running, level_clear_system, load_level, pellet_system,
    player_direction_system, player_movement_system, remaining_pellets, Collider, GameRng, GameStage, Ghost, Pellet,
    PelletValue, PlayerControlled, PlayerLives, Position, Renderable, ScanOrder, ScoreResource, Wall,
};

/// One play session: its own world and the schedule that advances it.
pub struct Game {
    world: World,
    schedule: Schedule,
    config: GameConfig,
}

impl Game {
    /// Parses `raw_board`, spawns the level and prepares the tick schedule.
    ///
    /// # Errors
    ///
    /// Fails if the board or the geometry in `config` is invalid.
    pub fn new<S: AsRef<str>>(raw_board: &[S], config: GameConfig) -> GameResult<Game> {
        let map = Map::with_config(raw_board, &config)?;

        let mut world = World::default();
        world.init_resource::<Events<GameError>>();
        world.insert_resource(map);
        world.insert_resource(GameStage::Running);
        world.insert_resource(ScoreResource::default());
        world.insert_resource(PlayerLives(config.starting_lives));
        world.insert_resource(PelletValue(config.pellet_score));
        world.insert_resource(match config.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::from_entropy(),
        });

        load_level(&mut world);

        // Each system carries its own condition so that a game over raised mid-tick stops the rest.
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                player_movement_system.run_if(is_running),
                ghost_movement_system.run_if(is_running),
                ghost_collision_system.run_if(is_running),
                pellet_system.run_if(is_running),
                level_clear_system.run_if(is_running),
            )
                .chain(),
        );

        let mut game = Game { world, schedule, config };
        game.report_errors();
        let pellets = game.pellet_count();
        info!(
            lives = game.config.starting_lives,
            pellets,
            seed = ?game.config.seed,
            "Game session started"
        );

        Ok(game)
    }

    /// Runs one fixed-period update. Does nothing after a game over.
    pub fn tick(&mut self) {
        formatter::increment_tick();
        self.schedule.run(&mut self.world);
        self.report_errors();
    }

    /// Applies one input event.
    ///
    /// While running, a move request turns the player if the maze allows it. After a game over,
    /// any event other than [`InputEvent::Quit`] restarts the session. Returns whether it did.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if self.is_game_over() {
            if event == InputEvent::Quit {
                return false;
            }
            self.restart();
            return true;
        }

        if let InputEvent::Move(direction) = event {
            if let Err(e) = self.world.run_system_once_with(player_direction_system, direction) {
                error!(error = %e, "Failed to apply player direction");
            }
            self.report_errors();
        }

        false
    }

    /// Reloads the board and resets score, lives and stage.
    pub fn restart(&mut self) {
        load_level(&mut self.world);
        self.world.insert_resource(ScoreResource::default());
        self.world.insert_resource(PlayerLives(self.config.starting_lives));
        self.world.insert_resource(GameStage::Running);
        self.report_errors();
        info!(lives = self.config.starting_lives, "Game restarted");
    }

    pub fn stage(&self) -> GameStage {
        self.world.get_resource::<GameStage>().copied().unwrap_or_default()
    }

    pub fn is_game_over(&self) -> bool {
        self.stage() == GameStage::GameOver
    }

    pub fn score(&self) -> u32 {
        self.world.get_resource::<ScoreResource>().map_or(0, |score| score.0)
    }

    pub fn lives(&self) -> u8 {
        self.world.get_resource::<PlayerLives>().map_or(0, |lives| lives.0)
    }

    pub fn pellet_count(&mut self) -> usize {
        remaining_pellets(&mut self.world)
    }

    /// The size of the board, in pixels.
    pub fn pixel_size(&self) -> UVec2 {
        self.world
            .get_resource::<Map>()
            .map_or(UVec2::ZERO, |map| map.pixel_size().as_uvec2())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The player's top-left pixel, if a player exists.
    pub fn player_position(&mut self) -> Option<IVec2> {
        let mut query = self.world.query_filtered::<&Position, With<PlayerControlled>>();
        query.single(&self.world).ok().map(|position| position.0)
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Captures what a frontend needs to draw the current frame.
    pub fn snapshot(&mut self) -> RenderSnapshot {
        RenderSnapshot {
            player: self.views::<With<PlayerControlled>>().into_iter().next(),
            enemies: self.views::<With<Ghost>>(),
            walls: self.views::<With<Wall>>(),
            pellets: self.views::<With<Pellet>>(),
            score: self.score(),
            lives: self.lives(),
            is_game_over: self.is_game_over(),
            tile_size: self.config.tile_size,
        }
    }

    fn views<F: QueryFilter>(&mut self) -> Vec<EntityView> {
        let mut query = self
            .world
            .query_filtered::<(&ScanOrder, &Position, &Collider, &Renderable), F>();
        let mut views: Vec<(ScanOrder, EntityView)> = query
            .iter(&self.world)
            .map(|(order, position, collider, renderable)| {
                (
                    *order,
                    EntityView {
                        bounds: collider.bounds(position),
                        sprite: renderable.sprite,
                    },
                )
            })
            .collect();
        views.sort_by_key(|(order, _)| *order);
        views.into_iter().map(|(_, view)| view).collect()
    }

    /// Drains errors raised by systems since the last call and logs them.
    fn report_errors(&mut self) {
        let Some(mut events) = self.world.get_resource_mut::<Events<GameError>>() else {
            return;
        };
        for e in events.drain() {
            error!(error = %e, "Game error");
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("stage", &self.stage())
            .field("score", &self.score())
            .field("lives", &self.lives())
            .finish_non_exhaustive()
    }
}

