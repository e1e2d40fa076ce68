use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    resource::Resource,
    system::{Query, Res, ResMut, RunSystemOnce},
    world::World,
};
use tracing::{debug, info};

use crate::{
    constants::MapTile,
    error::GameError,
    map::{builder::Map, direction::Direction},
    systems::{
        collision::{hits_wall, WallQuery},
        components::{
            Collider, EntityType, GameRng, Ghost, GhostBundle, Pellet, PelletBundle, PlayerBundle, PlayerControlled,
            Position, Renderable, ScanOrder, SpawnPoint, Sprite, SpriteTag, Velocity, Wall, WallBundle,
        },
        ghost::scan_ordered,
        movement::try_set_direction,
    },
};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Running,
    /// The player ran out of lives. Ticks do nothing until the next input restarts the session.
    GameOver,
}

/// Lives the player has left.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy)]
pub struct PlayerLives(pub u8);

/// Run condition for every gameplay system.
pub fn is_running(stage: Res<GameStage>) -> bool {
    *stage == GameStage::Running
}

/// The player, as seen by systems that move it back to its spawn.
#[allow(clippy::type_complexity)]
pub type PlayerSpawnQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Position, &'static mut Velocity, &'static Collider, &'static SpawnPoint),
    (With<PlayerControlled>, Without<Ghost>, Without<Wall>),
>;

/// Every ghost, as seen by systems that move them back to their spawns.
#[allow(clippy::type_complexity)]
pub type GhostSpawnQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static ScanOrder,
        &'static mut Position,
        &'static mut Velocity,
        &'static Collider,
        &'static SpawnPoint,
    ),
    (With<Ghost>, Without<PlayerControlled>, Without<Wall>),
>;

/// Puts the player and every ghost back on their spawn points.
///
/// The player keeps facing its last direction but stops. Each ghost, in grid-scan order, tries a
/// fresh random direction.
pub fn reset_positions(
    player: &mut PlayerSpawnQuery,
    ghosts: &mut GhostSpawnQuery,
    walls: &WallQuery,
    rng: &mut GameRng,
) -> Result<(), GameError> {
    let (mut position, mut velocity, _, spawn) = player
        .single_mut()
        .map_err(|e| GameError::InvalidState(format!("No/multiple entities queried for position reset: {}", e)))?;
    position.0 = spawn.0;
    velocity.halted = true;

    let blocked = |bounds| hits_wall(bounds, walls);
    let order = scan_ordered(ghosts.iter().map(|(entity, order, ..)| (entity, *order)));
    for entity in order {
        let Ok((_, _, mut position, mut velocity, collider, spawn)) = ghosts.get_mut(entity) else {
            continue;
        };
        position.0 = spawn.0;
        try_set_direction(&mut position, &mut velocity, collider, rng.direction(), blocked);
    }

    Ok(())
}

pub fn reset_positions_system(
    mut player: PlayerSpawnQuery,
    mut ghosts: GhostSpawnQuery,
    walls: WallQuery,
    mut rng: ResMut<GameRng>,
    mut errors: EventWriter<GameError>,
) {
    if let Err(e) = reset_positions(&mut player, &mut ghosts, &walls, &mut rng) {
        errors.write(e);
    }
}

/// Handles contact between the player and the ghosts.
///
/// Any overlap costs a life. The last life ends the session; otherwise everyone returns to their
/// spawn and play continues with the score intact.
pub fn ghost_collision_system(
    mut stage: ResMut<GameStage>,
    mut lives: ResMut<PlayerLives>,
    mut rng: ResMut<GameRng>,
    mut player: PlayerSpawnQuery,
    mut ghosts: GhostSpawnQuery,
    walls: WallQuery,
    mut errors: EventWriter<GameError>,
) {
    let player_bounds = match player.single() {
        Ok((position, _, collider, _)) => collider.bounds(position),
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for ghost collision system: {}",
                e
            )));
            return;
        }
    };

    let caught_by = ghosts
        .iter()
        .filter(|(.., position, _, collider, _)| collider.bounds(position).overlaps(&player_bounds))
        .min_by_key(|(_, order, ..)| **order)
        .map(|(entity, ..)| entity);
    let Some(ghost) = caught_by else {
        return;
    };

    lives.0 = lives.0.saturating_sub(1);
    if lives.0 == 0 {
        *stage = GameStage::GameOver;
        info!(ghost = ?ghost, "Player caught on last life, game over");
        return;
    }

    debug!(ghost = ?ghost, lives = lives.0, "Player caught, resetting positions");
    if let Err(e) = reset_positions(&mut player, &mut ghosts, &walls, &mut rng) {
        errors.write(e);
    }
}

/// Despawns every board entity and spawns a fresh set from the [`Map`] resource, then resets
/// positions so the ghosts start moving.
pub fn load_level(world: &mut World) {
    let stale: Vec<Entity> = world.query_filtered::<Entity, With<EntityType>>().iter(world).collect();
    for entity in stale {
        world.despawn(entity);
    }

    let Some(map) = world.get_resource::<Map>().cloned() else {
        world.send_event(GameError::InvalidState("No map loaded".to_string()));
        return;
    };

    let tile = map.tile_size() as i32;
    let step = map.step();
    let width = map.tiles().size().x;
    let (mut walls, mut pellets, mut ghosts) = (0usize, 0usize, 0usize);

    for (cell, kind) in map.tiles().iter() {
        let scan_order = ScanOrder(cell.y * width + cell.x);
        let origin = map.to_pixel(cell);

        match kind {
            MapTile::Empty => {}
            MapTile::Wall => {
                world.spawn(WallBundle {
                    wall: Wall,
                    position: Position(origin),
                    spawn_point: SpawnPoint(origin),
                    collider: Collider::square(tile),
                    sprite: Renderable::tagged(SpriteTag::Wall),
                    entity_type: EntityType::Wall,
                    scan_order,
                });
                walls += 1;
            }
            MapTile::Pellet => {
                let origin = map.pellet_pixel(cell);
                world.spawn(PelletBundle {
                    pellet: Pellet,
                    position: Position(origin),
                    spawn_point: SpawnPoint(origin),
                    collider: Collider::square(map.pellet_size()),
                    sprite: Renderable { sprite: Sprite::Square },
                    entity_type: EntityType::Pellet,
                    scan_order,
                });
                pellets += 1;
            }
            MapTile::PlayerSpawn => {
                world.spawn(PlayerBundle {
                    player: PlayerControlled,
                    position: Position(origin),
                    spawn_point: SpawnPoint(origin),
                    velocity: Velocity::halted(Direction::Right, step),
                    collider: Collider::square(tile),
                    sprite: Renderable::tagged(SpriteTag::Player(Direction::Right)),
                    entity_type: EntityType::Player,
                    scan_order,
                });
            }
            MapTile::EnemySpawn(color) => {
                world.spawn(GhostBundle {
                    ghost: Ghost(color),
                    position: Position(origin),
                    spawn_point: SpawnPoint(origin),
                    velocity: Velocity {
                        direction: Direction::Right,
                        speed: step,
                        halted: false,
                    },
                    collider: Collider::square(tile),
                    sprite: Renderable::tagged(SpriteTag::Ghost(color)),
                    entity_type: EntityType::Ghost,
                    scan_order,
                });
                ghosts += 1;
            }
        }
    }

    debug!(walls, pellets, ghosts, "Level loaded");

    if let Err(e) = world.run_system_once(reset_positions_system) {
        world.send_event(GameError::InvalidState(format!("Position reset failed to run: {}", e)));
    }
}

/// Number of pellets still on the board.
pub fn remaining_pellets(world: &mut World) -> usize {
    world.query_filtered::<Entity, With<Pellet>>().iter(world).count()
}

/// Reloads the board once every pellet has been eaten. Score and lives carry over.
pub fn level_clear_system(world: &mut World) {
    if remaining_pellets(world) > 0 {
        return;
    }

    load_level(world);
    info!(pellets = remaining_pellets(world), "Level cleared, board reloaded");
}

