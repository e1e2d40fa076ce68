use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{In, Query};
use tracing::trace;

use crate::error::GameError;
use crate::map::direction::Direction;
use crate::systems::collision::{hits_wall, Bounds, WallQuery};
use crate::systems::components::{Collider, PlayerControlled, Position, Renderable, SpriteTag, Velocity, Wall};

/// Attempts to turn an entity towards `direction`.
///
/// The new velocity is applied speculatively and the resulting bounds are tested with `blocked`.
/// If they are blocked, position, direction and the halted flag all revert and nothing changes.
/// Otherwise the displacement stays applied and the entity starts moving in the new direction.
///
/// Returns whether the change was committed.
pub fn try_set_direction(
    position: &mut Position,
    velocity: &mut Velocity,
    collider: &Collider,
    direction: Direction,
    blocked: impl Fn(Bounds) -> bool,
) -> bool {
    let previous = (*position, *velocity);

    velocity.direction = direction;
    velocity.halted = false;
    position.0 += velocity.delta();

    if blocked(collider.bounds(position)) {
        (*position, *velocity) = previous;
        return false;
    }

    true
}

/// Moves an entity one tick along its velocity, undoing the move if the new bounds are blocked.
///
/// Returns whether the move stood.
pub fn advance(position: &mut Position, velocity: &Velocity, collider: &Collider, blocked: impl Fn(Bounds) -> bool) -> bool {
    let delta = velocity.delta();
    position.0 += delta;

    if blocked(collider.bounds(position)) {
        position.0 -= delta;
        return false;
    }

    true
}

/// Advances the player along its current direction. The player stops against walls without
/// changing direction.
pub fn player_movement_system(
    walls: WallQuery,
    mut players: Query<(&mut Position, &Velocity, &Collider), (With<PlayerControlled>, Without<Wall>)>,
    mut errors: EventWriter<GameError>,
) {
    let (mut position, velocity, collider) = match players.single_mut() {
        Ok(player) => player,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player movement system: {}",
                e
            )));
            return;
        }
    };

    if !advance(&mut position, velocity, collider, |bounds| hits_wall(bounds, &walls)) {
        trace!(position = ?position.0, direction = velocity.direction.as_ref(), "Player blocked by wall");
    }
}

/// Applies a requested direction to the player, committing it only if the player can move that way.
///
/// The player's sprite follows the last committed direction. Returns whether the change stood.
pub fn player_direction_system(
    In(direction): In<Direction>,
    walls: WallQuery,
    mut players: Query<(&mut Position, &mut Velocity, &Collider, &mut Renderable), (With<PlayerControlled>, Without<Wall>)>,
    mut errors: EventWriter<GameError>,
) -> bool {
    let (mut position, mut velocity, collider, mut renderable) = match players.single_mut() {
        Ok(player) => player,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player direction system: {}",
                e
            )));
            return false;
        }
    };

    let committed = try_set_direction(&mut position, &mut velocity, collider, direction, |bounds| {
        hits_wall(bounds, &walls)
    });

    if committed {
        *renderable = Renderable::tagged(SpriteTag::Player(direction));
    }
    trace!(direction = direction.as_ref(), committed, "Player direction requested");

    committed
}
