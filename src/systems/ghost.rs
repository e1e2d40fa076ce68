use bevy_ecs::entity::Entity;
use bevy_ecs::query::Without;
use bevy_ecs::system::{Query, Res, ResMut};
use smallvec::SmallVec;
use tracing::trace;

use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::systems::collision::{hits_wall, Bounds, WallQuery};
use crate::systems::components::{Collider, GameRng, Ghost, Position, ScanOrder, Velocity, Wall};
use crate::systems::movement::try_set_direction;

/// Ghosts in grid-scan order. Boards rarely hold more than a handful.
pub(crate) fn scan_ordered<I>(entities: I) -> SmallVec<[Entity; 4]>
where
    I: IntoIterator<Item = (Entity, ScanOrder)>,
{
    let mut ordered: SmallVec<[(Entity, ScanOrder); 4]> = entities.into_iter().collect();
    ordered.sort_by_key(|(_, order)| *order);
    ordered.into_iter().map(|(entity, _)| entity).collect()
}

/// Whether a ghost's bounds touch or cross either side of the board.
fn at_board_edge(bounds: Bounds, board_width: i32) -> bool {
    bounds.position.x <= 0 || bounds.right() >= board_width
}

/// Random-walk movement for every ghost.
///
/// Each ghost, in grid-scan order:
/// 1. On the enclosure exit row while moving horizontally, tries to turn upward.
/// 2. Advances one step.
/// 3. If that overlaps a wall or reaches a side of the board, steps back and tries a random direction.
///
/// A direction change is refused by the same rules, so a ghost never ends a tick inside a wall or
/// on a side of the board.
pub fn ghost_movement_system(
    map: Res<Map>,
    mut rng: ResMut<GameRng>,
    walls: WallQuery,
    mut ghosts: Query<(Entity, &ScanOrder, &Ghost, &mut Position, &mut Velocity, &Collider), Without<Wall>>,
) {
    let board_width = map.pixel_size().x;
    let exit_y = map.exit_row_y();
    let blocked = |bounds: Bounds| hits_wall(bounds, &walls) || at_board_edge(bounds, board_width);

    let order = scan_ordered(ghosts.iter().map(|(entity, order, ..)| (entity, *order)));
    for entity in order {
        let Ok((_, _, ghost, mut position, mut velocity, collider)) = ghosts.get_mut(entity) else {
            continue;
        };

        if exit_y == Some(position.0.y) && velocity.direction.is_horizontal() {
            try_set_direction(&mut position, &mut velocity, collider, Direction::Up, blocked);
        }

        let delta = velocity.delta();
        position.0 += delta;

        if blocked(collider.bounds(&position)) {
            position.0 -= delta;

            let direction = rng.direction();
            let committed = try_set_direction(&mut position, &mut velocity, collider, direction, blocked);
            trace!(
                ghost = %ghost.0,
                position = ?position.0,
                direction = direction.as_ref(),
                committed,
                "Ghost redirected"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_edges() {
        assert!(at_board_edge(Bounds::new(0, 32, 32, 32), 608));
        assert!(at_board_edge(Bounds::new(576, 32, 32, 32), 608));
        assert!(!at_board_edge(Bounds::new(8, 32, 32, 32), 608));
        assert!(!at_board_edge(Bounds::new(568, 32, 32, 32), 608));
    }

    #[test]
    fn test_scan_ordered() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let c = Entity::from_raw(3);

        let ordered = scan_ordered([(a, ScanOrder(40)), (b, ScanOrder(3)), (c, ScanOrder(17))]);
        assert_eq!(ordered.as_slice(), &[b, c, a]);
    }
}
