use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::With,
    system::{Commands, Query, Res, ResMut},
};
use tracing::trace;

use crate::{
    error::GameError,
    systems::components::{Collider, Pellet, PelletValue, PlayerControlled, Position, ScanOrder, ScoreResource},
};

/// Eats at most one pellet per tick: the first one in grid-scan order that the player overlaps.
pub fn pellet_system(
    mut commands: Commands,
    value: Res<PelletValue>,
    mut score: ResMut<ScoreResource>,
    player: Query<(&Position, &Collider), With<PlayerControlled>>,
    pellets: Query<(Entity, &ScanOrder, &Position, &Collider), With<Pellet>>,
    mut errors: EventWriter<GameError>,
) {
    let player_bounds = match player.single() {
        Ok((position, collider)) => collider.bounds(position),
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for pellet system: {}",
                e
            )));
            return;
        }
    };

    let eaten = pellets
        .iter()
        .filter(|(_, _, position, collider)| collider.bounds(position).overlaps(&player_bounds))
        .min_by_key(|(_, order, ..)| **order);

    if let Some((entity, order, position, _)) = eaten {
        commands.entity(entity).despawn();
        score.0 += value.0;
        trace!(pellet = order.0, position = ?position.0, score = score.0, "Pellet eaten");
    }
}
