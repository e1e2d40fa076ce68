use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::IVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::GhostColor;
use crate::map::direction::Direction;
use crate::systems::collision::Bounds;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// A tag component for enemies, carrying the identity given by their spawn marker.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ghost(pub GhostColor);

/// A tag component for wall segments.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct Wall;

/// A tag component for pellets.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct Pellet;

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Ghost,
    Wall,
    Pellet,
}

impl EntityType {
    /// Whether entities of this type ever move.
    pub fn is_mobile(&self) -> bool {
        matches!(self, EntityType::Player | EntityType::Ghost)
    }
}

/// Top-left corner of an entity, in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position(pub IVec2);

/// Where an entity was placed when the board was loaded. Never changes afterwards.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPoint(pub IVec2);

/// Index of the tile an entity was spawned from, in grid-scan order.
///
/// Used wherever several entities could match at once and the first one wins.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanOrder(pub u32);

/// The axis-aligned box an entity occupies, relative to its position.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub size: IVec2,
}

impl Collider {
    pub fn square(side: i32) -> Self {
        Self { size: IVec2::splat(side) }
    }

    /// The bounds this collider covers when its entity is at `position`.
    pub fn bounds(&self, position: &Position) -> Bounds {
        Bounds {
            position: position.0,
            size: self.size,
        }
    }
}

/// Facing direction and per-tick displacement of a moving entity.
///
/// The displacement is always derived from the direction; a halted entity keeps facing its
/// direction but does not move until a direction change is committed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Velocity {
    pub direction: Direction,
    /// Pixels travelled per tick.
    pub speed: i32,
    pub halted: bool,
}

impl Velocity {
    pub fn halted(direction: Direction, speed: i32) -> Self {
        Self {
            direction,
            speed,
            halted: true,
        }
    }

    /// The displacement applied by one tick of movement.
    pub fn delta(&self) -> IVec2 {
        if self.halted {
            IVec2::ZERO
        } else {
            self.direction.as_ivec2() * self.speed
        }
    }
}

/// Identifies which artwork a renderer should use for a tagged sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteTag {
    Wall,
    Player(Direction),
    Ghost(GhostColor),
}

/// How an entity is drawn, resolved once when the entity is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Tagged(SpriteTag),
    /// A plain filled square covering the entity's bounds.
    Square,
}

/// A component for entities that are drawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    pub sprite: Sprite,
}

impl Renderable {
    pub fn tagged(tag: SpriteTag) -> Self {
        Self {
            sprite: Sprite::Tagged(tag),
        }
    }
}

#[derive(Bundle)]
pub struct WallBundle {
    pub wall: Wall,
    pub position: Position,
    pub spawn_point: SpawnPoint,
    pub collider: Collider,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub scan_order: ScanOrder,
}

#[derive(Bundle)]
pub struct PelletBundle {
    pub pellet: Pellet,
    pub position: Position,
    pub spawn_point: SpawnPoint,
    pub collider: Collider,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub scan_order: ScanOrder,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub spawn_point: SpawnPoint,
    pub velocity: Velocity,
    pub collider: Collider,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub scan_order: ScanOrder,
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub position: Position,
    pub spawn_point: SpawnPoint,
    pub velocity: Velocity,
    pub collider: Collider,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub scan_order: ScanOrder,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// Points awarded for each pellet eaten.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PelletValue(pub u32);

/// The session's random source, used for enemy direction changes.
#[derive(Resource, Debug)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// A generator seeded from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self(SmallRng::from_rng(&mut rand::rng()))
    }

    /// Picks one of the four directions uniformly, reversal included.
    pub fn direction(&mut self) -> Direction {
        Direction::DIRECTIONS[self.0.random_range(0..Direction::DIRECTIONS.len())]
    }
}
