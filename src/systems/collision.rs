use bevy_ecs::query::With;
use bevy_ecs::system::Query;
use glam::IVec2;

use crate::systems::components::{Collider, Position, Wall};

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Top-left corner.
    pub position: IVec2,
    pub size: IVec2,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    pub fn right(&self) -> i32 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> i32 {
        self.position.y + self.size.y
    }

    /// Whether the two rectangles share any area. Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.position.x < other.right()
            && self.right() > other.position.x
            && self.position.y < other.bottom()
            && self.bottom() > other.position.y
    }
}

/// Axis-aligned overlap test between two rectangles.
pub fn overlaps(a: Bounds, b: Bounds) -> bool {
    a.overlaps(&b)
}

/// Returns true if `bounds` overlaps any of `obstacles`, stopping at the first hit.
pub fn collides_with_any(bounds: Bounds, obstacles: impl IntoIterator<Item = Bounds>) -> bool {
    obstacles.into_iter().any(|obstacle| bounds.overlaps(&obstacle))
}

/// Read-only access to every wall on the board.
pub type WallQuery<'w, 's> = Query<'w, 's, (&'static Position, &'static Collider), With<Wall>>;

/// Returns true if `bounds` overlaps any wall on the board.
pub fn hits_wall(bounds: Bounds, walls: &WallQuery) -> bool {
    collides_with_any(bounds, walls.iter().map(|(position, collider)| collider.bounds(position)))
}
