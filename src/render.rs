//! The rendering boundary: a read-only snapshot of the session and the trait a frontend implements
//! to draw it.

use glam::IVec2;

use crate::error::GameResult;
use crate::systems::collision::Bounds;
use crate::systems::components::{Sprite, SpriteTag};

/// Draw operations a frontend provides.
pub trait Renderer {
    fn clear(&mut self) -> GameResult<()>;

    /// Draws the artwork identified by `tag` over `rect`.
    fn draw_sprite(&mut self, tag: SpriteTag, rect: Bounds) -> GameResult<()>;

    /// Fills `rect` with the pellet color.
    fn fill_square(&mut self, rect: Bounds) -> GameResult<()>;

    /// Draws a line of text with its top-left corner at `at`.
    fn draw_text(&mut self, text: &str, at: IVec2) -> GameResult<()>;

    fn present(&mut self) -> GameResult<()>;
}

/// One drawable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityView {
    pub bounds: Bounds,
    pub sprite: Sprite,
}

/// Everything a frontend needs to draw one frame. Entity lists are in grid-scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub player: Option<EntityView>,
    pub enemies: Vec<EntityView>,
    pub walls: Vec<EntityView>,
    pub pellets: Vec<EntityView>,
    pub score: u32,
    pub lives: u8,
    pub is_game_over: bool,
    /// Edge length of one tile, in pixels.
    pub tile_size: u32,
}

impl RenderSnapshot {
    /// The status line shown in the top-left corner.
    pub fn status_text(&self) -> String {
        if self.is_game_over {
            format!("Game Over! Final Score: {}", self.score)
        } else {
            format!("x{} {}", self.lives, self.score)
        }
    }

    /// Where the status line is drawn: half a tile in from the corner.
    pub fn status_position(&self) -> IVec2 {
        IVec2::splat((self.tile_size / 2) as i32)
    }
}

fn draw_entity<R: Renderer + ?Sized>(renderer: &mut R, view: &EntityView) -> GameResult<()> {
    match view.sprite {
        Sprite::Tagged(tag) => renderer.draw_sprite(tag, view.bounds),
        Sprite::Square => renderer.fill_square(view.bounds),
    }
}

/// Draws a full frame: the player, the enemies, the walls, the pellets, then the status line.
pub fn render_snapshot<R: Renderer + ?Sized>(renderer: &mut R, snapshot: &RenderSnapshot) -> GameResult<()> {
    renderer.clear()?;

    for view in snapshot
        .player
        .iter()
        .chain(&snapshot.enemies)
        .chain(&snapshot.walls)
        .chain(&snapshot.pellets)
    {
        draw_entity(renderer, view)?;
    }

    renderer.draw_text(&snapshot.status_text(), snapshot.status_position())?;
    renderer.present()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(is_game_over: bool) -> RenderSnapshot {
        RenderSnapshot {
            player: None,
            enemies: vec![],
            walls: vec![],
            pellets: vec![],
            score: 120,
            lives: 2,
            is_game_over,
            tile_size: 32,
        }
    }

    #[test]
    fn test_status_text() {
        assert_eq!(snapshot(false).status_text(), "x2 120");
        assert_eq!(snapshot(true).status_text(), "Game Over! Final Score: 120");
    }

    #[test]
    fn test_status_position() {
        assert_eq!(snapshot(false).status_position(), IVec2::new(16, 16));
    }
}
