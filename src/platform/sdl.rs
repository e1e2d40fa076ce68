//! Desktop frontend built on SDL2: a window canvas as the [`Renderer`] and the event pump as the
//! [`InputSource`].

use std::collections::HashMap;

use glam::{IVec2, UVec2};
use sdl2::event::Event;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::{EventPump, Sdl};
use tracing::{debug, info};

use crate::constants::GhostColor;
use crate::error::{GameError, GameResult};
use crate::input::{InputEvent, InputSource};
use crate::map::direction::Direction;
use crate::render::Renderer;
use crate::systems::collision::Bounds;
use crate::systems::components::SpriteTag;

const BACKGROUND: Color = Color::RGB(0, 0, 0);
const PELLET: Color = Color::RGB(255, 255, 255);
const TEXT: Color = Color::RGB(255, 255, 255);

fn sprite_color(tag: SpriteTag) -> Color {
    match tag {
        SpriteTag::Wall => Color::RGB(33, 33, 222),
        SpriteTag::Player(_) => Color::RGB(255, 255, 0),
        SpriteTag::Ghost(GhostColor::Blue) => Color::RGB(0, 255, 255),
        SpriteTag::Ghost(GhostColor::Orange) => Color::RGB(255, 184, 82),
        SpriteTag::Ghost(GhostColor::Pink) => Color::RGB(255, 184, 255),
        SpriteTag::Ghost(GhostColor::Red) => Color::RGB(255, 0, 0),
    }
}

fn to_rect(bounds: Bounds) -> Rect {
    Rect::new(
        bounds.position.x,
        bounds.position.y,
        bounds.size.x.max(0) as u32,
        bounds.size.y.max(0) as u32,
    )
}

/// Opens a window of `size` pixels and returns its renderer and input source.
pub fn init(title: &str, size: UVec2) -> GameResult<(SdlRenderer, SdlInput)> {
    let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
    let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;

    let window = video_subsystem
        .window(title, size.x, size.y)
        .position_centered()
        .build()
        .map_err(|e| GameError::Sdl(e.to_string()))?;
    let canvas = window
        .into_canvas()
        .accelerated()
        .build()
        .map_err(|e| GameError::Sdl(e.to_string()))?;
    let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

    info!(width = size.x, height = size.y, "Window opened");

    Ok((
        SdlRenderer { canvas },
        SdlInput {
            _sdl: sdl_context,
            event_pump,
            bindings: Bindings::default(),
        },
    ))
}

/// Draws every sprite as a solid tile in its color, and text with the SDL2_gfx built-in font.
pub struct SdlRenderer {
    canvas: Canvas<Window>,
}

impl Renderer for SdlRenderer {
    fn clear(&mut self) -> GameResult<()> {
        self.canvas.set_draw_color(BACKGROUND);
        self.canvas.clear();
        Ok(())
    }

    fn draw_sprite(&mut self, tag: SpriteTag, rect: Bounds) -> GameResult<()> {
        self.canvas.set_draw_color(sprite_color(tag));
        self.canvas.fill_rect(to_rect(rect)).map_err(GameError::Sdl)
    }

    fn fill_square(&mut self, rect: Bounds) -> GameResult<()> {
        self.canvas.set_draw_color(PELLET);
        self.canvas.fill_rect(to_rect(rect)).map_err(GameError::Sdl)
    }

    fn draw_text(&mut self, text: &str, at: IVec2) -> GameResult<()> {
        self.canvas
            .string(at.x as i16, at.y as i16, text, TEXT)
            .map_err(GameError::Sdl)
    }

    fn present(&mut self) -> GameResult<()> {
        self.canvas.present();
        Ok(())
    }
}

/// Key bindings for player movement. Arrows and WASD both steer.
#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, Direction>,
}

impl Default for Bindings {
    fn default() -> Self {
        let key_bindings = HashMap::from([
            (Keycode::Up, Direction::Up),
            (Keycode::W, Direction::Up),
            (Keycode::Down, Direction::Down),
            (Keycode::S, Direction::Down),
            (Keycode::Left, Direction::Left),
            (Keycode::A, Direction::Left),
            (Keycode::Right, Direction::Right),
            (Keycode::D, Direction::Right),
        ]);
        Self { key_bindings }
    }
}

impl Bindings {
    pub fn direction(&self, key: Keycode) -> Option<Direction> {
        self.key_bindings.get(&key).copied()
    }
}

/// Turns SDL events into input events. Moves fire when a key is released.
pub struct SdlInput {
    _sdl: Sdl,
    event_pump: EventPump,
    bindings: Bindings,
}

impl InputSource for SdlInput {
    fn poll(&mut self) -> Option<InputEvent> {
        while let Some(event) = self.event_pump.poll_event() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return Some(InputEvent::Quit),
                Event::KeyUp { keycode: Some(key), .. } => {
                    let event = match self.bindings.direction(key) {
                        Some(direction) => InputEvent::Move(direction),
                        None => InputEvent::AnyKey,
                    };
                    debug!(key = %key.name(), event = ?event, "Key released");
                    return Some(event);
                }
                _ => {}
            }
        }
        None
    }
}
