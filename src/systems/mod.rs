//! The Entity-Component-System (ECS) module.
//!
//! This module contains the components, resources and systems that make up a game tick.

pub mod collision;
pub mod components;
pub mod ghost;
pub mod item;
pub mod movement;
pub mod state;

pub use self::collision::*;
pub use self::components::*;
pub use self::ghost::*;
pub use self::item::*;
pub use self::movement::*;
pub use self::state::*;
