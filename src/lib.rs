//! Maze-chase arcade game library crate.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod game;
pub mod input;
pub mod map;
pub mod platform;
pub mod render;
pub mod systems;
