use bevy_ecs::query::With;
use glam::IVec2;
use maze_chase::config::GameConfig;
use maze_chase::constants::RAW_BOARD;
use maze_chase::error::ParseError;
use maze_chase::map::builder::Map;
use maze_chase::map::direction::Direction;
use maze_chase::systems::components::{
    Collider, EntityType, Ghost, Pellet, PlayerControlled, Position, Renderable, Sprite, SpriteTag, Velocity, Wall,
};
use speculoos::prelude::*;

mod common;

#[test]
fn test_player_spawns_at_tile_pixel() {
    let mut world = common::create_test_world(&["X P X"], &common::test_config());

    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(64, 0));
}

#[test]
fn test_spawned_entity_counts() {
    let mut world = common::create_test_world(&RAW_BOARD, &GameConfig::default().with_seed(1));

    let walls = world.query_filtered::<(), With<Wall>>().iter(&world).count();
    let pellets = world.query_filtered::<(), With<Pellet>>().iter(&world).count();
    let ghosts = world.query_filtered::<(), With<Ghost>>().iter(&world).count();
    let players = world.query_filtered::<(), With<PlayerControlled>>().iter(&world).count();
    let typed = world.query::<&EntityType>().iter(&world).count();

    let map = Map::with_config(&RAW_BOARD, &GameConfig::default()).unwrap();
    assert_that(&pellets).is_equal_to(map.tiles().pellet_count());
    assert_that(&ghosts).is_equal_to(4);
    assert_that(&players).is_equal_to(1);
    assert_that(&typed).is_equal_to(walls + pellets + ghosts + players);
}

#[test]
fn test_pellet_geometry() {
    let mut world = common::create_test_world(&common::CORRIDOR, &common::test_config());

    let mut pellets: Vec<(IVec2, IVec2, Sprite)> = world
        .query_filtered::<(&Position, &Collider, &Renderable), With<Pellet>>()
        .iter(&world)
        .map(|(position, collider, renderable)| (position.0, collider.size, renderable.sprite))
        .collect();
    pellets.sort_by_key(|(position, ..)| position.x);

    assert_that(&pellets).is_equal_to(vec![
        (IVec2::new(46, 46), IVec2::splat(4), Sprite::Square),
        (IVec2::new(110, 46), IVec2::splat(4), Sprite::Square),
    ]);
}

#[test]
fn test_player_starts_facing_right_and_halted() {
    let mut world = common::create_test_world(&common::CORRIDOR, &common::test_config());

    let velocity = common::player_velocity(&mut world);
    assert_that(&velocity).is_equal_to(Velocity::halted(Direction::Right, 8));

    let sprite = world
        .query_filtered::<&Renderable, With<PlayerControlled>>()
        .single(&world)
        .unwrap()
        .sprite;
    assert_that(&sprite).is_equal_to(Sprite::Tagged(SpriteTag::Player(Direction::Right)));
}

#[test]
fn test_reload_replaces_entities() {
    let config = common::test_config();
    let mut world = common::create_test_world(&common::CORRIDOR, &config);
    let before = world.query::<&EntityType>().iter(&world).count();

    maze_chase::systems::state::load_level(&mut world);
    maze_chase::systems::state::load_level(&mut world);

    let after = world.query::<&EntityType>().iter(&world).count();
    assert_that(&after).is_equal_to(before);
}

#[test]
fn test_larger_tiles_scale_geometry() {
    let map = Map::new(&common::CORRIDOR, 64, None).unwrap();

    assert_that(&map.step()).is_equal_to(16);
    assert_that(&map.pellet_size()).is_equal_to(8);
    assert_that(&map.pellet_pixel(glam::UVec2::new(1, 1))).is_equal_to(IVec2::new(92, 92));
    assert_that(&map.pixel_size()).is_equal_to(IVec2::new(320, 192));
}

#[test]
fn test_invalid_geometry_is_rejected() {
    assert_that(&Map::new(&common::CORRIDOR, 20, None).unwrap_err()).is_equal_to(ParseError::InvalidTileSize(20));
    assert_that(&Map::new(&common::CORRIDOR, 32, Some(3)).unwrap_err())
        .is_equal_to(ParseError::ExitRowOutOfBounds { row: 3, height: 3 });
}
