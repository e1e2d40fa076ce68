use bevy_ecs::{entity::Entity, query::With, system::RunSystemOnce};
use glam::IVec2;
use maze_chase::map::direction::Direction;
use maze_chase::systems::components::{PlayerControlled, Renderable, Sprite, SpriteTag, Velocity};
use maze_chase::systems::movement::{player_direction_system, player_movement_system};
use speculoos::prelude::*;

mod common;

fn player_sprite(world: &mut bevy_ecs::world::World) -> Sprite {
    world
        .query_filtered::<&Renderable, With<PlayerControlled>>()
        .single(world)
        .unwrap()
        .sprite
}

#[test]
fn test_direction_change_commits_on_open_tile() {
    let mut world = common::create_test_world(&common::CORNER, &common::test_config());

    let committed = world
        .run_system_once_with(player_direction_system, Direction::Right)
        .expect("System should run successfully");

    assert_that(&committed).is_true();
    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(40, 32));

    let velocity = common::player_velocity(&mut world);
    assert_that(&velocity.direction).is_equal_to(Direction::Right);
    assert_that(&velocity.halted).is_false();
}

#[test]
fn test_blocked_direction_rolls_back() {
    let mut world = common::create_test_world(&common::CORNER, &common::test_config());

    for direction in [Direction::Left, Direction::Up, Direction::Down] {
        let committed = world
            .run_system_once_with(player_direction_system, direction)
            .expect("System should run successfully");

        assert_that(&committed).is_false();
        assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(32, 32));
        assert_that(&common::player_velocity(&mut world)).is_equal_to(Velocity::halted(Direction::Right, 8));
    }
}

#[test]
fn test_sprite_tracks_last_committed_direction() {
    let mut world = common::create_test_world(&common::CORNER, &common::test_config());

    world.run_system_once_with(player_direction_system, Direction::Right).unwrap();
    world.run_system_once_with(player_direction_system, Direction::Up).unwrap();
    assert_that(&player_sprite(&mut world)).is_equal_to(Sprite::Tagged(SpriteTag::Player(Direction::Right)));

    world.run_system_once_with(player_direction_system, Direction::Left).unwrap();
    assert_that(&player_sprite(&mut world)).is_equal_to(Sprite::Tagged(SpriteTag::Player(Direction::Left)));
    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(32, 32));
}

#[test]
fn test_halted_player_does_not_move() {
    let mut world = common::create_test_world(&common::CORNER, &common::test_config());

    world.run_system_once(player_movement_system).unwrap();

    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(32, 32));
}

#[test]
fn test_player_stops_against_wall() {
    let mut world = common::create_test_world(&common::CORNER, &common::test_config());
    world.run_system_once_with(player_direction_system, Direction::Right).unwrap();

    for _ in 0..10 {
        world.run_system_once(player_movement_system).unwrap();
    }

    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(96, 32));
    assert_that(&common::player_velocity(&mut world).direction).is_equal_to(Direction::Right);
}

#[test]
fn test_missing_player_reports_error() {
    let mut world = common::create_test_world(&common::CORNER, &common::test_config());
    let player: Entity = world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(&world)
        .unwrap();
    world.despawn(player);

    world.run_system_once(player_movement_system).unwrap();
    let committed = world.run_system_once_with(player_direction_system, Direction::Right).unwrap();

    assert_that(&committed).is_false();
    assert_that(&common::error_count(&world)).is_equal_to(2);
}
