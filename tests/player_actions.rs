//! Player input, damage, inhaling and shooting through the full schedule.

use approx::assert_relative_eq;
use bevy::prelude::*;
use puffball::behaviour::{Bird, PatrolGuy};
use puffball::components::{Opacity, Position, Projectile, Velocity};
use puffball::inhale::Inhalable;
use puffball::gameplay::{INHALE_KEY, JUMP_KEY, MOVE_LEFT_KEY, MOVE_RIGHT_KEY};
use puffball::{Direction, GRAVITY, PLAYER_JUMP_FORCE, PLAYER_MAX_HEALTH, PLAYER_SPEED};
use rstest::rstest;
use test_utils::{library, GameHarness, MapBuilder, STEP};

fn on_floor(level_1: &MapBuilder) -> GameHarness {
    let level_2 = MapBuilder::floor().spawn("player", 10.0, 84.0);
    GameHarness::new(library(level_1, &level_2))
}

fn player_position(game: &GameHarness) -> Vec2 {
    game.component::<Position>(game.roles().player)
        .expect("player position")
        .0
}

#[rstest]
fn arrows_walk_and_turn_the_player() {
    let mut game = on_floor(&MapBuilder::floor().spawn("player", 50.0, 84.0));
    game.steps(2);
    let start = player_position(&game);

    game.hold(MOVE_LEFT_KEY);
    game.steps(8);
    game.release(MOVE_LEFT_KEY);
    game.step();

    let moved = player_position(&game).x - start.x;
    assert_relative_eq!(moved, -PLAYER_SPEED * STEP * 8.0, epsilon = 1e-3);
    assert_eq!(game.player().direction(), Direction::Left);
    assert!(game.player().flip_x());

    game.hold(MOVE_RIGHT_KEY);
    game.step();
    assert_eq!(game.player().direction(), Direction::Right);
    assert!(!game.player().flip_x());
}

#[rstest]
fn jump_allows_one_more_in_the_air() {
    let mut game = on_floor(&MapBuilder::floor().spawn("player", 10.0, 84.0));
    game.steps(2);
    let per_frame = GRAVITY * STEP;
    let velocity = |game: &GameHarness| {
        game.component::<Velocity>(game.roles().player)
            .expect("player velocity")
            .y
    };

    game.tap(JUMP_KEY);
    assert_relative_eq!(velocity(&game), -PLAYER_JUMP_FORCE + 2.0 * per_frame, epsilon = 1e-3);
    game.steps(4);

    game.tap(JUMP_KEY);
    let second = velocity(&game);
    assert_relative_eq!(second, -PLAYER_JUMP_FORCE + 2.0 * per_frame, epsilon = 1e-3);

    game.tap(JUMP_KEY);
    assert_relative_eq!(velocity(&game), second + 2.0 * per_frame, epsilon = 1e-3);
}

#[rstest]
fn touching_an_enemy_costs_one_health_and_blinks() {
    let mut game = on_floor(
        &MapBuilder::floor()
            .spawn("player", 10.0, 84.0)
            .spawn("guy", 10.0, 84.0),
    );

    game.step();
    let player = game.player();
    assert_eq!(player.health().current, PLAYER_MAX_HEALTH - 1);
    assert!(player.is_blinking());

    game.steps(16);
    let opacity = game
        .component::<Opacity>(game.roles().player)
        .expect("opacity")
        .0;
    assert!(opacity < 1.0, "player should fade while blinking");

    let done = game.step_until(100, |game| !game.player().is_blinking());
    assert!(done, "blink never finished");
    assert_relative_eq!(game.player().opacity(), 1.0);
    assert_eq!(game.player().health().current, PLAYER_MAX_HEALTH - 1);
}

#[rstest]
fn inhaling_pulls_in_and_swallows_an_enemy() {
    let mut game = on_floor(
        &MapBuilder::floor()
            .spawn("player", 10.0, 84.0)
            .spawn("bird", 25.0, 84.0),
    );
    let bird = game.find::<With<Bird>>().expect("bird");
    let effect = game.roles().inhale_effect;

    game.hold(INHALE_KEY);
    game.step();
    assert!(game.player().is_inhaling());
    assert_relative_eq!(game.component::<Opacity>(effect).expect("effect").0, 1.0);

    let swallowed = game.step_until(30, |game| game.player().is_full());

    assert!(swallowed, "bird was never swallowed");
    assert!(!game.exists(bird));
    assert_eq!(game.player().health().current, PLAYER_MAX_HEALTH);
}

#[rstest]
fn releasing_when_full_shoots_a_star_that_kills() {
    let mut game = on_floor(
        &MapBuilder::floor()
            .spawn("player", 10.0, 84.0)
            .spawn("bird", 25.0, 84.0)
            .spawn("guy", 70.0, 84.0),
    );
    let guy = game.find::<With<PatrolGuy>>().expect("guy");
    game.hold(INHALE_KEY);
    assert!(game.step_until(30, |game| game.player().is_full()));

    game.release(INHALE_KEY);
    game.step();
    assert!(!game.player().is_full());
    let star = game.find::<With<Projectile>>().expect("star spawned");
    let star_at = game.component::<Position>(star).expect("star").0;
    assert!(star_at.x > player_position(&game).x);

    let hit = game.step_until(40, |game| !game.exists(guy));

    assert!(hit, "star never reached the guy");
    assert!(!game.exists(star));
    assert_eq!(game.count::<With<Projectile>>(), 0);
}

#[rstest]
fn turning_away_ends_inhalability() {
    let mut game = on_floor(
        &MapBuilder::floor()
            .spawn("player", 10.0, 84.0)
            .spawn("guy", 30.0, 84.0),
    );
    let guy = game.find::<With<PatrolGuy>>().expect("guy");
    let inhalable = |game: &GameHarness| {
        game.component::<Inhalable>(guy)
            .expect("guy is inhalable")
            .is_inhalable()
    };

    game.step();
    assert!(inhalable(&game), "guy should start inside the inhale zone");

    game.hold(MOVE_LEFT_KEY);
    game.step();

    assert_eq!(game.player().direction(), Direction::Left);
    assert!(!inhalable(&game));
}

fn full_player(level: MapBuilder) -> GameHarness {
    let mut game = on_floor(&level.spawn("player", 10.0, 84.0).spawn("bird", 25.0, 84.0));
    game.hold(INHALE_KEY);
    assert!(game.step_until(30, |game| game.player().is_full()));
    game
}

#[rstest]
fn stars_that_miss_expire_off_screen() {
    let mut game = full_player(MapBuilder::floor());
    game.release(INHALE_KEY);
    game.step();
    let star = game.find::<With<Projectile>>().expect("star spawned");

    game.steps(40);
    assert!(game.exists(star), "star should still be in flight");

    let expired = game.step_until(300, |game| !game.exists(star));
    assert!(expired, "star never left the level");
}

#[rstest]
fn stars_break_on_platforms() {
    let mut game = full_player(MapBuilder::floor().platform(60.0, 60.0, 10.0, 40.0));
    game.release(INHALE_KEY);
    game.step();
    let star = game.find::<With<Projectile>>().expect("star spawned");

    let broken = game.step_until(20, |game| !game.exists(star));

    assert!(broken, "star passed through the wall");
    assert_eq!(game.count::<With<Projectile>>(), 0);
}

#[rstest]
fn releasing_empty_stops_inhaling() {
    let mut game = on_floor(&MapBuilder::floor().spawn("player", 10.0, 84.0));
    let effect = game.roles().inhale_effect;
    game.hold(INHALE_KEY);
    game.steps(3);
    game.release(INHALE_KEY);
    game.step();

    assert!(!game.player().is_inhaling());
    assert_eq!(game.count::<With<Projectile>>(), 0);
    assert_relative_eq!(game.component::<Opacity>(effect).expect("effect").0, 0.0);
}
