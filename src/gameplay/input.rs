//! Keyboard control of the player.

use bevy::prelude::*;
use log::debug;

use super::SimClock;
use crate::components::{Animation, Direction, FlipX, Movement, Position, Velocity};
use crate::map::spawn::spawn_projectile;
use crate::map::SceneRoles;
use crate::physics::Body;
use crate::player::PlayerController;
use crate::PLAYER_JUMP_FORCE;

pub const MOVE_LEFT_KEY: KeyCode = KeyCode::ArrowLeft;
pub const MOVE_RIGHT_KEY: KeyCode = KeyCode::ArrowRight;
pub const JUMP_KEY: KeyCode = KeyCode::KeyZ;
pub const INHALE_KEY: KeyCode = KeyCode::KeyX;

type PlayerRow<'a> = (
    &'a mut PlayerController,
    &'a Position,
    &'a mut Movement,
    &'a mut Velocity,
    &'a mut Body,
    &'a mut FlipX,
    &'a mut Animation,
);

/// Applies held keys, then key presses, then key releases.
///
/// Arrow keys steer while held. The jump key acts on press. The inhale key
/// inhales while held and, on release, either stops inhaling or spits the
/// swallowed enemy out as a star.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn player_input_system(
    mut commands: Commands,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    roles: Option<Res<SceneRoles>>,
    clock: Res<SimClock>,
    mut players: Query<PlayerRow<'_>>,
) {
    let (Some(keys), Some(roles)) = (keys, roles) else {
        return;
    };
    let Ok((mut controller, position, mut movement, mut velocity, mut body, mut flip, mut anim)) =
        players.get_mut(roles.player)
    else {
        return;
    };
    let now = clock.now();

    if keys.pressed(MOVE_LEFT_KEY) {
        movement.x += controller.steer(Direction::Left);
    }
    if keys.pressed(MOVE_RIGHT_KEY) {
        movement.x += controller.steer(Direction::Right);
    }
    if keys.pressed(INHALE_KEY) {
        controller.begin_inhale();
    }

    if keys.just_pressed(JUMP_KEY) && controller.try_jump(body.grounded) {
        body.jump(&mut velocity, PLAYER_JUMP_FORCE);
    }

    if keys.just_released(INHALE_KEY) {
        if let Some(star) = controller.release_inhale(position.0, now) {
            debug!("player spat a star at {:?}", star.position);
            spawn_projectile(&mut commands, star, now);
        }
    }

    flip.0 = controller.flip_x();
    anim.play(controller.animation(), now);
}
