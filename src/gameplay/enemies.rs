//! Enemy behaviour systems.
//!
//! Behaviour machines are advanced once per tick with the shared clock.
//! Their requested motion is added to [`Movement`], so the inhale pull and
//! the enemy's own walk stack within the same frame.

use bevy::prelude::*;
use log::debug;

use super::{GameplayFault, GameplayFaultContext, SimClock};
use crate::behaviour::{Bird, Flame, FlameAction, PatrolGuy};
use crate::components::{FlipX, Movement, Position, Velocity};
use crate::inhale::Inhalable;
use crate::map::SceneRoles;
use crate::physics::Body;
use crate::player::PlayerController;
use crate::presentation::CameraView;

/// Idle for a second, jump, land, repeat.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn flame_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut flames: Query<(Entity, &mut Flame, &mut Body, &mut Velocity)>,
) {
    let now = clock.now();
    for (entity, mut flame, mut body, mut velocity) in &mut flames {
        match flame.tick(now, body.grounded) {
            Ok(FlameAction::Jump(force)) => {
                debug!("flame {entity} jumps");
                body.jump(&mut velocity, force);
            }
            Ok(FlameAction::None) => {}
            Err(e) => commands.trigger(GameplayFault::new(
                GameplayFaultContext::Behaviour,
                format!("flame {entity}: {e}"),
            )),
        }
    }
}

/// Idle once, then pace left and right.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn guy_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut guys: Query<(Entity, &mut PatrolGuy, &mut Movement, &mut FlipX)>,
) {
    let now = clock.now();
    for (entity, mut guy, mut movement, mut flip) in &mut guys {
        match guy.tick(now) {
            Ok(vx) => {
                movement.x += vx;
                flip.0 = guy.flip_x();
            }
            Err(e) => commands.trigger(GameplayFault::new(
                GameplayFaultContext::Behaviour,
                format!("guy {entity}: {e}"),
            )),
        }
    }
}

/// Birds fly left at constant speed, through platforms.
pub fn bird_flight_system(mut birds: Query<(&Bird, &mut Movement)>) {
    for (bird, mut movement) in &mut birds {
        movement.x += bird.velocity();
    }
}

/// Drags inhalable enemies toward an inhaling player.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn inhale_pull_system(
    roles: Option<Res<SceneRoles>>,
    players: Query<&PlayerController>,
    mut enemies: Query<(&Inhalable, &mut Movement)>,
) {
    let Some(source) = roles
        .and_then(|roles| players.get(roles.player).ok())
        .map(PlayerController::inhale_source)
    else {
        return;
    };
    for (inhalable, mut movement) in &mut enemies {
        movement.x += inhalable.pull_velocity(source);
    }
}

/// Removes birds that drifted far outside the camera view.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn bird_cull_system(
    mut commands: Commands,
    view: Res<CameraView>,
    birds: Query<(Entity, &Position), With<Bird>>,
) {
    for (entity, position) in &birds {
        if Bird::is_out_of_range(position.0, view.visible) {
            debug!("bird {entity} left the view");
            commands.entity(entity).try_despawn();
        }
    }
}
