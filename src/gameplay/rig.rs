//! Per-tick player upkeep and the inhale rig that follows the player.

use bevy::prelude::*;

use super::SimClock;
use crate::components::{Animation, Direction, FlipX, Opacity, Position};
use crate::map::SceneRoles;
use crate::physics::Body;
use crate::player::PlayerController;

/// Advances blink and idle timers, refills jumps on the ground and mirrors
/// the controller onto the player's presentation components.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn player_upkeep_system(
    roles: Option<Res<SceneRoles>>,
    clock: Res<SimClock>,
    mut players: Query<(&mut PlayerController, &Body, &mut Opacity, &mut Animation)>,
) {
    let Some(roles) = roles else {
        return;
    };
    let Ok((mut controller, body, mut opacity, mut anim)) = players.get_mut(roles.player) else {
        return;
    };
    let now = clock.now();
    controller.tick(now);
    if body.grounded {
        controller.land();
    }
    opacity.0 = controller.opacity();
    anim.play(controller.animation(), now);
}

/// Keeps the inhale zone and effect attached to the player's facing side.
///
/// Runs after physics so the zone is in place before overlaps are tested.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn inhale_rig_system(
    roles: Option<Res<SceneRoles>>,
    players: Query<(&PlayerController, &Position)>,
    mut rig: Query<
        (&mut Position, Option<&mut Opacity>, Option<&mut FlipX>),
        Without<PlayerController>,
    >,
) {
    let Some(roles) = roles else {
        return;
    };
    let Ok((controller, player_at)) = players.get(roles.player) else {
        return;
    };

    if let Ok((mut zone_at, _, _)) = rig.get_mut(roles.inhale_zone) {
        zone_at.0 = player_at.0 + controller.inhale_zone_offset();
    }
    if let Ok((mut effect_at, opacity, flip)) = rig.get_mut(roles.inhale_effect) {
        effect_at.0 = controller.inhale_effect_position(player_at.0);
        if let Some(mut opacity) = opacity {
            opacity.0 = if controller.effect_visible() { 1.0 } else { 0.0 };
        }
        if let Some(mut flip) = flip {
            flip.0 = controller.direction() == Direction::Left;
        }
    }
}
