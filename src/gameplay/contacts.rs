//! Reactions to contact messages.
//!
//! These run in a fixed order within the `React` set: inhale-zone flags
//! first, then projectile hits, then the player's own contacts. Each stage
//! sees the despawns of the previous one, so an enemy shot this frame can no
//! longer hurt or be swallowed by the player.
//!
//! Stars that hit nothing expire once they drift far outside the view.

use bevy::prelude::*;
use log::{debug, info};

use super::SimClock;
use crate::collision::{CollisionBegan, CollisionEnded, ContactPair};
use crate::components::{Exit, InhaleZone, Position, Projectile, Solid};
use crate::inhale::Inhalable;
use crate::map::SceneRoles;
use crate::player::{EnemyContact, PlayerController};
use crate::presentation::CameraView;
use crate::scene::{SceneId, SceneRequest};
use crate::PROJECTILE_OFFSCREEN_DISTANCE;

/// Marks enemies inhalable exactly while they overlap the inhale zone.
pub fn inhale_zone_contact_system(
    mut began: MessageReader<CollisionBegan>,
    mut ended: MessageReader<CollisionEnded>,
    zones: Query<(), With<InhaleZone>>,
    mut enemies: Query<&mut Inhalable>,
) {
    for msg in ended.read() {
        for (zone, enemy) in msg.orderings() {
            if zones.contains(zone) {
                if let Ok(mut inhalable) = enemies.get_mut(enemy) {
                    inhalable.zone_exited();
                }
            }
        }
    }
    for msg in began.read() {
        for (zone, enemy) in msg.orderings() {
            if zones.contains(zone) {
                if let Ok(mut inhalable) = enemies.get_mut(enemy) {
                    inhalable.zone_entered();
                }
            }
        }
    }
}

/// Stars destroy the enemy they hit along with themselves, and vanish on
/// platforms.
pub fn projectile_contact_system(
    mut commands: Commands,
    mut began: MessageReader<CollisionBegan>,
    projectiles: Query<(), With<Projectile>>,
    enemies: Query<(), With<Inhalable>>,
    platforms: Query<(), With<Solid>>,
) {
    for msg in began.read() {
        for (star, other) in msg.orderings() {
            if !projectiles.contains(star) {
                continue;
            }
            if enemies.contains(other) {
                debug!("star {star} destroyed enemy {other}");
                commands.entity(other).try_despawn();
                commands.entity(star).try_despawn();
            } else if platforms.contains(other) {
                debug!("star {star} hit a platform");
                commands.entity(star).try_despawn();
            }
        }
    }
}

/// Whether a star at `position` has left the range around `view`.
#[must_use]
pub fn projectile_expired(position: Vec2, view: Rect) -> bool {
    !view
        .inflate(PROJECTILE_OFFSCREEN_DISTANCE)
        .contains(position)
}

/// Removes stars that missed and flew far outside the camera view.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn projectile_cull_system(
    mut commands: Commands,
    view: Res<CameraView>,
    stars: Query<(Entity, &Position), With<Projectile>>,
) {
    for (star, position) in &stars {
        if projectile_expired(position.0, view.visible) {
            debug!("star {star} expired");
            commands.entity(star).try_despawn();
        }
    }
}

/// Player against enemies and exits.
///
/// Touching an enemy either swallows it, hurts the player, or, once health
/// is spent, removes the player and restarts the first level. Touching an
/// exit requests the next level.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
#[expect(
    clippy::too_many_arguments,
    reason = "Bevy systems declare each resource and query they touch."
)]
pub fn player_contact_system(
    mut commands: Commands,
    mut began: MessageReader<CollisionBegan>,
    roles: Option<Res<SceneRoles>>,
    clock: Res<SimClock>,
    mut players: Query<&mut PlayerController>,
    enemies: Query<&Inhalable>,
    exits: Query<(), With<Exit>>,
    mut requests: MessageWriter<SceneRequest>,
) {
    let Some(roles) = roles else {
        began.clear();
        return;
    };
    let now = clock.now();
    for msg in began.read() {
        for (player, other) in msg.orderings() {
            if player != roles.player {
                continue;
            }
            let Ok(mut controller) = players.get_mut(player) else {
                continue;
            };
            if let Ok(enemy) = enemies.get(other) {
                match controller.on_enemy_contact(enemy.is_inhalable(), now) {
                    EnemyContact::Consumed => {
                        debug!("player swallowed {other}");
                        commands.entity(other).try_despawn();
                    }
                    EnemyContact::Defeated => {
                        info!("player defeated; restarting");
                        commands.entity(player).try_despawn();
                        requests.write(SceneRequest(SceneId::restart()));
                        return;
                    }
                    EnemyContact::Hurt => {
                        debug!("player hurt, {} hp left", controller.health().current);
                    }
                    EnemyContact::Shrugged => {}
                }
            } else if exits.contains(other) {
                info!("exit reached");
                requests.write(SceneRequest(SceneId::exit_target()));
            }
        }
    }
}

/// Restarts the first level once the player drops below the kill height.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn player_fall_system(
    roles: Option<Res<SceneRoles>>,
    players: Query<&Position, With<PlayerController>>,
    mut requests: MessageWriter<SceneRequest>,
) {
    let Some(position) = roles.and_then(|roles| players.get(roles.player).ok()) else {
        return;
    };
    if PlayerController::has_fallen(position.y) {
        info!("player fell out of the level");
        requests.write(SceneRequest(SceneId::restart()));
    }
}
