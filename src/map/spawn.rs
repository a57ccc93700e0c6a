//! Scene assembly: turns a [`LoadedMap`] into entities.
//!
//! Colliders become static platforms or exit sensors. Spawn points named
//! `player`, `flame`, `guy` and `bird` become the player rig and enemies;
//! other spawn names are ignored. Every entity built here carries
//! [`SceneMember`] so the next transition removes it.

use bevy::prelude::*;
use log::{debug, warn};

use super::{Collider, ColliderKind, LoadedMap};
use crate::behaviour::{Bird, Flame, PatrolGuy};
use crate::components::{
    Animation, CollisionIgnore, Exit, FlipX, Hitbox, InhaleEffect, InhaleZone, Movement, Opacity,
    Position, Projectile, SceneMember, Solid, Tag, Tags, Velocity,
};
use crate::error::{MissingSingletonError, SingletonRole};
use crate::inhale::Inhalable;
use crate::physics::Body;
use crate::player::{PlayerController, ProjectileSpawn};
use crate::scene::SceneId;
use crate::sprites::{BIRD, FLAME, GUY_WALK, KIRB_IDLE, KIRB_INHALE_EFFECT, SHOOTING_STAR};
use crate::{INHALE_ZONE_HEIGHT, INHALE_ZONE_WIDTH, MAP_SCALE};

pub const PLAYER_SPAWN: &str = "player";
pub const FLAME_SPAWN: &str = "flame";
pub const GUY_SPAWN: &str = "guy";
pub const BIRD_SPAWN: &str = "bird";

/// Entities that fill the scene's singleton roles.
///
/// Systems look these up directly instead of scanning for tags. A role whose
/// entity has since been despawned resolves to nothing and the caller does
/// nothing.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneRoles {
    pub scene: SceneId,
    pub player: Entity,
    pub inhale_zone: Entity,
    pub inhale_effect: Entity,
}

/// Components shared by every collider entity.
#[derive(Bundle)]
pub struct ColliderBundle {
    pub member: SceneMember,
    pub name: Name,
    pub position: Position,
    pub hitbox: Hitbox,
    pub tags: Tags,
    /// Colliders never report contacts with each other.
    pub ignore: CollisionIgnore,
    pub transform: Transform,
}

impl ColliderBundle {
    /// Collider geometry scaled into world units.
    #[must_use]
    pub fn new(collider: &Collider) -> Self {
        let tag = match collider.kind {
            ColliderKind::Platform => Tag::Platform,
            ColliderKind::Exit => Tag::Exit,
        };
        Self {
            member: SceneMember,
            name: Name::new(if collider.is_solid() { "Platform" } else { "Exit" }),
            position: Position(Vec2::new(collider.x, collider.y) * MAP_SCALE),
            hitbox: Hitbox::scaled(
                Vec2::ZERO,
                Vec2::new(collider.width, collider.height),
                MAP_SCALE,
            ),
            tags: Tags::of(tag),
            ignore: CollisionIgnore(Tags::of(Tag::Platform).with(Tag::Exit)),
            transform: Transform::default(),
        }
    }
}

/// Components shared by the player and every enemy.
#[derive(Bundle)]
pub struct ActorBundle {
    pub member: SceneMember,
    pub name: Name,
    pub position: Position,
    pub velocity: Velocity,
    pub movement: Movement,
    pub body: Body,
    pub hitbox: Hitbox,
    pub tags: Tags,
    pub animation: Animation,
    pub flip_x: FlipX,
    pub opacity: Opacity,
    pub transform: Transform,
}

impl ActorBundle {
    fn new(name: &'static str, at: Vec2, tag: Tag, animation: &'static str, now: f64) -> Self {
        let mut anim = Animation::new(animation);
        anim.started_at = now;
        Self {
            member: SceneMember,
            name: Name::new(name),
            position: Position(at),
            velocity: Velocity::default(),
            movement: Movement::default(),
            body: Body::dynamic(),
            hitbox: Hitbox::scaled(Vec2::new(4.0, 6.0), Vec2::new(8.0, 10.0), MAP_SCALE),
            tags: Tags::of(tag),
            animation: anim,
            flip_x: FlipX(false),
            opacity: Opacity::default(),
            transform: Transform::default(),
        }
    }
}

/// Builds every entity described by `map` for `scene`.
///
/// The player spawn point is checked before anything is spawned, so a map
/// without one leaves the world untouched.
///
/// # Errors
///
/// Returns [`MissingSingletonError`] when the map has no `player` spawn
/// point.
pub fn spawn_scene(
    commands: &mut Commands,
    map: &LoadedMap,
    scene: SceneId,
    now: f64,
) -> Result<SceneRoles, MissingSingletonError> {
    let player_at = map
        .spawn_points
        .first(PLAYER_SPAWN)
        .ok_or(MissingSingletonError {
            role: SingletonRole::Player,
            scene,
            found: 0,
        })?
        .to_vec2()
        * MAP_SCALE;
    if map.spawn_points.get(PLAYER_SPAWN).len() > 1 {
        warn!("scene `{scene}` has several player spawn points; using the first");
    }

    for collider in &map.colliders {
        let mut entity = commands.spawn(ColliderBundle::new(collider));
        match collider.kind {
            ColliderKind::Platform => entity.insert(Solid),
            ColliderKind::Exit => entity.insert(Exit),
        };
    }

    let roles = spawn_player(commands, scene, player_at, now);

    for (name, points) in map.spawn_points.iter() {
        for point in points {
            let at = point.to_vec2() * MAP_SCALE;
            match name {
                FLAME_SPAWN => spawn_flame(commands, at, now),
                GUY_SPAWN => spawn_guy(commands, at, now),
                BIRD_SPAWN => spawn_bird(commands, at, now),
                PLAYER_SPAWN => continue,
                other => {
                    debug!("ignoring spawn point `{other}`");
                    continue;
                }
            };
        }
    }

    Ok(roles)
}

/// Spawns the player with its inhale zone and inhale effect.
pub fn spawn_player(commands: &mut Commands, scene: SceneId, at: Vec2, now: f64) -> SceneRoles {
    let controller = PlayerController::default();
    let zone_offset = controller.inhale_zone_offset();
    let effect_at = controller.inhale_effect_position(at);

    let mut actor = ActorBundle::new("Player", at, Tag::Player, KIRB_IDLE, now);
    actor.hitbox = Hitbox::scaled(Vec2::new(4.0, 5.9), Vec2::new(8.0, 10.0), MAP_SCALE);
    let player = commands.spawn((actor, controller)).id();

    let inhale_zone = commands
        .spawn((
            SceneMember,
            Name::new("InhaleZone"),
            InhaleZone,
            Position(at + zone_offset),
            Hitbox::scaled(
                Vec2::ZERO,
                Vec2::new(INHALE_ZONE_WIDTH, INHALE_ZONE_HEIGHT),
                MAP_SCALE,
            ),
            Tags::of(Tag::InhaleZone),
            CollisionIgnore(
                Tags::of(Tag::Player)
                    .with(Tag::Platform)
                    .with(Tag::Exit)
                    .with(Tag::Projectile),
            ),
        ))
        .id();

    let inhale_effect = commands
        .spawn((
            SceneMember,
            Name::new("InhaleEffect"),
            InhaleEffect,
            Position(effect_at),
            Tags::of(Tag::InhaleEffect),
            Animation {
                name: KIRB_INHALE_EFFECT,
                started_at: now,
            },
            Opacity(0.0),
            FlipX(false),
            Transform::default(),
        ))
        .id();

    SceneRoles {
        scene,
        player,
        inhale_zone,
        inhale_effect,
    }
}

fn enemy(
    name: &'static str,
    at: Vec2,
    animation: &'static str,
    body: Body,
    now: f64,
) -> impl Bundle {
    let mut actor = ActorBundle::new(name, at, Tag::Enemy, animation, now);
    actor.body = body;
    (
        actor,
        CollisionIgnore(Tags::of(Tag::Enemy)),
        Inhalable::default(),
    )
}

/// Jumps in place on a fixed rhythm.
pub fn spawn_flame(commands: &mut Commands, at: Vec2, now: f64) -> Entity {
    commands
        .spawn((enemy("Flame", at, FLAME, Body::dynamic(), now), Flame::new(now)))
        .id()
}

/// Walks back and forth between idles.
pub fn spawn_guy(commands: &mut Commands, at: Vec2, now: f64) -> Entity {
    commands
        .spawn((enemy("Guy", at, GUY_WALK, Body::dynamic(), now), PatrolGuy::new(now)))
        .id()
}

/// Flies left through platforms until far off screen.
pub fn spawn_bird(commands: &mut Commands, at: Vec2, now: f64) -> Entity {
    commands
        .spawn((enemy("Bird", at, BIRD, Body::fixed(), now), Bird::default()))
        .id()
}

/// Spawns a shooting star released by a full player.
pub fn spawn_projectile(commands: &mut Commands, spawn: ProjectileSpawn, now: f64) -> Entity {
    commands
        .spawn((
            SceneMember,
            Name::new("ShootingStar"),
            Projectile,
            Position(spawn.position),
            Velocity(spawn.velocity),
            Hitbox::scaled(Vec2::new(5.0, 4.0), Vec2::new(6.0, 6.0), MAP_SCALE),
            Tags::of(Tag::Projectile),
            CollisionIgnore(Tags::of(Tag::Player).with(Tag::InhaleZone).with(Tag::Exit)),
            Animation {
                name: SHOOTING_STAR,
                started_at: now,
            },
            FlipX(spawn.flip_x),
            Opacity::default(),
            Transform::default(),
        ))
        .id()
}
