//! Player controller: movement, inhaling, shooting, health and the inhale rig.
//!
//! The controller is plain state driven by the gameplay systems. It never
//! touches other entities directly; operations return what the host should
//! do (spawn a projectile, remove an enemy, restart a level).

use bevy::prelude::{Component, Vec2};

use crate::components::{Direction, Health};
use crate::inhale::InhaleSource;
use crate::sprites::{KIRB_FULL, KIRB_IDLE, KIRB_INHALING};
use crate::tween::Blink;
use crate::{
    BLINK_HALF_SECONDS, FALL_DEATH_Y, INHALE_EFFECT_DISTANCE, INHALE_ZONE_OFFSET_X,
    INHALE_ZONE_OFFSET_Y, MAP_SCALE, PLAYER_JUMP_COUNT, PLAYER_MAX_HEALTH, PLAYER_SPEED,
    PROJECTILE_OFFSET_X, PROJECTILE_OFFSET_Y, PROJECTILE_SPEED, SHOOT_RECOVERY_SECONDS,
};

/// Outcome of touching an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// The enemy was swallowed; remove it.
    Consumed,
    /// Health was already spent; remove the player and restart.
    Defeated,
    /// One point of damage taken; a blink started.
    Hurt,
    /// Ignored because a blink is still running.
    Shrugged,
}

/// A shooting star to be spawned by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub position: Vec2,
    pub velocity: Vec2,
    /// The star sprite faces left by default.
    pub flip_x: bool,
}

/// Jumps left before the next ground contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpBudget {
    max: u32,
    remaining: u32,
}

impl JumpBudget {
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { max, remaining: max }
    }

    /// Refills the budget; called whenever the body stands on ground.
    pub fn land(&mut self) {
        self.remaining = self.max;
    }

    /// Spends one jump if any is left.
    pub fn try_jump(&mut self, grounded: bool) -> bool {
        if grounded {
            self.land();
        }
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerController {
    speed: f32,
    direction: Direction,
    flip_x: bool,
    is_inhaling: bool,
    is_full: bool,
    health: Health,
    opacity: f32,
    blink: Option<Blink>,
    jumps: JumpBudget,
    animation: &'static str,
    idle_at: Option<f64>,
    effect_visible: bool,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            direction: Direction::Right,
            flip_x: false,
            is_inhaling: false,
            is_full: false,
            health: Health::full(PLAYER_MAX_HEALTH),
            opacity: 1.0,
            blink: None,
            jumps: JumpBudget::new(PLAYER_JUMP_COUNT),
            animation: KIRB_IDLE,
            idle_at: None,
            effect_visible: false,
        }
    }
}

impl PlayerController {
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn flip_x(&self) -> bool {
        self.flip_x
    }

    #[must_use]
    pub const fn is_inhaling(&self) -> bool {
        self.is_inhaling
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.is_full
    }

    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    #[must_use]
    pub const fn animation(&self) -> &'static str {
        self.animation
    }

    #[must_use]
    pub const fn effect_visible(&self) -> bool {
        self.effect_visible
    }

    #[must_use]
    pub const fn is_blinking(&self) -> bool {
        self.blink.is_some()
    }

    #[must_use]
    pub const fn inhale_source(&self) -> InhaleSource {
        InhaleSource {
            is_inhaling: self.is_inhaling,
            facing: self.direction,
        }
    }

    /// Faces `direction` and returns this tick's horizontal velocity.
    pub fn steer(&mut self, direction: Direction) -> f32 {
        self.direction = direction;
        self.flip_x = direction == Direction::Left;
        direction.sign() * self.speed
    }

    /// Refills the double jump on ground contact.
    pub fn land(&mut self) {
        self.jumps.land();
    }

    /// Double jump: succeeds from the ground and once more in the air.
    pub fn try_jump(&mut self, grounded: bool) -> bool {
        self.jumps.try_jump(grounded)
    }

    /// The inhale key is held.
    ///
    /// A full player cannot inhale; it shows the full pose instead.
    pub fn begin_inhale(&mut self) {
        if self.is_full {
            self.animation = KIRB_FULL;
            self.effect_visible = false;
            return;
        }
        self.is_inhaling = true;
        self.animation = KIRB_INHALING;
        self.effect_visible = true;
    }

    /// The inhale key was released. A full player spits a star.
    pub fn release_inhale(&mut self, position: Vec2, now: f64) -> Option<ProjectileSpawn> {
        if self.is_full {
            self.is_full = false;
            self.animation = KIRB_INHALING;
            self.idle_at = Some(now + SHOOT_RECOVERY_SECONDS);
            let sign = self.direction.sign();
            return Some(ProjectileSpawn {
                position: position + Vec2::new(sign * PROJECTILE_OFFSET_X, PROJECTILE_OFFSET_Y),
                velocity: Vec2::new(sign * PROJECTILE_SPEED, 0.0),
                flip_x: self.direction == Direction::Right,
            });
        }
        self.effect_visible = false;
        self.is_inhaling = false;
        self.animation = KIRB_IDLE;
        None
    }

    /// Reacts to touching an enemy.
    ///
    /// Swallowing wins over damage. A player already at zero health dies on
    /// the next touch whatever it is doing. While a blink runs, further
    /// damage is ignored.
    pub fn on_enemy_contact(&mut self, enemy_inhalable: bool, now: f64) -> EnemyContact {
        if self.is_inhaling && enemy_inhalable {
            self.is_inhaling = false;
            self.is_full = true;
            return EnemyContact::Consumed;
        }
        if self.health.is_depleted() {
            return EnemyContact::Defeated;
        }
        if self.is_blinking() {
            return EnemyContact::Shrugged;
        }
        self.health.hurt(1);
        self.blink = Some(Blink::start(now, BLINK_HALF_SECONDS));
        EnemyContact::Hurt
    }

    /// Advances the blink and the delayed return to idle.
    pub fn tick(&mut self, now: f64) {
        if let Some(blink) = self.blink {
            self.opacity = blink.opacity_at(now);
            if blink.is_finished(now) {
                self.blink = None;
                self.opacity = 1.0;
            }
        }
        if let Some(at) = self.idle_at {
            if now >= at {
                self.idle_at = None;
                if !self.is_inhaling {
                    self.animation = KIRB_IDLE;
                }
            }
        }
    }

    /// Whether `y` is below the kill height.
    #[must_use]
    pub fn has_fallen(y: f32) -> bool {
        y > FALL_DEATH_Y
    }

    /// Inhale zone origin relative to the player, in world units.
    #[must_use]
    pub fn inhale_zone_offset(&self) -> Vec2 {
        Vec2::new(
            self.direction.sign() * INHALE_ZONE_OFFSET_X,
            INHALE_ZONE_OFFSET_Y,
        ) * MAP_SCALE
    }

    /// World position of the inhale effect for a player at `position`.
    #[must_use]
    pub fn inhale_effect_position(&self, position: Vec2) -> Vec2 {
        position + Vec2::new(self.direction.sign() * INHALE_EFFECT_DISTANCE, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn player() -> PlayerController {
        PlayerController::default()
    }

    fn consume_one(player: &mut PlayerController) {
        player.begin_inhale();
        assert_eq!(player.on_enemy_contact(true, 0.0), EnemyContact::Consumed);
    }

    #[rstest]
    fn steering_sets_direction_flip_and_speed(mut player: PlayerController) {
        assert_relative_eq!(player.steer(Direction::Left), -PLAYER_SPEED);
        assert_eq!(player.direction(), Direction::Left);
        assert!(player.flip_x());
        assert_relative_eq!(player.steer(Direction::Right), PLAYER_SPEED);
        assert!(!player.flip_x());
    }

    #[rstest]
    fn double_jump_is_consumed_until_landing(mut player: PlayerController) {
        assert!(player.try_jump(true));
        assert!(player.try_jump(false));
        assert!(!player.try_jump(false));
        player.land();
        assert!(player.try_jump(false));
    }

    #[rstest]
    fn consuming_clears_inhaling_and_fills(mut player: PlayerController) {
        player.begin_inhale();
        assert!(player.is_inhaling());
        assert!(player.effect_visible());
        assert_eq!(player.on_enemy_contact(true, 0.0), EnemyContact::Consumed);
        assert!(!player.is_inhaling());
        assert!(player.is_full());
        assert_eq!(player.health().current, PLAYER_MAX_HEALTH);
    }

    #[rstest]
    fn inhaling_a_non_inhalable_enemy_hurts(mut player: PlayerController) {
        player.begin_inhale();
        assert_eq!(player.on_enemy_contact(false, 0.0), EnemyContact::Hurt);
        assert_eq!(player.health().current, PLAYER_MAX_HEALTH - 1);
    }

    #[rstest]
    fn full_player_cannot_inhale(mut player: PlayerController) {
        consume_one(&mut player);
        player.begin_inhale();
        assert!(!player.is_inhaling());
        assert_eq!(player.animation(), KIRB_FULL);
        assert!(!player.effect_visible());
    }

    #[rstest]
    #[case(Direction::Right, 80.0, 800.0, true)]
    #[case(Direction::Left, -80.0, -800.0, false)]
    fn release_when_full_spits_star(
        mut player: PlayerController,
        #[case] facing: Direction,
        #[case] dx: f32,
        #[case] vx: f32,
        #[case] flip: bool,
    ) {
        player.steer(facing);
        consume_one(&mut player);
        let star = player
            .release_inhale(Vec2::new(100.0, 50.0), 2.0)
            .expect("full player shoots");
        assert_relative_eq!(star.position.x, 100.0 + dx);
        assert_relative_eq!(star.position.y, 55.0);
        assert_relative_eq!(star.velocity.x, vx);
        assert_eq!(star.flip_x, flip);
        assert!(!player.is_full());
    }

    #[rstest]
    fn idle_animation_returns_one_second_after_shooting(mut player: PlayerController) {
        consume_one(&mut player);
        player.release_inhale(Vec2::ZERO, 2.0);
        assert_eq!(player.animation(), KIRB_INHALING);
        player.tick(2.9);
        assert_eq!(player.animation(), KIRB_INHALING);
        player.tick(3.0);
        assert_eq!(player.animation(), KIRB_IDLE);
    }

    #[rstest]
    fn release_when_empty_stops_inhaling(mut player: PlayerController) {
        player.begin_inhale();
        assert!(player.release_inhale(Vec2::ZERO, 0.0).is_none());
        assert!(!player.is_inhaling());
        assert!(!player.effect_visible());
        assert_eq!(player.animation(), KIRB_IDLE);
    }

    #[rstest]
    fn damage_blinks_and_ignores_hits_until_done(mut player: PlayerController) {
        assert_eq!(player.on_enemy_contact(false, 0.0), EnemyContact::Hurt);
        player.tick(0.25);
        assert_relative_eq!(player.opacity(), 0.5, epsilon = 1e-6);
        assert_eq!(player.on_enemy_contact(false, 0.5), EnemyContact::Shrugged);
        assert_eq!(player.health().current, PLAYER_MAX_HEALTH - 1);
        player.tick(1.0);
        assert!(!player.is_blinking());
        assert_relative_eq!(player.opacity(), 1.0);
        assert_eq!(player.on_enemy_contact(false, 1.1), EnemyContact::Hurt);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn last_hit_then_next_contact_defeats(mut player: PlayerController, #[case] inhaling: bool) {
        let mut now = 0.0;
        for _ in 0..PLAYER_MAX_HEALTH {
            assert_eq!(player.on_enemy_contact(false, now), EnemyContact::Hurt);
            now += 1.0;
            player.tick(now);
        }
        assert!(player.health().is_depleted());
        if inhaling {
            player.begin_inhale();
        }
        assert_eq!(player.on_enemy_contact(false, now), EnemyContact::Defeated);
    }

    #[rstest]
    fn depleted_player_dies_even_mid_blink(mut player: PlayerController) {
        for t in [0.0, 1.0] {
            player.on_enemy_contact(false, t);
            player.tick(t + 1.0);
        }
        assert_eq!(player.on_enemy_contact(false, 2.0), EnemyContact::Hurt);
        assert!(player.is_blinking());
        assert_eq!(player.on_enemy_contact(false, 2.2), EnemyContact::Defeated);
    }

    #[rstest]
    #[case(Direction::Right, Vec2::new(56.0, 32.0), 160.0)]
    #[case(Direction::Left, Vec2::new(-56.0, 32.0), 40.0)]
    fn inhale_rig_mirrors_with_direction(
        mut player: PlayerController,
        #[case] facing: Direction,
        #[case] zone: Vec2,
        #[case] effect_x: f32,
    ) {
        player.steer(facing);
        assert_eq!(player.inhale_zone_offset(), zone);
        let effect = player.inhale_effect_position(Vec2::new(100.0, 7.0));
        assert_relative_eq!(effect.x, effect_x);
        assert_relative_eq!(effect.y, 7.0);
    }

    #[rstest]
    #[case(1999.0, false)]
    #[case(2000.0, false)]
    #[case(2000.5, true)]
    fn fall_threshold(#[case] y: f32, #[case] fallen: bool) {
        assert_eq!(PlayerController::has_fallen(y), fallen);
    }
}
