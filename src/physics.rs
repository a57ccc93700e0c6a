//! Minimal kinematic body support.
//!
//! Provides exactly what the gameplay code relies on from its host: gravity
//! on dynamic bodies, immovable solids, and a ground-contact flag. Motion is
//! resolved one axis at a time against solid rectangles; there is no mass,
//! friction or restitution.

use bevy::prelude::*;

use crate::components::{Hitbox, Movement, Position, Solid, Velocity};
use crate::gameplay::SimClock;
use crate::{GRAVITY, MAX_FALL_SPEED};

/// Axis-aligned rectangle in world space, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// World-space bounds of `hitbox` for an entity at `position`.
    #[must_use]
    pub fn from_hitbox(position: Vec2, hitbox: &Hitbox) -> Self {
        let min = position + hitbox.offset;
        Self {
            min,
            max: min + hitbox.size,
        }
    }

    /// Strict overlap: touching edges do not count.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Overlap deeper than `slop` on both axes.
    #[must_use]
    pub fn penetrates(&self, other: &Self, slop: f32) -> bool {
        self.min.x + slop < other.max.x
            && other.min.x + slop < self.max.x
            && self.min.y + slop < other.max.y
            && other.min.y + slop < self.max.y
    }
}

/// Collision participation of a moving entity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Body {
    /// Static bodies ignore gravity and are never pushed out of solids.
    pub is_static: bool,
    /// Set while the body rests on a solid.
    pub grounded: bool,
}

impl Body {
    #[must_use]
    pub const fn dynamic() -> Self {
        Self {
            is_static: false,
            grounded: false,
        }
    }

    #[must_use]
    pub const fn fixed() -> Self {
        Self {
            is_static: true,
            grounded: false,
        }
    }

    /// Launches the body upward with `force` (y grows downward).
    pub fn jump(&mut self, velocity: &mut Velocity, force: f32) {
        velocity.y = -force;
        self.grounded = false;
    }
}

/// Result of moving a hitbox through solids.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sweep {
    pub position: Vec2,
    pub landed: bool,
    pub hit_ceiling: bool,
    pub hit_wall: bool,
}

/// Adds one step of gravity to a vertical velocity.
#[must_use]
pub fn fall(vy: f32, dt: f32) -> f32 {
    (vy + GRAVITY * dt).min(MAX_FALL_SPEED)
}

/// Penetration below this is rounding left over from snapping flush.
const CONTACT_SLOP: f32 = 1e-3;

/// Moves `position` by `delta`, x first then y, stopping flush against
/// any solid the hitbox would enter.
#[must_use]
pub fn sweep(position: Vec2, hitbox: &Hitbox, delta: Vec2, solids: &[Aabb]) -> Sweep {
    let mut result = Sweep {
        position,
        ..Sweep::default()
    };

    if delta.x != 0.0 {
        result.position.x += delta.x;
        for solid in solids {
            if Aabb::from_hitbox(result.position, hitbox).penetrates(solid, CONTACT_SLOP) {
                result.position.x = if delta.x > 0.0 {
                    solid.min.x - hitbox.offset.x - hitbox.size.x
                } else {
                    solid.max.x - hitbox.offset.x
                };
                result.hit_wall = true;
            }
        }
    }

    if delta.y != 0.0 {
        result.position.y += delta.y;
        for solid in solids {
            if Aabb::from_hitbox(result.position, hitbox).penetrates(solid, CONTACT_SLOP) {
                if delta.y > 0.0 {
                    result.position.y = solid.min.y - hitbox.offset.y - hitbox.size.y;
                    result.landed = true;
                } else {
                    result.position.y = solid.max.y - hitbox.offset.y;
                    result.hit_ceiling = true;
                }
            }
        }
    }

    result
}

/// Integrates every non-solid mover for one frame and clears its
/// [`Movement`] request.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
#[expect(
    clippy::type_complexity,
    reason = "Bevy ECS query with optional components is inherently verbose."
)]
pub fn physics_system(
    clock: Res<SimClock>,
    solids: Query<(&Position, &Hitbox), With<Solid>>,
    mut movers: Query<
        (
            &mut Position,
            Option<&mut Velocity>,
            Option<&mut Movement>,
            Option<&mut Body>,
            Option<&Hitbox>,
        ),
        Without<Solid>,
    >,
) {
    let dt = clock.delta();
    let solid_boxes: Vec<Aabb> = solids
        .iter()
        .map(|(pos, hitbox)| Aabb::from_hitbox(pos.0, hitbox))
        .collect();

    for (mut position, mut velocity, mut movement, mut body, hitbox) in &mut movers {
        let requested = movement.as_deref().map_or(Vec2::ZERO, |m| m.0);
        if let Some(m) = movement.as_deref_mut() {
            m.0 = Vec2::ZERO;
        }

        let dynamic = body.as_deref().is_some_and(|b| !b.is_static);
        if dynamic {
            if let Some(v) = velocity.as_deref_mut() {
                v.y = fall(v.y, dt);
            }
        }
        let persistent = velocity.as_deref().map_or(Vec2::ZERO, |v| v.0);
        let delta = (persistent + requested) * dt;

        match (dynamic, hitbox, body.as_deref_mut()) {
            (true, Some(hitbox), Some(body)) => {
                let swept = sweep(position.0, hitbox, delta, &solid_boxes);
                position.0 = swept.position;
                body.grounded = swept.landed;
                if let Some(v) = velocity.as_deref_mut() {
                    if swept.landed || (swept.hit_ceiling && v.y < 0.0) {
                        v.y = 0.0;
                    }
                }
            }
            _ => position.0 += delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn unit_box() -> Hitbox {
        Hitbox {
            offset: Vec2::ZERO,
            size: Vec2::splat(10.0),
        }
    }

    fn floor() -> Aabb {
        Aabb {
            min: Vec2::new(-100.0, 100.0),
            max: Vec2::new(100.0, 120.0),
        }
    }

    #[rstest]
    #[case(Vec2::new(5.0, 5.0), true)]
    #[case(Vec2::new(10.0, 0.0), false)]
    #[case(Vec2::new(-9.9, 9.9), true)]
    fn overlap_is_strict(unit_box: Hitbox, #[case] other_at: Vec2, #[case] expected: bool) {
        let a = Aabb::from_hitbox(Vec2::ZERO, &unit_box);
        let b = Aabb::from_hitbox(other_at, &unit_box);
        assert_eq!(a.overlaps(&b), expected);
    }

    #[rstest]
    fn falling_body_lands_flush(unit_box: Hitbox) {
        let swept = sweep(Vec2::new(0.0, 85.0), &unit_box, Vec2::new(0.0, 10.0), &[floor()]);
        assert!(swept.landed);
        assert_relative_eq!(swept.position.y, 90.0);
    }

    #[rstest]
    fn walking_along_floor_does_not_collide(unit_box: Hitbox) {
        let swept = sweep(Vec2::new(0.0, 90.0), &unit_box, Vec2::new(5.0, 0.0), &[floor()]);
        assert!(!swept.hit_wall);
        assert_relative_eq!(swept.position.x, 5.0);
    }

    #[rstest]
    fn rounding_into_the_floor_is_not_a_wall(unit_box: Hitbox) {
        let resting = Vec2::new(0.0, 90.000_05);
        let swept = sweep(resting, &unit_box, Vec2::new(5.0, 0.0), &[floor()]);
        assert!(!swept.hit_wall);
        assert_relative_eq!(swept.position.x, 5.0);
    }

    #[rstest]
    fn wall_stops_horizontal_motion(unit_box: Hitbox) {
        let wall = Aabb {
            min: Vec2::new(20.0, 0.0),
            max: Vec2::new(30.0, 50.0),
        };
        let swept = sweep(Vec2::new(5.0, 10.0), &unit_box, Vec2::new(8.0, 0.0), &[wall]);
        assert!(swept.hit_wall);
        assert_relative_eq!(swept.position.x, 10.0);
    }

    #[rstest]
    fn jumping_into_ceiling_stops_flush(unit_box: Hitbox) {
        let swept = sweep(Vec2::new(0.0, 125.0), &unit_box, Vec2::new(0.0, -10.0), &[floor()]);
        assert!(swept.hit_ceiling);
        assert_relative_eq!(swept.position.y, 120.0);
    }

    #[rstest]
    fn gravity_is_capped() {
        assert_relative_eq!(fall(0.0, 0.5), GRAVITY * 0.5);
        assert_relative_eq!(fall(MAX_FALL_SPEED, 1.0), MAX_FALL_SPEED);
    }
}
