//! ECS component types used by the game.
//! Includes kinematic state, collision identity, health and presentation
//! fragments that entities combine as their behaviour requires.
use bevy::prelude::*;

/// World position of an entity's origin (top-left of its sprite), y down.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
pub struct Position(pub Vec2);

/// Persistent velocity, integrated every frame by the physics adapter.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
pub struct Velocity(pub Vec2);

/// Per-frame displacement request in units per second.
///
/// Behaviour systems add to it during the frame; physics consumes and clears
/// it, so a request only lasts one tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
pub struct Movement(pub Vec2);

/// Horizontal facing of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Facing toward negative x.
    Left,
    /// Facing toward positive x.
    #[default]
    Right,
}

impl Direction {
    /// `-1.0` for left, `1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// The opposite facing.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Collision identity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Player = 1 << 0,
    Enemy = 1 << 1,
    Platform = 1 << 2,
    Exit = 1 << 3,
    InhaleZone = 1 << 4,
    InhaleEffect = 1 << 5,
    Projectile = 1 << 6,
}

/// Add-only set of [`Tag`]s carried by an entity.
///
/// Tags are fixed when the entity is built and are never removed.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Tags(u8);

impl Tags {
    /// A set containing no tags.
    pub const EMPTY: Self = Self(0);

    /// A set containing exactly `tag`.
    #[must_use]
    pub const fn of(tag: Tag) -> Self {
        Self(tag as u8)
    }

    /// Returns a copy with `tag` added.
    #[must_use]
    pub const fn with(self, tag: Tag) -> Self {
        Self(self.0 | tag as u8)
    }

    /// Whether `tag` is present.
    #[must_use]
    pub const fn has(self, tag: Tag) -> bool {
        self.0 & tag as u8 != 0
    }

    /// Whether any tag of `other` is present.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl From<Tag> for Tags {
    fn from(tag: Tag) -> Self {
        Self::of(tag)
    }
}

/// Tags this entity never collides with.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Deref)]
pub struct CollisionIgnore(pub Tags);

/// Axis-aligned hit region relative to [`Position`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Offset of the region's top-left corner from the entity origin.
    pub offset: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Hitbox {
    /// Hitbox authored in sprite pixels, scaled into world units.
    #[must_use]
    pub fn scaled(offset: Vec2, size: Vec2, scale: f32) -> Self {
        Self {
            offset: offset * scale,
            size: size * scale,
        }
    }
}

/// Static platform geometry that dynamic bodies stand on.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Solid;

/// Hit points.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    /// Full health with the given maximum.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Removes `amount` points, saturating at zero.
    pub fn hurt(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Visual opacity in `0.0..=1.0`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct Opacity(pub f32);

impl Default for Opacity {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Whether the sprite is mirrored horizontally.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct FlipX(pub bool);

/// Named animation from the sprite catalog and the time it started.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub name: &'static str,
    pub started_at: f64,
}

impl Animation {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            started_at: 0.0,
        }
    }

    /// Switches to `name`, restarting the clock only when it changes.
    pub fn play(&mut self, name: &'static str, now: f64) {
        if self.name != name {
            self.name = name;
            self.started_at = now;
        }
    }
}

/// Marks entities owned by the active scene; all are despawned on transition.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SceneMember;

/// A shooting star fired by the player.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Projectile;

/// Level exit sensor.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Exit;

/// Hit region that marks overlapping enemies as inhalable.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct InhaleZone;

/// Visual effect drawn in front of the inhaling player.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct InhaleEffect;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn tags_accumulate_without_losing_members() {
        let tags = Tags::of(Tag::Enemy).with(Tag::Projectile);
        assert!(tags.has(Tag::Enemy));
        assert!(tags.has(Tag::Projectile));
        assert!(!tags.has(Tag::Player));
    }

    #[rstest]
    #[case(Tags::of(Tag::Platform), Tags::of(Tag::Platform).with(Tag::Exit), true)]
    #[case(Tags::of(Tag::Enemy), Tags::of(Tag::Platform).with(Tag::Exit), false)]
    #[case(Tags::EMPTY, Tags::of(Tag::Enemy), false)]
    fn tags_intersection(#[case] a: Tags, #[case] b: Tags, #[case] expected: bool) {
        assert_eq!(a.intersects(b), expected);
    }

    #[rstest]
    fn health_saturates_at_zero() {
        let mut health = Health::full(1);
        health.hurt(1);
        assert!(health.is_depleted());
        health.hurt(1);
        assert_eq!(health.current, 0);
    }

    #[rstest]
    fn animation_restarts_only_on_change() {
        let mut anim = Animation::new("kirbIdle");
        anim.play("kirbIdle", 2.0);
        assert!(anim.started_at.abs() < f64::EPSILON);
        anim.play("kirbFull", 3.0);
        assert_eq!(anim.name, "kirbFull");
        assert!((anim.started_at - 3.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(Direction::Left, -1.0, Direction::Right)]
    #[case(Direction::Right, 1.0, Direction::Left)]
    fn direction_sign_and_reverse(
        #[case] dir: Direction,
        #[case] sign: f32,
        #[case] reversed: Direction,
    ) {
        assert!((dir.sign() - sign).abs() < f32::EPSILON);
        assert_eq!(dir.reversed(), reversed);
    }
}
