//! Inhalability shared by every enemy.
//!
//! An enemy is inhalable exactly while it overlaps the player's inhale zone.
//! The flag changes only on overlap begin and end; there is no grace period.
//! While the player inhales, inhalable enemies are dragged toward it at a
//! constant speed that stacks with their own movement.

use bevy::prelude::Component;

use crate::components::Direction;
use crate::INHALE_PULL_SPEED;

/// What an enemy needs to know about the player to compute the pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InhaleSource {
    pub is_inhaling: bool,
    pub facing: Direction,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inhalable {
    inhalable: bool,
}

impl Inhalable {
    #[must_use]
    pub const fn is_inhalable(&self) -> bool {
        self.inhalable
    }

    /// Overlap with the inhale zone began.
    pub fn zone_entered(&mut self) {
        self.inhalable = true;
    }

    /// Overlap with the inhale zone ended.
    pub fn zone_exited(&mut self) {
        self.inhalable = false;
    }

    /// Horizontal pull velocity for this tick.
    ///
    /// The zone sits on the player's facing side, so the pull points the
    /// other way: back toward the player's mouth.
    #[must_use]
    pub fn pull_velocity(&self, source: InhaleSource) -> f32 {
        if source.is_inhaling && self.inhalable {
            source.facing.reversed().sign() * INHALE_PULL_SPEED
        } else {
            0.0
        }
    }
}
