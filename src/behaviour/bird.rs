use bevy::prelude::{Component, Rect, Vec2};

use crate::{BIRD_DEFAULT_SPEED, BIRD_OFFSCREEN_DISTANCE};

/// Flyer that crosses the level leftward and is culled once far off screen.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub speed: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            speed: BIRD_DEFAULT_SPEED,
        }
    }
}

impl Bird {
    /// Horizontal velocity; birds only ever fly left.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        -self.speed
    }

    /// Whether `position` lies more than the cull distance outside `view`.
    #[must_use]
    pub fn is_out_of_range(position: Vec2, view: Rect) -> bool {
        let range = view.inflate(BIRD_OFFSCREEN_DISTANCE);
        !range.contains(position)
    }
}
