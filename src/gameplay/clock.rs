//! Simulation clock shared by every gameplay system.

use bevy::prelude::*;

use crate::settings::GameSettings;

/// Seconds of simulated time.
///
/// Advanced exactly once per frame before any other gameplay system runs,
/// so all continuations and tweens within a frame observe the same `now`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    now: f64,
    delta: f32,
}

impl SimClock {
    #[must_use]
    pub const fn now(&self) -> f64 {
        self.now
    }

    /// Length of the current frame in seconds.
    #[must_use]
    pub const fn delta(&self) -> f32 {
        self.delta
    }

    /// Moves the clock forward; negative steps are treated as zero.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt.max(0.0);
        self.now += f64::from(self.delta);
    }
}

/// Advances [`SimClock`] by the fixed step, or by the clamped [`Time`] delta.
///
/// Without a fixed step and without a `Time` resource the clock stands still.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn advance_clock_system(
    settings: Res<GameSettings>,
    time: Option<Res<Time>>,
    mut clock: ResMut<SimClock>,
) {
    let dt = match (settings.fixed_step, time) {
        (Some(step), _) => step,
        (None, Some(time)) => time.delta_secs().min(settings.max_frame_delta),
        (None, None) => 0.0,
    };
    clock.advance(dt);
}
