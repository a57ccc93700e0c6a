use bevy::prelude::Component;

use super::{BehaviourState, StateMachine};
use crate::error::IllegalTransitionError;
use crate::{GUY_DEFAULT_SPEED, GUY_IDLE_SECONDS, GUY_PATROL_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuyState {
    Idle,
    Left,
    Right,
}

impl BehaviourState for GuyState {
    const MACHINE: &'static str = "guy";
    const INITIAL: Self = Self::Idle;

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Left) | (Self::Left, Self::Right) | (Self::Right, Self::Left)
        )
    }
}

/// Walker that pauses once, then paces left and right forever.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PatrolGuy {
    machine: StateMachine<GuyState>,
    speed: f32,
    flip_x: bool,
}

impl PatrolGuy {
    /// A guy entering `idle` at `now` with the default speed.
    #[must_use]
    pub fn new(now: f64) -> Self {
        Self::with_speed(now, GUY_DEFAULT_SPEED)
    }

    #[must_use]
    pub fn with_speed(now: f64, speed: f32) -> Self {
        let mut machine = StateMachine::new(now);
        machine.schedule(GUY_IDLE_SECONDS, GuyState::Left, now);
        Self {
            machine,
            speed,
            flip_x: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GuyState {
        self.machine.current()
    }

    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub const fn flip_x(&self) -> bool {
        self.flip_x
    }

    /// Advances to `now` and returns the horizontal velocity for this tick.
    ///
    /// # Errors
    ///
    /// Propagates [`IllegalTransitionError`] from the transition table.
    pub fn tick(&mut self, now: f64) -> Result<f32, IllegalTransitionError> {
        if let Some(next) = self.machine.take_due(now) {
            self.machine.enter(next, now)?;
            match next {
                GuyState::Idle => {}
                GuyState::Left => {
                    self.flip_x = false;
                    self.machine
                        .schedule(GUY_PATROL_SECONDS, GuyState::Right, now);
                }
                GuyState::Right => {
                    self.flip_x = true;
                    self.machine
                        .schedule(GUY_PATROL_SECONDS, GuyState::Left, now);
                }
            }
        }
        Ok(match self.state() {
            GuyState::Idle => 0.0,
            GuyState::Left => -self.speed,
            GuyState::Right => self.speed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const DT: f64 = 0.125;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "The fixed test step is exactly representable in f32."
    )]
    fn displacement_between(guy: &mut PatrolGuy, from: f64, to: f64) -> f32 {
        let mut now = from;
        let mut dx = 0.0;
        while now < to {
            dx += guy.tick(now).expect("legal") * DT as f32;
            now += DT;
        }
        dx
    }

    #[rstest]
    fn full_cycle_walks_left_then_right() {
        let mut guy = PatrolGuy::new(0.0);
        let idle = displacement_between(&mut guy, 0.0, 1.0);
        assert_relative_eq!(idle, 0.0);
        let left = displacement_between(&mut guy, 1.0, 3.0);
        assert_eq!(guy.state(), GuyState::Left);
        assert!(!guy.flip_x());
        assert_relative_eq!(left, -GUY_DEFAULT_SPEED * 2.0);
        let right = displacement_between(&mut guy, 3.0, 5.0);
        assert_eq!(guy.state(), GuyState::Right);
        assert!(guy.flip_x());
        assert_relative_eq!(right, GUY_DEFAULT_SPEED * 2.0);
    }

    #[rstest]
    fn keeps_alternating_after_first_cycle() {
        let mut guy = PatrolGuy::with_speed(0.0, 50.0);
        let states: Vec<_> = [0.0, 1.0, 3.0, 5.0, 7.0]
            .into_iter()
            .map(|t| {
                guy.tick(t).expect("legal");
                guy.state()
            })
            .collect();
        assert_eq!(
            states,
            vec![
                GuyState::Idle,
                GuyState::Left,
                GuyState::Right,
                GuyState::Left,
                GuyState::Right
            ]
        );
    }

    #[rstest]
    #[case(GuyState::Idle, GuyState::Left, true)]
    #[case(GuyState::Left, GuyState::Right, true)]
    #[case(GuyState::Right, GuyState::Left, true)]
    #[case(GuyState::Idle, GuyState::Right, false)]
    #[case(GuyState::Left, GuyState::Idle, false)]
    #[case(GuyState::Right, GuyState::Idle, false)]
    fn transition_table(#[case] from: GuyState, #[case] to: GuyState, #[case] legal: bool) {
        assert_eq!(from.can_transition_to(to), legal);
    }
}
