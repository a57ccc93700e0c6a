use bevy::prelude::Component;

use super::{BehaviourState, StateMachine};
use crate::error::IllegalTransitionError;
use crate::{FLAME_IDLE_SECONDS, FLAME_JUMP_FORCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameState {
    Idle,
    Jump,
}

impl BehaviourState for FlameState {
    const MACHINE: &'static str = "flame";
    const INITIAL: Self = Self::Idle;

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Jump => "jump",
        }
    }

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Jump) | (Self::Jump, Self::Idle)
        )
    }
}

/// What the host should do for a flame this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlameAction {
    None,
    /// Apply an upward impulse of this magnitude.
    Jump(f32),
}

/// Hopping fire enemy: rests for a second, jumps, lands, repeats.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Flame {
    machine: StateMachine<FlameState>,
}

impl Flame {
    /// A flame entering `idle` at `now`.
    #[must_use]
    pub fn new(now: f64) -> Self {
        let mut machine = StateMachine::new(now);
        machine.schedule(FLAME_IDLE_SECONDS, FlameState::Jump, now);
        Self { machine }
    }

    #[must_use]
    pub const fn state(&self) -> FlameState {
        self.machine.current()
    }

    /// Advances the machine to `now`.
    ///
    /// `grounded` is the host's ground-contact signal. It is ignored on the
    /// tick the jump starts, since the body has not left the floor yet.
    ///
    /// # Errors
    ///
    /// Propagates [`IllegalTransitionError`] from the transition table.
    pub fn tick(&mut self, now: f64, grounded: bool) -> Result<FlameAction, IllegalTransitionError> {
        if let Some(next) = self.machine.take_due(now) {
            return self.transition(next, now);
        }
        let airborne_for_a_tick = self.machine.entered_at() < now;
        if self.state() == FlameState::Jump && grounded && airborne_for_a_tick {
            return self.transition(FlameState::Idle, now);
        }
        Ok(FlameAction::None)
    }

    fn transition(
        &mut self,
        next: FlameState,
        now: f64,
    ) -> Result<FlameAction, IllegalTransitionError> {
        self.machine.enter(next, now)?;
        Ok(match next {
            FlameState::Idle => {
                self.machine
                    .schedule(FLAME_IDLE_SECONDS, FlameState::Jump, now);
                FlameAction::None
            }
            FlameState::Jump => FlameAction::Jump(FLAME_JUMP_FORCE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn waits_one_second_before_jumping() {
        let mut flame = Flame::new(0.0);
        assert_eq!(flame.tick(0.5, true), Ok(FlameAction::None));
        assert_eq!(flame.state(), FlameState::Idle);
        assert_eq!(flame.tick(1.0, false), Ok(FlameAction::Jump(FLAME_JUMP_FORCE)));
        assert_eq!(flame.state(), FlameState::Jump);
    }

    #[rstest]
    fn ground_contact_on_jump_tick_is_ignored() {
        let mut flame = Flame::new(0.0);
        flame.tick(1.0, true).expect("jump");
        assert_eq!(flame.state(), FlameState::Jump);
    }

    #[rstest]
    fn landing_returns_to_idle_and_rearms_timer() {
        let mut flame = Flame::new(0.0);
        flame.tick(1.0, true).expect("jump");
        assert_eq!(flame.tick(1.1, false), Ok(FlameAction::None));
        assert_eq!(flame.state(), FlameState::Jump);
        assert_eq!(flame.tick(1.5, true), Ok(FlameAction::None));
        assert_eq!(flame.state(), FlameState::Idle);
        assert_eq!(flame.tick(2.4, true), Ok(FlameAction::None));
        assert_eq!(flame.tick(2.5, true), Ok(FlameAction::Jump(FLAME_JUMP_FORCE)));
    }

    #[rstest]
    #[case(FlameState::Idle, FlameState::Jump, true)]
    #[case(FlameState::Jump, FlameState::Idle, true)]
    #[case(FlameState::Idle, FlameState::Idle, false)]
    #[case(FlameState::Jump, FlameState::Jump, false)]
    fn transition_table(#[case] from: FlameState, #[case] to: FlameState, #[case] legal: bool) {
        assert_eq!(from.can_transition_to(to), legal);
    }
}
