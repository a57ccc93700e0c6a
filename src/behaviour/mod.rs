//! Enemy behaviour state machines.
//!
//! Each enemy kind has an enum of states and a fixed table of legal edges
//! ([`BehaviourState::can_transition_to`]). A [`StateMachine`] holds the
//! current state plus at most one [`Continuation`]: a deadline on the
//! simulation clock and the state to enter once it passes. Continuations are
//! polled every tick by the owning entity, so one enemy's wait never delays
//! another, and a despawned enemy's pending wait is dropped with it.

mod bird;
mod flame;
mod guy;

pub use bird::Bird;
pub use flame::{Flame, FlameAction, FlameState};
pub use guy::{GuyState, PatrolGuy};

use std::fmt::Debug;

use log::debug;

use crate::error::IllegalTransitionError;

/// A state of some behaviour machine.
pub trait BehaviourState: Copy + Eq + Debug {
    /// Machine name used in diagnostics.
    const MACHINE: &'static str;
    /// State the machine starts in.
    const INITIAL: Self;

    /// Stable lower-case state name.
    fn name(self) -> &'static str;

    /// Whether the edge `self -> next` exists.
    fn can_transition_to(self, next: Self) -> bool;
}

/// Deferred transition: enter `next` once the clock reaches `wake_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Continuation<S> {
    pub wake_at: f64,
    pub next: S,
}

/// Current state, when it was entered, and the pending wake-up.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMachine<S> {
    current: S,
    entered_at: f64,
    pending: Option<Continuation<S>>,
}

impl<S: BehaviourState> StateMachine<S> {
    /// A machine sitting in [`BehaviourState::INITIAL`] since `now`.
    #[must_use]
    pub const fn new(now: f64) -> Self {
        Self {
            current: S::INITIAL,
            entered_at: now,
            pending: None,
        }
    }

    #[must_use]
    pub const fn current(&self) -> S {
        self.current
    }

    #[must_use]
    pub const fn entered_at(&self) -> f64 {
        self.entered_at
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&Continuation<S>> {
        self.pending.as_ref()
    }

    /// Moves to `next`, discarding any pending continuation.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransitionError`] and leaves the machine untouched if
    /// the edge is not in the table.
    pub fn enter(&mut self, next: S, now: f64) -> Result<(), IllegalTransitionError> {
        if !self.current.can_transition_to(next) {
            return Err(IllegalTransitionError {
                machine: S::MACHINE,
                from: self.current.name(),
                to: next.name(),
            });
        }
        debug!(
            "{}: {} -> {} at {now:.3}",
            S::MACHINE,
            self.current.name(),
            next.name()
        );
        self.current = next;
        self.entered_at = now;
        self.pending = None;
        Ok(())
    }

    /// Arranges for `next` to be entered `delay` seconds after `now`.
    pub fn schedule(&mut self, delay: f64, next: S, now: f64) {
        self.pending = Some(Continuation {
            wake_at: now + delay,
            next,
        });
    }

    /// Removes and returns the continuation if its deadline has passed.
    pub fn take_due(&mut self, now: f64) -> Option<S> {
        match self.pending {
            Some(continuation) if continuation.wake_at <= now => {
                self.pending = None;
                Some(continuation.next)
            }
            _ => None,
        }
    }
}
