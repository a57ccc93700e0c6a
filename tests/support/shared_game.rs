//! A [`GameHarness`] that rspec fixtures can clone and share.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use test_utils::{library, GameHarness, MapBuilder};

/// Harness slot; `None` until a scenario builds its level.
#[derive(Debug, Default)]
pub struct ThreadSafeGame(pub Option<GameHarness>);

// SAFETY: rspec requires `Send + Sync` fixtures but runs examples on one
// thread (see `run_serial`), and every access goes through the mutex.
unsafe impl Send for ThreadSafeGame {}
unsafe impl Sync for ThreadSafeGame {}

/// Cloneable handle to one game shared by every example of a suite.
#[derive(Debug, Clone, Default)]
pub struct SharedGame(Arc<Mutex<ThreadSafeGame>>);

impl SharedGame {
    /// Replaces the running game with a fresh one on `level_1`.
    pub fn restart_with(&self, level_1: &MapBuilder) {
        let level_2 = MapBuilder::floor().spawn("player", 10.0, 84.0);
        self.lock().0 = Some(GameHarness::new(library(level_1, &level_2)));
    }

    /// Runs `f` against the running game.
    ///
    /// # Panics
    ///
    /// Panics if no scenario has started a game yet.
    pub fn with<R>(&self, f: impl FnOnce(&mut GameHarness) -> R) -> R {
        let mut guard = self.lock();
        let game = guard
            .0
            .as_mut()
            .unwrap_or_else(|| panic!("scenario started no game"));
        f(game)
    }

    fn lock(&self) -> MutexGuard<'_, ThreadSafeGame> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
