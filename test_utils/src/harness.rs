//! Headless app driven by a fixed simulation step.

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;
use puffball::map::{MapLibrary, SceneRoles};
use puffball::player::PlayerController;
use puffball::scene::ActiveScene;
use puffball::{GameSettings, PuffballPlugin, SceneId, SimClock};

/// Seconds simulated by every [`GameHarness::step`].
pub const STEP: f32 = 1.0 / 64.0;

/// A puffball app without window, input or time plugins.
///
/// Keys are fed straight into `ButtonInput<KeyCode>`; each step clears the
/// just-pressed and just-released sets the way the input plugin would.
#[derive(Debug)]
pub struct GameHarness {
    app: App,
}

impl GameHarness {
    /// Builds the app and runs the first frame, which assembles the start
    /// scene.
    #[must_use]
    pub fn new(library: MapLibrary) -> Self {
        let mut app = App::new();
        app.insert_resource(GameSettings {
            fixed_step: Some(STEP),
            ..GameSettings::default()
        })
        .insert_resource(library)
        .add_plugins(PuffballPlugin);
        let mut harness = Self { app };
        harness.step();
        harness
    }

    #[must_use]
    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Runs one frame.
    pub fn step(&mut self) {
        self.app.update();
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
    }

    pub fn steps(&mut self, frames: usize) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Steps until `done` holds, giving up after `max_frames`.
    ///
    /// Returns whether `done` was reached.
    pub fn step_until(&mut self, max_frames: usize, mut done: impl FnMut(&mut Self) -> bool) -> bool {
        for _ in 0..max_frames {
            self.step();
            if done(self) {
                return true;
            }
        }
        false
    }

    pub fn hold(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    /// Presses `key` for a single frame.
    pub fn tap(&mut self, key: KeyCode) {
        self.hold(key);
        self.step();
        self.release(key);
        self.step();
    }

    #[must_use]
    pub fn now(&self) -> f64 {
        self.app.world().resource::<SimClock>().now()
    }

    /// Roles of the scene currently in play.
    ///
    /// # Panics
    ///
    /// Panics when no scene has been assembled.
    #[must_use]
    pub fn roles(&self) -> SceneRoles {
        *self
            .app
            .world()
            .get_resource::<SceneRoles>()
            .unwrap_or_else(|| panic!("no scene assembled"))
    }

    #[must_use]
    pub fn active_scene(&self) -> Option<SceneId> {
        self.app.world().get_resource::<ActiveScene>().map(|s| s.0)
    }

    /// The current player's controller.
    ///
    /// # Panics
    ///
    /// Panics when the player entity is gone.
    #[must_use]
    pub fn player(&self) -> PlayerController {
        self.component::<PlayerController>(self.roles().player)
            .unwrap_or_else(|| panic!("player entity missing"))
    }

    /// Mutable access to the current player's controller.
    ///
    /// # Panics
    ///
    /// Panics when the player entity is gone.
    pub fn player_mut(&mut self) -> Mut<'_, PlayerController> {
        let player = self.roles().player;
        self.app
            .world_mut()
            .get_mut::<PlayerController>(player)
            .unwrap_or_else(|| panic!("player entity missing"))
    }

    #[must_use]
    pub fn component<C: Component + Clone>(&self, entity: Entity) -> Option<C> {
        self.app.world().get::<C>(entity).cloned()
    }

    #[must_use]
    pub fn exists(&self, entity: Entity) -> bool {
        self.app.world().get_entity(entity).is_ok()
    }

    /// First entity matching `F`.
    pub fn find<F: QueryFilter>(&mut self) -> Option<Entity> {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<Entity, F>();
        query.iter(world).next()
    }

    pub fn count<F: QueryFilter>(&mut self) -> usize {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<(), F>();
        query.iter(world).count()
    }
}
