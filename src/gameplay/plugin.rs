//! Bevy plugin wiring the gameplay systems into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;
use thiserror::Error;

use super::{
    advance_clock_system, bird_flight_system, flame_system, guy_system, inhale_pull_system,
    inhale_rig_system, inhale_zone_contact_system, player_contact_system, player_fall_system,
    player_input_system, player_upkeep_system, projectile_contact_system, SimClock,
};
use crate::collision::{detect_collisions_system, ActiveContacts, CollisionBegan, CollisionEnded};
use crate::physics::physics_system;
use crate::presentation::PresentationPlugin;
use crate::scene::{
    load_map_library_system, request_start_scene_system, scene_transition_system, SceneRequest,
};
use crate::settings::GameSettings;

/// Ordered stages of one simulated frame.
///
/// Every per-tick callback (input, behaviour machines, the inhale pull) runs
/// before physics, and every collision reaction runs after it. Scene changes
/// requested during the frame are applied last, before presentation.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    Clock,
    Input,
    Behaviour,
    Physics,
    Collision,
    React,
    Transition,
    Present,
}

/// Where a [`GameplayFault`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameplayFaultContext {
    /// Reading or parsing the map directory.
    MapLoad,
    /// Building a scene from its map.
    SceneAssembly,
    /// A behaviour machine rejected a transition.
    Behaviour,
}

/// Event raised when a system hits an error path.
///
/// The plugin logs these through an observer; tests may add their own
/// observer to capture them.
#[derive(Event, Debug, Clone, Error)]
#[error("{context:?}: {detail}")]
pub struct GameplayFault {
    pub context: GameplayFaultContext,
    pub detail: String,
}

impl GameplayFault {
    /// Convenience constructor used by systems to raise faults.
    #[must_use]
    pub fn new(context: GameplayFaultContext, detail: impl Into<String>) -> Self {
        Self {
            context,
            detail: detail.into(),
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_gameplay_fault(event: On<GameplayFault>) {
    error!("gameplay fault during {}", event.event());
}

/// Installs the whole game simulation.
///
/// Insert [`GameSettings`] (and optionally a pre-built
/// [`MapLibrary`](crate::map::MapLibrary)) before adding the plugin to
/// override the defaults.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use puffball::settings::GameSettings;
/// use puffball::PuffballPlugin;
///
/// let mut app = App::new();
/// app.insert_resource(GameSettings {
///     fixed_step: Some(1.0 / 64.0),
///     maps_dir: "missing".into(),
///     ..GameSettings::default()
/// });
/// app.add_plugins(PuffballPlugin);
/// app.update();
/// ```
#[derive(Debug, Default)]
pub struct PuffballPlugin;

impl Plugin for PuffballPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSettings>()
            .init_resource::<SimClock>()
            .init_resource::<ActiveContacts>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_message::<SceneRequest>()
            .add_message::<CollisionBegan>()
            .add_message::<CollisionEnded>()
            .add_observer(log_gameplay_fault);

        app.configure_sets(
            Update,
            (
                GameSet::Clock,
                GameSet::Input,
                GameSet::Behaviour,
                GameSet::Physics,
                GameSet::Collision,
                GameSet::React,
                GameSet::Transition,
                GameSet::Present,
            )
                .chain(),
        );

        app.add_systems(
            Startup,
            (load_map_library_system, request_start_scene_system).chain(),
        );
        app.add_systems(
            Update,
            (
                advance_clock_system.in_set(GameSet::Clock),
                player_input_system.in_set(GameSet::Input),
                (
                    player_upkeep_system,
                    flame_system,
                    guy_system,
                    bird_flight_system,
                    inhale_pull_system,
                )
                    .in_set(GameSet::Behaviour),
                (physics_system, inhale_rig_system)
                    .chain()
                    .in_set(GameSet::Physics),
                detect_collisions_system.in_set(GameSet::Collision),
                (
                    inhale_zone_contact_system,
                    projectile_contact_system,
                    player_contact_system,
                    player_fall_system,
                )
                    .chain()
                    .in_set(GameSet::React),
                scene_transition_system.in_set(GameSet::Transition),
            ),
        );

        app.add_plugins(PresentationPlugin);
    }
}
