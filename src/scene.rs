//! Scene registry and transitions.
//!
//! A scene is one level: the entities built from its map. Switching scenes
//! despawns every [`SceneMember`] and assembles the requested map from the
//! [`MapLibrary`]. Requests arrive as [`SceneRequest`] messages and are
//! served in the `Transition` set, after all collision reactions of the
//! frame have run.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use log::{info, warn};
use thiserror::Error;

use crate::collision::ActiveContacts;
use crate::components::SceneMember;
use crate::error::GameError;
use crate::gameplay::{GameplayFault, GameplayFaultContext, SimClock};
use crate::map::{spawn_scene, MapLibrary, SceneRoles};
use crate::settings::GameSettings;

/// The game's levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SceneId {
    #[default]
    Level1,
    Level2,
}

impl SceneId {
    /// Every scene, in play order.
    pub const ALL: [Self; 2] = [Self::Level1, Self::Level2];

    /// Registry name, also the map file stem.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Level1 => "level-1",
            Self::Level2 => "level-2",
        }
    }

    /// Scene restarted after death or falling out of the level.
    #[must_use]
    pub const fn restart() -> Self {
        Self::Level1
    }

    /// Scene reached by touching an exit; every exit leads here.
    #[must_use]
    pub const fn exit_target() -> Self {
        Self::Level2
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scene name that matches no registered scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scene `{0}` (expected one of: level-1, level-2)")]
pub struct UnknownSceneName(pub String);

impl FromStr for SceneId {
    type Err = UnknownSceneName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scene| scene.name() == s)
            .ok_or_else(|| UnknownSceneName(s.to_owned()))
    }
}

/// Asks for the active scene to be replaced.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneRequest(pub SceneId);

/// The scene currently assembled in the world.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveScene(pub SceneId);

/// Requests the configured start scene.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn request_start_scene_system(
    settings: Res<GameSettings>,
    mut requests: MessageWriter<SceneRequest>,
) {
    requests.write(SceneRequest(settings.start_scene));
}

/// Loads the map directory unless a [`MapLibrary`] was already provided.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn load_map_library_system(
    mut commands: Commands,
    settings: Res<GameSettings>,
    library: Option<Res<MapLibrary>>,
) {
    if library.is_some() {
        return;
    }
    match MapLibrary::load_dir(&settings.maps_dir) {
        Ok(library) => commands.insert_resource(library),
        Err(e) => commands.trigger(GameplayFault::new(
            GameplayFaultContext::MapLoad,
            e.to_string(),
        )),
    }
}

/// Serves the last [`SceneRequest`] of the frame.
///
/// All members of the old scene are despawned before the new one is built.
/// Contacts are forgotten with the entities they referred to. A scene that
/// fails to assemble leaves the world empty and raises a [`GameplayFault`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn scene_transition_system(
    mut commands: Commands,
    mut requests: MessageReader<SceneRequest>,
    library: Option<Res<MapLibrary>>,
    clock: Res<SimClock>,
    members: Query<Entity, With<SceneMember>>,
    mut contacts: ResMut<ActiveContacts>,
) {
    let Some(SceneRequest(scene)) = requests.read().last().copied() else {
        return;
    };

    for entity in &members {
        commands.entity(entity).try_despawn();
    }
    contacts.clear();
    commands.remove_resource::<SceneRoles>();

    let Some(library) = library else {
        warn!("scene `{scene}` requested before any map was loaded");
        return;
    };
    let assembled = library.get(scene).and_then(|map| {
        spawn_scene(&mut commands, map, scene, clock.now()).map_err(GameError::from)
    });
    match assembled {
        Ok(roles) => {
            info!("entered scene `{scene}`");
            commands.insert_resource(roles);
            commands.insert_resource(ActiveScene(scene));
        }
        Err(e) => commands.trigger(GameplayFault::new(
            GameplayFaultContext::SceneAssembly,
            e.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("level-1", SceneId::Level1)]
    #[case("level-2", SceneId::Level2)]
    fn names_round_trip(#[case] name: &str, #[case] scene: SceneId) {
        assert_eq!(name.parse::<SceneId>(), Ok(scene));
        assert_eq!(scene.to_string(), name);
    }

    #[rstest]
    fn unknown_names_are_rejected() {
        let err = "level-3".parse::<SceneId>().unwrap_err();
        assert_eq!(err, UnknownSceneName("level-3".to_owned()));
    }

    #[rstest]
    fn exits_advance_and_deaths_restart() {
        assert_eq!(SceneId::exit_target(), SceneId::Level2);
        assert_eq!(SceneId::restart(), SceneId::Level1);
    }
}
