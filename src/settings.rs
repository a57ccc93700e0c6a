//! Runtime configuration for the simulation.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::scene::SceneId;

/// Settings read by the gameplay plugin.
///
/// The binary fills these from command-line flags; tests insert them
/// directly before adding [`crate::PuffballPlugin`].
///
/// # Examples
///
/// ```
/// use puffball::settings::GameSettings;
/// use puffball::scene::SceneId;
///
/// let settings = GameSettings {
///     fixed_step: Some(1.0 / 64.0),
///     ..GameSettings::default()
/// };
/// assert_eq!(settings.start_scene, SceneId::Level1);
/// ```
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameSettings {
    /// Directory holding `level-1.json` and `level-2.json`.
    pub maps_dir: PathBuf,
    /// Scene requested at startup.
    pub start_scene: SceneId,
    /// When set, every frame advances the simulation by exactly this many
    /// seconds instead of the wall-clock delta.
    pub fixed_step: Option<f32>,
    /// Upper bound on a wall-clock frame delta, in seconds.
    ///
    /// Stops bodies tunnelling through thin platforms after a hitch.
    pub max_frame_delta: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from("assets"),
            start_scene: SceneId::Level1,
            fixed_step: None,
            max_frame_delta: 0.05,
        }
    }
}
