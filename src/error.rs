//! Error taxonomy for map loading, scene assembly and behaviour machines.
//!
//! Load-time failures are fatal to the scene being built and surface before
//! any entity exists. Runtime conditions such as acting on an entity that was
//! already despawned are not errors and never reach these types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::scene::SceneId;

/// Malformed or incomplete tile-map document.
#[derive(Debug, Error)]
pub enum MapFormatError {
    /// The document could not be parsed as a tile map at all.
    #[error("map document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A recognised layer carries no `objects` array.
    #[error("layer `{layer}` has no `objects` array")]
    MissingObjects {
        /// Name of the offending layer.
        layer: String,
    },
    /// An object lacks a field its layer requires.
    #[error("object #{index} in layer `{layer}` is missing `{field}`")]
    MissingField {
        /// Name of the layer holding the object.
        layer: String,
        /// Position of the object within its layer.
        index: usize,
        /// The absent field.
        field: &'static str,
    },
    /// A collider would produce empty or non-finite geometry.
    #[error("collider #{index} has degenerate size {width}x{height}")]
    DegenerateCollider {
        /// Position of the collider within the `colliders` layer.
        index: usize,
        /// Authored width.
        width: f32,
        /// Authored height.
        height: f32,
    },
}

/// Scene role that must be filled by exactly one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonRole {
    /// The controllable character.
    Player,
    /// The visual effect drawn in front of the inhaling player.
    InhaleEffect,
    /// The hit region marking enemies as inhalable.
    InhaleZone,
}

impl fmt::Display for SingletonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::InhaleEffect => "inhale effect",
            Self::InhaleZone => "inhale zone",
        };
        f.write_str(name)
    }
}

/// An expected singleton entity could not be found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected exactly one {role} in scene `{scene}`, found {found}")]
pub struct MissingSingletonError {
    /// The role that was looked up.
    pub role: SingletonRole,
    /// Scene in which the lookup happened.
    pub scene: SceneId,
    /// How many candidates were present.
    pub found: usize,
}

/// A behaviour machine was asked to follow an edge its table forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{machine}: illegal transition {from} -> {to}")]
pub struct IllegalTransitionError {
    /// Kind of machine, e.g. `flame`.
    pub machine: &'static str,
    /// State the machine was in.
    pub from: &'static str,
    /// State that was requested.
    pub to: &'static str,
}

/// Top-level error for loading and assembling scenes.
#[derive(Debug, Error)]
pub enum GameError {
    /// A map file could not be read.
    #[error("failed to read map `{}`: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A map file was read but is malformed.
    #[error("map for scene `{scene}` is malformed: {source}")]
    Map {
        /// Scene whose map failed to parse.
        scene: SceneId,
        /// Parse or validation failure.
        #[source]
        source: MapFormatError,
    },
    /// A scene was requested for which no map is registered.
    #[error("no map registered for scene `{0}`")]
    UnknownScene(SceneId),
    /// A required singleton could not be constructed or found.
    #[error(transparent)]
    MissingSingleton(#[from] MissingSingletonError),
    /// A behaviour machine rejected a transition.
    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransitionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_field_names_layer_index_and_field() {
        let err = MapFormatError::MissingField {
            layer: "colliders".to_owned(),
            index: 3,
            field: "width",
        };
        assert_eq!(
            err.to_string(),
            "object #3 in layer `colliders` is missing `width`"
        );
    }

    #[rstest]
    fn missing_singleton_message_mentions_scene() {
        let err = MissingSingletonError {
            role: SingletonRole::Player,
            scene: SceneId::Level2,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "expected exactly one player in scene `level-2`, found 0"
        );
    }

    #[rstest]
    fn illegal_transition_is_transparent_in_game_error() {
        let err: GameError = IllegalTransitionError {
            machine: "guy",
            from: "left",
            to: "idle",
        }
        .into();
        assert_eq!(err.to_string(), "guy: illegal transition left -> idle");
    }
}
