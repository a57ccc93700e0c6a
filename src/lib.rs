#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the Puffball platformer.
//!
//! Gameplay state lives in plain types (`map`, `behaviour`, `inhale`,
//! `player`, `tween`, `sprites`) that are tested without an engine. The
//! `gameplay`, `scene`, `physics`, `collision` and `presentation` modules
//! bridge them into a Bevy [`App`](bevy::app::App) through
//! [`PuffballPlugin`].
pub mod behaviour;
pub mod collision;
pub mod components;
pub mod constants;
pub mod error;
pub mod gameplay;
pub mod inhale;
pub mod logging;
pub mod map;
pub mod physics;
pub mod player;
pub mod presentation;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod render;
pub mod scene;
pub mod settings;
pub mod sprites;
pub mod tween;
pub use constants::*;

// Re-export commonly used items
pub use behaviour::{Bird, Flame, PatrolGuy};
pub use components::{Direction, Health, Position, Tag, Tags};
pub use error::{GameError, IllegalTransitionError, MapFormatError, MissingSingletonError};
pub use gameplay::{GameSet, GameplayFault, PuffballPlugin, SimClock};
pub use inhale::Inhalable;
pub use logging::init as init_logging;
pub use map::{load_map, LoadedMap, MapLibrary, SceneRoles};
pub use player::PlayerController;
pub use presentation::{PresentationPlugin, PresentationSettings};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use render::PuffballRenderPlugin;
pub use scene::{SceneId, SceneRequest};
pub use settings::GameSettings;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use puffball::prelude::*;
    //! ```

    pub use crate::components::{Direction, Position};
    pub use crate::map::{MapLibrary, SceneRoles};
    pub use crate::player::PlayerController;
    pub use crate::scene::SceneId;
    pub use crate::settings::GameSettings;
    pub use crate::PuffballPlugin;
}
