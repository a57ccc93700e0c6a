//! Tile-map loading: authored JSON documents into colliders and spawn points.
//!
//! A map document is a sequence of named layers. Two layer names matter:
//!
//! - `colliders`: every object becomes a [`Collider`]. Objects named `exit`
//!   are level-exit sensors; everything else is solid platform geometry.
//! - `spawnpoints`: every object appends its coordinates to the
//!   [`SpawnPoints`] entry for its name.
//!
//! All other layers (tile layers, images, groups) are ignored. Processing is
//! a single pass in document order, so collider order and the order of points
//! under one spawn name both follow the file.
//!
//! Loading never touches the ECS; [`spawn`] turns a [`LoadedMap`] into
//! entities once validation has succeeded.

pub mod spawn;

pub use spawn::{spawn_scene, SceneRoles};

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use hashbrown::HashMap;
use log::{debug, info};
use serde::Deserialize;

use crate::error::{GameError, MapFormatError};
use crate::scene::SceneId;

/// Layer holding platform and exit rectangles.
pub const COLLIDERS_LAYER: &str = "colliders";
/// Layer holding named spawn coordinates.
pub const SPAWNPOINTS_LAYER: &str = "spawnpoints";
/// Collider object name marking a level exit.
pub const EXIT_OBJECT_NAME: &str = "exit";

/// Raw tile-map document as authored.
#[derive(Debug, Clone, Deserialize)]
pub struct MapDocument {
    pub layers: Vec<MapLayer>,
}

/// One layer of a [`MapDocument`].
#[derive(Debug, Clone, Deserialize)]
pub struct MapLayer {
    pub name: String,
    /// Absent on tile and image layers.
    #[serde(default)]
    pub objects: Option<Vec<MapObject>>,
}

/// One object of an object layer. Fields are optional here so that missing
/// ones can be reported precisely during validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapObject {
    pub name: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// Role of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    /// Immovable solid that bodies stand on.
    Platform,
    /// Non-solid sensor that ends the level on player contact.
    Exit,
}

/// A rectangle from the `colliders` layer, in map units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ColliderKind,
}

impl Collider {
    /// Whether the collider is a static body.
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        matches!(self.kind, ColliderKind::Platform)
    }
}

/// A named coordinate from the `spawnpoints` layer, in map units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

impl SpawnPoint {
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Spawn coordinates grouped by name, each group in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnPoints {
    points: HashMap<String, Vec<SpawnPoint>>,
}

impl SpawnPoints {
    /// Appends `point` under `name`, creating the group if needed.
    pub fn push(&mut self, name: impl Into<String>, point: SpawnPoint) {
        self.points.entry(name.into()).or_default().push(point);
    }

    /// All points registered under `name`, in encounter order.
    #[must_use]
    pub fn get(&self, name: &str) -> &[SpawnPoint] {
        self.points.get(name).map_or(&[], Vec::as_slice)
    }

    /// The first point registered under `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<SpawnPoint> {
        self.get(name).first().copied()
    }

    /// Iterates over spawn names and their points in unspecified name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SpawnPoint])> {
        self.points
            .iter()
            .map(|(name, points)| (name.as_str(), points.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Validated content of one map document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedMap {
    pub colliders: Vec<Collider>,
    pub spawn_points: SpawnPoints,
}

impl LoadedMap {
    /// Transforms a parsed document into colliders and spawn points.
    ///
    /// # Errors
    ///
    /// Returns [`MapFormatError`] if a recognised layer has no objects, an
    /// object misses a required field, or a collider has degenerate size.
    pub fn from_document(document: MapDocument) -> Result<Self, MapFormatError> {
        let mut map = Self::default();
        for layer in document.layers {
            match layer.name.as_str() {
                COLLIDERS_LAYER => {
                    for (index, object) in layer_objects(&layer)?.iter().enumerate() {
                        map.colliders.push(read_collider(index, object)?);
                    }
                }
                SPAWNPOINTS_LAYER => {
                    for (index, object) in layer_objects(&layer)?.iter().enumerate() {
                        let name = required(&layer, index, "name", object.name.clone())?;
                        let x = required(&layer, index, "x", object.x)?;
                        let y = required(&layer, index, "y", object.y)?;
                        map.spawn_points.push(name, SpawnPoint { x, y });
                    }
                }
                other => debug!("ignoring map layer `{other}`"),
            }
        }
        Ok(map)
    }
}

fn layer_objects(layer: &MapLayer) -> Result<&[MapObject], MapFormatError> {
    layer
        .objects
        .as_deref()
        .ok_or_else(|| MapFormatError::MissingObjects {
            layer: layer.name.clone(),
        })
}

fn required<T>(
    layer: &MapLayer,
    index: usize,
    field: &'static str,
    value: Option<T>,
) -> Result<T, MapFormatError> {
    value.ok_or_else(|| MapFormatError::MissingField {
        layer: layer.name.clone(),
        index,
        field,
    })
}

fn read_collider(index: usize, object: &MapObject) -> Result<Collider, MapFormatError> {
    let missing = |field| MapFormatError::MissingField {
        layer: COLLIDERS_LAYER.to_owned(),
        index,
        field,
    };
    let name = object.name.as_deref().ok_or_else(|| missing("name"))?;
    let x = object.x.ok_or_else(|| missing("x"))?;
    let y = object.y.ok_or_else(|| missing("y"))?;
    let width = object.width.ok_or_else(|| missing("width"))?;
    let height = object.height.ok_or_else(|| missing("height"))?;

    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(width) || !usable(height) {
        return Err(MapFormatError::DegenerateCollider {
            index,
            width,
            height,
        });
    }

    let kind = if name == EXIT_OBJECT_NAME {
        ColliderKind::Exit
    } else {
        ColliderKind::Platform
    };
    Ok(Collider {
        x,
        y,
        width,
        height,
        kind,
    })
}

/// Parses and validates a map document.
///
/// # Errors
///
/// Returns [`MapFormatError::Json`] for unparsable input and the validation
/// errors of [`LoadedMap::from_document`] otherwise.
///
/// # Examples
///
/// ```
/// use puffball::map::{load_map, ColliderKind};
///
/// let json = r#"{"layers":[{"name":"colliders","objects":[
///     {"name":"exit","x":0,"y":0,"width":8,"height":8}]}]}"#;
/// let map = load_map(json).unwrap();
/// assert_eq!(map.colliders[0].kind, ColliderKind::Exit);
/// ```
pub fn load_map(json: &str) -> Result<LoadedMap, MapFormatError> {
    let document: MapDocument = serde_json::from_str(json)?;
    LoadedMap::from_document(document)
}

/// Parsed maps for every scene, loaded once before play starts.
#[derive(Resource, Debug, Clone, Default)]
pub struct MapLibrary {
    maps: HashMap<SceneId, LoadedMap>,
}

impl MapLibrary {
    /// Loads `<dir>/<scene>.json` for every known scene.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Io`] when a file cannot be read and
    /// [`GameError::Map`] when its content is malformed.
    pub fn load_dir(dir: &Path) -> Result<Self, GameError> {
        let mut library = Self::default();
        for scene in SceneId::ALL {
            let path = dir.join(format!("{}.json", scene.name()));
            let json = fs::read_to_string(&path).map_err(|source| GameError::Io {
                path: path.clone(),
                source,
            })?;
            let map = load_map(&json).map_err(|source| GameError::Map { scene, source })?;
            info!(
                "loaded map {} ({} colliders)",
                path.display(),
                map.colliders.len()
            );
            library.insert(scene, map);
        }
        Ok(library)
    }

    /// Registers or replaces the map for `scene`.
    pub fn insert(&mut self, scene: SceneId, map: LoadedMap) {
        self.maps.insert(scene, map);
    }

    /// The map registered for `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownScene`] if none was registered.
    pub fn get(&self, scene: SceneId) -> Result<&LoadedMap, GameError> {
        self.maps.get(&scene).ok_or(GameError::UnknownScene(scene))
    }
}
