//! Level JSON builders.

use puffball::map::{load_map, LoadedMap, MapLibrary};
use puffball::SceneId;
use serde_json::{json, Value};

/// Builds a two-layer map document object by object.
///
/// Coordinates are in map pixels, before the world scale is applied.
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    colliders: Vec<Value>,
    spawn_points: Vec<Value>,
}

impl MapBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with a single wide floor whose top edge sits at map `y = 100`.
    ///
    /// An actor spawned at `y = 84` rests on it.
    #[must_use]
    pub fn floor() -> Self {
        Self::new().platform(0.0, 100.0, 200.0, 10.0)
    }

    #[must_use]
    pub fn platform(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.colliders.push(json!({
            "name": "", "x": x, "y": y, "width": width, "height": height
        }));
        self
    }

    #[must_use]
    pub fn exit(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.colliders.push(json!({
            "name": "exit", "x": x, "y": y, "width": width, "height": height
        }));
        self
    }

    #[must_use]
    pub fn spawn(mut self, name: &str, x: f32, y: f32) -> Self {
        self.spawn_points.push(json!({ "name": name, "x": x, "y": y }));
        self
    }

    /// Serialises the map as the JSON the loader reads.
    #[must_use]
    pub fn json(&self) -> String {
        json!({
            "layers": [
                { "name": "colliders", "objects": self.colliders },
                { "name": "spawnpoints", "objects": self.spawn_points },
            ]
        })
        .to_string()
    }

    /// Parses the built JSON.
    ///
    /// # Panics
    ///
    /// Panics if the builder produced a map the loader rejects.
    #[must_use]
    pub fn build(&self) -> LoadedMap {
        load_map(&self.json()).unwrap_or_else(|err| panic!("test map rejected: {err}"))
    }
}

/// A library holding both levels.
#[must_use]
pub fn library(level_1: &MapBuilder, level_2: &MapBuilder) -> MapLibrary {
    let mut library = MapLibrary::default();
    library.insert(SceneId::Level1, level_1.build());
    library.insert(SceneId::Level2, level_2.build());
    library
}
