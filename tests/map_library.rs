//! Loading level files from disk.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use puffball::behaviour::Flame;
use puffball::error::GameError;
use puffball::map::MapLibrary;
use puffball::physics::Body;
use puffball::scene::ActiveScene;
use puffball::{GameSettings, PuffballPlugin, SceneId, SceneRequest};
use rstest::{fixture, rstest};
use tempfile::TempDir;
use test_utils::{GameHarness, MapBuilder};

fn write_level(dir: &Path, scene: SceneId, map: &MapBuilder) {
    fs::write(dir.join(format!("{}.json", scene.name())), map.json()).expect("write level");
}

#[fixture]
fn maps_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    write_level(
        dir.path(),
        SceneId::Level1,
        &MapBuilder::floor().spawn("player", 10.0, 84.0).spawn("guy", 60.0, 84.0),
    );
    write_level(
        dir.path(),
        SceneId::Level2,
        &MapBuilder::floor()
            .platform(120.0, 60.0, 30.0, 4.0)
            .spawn("player", 20.0, 84.0),
    );
    dir
}

#[rstest]
fn loads_both_levels(maps_dir: TempDir) {
    let library = MapLibrary::load_dir(maps_dir.path()).expect("maps load");
    assert_eq!(library.get(SceneId::Level1).expect("level 1").colliders.len(), 1);
    assert_eq!(library.get(SceneId::Level2).expect("level 2").colliders.len(), 2);
}

#[rstest]
fn shipped_levels_are_playable() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let library = MapLibrary::load_dir(&dir).expect("shipped maps load");
    for scene in SceneId::ALL {
        let map = library.get(scene).expect("scene registered");
        assert_eq!(map.spawn_points.get("player").len(), 1, "{scene}");
    }
    let exits = library
        .get(SceneId::Level1)
        .expect("level 1")
        .colliders
        .iter()
        .filter(|c| !c.is_solid())
        .count();
    assert_eq!(exits, 1);
}

#[rstest]
fn shipped_levels_boot_and_settle() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let library = MapLibrary::load_dir(&dir).expect("shipped maps load");
    let flames = |scene| library.get(scene).expect("scene").spawn_points.get("flame").len();
    let expected = [
        (SceneId::Level1, flames(SceneId::Level1)),
        (SceneId::Level2, flames(SceneId::Level2)),
    ];
    let mut game = GameHarness::new(library);

    for (scene, flame_count) in expected {
        if game.active_scene() != Some(scene) {
            game.world_mut().write_message(SceneRequest(scene));
            game.step();
        }
        assert_eq!(game.active_scene(), Some(scene));
        assert_eq!(game.roles().scene, scene);
        assert_eq!(game.count::<With<Flame>>(), flame_count, "{scene}");

        let player = game.roles().player;
        let settled = game.step_until(120, |game| {
            game.component::<Body>(player).is_some_and(|body| body.grounded)
        });
        assert!(settled, "player never landed in {scene}");
        assert_eq!(game.active_scene(), Some(scene));
    }
}

#[rstest]
fn missing_level_file_is_an_io_error(maps_dir: TempDir) {
    fs::remove_file(maps_dir.path().join("level-2.json")).expect("remove");
    let err = MapLibrary::load_dir(maps_dir.path()).expect_err("level 2 missing");
    assert!(matches!(err, GameError::Io { ref path, .. } if path.ends_with("level-2.json")));
}

#[rstest]
fn malformed_level_names_its_scene(maps_dir: TempDir) {
    fs::write(maps_dir.path().join("level-1.json"), "{\"layers\": 3}").expect("write");
    let err = MapLibrary::load_dir(maps_dir.path()).expect_err("bad json");
    assert!(matches!(err, GameError::Map { scene: SceneId::Level1, .. }));
    assert!(err.to_string().contains("level-1"));
}

#[rstest]
fn plugin_reads_maps_dir_when_no_library_is_given(maps_dir: TempDir) {
    let mut app = App::new();
    app.insert_resource(GameSettings {
        maps_dir: maps_dir.path().to_path_buf(),
        start_scene: SceneId::Level2,
        fixed_step: Some(1.0 / 64.0),
        ..GameSettings::default()
    });
    app.add_plugins(PuffballPlugin);

    app.update();

    assert!(app.world().contains_resource::<MapLibrary>());
    assert_eq!(
        app.world().get_resource::<ActiveScene>().map(|s| s.0),
        Some(SceneId::Level2)
    );
}
