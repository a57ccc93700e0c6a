use std::path::PathBuf;

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use puffball::{init_logging, GameSettings, MapLibrary, PuffballPlugin, PuffballRenderPlugin, SceneId};

/// A small Kirby-like platformer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Directory holding the level maps
    #[arg(long, default_value = "assets")]
    maps_dir: PathBuf,
    /// Level to start in
    #[arg(long, default_value = "level-1")]
    level: SceneId,
    /// Advance the simulation by this many seconds every frame
    #[arg(long)]
    fixed_step: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let library = MapLibrary::load_dir(&args.maps_dir)
        .with_context(|| format!("loading maps from {}", args.maps_dir.display()))?;
    let settings = GameSettings {
        maps_dir: args.maps_dir,
        start_scene: args.level,
        fixed_step: args.fixed_step,
        ..GameSettings::default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Puffball".into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(settings)
        .insert_resource(library)
        .add_plugins((PuffballPlugin, PuffballRenderPlugin))
        .run();
    Ok(())
}
