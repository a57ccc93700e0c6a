//! Windowed rendering of the simulation.
//!
//! Only compiled with the `render` feature. Attaches a sprite from the shared
//! sheet to every entity with an [`Animation`], draws the level art behind
//! them and keeps the 2D camera on [`CameraView`].

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::components::{Animation, FlipX, Opacity, SceneMember};
use crate::gameplay::{GameSet, SimClock};
use crate::presentation::{
    sync_transforms_system, to_translation, CameraView, PresentationSettings,
};
use crate::scene::ActiveScene;
use crate::sprites::{AnimationCatalog, CELL_SIZE, SHEET_COLUMNS, SHEET_PATH, SHEET_ROWS};
use crate::MAP_SCALE;

/// Background colour behind the level art.
pub const BACKGROUND: Color = Color::srgb(247.0 / 255.0, 215.0 / 255.0, 219.0 / 255.0);

/// Loaded sprite sheet and its animation catalog.
#[derive(Resource, Debug, Clone)]
pub struct SpriteSheet {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub catalog: AnimationCatalog,
}

/// Level art drawn behind the scene.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelBackground;

/// Marks the child entity that draws an animated parent.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AnimatedSprite;

fn setup_render_system(
    mut commands: Commands,
    assets: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    settings: Res<PresentationSettings>,
) {
    commands.insert_resource(ClearColor(BACKGROUND));
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / settings.zoom.max(f32::EPSILON),
            ..OrthographicProjection::default_2d()
        }),
        Name::new("GameCamera"),
    ));

    let layout = TextureAtlasLayout::from_grid(
        UVec2::splat(CELL_SIZE),
        SHEET_COLUMNS,
        SHEET_ROWS,
        None,
        None,
    );
    commands.insert_resource(SpriteSheet {
        image: assets.load(SHEET_PATH),
        layout: layouts.add(layout),
        catalog: AnimationCatalog::kirby_sheet(),
    });
}

/// Gives each newly animated entity a scaled sprite child.
///
/// Positions name the sprite's top-left corner, so the child is offset by
/// half a scaled cell.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn attach_sprites_system(
    mut commands: Commands,
    sheet: Res<SpriteSheet>,
    added: Query<Entity, Added<Animation>>,
) {
    #[expect(
        clippy::cast_precision_loss,
        reason = "The cell size is a small constant."
    )]
    let half = CELL_SIZE as f32 * MAP_SCALE / 2.0;
    for entity in &added {
        let sprite = Sprite::from_atlas_image(
            sheet.image.clone(),
            TextureAtlas {
                layout: sheet.layout.clone(),
                index: 0,
            },
        );
        commands
            .entity(entity)
            .insert(Visibility::default())
            .with_child((
                AnimatedSprite,
                sprite,
                Transform::from_xyz(half, -half, 0.0).with_scale(Vec3::splat(MAP_SCALE)),
            ));
    }
}

/// Applies animation frame, mirroring and opacity to sprite children.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn animate_sprites_system(
    sheet: Res<SpriteSheet>,
    clock: Res<SimClock>,
    parents: Query<(&Animation, Option<&FlipX>, Option<&Opacity>, &Children)>,
    mut sprites: Query<&mut Sprite, With<AnimatedSprite>>,
) {
    let now = clock.now();
    for (anim, flip, opacity, children) in &parents {
        let frame = sheet.catalog.frame_at(anim.name, now - anim.started_at);
        for child in children.iter() {
            let Ok(mut sprite) = sprites.get_mut(child) else {
                continue;
            };
            if let (Some(index), Some(atlas)) = (frame, sprite.texture_atlas.as_mut()) {
                atlas.index = index as usize;
            }
            sprite.flip_x = flip.is_some_and(|f| f.0);
            sprite.color = Color::WHITE.with_alpha(opacity.map_or(1.0, |o| o.0));
        }
    }
}

/// Spawns the art of a freshly entered scene.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn spawn_background_system(
    mut commands: Commands,
    assets: Res<AssetServer>,
    scene: Res<ActiveScene>,
) {
    commands.spawn((
        SceneMember,
        LevelBackground,
        Name::new("LevelBackground"),
        Sprite::from_image(assets.load(format!("{}.png", scene.0.name()))),
        Transform::from_xyz(0.0, 0.0, -10.0).with_scale(Vec3::splat(MAP_SCALE)),
    ));
}

/// Aligns level art to the map origin once its size is known.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn place_background_system(
    images: Res<Assets<Image>>,
    mut backgrounds: Query<(&Sprite, &mut Transform), With<LevelBackground>>,
) {
    for (sprite, mut transform) in &mut backgrounds {
        if let Some(image) = images.get(&sprite.image) {
            let half = image.size_f32() * MAP_SCALE / 2.0;
            transform.translation = to_translation(half, transform.translation.z);
        }
    }
}

/// Keeps the camera on [`CameraView`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn camera_sync_system(
    view: Res<CameraView>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    for mut transform in &mut cameras {
        transform.translation = to_translation(view.center, transform.translation.z);
    }
}

/// Copies the window size into [`PresentationSettings`].
pub fn track_viewport_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut settings: ResMut<PresentationSettings>,
) {
    if let Ok(window) = windows.single() {
        let viewport = Vec2::new(window.width(), window.height());
        if settings.viewport != viewport {
            settings.viewport = viewport;
        }
    }
}

/// Plugin adding the camera, sprites and level art.
#[derive(Debug, Default)]
pub struct PuffballRenderPlugin;

impl Plugin for PuffballRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_render_system);
        app.add_systems(
            Update,
            (
                track_viewport_system,
                spawn_background_system.run_if(resource_exists_and_changed::<ActiveScene>),
                place_background_system,
                attach_sprites_system,
                animate_sprites_system,
                camera_sync_system,
            )
                .chain()
                .after(sync_transforms_system)
                .in_set(GameSet::Present),
        );
    }
}
