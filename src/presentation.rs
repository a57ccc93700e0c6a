//! Presentation state derived from the simulation.
//!
//! The simulation works in map space with y growing downward. This module
//! tracks where the camera looks, mirrors [`Position`] into Bevy
//! [`Transform`]s with y flipped, and never feeds anything back into the
//! game logic except the visible rectangle used to cull birds and stars.

use bevy::prelude::*;

use crate::components::Position;
use crate::gameplay::{bird_cull_system, projectile_cull_system, GameSet};
use crate::map::SceneRoles;
use crate::player::PlayerController;
use crate::{CAMERA_FIXED_Y, CAMERA_FOLLOW_LIMIT_X, CAMERA_LEAD_X, CAMERA_ZOOM};

/// Runtime configuration for the camera.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use puffball::presentation::PresentationSettings;
///
/// let mut app = App::new();
/// app.insert_resource(PresentationSettings {
///     viewport: Vec2::new(1920.0, 1080.0),
///     ..PresentationSettings::default()
/// });
/// ```
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PresentationSettings {
    /// Window size in pixels.
    pub viewport: Vec2,
    /// Camera scale factor; values below one show more of the level.
    pub zoom: f32,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(1280.0, 720.0),
            zoom: CAMERA_ZOOM,
        }
    }
}

/// Where the camera looks, in map space.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub center: Vec2,
    /// World rectangle currently on screen.
    pub visible: Rect,
}

impl CameraView {
    /// View centred on `center` for the given viewport and zoom.
    #[must_use]
    pub fn looking_at(center: Vec2, settings: &PresentationSettings) -> Self {
        let zoom = settings.zoom.max(f32::EPSILON);
        Self {
            center,
            visible: Rect::from_center_half_size(center, settings.viewport / (2.0 * zoom)),
        }
    }
}

impl FromWorld for CameraView {
    fn from_world(world: &mut World) -> Self {
        let settings = world
            .get_resource::<PresentationSettings>()
            .cloned()
            .unwrap_or_default();
        Self::looking_at(Vec2::new(CAMERA_LEAD_X, CAMERA_FIXED_Y), &settings)
    }
}

/// Camera centre for a player at `player_x`.
///
/// The camera leads the player horizontally at a fixed height until the
/// player passes the follow limit; past it the camera holds `current`.
///
/// # Examples
///
/// ```
/// use bevy::math::Vec2;
/// use puffball::presentation::camera_follow;
///
/// assert_eq!(camera_follow(100.0, Vec2::ZERO), Vec2::new(600.0, 800.0));
/// assert_eq!(camera_follow(900.0, Vec2::ONE), Vec2::ONE);
/// ```
#[must_use]
pub fn camera_follow(player_x: f32, current: Vec2) -> Vec2 {
    if player_x < CAMERA_FOLLOW_LIMIT_X {
        Vec2::new(player_x + CAMERA_LEAD_X, CAMERA_FIXED_Y)
    } else {
        current
    }
}

/// Moves [`CameraView`] after the player.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn camera_follow_system(
    roles: Option<Res<SceneRoles>>,
    players: Query<&Position, With<PlayerController>>,
    settings: Res<PresentationSettings>,
    mut view: ResMut<CameraView>,
) {
    let Some(player_at) = roles.and_then(|roles| players.get(roles.player).ok()) else {
        return;
    };
    let center = camera_follow(player_at.x, view.center);
    if center != view.center || settings.is_changed() {
        *view = CameraView::looking_at(center, &settings);
    }
}

/// Converts a map-space position to a Bevy translation (y up), keeping `z`.
#[must_use]
pub fn to_translation(position: Vec2, z: f32) -> Vec3 {
    Vec3::new(position.x, -position.y, z)
}

/// Mirrors changed positions into transforms.
pub fn sync_transforms_system(mut query: Query<(&Position, &mut Transform), Changed<Position>>) {
    for (position, mut transform) in &mut query {
        transform.translation = to_translation(position.0, transform.translation.z);
    }
}

/// Plugin owning camera tracking and transform sync.
#[derive(Debug, Default)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PresentationSettings>();
        app.init_resource::<CameraView>();
        app.add_systems(
            Update,
            (
                camera_follow_system,
                bird_cull_system,
                projectile_cull_system,
                sync_transforms_system,
            )
                .chain()
                .in_set(GameSet::Present),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::leads_player(0.0, Vec2::new(500.0, 800.0))]
    #[case::just_inside(431.0, Vec2::new(931.0, 800.0))]
    #[case::holds_at_limit(432.0, Vec2::new(-1.0, -1.0))]
    fn camera_follows_until_limit(#[case] x: f32, #[case] expected: Vec2) {
        assert_eq!(camera_follow(x, Vec2::splat(-1.0)), expected);
    }

    #[rstest]
    fn view_widens_with_zoom_below_one() {
        let settings = PresentationSettings {
            viewport: Vec2::new(700.0, 350.0),
            zoom: 0.7,
        };
        let view = CameraView::looking_at(Vec2::ZERO, &settings);
        assert_relative_eq!(view.visible.width(), 1000.0, epsilon = 1e-3);
        assert_relative_eq!(view.visible.height(), 500.0, epsilon = 1e-3);
    }

    #[rstest]
    fn transforms_flip_y() {
        let mut app = App::new();
        app.add_systems(Update, sync_transforms_system);
        let entity = app
            .world_mut()
            .spawn((
                Position(Vec2::new(10.0, 20.0)),
                Transform::from_xyz(0.0, 0.0, 3.0),
            ))
            .id();
        app.update();
        let transform = app.world().get::<Transform>(entity).expect("transform");
        assert_eq!(transform.translation, Vec3::new(10.0, -20.0, 3.0));
    }
}
